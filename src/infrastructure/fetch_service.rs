use futures::StreamExt;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{core::raw_msg::RawMsg, repositories::UserRepository};

/// Work the service performs on behalf of the update cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOperation {
    FetchPage { page: i32, page_size: u32 },
    LoadUser { user_id: String },
}

/// FetchService executes repository calls off the main loop and reports their
/// outcome as raw messages:
/// - Page fetches, one at a time in arrival order
/// - Cache point lookups for the detail screen, answered even while a page
///   fetch is pending
///
/// Cancelling the token drops the in-flight fetch; a page whose remote call
/// is still pending when cancelled never reaches the cache.
pub struct FetchService {
    repository: UserRepository,
    // Incoming channels
    op_rx: mpsc::UnboundedReceiver<FetchOperation>,
    cancel_token: CancellationToken,
    // Outgoing channels
    raw_tx: mpsc::UnboundedSender<RawMsg>,
}

pub type NewFetchService = (
    mpsc::UnboundedSender<FetchOperation>, // op_tx - operations to run
    CancellationToken,                     // shutdown signal
    FetchService,
);

impl FetchService {
    pub fn new(repository: UserRepository, raw_tx: mpsc::UnboundedSender<RawMsg>) -> NewFetchService {
        let (op_tx, op_rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();

        (
            op_tx,
            cancel_token.clone(),
            Self {
                repository,
                op_rx,
                cancel_token,
                raw_tx,
            },
        )
    }

    /// Run the FetchService in background task
    pub fn run(mut self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run_service().await;
            log::info!("FetchService stopped");
        })
    }

    /// Main service loop
    ///
    /// Page fetches are handed to a worker that runs them one at a time.
    /// Lookups are answered here, so they never wait behind a slow fetch.
    async fn run_service(&mut self) {
        let (page_tx, page_rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_page_worker(
            self.repository.clone(),
            page_rx,
            self.raw_tx.clone(),
            self.cancel_token.clone(),
        ));

        loop {
            tokio::select! {
                biased;

                _ = self.cancel_token.cancelled() => {
                    log::info!("FetchService received cancellation signal");
                    break;
                }

                result = self.op_rx.recv() => match result {
                    Some(FetchOperation::FetchPage { page, page_size }) => {
                        if page_tx.send((page, page_size)).is_err() {
                            break;
                        }
                    }
                    Some(FetchOperation::LoadUser { user_id }) => self.load_user(user_id).await,
                    None => break,
                },
            }
        }

        // Queued pages still run unless the token was cancelled
        drop(page_tx);
        if let Err(e) = worker.await {
            log::error!("Page worker failed: {e}");
        }
    }

    async fn load_user(&self, user_id: String) {
        let result = self.repository.get_user_by_id(&user_id).await;
        let _ = self.raw_tx.send(RawMsg::UserLoaded { user_id, result });
    }
}

/// Run queued page fetches strictly in order, one at a time
async fn run_page_worker(
    repository: UserRepository,
    mut page_rx: mpsc::UnboundedReceiver<(i32, u32)>,
    raw_tx: mpsc::UnboundedSender<RawMsg>,
    cancel_token: CancellationToken,
) {
    while let Some((page, page_size)) = page_rx.recv().await {
        log::info!("Fetching page {page} ({page_size} per page)");
        let result = tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                log::info!("Fetch of page {page} cancelled");
                return;
            }
            result = repository.fetch_page(page, page_size) => result,
        };
        if let Err(e) = &result {
            log::warn!("Fetch of page {page} failed: {e}");
        }
        let _ = raw_tx.send(RawMsg::PageFetched {
            page,
            result: result.map(|paged| paged.next_page),
        });
    }
}

/// Forward every cache emission to the runtime as `RawMsg::UsersChanged`
pub fn spawn_cache_observer(
    repository: &UserRepository,
    raw_tx: mpsc::UnboundedSender<RawMsg>,
    cancel_token: CancellationToken,
) -> JoinHandle<()> {
    let mut users = Box::pin(repository.observe_users());
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => break,
                next = users.next() => match next {
                    Some(users) => {
                        if raw_tx.send(RawMsg::UsersChanged(users)).is_err() {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
    })
}
