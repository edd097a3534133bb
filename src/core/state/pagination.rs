//! Pagination state management for the user list
//!
//! This module follows the Elm Architecture pattern:
//! - State changes only through the `update` function
//! - All state transitions are explicitly defined as `Message` variants
//! - The module knows nothing about the users being shown; the list content
//!   always comes from the cache

/// Messages that can be sent to update the pagination state
///
/// Requests are named after what the user asked for, outcomes after what
/// happened to the fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    LoadMoreRequested,
    RefreshRequested,
    RetryRequested,
    FetchSucceeded { next_page: i32 },
    FetchFailed { message: String },
}

/// A fetch the caller must start after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub page: i32,
}

/// What page to fetch next, whether a fetch is running and whether the last
/// one failed. Exactly one variant is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaginationState {
    /// Nothing fetched yet; the first page is 1
    #[default]
    InitialLoading,
    LoadingMore {
        next_page: i32,
    },
    /// Re-fetching from page 1
    Refreshing,
    Idle {
        can_load_more: bool,
        next_page: i32,
    },
    Error {
        next_page: i32,
        message: String,
    },
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The page cursor carried by the current state
    pub fn next_page(&self) -> i32 {
        match self {
            PaginationState::InitialLoading | PaginationState::Refreshing => 1,
            PaginationState::LoadingMore { next_page }
            | PaginationState::Idle { next_page, .. }
            | PaginationState::Error { next_page, .. } => *next_page,
        }
    }

    /// Check if a fetch is in flight
    pub fn is_fetching(&self) -> bool {
        matches!(
            self,
            PaginationState::LoadingMore { .. } | PaginationState::Refreshing
        )
    }

    /// Page of the fetch in flight, if any
    pub fn requested_page(&self) -> Option<i32> {
        self.is_fetching().then(|| self.next_page())
    }

    /// Update the pagination state based on a message
    ///
    /// Returns the fetch to start, if the message started one. While a fetch
    /// is in flight every request is ignored, so at most one fetch runs at a
    /// time. Outcomes that arrive while no fetch is in flight are stale and
    /// ignored.
    pub fn update(&mut self, message: Message) -> Option<FetchRequest> {
        match message {
            Message::LoadMoreRequested | Message::RetryRequested => match self {
                PaginationState::LoadingMore { .. } | PaginationState::Refreshing => None,
                PaginationState::Idle {
                    can_load_more: false,
                    ..
                } => None,
                PaginationState::InitialLoading
                | PaginationState::Idle { .. }
                | PaginationState::Error { .. } => {
                    let next_page = self.next_page();
                    *self = PaginationState::LoadingMore { next_page };
                    Some(FetchRequest { page: next_page })
                }
            },
            Message::RefreshRequested => {
                if self.is_fetching() {
                    return None;
                }
                *self = PaginationState::Refreshing;
                Some(FetchRequest { page: 1 })
            }
            Message::FetchSucceeded { next_page } => {
                if self.is_fetching() {
                    *self = PaginationState::Idle {
                        can_load_more: next_page > 0,
                        next_page,
                    };
                }
                None
            }
            Message::FetchFailed { message } => {
                if let Some(requested) = self.requested_page() {
                    *self = PaginationState::Error {
                        next_page: requested,
                        message,
                    };
                }
                None
            }
        }
    }
}
