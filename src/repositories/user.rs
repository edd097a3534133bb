use std::sync::Arc;

use futures::{stream, Stream};

use crate::{
    domain::{PagedUsers, User, UserError},
    infrastructure::{local::UserLocalDataSource, remote::UserRemoteDataSource},
};

#[derive(Clone)]
pub struct UserRepository {
    remote: Arc<dyn UserRemoteDataSource>,
    local: Arc<dyn UserLocalDataSource>,
}

impl UserRepository {
    pub fn new(
        remote: Arc<dyn UserRemoteDataSource>,
        local: Arc<dyn UserLocalDataSource>,
    ) -> Self {
        Self { remote, local }
    }

    /// Fetch one page and merge it into the cache.
    ///
    /// Page 1 replaces the cache; later pages upsert by email. On a remote
    /// failure the cache is left untouched and the classified error is
    /// returned. No retry happens here.
    pub async fn fetch_page(&self, page: i32, page_size: u32) -> Result<PagedUsers, UserError> {
        let paged = self.remote.get_user_page(page, page_size).await?;

        if page == 1 {
            self.local.replace_all(paged.users.clone()).await?;
        } else {
            self.local.insert_or_replace(paged.users.clone()).await?;
        }

        Ok(paged)
    }

    /// Stream of the cached users: the current snapshot first, then every
    /// change. Consecutive identical snapshots are skipped.
    pub fn observe_users(&self) -> impl Stream<Item = Vec<User>> + Send + 'static {
        let rx = self.local.observe_users();
        stream::unfold(
            (rx, None::<Vec<User>>, true),
            |(mut rx, last, mut first)| async move {
                loop {
                    if !first && rx.changed().await.is_err() {
                        return None;
                    }
                    first = false;
                    let current = rx.borrow_and_update().clone();
                    if last.as_ref() == Some(&current) {
                        continue;
                    }
                    return Some((current.clone(), (rx, Some(current), false)));
                }
            },
        )
    }

    /// Point lookup against the cache only
    pub async fn get_user_by_id(&self, id: &str) -> Result<User, UserError> {
        self.local
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::StreamExt;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        infrastructure::local::InMemoryUserStore,
        test_helpers::{user_fixture, users_fixture, ScriptedRemote},
    };

    const PAGE_SIZE: u32 = 5;

    fn build_repository(
        cached: Vec<User>,
        remote: ScriptedRemote,
    ) -> (UserRepository, Arc<ScriptedRemote>) {
        let remote = Arc::new(remote);
        let local = Arc::new(InMemoryUserStore::with_users(cached));
        let repository = UserRepository::new(
            Arc::clone(&remote) as Arc<dyn UserRemoteDataSource>,
            local,
        );
        (repository, remote)
    }

    /// Current cache content: the first item of a fresh subscription
    async fn cached_users(repository: &UserRepository) -> Vec<User> {
        Box::pin(repository.observe_users())
            .next()
            .await
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_page_one_replaces_cache() {
        let (repository, _) = build_repository(
            users_fixture(0..5),
            ScriptedRemote::new().with_page(1, Ok(PagedUsers::new(users_fixture(5..10), 2))),
        );
        let mut observed = Box::pin(repository.observe_users());
        assert_eq!(observed.next().await, Some(users_fixture(0..5)));

        let result = repository.fetch_page(1, PAGE_SIZE).await;

        assert_eq!(result, Ok(PagedUsers::new(users_fixture(5..10), 2)));
        assert_eq!(observed.next().await, Some(users_fixture(5..10)));
    }

    #[tokio::test]
    async fn test_later_page_appends_to_cache() {
        let (repository, _) = build_repository(
            users_fixture(0..5),
            ScriptedRemote::new().with_page(2, Ok(PagedUsers::new(users_fixture(5..10), 3))),
        );
        let mut observed = Box::pin(repository.observe_users());
        assert_eq!(observed.next().await, Some(users_fixture(0..5)));

        repository
            .fetch_page(2, PAGE_SIZE)
            .await
            .expect("fetch should succeed");

        let merged = observed.next().await.expect("stream should emit");
        assert_eq!(merged.len(), 10);
        assert_eq!(merged, users_fixture(0..10));
    }

    #[tokio::test]
    async fn test_later_page_overwrites_duplicate_identity() {
        let mut renamed = user_fixture(4);
        renamed.last_name = "Updated".to_string();
        let (repository, _) = build_repository(
            users_fixture(0..5),
            ScriptedRemote::new().with_page(
                2,
                Ok(PagedUsers::new(vec![renamed.clone(), user_fixture(5)], 3)),
            ),
        );

        repository
            .fetch_page(2, PAGE_SIZE)
            .await
            .expect("fetch should succeed");

        let cached = cached_users(&repository).await;
        assert_eq!(cached.len(), 6);
        assert_eq!(cached[4], renamed);
        assert_eq!(cached[5], user_fixture(5));
    }

    #[tokio::test]
    async fn test_connectivity_error_leaves_cache_untouched() {
        let (repository, _) = build_repository(
            users_fixture(0..5),
            ScriptedRemote::new()
                .with_page(1, Err(UserError::Connectivity("connection refused".into()))),
        );

        let result = repository.fetch_page(1, PAGE_SIZE).await;

        assert!(matches!(result, Err(UserError::Connectivity(_))));
        assert_eq!(cached_users(&repository).await, users_fixture(0..5));
    }

    #[tokio::test]
    async fn test_server_error_is_returned() {
        let (repository, remote) = build_repository(
            vec![],
            ScriptedRemote::new().with_page(2, Err(UserError::Server("status 500".into()))),
        );

        let result = repository.fetch_page(2, PAGE_SIZE).await;

        assert!(matches!(result, Err(UserError::Server(_))));
        assert_eq!(remote.calls(), vec![2]);
    }

    #[tokio::test]
    async fn test_observe_skips_identical_snapshots() {
        let (repository, _) = build_repository(
            users_fixture(0..2),
            ScriptedRemote::new()
                .with_page(2, Ok(PagedUsers::new(users_fixture(0..2), 3)))
                .with_page(3, Ok(PagedUsers::new(users_fixture(2..3), -1))),
        );
        let mut observed = Box::pin(repository.observe_users());
        assert_eq!(observed.next().await, Some(users_fixture(0..2)));

        // Same users again: no emission
        repository
            .fetch_page(2, PAGE_SIZE)
            .await
            .expect("fetch should succeed");
        let nothing = tokio::time::timeout(Duration::from_millis(50), observed.next()).await;
        assert!(nothing.is_err(), "identical snapshot should not be emitted");

        repository
            .fetch_page(3, PAGE_SIZE)
            .await
            .expect("fetch should succeed");
        assert_eq!(observed.next().await, Some(users_fixture(0..3)));
    }

    #[tokio::test]
    async fn test_get_user_by_id() {
        let (repository, remote) = build_repository(users_fixture(0..3), ScriptedRemote::new());

        assert_eq!(
            repository.get_user_by_id(&user_fixture(2).email).await,
            Ok(user_fixture(2))
        );
        assert_eq!(
            repository.get_user_by_id("nobody@example.com").await,
            Err(UserError::NotFound("nobody@example.com".to_string()))
        );
        assert!(remote.calls().is_empty(), "lookups never hit the network");
    }
}
