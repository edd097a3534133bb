//! Local data source
//!
//! A single-table user cache keyed by email. Reads are a continuously
//! observable snapshot (a `watch` channel); writes are whole operations that
//! never expose a partially written list to observers.

pub mod memory;
pub mod sqlite;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::{User, UserError};

pub use memory::InMemoryUserStore;
pub use sqlite::SqliteUserStore;

#[async_trait]
pub trait UserLocalDataSource: Send + Sync {
    /// Subscribe to the cached list; the receiver always holds the latest snapshot
    fn observe_users(&self) -> watch::Receiver<Vec<User>>;

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, UserError>;

    /// Upsert by email, keeping the position of records that already exist
    async fn insert_or_replace(&self, users: Vec<User>) -> Result<(), UserError>;

    async fn delete_all(&self) -> Result<(), UserError>;

    /// Clear the cache and insert `users` as one write
    async fn replace_all(&self, users: Vec<User>) -> Result<(), UserError>;
}

/// Upsert `incoming` into `cached` in place. Returns true if anything changed.
pub(crate) fn upsert_in_place(cached: &mut Vec<User>, incoming: Vec<User>) -> bool {
    let mut positions: HashMap<String, usize> = cached
        .iter()
        .enumerate()
        .map(|(i, user)| (user.email.clone(), i))
        .collect();

    let mut changed = false;
    for user in incoming {
        match positions.get(&user.email) {
            Some(&i) if cached[i] == user => {}
            Some(&i) => {
                cached[i] = user;
                changed = true;
            }
            None => {
                positions.insert(user.email.clone(), cached.len());
                cached.push(user);
                changed = true;
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{user_fixture, users_fixture};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_upsert_appends_new_users() {
        let mut cached = vec![user_fixture(1)];
        let changed = upsert_in_place(&mut cached, vec![user_fixture(2), user_fixture(3)]);

        assert!(changed);
        assert_eq!(cached, vec![user_fixture(1), user_fixture(2), user_fixture(3)]);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut cached = vec![user_fixture(1), user_fixture(2)];
        let mut renamed = user_fixture(1);
        renamed.first_name = "Renamed".to_string();

        let changed = upsert_in_place(&mut cached, vec![renamed.clone()]);

        assert!(changed);
        assert_eq!(cached, vec![renamed, user_fixture(2)]);
    }

    #[test]
    fn test_upsert_identical_is_not_a_change() {
        let mut cached = vec![user_fixture(1)];
        assert!(!upsert_in_place(&mut cached, vec![user_fixture(1)]));
        assert_eq!(cached.len(), 1);
    }

    #[test]
    fn test_upsert_duplicates_within_one_write_keep_last() {
        let mut cached = vec![user_fixture(1)];
        let mut renamed = user_fixture(2);
        renamed.first_name = "Renamed".to_string();

        let changed = upsert_in_place(
            &mut cached,
            vec![user_fixture(2), user_fixture(3), renamed.clone()],
        );

        assert!(changed);
        assert_eq!(cached, vec![user_fixture(1), renamed, user_fixture(3)]);
    }

    #[test]
    fn test_upsert_large_overlapping_write_keeps_order() {
        let mut cached = users_fixture(0..2000);
        let changed = upsert_in_place(&mut cached, users_fixture(1000..3000));

        assert!(changed);
        assert_eq!(cached, users_fixture(0..3000));
    }
}
