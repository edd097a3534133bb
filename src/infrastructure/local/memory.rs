use async_trait::async_trait;
use tokio::sync::watch;

use super::{upsert_in_place, UserLocalDataSource};
use crate::domain::{User, UserError};

/// Process-local cache; the watch sender doubles as the storage so every
/// write and its notification happen under one lock.
#[derive(Debug, Clone)]
pub struct InMemoryUserStore {
    users: watch::Sender<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let (tx, _) = watch::channel(users);
        Self { users: tx }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::with_users(Vec::new())
    }
}

#[async_trait]
impl UserLocalDataSource for InMemoryUserStore {
    fn observe_users(&self) -> watch::Receiver<Vec<User>> {
        self.users.subscribe()
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, UserError> {
        Ok(self.users.borrow().iter().find(|u| u.email == id).cloned())
    }

    async fn insert_or_replace(&self, users: Vec<User>) -> Result<(), UserError> {
        self.users
            .send_if_modified(|cached| upsert_in_place(cached, users));
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), UserError> {
        self.users.send_if_modified(|cached| {
            let changed = !cached.is_empty();
            cached.clear();
            changed
        });
        Ok(())
    }

    async fn replace_all(&self, users: Vec<User>) -> Result<(), UserError> {
        self.users.send_if_modified(|cached| {
            let mut replaced = Vec::with_capacity(users.len());
            upsert_in_place(&mut replaced, users);
            if *cached == replaced {
                false
            } else {
                *cached = replaced;
                true
            }
        });
        Ok(())
    }
}
