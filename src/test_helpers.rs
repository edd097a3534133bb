//! Fixtures and fakes shared by unit and integration tests

use std::{
    collections::HashMap,
    ops::Range,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    domain::{PagedUsers, User, UserError, UserLocation},
    infrastructure::remote::UserRemoteDataSource,
};

/// Deterministic user number `n`
pub fn user_fixture(n: usize) -> User {
    User {
        title: if n % 2 == 0 { "Ms" } else { "Mr" }.to_string(),
        first_name: format!("First{n}"),
        last_name: format!("Last{n}"),
        email: format!("user{n}@example.com"),
        phone: format!("555-{n:04}"),
        thumbnail_url: format!("https://randomuser.me/api/portraits/thumb/women/{n}.jpg"),
        large_picture_url: format!("https://randomuser.me/api/portraits/women/{n}.jpg"),
        nationality: "ES".to_string(),
        location: UserLocation {
            street_number: format!("{}", 100 + n),
            street_name: "Calle Mayor".to_string(),
            city: "Madrid".to_string(),
            state: "Madrid".to_string(),
            country: "Spain".to_string(),
            postcode: format!("280{:02}", n % 100),
        },
    }
}

/// Users numbered by `range`, in order
pub fn users_fixture(range: Range<usize>) -> Vec<User> {
    range.map(user_fixture).collect()
}

/// Remote source answering from a page → result script.
///
/// Records every requested page and the highest number of requests that were
/// in flight at the same time.
#[derive(Default)]
pub struct ScriptedRemote {
    pages: HashMap<i32, Result<PagedUsers, UserError>>,
    delay: Option<Duration>,
    calls: Mutex<Vec<i32>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: i32, result: Result<PagedUsers, UserError>) -> Self {
        self.pages.insert(page, result);
        self
    }

    /// Hold every request for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<i32> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRemoteDataSource for ScriptedRemote {
    async fn get_user_page(
        &self,
        page: i32,
        _results_per_page: u32,
    ) -> Result<PagedUsers, UserError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(page);
        }
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.pages
            .get(&page)
            .cloned()
            .unwrap_or_else(|| Err(UserError::Server(format!("unscripted page {page}"))))
    }
}
