//! Remote data source
//!
//! Wraps the paginated randomuser.me endpoint. Transport failures never leave
//! this module as raw `reqwest` errors; they are classified into
//! [`UserError::Connectivity`] or [`UserError::Server`] here.

mod dto;
pub mod http;

use async_trait::async_trait;

use crate::domain::{PagedUsers, UserError};

pub use http::RandomUserApi;

/// Fetches exactly one page of users from the remote API
#[async_trait]
pub trait UserRemoteDataSource: Send + Sync {
    async fn get_user_page(&self, page: i32, results_per_page: u32)
        -> Result<PagedUsers, UserError>;
}
