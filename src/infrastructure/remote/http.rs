//! Reqwest-backed randomuser.me adapter.
//!
//! This adapter owns transport details only: request building, timeout and
//! HTTP error mapping, and JSON decoding into domain users.

use std::time::Duration;

use async_trait::async_trait;
use color_eyre::eyre::{Result, WrapErr};
use reqwest::{Client, StatusCode, Url};

use super::{dto::ApiResponseDto, UserRemoteDataSource};
use crate::{
    domain::{PagedUsers, UserError},
    infrastructure::config::ApiConfig,
};

/// Remote source that performs one HTTP GET per requested page
#[derive(Debug, Clone)]
pub struct RandomUserApi {
    client: Client,
    endpoint: Url,
    seed: String,
}

impl RandomUserApi {
    /// Build the adapter from the `api` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error when the base url is invalid or the reqwest client
    /// cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .wrap_err_with(|| format!("invalid api base url: {}", config.base_url))?;
        let endpoint = base
            .join(&format!("api/{}/", config.api_version))
            .wrap_err("failed to build api endpoint")?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            endpoint,
            seed: config.seed.clone(),
        })
    }
}

#[async_trait]
impl UserRemoteDataSource for RandomUserApi {
    async fn get_user_page(
        &self,
        page: i32,
        results_per_page: u32,
    ) -> Result<PagedUsers, UserError> {
        log::debug!("GET {} page={page} results={results_per_page}", self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("seed", self.seed.clone()),
                ("results", results_per_page.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let paged = parse_page(body.as_ref())?;
        log::info!(
            "Fetched page {page}: {} users, next page {}",
            paged.users.len(),
            paged.next_page
        );
        Ok(paged)
    }
}

fn parse_page(body: &[u8]) -> Result<PagedUsers, UserError> {
    let decoded: ApiResponseDto = serde_json::from_slice(body)
        .map_err(|error| UserError::Server(format!("invalid response payload: {error}")))?;
    let next_page = decoded.next_page();
    let users = decoded
        .into_domain_users()
        .map_err(|error| UserError::Server(format!("invalid user record: {error}")))?;
    Ok(PagedUsers::new(users, next_page))
}

fn map_transport_error(error: reqwest::Error) -> UserError {
    if error.is_status() || error.is_decode() {
        UserError::Server(error.to_string())
    } else {
        UserError::Connectivity(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UserError {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if preview.is_empty() {
        UserError::Server(format!("status {}", status.as_u16()))
    } else {
        UserError::Server(format!("status {}: {preview}", status.as_u16()))
    }
}
