use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use modland_core::pagination::clamp_page;
use modland_core::{Config, ModuleSummary, ModulesList};

use crate::retry::{is_retryable_status, with_retry, RetryConfig};

const DEFAULT_API_BASE: &str = "https://api.deno.land";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How a listing request can fail
///
/// Every variant means "could not determine results". The presentation
/// layer renders these as a distinct unavailable state, never as an
/// empty listing - zero matches is a successful `ModulesList`, not an
/// error.
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Registry returned status {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("Malformed registry payload: {0}")]
    MalformedPayload(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl ListingError {
    /// Whether another attempt could plausibly succeed
    ///
    /// Only transport trouble qualifies: connection failures and the
    /// retryable status codes. A 404, a garbled body, or a payload the
    /// registry itself flagged as unsuccessful will fail identically
    /// every time.
    pub fn is_transient(&self) -> bool {
        match self {
            ListingError::NetworkError(_) => true,
            ListingError::BadStatus(status) => is_retryable_status(*status),
            ListingError::MalformedPayload(_) | ListingError::ParseError(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ListingError>;

/// Wire shape of the registry's listing endpoint
#[derive(Debug, Deserialize)]
struct RawListing {
    success: bool,
    data: RawData,
}

#[derive(Debug, Deserialize)]
struct RawData {
    total_count: u64,
    results: Vec<RawModule>,
}

#[derive(Debug, Deserialize)]
struct RawModule {
    name: String,
    description: Option<String>,
    star_count: Option<u64>,
}

/// Client for the registry's module listing endpoint
///
/// Stateless apart from the connection pool inside reqwest: no caching,
/// no cross-call bookkeeping. Each call reflects the registry at that
/// instant. Dropping the returned future aborts the outbound request,
/// so an abandoned page view doesn't leave a call dangling.
pub struct ListingClient {
    client: reqwest::Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl ListingClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE.to_string())
    }

    /// For self-hosted registries and tests pointing at a mock server
    pub fn with_base_url(base_url: String) -> Self {
        Self::build(base_url, DEFAULT_TIMEOUT_SECS, RetryConfig::default())
    }

    /// Build a client from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::build(
            config.registry.api_url.clone(),
            config.registry.timeout_secs,
            RetryConfig::with_max_retries(config.registry.max_retries),
        )
    }

    fn build(base_url: String, timeout_secs: u64, retry_config: RetryConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("modland/0.1.0")
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_config,
        }
    }

    /// Fetch one page of the module listing
    ///
    /// `page` below 1 is clamped to 1. `query` may be empty, which means
    /// "match everything". A page past the end of the match set is a
    /// valid request and comes back as an empty page with the true
    /// `total_count`, so callers can offer a way back.
    pub async fn list_modules(
        &self,
        page: i64,
        per_page: u32,
        query: &str,
    ) -> Result<ModulesList> {
        let page = clamp_page(page);
        let url = format!("{}/modules", self.base_url);

        with_retry(&self.retry_config, ListingError::is_transient, || async {
            debug!("Listing modules: page={}, per_page={}, query={:?}", page, per_page, query);

            let response = self
                .client
                .get(&url)
                .query(&[
                    ("page", page.to_string()),
                    ("limit", per_page.to_string()),
                    ("query", query.to_string()),
                ])
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                warn!("Registry listing failed with status {}", status);
                return Err(ListingError::BadStatus(status));
            }

            let body = response.text().await?;
            parse_listing(&body, per_page)
        })
        .await
    }
}

impl Default for ListingClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate and normalize a raw listing payload
///
/// A record missing its name invalidates the whole payload rather than
/// being silently skipped - a half-rendered listing is worse than an
/// honest "unavailable".
fn parse_listing(body: &str, per_page: u32) -> Result<ModulesList> {
    let raw: RawListing = serde_json::from_str(body)?;

    if !raw.success {
        return Err(ListingError::MalformedPayload(
            "registry reported success = false".into(),
        ));
    }

    if raw.data.results.len() > per_page as usize {
        return Err(ListingError::MalformedPayload(format!(
            "registry returned {} results for a page of {}",
            raw.data.results.len(),
            per_page
        )));
    }

    let results = raw
        .data
        .results
        .into_iter()
        .map(|m| {
            if m.name.is_empty() {
                return Err(ListingError::MalformedPayload(
                    "record with empty name".into(),
                ));
            }
            Ok(ModuleSummary {
                name: m.name,
                description: m.description,
                star_count: m.star_count,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ModulesList {
        total_count: raw.data.total_count,
        results,
    })
}
