use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, warn};

use super::types::{CatalogEntry, FetchRequest, Fetched, Post};

/// Errors that can occur while retrieving board data.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The API answered with a non-success status (404 for a pruned thread, etc).
    Api { status: u16, message: String },
    /// The response body could not be decoded.
    Parse(String),
    /// The fetch did not finish within the configured timeout.
    Timeout(Duration),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
            ProviderError::Timeout(after) => {
                write!(f, "timed out after {:.1}s", after.as_secs_f64())
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Source of boards, catalogs and threads.
///
/// Implementations return data in provider order; callers never re-sort.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Lists the board identifiers the source knows about.
    async fn list_boards(&self) -> Result<Vec<String>, ProviderError>;

    /// Fetches the thread catalog of a board.
    async fn fetch_catalog(&self, board_id: &str) -> Result<Vec<CatalogEntry>, ProviderError>;

    /// Fetches every post of a thread, oldest first.
    async fn fetch_thread(
        &self,
        board_id: &str,
        thread_id: &str,
    ) -> Result<Vec<Post>, ProviderError>;
}

/// Runs a typed fetch request against a provider, bounded by `timeout`.
///
/// Returns the result together with the wall-clock time the fetch took.
pub async fn fetch_with_timeout(
    provider: &dyn DataProvider,
    request: &FetchRequest,
    timeout: Duration,
) -> (Result<Fetched, ProviderError>, Duration) {
    let started = Instant::now();
    let fetch = async {
        match request {
            FetchRequest::Catalog { board_id } => {
                provider.fetch_catalog(board_id).await.map(Fetched::Catalog)
            }
            FetchRequest::Thread {
                board_id,
                thread_id,
            } => provider
                .fetch_thread(board_id, thread_id)
                .await
                .map(Fetched::Thread),
        }
    };

    let result = match tokio::time::timeout(timeout, fetch).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                "{} fetch {:?} timed out after {:?}",
                provider.name(),
                request,
                timeout
            );
            Err(ProviderError::Timeout(timeout))
        }
    };
    let elapsed = started.elapsed();
    debug!("{} fetch {:?} finished in {:?}", provider.name(), request, elapsed);
    (result, elapsed)
}
