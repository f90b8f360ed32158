//! On-demand indexer trigger.
//!
//! [`AzureSearchIndexer`] asks an Azure Cognitive Search service to run a
//! named indexer immediately instead of waiting for its schedule.
//! [`NoopIndexer`] stands in when no search service is configured.

use async_trait::async_trait;

/// REST API version for the indexer run endpoint.
const API_VERSION: &str = "2020-06-30";

/// Errors from the search service.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The HTTP request itself failed (connect, timeout, TLS).
    #[error("Search request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Search service returned {status}: {body}")]
    Service { status: u16, body: String },
}

/// Triggers a reindex of project data after a mutation.
#[async_trait]
pub trait SearchIndexer: Send + Sync {
    async fn run_indexer_on_demand(&self) -> Result<(), SearchError>;
}

// ---------------------------------------------------------------------------
// Azure Cognitive Search
// ---------------------------------------------------------------------------

/// Client for one Azure Cognitive Search service and indexer.
pub struct AzureSearchIndexer {
    client: reqwest::Client,
    endpoint: String,
    indexer_name: String,
    api_key: String,
}

impl AzureSearchIndexer {
    /// Create a client for the given service endpoint
    /// (e.g. `https://myservice.search.windows.net`) and indexer name.
    pub fn new(endpoint: String, indexer_name: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            indexer_name,
            api_key,
        }
    }

    fn run_url(&self) -> String {
        format!(
            "{}/indexers/{}/run?api-version={API_VERSION}",
            self.endpoint, self.indexer_name
        )
    }
}

#[async_trait]
impl SearchIndexer for AzureSearchIndexer {
    async fn run_indexer_on_demand(&self) -> Result<(), SearchError> {
        let response = self
            .client
            .post(self.run_url())
            .header("api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Service {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(indexer = %self.indexer_name, "Search reindex triggered");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// No-op
// ---------------------------------------------------------------------------

/// Indexer used when no search service is configured; always succeeds.
pub struct NoopIndexer;

#[async_trait]
impl SearchIndexer for NoopIndexer {
    async fn run_indexer_on_demand(&self) -> Result<(), SearchError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
