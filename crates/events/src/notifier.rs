//! Best-effort Teams notifications.
//!
//! The workflow engine notifies the project owner when someone joins and
//! all participants when a project closes. Messages go through the bot
//! relay endpoint, which turns them into Teams conversation activities.
//! Delivery is best-effort by contract: the engine logs failures and never
//! lets them change a workflow outcome.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

/// Retry delays in seconds between delivery attempts (initial try plus two
/// retries, matching the bot's configured retry policy).
const RETRY_DELAYS_SECS: [u64; 2] = [1, 2];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for notification delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The relay returned a non-2xx status code.
    #[error("Notification relay returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

/// A roster member referenced in a notice.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeParticipant {
    pub user_id: String,
    pub display_name: String,
}

/// Payload for the "someone joined your project" message to the owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinNotice {
    pub project_id: String,
    pub project_title: String,
    pub owner_user_id: String,
    pub joined_user_id: String,
    pub joined_user_name: String,
}

/// Payload for the closure message sent to every participant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosureNotice {
    pub project_id: String,
    pub project_title: String,
    pub owner_name: String,
    pub participants: Vec<NoticeParticipant>,
}

// ---------------------------------------------------------------------------
// ProjectNotifier
// ---------------------------------------------------------------------------

/// Sends workflow notifications.
#[async_trait]
pub trait ProjectNotifier: Send + Sync {
    /// Tell the project owner a user joined.
    async fn project_joined(&self, notice: &JoinNotice) -> Result<(), NotifyError>;

    /// Tell every participant the project closed.
    async fn project_closed(&self, notice: &ClosureNotice) -> Result<(), NotifyError>;
}

// ---------------------------------------------------------------------------
// Bot relay
// ---------------------------------------------------------------------------

/// Notifier that POSTs notices to the bot relay endpoint with retry.
pub struct BotNotifier {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BotNotifier {
    /// Create a notifier for the given relay base URL. `api_key` is sent
    /// as a bearer token on every request.
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Deliver a payload to a relay path, retrying on failure.
    ///
    /// Returns `Ok(())` on the first successful attempt.
    async fn deliver<T: Serialize + Sync>(&self, path: &str, payload: &T) -> Result<(), NotifyError> {
        let url = format!("{}{path}", self.base_url);

        for (attempt, delay_secs) in RETRY_DELAYS_SECS.iter().enumerate() {
            match self.try_send(&url, payload).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        url = %url,
                        error = %e,
                        "Notification delivery attempt failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_secs(*delay_secs)).await;
                }
            }
        }

        // Final attempt after the last backoff.
        match self.try_send(&url, payload).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Notification delivery failed after all retries");
                Err(e)
            }
        }
    }

    /// Execute a single POST request and check the response status.
    async fn try_send<T: Serialize + Sync>(&self, url: &str, payload: &T) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(NotifyError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectNotifier for BotNotifier {
    async fn project_joined(&self, notice: &JoinNotice) -> Result<(), NotifyError> {
        self.deliver("/notifications/project-joined", notice).await
    }

    async fn project_closed(&self, notice: &ClosureNotice) -> Result<(), NotifyError> {
        self.deliver("/notifications/project-closed", notice).await
    }
}

// ---------------------------------------------------------------------------
// No-op
// ---------------------------------------------------------------------------

/// Notifier used when no bot relay is configured; always succeeds.
pub struct NoopNotifier;

#[async_trait]
impl ProjectNotifier for NoopNotifier {
    async fn project_joined(&self, _notice: &JoinNotice) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn project_closed(&self, _notice: &ClosureNotice) -> Result<(), NotifyError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
