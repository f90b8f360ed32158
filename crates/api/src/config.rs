use crate::auth::jwt::JwtConfig;

/// Azure Cognitive Search connection settings.
///
/// Present only when `SEARCH_SERVICE_ENDPOINT` is set. Without it the
/// server runs with on-demand indexing disabled and project mutations
/// simply skip the reindex step.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Service endpoint, e.g. `https://myservice.search.windows.net`.
    pub endpoint: String,
    /// Admin API key used for the `api-key` request header.
    pub admin_key: String,
    /// Name of the indexer to run after project mutations.
    pub indexer_name: String,
}

/// Bot relay settings for conversational notifications.
///
/// Present only when `BOT_RELAY_BASE_URL` is set. Without it join and
/// close notifications are dropped silently.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Base URL of the relay that forwards notices into team chats.
    pub base_url: String,
    /// Bearer token for the relay.
    pub api_key: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
    /// Optional search indexer connection.
    pub search: Option<SearchConfig>,
    /// Optional bot notification relay connection.
    pub notifier: Option<NotifierConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                     |
    /// |---------------------------|-----------------------------|
    /// | `HOST`                    | `0.0.0.0`                   |
    /// | `PORT`                    | `3000`                      |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`     |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                        |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `30`                        |
    /// | `SEARCH_SERVICE_ENDPOINT` | unset (indexing disabled)   |
    /// | `SEARCH_ADMIN_KEY`        | required with endpoint      |
    /// | `SEARCH_INDEXER_NAME`     | `grow-projects-indexer`     |
    /// | `BOT_RELAY_BASE_URL`      | unset (notices disabled)    |
    /// | `BOT_RELAY_API_KEY`       | required with base URL      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            search: search_from_env(),
            notifier: notifier_from_env(),
        }
    }
}

fn search_from_env() -> Option<SearchConfig> {
    let endpoint = std::env::var("SEARCH_SERVICE_ENDPOINT")
        .ok()
        .filter(|s| !s.trim().is_empty())?;

    let admin_key = std::env::var("SEARCH_ADMIN_KEY")
        .expect("SEARCH_ADMIN_KEY must be set when SEARCH_SERVICE_ENDPOINT is set");

    let indexer_name = std::env::var("SEARCH_INDEXER_NAME")
        .unwrap_or_else(|_| "grow-projects-indexer".into());

    Some(SearchConfig {
        endpoint,
        admin_key,
        indexer_name,
    })
}

fn notifier_from_env() -> Option<NotifierConfig> {
    let base_url = std::env::var("BOT_RELAY_BASE_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())?;

    let api_key = std::env::var("BOT_RELAY_API_KEY")
        .expect("BOT_RELAY_API_KEY must be set when BOT_RELAY_BASE_URL is set");

    Some(NotifierConfig { base_url, api_key })
}
