use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grow_api::config::ServerConfig;
use grow_api::router::build_app_router;
use grow_api::state::AppState;
use grow_db::repositories::{AcquiredSkillRepo, ProjectRepo, TeamSkillRepo};
use grow_db::store::{AcquiredSkillStore, ProjectStore, TeamSkillStore};
use grow_events::notifier::{BotNotifier, NoopNotifier, ProjectNotifier};
use grow_events::{EventBus, EventLogger};
use grow_search::indexer::{AzureSearchIndexer, NoopIndexer, SearchIndexer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grow_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = grow_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    grow_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    grow_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Stores ---
    let projects: Arc<dyn ProjectStore> = Arc::new(ProjectRepo::new(pool.clone()));
    let acquired_skills: Arc<dyn AcquiredSkillStore> = Arc::new(AcquiredSkillRepo::new(pool.clone()));
    let team_skills: Arc<dyn TeamSkillStore> = Arc::new(TeamSkillRepo::new(pool.clone()));

    // --- Search indexer ---
    let indexer: Arc<dyn SearchIndexer> = match &config.search {
        Some(search) => {
            tracing::info!(indexer = %search.indexer_name, "Search indexer configured");
            Arc::new(AzureSearchIndexer::new(
                search.endpoint.clone(),
                search.indexer_name.clone(),
                search.admin_key.clone(),
            ))
        }
        None => {
            tracing::info!("No search service configured, on-demand reindex disabled");
            Arc::new(NoopIndexer)
        }
    };

    // --- Bot notifier ---
    let notifier: Arc<dyn ProjectNotifier> = match &config.notifier {
        Some(relay) => {
            tracing::info!(base_url = %relay.base_url, "Bot notification relay configured");
            Arc::new(BotNotifier::new(
                relay.base_url.clone(),
                relay.api_key.clone(),
            ))
        }
        None => {
            tracing::info!("No bot relay configured, join/closure notices disabled");
            Arc::new(NoopNotifier)
        }
    };

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());

    // Spawn the event logger (drains workflow events into the log).
    let logger_cancel = tokio_util::sync::CancellationToken::new();
    let logger_handle = tokio::spawn(EventLogger::run(
        event_bus.subscribe(),
        logger_cancel.clone(),
    ));
    tracing::info!("Event logger started");

    // --- App state ---
    let state = AppState::new(
        Arc::new(config.clone()),
        projects,
        acquired_skills,
        team_skills,
        indexer,
        notifier,
        Arc::clone(&event_bus),
    );

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Stop the event logger; dropping the bus sender also closes the
    // broadcast channel for any remaining subscribers.
    logger_cancel.cancel();
    drop(event_bus);
    let _ = tokio::time::timeout(
        Duration::from_secs(config.shutdown_timeout_secs),
        logger_handle,
    )
    .await;
    tracing::info!("Event logger stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
