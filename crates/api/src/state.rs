use std::sync::Arc;

use grow_db::store::{AcquiredSkillStore, ProjectStore, TeamSkillStore};
use grow_events::notifier::ProjectNotifier;
use grow_events::EventBus;
use grow_search::indexer::SearchIndexer;

use crate::config::ServerConfig;
use crate::engine::workflow::ProjectWorkflow;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
///
/// Stores, the search indexer, and the notifier are trait objects so
/// integration tests can run the full router against in-memory doubles.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// The lifecycle engine behind the workflow endpoints.
    pub workflow: Arc<ProjectWorkflow>,
    /// Project records (used directly by the health probe).
    pub projects: Arc<dyn ProjectStore>,
    /// Per-participant skill records written at closure.
    pub acquired_skills: Arc<dyn AcquiredSkillStore>,
    /// Configured team skills.
    pub team_skills: Arc<dyn TeamSkillStore>,
    /// Centralized event bus for publishing workflow events.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Assemble state from its collaborators, wiring the workflow engine
    /// to the same stores, indexer, notifier, and bus.
    pub fn new(
        config: Arc<ServerConfig>,
        projects: Arc<dyn ProjectStore>,
        acquired_skills: Arc<dyn AcquiredSkillStore>,
        team_skills: Arc<dyn TeamSkillStore>,
        indexer: Arc<dyn SearchIndexer>,
        notifier: Arc<dyn ProjectNotifier>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let workflow = Arc::new(ProjectWorkflow::new(
            projects.clone(),
            acquired_skills.clone(),
            indexer,
            notifier,
            event_bus.clone(),
        ));
        Self {
            config,
            workflow,
            projects,
            acquired_skills,
            team_skills,
            event_bus,
        }
    }
}
