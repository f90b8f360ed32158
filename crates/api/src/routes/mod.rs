pub mod acquired_skills;
pub mod health;
pub mod project_workflow;
pub mod team_skills;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /project-workflow/join-project    join the acting user (POST)
/// /project-workflow/close-project   close + record acquired skills (POST)
/// /project-workflow/leave-project   leave (DELETE, query params)
///
/// /teamskills                       configured skills (GET, POST)
/// /teamskills/configured-skills     parsed tag list (GET)
///
/// /acquiredskill/acquired-skills    acting user's records (GET)
/// ```
///
/// The health check mounts separately at the server root.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/project-workflow", project_workflow::router())
        .nest("/teamskills", team_skills::router())
        .nest("/acquiredskill", acquired_skills::router())
}
