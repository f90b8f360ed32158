//! Route definitions for the `/teamskills` resource.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::team_skills;
use crate::state::AppState;

/// Routes mounted at `/teamskills`.
///
/// ```text
/// GET  /                   -> get_team_skills (?teamId=)
/// POST /                   -> upsert_team_skills
/// GET  /configured-skills  -> configured_skills (?teamId=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(team_skills::get_team_skills).post(team_skills::upsert_team_skills),
        )
        .route("/configured-skills", get(team_skills::configured_skills))
}
