//! Route definitions for the `/acquiredskill` resource.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::acquired_skills;
use crate::state::AppState;

/// Routes mounted at `/acquiredskill`.
///
/// ```text
/// GET /acquired-skills  -> list_acquired_skills
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/acquired-skills",
        get(acquired_skills::list_acquired_skills),
    )
}
