//! Route definitions for the `/project-workflow` resource.
//!
//! All endpoints require authentication.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::project_workflow;
use crate::state::AppState;

/// Routes mounted at `/project-workflow`.
///
/// ```text
/// POST   /join-project    -> join_project
/// POST   /close-project   -> close_project
/// DELETE /leave-project   -> leave_project (?projectId=&createdByUserId=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/join-project", post(project_workflow::join_project))
        .route("/close-project", post(project_workflow::close_project))
        .route("/leave-project", delete(project_workflow::leave_project))
}
