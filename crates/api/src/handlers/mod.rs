//! Request handlers for the workflow API.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers stay thin: they decode the request, call the engine or a
//! store, and map errors via [`AppError`].

pub mod acquired_skills;
pub mod project_workflow;
pub mod team_skills;
