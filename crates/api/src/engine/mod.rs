//! Project lifecycle engine.
//!
//! - [`workflow::ProjectWorkflow`] -- Join, Close, and Leave orchestration
//!   over the store, search, and notification seams.

pub mod workflow;
