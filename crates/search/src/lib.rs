//! Search reindex client for the Grow service.
//!
//! Project mutations signal the search subsystem to refresh its index so
//! the discover tab catches up. The signal is best-effort by contract:
//! callers log failures and never let them change a workflow outcome.

pub mod indexer;
