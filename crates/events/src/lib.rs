//! Event plumbing for the Grow service.
//!
//! An in-process broadcast bus carries workflow events (joins, closures,
//! leaves) to any number of subscribers; the bundled [`EventLogger`] drains
//! them into the tracing log as the service's telemetry record. The
//! [`notifier`] module holds the best-effort Teams notification client the
//! workflow engine calls after a committed mutation.

pub mod bus;
pub mod logger;
pub mod notifier;

pub use bus::{EventBus, PlatformEvent};
pub use logger::EventLogger;
