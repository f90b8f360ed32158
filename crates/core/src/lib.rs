//! Domain logic for the Grow collaborative-projects service.
//!
//! Pure types and rules: the project status state machine, the participant
//! roster with its semicolon transport codec, skill-tag validation, and the
//! close-reconciliation helpers. No I/O lives here; storage and HTTP
//! concerns belong to the `grow-db` and `grow-api` crates.

pub mod closure;
pub mod error;
pub mod roster;
pub mod skills;
pub mod status;
pub mod types;
