//! Postgres repositories.
//!
//! Each repository holds a pool clone and implements the matching store
//! trait with runtime-checked queries built over a shared column list.

pub mod acquired_skill_repo;
pub mod project_repo;
pub mod team_skill_repo;

pub use acquired_skill_repo::AcquiredSkillRepo;
pub use project_repo::ProjectRepo;
pub use team_skill_repo::TeamSkillRepo;
