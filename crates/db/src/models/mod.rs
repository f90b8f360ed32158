//! Entity model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus any `Deserialize` DTOs the API accepts for that
//! entity. Semicolon-joined roster and skill fields keep their transport
//! form here; `grow_core` decodes them.

pub mod acquired_skill;
pub mod project;
pub mod team_skill;

pub use acquired_skill::AcquiredSkill;
pub use project::Project;
pub use team_skill::{TeamSkill, UpsertTeamSkill};
