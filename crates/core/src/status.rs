//! Project status state machine.
//!
//! A project moves through Not Started → Active → Blocked → Closed. The
//! workflow operations only ever gate on the current status; forward
//! transitions other than closing are driven by the owner through the
//! project editing flow.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a project.
///
/// Stored as a smallint. The legacy value `0` ("None") is an uninitialized
/// sentinel and is rejected at decode along with any unknown value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    NotStarted,
    Active,
    Blocked,
    Closed,
}

impl ProjectStatus {
    /// Decode the stored smallint value.
    pub fn from_db(value: i16) -> Result<Self, CoreError> {
        match value {
            1 => Ok(Self::NotStarted),
            2 => Ok(Self::Active),
            3 => Ok(Self::Blocked),
            4 => Ok(Self::Closed),
            _ => Err(CoreError::Validation(format!(
                "Invalid project status {value}. Must be between 1 (Not Started) and 4 (Closed)"
            ))),
        }
    }

    /// Encode to the stored smallint value.
    pub fn as_db(self) -> i16 {
        match self {
            Self::NotStarted => 1,
            Self::Active => 2,
            Self::Blocked => 3,
            Self::Closed => 4,
        }
    }

    /// Human-readable label for the status.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::Active => "Active",
            Self::Blocked => "Blocked",
            Self::Closed => "Closed",
        }
    }

    /// Whether new participants may join a project in this status.
    pub fn is_joinable(self) -> bool {
        matches!(self, Self::NotStarted | Self::Active)
    }

    /// Whether the owner may close a project in this status.
    pub fn can_close(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether the status is terminal. A closed project's roster is
    /// immutable, so join and leave are both refused.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
