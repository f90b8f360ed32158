//! Participant roster and its semicolon transport codec.
//!
//! The storage layer keeps the roster as two parallel semicolon-joined
//! strings: the participant user ids, and `userId:displayName` mapping
//! entries in the same order. Inside the service the roster is a real
//! ordered collection; the string form exists only at the storage boundary.
//! Decoding filters to non-empty trimmed entries, so legacy values with
//! stray separators load cleanly.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::types::EntityId;

/// Separator between entries in the transport form of roster and skill
/// fields.
pub const ENTRY_SEPARATOR: char = ';';

/// Separator between user id and display name inside a mapping entry.
pub const MAPPING_SEPARATOR: char = ':';

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// A joined member of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub user_id: EntityId,
    pub display_name: String,
}

impl Participant {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// Ordered set of project participants. Insertion order is preserved for
/// display; a user id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the two stored columns into a roster.
    ///
    /// The id column drives membership and order. Display names are
    /// resolved from the mapping column; an id with no mapping entry gets
    /// an empty display name rather than failing the load.
    pub fn decode(user_ids: &str, user_mapping: &str) -> Self {
        let names: HashMap<&str, &str> = user_mapping
            .split(ENTRY_SEPARATOR)
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once(MAPPING_SEPARATOR) {
                Some((id, name)) => (id.trim(), name.trim()),
                None => (entry, ""),
            })
            .collect();

        let mut roster = Self::new();
        for id in user_ids
            .split(ENTRY_SEPARATOR)
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            if roster.contains(id) {
                continue;
            }
            let display_name = names.get(id).copied().unwrap_or_default();
            roster.participants.push(Participant::new(id, display_name));
        }
        roster
    }

    /// Encode the id column: user ids joined by `;`.
    pub fn encode_user_ids(&self) -> String {
        self.participants
            .iter()
            .map(|p| p.user_id.as_str())
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Encode the mapping column: `userId:displayName` pairs joined by `;`.
    pub fn encode_user_mapping(&self) -> String {
        self.participants
            .iter()
            .map(|p| format!("{}{}{}", p.user_id, MAPPING_SEPARATOR, p.display_name))
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p.user_id == user_id)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn user_ids(&self) -> impl Iterator<Item = &str> {
        self.participants.iter().map(|p| p.user_id.as_str())
    }

    /// Display name for a member, if present.
    pub fn display_name_of(&self, user_id: &str) -> Option<&str> {
        self.participants
            .iter()
            .find(|p| p.user_id == user_id)
            .map(|p| p.display_name.as_str())
    }

    /// Add a participant, enforcing the capacity and uniqueness invariants.
    ///
    /// An empty roster always accepts its first member; capacity applies
    /// only once the roster is non-empty. On a non-empty roster the
    /// capacity check runs first, so a full roster reports
    /// `CapacityExceeded` even for a user who is already a member.
    pub fn try_add(&mut self, participant: Participant, team_size: usize) -> Result<(), CoreError> {
        if self.participants.is_empty() {
            self.participants.push(participant);
            return Ok(());
        }
        if self.len() >= team_size {
            return Err(CoreError::CapacityExceeded(format!(
                "Project has reached its maximum team size of {team_size}"
            )));
        }
        if self.contains(&participant.user_id) {
            return Err(CoreError::AlreadyJoined(format!(
                "User {} has already joined the project",
                participant.user_id
            )));
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Remove a member by id. Removing an absent user is a no-op, so the
    /// operation is idempotent. Returns whether anything was removed.
    pub fn remove(&mut self, user_id: &str) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.user_id != user_id);
        self.participants.len() != before
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
