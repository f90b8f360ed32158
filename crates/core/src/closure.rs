//! Close-workflow reconciliation.
//!
//! When an owner closes a project, the request carries per-participant
//! skills and feedback collected in the closure dialog. Before anything is
//! persisted, the submitted entries must cover the stored roster exactly;
//! the stored roster then drives which acquired-skill records are created,
//! with display names resolved from the stored mapping rather than trusted
//! from the request.

use crate::error::CoreError;
use crate::roster::Roster;
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

/// One participant's entry in a close request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantDetail {
    pub user_id: EntityId,
    /// Semicolon-joined skill tags, at most `skills::MAX_ACQUIRED_SKILLS`.
    pub acquired_skills: String,
    pub feedback: String,
}

/// Data for one acquired-skill record to persist when a project closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRecordDraft {
    pub user_id: EntityId,
    /// Display name from the stored roster mapping.
    pub participant_name: String,
    pub acquired_skills: String,
    pub feedback: String,
    pub project_closed_date: Timestamp,
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Check that the submitted details cover every stored participant.
///
/// The rule is intersection cardinality: the number of distinct submitted
/// user ids that are actually on the roster must equal the roster length.
/// Extra submitted ids that are not on the roster are ignored; a missing
/// roster member fails the whole request.
pub fn verify_details_cover_roster(
    roster: &Roster,
    details: &[ParticipantDetail],
) -> Result<(), CoreError> {
    let mut matched: Vec<&str> = Vec::new();
    for detail in details {
        if roster.contains(&detail.user_id) && !matched.iter().any(|id| *id == detail.user_id) {
            matched.push(&detail.user_id);
        }
    }
    if matched.len() != roster.len() {
        return Err(CoreError::ParticipantMismatch(format!(
            "Submitted participant details cover {} of {} project members",
            matched.len(),
            roster.len()
        )));
    }
    Ok(())
}

/// Build one skill-record draft per stored participant.
///
/// Iterates the stored roster, not the submitted list: membership and
/// display names come from the server state, skills and feedback from the
/// matching submitted entry. Call after `verify_details_cover_roster`; a
/// roster member without a matching entry is skipped here rather than
/// invented.
pub fn build_skill_records(
    roster: &Roster,
    details: &[ParticipantDetail],
    closed_date: Timestamp,
) -> Vec<SkillRecordDraft> {
    roster
        .participants()
        .iter()
        .filter_map(|participant| {
            details
                .iter()
                .find(|detail| detail.user_id == participant.user_id)
                .map(|detail| SkillRecordDraft {
                    user_id: participant.user_id.clone(),
                    participant_name: participant.display_name.clone(),
                    acquired_skills: detail.acquired_skills.clone(),
                    feedback: detail.feedback.clone(),
                    project_closed_date: closed_date,
                })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
