//! Skill-tag codec, limits, and validators.
//!
//! Skill lists travel and persist as semicolon-joined tag strings, the same
//! transport form the roster uses. Parsing keeps non-empty trimmed entries
//! only and drops duplicates while preserving first-seen order.

use crate::error::CoreError;
use crate::roster::ENTRY_SEPARATOR;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum number of acquired skills a participant may report at closure.
pub const MAX_ACQUIRED_SKILLS: usize = 3;

/// Maximum number of configured skills per team.
pub const MAX_TEAM_SKILLS: usize = 5;

/// Maximum length of a single skill tag.
pub const MAX_SKILL_TAG_LEN: usize = 20;

/// Maximum length of the closure feedback text.
pub const MAX_FEEDBACK_LEN: usize = 500;

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Parse a semicolon-joined skill string into an ordered, de-duplicated
/// tag list. Entries are trimmed; empty entries are dropped.
pub fn parse_tags(joined: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in joined
        .split(ENTRY_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
    {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Join a tag list back into the semicolon transport form.
pub fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|tag| tag.as_ref())
        .collect::<Vec<_>>()
        .join(";")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_tags(joined: &str, max_tags: usize, what: &str) -> Result<(), CoreError> {
    let tags = parse_tags(joined);
    if tags.len() > max_tags {
        return Err(CoreError::Validation(format!(
            "Too many {what}: {} given, maximum is {max_tags}",
            tags.len()
        )));
    }
    for tag in &tags {
        if tag.chars().count() > MAX_SKILL_TAG_LEN {
            return Err(CoreError::Validation(format!(
                "Skill '{tag}' is longer than {MAX_SKILL_TAG_LEN} characters"
            )));
        }
    }
    Ok(())
}

/// Validate the acquired-skills string a participant submits at closure.
pub fn validate_acquired_skills(joined: &str) -> Result<(), CoreError> {
    validate_tags(joined, MAX_ACQUIRED_SKILLS, "acquired skills")
}

/// Validate a team's configured-skills string.
pub fn validate_team_skills(joined: &str) -> Result<(), CoreError> {
    if parse_tags(joined).is_empty() {
        return Err(CoreError::Validation(
            "At least one skill must be configured".to_string(),
        ));
    }
    validate_tags(joined, MAX_TEAM_SKILLS, "team skills")
}

/// Validate closure feedback text.
pub fn validate_feedback(feedback: &str) -> Result<(), CoreError> {
    if feedback.chars().count() > MAX_FEEDBACK_LEN {
        return Err(CoreError::Validation(format!(
            "Feedback is longer than {MAX_FEEDBACK_LEN} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
