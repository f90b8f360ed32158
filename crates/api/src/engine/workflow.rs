//! The Join, Close, and Leave operations on project rosters.
//!
//! Every operation follows the same read-validate-write shape: fetch the
//! row, validate the transition against the decoded status and roster,
//! write back under the version guard. When the guard reports that another
//! writer won the race, the whole cycle runs again against fresh state, up
//! to [`MAX_UPDATE_ATTEMPTS`] times, then the operation fails with a
//! conflict.
//!
//! Search reindexing, event publishing, and conversational notices run
//! after the write commits. They are best-effort by contract: failures are
//! logged and never change an operation's outcome.

use std::sync::Arc;

use chrono::Utc;
use grow_core::closure::{build_skill_records, verify_details_cover_roster, ParticipantDetail};
use grow_core::error::CoreError;
use grow_core::roster::{Participant, Roster};
use grow_core::skills::{validate_acquired_skills, validate_feedback};
use grow_core::status::ProjectStatus;
use grow_db::models::{AcquiredSkill, Project};
use grow_db::store::{AcquiredSkillStore, ProjectStore};
use grow_events::bus::{EVENT_PROJECT_CLOSED, EVENT_PROJECT_JOINED, EVENT_PROJECT_LEFT};
use grow_events::notifier::{ClosureNotice, JoinNotice, NoticeParticipant, ProjectNotifier};
use grow_events::{EventBus, PlatformEvent};
use grow_search::indexer::SearchIndexer;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;

/// Read-validate-write attempts before an operation gives up with a
/// conflict. A lost version race refetches fresh state and revalidates, so
/// each retry is a full pass, not a blind re-send.
const MAX_UPDATE_ATTEMPTS: u32 = 3;

/// Executes roster and closure transitions.
///
/// Holds trait objects for every collaborator so integration tests can run
/// the engine against in-memory doubles.
pub struct ProjectWorkflow {
    projects: Arc<dyn ProjectStore>,
    acquired_skills: Arc<dyn AcquiredSkillStore>,
    indexer: Arc<dyn SearchIndexer>,
    notifier: Arc<dyn ProjectNotifier>,
    event_bus: Arc<EventBus>,
}

impl ProjectWorkflow {
    pub fn new(
        projects: Arc<dyn ProjectStore>,
        acquired_skills: Arc<dyn AcquiredSkillStore>,
        indexer: Arc<dyn SearchIndexer>,
        notifier: Arc<dyn ProjectNotifier>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            projects,
            acquired_skills,
            indexer,
            notifier,
            event_bus,
        }
    }

    // -----------------------------------------------------------------------
    // Join
    // -----------------------------------------------------------------------

    /// Add the acting user to the roster of the project keyed by
    /// `(created_by_user_id, project_id)`.
    ///
    /// Fails without mutating state when the project is missing or removed,
    /// its status is not joinable, the roster is full, or the user is
    /// already a member. A full roster reports `CapacityExceeded` before
    /// the duplicate check, and an empty roster accepts its first member
    /// regardless of team size.
    pub async fn join_project(
        &self,
        actor: &AuthUser,
        created_by_user_id: &str,
        project_id: &str,
    ) -> AppResult<()> {
        require_id(project_id, "Project id")?;
        require_id(created_by_user_id, "Project owner id")?;

        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let project = self.fetch_present(created_by_user_id, project_id).await?;

            let status = ProjectStatus::from_db(project.status)?;
            if !status.is_joinable() {
                return Err(CoreError::InvalidState(format!(
                    "Project {project_id} cannot be joined while its status is {}",
                    status.label()
                ))
                .into());
            }

            let mut roster = Roster::decode(
                &project.project_participants_user_ids,
                &project.project_participants_user_mapping,
            );
            roster.try_add(
                Participant::new(actor.object_id.clone(), actor.display_name.clone()),
                project.team_size.max(0) as usize,
            )?;

            let mut updated = project.clone();
            updated.project_participants_user_ids = roster.encode_user_ids();
            updated.project_participants_user_mapping = roster.encode_user_mapping();
            updated.updated_date = Utc::now();

            if self.projects.update(&updated).await? {
                tracing::info!(
                    project_id = %updated.project_id,
                    user_id = %actor.object_id,
                    joined_count = roster.len(),
                    "User joined project"
                );
                self.event_bus.publish(
                    PlatformEvent::new(EVENT_PROJECT_JOINED)
                        .with_source("project", updated.project_id.clone())
                        .with_actor(actor.object_id.clone())
                        .with_payload(serde_json::json!({
                            "projectTitle": updated.title,
                            "joinedCount": roster.len(),
                            "teamSize": updated.team_size,
                        })),
                );
                self.reindex_best_effort(&updated.project_id).await;
                self.send_join_notice(&updated, actor).await;
                return Ok(());
            }

            tracing::debug!(
                project_id,
                attempt,
                "Join lost a version race, retrying against fresh state"
            );
        }

        Err(version_race_exhausted(project_id).into())
    }

    // -----------------------------------------------------------------------
    // Close
    // -----------------------------------------------------------------------

    /// Close a project owned by the acting user, recording one
    /// acquired-skill record per roster member.
    ///
    /// The submitted details must cover the stored roster exactly:
    /// the distinct submitted ids that are on the roster must equal the
    /// roster length. Extra entries for users who never joined are
    /// ignored; a missing member fails the whole request with
    /// `ParticipantMismatch` and no mutation.
    ///
    /// Membership and display names come from the stored roster, never
    /// from the request. Individual record writes are independent: one
    /// failure is logged and skipped, and the project still closes. The
    /// record upserts are keyed by `(project_id, user_id)`, so re-running
    /// them on a version-race retry cannot duplicate rows.
    pub async fn close_project(
        &self,
        actor: &AuthUser,
        project_id: &str,
        details: &[ParticipantDetail],
    ) -> AppResult<()> {
        require_id(project_id, "Project id")?;

        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let project = self.fetch_present(&actor.object_id, project_id).await?;

            let status = ProjectStatus::from_db(project.status)?;
            if !status.can_close() {
                return Err(CoreError::InvalidState(format!(
                    "Project {project_id} cannot be closed while its status is {}",
                    status.label()
                ))
                .into());
            }

            let roster = Roster::decode(
                &project.project_participants_user_ids,
                &project.project_participants_user_mapping,
            );
            let closed_date = Utc::now();

            let mut drafts = Vec::new();
            if !roster.is_empty() {
                verify_details_cover_roster(&roster, details)?;
                drafts = build_skill_records(&roster, details, closed_date);
                for draft in &drafts {
                    validate_acquired_skills(&draft.acquired_skills)?;
                    validate_feedback(&draft.feedback)?;
                }
            }

            let mut failed = 0usize;
            for draft in &drafts {
                let record = AcquiredSkill {
                    project_id: project.project_id.clone(),
                    user_id: draft.user_id.clone(),
                    created_by_name: draft.participant_name.clone(),
                    acquired_skills: draft.acquired_skills.clone(),
                    feedback: draft.feedback.clone(),
                    project_owner_name: project.created_by_name.clone(),
                    project_title: project.title.clone(),
                    project_closed_date: draft.project_closed_date,
                    created_date: closed_date,
                };
                if let Err(e) = self.acquired_skills.upsert(&record).await {
                    tracing::error!(
                        project_id = %project.project_id,
                        user_id = %draft.user_id,
                        error = %e,
                        "Failed to record acquired skills for participant, continuing"
                    );
                    failed += 1;
                }
            }
            if failed > 0 {
                tracing::warn!(
                    project_id = %project.project_id,
                    failed,
                    total = drafts.len(),
                    "Project closed with some acquired-skill records unwritten"
                );
            }

            let mut updated = project.clone();
            updated.status = ProjectStatus::Closed.as_db();
            updated.project_closed_date = Some(closed_date);
            updated.updated_date = closed_date;

            if self.projects.update(&updated).await? {
                tracing::info!(
                    project_id = %updated.project_id,
                    participants = roster.len(),
                    "Project closed"
                );
                self.event_bus.publish(
                    PlatformEvent::new(EVENT_PROJECT_CLOSED)
                        .with_source("project", updated.project_id.clone())
                        .with_actor(actor.object_id.clone())
                        .with_payload(serde_json::json!({
                            "projectTitle": updated.title,
                            "participants": roster.len(),
                        })),
                );
                self.reindex_best_effort(&updated.project_id).await;
                self.send_closure_notice(&updated, &roster).await;
                return Ok(());
            }

            tracing::debug!(
                project_id,
                attempt,
                "Close lost a version race, retrying against fresh state"
            );
        }

        Err(version_race_exhausted(project_id).into())
    }

    // -----------------------------------------------------------------------
    // Leave
    // -----------------------------------------------------------------------

    /// Remove the acting user from the roster of the project keyed by
    /// `(created_by_user_id, project_id)`.
    ///
    /// A project with no participants reports `NotFound`; removing a user
    /// who is not on a non-empty roster is a no-op that still succeeds, so
    /// the operation is idempotent. A closed project's roster is immutable.
    pub async fn leave_project(
        &self,
        actor: &AuthUser,
        created_by_user_id: &str,
        project_id: &str,
    ) -> AppResult<()> {
        require_id(project_id, "Project id")?;
        require_id(created_by_user_id, "Project owner id")?;

        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let project = self.fetch_present(created_by_user_id, project_id).await?;

            let status = ProjectStatus::from_db(project.status)?;
            if status.is_terminal() {
                return Err(CoreError::InvalidState(format!(
                    "Project {project_id} is closed and its roster can no longer change"
                ))
                .into());
            }

            let mut roster = Roster::decode(
                &project.project_participants_user_ids,
                &project.project_participants_user_mapping,
            );
            if roster.is_empty() {
                return Err(CoreError::NotFound {
                    entity: "Project roster",
                    id: project_id.to_string(),
                }
                .into());
            }
            roster.remove(&actor.object_id);

            let mut updated = project.clone();
            updated.project_participants_user_ids = roster.encode_user_ids();
            updated.project_participants_user_mapping = roster.encode_user_mapping();
            updated.updated_date = Utc::now();

            if self.projects.update(&updated).await? {
                tracing::info!(
                    project_id = %updated.project_id,
                    user_id = %actor.object_id,
                    remaining = roster.len(),
                    "User left project"
                );
                self.event_bus.publish(
                    PlatformEvent::new(EVENT_PROJECT_LEFT)
                        .with_source("project", updated.project_id.clone())
                        .with_actor(actor.object_id.clone())
                        .with_payload(serde_json::json!({
                            "projectTitle": updated.title,
                            "remaining": roster.len(),
                        })),
                );
                self.reindex_best_effort(&updated.project_id).await;
                return Ok(());
            }

            tracing::debug!(
                project_id,
                attempt,
                "Leave lost a version race, retrying against fresh state"
            );
        }

        Err(version_race_exhausted(project_id).into())
    }

    // -----------------------------------------------------------------------
    // Shared steps
    // -----------------------------------------------------------------------

    /// Fetch a project row, translating a missing or soft-deleted row into
    /// `NotFound`.
    async fn fetch_present(
        &self,
        created_by_user_id: &str,
        project_id: &str,
    ) -> AppResult<Project> {
        let project = self
            .projects
            .get(created_by_user_id, project_id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "Project",
                id: project_id.to_string(),
            })?;
        if project.is_removed {
            return Err(CoreError::NotFound {
                entity: "Project",
                id: project_id.to_string(),
            }
            .into());
        }
        Ok(project)
    }

    /// Run the on-demand search indexer, logging failures without
    /// affecting the caller.
    async fn reindex_best_effort(&self, project_id: &str) {
        if let Err(e) = self.indexer.run_indexer_on_demand().await {
            tracing::warn!(
                project_id,
                error = %e,
                "Search reindex failed after project mutation"
            );
        }
    }

    /// Tell the project owner someone joined. Best-effort.
    async fn send_join_notice(&self, project: &Project, actor: &AuthUser) {
        let notice = JoinNotice {
            project_id: project.project_id.clone(),
            project_title: project.title.clone(),
            owner_user_id: project.created_by_user_id.clone(),
            joined_user_id: actor.object_id.clone(),
            joined_user_name: actor.display_name.clone(),
        };
        if let Err(e) = self.notifier.project_joined(&notice).await {
            tracing::warn!(
                project_id = %project.project_id,
                error = %e,
                "Join notification could not be delivered"
            );
        }
    }

    /// Tell every roster member the project closed. Best-effort.
    async fn send_closure_notice(&self, project: &Project, roster: &Roster) {
        let notice = ClosureNotice {
            project_id: project.project_id.clone(),
            project_title: project.title.clone(),
            owner_name: project.created_by_name.clone(),
            participants: roster
                .participants()
                .iter()
                .map(|p| NoticeParticipant {
                    user_id: p.user_id.clone(),
                    display_name: p.display_name.clone(),
                })
                .collect(),
        };
        if let Err(e) = self.notifier.project_closed(&notice).await {
            tracing::warn!(
                project_id = %project.project_id,
                error = %e,
                "Closure notification could not be delivered"
            );
        }
    }
}

/// Reject an empty or whitespace-only identifier.
fn require_id(value: &str, what: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{what} must not be empty")));
    }
    Ok(())
}

/// The conflict returned once every update attempt lost its version race.
fn version_race_exhausted(project_id: &str) -> CoreError {
    CoreError::Conflict(format!(
        "Project {project_id} was modified concurrently, giving up after {MAX_UPDATE_ATTEMPTS} attempts"
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
