//! Task completion updates.

use tracing::{debug, info};

use painel_shared::IdentityId;

use crate::error::{Result, StoreError};
use crate::models::Project;
use crate::resolver::locate_task;
use crate::store::IdentityStore;

/// Interpret an HTML checkbox field.
///
/// Browsers send `on` for a ticked box and omit the field otherwise; an
/// explicitly empty value also means unticked. Anything else is rejected
/// rather than coerced.
pub fn parse_checkbox(value: Option<&str>) -> Result<bool> {
    match value {
        None | Some("") => Ok(false),
        Some("on") => Ok(true),
        Some(other) => Err(StoreError::InvalidCompletion(other.to_string())),
    }
}

impl IdentityStore {
    /// Overwrite the finished flag of one task and return the owning project
    /// as it looks afterwards.
    ///
    /// Resolution, the write and the snapshot all happen under one write
    /// guard, so concurrent calls on the same task never interleave.
    pub async fn set_finished(
        &self,
        identity: &IdentityId,
        project_id: &str,
        task_id: &str,
        value: bool,
    ) -> Result<Project> {
        let mut identities = self.identities().write().await;
        let owner = identities
            .get_mut(identity)
            .ok_or(StoreError::UnknownIdentity)?;

        let location = locate_task(owner, project_id, task_id).map_err(|e| {
            debug!(identity = %identity, "Task to update did not resolve");
            e
        })?;

        let project = &mut owner.projects[location.project];
        let task = &mut project.uncategorized_tasks[location.task];
        let previous = task.finished;
        task.finished = value;

        info!(
            identity = %identity,
            task = %task.id,
            previous,
            finished = value,
            "Task completion updated"
        );

        Ok(project.clone())
    }
}
