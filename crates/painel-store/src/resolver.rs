//! Path segment → owned resource resolution.
//!
//! Lookups only ever walk the requesting identity's own projects, so an id
//! belonging to someone else resolves exactly like an id that never existed.
//! Segments must be canonical UUID text; anything else is
//! [`StoreError::NotFound`] too.

use tracing::debug;

use painel_shared::{IdentityId, ProjectId, TaskId};

use crate::error::{Result, StoreError};
use crate::models::{Identity, Project, Task};
use crate::store::IdentityStore;

/// A project snapshot plus the position of one of its tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTask {
    project: Project,
    task_index: usize,
}

impl ResolvedTask {
    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn task_index(&self) -> usize {
        self.task_index
    }

    pub fn task(&self) -> &Task {
        &self.project.uncategorized_tasks[self.task_index]
    }

    pub fn into_project(self) -> Project {
        self.project
    }
}

/// Indices of a task inside an identity's tree. Projects and tasks are never
/// removed or reordered, so a location stays valid for the identity's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TaskLocation {
    pub project: usize,
    pub task: usize,
}

pub(crate) fn locate_project(identity: &Identity, project_id: &str) -> Result<usize> {
    let id = ProjectId::parse(project_id).map_err(|_| StoreError::NotFound)?;
    identity
        .projects
        .iter()
        .position(|p| p.id == id)
        .ok_or(StoreError::NotFound)
}

pub(crate) fn locate_task(
    identity: &Identity,
    project_id: &str,
    task_id: &str,
) -> Result<TaskLocation> {
    let project = locate_project(identity, project_id)?;
    let id = TaskId::parse(task_id).map_err(|_| StoreError::NotFound)?;
    let task = identity.projects[project]
        .uncategorized_tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or(StoreError::NotFound)?;

    Ok(TaskLocation { project, task })
}

impl IdentityStore {
    /// Resolve `project_id` among the projects owned by `identity`.
    pub async fn resolve_project(&self, identity: &IdentityId, project_id: &str) -> Result<Project> {
        let identities = self.identities().read().await;
        let owner = identities.get(identity).ok_or(StoreError::UnknownIdentity)?;

        match locate_project(owner, project_id) {
            Ok(index) => Ok(owner.projects[index].clone()),
            Err(e) => {
                debug!(identity = %identity, "Project did not resolve");
                Err(e)
            }
        }
    }

    /// Resolve a task inside one of `identity`'s projects.
    pub async fn resolve_task(
        &self,
        identity: &IdentityId,
        project_id: &str,
        task_id: &str,
    ) -> Result<ResolvedTask> {
        let identities = self.identities().read().await;
        let owner = identities.get(identity).ok_or(StoreError::UnknownIdentity)?;

        match locate_task(owner, project_id, task_id) {
            Ok(location) => Ok(ResolvedTask {
                project: owner.projects[location.project].clone(),
                task_index: location.task,
            }),
            Err(e) => {
                debug!(identity = %identity, "Task did not resolve");
                Err(e)
            }
        }
    }

    /// Snapshot of every project owned by `identity`, in order.
    pub async fn projects(&self, identity: &IdentityId) -> Result<Vec<Project>> {
        let identities = self.identities().read().await;
        identities
            .get(identity)
            .map(|owner| owner.projects.clone())
            .ok_or(StoreError::UnknownIdentity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_owned_project() {
        let store = IdentityStore::default();
        let identity = store.issue().await;
        let wanted = &identity.projects[1];

        let project = store
            .resolve_project(&identity.id, &wanted.id.to_string())
            .await
            .unwrap();
        assert_eq!(&project, wanted);
    }

    #[tokio::test]
    async fn test_resolve_task() {
        let store = IdentityStore::default();
        let identity = store.issue().await;
        let project = &identity.projects[0];
        let task = &project.uncategorized_tasks[3];

        let resolved = store
            .resolve_task(&identity.id, &project.id.to_string(), &task.id.to_string())
            .await
            .unwrap();
        assert_eq!(resolved.task_index(), 3);
        assert_eq!(resolved.task(), task);
        assert_eq!(resolved.project(), project);
    }

    #[tokio::test]
    async fn test_malformed_and_absent_look_the_same() {
        let store = IdentityStore::default();
        let identity = store.issue().await;
        let project = identity.projects[0].id.to_string();

        let malformed = store.resolve_project(&identity.id, "../etc/passwd").await;
        let absent = store
            .resolve_project(&identity.id, &ProjectId::new().to_string())
            .await;
        assert_eq!(malformed, Err(StoreError::NotFound));
        assert_eq!(absent, malformed);

        let bad_task = store.resolve_task(&identity.id, &project, "nope").await;
        let absent_task = store
            .resolve_task(&identity.id, &project, &TaskId::new().to_string())
            .await;
        assert_eq!(bad_task, Err(StoreError::NotFound));
        assert_eq!(absent_task, bad_task);
    }

    #[tokio::test]
    async fn test_task_must_belong_to_named_project() {
        let store = IdentityStore::default();
        let identity = store.issue().await;
        let task = identity.projects[0].uncategorized_tasks[0].id.to_string();
        let other_project = identity.projects[1].id.to_string();

        assert_eq!(
            store.resolve_task(&identity.id, &other_project, &task).await,
            Err(StoreError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_other_identity_cannot_reach_resources() {
        let store = IdentityStore::default();
        let alice = store.issue().await;
        let bob = store.issue().await;

        let project = alice.projects[0].id.to_string();
        let task = alice.projects[0].uncategorized_tasks[0].id.to_string();

        assert_eq!(
            store.resolve_project(&bob.id, &project).await,
            Err(StoreError::NotFound)
        );
        assert_eq!(
            store.resolve_task(&bob.id, &project, &task).await,
            Err(StoreError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_unknown_identity() {
        let store = IdentityStore::default();
        let ghost = IdentityId::new();
        assert_eq!(
            store.resolve_project(&ghost, &ProjectId::new().to_string()).await,
            Err(StoreError::UnknownIdentity)
        );
        assert_eq!(store.projects(&ghost).await, Err(StoreError::UnknownIdentity));
    }
}
