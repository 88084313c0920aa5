//! Domain model structs for the ownership tree.
//!
//! Identity → Projects → uncategorized Tasks. Nothing is shared between
//! branches: each identity owns its own copy of every project and task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use painel_shared::{IdentityId, ProjectId, TaskId};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// An anonymous visitor and everything it owns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: IdentityId,
    /// Projects in display order.
    pub projects: Vec<Project>,
    /// When the identity was issued.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// CSS color used for the project bullet, e.g. `#888888`.
    pub color: String,
    /// Tasks not assigned to any sub-category.
    pub uncategorized_tasks: Vec<Task>,
}

impl Project {
    /// Tasks whose finished flag is unset, in order.
    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.uncategorized_tasks.iter().filter(|t| !t.finished)
    }

    /// Tasks whose finished flag is set, in order.
    pub fn finished(&self) -> impl Iterator<Item = &Task> {
        self.uncategorized_tasks.iter().filter(|t| t.finished)
    }

    pub fn task_count(&self) -> usize {
        self.uncategorized_tasks.len()
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    /// The only mutable field; completion state is never cached elsewhere.
    pub finished: bool,
    pub start_date: Option<DateTime<Utc>>,
}
