//! The starter projects every new identity receives.
//!
//! A [`Seed`] is a template, not a set of live projects: each call to
//! [`Seed::instantiate`] mints fresh project and task identifiers so that no
//! two identities ever share an id or a mutable task.

use chrono::{DateTime, Utc};

use painel_shared::{ProjectId, TaskId};

use crate::models::{Project, Task};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSeed {
    pub name: String,
    pub description: String,
    pub finished: bool,
    pub start_date: Option<DateTime<Utc>>,
}

impl TaskSeed {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            finished: false,
            start_date: None,
        }
    }

    pub fn finished(mut self) -> Self {
        self.finished = true;
        self
    }

    fn instantiate(&self) -> Task {
        Task {
            id: TaskId::new(),
            name: self.name.clone(),
            description: self.description.clone(),
            finished: self.finished,
            start_date: self.start_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSeed {
    pub name: String,
    pub color: String,
    pub tasks: Vec<TaskSeed>,
}

impl ProjectSeed {
    pub fn new(name: impl Into<String>, color: impl Into<String>, tasks: Vec<TaskSeed>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            tasks,
        }
    }

    fn instantiate(&self) -> Project {
        Project {
            id: ProjectId::new(),
            name: self.name.clone(),
            color: self.color.clone(),
            uncategorized_tasks: self.tasks.iter().map(TaskSeed::instantiate).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub projects: Vec<ProjectSeed>,
}

impl Seed {
    pub fn new(projects: Vec<ProjectSeed>) -> Self {
        Self { projects }
    }

    /// A fresh, unshared copy of every seeded project.
    pub fn instantiate(&self) -> Vec<Project> {
        self.projects.iter().map(ProjectSeed::instantiate).collect()
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self::new(vec![
            ProjectSeed::new(
                "Desenvolvimento",
                "#888888",
                vec![
                    TaskSeed::new(
                        "Complete Project Proposal",
                        "Draft a comprehensive project proposal outlining the scope, objectives, and deliverables. Include a timeline and resource requirements.",
                    ),
                    TaskSeed::new(
                        "Research Market Trends",
                        "Conduct thorough market research to identify current trends, competitor strategies, and potential opportunities. Summarize findings in a concise report.",
                    )
                    .finished(),
                    TaskSeed::new(
                        "Schedule Team Meeting",
                        "Coordinate with team members to find a suitable time for a project status update meeting. Ensure that all key stakeholders are available and informed.",
                    ),
                    TaskSeed::new(
                        "Review and Edit Blog Post",
                        "Edit a blog post draft for grammar, clarity, and style. Ensure the content aligns with the target audience and the overall content strategy.",
                    ),
                    TaskSeed::new(
                        "Prepare Monthly Budget Report",
                        "Compile and analyze financial data to create a detailed budget report for the current month. Highlight any variances and provide explanations.",
                    ),
                ],
            ),
            ProjectSeed::new("Cozinha", "#aa8888", Vec::new()),
        ])
    }
}
