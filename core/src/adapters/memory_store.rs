use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use bluecarbon_common::project::verification::VerificationRecord;
use bluecarbon_common::project::{Project, ProjectFilter, ProjectId};
use bluecarbon_common::{Error, Result};

use crate::ports::storage::ProjectRepository;

#[derive(Default)]
struct StoreState {
    projects: HashMap<ProjectId, Project>,
    history: HashMap<ProjectId, Vec<VerificationRecord>>,
}

/// Keeps everything in memory behind one lock, so a decision's status update
/// and its record land together.
#[derive(Default)]
pub struct InMemoryProjectStore {
    state: RwLock<StoreState>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_version(stored: &Project, incoming: &Project) -> Result<()> {
    if stored.version != incoming.version {
        return Err(Error::Conflict {
            subject: format!("project {}", incoming.id),
            expected: incoming.version,
            found: stored.version,
        });
    }
    Ok(())
}

fn unknown(id: ProjectId) -> Error {
    Error::invalid_input(format!("unknown project {id}"))
}

#[async_trait]
impl ProjectRepository for InMemoryProjectStore {
    async fn insert(&self, project: Project) -> Result<Project> {
        let mut state = self.state.write().await;
        if state.projects.contains_key(&project.id) {
            return Err(Error::invalid_input(format!("project {} already exists", project.id)));
        }
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn get(&self, id: ProjectId) -> Result<Option<Project>> {
        Ok(self.state.read().await.projects.get(&id).cloned())
    }

    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>> {
        let state = self.state.read().await;
        let mut projects: Vec<Project> = state
            .projects
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn update(&self, mut project: Project) -> Result<Project> {
        let mut state = self.state.write().await;
        let stored = state.projects.get(&project.id).ok_or_else(|| unknown(project.id))?;
        check_version(stored, &project)?;

        project.version += 1;
        project.updated_at = Utc::now();
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn apply_decision(&self, mut project: Project, record: VerificationRecord) -> Result<Project> {
        let mut state = self.state.write().await;
        let stored = state.projects.get(&project.id).ok_or_else(|| unknown(project.id))?;
        check_version(stored, &project)?;

        project.version += 1;
        project.updated_at = Utc::now();
        state.projects.insert(project.id, project.clone());
        state.history.entry(project.id).or_default().push(record);
        Ok(project)
    }

    async fn verification_history(&self, id: ProjectId) -> Result<Vec<VerificationRecord>> {
        Ok(self
            .state
            .read()
            .await
            .history
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }
}
