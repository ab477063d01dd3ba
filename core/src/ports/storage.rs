use async_trait::async_trait;

use bluecarbon_common::Result;
use bluecarbon_common::project::verification::VerificationRecord;
use bluecarbon_common::project::{Project, ProjectFilter, ProjectId};

/// Persistent storage for projects and their verification history.
///
/// Implementations are the single point of serialization for concurrent
/// writers: every write carries the `version` the caller last read, and a
/// mismatch must fail with [`bluecarbon_common::Error::Conflict`] instead of
/// overwriting.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project. Fails if the id is already taken.
    async fn insert(&self, project: Project) -> Result<Project>;

    async fn get(&self, id: ProjectId) -> Result<Option<Project>>;

    /// Matching projects, newest first.
    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>>;

    /// Replaces the stored project if its version still equals `project.version`.
    ///
    /// Returns the stored copy, with the version bumped.
    async fn update(&self, project: Project) -> Result<Project>;

    /// Writes the new project state and appends `record`, both or neither.
    async fn apply_decision(&self, project: Project, record: VerificationRecord) -> Result<Project>;

    /// Decisions taken on a project, oldest first.
    async fn verification_history(&self, id: ProjectId) -> Result<Vec<VerificationRecord>>;
}
