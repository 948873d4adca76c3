//! Storage ports implemented by the out-of-scope persistence layer.
//!
//! The services only ever see these traits; the concrete backend decides
//! how rows are stored and is responsible for serializing concurrent writes
//! to the same row (last-write-wins is acceptable to the services).

use async_trait::async_trait;

use aegis_core::assessment::{
    AssessmentCategory, AssessmentTask, AssessmentTaskDetail, AssessmentTaskStatus, GradeSetting,
    ScoringRule,
};
use aegis_core::org::Organization;
use aegis_core::types::DbId;

/// Failure reported by a storage backend.
#[derive(Debug, thiserror::Error)]
#[error("storage backend failure: {0}")]
pub struct StorageError(pub String);

/// Input for inserting a task. The store assigns the id and creation date
/// and starts the task as Draft.
#[derive(Debug, Clone)]
pub struct NewAssessmentTask {
    pub title: String,
    pub content: Vec<ScoringRule>,
    pub basic_score: f64,
    pub grade_setting: GradeSetting,
}

/// Input for inserting a detail row at publication. The store assigns the
/// id and creation date and starts the detail as Pending.
#[derive(Debug, Clone)]
pub struct NewTaskDetail {
    pub assessment_task_id: DbId,
    pub receive_school_org_id: DbId,
    /// Frozen copy of the task's rule tree, owned by this detail alone.
    pub assessment_content: Vec<ScoringRule>,
}

/// Persistence port for assessment tasks and their detail rows.
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    async fn insert_task(&self, task: NewAssessmentTask) -> Result<AssessmentTask, StorageError>;

    async fn find_task(&self, id: DbId) -> Result<Option<AssessmentTask>, StorageError>;

    async fn update_task_status(
        &self,
        id: DbId,
        status: AssessmentTaskStatus,
    ) -> Result<(), StorageError>;

    async fn insert_detail(
        &self,
        detail: NewTaskDetail,
    ) -> Result<AssessmentTaskDetail, StorageError>;

    async fn find_detail(&self, id: DbId) -> Result<Option<AssessmentTaskDetail>, StorageError>;

    /// All detail rows for a task, creation order ascending.
    async fn list_details_for_task(
        &self,
        task_id: DbId,
    ) -> Result<Vec<AssessmentTaskDetail>, StorageError>;

    /// Overwrite a detail row with the given mutated state.
    async fn update_detail(&self, detail: &AssessmentTaskDetail) -> Result<(), StorageError>;
}

/// Read port for the tree-backed record kinds.
#[async_trait]
pub trait OrganizationStore: Send + Sync {
    /// The full flat organization list, sequence ascending.
    async fn list_organizations(&self) -> Result<Vec<Organization>, StorageError>;

    /// The full flat assessment-category list, sequence ascending.
    async fn list_categories(&self) -> Result<Vec<AssessmentCategory>, StorageError>;
}
