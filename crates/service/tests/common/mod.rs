//! Shared in-memory store backing the service integration tests.
//!
//! Implements both storage ports over mutex-held vectors so the tests
//! exercise the same service flows production runs against its real
//! persistence layer.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use aegis_core::assessment::{
    AssessmentCategory, AssessmentTask, AssessmentTaskDetail, AssessmentTaskStatus, DetailStatus,
};
use aegis_core::org::{OrgType, Organization};
use aegis_core::types::DbId;
use aegis_service::store::{
    AssessmentStore, NewAssessmentTask, NewTaskDetail, OrganizationStore, StorageError,
};

/// Initialise test logging once; repeated calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: DbId,
    tasks: Vec<AssessmentTask>,
    details: Vec<AssessmentTaskDetail>,
    organizations: Vec<Organization>,
    categories: Vec<AssessmentCategory>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn with_organizations(organizations: Vec<Organization>) -> Self {
        let store = Self::new();
        store.inner.lock().unwrap().organizations = organizations;
        store
    }

    #[allow(dead_code)]
    pub fn with_categories(categories: Vec<AssessmentCategory>) -> Self {
        let store = Self::new();
        store.inner.lock().unwrap().categories = categories;
        store
    }
}

/// Build a flat organization row for seeding.
#[allow(dead_code)]
pub fn org(
    id: DbId,
    parent_id: Option<DbId>,
    level: i32,
    name: &str,
    org_type: OrgType,
    sequence: i32,
) -> Organization {
    Organization {
        id,
        parent_id,
        level,
        name: name.to_string(),
        org_type,
        sequence,
        created_date: Utc::now(),
    }
}

/// Build a flat assessment-category row for seeding.
#[allow(dead_code)]
pub fn category(
    id: DbId,
    parent_id: Option<DbId>,
    level: i32,
    title: &str,
    sequence: i32,
) -> AssessmentCategory {
    AssessmentCategory {
        id,
        parent_id,
        level,
        title: title.to_string(),
        sequence,
    }
}

#[async_trait]
impl AssessmentStore for MemoryStore {
    async fn insert_task(&self, task: NewAssessmentTask) -> Result<AssessmentTask, StorageError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let task = AssessmentTask {
            id: inner.next_id,
            title: task.title,
            content: task.content,
            basic_score: task.basic_score,
            grade_setting: task.grade_setting,
            status: AssessmentTaskStatus::Draft,
            created_date: Utc::now(),
        };
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: DbId) -> Result<Option<AssessmentTask>, StorageError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn update_task_status(
        &self,
        id: DbId,
        status: AssessmentTaskStatus,
    ) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().unwrap();
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StorageError(format!("task {id} not found")))?;
        task.status = status;
        Ok(())
    }

    async fn insert_detail(
        &self,
        detail: NewTaskDetail,
    ) -> Result<AssessmentTaskDetail, StorageError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let detail = AssessmentTaskDetail {
            id: inner.next_id,
            assessment_task_id: detail.assessment_task_id,
            receive_school_org_id: detail.receive_school_org_id,
            status: DetailStatus::Pending,
            assessment_content: detail.assessment_content,
            score_content: None,
            total_score: None,
            grade: None,
            submit_user_id: None,
            submit_date: None,
            created_date: Utc::now(),
        };
        inner.details.push(detail.clone());
        Ok(detail)
    }

    async fn find_detail(&self, id: DbId) -> Result<Option<AssessmentTaskDetail>, StorageError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.details.iter().find(|d| d.id == id).cloned())
    }

    async fn list_details_for_task(
        &self,
        task_id: DbId,
    ) -> Result<Vec<AssessmentTaskDetail>, StorageError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .details
            .iter()
            .filter(|d| d.assessment_task_id == task_id)
            .cloned()
            .collect())
    }

    async fn update_detail(&self, detail: &AssessmentTaskDetail) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().unwrap();
        let row = inner
            .details
            .iter_mut()
            .find(|d| d.id == detail.id)
            .ok_or_else(|| StorageError(format!("detail {} not found", detail.id)))?;
        *row = detail.clone();
        Ok(())
    }
}

#[async_trait]
impl OrganizationStore for MemoryStore {
    async fn list_organizations(&self) -> Result<Vec<Organization>, StorageError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.organizations.clone())
    }

    async fn list_categories(&self) -> Result<Vec<AssessmentCategory>, StorageError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.categories.clone())
    }
}
