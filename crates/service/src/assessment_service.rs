//! Assessment task lifecycle: creation, publication fan-out, evaluation,
//! reviewer transitions, and completion statistics.

use std::collections::HashSet;

use chrono::Utc;
use validator::Validate;

use aegis_core::assessment::{
    self, AssessmentTask, AssessmentTaskDetail, AssessmentTaskStatus, DetailStatus,
};
use aegis_core::error::CoreError;
use aegis_core::scoring;
use aegis_core::statistics::{self, TaskStatistic};
use aegis_core::types::DbId;

use crate::dto::{self, CreateTaskRequest, EvaluateRequest};
use crate::error::ServiceResult;
use crate::store::{AssessmentStore, NewAssessmentTask, NewTaskDetail};

/// Orchestrates assessment tasks over an [`AssessmentStore`].
pub struct AssessmentService<S> {
    store: S,
}

impl<S: AssessmentStore> AssessmentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a task in Draft, validating the authored rule tree and grade
    /// settings and assigning ids to scoring items that arrived without
    /// one.
    pub async fn create_task(&self, req: CreateTaskRequest) -> ServiceResult<AssessmentTask> {
        req.validate()?;
        let content = dto::into_rules(req.content);
        assessment::validate_rule_tree(&content)?;
        assessment::validate_grade_setting(&req.grade_setting)?;

        let task = self
            .store
            .insert_task(NewAssessmentTask {
                title: req.title,
                content,
                basic_score: req.basic_score,
                grade_setting: req.grade_setting,
            })
            .await?;

        tracing::info!(task_id = task.id, title = %task.title, "Assessment task created");
        Ok(task)
    }

    /// Publish a Draft task: move it to Official and fan out one Pending
    /// detail row per recipient, each owning its own frozen copy of the
    /// rule tree.
    pub async fn publish_task(
        &self,
        task_id: DbId,
        recipient_org_ids: &[DbId],
    ) -> ServiceResult<Vec<AssessmentTaskDetail>> {
        let task = self.require_task(task_id).await?;
        if task.status != AssessmentTaskStatus::Draft {
            return Err(CoreError::Conflict(format!(
                "Task in status {} cannot be published",
                task.status.label()
            ))
            .into());
        }
        if recipient_org_ids.is_empty() {
            return Err(
                CoreError::Validation("At least one recipient is required".to_string()).into(),
            );
        }
        let mut seen: HashSet<DbId> = HashSet::new();
        for org_id in recipient_org_ids {
            if !seen.insert(*org_id) {
                return Err(CoreError::Conflict(format!(
                    "Recipient organization {org_id} listed more than once"
                ))
                .into());
            }
        }

        self.store
            .update_task_status(task_id, AssessmentTaskStatus::Official)
            .await?;

        let mut details = Vec::with_capacity(recipient_org_ids.len());
        for &org_id in recipient_org_ids {
            let detail = self
                .store
                .insert_detail(NewTaskDetail {
                    assessment_task_id: task_id,
                    receive_school_org_id: org_id,
                    assessment_content: task.content.clone(),
                })
                .await?;
            details.push(detail);
        }

        tracing::info!(
            task_id,
            recipients = details.len(),
            "Assessment task published"
        );
        Ok(details)
    }

    /// Submit an evaluation against a detail.
    ///
    /// Guards the state here, before the scoring engine runs: the parent
    /// task must be Official and the detail Pending or Returned. Unmatched
    /// rule ids are applied as submitted and logged at warn level.
    pub async fn evaluate(
        &self,
        detail_id: DbId,
        req: EvaluateRequest,
    ) -> ServiceResult<AssessmentTaskDetail> {
        req.validate()?;
        let mut detail = self.require_detail(detail_id).await?;
        let task = self.require_task(detail.assessment_task_id).await?;

        if task.status != AssessmentTaskStatus::Official || !detail.status.is_scorable() {
            return Err(CoreError::Conflict(format!(
                "Detail {detail_id} is not allowed to be evaluated (task {}, detail {})",
                task.status.label(),
                detail.status.label()
            ))
            .into());
        }

        let unmatched =
            scoring::apply_score(&mut detail, &task, req.submit_user_id, req.list, Utc::now());
        for rule_id in &unmatched {
            tracing::warn!(
                detail_id,
                rule_id = %rule_id,
                "Submitted score references no published rule; applied unclamped"
            );
        }

        self.store.update_detail(&detail).await?;

        tracing::info!(
            detail_id,
            task_id = task.id,
            submit_user_id = req.submit_user_id,
            total_score = ?detail.total_score,
            grade = ?detail.grade,
            "Assessment detail evaluated"
        );
        Ok(detail)
    }

    /// Return a Submitted detail to its recipient for rework.
    pub async fn send_back(&self, detail_id: DbId) -> ServiceResult<AssessmentTaskDetail> {
        self.review_detail(detail_id, DetailStatus::Returned).await
    }

    /// Accept a Submitted detail as final.
    pub async fn accept(&self, detail_id: DbId) -> ServiceResult<AssessmentTaskDetail> {
        self.review_detail(detail_id, DetailStatus::Done).await
    }

    /// Close an Official task as Done.
    pub async fn finish_task(&self, task_id: DbId) -> ServiceResult<()> {
        let task = self.require_task(task_id).await?;
        if task.status != AssessmentTaskStatus::Official {
            return Err(CoreError::Conflict(format!(
                "Task in status {} cannot be finished",
                task.status.label()
            ))
            .into());
        }
        self.store
            .update_task_status(task_id, AssessmentTaskStatus::Done)
            .await?;
        tracing::info!(task_id, "Assessment task finished");
        Ok(())
    }

    /// Cancel a Draft or Official task.
    pub async fn cancel_task(&self, task_id: DbId) -> ServiceResult<()> {
        let task = self.require_task(task_id).await?;
        if task.status.is_terminal() {
            return Err(CoreError::Conflict(format!(
                "Task in status {} cannot be cancelled",
                task.status.label()
            ))
            .into());
        }
        self.store
            .update_task_status(task_id, AssessmentTaskStatus::Cancellation)
            .await?;
        tracing::info!(task_id, "Assessment task cancelled");
        Ok(())
    }

    /// Load a task or fail with NotFound.
    pub async fn get_task(&self, task_id: DbId) -> ServiceResult<AssessmentTask> {
        self.require_task(task_id).await
    }

    /// Load a detail or fail with NotFound.
    pub async fn get_detail(&self, detail_id: DbId) -> ServiceResult<AssessmentTaskDetail> {
        self.require_detail(detail_id).await
    }

    /// Per-status tallies and completion percentage for a task's details.
    pub async fn task_statistic(&self, task_id: DbId) -> ServiceResult<TaskStatistic> {
        self.require_task(task_id).await?;
        let details = self.store.list_details_for_task(task_id).await?;
        Ok(statistics::tally_details(&details))
    }

    /// Reviewer transition out of Submitted.
    async fn review_detail(
        &self,
        detail_id: DbId,
        next: DetailStatus,
    ) -> ServiceResult<AssessmentTaskDetail> {
        let mut detail = self.require_detail(detail_id).await?;
        if detail.status != DetailStatus::Submitted {
            return Err(CoreError::Conflict(format!(
                "Detail in status {} cannot move to {}",
                detail.status.label(),
                next.label()
            ))
            .into());
        }
        detail.status = next;
        self.store.update_detail(&detail).await?;
        tracing::info!(detail_id, status = next.label(), "Assessment detail reviewed");
        Ok(detail)
    }

    async fn require_task(&self, id: DbId) -> ServiceResult<AssessmentTask> {
        self.store
            .find_task(id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "AssessmentTask",
                    id,
                }
                .into()
            })
    }

    async fn require_detail(&self, id: DbId) -> ServiceResult<AssessmentTaskDetail> {
        self.store
            .find_detail(id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "AssessmentTaskDetail",
                    id,
                }
                .into()
            })
    }
}
