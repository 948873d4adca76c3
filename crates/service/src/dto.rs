//! Validated request DTOs and their conversions into core models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use aegis_core::assessment::{GradeSetting, ScoreEntry, ScoreType, ScoringRule};
use aegis_core::types::DbId;

/// A scoring item as submitted by the task author.
///
/// Items may arrive without an id (newly authored rows); a v4 uuid is
/// assigned during conversion so the published snapshot carries stable ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringItemInput {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub maximum_score: f64,
    pub score_type: ScoreType,
    #[serde(default)]
    pub children: Vec<ScoringItemInput>,
}

impl ScoringItemInput {
    fn into_rule(self) -> ScoringRule {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        ScoringRule {
            id,
            title: self.title,
            maximum_score: self.maximum_score,
            score_type: self.score_type,
            children: into_rules(self.children),
        }
    }
}

/// Convert authored items into rule-tree nodes, assigning missing ids.
pub fn into_rules(items: Vec<ScoringItemInput>) -> Vec<ScoringRule> {
    items.into_iter().map(ScoringItemInput::into_rule).collect()
}

/// Request body for creating an assessment task (stored as Draft).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, message = "at least one scoring item is required"))]
    pub content: Vec<ScoringItemInput>,
    #[validate(range(min = 0.0))]
    pub basic_score: f64,
    #[serde(default)]
    pub grade_setting: GradeSetting,
}

/// Request body for submitting an evaluation against a detail.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    #[validate(range(min = 1))]
    pub submit_user_id: DbId,
    /// An empty list is legal; the total then stays at the task's basic
    /// score.
    #[serde(default)]
    pub list: Vec<ScoreEntry>,
}
