//! Assessment task domain model: rule trees, grade settings, task and
//! task-detail records, and their status machines.
//!
//! Rule trees and score sheets are stored as JSON documents by the outer
//! persistence layer, so every shape here is serde-faithful to the stored
//! camelCase documents.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::hierarchy::HierarchyNode;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Rule tree
// ---------------------------------------------------------------------------

/// Whether a scoring item adds to or subtracts from the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreType {
    Add,
    Subtract,
}

/// One item of a task's scoring configuration.
///
/// Items nest to arbitrary depth through `children`; submitted scores
/// reference items by `id` wherever they sit in the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRule {
    pub id: String,
    pub title: String,
    /// Cap applied to any submitted score for this item. A cap of 0 clamps
    /// every positive submission to zero.
    #[serde(default)]
    pub maximum_score: f64,
    pub score_type: ScoreType,
    #[serde(default)]
    pub children: Vec<ScoringRule>,
}

/// One grade label with its inclusive `[min, max]` score range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBand {
    pub grade: String,
    pub score: [f64; 2],
}

/// Ordered grade ranges; list order is the tie-break when ranges overlap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSetting {
    pub list: Vec<GradeBand>,
}

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

/// Lifecycle of an assessment task.
///
/// Created Draft; publication moves it to Official and fans out one detail
/// row per recipient; Done and Cancellation are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssessmentTaskStatus {
    Draft,
    Official,
    Done,
    Cancellation,
}

impl AssessmentTaskStatus {
    /// Terminal states accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancellation)
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Official => "Official",
            Self::Done => "Done",
            Self::Cancellation => "Cancellation",
        }
    }
}

/// Per-recipient state of a published task.
///
/// Pending and Returned accept a scoring submission; Submitted moves to
/// Returned (send-back) or Done (acceptance) only through explicit reviewer
/// operations, never automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DetailStatus {
    Pending,
    Submitted,
    Returned,
    Done,
}

impl DetailStatus {
    /// Whether a scoring submission is currently accepted.
    pub fn is_scorable(self) -> bool {
        matches!(self, Self::Pending | Self::Returned)
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Submitted => "Submitted",
            Self::Returned => "Returned",
            Self::Done => "Done",
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// An assessment task owning the rule-tree template and grade settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentTask {
    pub id: DbId,
    pub title: String,
    /// The rule-tree template copied into each detail at publication.
    pub content: Vec<ScoringRule>,
    /// Starting score before any add/subtract adjustments.
    pub basic_score: f64,
    pub grade_setting: GradeSetting,
    pub status: AssessmentTaskStatus,
    pub created_date: Timestamp,
}

/// One submitted score for a rule-tree item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub id: String,
    pub score: f64,
    pub score_type: ScoreType,
}

/// The scoring payload recorded on a detail after submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSheet {
    pub list: Vec<ScoreEntry>,
    pub total_score: Option<f64>,
    pub grade: Option<String>,
}

/// Per-recipient instance of a published task.
///
/// Owns an independent frozen copy of the rule tree plus its own scoring
/// outcome; mutation of one detail never affects sibling details or the
/// parent task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentTaskDetail {
    pub id: DbId,
    pub assessment_task_id: DbId,
    pub receive_school_org_id: DbId,
    pub status: DetailStatus,
    /// Frozen snapshot of the task's rule tree, taken at publication time.
    pub assessment_content: Vec<ScoringRule>,
    pub score_content: Option<ScoreSheet>,
    pub total_score: Option<f64>,
    pub grade: Option<String>,
    pub submit_user_id: Option<DbId>,
    pub submit_date: Option<Timestamp>,
    pub created_date: Timestamp,
}

/// A flat assessment-category row; categories form a keyword-filterable
/// tree just like organizations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentCategory {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub level: i32,
    pub title: String,
    pub sequence: i32,
}

impl HierarchyNode for AssessmentCategory {
    fn node_id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }

    fn level(&self) -> i32 {
        self.level
    }

    fn display_name(&self) -> &str {
        &self.title
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a rule tree: every item must carry a non-empty id, a non-empty
/// title, and a non-negative maximum score, at every depth.
pub fn validate_rule_tree(rules: &[ScoringRule]) -> Result<(), CoreError> {
    for rule in rules {
        if rule.id.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Scoring item '{}' has an empty id",
                rule.title
            )));
        }
        if rule.title.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Scoring item '{}' has an empty title",
                rule.id
            )));
        }
        if rule.maximum_score < 0.0 {
            return Err(CoreError::Validation(format!(
                "Scoring item '{}' has a negative maximum score",
                rule.id
            )));
        }
        validate_rule_tree(&rule.children)?;
    }
    Ok(())
}

/// Validate grade settings: every band needs a non-empty label and an
/// ordered `[min, max]` range. An empty list is allowed; such tasks simply
/// never derive a grade.
pub fn validate_grade_setting(setting: &GradeSetting) -> Result<(), CoreError> {
    for band in &setting.list {
        if band.grade.trim().is_empty() {
            return Err(CoreError::Validation(
                "Grade band has an empty label".to_string(),
            ));
        }
        let [min, max] = band.score;
        if min > max {
            return Err(CoreError::Validation(format!(
                "Grade band '{}' has min {min} greater than max {max}",
                band.grade
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
