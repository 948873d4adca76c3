//! Scoring engine for assessment task details.
//!
//! Evaluates a submitted score sheet against the detail's frozen rule tree:
//! each submitted score is clamped to its rule's maximum, added or
//! subtracted from the task's basic score, and the total is mapped to a
//! grade through the task's ordered grade bands.
//!
//! Preconditions (task Official, detail Pending or Returned) are the
//! caller's responsibility; this module performs no state validation.

use std::collections::HashMap;

use crate::assessment::{
    AssessmentTask, AssessmentTaskDetail, DetailStatus, GradeSetting, ScoreEntry, ScoreSheet,
    ScoreType, ScoringRule,
};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Rule lookup
// ---------------------------------------------------------------------------

/// Flatten a rule tree into an id-keyed lookup, collecting every item at
/// every depth.
pub fn flatten_rules(rules: &[ScoringRule]) -> HashMap<&str, &ScoringRule> {
    let mut lookup = HashMap::new();
    collect_rules(rules, &mut lookup);
    lookup
}

fn collect_rules<'a>(rules: &'a [ScoringRule], lookup: &mut HashMap<&'a str, &'a ScoringRule>) {
    for rule in rules {
        lookup.insert(rule.id.as_str(), rule);
        collect_rules(&rule.children, lookup);
    }
}

// ---------------------------------------------------------------------------
// Score computation
// ---------------------------------------------------------------------------

/// Compute the total score for a submission.
///
/// Starts from `basic_score`. A submitted score exceeding its rule's
/// `maximum_score` is clamped to that maximum before being applied; a
/// submitted id with no matching rule passes through unclamped (permissive
/// by design in the surrounding system — callers should surface the
/// returned unmatched ids). No floor or ceiling is applied to the running
/// total itself.
pub fn compute_total(
    basic_score: f64,
    rules: &[ScoringRule],
    entries: &[ScoreEntry],
) -> (f64, Vec<String>) {
    let lookup = flatten_rules(rules);
    let mut total = basic_score;
    let mut unmatched = Vec::new();

    for entry in entries {
        let applied = match lookup.get(entry.id.as_str()) {
            Some(rule) if entry.score > rule.maximum_score => rule.maximum_score,
            Some(_) => entry.score,
            None => {
                unmatched.push(entry.id.clone());
                entry.score
            }
        };
        match entry.score_type {
            ScoreType::Add => total += applied,
            ScoreType::Subtract => total -= applied,
        }
    }

    (total, unmatched)
}

/// Map a total score to the first grade band whose inclusive range contains
/// it; `None` when no band matches. List order wins on overlapping ranges.
pub fn derive_grade(setting: &GradeSetting, total: f64) -> Option<String> {
    setting
        .list
        .iter()
        .find(|band| band.score[0] <= total && total <= band.score[1])
        .map(|band| band.grade.clone())
}

// ---------------------------------------------------------------------------
// Detail mutation
// ---------------------------------------------------------------------------

/// Apply a scoring submission to a detail in place.
///
/// Scores are evaluated against the detail's own frozen rule-tree snapshot,
/// never the parent task's live template. Records the total and grade on
/// both the stored score sheet and the detail, marks the detail Submitted,
/// and stamps the submitter and date. Returns the submitted ids that had no
/// matching rule. Persistence is the caller's responsibility.
pub fn apply_score(
    detail: &mut AssessmentTaskDetail,
    task: &AssessmentTask,
    submit_user_id: DbId,
    entries: Vec<ScoreEntry>,
    now: Timestamp,
) -> Vec<String> {
    debug_assert!(
        detail.status.is_scorable(),
        "caller must guard detail status before scoring"
    );

    let (total, unmatched) = compute_total(task.basic_score, &detail.assessment_content, &entries);
    let grade = derive_grade(&task.grade_setting, total);

    detail.score_content = Some(ScoreSheet {
        list: entries,
        total_score: Some(total),
        grade: grade.clone(),
    });
    detail.total_score = Some(total);
    detail.grade = grade;
    detail.status = DetailStatus::Submitted;
    detail.submit_user_id = Some(submit_user_id);
    detail.submit_date = Some(now);

    unmatched
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
