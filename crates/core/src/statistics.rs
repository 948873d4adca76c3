//! Completion statistics over the detail rows of a published task.

use serde::Serialize;

use crate::assessment::{AssessmentTaskDetail, DetailStatus};

/// Per-status tallies for one task's detail rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatistic {
    pub total: u32,
    pub pending: u32,
    pub submitted: u32,
    pub returned: u32,
    pub done: u32,
    pub done_percentage: f64,
}

/// Tally detail rows by status and compute the completion percentage.
///
/// Every row counts once, unweighted. The percentage divides before
/// multiplying (`done / total * 100`). A task with no detail rows reports a
/// completion percentage of 0 rather than a division by zero.
pub fn tally_details(details: &[AssessmentTaskDetail]) -> TaskStatistic {
    let mut pending = 0u32;
    let mut submitted = 0u32;
    let mut returned = 0u32;
    let mut done = 0u32;

    for detail in details {
        match detail.status {
            DetailStatus::Pending => pending += 1,
            DetailStatus::Submitted => submitted += 1,
            DetailStatus::Returned => returned += 1,
            DetailStatus::Done => done += 1,
        }
    }

    let total = details.len() as u32;
    let done_percentage = if total == 0 {
        0.0
    } else {
        f64::from(done) / f64::from(total) * 100.0
    };

    TaskStatistic {
        total,
        pending,
        submitted,
        returned,
        done,
        done_percentage,
    }
}
