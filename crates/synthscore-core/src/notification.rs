//! Parent notification payload.
//!
//! Built from a validated result and its summary. Delivery is left to the
//! caller; this module only decides whether a notification can be addressed
//! and what it carries.

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::model::EvaluationResult;
use crate::statistics::Summary;

/// What a parent is told about one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentNotification {
    pub parent_email: String,
    pub student_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    /// Categories with at least one incorrect answer.
    pub focus_areas: Vec<String>,
    pub communication_status: String,
}

impl ParentNotification {
    /// Build the payload, or fail when there is no one to address it to.
    pub fn new(result: &EvaluationResult, summary: &Summary) -> Result<Self, ReportError> {
        let parent_email = result
            .parent_email
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        let student_name = result.student_name.trim();

        if parent_email.is_empty() || student_name.is_empty() {
            return Err(ReportError::invalid(
                &result.student_id,
                "parent email and student name are required",
            ));
        }

        Ok(Self {
            parent_email: parent_email.to_string(),
            student_name: student_name.to_string(),
            score: summary.correct_count,
            total_questions: summary.total_questions,
            percentage: summary.percentage,
            focus_areas: summary
                .focus_areas()
                .into_iter()
                .map(String::from)
                .collect(),
            communication_status: summary.communication_status.label.clone(),
        })
    }

    /// One-line description, e.g. for a log or a mail subject.
    pub fn headline(&self) -> String {
        format!(
            "{}: {}/{} ({:.1}%)",
            self.student_name, self.score, self.total_questions, self.percentage
        )
    }
}
