//! Core data model types for synthscore.
//!
//! An [`EvaluationResult`] is the finished, immutable record produced by the
//! external scoring step for one student. Everything downstream (aggregation,
//! layout, rendering, export) reads it and never mutates it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The full graded record for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// Display name of the student.
    pub student_name: String,
    /// Institution-assigned student identifier.
    pub student_id: String,
    /// Number of questions graded correct.
    pub total_score: u32,
    /// Number of questions in the assessment.
    pub total_questions: u32,
    /// `round(total_score / total_questions * 100, 1)`, as supplied upstream.
    pub percentage: f64,
    /// Graded questions in presentation order.
    pub questions: Vec<QuestionOutcome>,
    /// Parent contact used by caller-side follow-up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_email: Option<String>,
    /// Status label as reported by the scoring step. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_status: Option<String>,
}

impl EvaluationResult {
    /// Build a result whose score, question count and percentage are derived
    /// from `questions`.
    pub fn new(
        student_name: impl Into<String>,
        student_id: impl Into<String>,
        questions: Vec<QuestionOutcome>,
    ) -> Self {
        let total_questions = questions.len() as u32;
        let total_score = questions.iter().filter(|q| q.status.is_correct()).count() as u32;
        let percentage = derived_percentage(total_score, total_questions).unwrap_or(0.0);
        Self {
            student_name: student_name.into(),
            student_id: student_id.into(),
            total_score,
            total_questions,
            percentage,
            questions,
            parent_email: None,
            communication_status: None,
        }
    }

    /// Attach a parent contact address.
    pub fn with_parent_email(mut self, email: impl Into<String>) -> Self {
        self.parent_email = Some(email.into());
        self
    }

    /// The percentage implied by score and question count, rounded to one
    /// decimal place. `None` when there are no questions.
    pub fn expected_percentage(&self) -> Option<f64> {
        derived_percentage(self.total_score, self.total_questions)
    }
}

/// `round(score / total * 100, 1)`, or `None` for `total == 0`.
pub fn derived_percentage(score: u32, total: u32) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(round_one_decimal(score as f64 / total as f64 * 100.0))
}

/// Round to one decimal place, half away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One graded question within a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    /// Display identifier, unique within a result.
    pub id: u32,
    /// Outcome decided by the scoring step.
    pub status: AnswerStatus,
    /// Expected answer and its rationale.
    pub master_key: String,
    /// What the student wrote. Empty means no answer was provided.
    #[serde(default)]
    pub student_answer: String,
    /// Explanation of the grading decision.
    #[serde(default)]
    pub logic: String,
    /// Free-form topic tag.
    #[serde(default)]
    pub category: String,
}

/// Grading outcome of a single question.
///
/// Partial credit, if ever needed, belongs in a third variant: counting and
/// color-coding match exhaustively on these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStatus {
    Correct,
    Incorrect,
}

impl AnswerStatus {
    pub fn is_correct(self) -> bool {
        matches!(self, AnswerStatus::Correct)
    }

    /// Upper-case token shown on question panels.
    pub fn token(self) -> &'static str {
        match self {
            AnswerStatus::Correct => "CORRECT",
            AnswerStatus::Incorrect => "INCORRECT",
        }
    }
}

impl fmt::Display for AnswerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerStatus::Correct => write!(f, "correct"),
            AnswerStatus::Incorrect => write!(f, "incorrect"),
        }
    }
}

impl FromStr for AnswerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "correct" => Ok(AnswerStatus::Correct),
            "incorrect" => Ok(AnswerStatus::Incorrect),
            other => Err(format!("unknown answer status: {other}")),
        }
    }
}
