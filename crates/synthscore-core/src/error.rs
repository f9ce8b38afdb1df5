//! Report synthesis error types.
//!
//! Every variant carries the student id it was raised for, so a failure can be
//! reproduced from the same input. Defined in `synthscore-core` so exporters
//! and the CLI can classify failures by stage without string matching.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while turning an evaluation result into a document.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The result is structurally malformed and was rejected before aggregation.
    #[error("invalid result for student {student_id}: {reason}")]
    InvalidResult { student_id: String, reason: String },

    /// A percentage or status was requested for a result with zero questions.
    #[error("percentage undefined for student {student_id}: result has zero questions")]
    DivisionUndefined { student_id: String },

    /// The page geometry cannot hold any content.
    #[error("invalid layout for student {student_id}: {reason}")]
    InvalidLayout { student_id: String, reason: String },

    /// A single block can never fit on a page, even an empty one.
    #[error(
        "block for student {student_id}{} needs {required:.1} but a page only holds {available:.1}",
        question_suffix(.question_id)
    )]
    LayoutOverflow {
        student_id: String,
        question_id: Option<u32>,
        required: f32,
        available: f32,
    },

    /// The artifact could not be finalized.
    #[error("export failed for student {student_id}: {reason}")]
    ExportFailure {
        student_id: String,
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

fn question_suffix(question_id: &Option<u32>) -> String {
    question_id
        .map(|id| format!(" (question {id})"))
        .unwrap_or_default()
}

/// The pipeline stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validation,
    Aggregation,
    Layout,
    Export,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Validation => write!(f, "validation"),
            Stage::Aggregation => write!(f, "aggregation"),
            Stage::Layout => write!(f, "layout"),
            Stage::Export => write!(f, "export"),
        }
    }
}

impl ReportError {
    /// Build an `InvalidResult` error.
    pub fn invalid(student_id: impl Into<String>, reason: impl Into<String>) -> Self {
        ReportError::InvalidResult {
            student_id: student_id.into(),
            reason: reason.into(),
        }
    }

    /// Build an `ExportFailure` error, optionally wrapping an I/O cause.
    pub fn export(
        student_id: impl Into<String>,
        reason: impl Into<String>,
        source: Option<std::io::Error>,
    ) -> Self {
        ReportError::ExportFailure {
            student_id: student_id.into(),
            reason: reason.into(),
            source,
        }
    }

    /// Returns `true` for malformed input, including `DivisionUndefined`.
    pub fn is_invalid_result(&self) -> bool {
        matches!(
            self,
            ReportError::InvalidResult { .. } | ReportError::DivisionUndefined { .. }
        )
    }

    /// The stage that raised this error.
    pub fn stage(&self) -> Stage {
        match self {
            ReportError::InvalidResult { .. } => Stage::Validation,
            ReportError::DivisionUndefined { .. } => Stage::Aggregation,
            ReportError::InvalidLayout { .. } | ReportError::LayoutOverflow { .. } => Stage::Layout,
            ReportError::ExportFailure { .. } => Stage::Export,
        }
    }

    /// The student the failing result belongs to.
    pub fn student_id(&self) -> &str {
        match self {
            ReportError::InvalidResult { student_id, .. }
            | ReportError::DivisionUndefined { student_id }
            | ReportError::InvalidLayout { student_id, .. }
            | ReportError::LayoutOverflow { student_id, .. }
            | ReportError::ExportFailure { student_id, .. } => student_id,
        }
    }

    /// The offending question, when the error is tied to one.
    pub fn question_id(&self) -> Option<u32> {
        match self {
            ReportError::LayoutOverflow { question_id, .. } => *question_id,
            _ => None,
        }
    }
}
