//! Summary statistics and communication-status classification.
//!
//! The percentage always comes from the [`EvaluationResult`] itself. Counts are
//! derived from the question list; the status label is looked up in a
//! caller-supplied [`ThresholdTable`].

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::model::{AnswerStatus, EvaluationResult};

/// One row of a threshold table: percentages at or above `min_percentage`
/// get `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub min_percentage: f64,
    pub label: String,
}

/// Ordered percentage thresholds mapping a score to a human-readable label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    /// Rows, checked from highest `min_percentage` down.
    #[serde(default)]
    pub levels: Vec<Threshold>,
    /// Label used when no row matches.
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_fallback() -> String {
    "Remediation Notice Sent".to_string()
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::new(vec![(50.0, "Appreciation Sent")], default_fallback())
    }
}

impl ThresholdTable {
    /// Build a table from `(min_percentage, label)` pairs in any order.
    pub fn new<L: Into<String>>(levels: Vec<(f64, L)>, fallback: impl Into<String>) -> Self {
        let levels = levels
            .into_iter()
            .map(|(min_percentage, label)| Threshold {
                min_percentage,
                label: label.into(),
            })
            .collect();
        Self {
            levels,
            fallback: fallback.into(),
        }
    }

    /// The performance levels shown on the student dashboard.
    pub fn performance_levels() -> Self {
        Self::new(vec![(80.0, "Excellent"), (60.0, "Good")], "Needs Improvement")
    }

    /// The bare label for `percentage`.
    pub fn label_for(&self, percentage: f64) -> &str {
        self.levels
            .iter()
            .filter(|t| percentage >= t.min_percentage)
            .max_by(|a, b| a.min_percentage.total_cmp(&b.min_percentage))
            .map(|t| t.label.as_str())
            .unwrap_or(&self.fallback)
    }

    /// Classify `percentage` into a communication status.
    pub fn classify(&self, percentage: f64) -> CommunicationStatus {
        CommunicationStatus {
            label: format!("{} ({percentage:.1}%)", self.label_for(percentage)),
            percentage,
        }
    }
}

/// A status label together with the percentage it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationStatus {
    pub label: String,
    pub percentage: f64,
}

/// Per-category tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: String,
    pub correct: u32,
    pub total: u32,
}

impl CategoryStats {
    pub fn incorrect(&self) -> u32 {
        self.total - self.correct
    }
}

/// Aggregate view of one evaluation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub student_name: String,
    pub student_id: String,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub total_questions: u32,
    /// Copied from the input result, never recomputed.
    pub percentage: f64,
    pub communication_status: CommunicationStatus,
    /// Categories in first-appearance order.
    pub categories: Vec<CategoryStats>,
}

impl Summary {
    /// Categories with at least one incorrect answer, in presentation order.
    pub fn focus_areas(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|c| c.incorrect() > 0)
            .map(|c| c.category.as_str())
            .collect()
    }
}

/// Aggregate `result` into counts, category tallies and a status label.
pub fn aggregate(
    result: &EvaluationResult,
    thresholds: &ThresholdTable,
) -> Result<Summary, ReportError> {
    if result.total_questions == 0 {
        return Err(ReportError::DivisionUndefined {
            student_id: result.student_id.clone(),
        });
    }

    let correct_count = result
        .questions
        .iter()
        .filter(|q| q.status == AnswerStatus::Correct)
        .count() as u32;

    let incorrect_count = result.total_questions.checked_sub(correct_count).ok_or_else(|| {
        ReportError::invalid(
            &result.student_id,
            format!(
                "{correct_count} correct answers exceed {} questions",
                result.total_questions
            ),
        )
    })?;

    let mut categories: Vec<CategoryStats> = Vec::new();
    for q in &result.questions {
        let idx = match categories.iter().position(|c| c.category == q.category) {
            Some(idx) => idx,
            None => {
                categories.push(CategoryStats {
                    category: q.category.clone(),
                    correct: 0,
                    total: 0,
                });
                categories.len() - 1
            }
        };
        let stats = &mut categories[idx];
        stats.total += 1;
        if q.status.is_correct() {
            stats.correct += 1;
        }
    }

    let summary = Summary {
        student_name: result.student_name.clone(),
        student_id: result.student_id.clone(),
        correct_count,
        incorrect_count,
        total_questions: result.total_questions,
        percentage: result.percentage,
        communication_status: thresholds.classify(result.percentage),
        categories,
    };

    tracing::debug!(
        student_id = %summary.student_id,
        correct = summary.correct_count,
        incorrect = summary.incorrect_count,
        status = %summary.communication_status.label,
        "aggregated result"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionOutcome;

    fn question(id: u32, status: AnswerStatus, category: &str) -> QuestionOutcome {
        QuestionOutcome {
            id,
            status,
            master_key: format!("key {id}"),
            student_answer: format!("answer {id}"),
            logic: String::new(),
            category: category.into(),
        }
    }

    fn six_question_result() -> EvaluationResult {
        use AnswerStatus::*;
        EvaluationResult::new(
            "John Smith",
            "STU-001",
            vec![
                question(1, Correct, "Motion"),
                question(2, Incorrect, "Motion"),
                question(3, Correct, "Arithmetic"),
                question(4, Incorrect, "Arithmetic"),
                question(5, Incorrect, "Geometry"),
                question(6, Correct, "Geometry"),
            ],
        )
    }

    #[test]
    fn half_correct_scenario() {
        let summary = aggregate(&six_question_result(), &ThresholdTable::default()).unwrap();
        assert_eq!(summary.correct_count, 3);
        assert_eq!(summary.incorrect_count, 3);
        assert_eq!(summary.percentage, 50.0);
        assert_eq!(
            summary.communication_status.label,
            "Appreciation Sent (50.0%)"
        );
    }

    #[test]
    fn counts_always_sum_to_total() {
        let mut result = six_question_result();
        for flip in 0..result.questions.len() {
            result.questions[flip].status = AnswerStatus::Correct;
            let summary = aggregate(&result, &ThresholdTable::default()).unwrap();
            assert_eq!(
                summary.correct_count + summary.incorrect_count,
                summary.total_questions
            );
            let expected = result
                .questions
                .iter()
                .filter(|q| q.status.is_correct())
                .count() as u32;
            assert_eq!(summary.correct_count, expected);
        }
    }

    #[test]
    fn percentage_is_passed_through() {
        let mut result = six_question_result();
        result.percentage = 49.95;
        let summary = aggregate(&result, &ThresholdTable::default()).unwrap();
        assert_eq!(summary.percentage, 49.95);
        assert_eq!(summary.communication_status.percentage, 49.95);
    }

    #[test]
    fn zero_questions_is_division_undefined() {
        let result = EvaluationResult::new("Empty", "STU-000", vec![]);
        let err = aggregate(&result, &ThresholdTable::default()).unwrap_err();
        assert!(matches!(err, ReportError::DivisionUndefined { .. }));
    }

    #[test]
    fn injectable_threshold_table() {
        let table = ThresholdTable::new(
            vec![(90.0, "Honours Letter"), (40.0, "Progress Note")],
            "Remediation Plan",
        );
        assert_eq!(table.classify(95.0).label, "Honours Letter (95.0%)");
        assert_eq!(table.classify(40.0).label, "Progress Note (40.0%)");
        assert_eq!(table.classify(12.5).label, "Remediation Plan (12.5%)");
    }

    #[test]
    fn unordered_levels_pick_highest_match() {
        let table = ThresholdTable::new(vec![(60.0, "Good"), (80.0, "Excellent")], "Low");
        assert_eq!(table.label_for(85.0), "Excellent");
        assert_eq!(table.label_for(70.0), "Good");
        assert_eq!(
            ThresholdTable::performance_levels().label_for(59.9),
            "Needs Improvement"
        );
    }

    #[test]
    fn categories_and_focus_areas() {
        let mut result = six_question_result();
        result.questions[5].status = AnswerStatus::Correct;
        result.questions[4].status = AnswerStatus::Correct;
        let summary = aggregate(&result, &ThresholdTable::default()).unwrap();
        let names: Vec<_> = summary.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Motion", "Arithmetic", "Geometry"]);
        assert_eq!(summary.focus_areas(), vec!["Motion", "Arithmetic"]);
    }
}
