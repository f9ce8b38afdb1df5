//! JSON evaluation result parser.
//!
//! Loads results from files and directories, and validates them before they
//! reach the aggregator.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ReportError;
use crate::model::EvaluationResult;

/// Parse a single JSON file into an `EvaluationResult`.
pub fn parse_result(path: &Path) -> Result<EvaluationResult> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read result file: {}", path.display()))?;

    parse_result_str(&content, path)
}

/// Parse a JSON string into an `EvaluationResult` (useful for testing).
pub fn parse_result_str(content: &str, source_path: &Path) -> Result<EvaluationResult> {
    let result: EvaluationResult = serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?;
    Ok(result)
}

/// Recursively load all `.json` result files from a directory.
pub fn load_result_directory(dir: &Path) -> Result<Vec<EvaluationResult>> {
    let mut results = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            results.extend(load_result_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            match parse_result(&path) {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(results)
}

/// A non-fatal issue found during validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Validate a result before aggregation.
///
/// Structural problems are returned as [`ReportError::InvalidResult`] (or
/// [`ReportError::DivisionUndefined`] for a zero question count). Anything
/// that can still be rendered faithfully comes back as a warning.
pub fn validate_result(result: &EvaluationResult) -> Result<Vec<ValidationWarning>, ReportError> {
    let student_id = result.student_id.as_str();

    if result.total_questions == 0 {
        return Err(ReportError::DivisionUndefined {
            student_id: student_id.to_string(),
        });
    }
    if result.questions.is_empty() {
        return Err(ReportError::invalid(student_id, "question list is empty"));
    }
    if result.total_score > result.total_questions {
        return Err(ReportError::invalid(
            student_id,
            format!(
                "score {} exceeds question count {}",
                result.total_score, result.total_questions
            ),
        ));
    }
    if result.questions.len() != result.total_questions as usize {
        return Err(ReportError::invalid(
            student_id,
            format!(
                "{} questions listed but totalQuestions is {}",
                result.questions.len(),
                result.total_questions
            ),
        ));
    }

    let mut seen_ids = HashSet::new();
    for q in &result.questions {
        if !seen_ids.insert(q.id) {
            return Err(ReportError::invalid(
                student_id,
                format!("duplicate question id: {}", q.id),
            ));
        }
    }

    let correct = result
        .questions
        .iter()
        .filter(|q| q.status.is_correct())
        .count() as u32;
    if correct != result.total_score {
        return Err(ReportError::invalid(
            student_id,
            format!(
                "totalScore is {} but {correct} questions are marked correct",
                result.total_score
            ),
        ));
    }

    let mut warnings = Vec::new();

    if let Some(expected) = result.expected_percentage() {
        if (expected - result.percentage).abs() > 0.05 {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!(
                    "percentage {} differs from derived value {expected:.1}; the supplied value is kept",
                    result.percentage
                ),
            });
        }
    }

    for q in &result.questions {
        if q.category.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: "category is empty".into(),
            });
        }
        if q.master_key.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: "master key is empty".into(),
            });
        }
    }

    for w in &warnings {
        tracing::warn!(student_id, question_id = ?w.question_id, "{}", w.message);
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_JSON: &str = r#"{
        "studentName": "John Smith",
        "studentId": "STU-001",
        "totalScore": 1,
        "totalQuestions": 2,
        "percentage": 50,
        "questions": [
            {
                "id": 1,
                "status": "correct",
                "masterKey": "Objects that roll include balls and cylinders",
                "studentAnswer": "Ball",
                "logic": "Correct identification of rolling objects",
                "category": "Motion"
            },
            {
                "id": 2,
                "status": "incorrect",
                "masterKey": "Objects that slide include books and boxes",
                "studentAnswer": "Ball",
                "logic": "Student confused rolling with sliding.",
                "category": "Motion"
            }
        ]
    }"#;

    fn parse(json: &str) -> EvaluationResult {
        parse_result_str(json, &PathBuf::from("test.json")).unwrap()
    }

    #[test]
    fn parse_valid_json() {
        let result = parse(VALID_JSON);
        assert_eq!(result.student_name, "John Smith");
        assert_eq!(result.questions.len(), 2);
        assert!(validate_result(&result).unwrap().is_empty());
    }

    #[test]
    fn parse_malformed_json() {
        let result = parse_result_str("{ not json", &PathBuf::from("bad.json"));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_score_above_question_count() {
        let mut result = parse(VALID_JSON);
        result.total_score = 3;
        let err = validate_result(&result).unwrap_err();
        assert!(err.is_invalid_result());
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn rejects_zero_questions() {
        let mut result = parse(VALID_JSON);
        result.total_questions = 0;
        result.questions.clear();
        let err = validate_result(&result).unwrap_err();
        assert!(matches!(err, ReportError::DivisionUndefined { .. }));
    }

    #[test]
    fn rejects_empty_question_list() {
        let mut result = parse(VALID_JSON);
        result.questions.clear();
        result.total_score = 0;
        let err = validate_result(&result).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut result = parse(VALID_JSON);
        result.questions[1].id = 1;
        let err = validate_result(&result).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn warns_on_percentage_mismatch() {
        let mut result = parse(VALID_JSON);
        result.percentage = 55.0;
        let warnings = validate_result(&result).unwrap();
        assert!(warnings.iter().any(|w| w.message.contains("differs")));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), VALID_JSON).unwrap();
        std::fs::write(dir.path().join("broken.json"), "{").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let results = load_result_directory(dir.path()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].student_id, "STU-001");
    }
}
