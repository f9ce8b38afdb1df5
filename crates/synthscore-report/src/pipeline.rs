//! End-to-end report synthesis for one evaluation result.

use chrono::{DateTime, Utc};

use synthscore_core::document::compose_blocks;
use synthscore_core::error::ReportError;
use synthscore_core::layout::layout;
use synthscore_core::model::EvaluationResult;
use synthscore_core::parser::{validate_result, ValidationWarning};
use synthscore_core::statistics::{aggregate, Summary};

use crate::config::SynthscoreConfig;
use crate::export::{Artifact, ExportFormat, ExportMetadata, Exporter};

/// Everything produced for one result.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub summary: Summary,
    pub warnings: Vec<ValidationWarning>,
    pub page_count: usize,
    pub artifacts: Vec<Artifact>,
}

/// Validate, aggregate, lay out and export `result` in each of `formats`.
///
/// Layout runs once; every format is produced from the same pages.
pub fn synthesize(
    result: &EvaluationResult,
    config: &SynthscoreConfig,
    formats: &[ExportFormat],
    exported_at: DateTime<Utc>,
) -> Result<Synthesis, ReportError> {
    config
        .layout
        .validate()
        .map_err(|e| ReportError::InvalidLayout {
            student_id: result.student_id.clone(),
            reason: format!("{e:#}"),
        })?;
    let warnings = validate_result(result)?;
    let summary = aggregate(result, &config.thresholds)?;

    let blocks = compose_blocks(result, &summary, &config.layout);
    let pages = layout(&result.student_id, blocks, &config.layout)?;

    let metadata = ExportMetadata {
        student_name: result.student_name.clone(),
        student_id: result.student_id.clone(),
        exported_at,
    };
    let exporter = Exporter::new(&config.layout, &config.style);
    let artifacts = formats
        .iter()
        .map(|&format| exporter.export(&pages, &metadata, format))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(
        student_id = %result.student_id,
        pages = pages.len(),
        status = %summary.communication_status.label,
        "report synthesized"
    );

    Ok(Synthesis {
        summary,
        warnings,
        page_count: pages.len(),
        artifacts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use synthscore_core::model::{AnswerStatus, QuestionOutcome};

    fn sample() -> EvaluationResult {
        let rows = [
            (1, AnswerStatus::Correct, "Ball", "Motion"),
            (2, AnswerStatus::Incorrect, "Ball", "Motion"),
            (3, AnswerStatus::Correct, "2 + 4 = 6", "Arithmetic"),
            (4, AnswerStatus::Incorrect, "2 + 5 = 6", "Arithmetic"),
            (5, AnswerStatus::Incorrect, "", "Geometry"),
            (6, AnswerStatus::Correct, "Sphere", "Geometry"),
        ];
        let questions = rows
            .into_iter()
            .map(|(id, status, answer, category)| QuestionOutcome {
                id,
                status,
                master_key: format!("Expected answer for question {id}"),
                student_answer: answer.into(),
                logic: "Explanation of the grading decision for this question.".into(),
                category: category.into(),
            })
            .collect();
        EvaluationResult::new("John Smith", "STU-001", questions)
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
    }

    #[test]
    fn synthesizes_both_formats() {
        let config = SynthscoreConfig::default();
        let out = synthesize(
            &sample(),
            &config,
            &[ExportFormat::Pdf, ExportFormat::Text],
            at(),
        )
        .unwrap();

        assert_eq!(out.summary.correct_count, 3);
        assert_eq!(
            out.summary.communication_status.label,
            "Appreciation Sent (50.0%)"
        );
        assert!(out.page_count >= 1);
        assert_eq!(out.artifacts.len(), 2);
        assert_eq!(
            out.artifacts[0].file_name,
            "evaluation-report-john-smith-2026-10-19T093000.pdf"
        );
        let text = String::from_utf8(out.artifacts[1].bytes.clone()).unwrap();
        assert!(text.contains("No answer provided"));
    }

    #[test]
    fn repeated_exports_are_identical() {
        let config = SynthscoreConfig::default();
        let a = synthesize(&sample(), &config, &[ExportFormat::Pdf], at()).unwrap();
        let b = synthesize(&sample(), &config, &[ExportFormat::Pdf], at()).unwrap();
        assert_eq!(a.artifacts, b.artifacts);
    }

    #[test]
    fn invalid_result_is_rejected_before_export() {
        let mut result = sample();
        result.total_score = 7;
        let err = synthesize(&result, &SynthscoreConfig::default(), &[ExportFormat::Pdf], at())
            .unwrap_err();
        assert!(err.is_invalid_result());
    }

    #[test]
    fn layout_config_is_checked_before_layout() {
        let mut config = SynthscoreConfig::default();
        config.layout.margin = 200.0;
        let err = synthesize(&sample(), &config, &[ExportFormat::Pdf], at()).unwrap_err();
        assert!(matches!(err, ReportError::InvalidLayout { .. }));
        assert_eq!(err.stage(), synthscore_core::error::Stage::Layout);
        assert_eq!(err.student_id(), "STU-001");
    }

    #[test]
    fn oversized_panel_is_a_layout_error() {
        let mut result = sample();
        result.questions[3].logic = "word ".repeat(5_000);
        let err = synthesize(&result, &SynthscoreConfig::default(), &[ExportFormat::Text], at())
            .unwrap_err();
        assert_eq!(err.question_id(), Some(4));
    }

    #[test]
    fn independent_exports_run_in_parallel() {
        let config = SynthscoreConfig::default();
        let expected = synthesize(&sample(), &config, &[ExportFormat::Pdf], at()).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| synthesize(&sample(), &config, &[ExportFormat::Pdf], at()))
                })
                .collect();
            for handle in handles {
                let out = handle.join().unwrap().unwrap();
                assert_eq!(out.artifacts, expected.artifacts);
            }
        });
    }
}
