//! Plain-text report output.

use synthscore_core::layout::{Block, Page};

use crate::export::ExportMetadata;
use crate::style::StyleConfig;

/// Write pages as plain text, one section per block, with a marker line
/// between pages.
pub fn write_text(pages: &[Page], metadata: &ExportMetadata, style: &StyleConfig) -> String {
    let mut out = String::new();

    for page in pages {
        if page.number > 1 {
            out.push_str(&format!("\n--- Page {} ---\n", page.number));
        }
        for placed in &page.blocks {
            match &placed.block {
                Block::Header(header) => {
                    let title = header.title.to_uppercase();
                    out.push_str(&title);
                    out.push('\n');
                    out.push_str(&"=".repeat(title.chars().count()));
                    out.push_str("\n\n");
                    out.push_str(&format!("{}\n", header.student_line));
                    out.push_str(&format!("{}\n", header.score_line));
                    out.push_str(&format!("{}\n", header.status_line));
                }
                Block::Summary(summary) => {
                    out.push_str(&format!("\n{}\n", summary.title.to_uppercase()));
                    out.push_str(&format!("  Correct: {}\n", summary.correct));
                    out.push_str(&format!("  Incorrect: {}\n", summary.incorrect));
                }
                Block::Section(title) => {
                    out.push_str(&format!("\n{}\n", title.to_uppercase()));
                }
                Block::Question(panel) => {
                    out.push_str(&format!("\n{}: {}\n", panel.title(), panel.status.token()));
                    out.push_str(&format!("Category: {}\n", panel.category));
                    for field in &panel.fields {
                        out.push_str(field.kind.label());
                        out.push('\n');
                        if field.is_unanswered() {
                            out.push_str(&format!("  {}\n", style.no_answer_placeholder));
                        }
                        for line in &field.lines {
                            out.push_str(&format!("  {line}\n"));
                        }
                    }
                }
            }
        }
    }

    out.push_str(&format!(
        "\nExported {} for {}\n",
        metadata.exported_at.format("%Y-%m-%d %H:%M:%S UTC"),
        metadata.student_id
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use synthscore_core::document::compose_blocks;
    use synthscore_core::layout::{layout, LayoutConfig};
    use synthscore_core::model::{AnswerStatus, EvaluationResult, QuestionOutcome};
    use synthscore_core::statistics::{aggregate, ThresholdTable};

    fn render(questions: u32, config: &LayoutConfig) -> (Vec<Page>, String) {
        let questions = (1..=questions)
            .map(|id| QuestionOutcome {
                id,
                status: if id % 2 == 0 {
                    AnswerStatus::Incorrect
                } else {
                    AnswerStatus::Correct
                },
                master_key: "Sphere is a solid shape".into(),
                student_answer: if id == 2 { String::new() } else { "Sphere".into() },
                logic: "Correct identification of a 3D solid shape".into(),
                category: "Geometry".into(),
            })
            .collect();
        let result = EvaluationResult::new("John Smith", "STU-001", questions);
        let summary = aggregate(&result, &ThresholdTable::default()).unwrap();
        let pages = layout(
            &result.student_id,
            compose_blocks(&result, &summary, config),
            config,
        )
        .unwrap();
        let meta = ExportMetadata {
            student_name: result.student_name.clone(),
            student_id: result.student_id.clone(),
            exported_at: Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap(),
        };
        let text = write_text(&pages, &meta, &StyleConfig::default());
        (pages, text)
    }

    #[test]
    fn contains_header_summary_and_questions() {
        let (_, text) = render(2, &LayoutConfig::default());
        assert!(text.starts_with("EVALUATION REPORT\n================="));
        assert!(text.contains("Student: John Smith (STU-001)"));
        assert!(text.contains("Score: 1 / 2 (50.0%)"));
        assert!(text.contains("  Correct: 1"));
        assert!(text.contains("Question 2: INCORRECT"));
        assert!(text.contains("Student Answer:\n  No answer provided"));
    }

    #[test]
    fn panel_titles_match_rendered_panels() {
        let config = LayoutConfig::default();
        let questions = [12, 3]
            .into_iter()
            .map(|id| QuestionOutcome {
                id,
                status: AnswerStatus::Correct,
                master_key: "Sphere is a solid shape".into(),
                student_answer: "Sphere".into(),
                logic: "Correct identification of a 3D solid shape".into(),
                category: "Geometry".into(),
            })
            .collect();
        let result = EvaluationResult::new("John Smith", "STU-001", questions);
        let summary = aggregate(&result, &ThresholdTable::default()).unwrap();
        let pages = layout(
            &result.student_id,
            compose_blocks(&result, &summary, &config),
            &config,
        )
        .unwrap();
        let meta = ExportMetadata {
            student_name: result.student_name.clone(),
            student_id: result.student_id.clone(),
            exported_at: Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap(),
        };
        let text = write_text(&pages, &meta, &StyleConfig::default());
        assert!(text.contains("Question 1 (ID 12): CORRECT"));
        assert!(text.contains("Question 2 (ID 3): CORRECT"));
    }

    #[test]
    fn marks_page_breaks() {
        let config = LayoutConfig {
            page_content_height: 160.0,
            ..LayoutConfig::default()
        };
        let (pages, text) = render(6, &config);
        assert!(pages.len() > 1);
        assert!(text.contains("--- Page 2 ---"));
    }
}
