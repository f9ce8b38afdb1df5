//! Turns an aggregated result into the ordered block sequence of a report.

use crate::layout::{
    Block, FieldKind, HeaderBlock, LayoutConfig, PanelField, QuestionPanel, SummaryBlock,
};
use crate::model::EvaluationResult;
use crate::statistics::Summary;

pub const REPORT_TITLE: &str = "Evaluation Report";
pub const SUMMARY_TITLE: &str = "Summary";
pub const DETAIL_TITLE: &str = "Detailed Analysis";

/// Build the report blocks: header, summary, section heading, then one panel
/// per question in presentation order.
///
/// Field text is wrapped here, once, so every block knows its height before
/// layout.
pub fn compose_blocks(
    result: &EvaluationResult,
    summary: &Summary,
    config: &LayoutConfig,
) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(result.questions.len() + 3);

    blocks.push(Block::Header(HeaderBlock {
        title: REPORT_TITLE.to_string(),
        student_line: format!("Student: {} ({})", result.student_name, result.student_id),
        score_line: format!(
            "Score: {} / {} ({:.1}%)",
            result.total_score, result.total_questions, summary.percentage
        ),
        status_line: format!("Status: {}", summary.communication_status.label),
    }));

    blocks.push(Block::Summary(SummaryBlock {
        title: SUMMARY_TITLE.to_string(),
        correct: summary.correct_count,
        incorrect: summary.incorrect_count,
    }));

    blocks.push(Block::Section(DETAIL_TITLE.to_string()));

    for (idx, q) in result.questions.iter().enumerate() {
        blocks.push(Block::Question(QuestionPanel {
            ordinal: idx + 1,
            question_id: q.id,
            status: q.status,
            category: q.category.clone(),
            fields: vec![
                PanelField::new(FieldKind::MasterKey, &q.master_key, config),
                PanelField::new(FieldKind::StudentAnswer, &q.student_answer, config),
                PanelField::new(FieldKind::Logic, &q.logic, config),
            ],
        }));
    }

    blocks
}
