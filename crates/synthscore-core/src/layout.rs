//! Greedy single-axis pagination.
//!
//! Blocks are placed top to bottom in input order. A block that does not fit
//! in the space left on the current page moves, whole, to a fresh page. Blocks
//! are never split, and a block taller than an empty page is an error.
//!
//! All lengths are millimetres measured from the top-left corner of the page.

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::model::AnswerStatus;

/// Height of the report header: title, student line, score line, status line.
pub const HEADER_HEIGHT: f32 = 36.0;
/// Height of the summary block: title row plus the count regions.
pub const SUMMARY_HEIGHT: f32 = 40.0;
/// Height of a one-line section heading.
pub const SECTION_HEIGHT: f32 = 10.0;

/// Offset of the first field label below the top edge of a question panel.
pub const PANEL_HEADER: f32 = 16.0;
/// Height of each field label row.
pub const PANEL_FIELD_LABEL: f32 = 5.0;
/// Space after each field's text.
pub const PANEL_FIELD_GAP: f32 = 2.0;
/// Inner space between the last field and the panel border.
pub const PANEL_BOTTOM: f32 = 3.0;
/// Space between the panel border and whatever follows it.
pub const PANEL_SPACING: f32 = 5.0;
/// Horizontal inset of panel text from the panel border.
pub const PANEL_INDENT: f32 = 5.0;

/// Page geometry and text metrics that drive pagination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Full page width.
    pub page_width: f32,
    /// Full page height; content runs from `margin` to `page_content_height - margin`.
    pub page_content_height: f32,
    /// Top, bottom and left margin.
    pub margin: f32,
    /// Width available to block content.
    pub column_width: f32,
    /// Vertical advance per wrapped line.
    pub line_height: f32,
    /// Average glyph advance at body size, used to measure words.
    pub char_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_content_height: 297.0,
            margin: 15.0,
            column_width: 180.0,
            line_height: 5.0,
            char_width: 1.8,
        }
    }
}

impl LayoutConfig {
    /// Height an empty page offers to blocks.
    pub fn usable_height(&self) -> f32 {
        self.page_content_height - 2.0 * self.margin
    }

    /// Lowest y a block may extend to.
    pub fn bottom_limit(&self) -> f32 {
        self.page_content_height - self.margin
    }

    /// Wrap width for text inside a question panel.
    pub fn panel_text_width(&self) -> f32 {
        self.column_width - 2.0 * PANEL_INDENT
    }

    /// Reject geometry that cannot hold any content.
    pub fn validate(&self) -> anyhow::Result<()> {
        let fields = [
            ("page width", self.page_width),
            ("page content height", self.page_content_height),
            ("margin", self.margin),
            ("column width", self.column_width),
            ("line height", self.line_height),
            ("char width", self.char_width),
        ];
        for (name, value) in fields {
            anyhow::ensure!(value.is_finite(), "{name} must be a finite number");
        }
        anyhow::ensure!(self.page_width > 0.0, "page width must be positive");
        anyhow::ensure!(self.margin >= 0.0, "margin must not be negative");
        anyhow::ensure!(
            self.margin + self.column_width <= self.page_width,
            "column width {} does not fit a page {} wide with a margin of {}",
            self.column_width,
            self.page_width,
            self.margin
        );
        anyhow::ensure!(
            self.usable_height() > 0.0,
            "page content height {} leaves no room inside margins of {}",
            self.page_content_height,
            self.margin
        );
        anyhow::ensure!(
            self.panel_text_width() > 0.0,
            "column width {} is narrower than the panel insets",
            self.column_width
        );
        anyhow::ensure!(self.line_height > 0.0, "line height must be positive");
        anyhow::ensure!(self.char_width > 0.0, "char width must be positive");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Word wrap
// ---------------------------------------------------------------------------

/// Width of `s` under the fixed-advance measure.
pub fn text_width(s: &str, char_width: f32) -> f32 {
    s.chars().count() as f32 * char_width
}

/// Wrap `text` to `column_width`.
///
/// Newlines are hard breaks. Within a paragraph words accumulate while the
/// line still fits; a word wider than the column gets a line of its own.
/// Blank text wraps to no lines at all.
pub fn wrap_text(text: &str, column_width: f32, char_width: f32) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .flat_map(|p| wrap_paragraph(p.trim_end_matches('\r'), column_width, char_width))
        .collect()
}

/// Wrap lines that were already wrapped. At the same width this returns
/// `lines` unchanged.
pub fn rewrap(lines: &[String], column_width: f32, char_width: f32) -> Vec<String> {
    lines
        .iter()
        .flat_map(|l| wrap_paragraph(l, column_width, char_width))
        .collect()
}

fn wrap_paragraph(paragraph: &str, column_width: f32, char_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate_width = text_width(&current, char_width) + char_width + text_width(word, char_width);
        if candidate_width <= column_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    lines.push(current);
    lines
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// A unit of document content with a known height, placed atomically.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Header(HeaderBlock),
    Summary(SummaryBlock),
    Section(String),
    Question(QuestionPanel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBlock {
    pub title: String,
    pub student_line: String,
    pub score_line: String,
    pub status_line: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryBlock {
    pub title: String,
    pub correct: u32,
    pub incorrect: u32,
}

/// A question rendered as a bordered panel with three wrapped fields.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPanel {
    /// 1-based position in presentation order.
    pub ordinal: usize,
    pub question_id: u32,
    pub status: AnswerStatus,
    pub category: String,
    pub fields: Vec<PanelField>,
}

impl QuestionPanel {
    /// Wrapped rows across all fields. Empty fields still reserve one row.
    pub fn row_count(&self) -> usize {
        self.fields.iter().map(PanelField::row_count).sum()
    }

    /// `Question <ordinal>`, with the question id appended when it differs.
    pub fn title(&self) -> String {
        if self.ordinal == self.question_id as usize {
            format!("Question {}", self.ordinal)
        } else {
            format!("Question {} (ID {})", self.ordinal, self.question_id)
        }
    }
}

/// Which text a panel field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    MasterKey,
    StudentAnswer,
    Logic,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::MasterKey => "Master Key:",
            FieldKind::StudentAnswer => "Student Answer:",
            FieldKind::Logic => "Logic:",
        }
    }
}

/// A labelled field with its text already wrapped to the panel width.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelField {
    pub kind: FieldKind,
    pub lines: Vec<String>,
}

impl PanelField {
    pub fn new(kind: FieldKind, text: &str, config: &LayoutConfig) -> Self {
        Self {
            kind,
            lines: wrap_text(text, config.panel_text_width(), config.char_width),
        }
    }

    pub fn row_count(&self) -> usize {
        self.lines.len().max(1)
    }

    /// An answer field with no visible text. Drawn with the placeholder.
    pub fn is_unanswered(&self) -> bool {
        self.kind == FieldKind::StudentAnswer && self.lines.is_empty()
    }

    pub fn height(&self, config: &LayoutConfig) -> f32 {
        PANEL_FIELD_LABEL + self.row_count() as f32 * config.line_height + PANEL_FIELD_GAP
    }
}

/// Fixed part of a question panel's height, independent of its text.
pub fn panel_padding(field_count: usize) -> f32 {
    PANEL_HEADER
        + field_count as f32 * (PANEL_FIELD_LABEL + PANEL_FIELD_GAP)
        + PANEL_BOTTOM
        + PANEL_SPACING
}

impl Block {
    /// Vertical space this block needs, including trailing spacing.
    pub fn height(&self, config: &LayoutConfig) -> f32 {
        match self {
            Block::Header(_) => HEADER_HEIGHT,
            Block::Summary(_) => SUMMARY_HEIGHT,
            Block::Section(_) => SECTION_HEIGHT,
            Block::Question(panel) => {
                panel.row_count() as f32 * config.line_height + panel_padding(panel.fields.len())
            }
        }
    }

    pub fn question_id(&self) -> Option<u32> {
        match self {
            Block::Question(panel) => Some(panel.question_id),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// A block with its resolved page and position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    /// 1-based page number.
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub height: f32,
    pub block: Block,
}

/// An ordered container of placed blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub blocks: Vec<PlacedBlock>,
}

impl Page {
    /// Bottom edge of the last block on the page.
    pub fn content_bottom(&self) -> Option<f32> {
        self.blocks.last().map(|b| b.y + b.height)
    }
}

/// Stateful cursor that assigns blocks to pages.
///
/// Each engine owns its cursor; independent documents use independent engines.
#[derive(Debug)]
pub struct LayoutEngine {
    config: LayoutConfig,
    student_id: String,
    pages: Vec<Page>,
    cursor: f32,
}

impl LayoutEngine {
    pub fn new(student_id: impl Into<String>, config: LayoutConfig) -> Self {
        Self {
            cursor: config.margin,
            config,
            student_id: student_id.into(),
            pages: Vec::new(),
        }
    }

    /// Place `block` on the current page, or on a new page when it does not fit.
    pub fn place(&mut self, block: Block) -> Result<(), ReportError> {
        let height = block.height(&self.config);
        let available = self.config.usable_height();

        if height > available {
            return Err(ReportError::LayoutOverflow {
                student_id: self.student_id.clone(),
                question_id: block.question_id(),
                required: height,
                available,
            });
        }

        if self.pages.is_empty() || self.cursor + height > self.config.bottom_limit() {
            self.open_page();
        }

        let page_number = self.pages.len();
        let y = self.cursor;
        tracing::trace!(page = page_number, y, height, "placed block");

        if let Some(page) = self.pages.last_mut() {
            page.blocks.push(PlacedBlock {
                page: page_number,
                x: self.config.margin,
                y,
                height,
                block,
            });
        }
        self.cursor += height;
        Ok(())
    }

    fn open_page(&mut self) {
        if let Some(bottom) = self.pages.last().and_then(Page::content_bottom) {
            tracing::debug!(
                page = self.pages.len(),
                wasted = self.config.bottom_limit() - bottom,
                "page break"
            );
        }
        self.pages.push(Page {
            number: self.pages.len() + 1,
            blocks: Vec::new(),
        });
        self.cursor = self.config.margin;
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }
}

/// Lay out `blocks` in order and return the resulting pages.
pub fn layout(
    student_id: &str,
    blocks: Vec<Block>,
    config: &LayoutConfig,
) -> Result<Vec<Page>, ReportError> {
    let mut engine = LayoutEngine::new(student_id, *config);
    for block in blocks {
        engine.place(block)?;
    }
    let pages = engine.finish();
    tracing::debug!(student_id, pages = pages.len(), "layout complete");
    Ok(pages)
}
