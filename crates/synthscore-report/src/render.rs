//! Maps laid-out blocks to drawing primitives.
//!
//! Rendering reads the `(page, x, y)` already assigned by the layout engine
//! and the lines wrapped at composition time. It never re-measures or
//! re-wraps, so what is drawn is exactly what was paginated.

use synthscore_core::layout::{
    Block, HeaderBlock, LayoutConfig, Page, PlacedBlock, QuestionPanel, SummaryBlock,
    PANEL_FIELD_LABEL, PANEL_HEADER, PANEL_INDENT, PANEL_SPACING,
};
use synthscore_core::model::AnswerStatus;

use crate::style::{Rgb, StyleConfig};

/// Typeface weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

/// One drawing primitive in page coordinates (millimetres, y down).
///
/// Text positions are baselines.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        color: Rgb,
        text: String,
    },
    Paragraph {
        x: f32,
        y: f32,
        size: f32,
        line_height: f32,
        color: Rgb,
        lines: Vec<String>,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
        color: Rgb,
    },
}

/// The drawing primitives for one page, in placement order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub number: usize,
    pub ops: Vec<DrawOp>,
}

/// Turns pages into drawing primitives under an explicit style.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    layout: &'a LayoutConfig,
    style: &'a StyleConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(layout: &'a LayoutConfig, style: &'a StyleConfig) -> Self {
        Self { layout, style }
    }

    pub fn render(&self, page: &Page) -> RenderedPage {
        let mut ops = Vec::new();
        for placed in &page.blocks {
            self.render_block(placed, &mut ops);
        }
        RenderedPage {
            number: page.number,
            ops,
        }
    }

    fn render_block(&self, placed: &PlacedBlock, ops: &mut Vec<DrawOp>) {
        match &placed.block {
            Block::Header(header) => self.header(placed, header, ops),
            Block::Summary(summary) => self.summary(placed, summary, ops),
            Block::Section(title) => ops.push(self.text(
                placed.x,
                placed.y + 7.0,
                self.style.heading_size,
                Font::Bold,
                self.style.text,
                title,
            )),
            Block::Question(panel) => self.question(placed, panel, ops),
        }
    }

    fn header(&self, placed: &PlacedBlock, header: &HeaderBlock, ops: &mut Vec<DrawOp>) {
        let s = self.style;
        let (x, y) = (placed.x, placed.y);
        ops.push(self.text(x, y + 8.0, s.title_size, Font::Bold, s.text, &header.title));
        ops.push(self.text(x, y + 17.0, s.body_size, Font::Regular, s.text, &header.student_line));
        ops.push(self.text(x, y + 24.0, s.body_size, Font::Regular, s.text, &header.score_line));
        ops.push(self.text(x, y + 31.0, s.body_size, Font::Regular, s.muted, &header.status_line));
    }

    fn summary(&self, placed: &PlacedBlock, summary: &SummaryBlock, ops: &mut Vec<DrawOp>) {
        let s = self.style;
        let (x, y) = (placed.x, placed.y);
        let gap = 5.0;
        let width = (self.layout.column_width - gap) / 2.0;

        ops.push(self.text(x, y + 7.0, s.heading_size, Font::Bold, s.text, &summary.title));

        let regions = [
            (x, AnswerStatus::Correct, format!("{} Correct", summary.correct)),
            (
                x + width + gap,
                AnswerStatus::Incorrect,
                format!("{} Incorrect", summary.incorrect),
            ),
        ];
        for (rx, status, label) in regions {
            ops.push(DrawOp::FillRect {
                x: rx,
                y: y + 12.0,
                width,
                height: 20.0,
                color: s.status_fill(status),
            });
            ops.push(self.text(
                rx + 5.0,
                y + 24.0,
                s.body_size,
                Font::Bold,
                s.status_color(status),
                &label,
            ));
        }
    }

    fn question(&self, placed: &PlacedBlock, panel: &QuestionPanel, ops: &mut Vec<DrawOp>) {
        let s = self.style;
        let (x, y) = (placed.x, placed.y);
        let inner_x = x + PANEL_INDENT;
        let right = x + self.layout.column_width - PANEL_INDENT;

        ops.push(DrawOp::StrokeRect {
            x,
            y,
            width: self.layout.column_width,
            height: placed.height - PANEL_SPACING,
            line_width: 0.3,
            color: s.rule,
        });

        ops.push(self.text(inner_x, y + 7.0, s.body_size, Font::Bold, s.text, &panel.title()));

        let token = panel.status.token();
        let token_width = s.measure(token, s.body_size, self.layout.char_width);
        ops.push(self.text(
            right - token_width,
            y + 7.0,
            s.body_size,
            Font::Bold,
            s.status_color(panel.status),
            token,
        ));

        ops.push(self.text(
            inner_x,
            y + 13.0,
            s.detail_size,
            Font::Regular,
            s.muted,
            &format!("Category: {}", panel.category),
        ));

        let line_height = self.layout.line_height;
        let mut cursor = y + PANEL_HEADER;
        for field in &panel.fields {
            ops.push(self.text(
                inner_x,
                cursor + PANEL_FIELD_LABEL - 1.0,
                s.detail_size,
                Font::Bold,
                s.text,
                field.kind.label(),
            ));

            let (lines, color) = if field.is_unanswered() {
                (vec![s.no_answer_placeholder.clone()], s.muted)
            } else {
                (field.lines.clone(), s.text)
            };
            if !lines.is_empty() {
                ops.push(DrawOp::Paragraph {
                    x: inner_x,
                    y: cursor + PANEL_FIELD_LABEL + line_height - 1.0,
                    size: s.detail_size,
                    line_height,
                    color,
                    lines,
                });
            }

            cursor += field.height(self.layout);
        }
    }

    fn text(&self, x: f32, y: f32, size: f32, font: Font, color: Rgb, text: &str) -> DrawOp {
        DrawOp::Text {
            x,
            y,
            size,
            font,
            color,
            text: text.to_string(),
        }
    }
}
