//! Explicit presentation settings passed to the renderer.

use serde::{Deserialize, Serialize};

use synthscore_core::model::AnswerStatus;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components scaled to `0.0..=1.0`.
    pub fn unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

/// Fonts, sizes, palette and fixed strings used when drawing a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub title_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    /// Size of panel text; the layout's `char_width` is measured at this size.
    pub detail_size: f32,
    pub text: Rgb,
    pub muted: Rgb,
    pub rule: Rgb,
    pub correct_fill: Rgb,
    pub correct_text: Rgb,
    pub incorrect_fill: Rgb,
    pub incorrect_text: Rgb,
    /// Shown in place of an empty student answer.
    pub no_answer_placeholder: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            title_size: 20.0,
            heading_size: 14.0,
            body_size: 12.0,
            detail_size: 10.0,
            text: Rgb(40, 40, 40),
            muted: Rgb(107, 114, 128),
            rule: Rgb(200, 200, 200),
            correct_fill: Rgb(220, 252, 231),
            correct_text: Rgb(22, 163, 74),
            incorrect_fill: Rgb(254, 226, 226),
            incorrect_text: Rgb(220, 38, 38),
            no_answer_placeholder: "No answer provided".to_string(),
        }
    }
}

impl StyleConfig {
    /// Text color for a status token.
    pub fn status_color(&self, status: AnswerStatus) -> Rgb {
        match status {
            AnswerStatus::Correct => self.correct_text,
            AnswerStatus::Incorrect => self.incorrect_text,
        }
    }

    /// Background color for a status region.
    pub fn status_fill(&self, status: AnswerStatus) -> Rgb {
        match status {
            AnswerStatus::Correct => self.correct_fill,
            AnswerStatus::Incorrect => self.incorrect_fill,
        }
    }

    /// Approximate width of `text` at `size`, given the advance measured at
    /// `detail_size`.
    pub fn measure(&self, text: &str, size: f32, char_width: f32) -> f32 {
        synthscore_core::layout::text_width(text, char_width) * size / self.detail_size
    }
}
