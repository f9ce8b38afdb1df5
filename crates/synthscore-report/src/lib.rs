//! Drawing and exporting evaluation reports.
//!
//! Takes the pages produced by `synthscore-core`, maps each placed block to
//! drawing primitives, and serializes the result as PDF or plain text.

pub mod config;
pub mod export;
pub mod pdf;
pub mod pipeline;
pub mod render;
pub mod style;
pub mod text;
