//! Result model, aggregation, and pagination for synthscore.
//!
//! This crate turns a finished evaluation result into summary statistics and
//! a deterministic sequence of laid-out pages. Drawing and file output live in
//! `synthscore-report`.

pub mod document;
pub mod error;
pub mod layout;
pub mod model;
pub mod notification;
pub mod parser;
pub mod statistics;
pub mod view_state;
