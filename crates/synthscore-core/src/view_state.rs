//! Expand/collapse state for the interactive question list.
//!
//! This is dashboard session state. The export pipeline never reads it, so a
//! printed report always shows every panel in full.

use std::collections::BTreeSet;

use crate::model::EvaluationResult;

/// Tracks which question panels are open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelViewState {
    expanded: BTreeSet<u32>,
}

impl PanelViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, question_id: u32) -> bool {
        self.expanded.contains(&question_id)
    }

    pub fn expand(&mut self, question_id: u32) {
        self.expanded.insert(question_id);
    }

    pub fn collapse(&mut self, question_id: u32) {
        self.expanded.remove(&question_id);
    }

    /// Flip a panel and return its new state.
    pub fn toggle(&mut self, question_id: u32) -> bool {
        if self.expanded.remove(&question_id) {
            false
        } else {
            self.expanded.insert(question_id);
            true
        }
    }

    pub fn expand_all(&mut self, result: &EvaluationResult) {
        self.expanded.extend(result.questions.iter().map(|q| q.id));
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Expanded question ids, ascending.
    pub fn expanded(&self) -> impl Iterator<Item = u32> + '_ {
        self.expanded.iter().copied()
    }
}
