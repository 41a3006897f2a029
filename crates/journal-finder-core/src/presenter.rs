//! Result list plus the single "active" journal shown in the detail view.

use crate::Journal;

/// Why the detail view was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Explicit close button / key.
    Close,
    /// Click landed outside the detail view.
    OutsideClick,
    /// Global cancel (Escape).
    Cancel,
}

/// Owns the journals of one result set and tracks which one is expanded.
#[derive(Debug, Clone, Default)]
pub struct ResultPresenter {
    journals: Vec<Journal>,
    active: Option<usize>,
}

impl ResultPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the result set wholesale. Any active journal is dropped.
    pub fn set_journals(&mut self, journals: Vec<Journal>) {
        self.journals = journals;
        self.active = None;
    }

    pub fn clear(&mut self) {
        self.set_journals(Vec::new());
    }

    pub fn journals(&self) -> &[Journal] {
        &self.journals
    }

    pub fn len(&self) -> usize {
        self.journals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.journals.is_empty()
    }

    /// Make the journal at `index` active, replacing any prior one.
    /// Returns `false` (and changes nothing) if `index` is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.journals.len() {
            return false;
        }
        self.active = Some(index);
        true
    }

    /// Make the given journal active if it belongs to this result set.
    pub fn select_journal(&mut self, journal: &Journal) -> bool {
        match self.journals.iter().position(|j| j == journal) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    /// Clear the active journal. Returns `false` if nothing was active.
    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        match self.active.take() {
            Some(index) => {
                tracing::debug!(index, ?reason, "detail view dismissed");
                true
            }
            None => false,
        }
    }

    pub fn active(&self) -> Option<&Journal> {
        self.active.and_then(|i| self.journals.get(i))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// While a journal is expanded, the rest of the screen ignores input.
    pub fn interaction_locked(&self) -> bool {
        self.active.is_some()
    }
}
