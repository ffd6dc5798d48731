//! State holders for the question view.
//!
//! Both stores are plain data owned by [`App`](super::App). They never
//! trigger work themselves; the caller decides what an update implies.

use crate::domain::{DisclosureSet, FilterCriteria, FilterField, QuestionId};

/// Holds the current filter criteria.
///
/// Every update bumps `revision`, so observers can tell that the criteria
/// were written even when the new value equals the old one.
#[derive(Debug, Default)]
pub struct FilterStore {
    criteria: FilterCriteria,
    revision: u64,
}

impl FilterStore {
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces one field of the criteria and returns the new revision.
    ///
    /// Values are not checked against the known options.
    pub fn set_field(&mut self, field: FilterField, value: Option<String>) -> u64 {
        tracing::debug!(field = field.query_key(), value = ?value, "filter updated");
        self.criteria.set(field, value);
        self.revision += 1;
        self.revision
    }
}

/// Holds the set of revealed answers for the session.
#[derive(Debug, Default)]
pub struct DisclosureStore {
    set: DisclosureSet,
}

impl DisclosureStore {
    pub fn toggle(&mut self, id: &QuestionId) -> bool {
        let revealed = self.set.toggle(id);
        tracing::debug!(question = %id, revealed, "disclosure toggled");
        revealed
    }

    pub fn is_revealed(&self, id: &QuestionId) -> bool {
        self.set.is_revealed(id)
    }

    pub fn revealed_count(&self) -> usize {
        self.set.len()
    }
}
