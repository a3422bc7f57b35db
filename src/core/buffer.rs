//! Local edit buffer for the planning table.
//!
//! Holds unsaved numeric edits per row, independent of the authoritative plans.
//! Fresh authoritative values only replace a buffer entry while the user has not
//! diverged from the previously delivered values; an in-flight edit survives refreshes.

use crate::core::rows::{EditField, RowId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// The two editable fields of one row
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BufferEntry {
    /// Planned activity count
    pub amount: f64,
    /// Planned multiplier per activity
    pub amount_per_activity: f64,
}

impl BufferEntry {
    /// Creates an entry from both field values.
    #[must_use]
    pub const fn new(amount: f64, amount_per_activity: f64) -> Self {
        Self {
            amount,
            amount_per_activity,
        }
    }

    /// Returns the value of one field.
    #[must_use]
    pub const fn get(&self, field: EditField) -> f64 {
        match field {
            EditField::Amount => self.amount,
            EditField::AmountPerActivity => self.amount_per_activity,
        }
    }

    // Exact comparison: a user edit is anything that changed the stored bits.
    #[allow(clippy::float_cmp)]
    fn matches(&self, other: &Self) -> bool {
        self.amount == other.amount && self.amount_per_activity == other.amount_per_activity
    }
}

/// Per-row edit state plus the last authoritative values seen for each plan
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
    entries: HashMap<RowId, BufferEntry>,
    authoritative: HashMap<i64, BufferEntry>,
}

impl EditBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a zero-valued entry for `row` unless one already exists.
    pub fn ensure_entry(&mut self, row: RowId) {
        self.entries.entry(row).or_default();
    }

    /// Merges fresh authoritative values for a plan into the buffer.
    ///
    /// The entry is replaced when it is absent, when no authoritative values were
    /// recorded for the plan yet, or when both fields still equal the previously
    /// recorded authoritative values. Otherwise the user's edit is kept. The new
    /// values are recorded as the previous authoritative values either way.
    pub fn reconcile(&mut self, plan_id: i64, amount: f64, amount_per_activity: f64) {
        let row = RowId::Plan(plan_id);
        let fresh = BufferEntry::new(amount, amount_per_activity);
        let previous = self.authoritative.insert(plan_id, fresh);

        let overwrite = match (self.entries.get(&row), previous) {
            (None, _) | (Some(_), None) => true,
            (Some(current), Some(previous)) => current.matches(&previous),
        };

        if overwrite {
            self.entries.insert(row, fresh);
        } else {
            trace!("Keeping diverged edit for row {}", row);
        }
    }

    /// Overwrites the amount of `row`, creating the entry if needed.
    pub fn set_amount(&mut self, row: RowId, value: f64) {
        self.set(row, EditField::Amount, value);
    }

    /// Overwrites the amount per activity of `row`, creating the entry if needed.
    pub fn set_amount_per_activity(&mut self, row: RowId, value: f64) {
        self.set(row, EditField::AmountPerActivity, value);
    }

    /// Overwrites one field of `row`; no validation is applied.
    pub fn set(&mut self, row: RowId, field: EditField, value: f64) {
        let entry = self.entries.entry(row).or_default();
        match field {
            EditField::Amount => entry.amount = value,
            EditField::AmountPerActivity => entry.amount_per_activity = value,
        }
    }

    /// Returns the entry for `row`, or a zero-valued entry when none exists.
    #[must_use]
    pub fn read(&self, row: RowId) -> BufferEntry {
        self.entries.get(&row).copied().unwrap_or_default()
    }

    /// Returns true when an entry exists for `row`.
    #[must_use]
    pub fn contains(&self, row: RowId) -> bool {
        self.entries.contains_key(&row)
    }

    /// Drops entries and recorded authoritative values for plans not in `live_plans`.
    /// The donation entry is never removed.
    pub fn retain_plans(&mut self, live_plans: &[i64]) {
        self.entries.retain(|row, _| match row {
            RowId::Donation => true,
            RowId::Plan(id) => live_plans.contains(id),
        });
        self.authoritative.retain(|id, _| live_plans.contains(id));
    }

    /// Number of rows with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the buffer has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
