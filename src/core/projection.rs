//! Financial projections over the planning table.
//!
//! Donations bring money in; every planned activity costs its points converted to
//! CHF. All totals are plain folds over the assembled rows and the edit buffer and
//! are guaranteed to be finite.

use crate::core::buffer::EditBuffer;
use crate::core::rows::{PlanRow, RowId};
use crate::models::GamificationParameter;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The two projected totals shown under the planning table
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Net balance in CHF: donations minus the full cost of all planned activities
    pub total_balance: f64,
    /// Net balance counting only the club's cost share of each activity
    pub total_balance_with_cost_share: f64,
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Divisor converting points to CHF; falls back to 1 when unset, zero or not finite.
#[must_use]
pub fn points_per_chf(parameter: Option<&GamificationParameter>) -> f64 {
    match parameter.map(|p| p.points_per_chf) {
        Some(rate) if rate.is_finite() && rate != 0.0 => rate,
        _ => 1.0,
    }
}

/// CHF contribution of one row before the cost-share scaling.
///
/// Positive for the donation row, negative for plan rows.
#[must_use]
pub fn row_contribution(row: &PlanRow, buffer: &EditBuffer, divisor: f64) -> f64 {
    let entry = buffer.read(row.id);
    let volume = finite_or_zero(entry.amount) * finite_or_zero(entry.amount_per_activity);
    let chf = volume * finite_or_zero(row.points) / divisor;
    if row.is_donation { chf } else { -chf }
}

/// Computes both totals from the rows, the buffer and the conversion rates.
#[must_use]
pub fn project(
    rows: &[PlanRow],
    buffer: &EditBuffer,
    parameter: Option<&GamificationParameter>,
) -> Projection {
    let divisor = points_per_chf(parameter);

    let (total_balance, total_balance_with_cost_share) =
        rows.iter().fold((0.0, 0.0), |(total, shared), row| {
            let contribution = row_contribution(row, buffer, divisor);
            let club_part = if row.is_donation {
                contribution
            } else {
                contribution * finite_or_zero(row.club_cost_share) / 100.0
            };
            (total + contribution, shared + club_part)
        });

    Projection {
        total_balance: finite_or_zero(total_balance),
        total_balance_with_cost_share: finite_or_zero(total_balance_with_cost_share),
    }
}

/// Per-row points example: ephemeral counts multiplied by each row's point value.
///
/// Counts are never persisted nor reconciled; they reset whenever the row list is
/// re-derived via [`PointsExample::reset`].
#[derive(Debug, Clone, Default)]
pub struct PointsExample {
    counts: HashMap<RowId, f64>,
}

impl PointsExample {
    /// Creates an example with every count at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all counts.
    pub fn reset(&mut self) {
        self.counts.clear();
    }

    /// Sets the count for one row.
    pub fn set_count(&mut self, row: RowId, count: f64) {
        self.counts.insert(row, count);
    }

    /// Returns the count for one row, zero when unset.
    #[must_use]
    pub fn count(&self, row: RowId) -> f64 {
        self.counts.get(&row).copied().unwrap_or_default()
    }

    /// Points earned by `row` for its current count.
    #[must_use]
    pub fn row_points(&self, row: &PlanRow) -> f64 {
        finite_or_zero(finite_or_zero(self.count(row.id)) * finite_or_zero(row.points))
    }

    /// Sum of [`Self::row_points`] over all rows.
    #[must_use]
    pub fn total_points(&self, rows: &[PlanRow]) -> f64 {
        finite_or_zero(rows.iter().map(|row| self.row_points(row)).sum())
    }
}
