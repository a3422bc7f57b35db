//! The annual planning component.
//!
//! [`AnnualPlanner`] owns the edit buffer, the assembled rows and the derived
//! totals. Snapshots from the data source and local edits both mutate it
//! synchronously, and every mutation recomputes the totals before returning.
//! Commits do not talk to the data source: they produce a [`PlanUpdate`] that the
//! caller dispatches (see [`crate::core::sync`]).

use crate::core::buffer::{BufferEntry, EditBuffer};
use crate::core::projection::{PointsExample, Projection, project};
use crate::core::rows::{EditField, PlanRow, RowId, assemble_rows};
use crate::errors::{Error, Result};
use crate::models::{AnnualPlan, GamificationParameter};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A field-scoped update request for one annual plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanUpdate {
    /// Backing annual plan id
    pub plan_id: i64,
    /// The single field being written
    pub patch: PlanPatch,
}

/// Exactly one field of an annual plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlanPatch {
    /// New planned activity count
    Amount(f64),
    /// New planned multiplier per activity
    AmountPerActivity(f64),
}

impl PlanPatch {
    /// Builds the patch for `field` carrying `value`.
    #[must_use]
    pub const fn for_field(field: EditField, value: f64) -> Self {
        match field {
            EditField::Amount => Self::Amount(value),
            EditField::AmountPerActivity => Self::AmountPerActivity(value),
        }
    }

    /// The field this patch writes.
    #[must_use]
    pub const fn field(&self) -> EditField {
        match self {
            Self::Amount(_) => EditField::Amount,
            Self::AmountPerActivity(_) => EditField::AmountPerActivity,
        }
    }

    /// The value this patch writes.
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Amount(value) | Self::AmountPerActivity(value) => *value,
        }
    }
}

/// Planning view state: authoritative copies, edit buffer, rows and totals
#[derive(Debug, Clone)]
pub struct AnnualPlanner {
    plans: Vec<AnnualPlan>,
    parameter: Option<GamificationParameter>,
    buffer: EditBuffer,
    rows: Vec<PlanRow>,
    projection: Projection,
    example: PointsExample,
}

impl Default for AnnualPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnualPlanner {
    /// Creates an empty planner holding only the donation row.
    #[must_use]
    pub fn new() -> Self {
        let mut buffer = EditBuffer::new();
        buffer.ensure_entry(RowId::Donation);

        let mut planner = Self {
            plans: Vec::new(),
            parameter: None,
            buffer,
            rows: Vec::new(),
            projection: Projection::default(),
            example: PointsExample::new(),
        };
        planner.rebuild_rows();
        planner
    }

    /// Applies a fresh list of plans from the data source.
    ///
    /// Seeds missing buffer entries, reconciles existing ones, re-assembles the rows
    /// and recomputes the totals.
    pub fn apply_plans(&mut self, plans: Vec<AnnualPlan>) {
        debug!("Applying snapshot with {} annual plans", plans.len());

        let live: Vec<i64> = plans.iter().map(|plan| plan.id).collect();
        self.buffer.retain_plans(&live);

        for plan in &plans {
            self.buffer.ensure_entry(RowId::Plan(plan.id));
            self.buffer
                .reconcile(plan.id, plan.amount, plan.amount_per_activity);
        }

        self.plans = plans;
        self.rebuild_rows();
    }

    /// Replaces the gamification parameter (or clears it).
    pub fn apply_parameter(&mut self, parameter: Option<GamificationParameter>) {
        self.parameter = parameter;
        self.rebuild_rows();
    }

    /// The assembled rows, donation row first.
    #[must_use]
    pub fn rows(&self) -> &[PlanRow] {
        &self.rows
    }

    /// Looks up a row by id.
    #[must_use]
    pub fn row(&self, row: RowId) -> Option<&PlanRow> {
        self.rows.iter().find(|candidate| candidate.id == row)
    }

    /// The current totals.
    #[must_use]
    pub const fn projection(&self) -> Projection {
        self.projection
    }

    /// The current gamification parameter, if any.
    #[must_use]
    pub const fn parameter(&self) -> Option<&GamificationParameter> {
        self.parameter.as_ref()
    }

    /// The authoritative plans of the last snapshot.
    #[must_use]
    pub fn plans(&self) -> &[AnnualPlan] {
        &self.plans
    }

    /// Buffered values of `row`, zero when the row is unknown.
    #[must_use]
    pub fn read(&self, row: RowId) -> BufferEntry {
        self.buffer.read(row)
    }

    /// Buffers a new amount for `row`.
    pub fn set_amount(&mut self, row: RowId, value: f64) {
        self.set_field(row, EditField::Amount, value);
    }

    /// Buffers a new amount per activity for `row`.
    pub fn set_amount_per_activity(&mut self, row: RowId, value: f64) {
        self.set_field(row, EditField::AmountPerActivity, value);
    }

    /// Buffers a new value for one field of `row` and recomputes the totals.
    pub fn set_field(&mut self, row: RowId, field: EditField, value: f64) {
        self.buffer.set(row, field, value);
        self.recompute();
    }

    /// Commits the buffered amount of `row`.
    pub fn commit_amount(&self, row: RowId) -> Result<Option<PlanUpdate>> {
        self.commit(row, EditField::Amount)
    }

    /// Commits the buffered amount per activity of `row`.
    pub fn commit_amount_per_activity(&self, row: RowId) -> Result<Option<PlanUpdate>> {
        self.commit(row, EditField::AmountPerActivity)
    }

    /// Builds the update request for one buffered field.
    ///
    /// Returns `Ok(None)` for the donation row, which is never persisted. Fails
    /// without touching the buffer when the value is not a number or the row has no
    /// backing plan.
    pub fn commit(&self, row: RowId, field: EditField) -> Result<Option<PlanUpdate>> {
        let RowId::Plan(_) = row else {
            debug!("Ignoring commit of {} on the donation row", field);
            return Ok(None);
        };

        let Some(plan) = self.row(row).and_then(|r| r.plan.as_ref()) else {
            warn!("Cannot commit {} for row {}: no backing annual plan", field, row);
            return Err(Error::MissingBackingPlan { row });
        };

        let value = self.buffer.read(row).get(field);
        if !value.is_finite() {
            warn!("Cannot commit {} for row {}: {} is not a number", field, row, value);
            return Err(Error::InvalidNumber { row, field, value });
        }

        Ok(Some(PlanUpdate {
            plan_id: plan.id,
            patch: PlanPatch::for_field(field, value),
        }))
    }

    /// Sets the example count of `row` for the points example view.
    pub fn set_example_count(&mut self, row: RowId, count: f64) {
        self.example.set_count(row, count);
    }

    /// Points of `row` in the points example view.
    #[must_use]
    pub fn example_points(&self, row: RowId) -> f64 {
        self.row(row)
            .map_or(0.0, |r| self.example.row_points(r))
    }

    /// Grand total of the points example view.
    #[must_use]
    pub fn example_total(&self) -> f64 {
        self.example.total_points(&self.rows)
    }

    fn rebuild_rows(&mut self) {
        self.rows = assemble_rows(&self.plans, self.parameter.as_ref());
        self.example.reset();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.projection = project(&self.rows, &self.buffer, self.parameter.as_ref());
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{sample_parameter, sample_plan};

    fn planner_with_plan() -> AnnualPlanner {
        let mut plan = sample_plan(1, "Arbeitseinsatz", 10.0, 50.0);
        plan.amount = 2.0;
        plan.amount_per_activity = 3.0;

        let mut planner = AnnualPlanner::new();
        planner.apply_parameter(Some(sample_parameter()));
        planner.apply_plans(vec![plan]);
        planner
    }

    #[test]
    fn test_new_planner_has_donation_entry() {
        let planner = AnnualPlanner::new();
        assert_eq!(planner.rows().len(), 1);
        assert!(planner.rows()[0].is_donation);
        assert_eq!(planner.read(RowId::Donation), BufferEntry::default());
        assert_eq!(planner.projection(), Projection::default());
    }

    #[test]
    fn test_snapshot_seeds_buffer_and_totals() {
        let planner = planner_with_plan();
        assert_eq!(planner.rows().len(), 2);
        assert_eq!(planner.read(RowId::Plan(1)), BufferEntry::new(2.0, 3.0));
        assert_eq!(planner.projection().total_balance, -12.0);
        assert_eq!(planner.projection().total_balance_with_cost_share, -6.0);
    }

    #[test]
    fn test_edits_recompute_totals_eagerly() {
        let mut planner = planner_with_plan();
        planner.set_amount(RowId::Donation, 10.0);
        planner.set_amount_per_activity(RowId::Donation, 1.0);
        assert_eq!(planner.projection().total_balance, -10.0);
        assert_eq!(planner.projection().total_balance_with_cost_share, -4.0);
    }

    #[test]
    fn test_parameter_change_recomputes_totals() {
        let mut planner = planner_with_plan();
        planner.apply_parameter(Some(GamificationParameter {
            points_per_donation: 1.0,
            points_per_chf: 0.0,
        }));
        assert_eq!(planner.projection().total_balance, -60.0);

        planner.apply_parameter(None);
        assert_eq!(planner.projection().total_balance, -60.0);
        assert_eq!(planner.rows()[0].points, 1.0);
    }

    #[test]
    fn test_refresh_preserves_diverged_edit() {
        let mut planner = planner_with_plan();
        planner.set_amount(RowId::Plan(1), 5.0);

        planner.apply_plans(planner.plans().to_vec());
        assert_eq!(planner.read(RowId::Plan(1)).amount, 5.0);
        assert_eq!(planner.projection().total_balance, -30.0);
    }

    #[test]
    fn test_refresh_overwrites_untouched_row() {
        let mut planner = planner_with_plan();
        let mut plans = planner.plans().to_vec();
        plans[0].amount = 7.0;

        planner.apply_plans(plans);
        assert_eq!(planner.read(RowId::Plan(1)).amount, 7.0);
    }

    #[test]
    fn test_commit_emits_single_field_update() {
        let mut planner = planner_with_plan();
        planner.set_amount(RowId::Plan(1), 4.0);
        planner.set_amount_per_activity(RowId::Plan(1), 9.0);

        let update = planner.commit_amount(RowId::Plan(1)).unwrap().unwrap();
        assert_eq!(update.plan_id, 1);
        assert_eq!(update.patch, PlanPatch::Amount(4.0));

        let update = planner
            .commit_amount_per_activity(RowId::Plan(1))
            .unwrap()
            .unwrap();
        assert_eq!(update.patch, PlanPatch::AmountPerActivity(9.0));
        assert_eq!(update.patch.field(), EditField::AmountPerActivity);
        assert_eq!(update.patch.value(), 9.0);
    }

    #[test]
    fn test_commit_on_donation_is_noop() {
        let mut planner = planner_with_plan();
        planner.set_amount(RowId::Donation, 3.0);

        assert!(planner.commit_amount(RowId::Donation).unwrap().is_none());
        assert!(
            planner
                .commit_amount_per_activity(RowId::Donation)
                .unwrap()
                .is_none()
        );
        assert_eq!(planner.read(RowId::Donation).amount, 3.0);
    }

    #[test]
    fn test_commit_rejects_non_numeric_value() {
        let mut planner = planner_with_plan();
        planner.set_amount(RowId::Plan(1), f64::NAN);

        let result = planner.commit_amount(RowId::Plan(1));
        assert!(matches!(
            result,
            Err(Error::InvalidNumber {
                row: RowId::Plan(1),
                field: EditField::Amount,
                ..
            })
        ));
        // Buffer keeps the value for correction
        assert!(planner.read(RowId::Plan(1)).amount.is_nan());
    }

    #[test]
    fn test_commit_without_backing_plan_fails() {
        let mut planner = planner_with_plan();
        planner.set_amount(RowId::Plan(99), 1.0);

        let result = planner.commit_amount(RowId::Plan(99));
        assert!(matches!(
            result,
            Err(Error::MissingBackingPlan {
                row: RowId::Plan(99)
            })
        ));
    }

    #[test]
    fn test_removed_plan_drops_row() {
        let mut planner = planner_with_plan();
        planner.apply_plans(Vec::new());
        assert_eq!(planner.rows().len(), 1);
        assert_eq!(planner.projection().total_balance, 0.0);
        assert_eq!(planner.read(RowId::Plan(1)), BufferEntry::default());
    }

    #[test]
    fn test_example_counts_reset_on_rebuild() {
        let mut planner = planner_with_plan();
        planner.set_example_count(RowId::Plan(1), 2.0);
        planner.set_example_count(RowId::Donation, 4.0);
        assert_eq!(planner.example_points(RowId::Plan(1)), 20.0);
        assert_eq!(planner.example_total(), 24.0);

        planner.apply_plans(planner.plans().to_vec());
        assert_eq!(planner.example_total(), 0.0);
    }
}
