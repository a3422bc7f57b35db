//! Row identity and row assembly for the annual planning table.
//!
//! The table always starts with a synthetic donation ("Spende") row, followed by
//! one row per annual plan in the order the data source delivered them.

use crate::models::{AnnualPlan, GamificationParameter};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of the synthetic donation row
pub const DONATION_KEY: &str = "spende";

/// Display name of the synthetic donation row
pub const DONATION_LABEL: &str = "Spende";

/// Identity of a row in the planning table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RowId {
    /// The virtual donation row, never persisted
    Donation,
    /// A row backed by the annual plan with this id
    Plan(i64),
}

impl RowId {
    /// Returns true for the synthetic donation row.
    #[must_use]
    pub const fn is_donation(self) -> bool {
        matches!(self, Self::Donation)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Donation => f.write_str(DONATION_KEY),
            Self::Plan(id) => write!(f, "{id}"),
        }
    }
}

/// One of the two user-editable numeric fields of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditField {
    /// Planned activity count
    Amount,
    /// Planned multiplier per activity
    AmountPerActivity,
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount => f.write_str("amount"),
            Self::AmountPerActivity => f.write_str("amount per activity"),
        }
    }
}

/// A render-ready row of the planning table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRow {
    /// Row identity, also the edit buffer key
    pub id: RowId,
    /// True only for the synthetic donation row
    pub is_donation: bool,
    /// Task type display name (or "Spende")
    pub name: String,
    /// Points per unit; the donation row uses the donation rate
    pub points: f64,
    /// Club cost share in percent; always 0 for the donation row
    pub club_cost_share: f64,
    /// Source plan for non-donation rows, used when committing edits
    pub plan: Option<AnnualPlan>,
}

/// Points per donation unit, falling back to 1 when no parameter is set.
#[must_use]
pub fn donation_rate(parameter: Option<&GamificationParameter>) -> f64 {
    parameter.map_or(1.0, |p| p.points_per_donation)
}

/// Builds the ordered row sequence from the current plans and parameter.
///
/// Pure: identical inputs always give rows equal by value.
#[must_use]
pub fn assemble_rows(plans: &[AnnualPlan], parameter: Option<&GamificationParameter>) -> Vec<PlanRow> {
    let donation = PlanRow {
        id: RowId::Donation,
        is_donation: true,
        name: DONATION_LABEL.to_string(),
        points: donation_rate(parameter),
        club_cost_share: 0.0,
        plan: None,
    };

    std::iter::once(donation)
        .chain(plans.iter().map(|plan| PlanRow {
            id: RowId::Plan(plan.id),
            is_donation: false,
            name: plan.task_type.name.clone(),
            points: plan.task_type.points,
            club_cost_share: plan.task_type.club_cost_share,
            plan: Some(plan.clone()),
        }))
        .collect()
}
