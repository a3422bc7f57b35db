//! Effect layer between the planning component and the data source.
//!
//! Loads snapshots into an [`AnnualPlanner`], dispatches the update requests its
//! commits produce, and translates the outcome into a [`CommitOutcome`]. After a
//! request settles, success or failure, the planner is refreshed so reconciliation
//! runs against fresh authoritative values.

use crate::{
    core::{
        annual_plan::{get_all_annual_plans, update_annual_plan},
        gamification::get_gamification_parameter,
        planner::{AnnualPlanner, PlanUpdate},
        rows::{EditField, RowId},
    },
    errors::{Error, Result},
    models::{AnnualPlan, GamificationParameter},
};
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument, warn};

/// Authoritative data delivered to the planner in one go
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanningSnapshot {
    /// All annual plans with their task types
    pub plans: Vec<AnnualPlan>,
    /// The gamification parameter, if set
    pub parameter: Option<GamificationParameter>,
}

/// What happened to one commit attempt
#[derive(Debug)]
pub enum CommitOutcome {
    /// Nothing to send (donation row)
    Skipped,
    /// The buffered value was not sent; the buffer keeps it for correction
    Rejected(Error),
    /// The data source accepted the update
    Applied(PlanUpdate),
    /// The data source failed; the message is meant for the user
    Failed {
        /// The request that failed
        update: PlanUpdate,
        /// User-facing description of the failure
        message: String,
    },
}

impl CommitOutcome {
    /// Returns true if an update request was dispatched.
    #[must_use]
    pub const fn was_sent(&self) -> bool {
        matches!(self, Self::Applied(_) | Self::Failed { .. })
    }
}

/// Reads plans and parameter from the data source.
///
/// # Errors
/// Returns an error if either query fails.
pub async fn load_snapshot(db: &DatabaseConnection) -> Result<PlanningSnapshot> {
    let plans = get_all_annual_plans(db).await?;
    let parameter = get_gamification_parameter(db).await?;
    Ok(PlanningSnapshot { plans, parameter })
}

/// Applies a snapshot to the planner.
pub fn apply_snapshot(planner: &mut AnnualPlanner, snapshot: PlanningSnapshot) {
    planner.apply_parameter(snapshot.parameter);
    planner.apply_plans(snapshot.plans);
}

/// Loads a fresh snapshot and applies it to the planner.
///
/// # Errors
/// Returns an error if loading the snapshot fails; the planner is left unchanged.
#[instrument(skip_all)]
pub async fn refresh(db: &DatabaseConnection, planner: &mut AnnualPlanner) -> Result<()> {
    let snapshot = load_snapshot(db).await?;
    info!(
        "Refreshing planner with {} plans (parameter set: {})",
        snapshot.plans.len(),
        snapshot.parameter.is_some()
    );
    apply_snapshot(planner, snapshot);
    Ok(())
}

/// Commits one buffered field of `row` and refreshes the planner afterwards.
///
/// Rejected and skipped commits never reach the data source. A failed refresh is
/// logged; the outcome still reports what happened to the update itself.
#[instrument(skip(db, planner))]
pub async fn commit_field(
    db: &DatabaseConnection,
    planner: &mut AnnualPlanner,
    row: RowId,
    field: EditField,
) -> CommitOutcome {
    let update = match planner.commit(row, field) {
        Ok(Some(update)) => update,
        Ok(None) => return CommitOutcome::Skipped,
        Err(e) => return CommitOutcome::Rejected(e),
    };

    let outcome = match update_annual_plan(db, update).await {
        Ok(_) => CommitOutcome::Applied(update),
        Err(e) => {
            error!("Failed to update annual plan {}: {}", update.plan_id, e);
            CommitOutcome::Failed {
                update,
                message: format!("Could not save {field} for row {row}: {e}"),
            }
        }
    };

    if let Err(e) = refresh(db, planner).await {
        warn!("Refresh after commit failed: {}", e);
    }

    outcome
}
