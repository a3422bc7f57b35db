//! View shapes handed to the planning component.
//!
//! These are plain copies of the authoritative entities, decoupled from the
//! database layer. The `From` conversions are the whole wire-to-view mapping:
//! pure and total.

use crate::entities::{annual_plan, gamification_parameter, task_type};
use serde::{Deserialize, Serialize};

/// A category of rewardable activity
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskType {
    pub id: i64,
    /// Display name
    pub name: String,
    /// Points per activity unit
    pub points: f64,
    /// Percentage (0-100) of the currency-equivalent cost borne by the club
    pub club_cost_share: f64,
}

/// A yearly quota with its task type embedded
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualPlan {
    pub id: i64,
    /// Planned activity count
    pub amount: f64,
    /// Planned multiplier per activity
    pub amount_per_activity: f64,
    /// The task type this plan covers
    pub task_type: TaskType,
}

/// Point conversion rates shared by every projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GamificationParameter {
    /// Points awarded per unit of donation
    pub points_per_donation: f64,
    /// Points equal to one CHF
    pub points_per_chf: f64,
}

impl From<task_type::Model> for TaskType {
    fn from(model: task_type::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            points: model.points,
            club_cost_share: model.club_cost_share,
        }
    }
}

impl From<(annual_plan::Model, task_type::Model)> for AnnualPlan {
    fn from((plan, task_type): (annual_plan::Model, task_type::Model)) -> Self {
        Self {
            id: plan.id,
            amount: plan.amount,
            amount_per_activity: plan.amount_per_activity,
            task_type: task_type.into(),
        }
    }
}

impl From<gamification_parameter::Model> for GamificationParameter {
    fn from(model: gamification_parameter::Model) -> Self {
        Self {
            points_per_donation: model.points_per_donation,
            points_per_chf: model.points_per_chf,
        }
    }
}
