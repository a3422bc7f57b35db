//! Task type entity - A category of rewardable club activity.
//!
//! Each task type carries the number of points one activity earns and the
//! percentage of its currency-equivalent cost that the club bears.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Task type database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "task_types")]
pub struct Model {
    /// Unique identifier for the task type
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Arbeitseinsatz", "Trainerstunde")
    #[sea_orm(unique)]
    pub name: String,
    /// Points awarded for one unit of this activity
    pub points: f64,
    /// Club cost share in percent (0-100)
    pub club_cost_share: f64,
    /// When the task type was created
    pub created_at: DateTime,
}

/// Defines relationships between `TaskType` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A task type is planned by at most one annual plan
    #[sea_orm(has_one = "super::annual_plan::Entity")]
    AnnualPlan,
}

impl Related<super::annual_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnnualPlan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
