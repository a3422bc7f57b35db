//! Annual plan entity - The yearly quota for one task type.
//!
//! `amount` is the planned number of activities, `amount_per_activity` the planned
//! multiplier per activity. Both are edited from the planning view one field at a time.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Annual plan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "annual_plans")]
pub struct Model {
    /// Unique identifier for the plan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Planned activity count
    pub amount: f64,
    /// Planned multiplier per activity
    pub amount_per_activity: f64,
    /// ID of the task type this plan covers
    #[sea_orm(unique)]
    pub task_type_id: i64,
    /// When the plan was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between `AnnualPlan` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each plan belongs to one task type
    #[sea_orm(
        belongs_to = "super::task_type::Entity",
        from = "Column::TaskTypeId",
        to = "super::task_type::Column::Id"
    )]
    TaskType,
}

impl Related<super::task_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaskType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
