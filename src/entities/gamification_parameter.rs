//! Gamification parameter entity - Singleton holding the point conversion rates.
//! The table holds at most one row; updates replace it wholesale.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Gamification parameter database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gamification_parameters")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Points awarded per unit of donation
    pub points_per_donation: f64,
    /// Points that equal one currency unit (CHF)
    pub points_per_chf: f64,
    /// When the parameters were last replaced
    pub updated_at: DateTime,
}

/// `GamificationParameter` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
