//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities back the external data source the planning view reads from
//! and writes its committed edits to.

pub mod annual_plan;
pub mod gamification_parameter;
pub mod task_type;

// Re-export specific types to avoid conflicts
pub use annual_plan::{Column as AnnualPlanColumn, Entity as AnnualPlan, Model as AnnualPlanModel};
pub use gamification_parameter::{
    Column as GamificationParameterColumn, Entity as GamificationParameter,
    Model as GamificationParameterModel,
};
pub use task_type::{Column as TaskTypeColumn, Entity as TaskType, Model as TaskTypeModel};
