//! Task type business logic - Creating and looking up rewardable activity categories.
//!
//! Task types are owned by the administrative side of the system; the planning view
//! only reads them through the plans that embed them.

use crate::{
    entities::{TaskType, task_type},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Checks that a point value or conversion rate is finite and non-negative.
pub(crate) fn validate_points(value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidPoints { value });
    }
    Ok(())
}

/// Checks that a club cost share is a percentage between 0 and 100.
pub(crate) fn validate_cost_share(value: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(Error::InvalidCostShare { value });
    }
    Ok(())
}

/// Retrieves all task types ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_task_types(db: &DatabaseConnection) -> Result<Vec<task_type::Model>> {
    TaskType::find()
        .order_by_asc(task_type::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a task type by its unique ID.
pub async fn get_task_type_by_id(
    db: &DatabaseConnection,
    task_type_id: i64,
) -> Result<Option<task_type::Model>> {
    TaskType::find_by_id(task_type_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a task type by its exact name.
pub async fn get_task_type_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<task_type::Model>> {
    TaskType::find()
        .filter(task_type::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new task type after validating its inputs.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The point value is negative or not finite
/// - The club cost share is outside 0-100
/// - The database insert fails (e.g. duplicate name)
#[instrument(skip(db))]
pub async fn create_task_type(
    db: &DatabaseConnection,
    name: String,
    points: f64,
    club_cost_share: f64,
) -> Result<task_type::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Task type name cannot be empty".to_string(),
        });
    }
    validate_points(points)?;
    validate_cost_share(club_cost_share)?;

    let task_type = task_type::ActiveModel {
        name: Set(name.trim().to_string()),
        points: Set(points),
        club_cost_share: Set(club_cost_share),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };

    let created = task_type.insert(db).await?;
    info!("Created task type '{}' ({} points)", created.name, created.points);
    Ok(created)
}
