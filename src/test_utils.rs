//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database, creating entities with sensible
//! defaults, and building view-model fixtures without a database.

use crate::{
    core::{annual_plan, task_type},
    entities,
    errors::Result,
    models::{AnnualPlan, GamificationParameter, TaskType},
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer tracing subscriber; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a task type with sensible defaults.
///
/// # Defaults
/// * points: 10.0
/// * `club_cost_share`: 50.0
pub async fn create_test_task_type(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::task_type::Model> {
    task_type::create_task_type(db, name.to_string(), 10.0, 50.0).await
}

/// Creates a default task type named `name` and an annual plan for it.
pub async fn create_test_plan(
    db: &DatabaseConnection,
    name: &str,
    amount: f64,
    amount_per_activity: f64,
) -> Result<entities::annual_plan::Model> {
    let task_type = create_test_task_type(db, name).await?;
    annual_plan::create_annual_plan(db, task_type.id, amount, amount_per_activity).await
}

/// Builds an annual plan view model with amount and amount per activity at 1.
#[must_use]
pub fn sample_plan(id: i64, name: &str, points: f64, club_cost_share: f64) -> AnnualPlan {
    AnnualPlan {
        id,
        amount: 1.0,
        amount_per_activity: 1.0,
        task_type: TaskType {
            id: id + 100,
            name: name.to_string(),
            points,
            club_cost_share,
        },
    }
}

/// One point per donation unit, five points per CHF.
#[must_use]
pub const fn sample_parameter() -> GamificationParameter {
    GamificationParameter {
        points_per_donation: 1.0,
        points_per_chf: 5.0,
    }
}
