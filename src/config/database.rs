//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs.

use crate::entities::{AnnualPlan, GamificationParameter, TaskType};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/club_planner.sqlite?mode=rwc";

/// Gets the database URL from `DATABASE_URL` or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the task type, annual plan and gamification parameter tables if missing.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut task_type_table = schema.create_table_from_entity(TaskType);
    let mut annual_plan_table = schema.create_table_from_entity(AnnualPlan);
    let mut parameter_table = schema.create_table_from_entity(GamificationParameter);

    task_type_table.if_not_exists();
    annual_plan_table.if_not_exists();
    parameter_table.if_not_exists();

    db.execute(builder.build(&task_type_table)).await?;
    db.execute(builder.build(&annual_plan_table)).await?;
    db.execute(builder.build(&parameter_table)).await?;

    info!("Database tables ready");
    Ok(())
}
