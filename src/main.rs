use club_planner::config::{database, planning};
use club_planner::core::{planner::AnnualPlanner, report, seed, sync};
use club_planner::errors::Result;
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Connect and make sure the tables exist
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 4. Seed from planning.toml when it is present
    match planning::load_default_config() {
        Ok(config) => {
            seed::seed_from_config(&db, &config)
                .await
                .inspect_err(|e| error!("Failed to seed planning data: {}", e))?;
        }
        Err(e) => warn!("Skipping seeding: {}", e),
    }

    // 5. Build the planning view from the stored data and print it
    let mut planner = AnnualPlanner::new();
    sync::refresh(&db, &mut planner).await?;
    info!("Planning view loaded with {} rows.", planner.rows().len());

    println!("{}", report::format_planning_summary(&planner));
    Ok(())
}
