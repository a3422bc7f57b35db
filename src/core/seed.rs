//! Seeding the data source from the planning configuration.
//!
//! Seeding is idempotent: existing task types are matched by name, a plan is only
//! created for task types that have none, and the gamification parameter is only
//! written when none is stored.

use crate::{
    config::planning::Config,
    core::{
        annual_plan::create_annual_plan,
        gamification::{get_gamification_parameter, set_gamification_parameter},
        task_type::{create_task_type, get_task_type_by_name},
    },
    entities::{AnnualPlan, annual_plan},
    errors::Result,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{debug, info, instrument};

/// Counts of what a seeding run created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Task types created
    pub task_types_created: usize,
    /// Annual plans created
    pub plans_created: usize,
    /// Whether the gamification parameter was written
    pub parameter_created: bool,
}

/// Seeds task types, annual plans and the gamification parameter from `config`.
///
/// # Errors
/// Returns an error if a configured value is invalid or a database call fails.
#[instrument(skip_all)]
pub async fn seed_from_config(db: &DatabaseConnection, config: &Config) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    if let Some(rates) = config.gamification {
        if get_gamification_parameter(db).await?.is_none() {
            set_gamification_parameter(db, rates.points_per_donation, rates.points_per_chf)
                .await?;
            summary.parameter_created = true;
        }
    }

    for entry in &config.task_types {
        let task_type = match get_task_type_by_name(db, entry.name.trim()).await? {
            Some(existing) => {
                debug!("Task type '{}' already exists", existing.name);
                existing
            }
            None => {
                summary.task_types_created += 1;
                create_task_type(db, entry.name.clone(), entry.points, entry.club_cost_share)
                    .await?
            }
        };

        let Some(amount) = entry.amount else {
            continue;
        };

        let has_plan = AnnualPlan::find()
            .filter(annual_plan::Column::TaskTypeId.eq(task_type.id))
            .one(db)
            .await?
            .is_some();
        if !has_plan {
            create_annual_plan(db, task_type.id, amount, entry.amount_per_activity).await?;
            summary.plans_created += 1;
        }
    }

    info!(
        "Seeding complete: {} task types, {} plans, parameter created: {}",
        summary.task_types_created, summary.plans_created, summary.parameter_created
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::annual_plan::get_all_annual_plans;
    use crate::test_utils::*;

    const CONFIG: &str = r#"
        [gamification]
        points_per_donation = 1.0
        points_per_chf = 5.0

        [[task_types]]
        name = "Arbeitseinsatz"
        points = 10.0
        club_cost_share = 50.0
        amount = 2.0
        amount_per_activity = 3.0

        [[task_types]]
        name = "Kurs"
        points = 4.0
    "#;

    #[tokio::test]
    async fn test_seed_creates_everything_once() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let config: Config = toml::from_str(CONFIG).unwrap();

        let first = seed_from_config(&db, &config).await?;
        assert_eq!(
            first,
            SeedSummary {
                task_types_created: 2,
                plans_created: 1,
                parameter_created: true,
            }
        );

        let second = seed_from_config(&db, &config).await?;
        assert_eq!(second, SeedSummary::default());

        let plans = get_all_annual_plans(&db).await?;
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].task_type.name, "Arbeitseinsatz");
        assert_eq!(plans[0].amount, 2.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_keeps_existing_parameter() -> Result<()> {
        let db = setup_test_db().await?;
        set_gamification_parameter(&db, 3.0, 7.0).await?;
        let config: Config = toml::from_str(CONFIG).unwrap();

        let summary = seed_from_config(&db, &config).await?;
        assert!(!summary.parameter_created);

        let parameter = get_gamification_parameter(&db).await?.unwrap();
        assert_eq!(parameter.points_per_chf, 7.0);
        Ok(())
    }
}
