//! Annual plan business logic - Reads and field-scoped writes for yearly quotas.
//!
//! This is the data-source side of the planning view: it delivers plans with their
//! task type embedded, and applies the one-field updates the view commits.

use crate::{
    core::planner::{PlanPatch, PlanUpdate},
    entities::{AnnualPlan, TaskType, annual_plan, task_type},
    errors::{Error, Result},
    models,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Retrieves all annual plans ordered by id, each with its task type embedded.
///
/// Plans whose task type has vanished are skipped.
///
/// # Errors
/// Returns an error if the database query fails.
#[instrument(skip(db))]
pub async fn get_all_annual_plans(db: &DatabaseConnection) -> Result<Vec<models::AnnualPlan>> {
    let pairs = AnnualPlan::find()
        .find_also_related(TaskType)
        .order_by_asc(annual_plan::Column::Id)
        .all(db)
        .await?;

    let plans: Vec<models::AnnualPlan> = pairs
        .into_iter()
        .filter_map(|(plan, task_type)| task_type.map(|t| (plan, t).into()))
        .collect();
    debug!("Loaded {} annual plans", plans.len());
    Ok(plans)
}

/// Finds an annual plan by its unique ID.
pub async fn get_annual_plan_by_id(
    db: &DatabaseConnection,
    plan_id: i64,
) -> Result<Option<annual_plan::Model>> {
    AnnualPlan::find_by_id(plan_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates the annual plan for a task type.
///
/// # Errors
/// Returns an error if:
/// - The task type does not exist
/// - Either value is not finite
/// - The task type already has a plan (database constraint)
#[instrument(skip(db))]
pub async fn create_annual_plan(
    db: &DatabaseConnection,
    task_type_id: i64,
    amount: f64,
    amount_per_activity: f64,
) -> Result<annual_plan::Model> {
    let task_type: task_type::Model = TaskType::find_by_id(task_type_id)
        .one(db)
        .await?
        .ok_or(Error::TaskTypeNotFound { id: task_type_id })?;

    for value in [amount, amount_per_activity] {
        if !value.is_finite() {
            return Err(Error::Config {
                message: format!("Plan values must be numbers, got {value}"),
            });
        }
    }

    let plan = annual_plan::ActiveModel {
        amount: Set(amount),
        amount_per_activity: Set(amount_per_activity),
        task_type_id: Set(task_type.id),
        updated_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };

    let created = plan.insert(db).await?;
    info!("Created annual plan {} for '{}'", created.id, task_type.name);
    Ok(created)
}

/// Applies a field-scoped update: exactly one column of one plan is written.
///
/// # Errors
/// Returns an error if the plan does not exist or the update fails.
#[instrument(skip(db))]
pub async fn update_annual_plan(
    db: &DatabaseConnection,
    update: PlanUpdate,
) -> Result<annual_plan::Model> {
    let plan = AnnualPlan::find_by_id(update.plan_id)
        .one(db)
        .await?
        .ok_or(Error::AnnualPlanNotFound { id: update.plan_id })?;

    let mut active_model: annual_plan::ActiveModel = plan.into();
    match update.patch {
        PlanPatch::Amount(value) => active_model.amount = Set(value),
        PlanPatch::AmountPerActivity(value) => active_model.amount_per_activity = Set(value),
    }
    active_model.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active_model.update(db).await?;
    debug!(
        "Updated {} of annual plan {} to {}",
        update.patch.field(),
        updated.id,
        update.patch.value()
    );
    Ok(updated)
}

/// Deletes an annual plan.
///
/// # Errors
/// Returns an error if the plan does not exist or the delete fails.
pub async fn delete_annual_plan(db: &DatabaseConnection, plan_id: i64) -> Result<()> {
    let result = AnnualPlan::delete_by_id(plan_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::AnnualPlanNotFound { id: plan_id });
    }
    info!("Deleted annual plan {}", plan_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_get_all_annual_plans_embeds_task_type() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_plan(&db, "Arbeitseinsatz", 2.0, 3.0).await?;
        let second = create_test_plan(&db, "Kurs", 1.0, 1.0).await?;

        let plans = get_all_annual_plans(&db).await?;
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].id, first.id);
        assert_eq!(plans[0].amount, 2.0);
        assert_eq!(plans[0].amount_per_activity, 3.0);
        assert_eq!(plans[0].task_type.name, "Arbeitseinsatz");
        assert_eq!(plans[0].task_type.points, 10.0);
        assert_eq!(plans[1].id, second.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_annual_plan_requires_task_type() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_annual_plan(&db, 42, 1.0, 1.0).await;
        assert!(matches!(result, Err(Error::TaskTypeNotFound { id: 42 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_one_plan_per_task_type() -> Result<()> {
        let db = setup_test_db().await?;
        let plan = create_test_plan(&db, "Kurs", 1.0, 1.0).await?;
        let result = create_annual_plan(&db, plan.task_type_id, 2.0, 2.0).await;
        assert!(matches!(result, Err(Error::Database(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_touches_only_one_field() -> Result<()> {
        let db = setup_test_db().await?;
        let plan = create_test_plan(&db, "Arbeitseinsatz", 2.0, 3.0).await?;

        let updated = update_annual_plan(
            &db,
            PlanUpdate {
                plan_id: plan.id,
                patch: PlanPatch::Amount(5.0),
            },
        )
        .await?;
        assert_eq!(updated.amount, 5.0);
        assert_eq!(updated.amount_per_activity, 3.0);

        let updated = update_annual_plan(
            &db,
            PlanUpdate {
                plan_id: plan.id,
                patch: PlanPatch::AmountPerActivity(4.0),
            },
        )
        .await?;
        assert_eq!(updated.amount, 5.0);
        assert_eq!(updated.amount_per_activity, 4.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_plan() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_annual_plan(
            &db,
            PlanUpdate {
                plan_id: 7,
                patch: PlanPatch::Amount(1.0),
            },
        )
        .await;
        assert!(matches!(result, Err(Error::AnnualPlanNotFound { id: 7 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_annual_plan() -> Result<()> {
        let db = setup_test_db().await?;
        let plan = create_test_plan(&db, "Kurs", 1.0, 1.0).await?;

        delete_annual_plan(&db, plan.id).await?;
        assert!(get_annual_plan_by_id(&db, plan.id).await?.is_none());

        let result = delete_annual_plan(&db, plan.id).await;
        assert!(matches!(result, Err(Error::AnnualPlanNotFound { .. })));
        Ok(())
    }
}
