//! Gamification parameter business logic.
//!
//! The parameter is a singleton: reading returns the one stored row (or `None`),
//! and writing replaces it wholesale.

use crate::{
    core::task_type::validate_points,
    entities::{GamificationParameter, gamification_parameter},
    errors::Result,
    models,
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Reads the current gamification parameter, if one has been set.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_gamification_parameter(
    db: &DatabaseConnection,
) -> Result<Option<models::GamificationParameter>> {
    let model = GamificationParameter::find().one(db).await?;
    Ok(model.map(Into::into))
}

/// Replaces the gamification parameter with the given rates.
///
/// Any previously stored row is removed in the same database transaction, so the
/// table never holds more than one row.
///
/// # Errors
/// Returns an error if either rate is negative or not finite, or the write fails.
#[instrument(skip(db))]
pub async fn set_gamification_parameter(
    db: &DatabaseConnection,
    points_per_donation: f64,
    points_per_chf: f64,
) -> Result<models::GamificationParameter> {
    validate_points(points_per_donation)?;
    validate_points(points_per_chf)?;

    let txn = db.begin().await?;
    GamificationParameter::delete_many().exec(&txn).await?;

    let parameter = gamification_parameter::ActiveModel {
        points_per_donation: Set(points_per_donation),
        points_per_chf: Set(points_per_chf),
        updated_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    let stored = parameter.insert(&txn).await?;
    txn.commit().await?;

    info!(
        "Gamification parameter set: {} points per donation, {} points per CHF",
        stored.points_per_donation, stored.points_per_chf
    );
    Ok(stored.into())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn test_parameter_absent_by_default() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(get_gamification_parameter(&db).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_set_parameter_replaces_wholesale() -> Result<()> {
        let db = setup_test_db().await?;
        set_gamification_parameter(&db, 1.0, 5.0).await?;
        set_gamification_parameter(&db, 2.0, 10.0).await?;

        let parameter = get_gamification_parameter(&db).await?.unwrap();
        assert_eq!(parameter.points_per_donation, 2.0);
        assert_eq!(parameter.points_per_chf, 10.0);
        assert_eq!(GamificationParameter::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_rate_is_storable() -> Result<()> {
        let db = setup_test_db().await?;
        let parameter = set_gamification_parameter(&db, 1.0, 0.0).await?;
        assert_eq!(parameter.points_per_chf, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_rates_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let result = set_gamification_parameter(&db, -1.0, 5.0).await;
        assert!(matches!(result, Err(Error::InvalidPoints { value: -1.0 })));

        let result = set_gamification_parameter(&db, 1.0, f64::INFINITY).await;
        assert!(matches!(result, Err(Error::InvalidPoints { .. })));
        Ok(())
    }
}
