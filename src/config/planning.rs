//! Planning configuration loading from planning.toml
//!
//! The file lists the task types (optionally with their annual plan) and the
//! gamification parameter used to seed an empty database.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "planning.toml";

/// Configuration structure representing the entire planning.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Conversion rates; seeded only when no parameter is stored yet
    #[serde(default)]
    pub gamification: Option<GamificationConfig>,
    /// Task types to seed
    #[serde(default)]
    pub task_types: Vec<TaskTypeConfig>,
}

/// Conversion rates of the gamification scheme
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct GamificationConfig {
    /// Points awarded per unit of donation
    pub points_per_donation: f64,
    /// Points that equal one CHF
    pub points_per_chf: f64,
}

/// Configuration for a single task type
#[derive(Debug, Deserialize, Clone)]
pub struct TaskTypeConfig {
    /// Display name, used to match existing task types
    pub name: String,
    /// Points per activity
    pub points: f64,
    /// Club cost share in percent
    #[serde(default)]
    pub club_cost_share: f64,
    /// Planned activity count; an annual plan is seeded when present
    pub amount: Option<f64>,
    /// Planned multiplier per activity
    #[serde(default = "default_amount_per_activity")]
    pub amount_per_activity: f64,
}

const fn default_amount_per_activity() -> f64 {
    1.0
}

/// Loads planning configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading planning configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Path of the planning configuration: `PLANNING_CONFIG` or ./planning.toml
#[must_use]
pub fn config_path() -> String {
    std::env::var("PLANNING_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Loads planning configuration from [`config_path`]
pub fn load_default_config() -> Result<Config> {
    load_config(config_path())
}
