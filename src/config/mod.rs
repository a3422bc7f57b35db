/// Database configuration and connection management
pub mod database;

/// Planning seed configuration loading from planning.toml
pub mod planning;
