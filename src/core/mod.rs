/// Field-scoped reads and writes of annual plans
pub mod annual_plan;
/// Local edit buffer with reconciliation against authoritative values
pub mod buffer;
/// Gamification parameter singleton
pub mod gamification;
/// The planning component: buffer, rows, totals and commits
pub mod planner;
/// Balance projections and the points example
pub mod projection;
/// Planning summary formatting
pub mod report;
/// Row identity and row assembly
pub mod rows;
/// Seeding the data source from the planning configuration
pub mod seed;
/// Snapshot loading and commit dispatch
pub mod sync;
/// Task type creation and lookup
pub mod task_type;
