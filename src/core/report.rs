//! Planning summary formatting.
//!
//! Turns the planner state into plain text for logs and the command-line binary.

use crate::core::planner::AnnualPlanner;

/// Formats a CHF amount with sign, e.g. "+CHF 2.00" or "-CHF 12.00".
#[must_use]
pub fn format_chf(amount: f64) -> String {
    if amount < 0.0 {
        format!("-CHF {:.2}", amount.abs())
    } else {
        format!("+CHF {amount:.2}")
    }
}

/// Formats the planning table and both totals as a human-readable summary.
#[must_use]
pub fn format_planning_summary(planner: &AnnualPlanner) -> String {
    use std::fmt::Write;

    let mut summary = format!("Annual plan - {} rows\n", planner.rows().len());

    for row in planner.rows() {
        let entry = planner.read(row.id);
        // write! is infallible when writing to String
        let _ = writeln!(
            summary,
            "  {:<20} {:>8.2} x {:>8.2} @ {:>6.2} pts | cost share {:>5.1}%",
            row.name, entry.amount, entry.amount_per_activity, row.points, row.club_cost_share
        );
    }

    let projection = planner.projection();
    let _ = writeln!(
        summary,
        "\nTotal balance: {}",
        format_chf(projection.total_balance)
    );
    let _ = write!(
        summary,
        "Total balance (club cost share): {}",
        format_chf(projection.total_balance_with_cost_share)
    );

    summary
}
