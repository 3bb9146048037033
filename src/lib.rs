//! Jack Attack - scorekeeping engine and email relay for Jack Attack matches
//!
//! The scoring core is pure: every end is scored from its recorded events and
//! a scoring table, match totals are a fold over the ends, and the export
//! table is what gets written as CSV and mailed through the relay.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{aggregate, build_export_table, score_round, to_csv, ExportTable, MatchSession};
pub use crate::models::{CrossoverShot, MatchTotals, Round, RoundResult, ScoringConfig, Shot, TeamNames};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let totals = aggregate(&[Round::default()], &ScoringConfig::default());
        assert_eq!(totals, MatchTotals::default());
    }
}
