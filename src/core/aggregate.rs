use serde::{Deserialize, Serialize};

use crate::core::scoring::score_round;
use crate::models::{MatchTotals, Round, RoundResult, ScoringConfig, TeamNames};

/// Fixed leading columns of the export; the two point columns are named
/// after the teams and followed by the trace column.
const ROUND_COLUMNS: [&str; 10] = [
    "End",
    "A touchers",
    "B touchers",
    "Crossover shot",
    "1st",
    "2nd",
    "3rd",
    "Adj A",
    "Adj B",
    "Notes",
];

/// Number of columns in every export row
pub const EXPORT_WIDTH: usize = ROUND_COLUMNS.len() + 3;

/// A round paired with its computed result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRound {
    #[serde(flatten)]
    pub round: Round,
    pub result: RoundResult,
}

/// Every end of a match scored, in play order, with the final totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub rounds: Vec<ScoredRound>,
    pub totals: MatchTotals,
    pub sweeps: usize,
}

/// Tabular export: header row, one row per end, trailing totals row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportTable {
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows between the header and the totals row
    pub fn round_rows(&self) -> &[Vec<String>] {
        if self.rows.len() < 2 {
            return &[];
        }
        &self.rows[1..self.rows.len() - 1]
    }

    pub fn totals_row(&self) -> Option<&[String]> {
        if self.rows.len() < 2 {
            return None;
        }
        self.rows.last().map(Vec::as_slice)
    }
}

/// Sum every end's delta into match totals
pub fn aggregate(rounds: &[Round], config: &ScoringConfig) -> MatchTotals {
    rounds.iter().fold(MatchTotals::default(), |mut totals, round| {
        totals.add(&score_round(round, config));
        totals
    })
}

/// Score every end and keep the per-end results alongside the totals
pub fn score_match(rounds: &[Round], config: &ScoringConfig) -> MatchSummary {
    let mut totals = MatchTotals::default();
    let mut sweeps = 0;

    let rounds = rounds
        .iter()
        .map(|round| {
            let result = score_round(round, config);
            totals.add(&result);
            if result.is_sweep {
                sweeps += 1;
            }
            ScoredRound {
                round: round.clone(),
                result,
            }
        })
        .collect();

    MatchSummary {
        rounds,
        totals,
        sweeps,
    }
}

/// Build the export table handed to the CSV writer and the email relay
pub fn build_export_table(
    teams: &TeamNames,
    rounds: &[Round],
    config: &ScoringConfig,
) -> ExportTable {
    let mut header: Vec<String> = ROUND_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.push(format!("{} pts", teams.a));
    header.push(format!("{} pts", teams.b));
    header.push("Detail".to_string());

    let summary = score_match(rounds, config);

    let mut rows = Vec::with_capacity(summary.rounds.len() + 2);
    rows.push(header);

    for ScoredRound { round, result } in summary.rounds {
        rows.push(vec![
            round.number.to_string(),
            round.touchers_a.to_string(),
            round.touchers_b.to_string(),
            round.crossover_shot.as_str().to_string(),
            round.first.as_str().to_string(),
            round.second.as_str().to_string(),
            round.third.as_str().to_string(),
            round.adjustment_a.to_string(),
            round.adjustment_b.to_string(),
            round.notes,
            result.delta_a.to_string(),
            result.delta_b.to_string(),
            result.detail,
        ]);
    }

    let mut totals = vec![String::new(); EXPORT_WIDTH];
    totals[0] = "Totals".to_string();
    totals[EXPORT_WIDTH - 3] = summary.totals.side_a.to_string();
    totals[EXPORT_WIDTH - 2] = summary.totals.side_b.to_string();
    rows.push(totals);

    ExportTable { rows }
}
