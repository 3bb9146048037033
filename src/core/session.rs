use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::aggregate::{aggregate, build_export_table, ExportTable};
use crate::models::{MatchTotals, Round, ScoringConfig, TeamNames};

/// Maximum number of undo snapshots retained
pub const HISTORY_LIMIT: usize = 50;

/// Planned number of ends for a new match
pub const DEFAULT_PLANNED_ENDS: u32 = 10;

/// Everything a scorekeeper edits, captured whole for undo snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchState {
    pub teams: TeamNames,
    pub scoring: ScoringConfig,
    #[serde(rename = "plannedEnds")]
    pub planned_ends: u32,
    #[serde(rename = "timerSec")]
    pub elapsed_secs: u64,
    #[serde(rename = "ends")]
    pub rounds: Vec<Round>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            teams: TeamNames::default(),
            scoring: ScoringConfig::default(),
            planned_ends: DEFAULT_PLANNED_ENDS,
            elapsed_secs: 0,
            rounds: Vec::new(),
        }
    }
}

/// A match being scored, with a bounded undo history
///
/// Every edit snapshots the full state before applying, so `undo` always
/// restores exactly what the scorekeeper saw before their last change.
/// Timer ticks are not edits and are never snapshotted.
#[derive(Debug, Clone, Default)]
pub struct MatchSession {
    state: MatchState,
    history: VecDeque<String>,
}

impl MatchSession {
    pub fn new(teams: TeamNames, scoring: ScoringConfig, planned_ends: u32) -> Self {
        Self {
            state: MatchState {
                teams,
                scoring,
                planned_ends,
                ..MatchState::default()
            },
            history: VecDeque::new(),
        }
    }

    /// Resume a session from saved state; history starts empty
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            state: serde_json::from_str(json)?,
            history: VecDeque::new(),
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.state)
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn rounds(&self) -> &[Round] {
        &self.state.rounds
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Append a blank end numbered after the last one
    pub fn add_round(&mut self) -> &Round {
        self.snapshot();
        let number = self.state.rounds.len() as u32 + 1;
        self.state.rounds.push(Round::numbered(number));
        &self.state.rounds[self.state.rounds.len() - 1]
    }

    /// Edit an end in place; returns false when `index` is out of range
    pub fn update_round<F>(&mut self, index: usize, edit: F) -> bool
    where
        F: FnOnce(&mut Round),
    {
        if index >= self.state.rounds.len() {
            return false;
        }
        self.snapshot();
        edit(&mut self.state.rounds[index]);
        true
    }

    pub fn remove_last_round(&mut self) -> Option<Round> {
        if self.state.rounds.is_empty() {
            return None;
        }
        self.snapshot();
        self.state.rounds.pop()
    }

    pub fn set_teams(&mut self, teams: TeamNames) {
        self.snapshot();
        self.state.teams = teams;
    }

    pub fn set_scoring(&mut self, scoring: ScoringConfig) {
        self.snapshot();
        self.state.scoring = scoring;
    }

    pub fn set_planned_ends(&mut self, planned_ends: u32) {
        self.snapshot();
        self.state.planned_ends = planned_ends;
    }

    /// Start over with default teams, scoring and no ends. Undoable.
    pub fn reset(&mut self) {
        self.snapshot();
        self.state = MatchState::default();
    }

    /// Restore the state before the most recent edit
    pub fn undo(&mut self) -> bool {
        while let Some(snapshot) = self.history.pop_back() {
            match serde_json::from_str(&snapshot) {
                Ok(state) => {
                    self.state = state;
                    return true;
                }
                Err(e) => {
                    tracing::warn!("Discarding unreadable undo snapshot: {}", e);
                }
            }
        }
        false
    }

    /// Advance the match clock by one second
    pub fn tick(&mut self) {
        self.state.elapsed_secs += 1;
    }

    /// Elapsed match time as `HH:MM:SS`
    pub fn elapsed_display(&self) -> String {
        let s = self.state.elapsed_secs;
        format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
    }

    pub fn totals(&self) -> MatchTotals {
        aggregate(&self.state.rounds, &self.state.scoring)
    }

    pub fn export_table(&self) -> ExportTable {
        build_export_table(&self.state.teams, &self.state.rounds, &self.state.scoring)
    }

    fn snapshot(&mut self) {
        match serde_json::to_string(&self.state) {
            Ok(json) => {
                self.history.push_back(json);
                while self.history.len() > HISTORY_LIMIT {
                    self.history.pop_front();
                }
            }
            Err(e) => tracing::warn!("Failed to snapshot match state: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CrossoverShot, Shot};

    #[test]
    fn test_add_round_numbers_sequentially() {
        let mut session = MatchSession::default();
        session.add_round();
        let second = session.add_round().clone();

        assert_eq!(second.number, 2);
        assert_eq!(second.crossover_shot, CrossoverShot::None);
        assert_eq!(second.first, Shot::Unset);
        assert_eq!(session.rounds().len(), 2);
    }

    #[test]
    fn test_update_and_undo() {
        let mut session = MatchSession::default();
        session.add_round();
        assert!(session.update_round(0, |r| r.touchers_a = 3));
        assert_eq!(session.totals().side_a, 9.0);

        assert!(session.undo());
        assert_eq!(session.rounds()[0].touchers_a, 0);
        assert_eq!(session.totals().side_a, 0.0);

        assert!(session.undo());
        assert!(session.rounds().is_empty());
        assert!(!session.undo());
    }

    #[test]
    fn test_update_out_of_range_does_not_snapshot() {
        let mut session = MatchSession::default();
        assert!(!session.update_round(4, |r| r.touchers_b = 1));
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut session = MatchSession::default();
        for _ in 0..(HISTORY_LIMIT + 10) {
            session.add_round();
        }
        assert_eq!(session.history_len(), HISTORY_LIMIT);

        let mut undone = 0;
        while session.undo() {
            undone += 1;
        }
        assert_eq!(undone, HISTORY_LIMIT);
        assert_eq!(session.rounds().len(), 10);
    }

    #[test]
    fn test_reset_is_undoable() {
        let mut session = MatchSession::new(
            TeamNames::new("Hawks", "Owls"),
            ScoringConfig::default(),
            8,
        );
        session.add_round();
        session.reset();

        assert_eq!(session.state().teams, TeamNames::default());
        assert_eq!(session.state().planned_ends, DEFAULT_PLANNED_ENDS);
        assert!(session.rounds().is_empty());

        assert!(session.undo());
        assert_eq!(session.state().teams.a, "Hawks");
        assert_eq!(session.rounds().len(), 1);
    }

    #[test]
    fn test_tick_is_not_an_edit() {
        let mut session = MatchSession::default();
        for _ in 0..3725 {
            session.tick();
        }
        assert_eq!(session.history_len(), 0);
        assert_eq!(session.elapsed_display(), "01:02:05");
    }

    #[test]
    fn test_json_round_trip_keeps_state() {
        let mut session = MatchSession::default();
        session.add_round();
        session.update_round(0, |r| {
            r.crossover_shot = CrossoverShot::Both;
            r.notes = "first end".to_string();
        });

        let restored = MatchSession::from_json(&session.to_json().unwrap()).unwrap();
        assert_eq!(restored.state(), session.state());
        assert_eq!(restored.history_len(), 0);
        assert_eq!(restored.export_table(), session.export_table());
    }
}
