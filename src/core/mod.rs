// Core scoring exports
pub mod aggregate;
pub mod export;
pub mod scoring;
pub mod session;

pub use aggregate::{aggregate, build_export_table, score_match, ExportTable, MatchSummary, ScoredRound};
pub use export::{encode_attachment, export_filename, export_subject, parse_csv, to_csv, ExportError};
pub use scoring::{is_sweep, score_round};
pub use session::{MatchSession, MatchState};
