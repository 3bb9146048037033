// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CrossoverShot, MatchTotals, RankPoints, Round, RoundResult, ScoringConfig, Shot, Side, TeamNames};
pub use requests::{EmailDispatch, MatchRequest, Recipients, SendEmailRequest};
pub use responses::{DebugResponse, ErrorResponse, HealthResponse, LiteStatusResponse, ScoreMatchResponse, SendEmailResponse};
