use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Round, ScoringConfig, TeamNames};

/// One address or a list of addresses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Recipients {
    /// Trimmed, non-empty addresses
    pub fn into_list(self) -> Vec<String> {
        let raw = match self {
            Recipients::One(addr) => vec![addr],
            Recipients::Many(list) => list,
        };
        raw.into_iter()
            .map(|addr| addr.trim().to_string())
            .filter(|addr| !addr.is_empty())
            .collect()
    }
}

/// Body of `POST /api/send-email` and `POST /api/send-lite`
///
/// Every field is optional on the wire; defaults are applied by the relay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendEmailRequest {
    #[serde(default)]
    pub to: Option<Recipients>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// A relay request after defaulting, checked before the provider is called
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct EmailDispatch {
    #[validate(length(min = 1, message = "at least one recipient is required"))]
    pub to: Vec<String>,
    pub subject: String,
    #[validate(length(min = 1, message = "csv content is required"))]
    pub csv: String,
    pub filename: String,
    pub text: String,
}

/// Body of the match scoring, export and email endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub teams: TeamNames,
    #[serde(default, alias = "ends")]
    pub rounds: Vec<Round>,
    /// Falls back to the server's configured scoring table
    #[serde(default, alias = "cfg")]
    pub scoring: Option<ScoringConfig>,
    #[serde(default)]
    pub to: Option<Recipients>,
}
