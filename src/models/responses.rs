use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::MatchSummary;
use crate::models::domain::TeamNames;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    /// Raw provider error payload, when the provider sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Successful relay response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailResponse {
    pub ok: bool,
    pub id: Option<String>,
}

/// `GET /api/send-lite` liveness probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteStatusResponse {
    pub ok: bool,
    pub mode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugResponse {
    #[serde(rename = "hasResendKey")]
    pub has_resend_key: bool,
    pub version: String,
}

/// Scored match: per-end results plus totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreMatchResponse {
    pub teams: TeamNames,
    #[serde(rename = "plannedEnds")]
    pub planned_ends: u32,
    #[serde(flatten)]
    pub summary: MatchSummary,
}
