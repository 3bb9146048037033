// Route exports
pub mod error;
pub mod matches;
pub mod relay;

use actix_web::web;
use std::sync::Arc;

use crate::config::EmailSettings;
use crate::models::ScoringConfig;
use crate::services::ResendClient;

pub use error::RelayError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Absent when no provider credential is configured
    pub mailer: Option<Arc<ResendClient>>,
    pub email: EmailSettings,
    /// Scoring table for requests that don't bring their own
    pub scoring: ScoringConfig,
    pub planned_ends: u32,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(web::scope("/v1").configure(matches::configure))
            .configure(relay::configure),
    );
}
