use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::config::EmailSettings;
use crate::core::encode_attachment;
use crate::models::{
    DebugResponse, EmailDispatch, HealthResponse, LiteStatusResponse, Recipients,
    SendEmailRequest, SendEmailResponse,
};
use crate::routes::{AppState, RelayError};
use crate::services::{Attachment, OutboundEmail};

const DEFAULT_FILENAME: &str = "jackattack.csv";
const LITE_SAMPLE_CSV: &str = "team,score\nA,10\nB,8";

/// Configure the email relay routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/debug", web::get().to(debug_status))
        .service(
            web::resource("/send-email")
                .route(web::post().to(send_email))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/send-lite")
                .route(web::get().to(lite_status))
                .route(web::post().to(send_lite))
                .default_service(web::to(method_not_allowed)),
        );
}

/// Health check endpoint
///
/// Reports `degraded` when no provider credential is configured.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.mailer.is_some() { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

async fn debug_status(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(DebugResponse {
        has_resend_key: state.mailer.is_some(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn method_not_allowed() -> Result<HttpResponse, RelayError> {
    Err(RelayError::MethodNotAllowed)
}

async fn lite_status() -> impl Responder {
    HttpResponse::Ok().json(LiteStatusResponse {
        ok: true,
        mode: "lite".to_string(),
    })
}

/// Email a CSV export as an attachment
///
/// POST /api/send-email
///
/// Request body:
/// ```json
/// {
///   "to": "string | [string]",
///   "subject": "string",
///   "csv": "string",
///   "filename": "string",
///   "text": "string"
/// }
/// ```
async fn send_email(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, RelayError> {
    let request: SendEmailRequest = if body.iter().all(u8::is_ascii_whitespace) {
        SendEmailRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!("Rejected send-email payload: {}", e);
            RelayError::InvalidPayload(e.to_string())
        })?
    };

    relay_attachment(&state, request).await
}

/// Email CSV inline, tolerating an empty or unreadable body
///
/// POST /api/send-lite
async fn send_lite(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, RelayError> {
    let request: SendEmailRequest = if body.is_empty() {
        SendEmailRequest::default()
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|e| {
            tracing::debug!("Ignoring unreadable send-lite body: {}", e);
            SendEmailRequest::default()
        })
    };

    let mailer = state.mailer.as_ref().ok_or(RelayError::MissingConfiguration)?;

    let csv = non_blank(request.csv).unwrap_or_else(|| LITE_SAMPLE_CSV.to_string());
    let dispatch = EmailDispatch {
        to: recipients_or_default(request.to, &state.email),
        subject: non_blank(request.subject).unwrap_or_else(|| state.email.lite_subject.clone()),
        text: format!("Final score (inline)\n\n{}\n", csv),
        filename: String::new(),
        csv,
    };
    dispatch
        .validate()
        .map_err(|e| RelayError::MissingRequiredField(e.to_string()))?;

    let email = OutboundEmail {
        from: state.email.from.clone(),
        to: dispatch.to,
        subject: dispatch.subject,
        text: dispatch.text,
        attachments: Vec::new(),
    };

    let receipt = mailer.send(&email).await?;
    tracing::info!("Sent lite email to {} recipient(s), id: {:?}", email.to.len(), receipt.id);

    Ok(HttpResponse::Ok().json(SendEmailResponse {
        ok: true,
        id: receipt.id,
    }))
}

/// Shared path for every attachment-carrying send
pub(crate) async fn relay_attachment(
    state: &AppState,
    request: SendEmailRequest,
) -> Result<HttpResponse, RelayError> {
    let mailer = state.mailer.as_ref().ok_or_else(|| {
        tracing::error!("Email relay called without RESEND_API_KEY configured");
        RelayError::MissingConfiguration
    })?;

    let dispatch = resolve_dispatch(request, &state.email);
    dispatch.validate().map_err(|e| {
        tracing::warn!("Relay request incomplete: {}", e);
        RelayError::MissingRequiredField(e.to_string())
    })?;

    let email = OutboundEmail {
        from: state.email.from.clone(),
        to: dispatch.to,
        subject: dispatch.subject,
        text: dispatch.text,
        attachments: vec![Attachment {
            filename: dispatch.filename,
            content: encode_attachment(&dispatch.csv),
            content_type: "text/csv".to_string(),
        }],
    };

    let receipt = mailer.send(&email).await.map_err(|e| {
        tracing::error!("Email relay failed: {}", e);
        RelayError::from(e)
    })?;

    tracing::info!(
        "Sent \"{}\" to {} recipient(s), id: {:?}",
        email.subject,
        email.to.len(),
        receipt.id
    );

    Ok(HttpResponse::Ok().json(SendEmailResponse {
        ok: true,
        id: receipt.id,
    }))
}

/// Apply relay defaults to a loosely-typed request
pub fn resolve_dispatch(request: SendEmailRequest, email: &EmailSettings) -> EmailDispatch {
    let csv = non_blank(request.csv).unwrap_or_default();
    let text = non_blank(request.text)
        .unwrap_or_else(|| format!("Final score attached.\n\n{}\n", csv));

    EmailDispatch {
        to: recipients_or_default(request.to, email),
        subject: non_blank(request.subject).unwrap_or_else(|| email.default_subject.clone()),
        filename: non_blank(request.filename).unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
        text,
        csv,
    }
}

fn recipients_or_default(to: Option<Recipients>, email: &EmailSettings) -> Vec<String> {
    to.map(Recipients::into_list)
        .filter(|list| !list.is_empty())
        .unwrap_or_else(|| email.default_recipients.clone())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
