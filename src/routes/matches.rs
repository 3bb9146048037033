use actix_web::{http::header, web, HttpResponse, Responder};

use crate::core::{build_export_table, export_filename, export_subject, score_match, to_csv};
use crate::models::{MatchRequest, ScoreMatchResponse, SendEmailRequest};
use crate::routes::{relay, AppState, RelayError};

/// Configure match scoring routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/match/score", web::post().to(score))
        .route("/match/export", web::post().to(export))
        .route("/match/email", web::post().to(email));
}

/// Score every end of a match
///
/// POST /api/v1/match/score
///
/// Request body:
/// ```json
/// {
///   "teams": {"A": "string", "B": "string"},
///   "rounds": [{"number": 1, "aTouchers": 2, "crossoverShot": "A", "first": "A"}],
///   "scoring": {"toucherPoints": 3, "crossoverBonus": 3, "rankPoints": {"first": 10, "second": 5, "third": 3}}
/// }
/// ```
async fn score(state: web::Data<AppState>, req: web::Json<MatchRequest>) -> impl Responder {
    let req = req.into_inner();
    let scoring = req.scoring.unwrap_or(state.scoring);
    let summary = score_match(&req.rounds, &scoring);

    tracing::debug!(
        "Scored {} end(s): {} {} - {} {}",
        summary.rounds.len(),
        req.teams.a,
        summary.totals.side_a,
        summary.totals.side_b,
        req.teams.b
    );

    HttpResponse::Ok().json(ScoreMatchResponse {
        teams: req.teams,
        planned_ends: state.planned_ends,
        summary,
    })
}

/// Download the match as CSV
///
/// POST /api/v1/match/export
async fn export(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> Result<HttpResponse, RelayError> {
    let req = req.into_inner();
    let scoring = req.scoring.unwrap_or(state.scoring);
    let csv = to_csv(&build_export_table(&req.teams, &req.rounds, &scoring))?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export_filename(&req.teams)),
        ))
        .body(csv))
}

/// Score, export and email the match in one step
///
/// POST /api/v1/match/email
async fn email(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> Result<HttpResponse, RelayError> {
    let req = req.into_inner();
    let scoring = req.scoring.unwrap_or(state.scoring);
    let csv = to_csv(&build_export_table(&req.teams, &req.rounds, &scoring))?;

    let request = SendEmailRequest {
        to: req.to,
        subject: Some(export_subject(&req.teams)),
        filename: Some(export_filename(&req.teams)),
        csv: Some(csv),
        text: None,
    };

    relay::relay_attachment(&state, request).await
}
