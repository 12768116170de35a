//! Axum route handlers for the Audit API.

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::audit::models::{AuditReport, RawForensicMetrics, Scores};
use crate::audit::scoring::{explain, score, Deduction};
use crate::audit::upload::read_resume_upload;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub raw_metrics: RawForensicMetrics,
    pub missing_critical_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub scores: Scores,
    pub deductions: Vec<Deduction>,
}

/// POST /api/v1/audits
///
/// Accepts a multipart upload (field `resume`), extracts facts through the
/// configured extractor and returns them with locally computed scores.
pub async fn handle_audit(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AuditReport>, AppError> {
    let upload = read_resume_upload(multipart?).await?;
    let audit_id = Uuid::new_v4();
    info!(%audit_id, file_name = %upload.file_name, "Audit started");

    let extraction = state.extractor.extract(&upload).await?;

    let missing = extraction.keyword_analysis.missing_critical_skills.len();
    let result = score(&extraction.raw_metrics, missing);
    let deductions = explain(&extraction.raw_metrics, missing);

    info!(
        %audit_id,
        overall = result.overall,
        ats = result.ats_score,
        impact = result.impact_score,
        "Audit scored"
    );

    Ok(Json(AuditReport {
        audit_id,
        audited_at: Utc::now(),
        extraction,
        scores: result.into(),
        deductions,
    }))
}

/// POST /api/v1/audits/score
///
/// Re-scores metrics supplied by the client. No model call.
pub async fn handle_score(
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, AppError> {
    let Json(request) = payload?;
    request.raw_metrics.validate()?;

    let missing = request.missing_critical_skills.len();
    Ok(Json(ScoreResponse {
        scores: score(&request.raw_metrics, missing).into(),
        deductions: explain(&request.raw_metrics, missing),
    }))
}
