//! Axum route handlers for the Screening API.

use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    Json,
};
use serde_json::Value;
use tracing::warn;

use crate::document::extract::DocumentFormat;
use crate::errors::AppError;
use crate::models::analysis::{AnalysisSummary, ChatAnswer, ConversationTurn};
use crate::screening::service::{
    ask_question, create_analysis, get_analysis, AnalysisRequest, DocumentUpload,
};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Multipart upload with `resume` and `jobDescription` file fields.
/// Each file must be `application/pdf` or `text/plain`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisSummary>, AppError> {
    let request = read_uploads(multipart).await?;

    let summary = create_analysis(
        &state.store,
        state.match_scorer.as_ref(),
        state.embedder.as_ref(),
        state.retrieval_settings(),
        request,
    )
    .await?;

    Ok(Json(summary))
}

/// GET /api/analysis/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisSummary>, AppError> {
    Ok(Json(get_analysis(&state.store, &id).await?))
}

/// GET /api/analysis/:id/history
pub async fn handle_get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ConversationTurn>>, AppError> {
    Ok(Json(state.store.history(&id).await?))
}

/// POST /api/chat/:id
///
/// Body: `{"question": "..."}`. A missing, non-string or blank question is rejected.
pub async fn handle_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatAnswer>, AppError> {
    let Json(body) = body.map_err(|e| {
        warn!("Rejected chat body for analysis {id}: {e}");
        AppError::InvalidQuestion("Missing or invalid question".to_string())
    })?;

    let question = body
        .get("question")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::InvalidQuestion("Missing or invalid question".to_string()))?;

    let reply = ask_question(
        &state.store,
        state.embedder.as_ref(),
        state.retrieval_settings(),
        &id,
        question,
    )
    .await?;

    Ok(Json(reply))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart parsing
// ────────────────────────────────────────────────────────────────────────────

async fn read_uploads(mut multipart: Multipart) -> Result<AnalysisRequest, AppError> {
    let mut resume = None;
    let mut job_description = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name != RESUME_FIELD && name != JOB_DESCRIPTION_FIELD {
            continue;
        }

        let mime = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let format = DocumentFormat::from_mime(&mime).map_err(|e| {
            warn!("Rejected {name} upload with type {mime}");
            e
        })?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read '{name}' upload: {e}")))?;

        let upload = DocumentUpload { bytes, format };
        if name == RESUME_FIELD {
            resume = Some(upload);
        } else {
            job_description = Some(upload);
        }
    }

    match (resume, job_description) {
        (Some(resume), Some(job_description)) => Ok(AnalysisRequest {
            resume,
            job_description,
        }),
        _ => Err(AppError::Validation(
            "Missing resume or job description".to_string(),
        )),
    }
}
