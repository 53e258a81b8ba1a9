//! HTTP handlers for the analysis endpoints: single analyze, batch
//! ranking, chat, and results retrieval.
//!
//! Degradation policy lives here, not in the stages: unreadable documents
//! become empty text, and a failed LLM evaluation becomes the fixed
//! fallback record. Only invalid requests and unknown sessions fail.

use axum::extract::{Multipart, Query, State};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::{
    build_session, parse_job_description, parse_resume, sort_candidates, summarize_candidate,
    CandidateSummary,
};
use crate::errors::AppError;
use crate::evaluation::{assistant, evaluator};
use crate::extract::{extract_from_bytes, validate_extension};
use crate::matching::scoring::compute_skill_match;
use crate::session::AnalysisSession;
use crate::state::AppState;

// ─────────────────────────── request/response types ───────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub analysis: AnalysisSession,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub candidates: Vec<CandidateSummary>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Uuid,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub session_id: Uuid,
}

/// One uploaded document, already pulled out of the multipart stream.
struct Upload {
    filename: String,
    data: Bytes,
}

// ─────────────────────────── POST /api/v1/analyze ───────────────────────────

/// Runs the full pipeline for one resume against one job description.
///
/// Multipart fields: `resume` (file, required) and either `jd_file`
/// (file) or `jd_text` (text). When both JD fields are present the file
/// wins. An optional `session_id` field re-analyzes under an existing
/// session, replacing its stored analysis instead of creating a new one.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut resume_upload: Option<Upload> = None;
    let mut jd_upload: Option<Upload> = None;
    let mut jd_text_field: Option<String> = None;
    let mut existing_session: Option<Uuid> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or_default() {
            "resume" => resume_upload = Some(read_file_field(field).await?),
            "jd_file" => jd_upload = Some(read_file_field(field).await?),
            "jd_text" => {
                jd_text_field = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Unreadable jd_text: {e}")))?,
                )
            }
            "session_id" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable session_id: {e}")))?;
                existing_session = Some(raw.parse().map_err(|_| {
                    AppError::Validation(format!("Invalid session_id: {raw}"))
                })?);
            }
            _ => {}
        }
    }

    let resume_upload =
        resume_upload.ok_or_else(|| AppError::Validation("No resume uploaded".to_string()))?;
    let resume_text = extract_upload_text(&resume_upload, &state)?;

    let jd_text = match (jd_upload, jd_text_field) {
        (Some(upload), _) => extract_upload_text(&upload, &state)?,
        (None, Some(text)) if !text.trim().is_empty() => text,
        _ => return Err(AppError::Validation("No job description provided".to_string())),
    };

    let session = run_analysis(&state, &resume_text, &jd_text).await;
    let session_id = state.sessions.insert(existing_session, session.clone()).await;
    info!(%session_id, ats_score = session.ats_score, "analysis stored");

    Ok(Json(AnalyzeResponse {
        session_id,
        analysis: session,
    }))
}

/// The degradation-tolerant core shared by analyze and batch.
async fn run_analysis(state: &AppState, resume_text: &str, jd_text: &str) -> AnalysisSession {
    let resume = parse_resume(resume_text, &state.taxonomy);
    let jd = parse_job_description(jd_text, &state.taxonomy);
    let result = compute_skill_match(&resume.skills, &jd.skills, &state.taxonomy);

    let evaluation = match evaluator::evaluate(&state.llm, resume_text, jd_text, &result).await {
        Ok(evaluation) => evaluation,
        Err(e) => {
            warn!("evaluation failed, using fallback: {e}");
            evaluator::Evaluation::fallback()
        }
    };

    build_session(&resume, &jd, &result, evaluation)
}

/// Pulls filename and bytes out of a multipart file field.
async fn read_file_field(field: axum::extract::multipart::Field<'_>) -> Result<Upload, AppError> {
    let filename = field
        .file_name()
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation("File field has no filename".to_string()))?;
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Unreadable upload '{filename}': {e}")))?;
    Ok(Upload { filename, data })
}

/// Validates the extension and extracts text. Extraction failure degrades
/// to empty text; an unacceptable extension is a request error.
fn extract_upload_text(upload: &Upload, state: &AppState) -> Result<String, AppError> {
    let ext = validate_extension(&upload.filename, &state.config.allowed_extensions)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(extract_from_bytes(&upload.data, &ext).unwrap_or_else(|e| {
        warn!(filename = %upload.filename, "text extraction failed: {e}");
        String::new()
    }))
}

// ──────────────────────── POST /api/v1/analyze/batch ────────────────────────

/// Scores several resumes against one job description and returns them
/// ranked best-first. Resumes that cannot be read are skipped, not fatal.
/// No sessions are created and no LLM calls are made.
pub async fn handle_batch_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchResponse>, AppError> {
    let mut resumes: Vec<Upload> = Vec::new();
    let mut jd_text_field: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or_default() {
            "resumes" => resumes.push(read_file_field(field).await?),
            "jd_text" => {
                jd_text_field = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Unreadable jd_text: {e}")))?,
                )
            }
            _ => {}
        }
    }

    if resumes.is_empty() {
        return Err(AppError::Validation("No resumes uploaded".to_string()));
    }
    let jd_text = jd_text_field
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("No job description provided".to_string()))?;

    let jd = parse_job_description(&jd_text, &state.taxonomy);

    let mut candidates = Vec::with_capacity(resumes.len());
    for upload in &resumes {
        match extract_upload_text(upload, &state) {
            Ok(text) => {
                let resume = parse_resume(&text, &state.taxonomy);
                let result = compute_skill_match(&resume.skills, &jd.skills, &state.taxonomy);
                candidates.push(summarize_candidate(&resume, &result));
            }
            Err(e) => {
                warn!(filename = %upload.filename, "skipping resume: {e}");
            }
        }
    }

    sort_candidates(&mut candidates);
    Ok(Json(BatchResponse { candidates }))
}

// ───────────────────────────── POST /api/v1/chat ─────────────────────────────

/// Answers one question against the session's stored analysis.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<Value>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("Message must not be empty".to_string()));
    }

    let session = state.sessions.analysis(request.session_id).await?;
    let chat_context = state
        .sessions
        .ensure_chat_context(request.session_id, assistant::build_chat_context)
        .await?;

    let response = assistant::answer(&state.llm, &chat_context, &session, &request.message)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    Ok(Json(json!({ "response": response })))
}

// ──────────────────────────── GET /api/v1/results ────────────────────────────

pub async fn handle_results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<AnalysisSession>, AppError> {
    let session = state.sessions.analysis(query.session_id).await?;
    Ok(Json(session))
}
