//! Screening service — the three operations the HTTP layer calls into.
//!
//! create: extract → chunk → embed (resume) + keyword match (JD) → store
//! ask:    embed(question) → rank stored chunks → synthesize → append turn

use bytes::Bytes;
use tracing::{debug, info};

use crate::document::chunker::chunk_text;
use crate::document::embedding::Embedder;
use crate::document::extract::{extract_text, DocumentFormat};
use crate::document::similarity::rank_chunks;
use crate::errors::AppError;
use crate::models::analysis::{AnalysisDraft, AnalysisSummary, ChatAnswer, DocumentChunk};
use crate::screening::answer::{synthesize_answer, AnswerContext};
use crate::screening::match_scoring::MatchScorer;
use crate::screening::session::SessionStore;

#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub bytes: Bytes,
    pub format: DocumentFormat,
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume: DocumentUpload,
    pub job_description: DocumentUpload,
}

/// Retrieval knobs taken from `Config`.
#[derive(Debug, Clone, Copy)]
pub struct RetrievalSettings {
    pub chunk_size: usize,
    pub top_k: usize,
}

pub async fn create_analysis(
    store: &SessionStore,
    scorer: &dyn MatchScorer,
    embedder: &dyn Embedder,
    settings: RetrievalSettings,
    request: AnalysisRequest,
) -> Result<AnalysisSummary, AppError> {
    let resume_text = extract_off_thread(request.resume, "resume").await?;
    let job_description_text =
        extract_off_thread(request.job_description, "job description").await?;

    let chunks: Vec<DocumentChunk> = chunk_text(&resume_text, settings.chunk_size)
        .into_iter()
        .map(|text| DocumentChunk {
            embedding: embedder.embed(&text),
            text,
            section: None,
        })
        .collect();

    let report = scorer.score(&resume_text, &job_description_text).await?;

    let chunk_count = chunks.len();
    let summary = store
        .create(AnalysisDraft {
            resume_text,
            job_description_text,
            match_score: report.score,
            strengths: report.strengths,
            gaps: report.gaps,
            assessment: report.assessment,
            chunks,
        })
        .await;

    info!(
        "Created analysis {} (score={}, chunks={})",
        summary.id, summary.match_score, chunk_count
    );
    Ok(summary)
}

pub async fn get_analysis(store: &SessionStore, id: &str) -> Result<AnalysisSummary, AppError> {
    Ok(store.get(id).await?.summary())
}

pub async fn ask_question(
    store: &SessionStore,
    embedder: &dyn Embedder,
    settings: RetrievalSettings,
    id: &str,
    question: &str,
) -> Result<ChatAnswer, AppError> {
    if question.trim().is_empty() {
        return Err(AppError::InvalidQuestion(
            "question cannot be empty".to_string(),
        ));
    }

    let source = store.retrieval_source(id).await?;

    let query = embedder.embed(question);
    let retrieved = rank_chunks(&query, &source.chunks, settings.top_k);

    let (answer, rule) = synthesize_answer(&AnswerContext {
        question,
        retrieved_chunks: &retrieved,
        resume_text: &source.resume_text,
        job_description: &source.job_description_text,
    });
    debug!(
        "Analysis {id}: answered via {rule} rule with {} retrieved chunks",
        retrieved.len()
    );

    store.append_turn(id, question, &answer).await?;

    Ok(ChatAnswer {
        answer,
        question: question.to_string(),
    })
}

/// PDF parsing is CPU-bound and can panic on malformed input, so it runs on
/// the blocking pool and a panic is reported as an extraction failure.
async fn extract_off_thread(upload: DocumentUpload, label: &str) -> Result<String, AppError> {
    let DocumentUpload { bytes, format } = upload;
    let text = tokio::task::spawn_blocking(move || extract_text(&bytes, format))
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::ExtractionFailed(format!("The {label} could not be parsed"))
            } else {
                AppError::Internal(anyhow::anyhow!("{label} extraction task failed: {e}"))
            }
        })??;
    Ok(text)
}
