use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bounded slice of the resume together with its embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub text: String,
    pub embedding: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Everything an analysis produces before the session store assigns it an id.
#[derive(Debug, Clone)]
pub struct AnalysisDraft {
    pub resume_text: String,
    pub job_description_text: String,
    pub match_score: u8,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub assessment: String,
    pub chunks: Vec<DocumentChunk>,
}

/// A stored analysis. `chunks` never change after creation and
/// `conversation_history` only grows, one user/assistant pair at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: String,
    pub resume_text: String,
    pub job_description_text: String,
    pub match_score: u8,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub assessment: String,
    pub chunks: Vec<DocumentChunk>,
    pub conversation_history: Vec<ConversationTurn>,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn from_draft(id: String, draft: AnalysisDraft) -> Self {
        AnalysisRecord {
            id,
            resume_text: draft.resume_text,
            job_description_text: draft.job_description_text,
            match_score: draft.match_score,
            strengths: draft.strengths,
            gaps: draft.gaps,
            assessment: draft.assessment,
            chunks: draft.chunks,
            conversation_history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            id: self.id.clone(),
            match_score: self.match_score,
            strengths: self.strengths.clone(),
            gaps: self.gaps.clone(),
            assessment: self.assessment.clone(),
        }
    }
}

/// The parts of a record a question is answered from. Excludes the
/// conversation history, which grows with every turn.
#[derive(Debug, Clone)]
pub struct RetrievalSource {
    pub resume_text: String,
    pub job_description_text: String,
    pub chunks: Vec<DocumentChunk>,
}

/// Public projection of an analysis returned by the create and get operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub id: String,
    pub match_score: u8,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub assessment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub question: String,
}
