//! In-memory analysis session store.
//!
//! The id map sits behind a `tokio::sync::RwLock`; every record has its own
//! `Mutex`, so turns appended to one analysis are serialized while other
//! analyses proceed independently. Records live until the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{
    AnalysisDraft, AnalysisRecord, AnalysisSummary, ConversationTurn, RetrievalSource, Role,
};

const ID_LEN: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

type RecordHandle = Arc<Mutex<AnalysisRecord>>;

#[derive(Debug, Default)]
pub struct SessionStore {
    records: RwLock<HashMap<String, RecordHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new analysis under a fresh id and returns its summary.
    /// Ids are regenerated until one is unused.
    pub async fn create(&self, draft: AnalysisDraft) -> AnalysisSummary {
        let mut records = self.records.write().await;

        let mut id = generate_id();
        while records.contains_key(&id) {
            debug!("Analysis id collision on {id}, regenerating");
            id = generate_id();
        }

        let record = AnalysisRecord::from_draft(id.clone(), draft);
        let summary = record.summary();
        records.insert(id, Arc::new(Mutex::new(record)));
        summary
    }

    /// Returns a snapshot of the record.
    pub async fn get(&self, id: &str) -> Result<AnalysisRecord, AppError> {
        let handle = self.handle(id).await?;
        let record = handle.lock().await;
        Ok(record.clone())
    }

    /// Copies only the texts and chunks needed to answer a question.
    pub async fn retrieval_source(&self, id: &str) -> Result<RetrievalSource, AppError> {
        let handle = self.handle(id).await?;
        let record = handle.lock().await;
        Ok(RetrievalSource {
            resume_text: record.resume_text.clone(),
            job_description_text: record.job_description_text.clone(),
            chunks: record.chunks.clone(),
        })
    }

    /// Appends a user turn and the matching assistant turn under the record
    /// lock, so concurrent questions on one analysis never interleave.
    pub async fn append_turn(&self, id: &str, question: &str, answer: &str) -> Result<(), AppError> {
        let handle = self.handle(id).await?;
        let mut record = handle.lock().await;
        push_pair(&mut record, question, answer);
        Ok(())
    }

    pub async fn history(&self, id: &str) -> Result<Vec<ConversationTurn>, AppError> {
        let handle = self.handle(id).await?;
        let record = handle.lock().await;
        Ok(record.conversation_history.clone())
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    async fn handle(&self, id: &str) -> Result<RecordHandle, AppError> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))
    }
}

fn push_pair(record: &mut AnalysisRecord, question: &str, answer: &str) {
    let now = Utc::now();
    record.conversation_history.push(ConversationTurn {
        role: Role::User,
        content: question.to_string(),
        created_at: now,
    });
    record.conversation_history.push(ConversationTurn {
        role: Role::Assistant,
        content: answer.to_string(),
        created_at: now,
    });
}

/// Short opaque base-36 id drawn from a v4 UUID.
fn generate_id() -> String {
    let mut value = Uuid::new_v4().as_u128();
    let mut id = String::with_capacity(ID_LEN);
    for _ in 0..ID_LEN {
        id.push(ID_ALPHABET[(value % 36) as usize] as char);
        value /= 36;
    }
    id
}
