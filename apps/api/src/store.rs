//! Resume document store. Key-value only: the scoring core reads resume text
//! by id and writes a score record back.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::resume::ResumeDocument;
use crate::scoring::models::ScoreRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Resume {0} not found")]
    NotFound(Uuid),
}

/// Storage backend for resume documents. Carried in `AppState` as
/// `Arc<dyn ResumeStore>`.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn insert(&self, doc: ResumeDocument) -> Uuid;

    async fn get(&self, id: Uuid) -> Option<ResumeDocument>;

    /// All documents, oldest upload first.
    async fn list(&self) -> Vec<ResumeDocument>;

    async fn save_score(&self, id: Uuid, record: ScoreRecord) -> Result<(), StoreError>;
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryResumeStore {
    docs: RwLock<HashMap<Uuid, ResumeDocument>>,
}

impl InMemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn insert(&self, doc: ResumeDocument) -> Uuid {
        let id = doc.id;
        self.docs.write().await.insert(id, doc);
        debug!("Stored resume {id}");
        id
    }

    async fn get(&self, id: Uuid) -> Option<ResumeDocument> {
        self.docs.read().await.get(&id).cloned()
    }

    async fn list(&self) -> Vec<ResumeDocument> {
        let mut docs: Vec<_> = self.docs.read().await.values().cloned().collect();
        docs.sort_by_key(|d| d.uploaded_at);
        docs
    }

    async fn save_score(&self, id: Uuid, record: ScoreRecord) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        let doc = docs.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        doc.ai_score = Some(record);
        Ok(())
    }
}
