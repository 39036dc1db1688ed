use std::collections::HashMap;

use async_trait::async_trait;
use encore_application::{
    CaptureRepository, FormDocument, FormDocumentRepository, FormKind, PlanningRepository,
};
use encore_core::{AppError, AppResult, EventId};
use encore_domain::FlatField;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;


/// In-memory store for intake captures and saved client forms.
#[derive(Debug, Default)]
pub struct InMemoryFormRepository {
    captures: RwLock<HashMap<(EventId, FormKind), Value>>,
    planning_rows: RwLock<HashMap<EventId, Vec<FlatField>>>,
    documents: RwLock<HashMap<(EventId, FormKind), FormDocument>>,
}

impl InMemoryFormRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the raw intake capture of an event, replacing any previous one.
    pub async fn insert_capture(&self, event_id: EventId, kind: FormKind, capture: Value) {
        debug!(event_id = %event_id, form_kind = %kind, "intake capture stored");
        self.captures.write().await.insert((event_id, kind), capture);
    }
}

#[async_trait]
impl CaptureRepository for InMemoryFormRepository {
    async fn find_capture(&self, event_id: EventId, kind: FormKind) -> AppResult<Option<Value>> {
        Ok(self.captures.read().await.get(&(event_id, kind)).cloned())
    }
}

#[async_trait]
impl PlanningRepository for InMemoryFormRepository {
    async fn load_planning_rows(&self, event_id: EventId) -> AppResult<Option<Vec<FlatField>>> {
        Ok(self.planning_rows.read().await.get(&event_id).cloned())
    }

    async fn save_planning_rows(&self, event_id: EventId, rows: Vec<FlatField>) -> AppResult<()> {
        self.planning_rows.write().await.insert(event_id, rows);
        Ok(())
    }
}

#[async_trait]
impl FormDocumentRepository for InMemoryFormRepository {
    async fn load_document(
        &self,
        event_id: EventId,
        kind: FormKind,
    ) -> AppResult<Option<FormDocument>> {
        Ok(self
            .documents
            .read()
            .await
            .get(&(event_id, kind))
            .cloned())
    }

    async fn save_document(&self, document: FormDocument) -> AppResult<()> {
        if document.kind == FormKind::Planning {
            return Err(AppError::Validation(format!(
                "planning form for event '{}' is stored as rows, not as a document",
                document.event_id
            )));
        }

        self.documents
            .write()
            .await
            .insert((document.event_id, document.kind), document);
        Ok(())
    }
}
