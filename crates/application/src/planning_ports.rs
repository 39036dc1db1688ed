use std::fmt::{Display, Formatter};
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use encore_core::{AppError, AppResult, EventId};
use encore_domain::FlatField;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client-facing form families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Planning questionnaire.
    Planning,
    /// Music ideas lists.
    Music,
    /// Event running order.
    Timeline,
}

impl FormKind {
    /// Returns a stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Music => "music",
            Self::Timeline => "timeline",
        }
    }
}

impl Display for FormKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "planning" => Ok(Self::Planning),
            "music" => Ok(Self::Music),
            "timeline" => Ok(Self::Timeline),
            _ => Err(AppError::Validation(format!("unknown form kind '{value}'"))),
        }
    }
}

/// Saved music or timeline form, stored as native JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDocument {
    /// Event the form belongs to.
    pub event_id: EventId,
    /// Form family.
    pub kind: FormKind,
    /// Serialized form body.
    pub body: Value,
    /// Subject that saved the form.
    pub saved_by: String,
    /// Save timestamp.
    pub saved_at: DateTime<Utc>,
}

/// Repository port for raw intake captures.
#[async_trait]
pub trait CaptureRepository: Send + Sync {
    /// Returns the latest raw capture for an event and form family.
    async fn find_capture(&self, event_id: EventId, kind: FormKind) -> AppResult<Option<Value>>;
}

/// Repository port for planning rows.
#[async_trait]
pub trait PlanningRepository: Send + Sync {
    /// Loads saved planning rows, or `None` when the form was never saved.
    async fn load_planning_rows(&self, event_id: EventId) -> AppResult<Option<Vec<FlatField>>>;

    /// Replaces the saved planning rows of an event.
    async fn save_planning_rows(&self, event_id: EventId, rows: Vec<FlatField>) -> AppResult<()>;
}

/// Repository port for music and timeline documents.
#[async_trait]
pub trait FormDocumentRepository: Send + Sync {
    /// Loads a saved document.
    async fn load_document(
        &self,
        event_id: EventId,
        kind: FormKind,
    ) -> AppResult<Option<FormDocument>>;

    /// Replaces a saved document.
    async fn save_document(&self, document: FormDocument) -> AppResult<()>;
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::FormKind;

    #[test]
    fn form_kind_roundtrip_storage_value() {
        for kind in [FormKind::Planning, FormKind::Music, FormKind::Timeline] {
            assert!(matches!(FormKind::from_str(kind.as_str()), Ok(parsed) if parsed == kind));
        }
        assert!(FormKind::from_str("seating").is_err());
    }
}
