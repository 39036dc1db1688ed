use std::sync::Arc;

use chrono::Utc;
use encore_core::{AppError, AppResult, EventId};
use encore_domain::{
    CapturePayload, MusicIdeasFormData, Permission, PlanningFormData, TimelineFormData,
    convert_planning_data_from_db, convert_planning_data_to_db, normalize_music,
    normalize_planning, normalize_timeline, validate_planning_form,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::planning_ports::{
    CaptureRepository, FormDocument, FormDocumentRepository, FormKind, PlanningRepository,
};
use crate::{Actor, AuthorizationService};


/// Where a prefilled form came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefillSource {
    /// Previously saved form.
    Saved,
    /// Normalized intake capture.
    Capture,
    /// Nothing saved or captured yet.
    Empty,
}

impl PrefillSource {
    /// Returns a stable label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Capture => "capture",
            Self::Empty => "empty",
        }
    }
}

/// Form ready to be rendered, with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Prefill<T> {
    /// Form values.
    pub form: T,
    /// Origin of the values.
    pub source: PrefillSource,
}

/// Application service that loads, prefills and saves client forms.
#[derive(Clone)]
pub struct PlanningFormService {
    authorization_service: AuthorizationService,
    capture_repository: Arc<dyn CaptureRepository>,
    planning_repository: Arc<dyn PlanningRepository>,
    document_repository: Arc<dyn FormDocumentRepository>,
}

impl PlanningFormService {
    /// Creates a new planning form service from repository implementations.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        capture_repository: Arc<dyn CaptureRepository>,
        planning_repository: Arc<dyn PlanningRepository>,
        document_repository: Arc<dyn FormDocumentRepository>,
    ) -> Self {
        Self {
            authorization_service,
            capture_repository,
            planning_repository,
            document_repository,
        }
    }

    /// Returns the planning form for an event.
    ///
    /// Saved rows take precedence over the intake capture.
    pub async fn prefill_planning(
        &self,
        actor: &Actor,
        event_id: EventId,
    ) -> AppResult<Prefill<PlanningFormData>> {
        self.authorization_service
            .require_permission(actor, Permission::ViewPlanning)?;

        if let Some(rows) = self.planning_repository.load_planning_rows(event_id).await? {
            return Ok(self.prefilled(
                event_id,
                FormKind::Planning,
                convert_planning_data_from_db(&rows),
                PrefillSource::Saved,
            ));
        }

        let (payload, source) = self.load_capture(event_id, FormKind::Planning).await?;
        Ok(self.prefilled(
            event_id,
            FormKind::Planning,
            normalize_planning(&payload),
            source,
        ))
    }

    /// Validates and saves a planning form. Returns the number of stored rows.
    pub async fn save_planning(
        &self,
        actor: &Actor,
        event_id: EventId,
        form: &PlanningFormData,
    ) -> AppResult<usize> {
        self.authorization_service
            .require_permission(actor, Permission::EditPlanning)?;
        validate_planning_form(form)?;

        let rows = convert_planning_data_to_db(form);
        let row_count = rows.len();
        self.planning_repository
            .save_planning_rows(event_id, rows)
            .await?;

        info!(
            event_id = %event_id,
            subject = %actor.subject(),
            row_count,
            "planning form saved"
        );

        Ok(row_count)
    }

    /// Returns the music ideas form for an event.
    pub async fn prefill_music(
        &self,
        actor: &Actor,
        event_id: EventId,
    ) -> AppResult<Prefill<MusicIdeasFormData>> {
        self.authorization_service
            .require_permission(actor, Permission::ViewPlanning)?;

        if let Some(form) = self.load_saved(event_id, FormKind::Music).await? {
            return Ok(self.prefilled(event_id, FormKind::Music, form, PrefillSource::Saved));
        }

        let (payload, source) = self.load_capture(event_id, FormKind::Music).await?;
        Ok(self.prefilled(event_id, FormKind::Music, normalize_music(&payload), source))
    }

    /// Validates and saves a music ideas form.
    pub async fn save_music(
        &self,
        actor: &Actor,
        event_id: EventId,
        form: &MusicIdeasFormData,
    ) -> AppResult<()> {
        self.authorization_service
            .require_permission(actor, Permission::EditPlanning)?;
        form.validate()?;

        self.save_document(actor, event_id, FormKind::Music, form)
            .await?;
        info!(
            event_id = %event_id,
            subject = %actor.subject(),
            song_count = form.song_count(),
            "music ideas saved"
        );

        Ok(())
    }

    /// Returns the timeline form for an event.
    pub async fn prefill_timeline(
        &self,
        actor: &Actor,
        event_id: EventId,
    ) -> AppResult<Prefill<TimelineFormData>> {
        self.authorization_service
            .require_permission(actor, Permission::ViewPlanning)?;

        if let Some(form) = self.load_saved(event_id, FormKind::Timeline).await? {
            return Ok(self.prefilled(event_id, FormKind::Timeline, form, PrefillSource::Saved));
        }

        let (payload, source) = self.load_capture(event_id, FormKind::Timeline).await?;
        Ok(self.prefilled(
            event_id,
            FormKind::Timeline,
            normalize_timeline(&payload),
            source,
        ))
    }

    /// Validates and saves a timeline, returning it in running order.
    pub async fn save_timeline(
        &self,
        actor: &Actor,
        event_id: EventId,
        mut form: TimelineFormData,
    ) -> AppResult<TimelineFormData> {
        self.authorization_service
            .require_permission(actor, Permission::EditPlanning)?;
        form.validate()?;
        form.sort_by_order();

        self.save_document(actor, event_id, FormKind::Timeline, &form)
            .await?;
        info!(
            event_id = %event_id,
            subject = %actor.subject(),
            item_count = form.timeline_items.len(),
            "timeline saved"
        );

        Ok(form)
    }

    async fn load_capture(
        &self,
        event_id: EventId,
        kind: FormKind,
    ) -> AppResult<(CapturePayload, PrefillSource)> {
        let capture = self
            .capture_repository
            .find_capture(event_id, kind)
            .await?;

        Ok(match capture {
            Some(value) => {
                let payload = CapturePayload::classify(&value);
                if payload == CapturePayload::Unrecognized {
                    warn!(
                        event_id = %event_id,
                        form_kind = %kind,
                        "intake capture has an unrecognized shape"
                    );
                }
                (payload, PrefillSource::Capture)
            }
            None => (CapturePayload::Unrecognized, PrefillSource::Empty),
        })
    }

    async fn load_saved<T: DeserializeOwned>(
        &self,
        event_id: EventId,
        kind: FormKind,
    ) -> AppResult<Option<T>> {
        let Some(document) = self
            .document_repository
            .load_document(event_id, kind)
            .await?
        else {
            return Ok(None);
        };

        serde_json::from_value(document.body).map(Some).map_err(|error| {
            AppError::Internal(format!(
                "saved {kind} form for event '{event_id}' is unreadable: {error}"
            ))
        })
    }

    async fn save_document<T: Serialize>(
        &self,
        actor: &Actor,
        event_id: EventId,
        kind: FormKind,
        form: &T,
    ) -> AppResult<()> {
        let body = serde_json::to_value(form).map_err(|error| {
            AppError::Internal(format!("failed to serialize {kind} form: {error}"))
        })?;

        self.document_repository
            .save_document(FormDocument {
                event_id,
                kind,
                body,
                saved_by: actor.subject().to_owned(),
                saved_at: Utc::now(),
            })
            .await
    }

    fn prefilled<T>(
        &self,
        event_id: EventId,
        kind: FormKind,
        form: T,
        source: PrefillSource,
    ) -> Prefill<T> {
        info!(
            event_id = %event_id,
            form_kind = %kind,
            source = source.as_str(),
            "form prefilled"
        );

        Prefill { form, source }
    }
}
