//! Encore capture normalizer runtime.

#![forbid(unsafe_code)]

use std::env;
use std::io::ErrorKind;
use std::str::FromStr;
use std::sync::Arc;

use encore_application::{Actor, AuthorizationService, FormKind, PlanningFormService};
use encore_core::{AppError, AppResult, EventId};
use encore_domain::{CapturePayload, PlanningFormData, convert_planning_data_to_db};
use encore_infrastructure::InMemoryFormRepository;
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

const RUNNER_SUBJECT: &str = "encore-normalizer";
const RUNNER_ROLE: &str = "dj";

/// What the runner produces from the input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputKind {
    Form(FormKind),
    Flatten,
}

impl FromStr for OutputKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "flatten" => Ok(Self::Flatten),
            other => FormKind::from_str(other).map(Self::Form),
        }
    }
}

#[derive(Debug, Clone)]
struct NormalizerConfig {
    capture_path: String,
    output_kind: OutputKind,
    pretty_output: bool,
}

impl NormalizerConfig {
    fn load() -> AppResult<Self> {
        let arguments: Vec<String> = env::args().skip(1).collect();
        Self::from_sources(&arguments, |name| env::var(name).ok())
    }

    fn from_sources(
        arguments: &[String],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> AppResult<Self> {
        let capture_path = match arguments.first() {
            Some(path) => path.clone(),
            None => required(&lookup, "ENCORE_CAPTURE_PATH")?,
        };
        if capture_path.trim().is_empty() {
            return Err(AppError::Validation(
                "capture path must not be empty".to_owned(),
            ));
        }

        let output_kind = arguments
            .get(1)
            .cloned()
            .or_else(|| lookup("ENCORE_FORM_KIND"))
            .unwrap_or_else(|| "planning".to_owned())
            .parse::<OutputKind>()?;
        let pretty_output = parse_bool(&lookup, "ENCORE_PRETTY_OUTPUT", false)?;

        Ok(Self {
            capture_path,
            output_kind,
            pretty_output,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = NormalizerConfig::load()?;
    info!(
        capture_path = %config.capture_path,
        output_kind = ?config.output_kind,
        "encore-normalizer started"
    );

    let document = read_capture(&config.capture_path).await?;
    let output = normalize_document(config.output_kind, document).await?;
    let rendered = if config.pretty_output {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .map_err(|error| AppError::Internal(format!("failed to render output: {error}")))?;

    println!("{rendered}");
    Ok(())
}

/// Reads and parses the capture document at `path`.
async fn read_capture(path: &str) -> AppResult<Value> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|error| match error.kind() {
            ErrorKind::NotFound => AppError::NotFound(format!("capture '{path}' does not exist")),
            _ => AppError::Internal(format!("failed to read capture '{path}': {error}")),
        })?;

    serde_json::from_str(&raw).map_err(|error| {
        AppError::Validation(format!("capture '{path}' is not valid JSON: {error}"))
    })
}

async fn normalize_document(output_kind: OutputKind, document: Value) -> AppResult<Value> {
    match output_kind {
        OutputKind::Form(kind) => prefill_form(kind, document).await,
        OutputKind::Flatten => flatten_planning_form(document),
    }
}

/// Runs a capture through the form service backed by an in-memory store.
async fn prefill_form(kind: FormKind, document: Value) -> AppResult<Value> {
    let repository = Arc::new(InMemoryFormRepository::new());
    let service = PlanningFormService::new(
        AuthorizationService::default(),
        repository.clone(),
        repository.clone(),
        repository.clone(),
    );
    let actor = Actor::new(RUNNER_SUBJECT, RUNNER_ROLE);
    let event_id = EventId::new();

    info!(shape = CapturePayload::classify(&document).shape(), "capture classified");
    repository.insert_capture(event_id, kind, document).await;

    match kind {
        FormKind::Planning => to_json(service.prefill_planning(&actor, event_id).await?.form),
        FormKind::Music => to_json(service.prefill_music(&actor, event_id).await?.form),
        FormKind::Timeline => to_json(service.prefill_timeline(&actor, event_id).await?.form),
    }
}

/// Converts a planning form into storage rows. Values are stored as given.
fn flatten_planning_form(document: Value) -> AppResult<Value> {
    let form: PlanningFormData = serde_json::from_value(document)
        .map_err(|error| AppError::Validation(format!("input is not a planning form: {error}")))?;
    let rows = convert_planning_data_to_db(&form);
    info!(row_count = rows.len(), "planning form flattened");

    to_json(rows)
}

fn to_json(value: impl Serialize) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|error| AppError::Internal(format!("failed to serialize output: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> AppResult<String> {
    lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: bool,
) -> AppResult<bool> {
    match lookup(name) {
        Some(value) => value.trim().parse::<bool>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}
