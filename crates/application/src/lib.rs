//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
mod planning_form_service;
mod planning_ports;

pub use authorization_service::{Actor, AuthorizationService};
pub use planning_form_service::{PlanningFormService, Prefill, PrefillSource};
pub use planning_ports::{
    CaptureRepository, FormDocument, FormDocumentRepository, FormKind, PlanningRepository,
};
