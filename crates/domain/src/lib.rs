//! Domain model for Encore: the role/permission table and the conversions
//! between intake captures and planning, music and timeline forms.

#![forbid(unsafe_code)]

mod capture;
mod music;
mod normalizer;
mod planning;
mod security;
mod timeline;

pub use capture::{CapturePayload, FieldValue, FlatField, NestedCapture};
pub use music::{MusicCategory, MusicIdeasFormData, Song};
pub use normalizer::{
    convert_chat_data_to_timeline, convert_chat_field_array_to_planning_form,
    convert_chat_music_data_to_form, convert_chat_planning_data_to_form,
    convert_planning_data_from_db, convert_planning_data_to_db, normalize_music,
    normalize_planning, normalize_timeline,
};
pub use planning::{PlanningField, PlanningFieldKind, PlanningFormData, validate_planning_form};
pub use security::{AccessPolicy, Capabilities, Permission, Role, Surface};
pub use timeline::{TimelineFormData, TimelineItem};
