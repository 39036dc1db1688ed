//! Conversions between capture records and typed form structures.
//!
//! Every converter is total: unexpected shapes, records without a name and
//! blank values shrink the result instead of failing.

mod database;
mod music;
mod planning_fields;
mod planning_nested;
mod timeline;

#[cfg(test)]
mod tests;

pub use database::{convert_planning_data_from_db, convert_planning_data_to_db};
pub use music::convert_chat_music_data_to_form;
pub use planning_fields::convert_chat_field_array_to_planning_form;
pub use planning_nested::convert_chat_planning_data_to_form;
pub use timeline::convert_chat_data_to_timeline;

use crate::{CapturePayload, MusicIdeasFormData, PlanningFormData, TimelineFormData};

/// Builds a planning form from either capture shape.
#[must_use]
pub fn normalize_planning(payload: &CapturePayload) -> PlanningFormData {
    match payload {
        CapturePayload::FieldArray(fields) => convert_chat_field_array_to_planning_form(fields),
        CapturePayload::Nested(capture) => convert_chat_planning_data_to_form(capture),
        CapturePayload::Unrecognized => PlanningFormData::new(),
    }
}

/// Builds a music ideas form. Only field arrays carry songs.
#[must_use]
pub fn normalize_music(payload: &CapturePayload) -> MusicIdeasFormData {
    convert_chat_music_data_to_form(payload.fields())
}

/// Builds a timeline form. Only field arrays carry timed moments.
#[must_use]
pub fn normalize_timeline(payload: &CapturePayload) -> TimelineFormData {
    convert_chat_data_to_timeline(payload.fields())
}

/// Replaces underscores with spaces and upper-cases the first letter of each word.
pub(crate) fn humanize_field_name(field_name: &str) -> String {
    let mut humanized = String::with_capacity(field_name.len());
    let mut at_word_start = true;

    for character in field_name.chars() {
        let character = if character == '_' { ' ' } else { character };
        if at_word_start && !character.is_whitespace() {
            humanized.extend(character.to_uppercase());
            at_word_start = false;
        } else {
            humanized.push(character);
        }
        if character.is_whitespace() {
            at_word_start = true;
        }
    }

    humanized
}
