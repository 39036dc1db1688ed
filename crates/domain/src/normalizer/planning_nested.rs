use serde_json::{Map, Value};

use crate::{FieldValue, NestedCapture, PlanningField, PlanningFieldKind, PlanningFormData};

use crate::PlanningField as F;

const CEREMONY_FIELDS: &[(&str, PlanningField)] = &[
    ("location", F::CeremonyLocation),
    ("venue", F::CeremonyLocation),
    ("start_time", F::CeremonyStartTime),
    ("end_time", F::CeremonyEndTime),
    ("officiant", F::OfficiantName),
    ("music_needed", F::CeremonyMusicNeeded),
    ("processional_song", F::ProcessionalSong),
    ("bride_entrance_song", F::BrideEntranceSong),
    ("recessional_song", F::RecessionalSong),
    ("notes", F::CeremonyNotes),
];

const RECEPTION_FIELDS: &[(&str, PlanningField)] = &[
    ("location", F::ReceptionLocation),
    ("venue", F::ReceptionLocation),
    ("start_time", F::ReceptionStartTime),
    ("end_time", F::ReceptionEndTime),
    ("guest_count", F::GuestCount),
    ("cocktail_hour_time", F::CocktailHourTime),
    ("cocktail_music", F::CocktailMusicStyle),
    ("dinner_time", F::DinnerTime),
    ("dinner_style", F::DinnerStyle),
    ("dinner_music", F::DinnerMusicStyle),
    ("toasts_time", F::ToastsTime),
    ("toast_givers", F::ToastGivers),
    ("cake_cutting_time", F::CakeCuttingTime),
    ("notes", F::ReceptionNotes),
];

const VENUE_FIELDS: &[(&str, PlanningField)] = &[
    ("name", F::VenueName),
    ("address", F::VenueAddress),
    ("contact_name", F::VenueContactName),
    ("contact_phone", F::VenueContactPhone),
    ("load_in_time", F::LoadInTime),
    ("setup_notes", F::SetupNotes),
];

const VENDOR_FIELDS: &[(&str, PlanningField)] = &[
    ("planner_name", F::PlannerName),
    ("planner_phone", F::PlannerPhone),
    ("photographer", F::PhotographerName),
    ("videographer", F::VideographerName),
    ("meal_provided", F::VendorMealProvided),
];

const SPECIAL_MOMENT_FIELDS: &[(&str, PlanningField)] = &[
    ("grand_entrance", F::GrandEntrance),
    ("grand_entrance_song", F::GrandEntranceSong),
    ("wedding_party", F::WeddingPartyIntroductions),
    ("first_dance", F::FirstDanceSong),
    ("father_daughter_dance", F::FatherDaughterSong),
    ("mother_son_dance", F::MotherSonSong),
    ("cake_cutting_song", F::CakeCuttingSong),
    ("bouquet_toss", F::BouquetToss),
    ("garter_toss", F::GarterToss),
    ("last_dance", F::LastDanceSong),
    ("private_last_dance", F::PrivateLastDance),
];

const MUSIC_FIELDS: &[(&str, PlanningField)] = &[
    ("genres", F::MusicGenres),
    ("do_not_play", F::DoNotPlayNotes),
    ("crowd", F::CrowdDescription),
    ("volume", F::VolumePreference),
    ("special_requests", F::SpecialRequests),
];

const NOTES_FIELDS: &[(&str, PlanningField)] = &[
    ("other", F::OtherNotes),
    ("comments", F::OtherComments),
    ("announcements", F::SpecialAnnouncements),
    ("theme", F::EventTheme),
    ("colors", F::ColorScheme),
    ("dress_code", F::DressCode),
];

const DOMAINS: &[(&str, &[(&str, PlanningField)])] = &[
    ("ceremony", CEREMONY_FIELDS),
    ("reception", RECEPTION_FIELDS),
    ("venue", VENUE_FIELDS),
    ("vendors", VENDOR_FIELDS),
    ("special_moments", SPECIAL_MOMENT_FIELDS),
    ("music", MUSIC_FIELDS),
    ("notes", NOTES_FIELDS),
];

/// Coerces a captured JSON value to the type of the target key.
///
/// Values that cannot be coerced are dropped.
fn coerce(target: PlanningField, value: &Value) -> Option<FieldValue> {
    let value = FieldValue::from_json(value)?;
    if value.is_blank() {
        return None;
    }

    match target.kind() {
        PlanningFieldKind::Integer => value.to_integer().map(FieldValue::from),
        PlanningFieldKind::Flag => value.to_flag().map(FieldValue::from),
        PlanningFieldKind::Text | PlanningFieldKind::Time => Some(value),
    }
}

fn assign_domain(
    form: &mut PlanningFormData,
    fields: &Map<String, Value>,
    table: &[(&str, PlanningField)],
) {
    for (field_name, value) in fields {
        let Some((_, target)) = table.iter().find(|(name, _)| *name == field_name.as_str()) else {
            continue;
        };

        if let Some(value) = coerce(*target, value) {
            form.set_field(*target, value);
        }
    }
}

/// Maps a capture grouped by planning domain onto the planning form.
///
/// Unknown domains and fields, nulls, blanks and nested values are dropped.
#[must_use]
pub fn convert_chat_planning_data_to_form(capture: &NestedCapture) -> PlanningFormData {
    let mut form = PlanningFormData::new();

    for (domain, table) in DOMAINS {
        if let Some(fields) = capture.domain(domain) {
            assign_domain(&mut form, fields, table);
        }
    }

    form
}
