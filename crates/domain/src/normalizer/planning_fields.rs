use std::collections::BTreeMap;

use crate::{FieldValue, FlatField, PlanningField, PlanningFormData};

use self::PlanningRule::{Assign, Flag, Integer, Note};
use crate::PlanningField as F;

/// How one captured field lands on the planning form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlanningRule {
    /// Copy the value; the last occurrence wins.
    Assign(PlanningField),
    /// Store as an integer.
    Integer(PlanningField),
    /// Store as a yes/no flag.
    Flag(PlanningField),
    /// Append a `"<label>: <value>"` line to the target notes key.
    Note(PlanningField, &'static str),
}

const FIELD_RULES: &[(&str, PlanningRule)] = &[
    ("client_name", Note(F::OtherNotes, "Client")),
    ("fiance_name", Note(F::OtherNotes, "Fiancé")),
    ("wedding_date", Note(F::OtherNotes, "Wedding Date")),
    ("event_date", Note(F::OtherNotes, "Event Date")),
    ("client_phone", Note(F::OtherNotes, "Phone")),
    ("client_email", Note(F::OtherNotes, "Email")),
    ("ceremony_location", Assign(F::CeremonyLocation)),
    ("ceremony_venue", Assign(F::CeremonyLocation)),
    ("ceremony_time", Assign(F::CeremonyStartTime)),
    ("ceremony_end_time", Assign(F::CeremonyEndTime)),
    ("officiant_name", Assign(F::OfficiantName)),
    ("ceremony_music", Flag(F::CeremonyMusicNeeded)),
    ("processional_song", Assign(F::ProcessionalSong)),
    ("bride_entrance_song", Assign(F::BrideEntranceSong)),
    ("recessional_song", Assign(F::RecessionalSong)),
    ("ceremony_notes", Assign(F::CeremonyNotes)),
    ("reception_location", Assign(F::ReceptionLocation)),
    ("reception_venue", Assign(F::ReceptionLocation)),
    ("reception_time", Assign(F::ReceptionStartTime)),
    ("reception_end_time", Assign(F::ReceptionEndTime)),
    ("guest_count", Integer(F::GuestCount)),
    ("cocktail_hour_time", Assign(F::CocktailHourTime)),
    ("cocktail_music", Assign(F::CocktailMusicStyle)),
    ("dinner_time", Assign(F::DinnerTime)),
    ("dinner_style", Assign(F::DinnerStyle)),
    ("dinner_music", Assign(F::DinnerMusicStyle)),
    ("grand_entrance", Flag(F::GrandEntrance)),
    ("grand_entrance_song", Assign(F::GrandEntranceSong)),
    ("wedding_party_names", Assign(F::WeddingPartyIntroductions)),
    ("first_dance_song", Assign(F::FirstDanceSong)),
    ("father_daughter_song", Assign(F::FatherDaughterSong)),
    ("mother_son_song", Assign(F::MotherSonSong)),
    ("toasts_time", Assign(F::ToastsTime)),
    ("toast_givers", Assign(F::ToastGivers)),
    ("cake_cutting_time", Assign(F::CakeCuttingTime)),
    ("cake_cutting_song", Assign(F::CakeCuttingSong)),
    ("bouquet_toss", Flag(F::BouquetToss)),
    ("garter_toss", Flag(F::GarterToss)),
    ("last_dance_song", Assign(F::LastDanceSong)),
    ("private_last_dance", Flag(F::PrivateLastDance)),
    ("reception_notes", Assign(F::ReceptionNotes)),
    ("venue_name", Assign(F::VenueName)),
    ("venue_address", Assign(F::VenueAddress)),
    ("venue_contact", Assign(F::VenueContactName)),
    ("venue_phone", Assign(F::VenueContactPhone)),
    ("load_in_time", Assign(F::LoadInTime)),
    ("setup_notes", Assign(F::SetupNotes)),
    ("planner_name", Assign(F::PlannerName)),
    ("planner_phone", Assign(F::PlannerPhone)),
    ("photographer_name", Assign(F::PhotographerName)),
    ("videographer_name", Assign(F::VideographerName)),
    ("vendor_meals", Flag(F::VendorMealProvided)),
    ("music_genres", Assign(F::MusicGenres)),
    ("favorite_genres", Assign(F::MusicGenres)),
    ("do_not_play", Note(F::DoNotPlayNotes, "Avoid")),
    ("crowd_description", Assign(F::CrowdDescription)),
    ("volume_preference", Assign(F::VolumePreference)),
    ("special_requests", Note(F::SpecialRequests, "Request")),
    ("announcements", Note(F::SpecialAnnouncements, "Announcement")),
    ("event_theme", Assign(F::EventTheme)),
    ("color_scheme", Assign(F::ColorScheme)),
    ("dress_code", Assign(F::DressCode)),
];

fn rule_for(field_name: &str) -> Option<PlanningRule> {
    FIELD_RULES
        .iter()
        .find(|(name, _)| *name == field_name)
        .map(|(_, rule)| *rule)
}

/// Accumulated note lines per notes key, in input order.
#[derive(Default)]
struct NoteBuffers(BTreeMap<PlanningField, String>);

impl NoteBuffers {
    fn append(&mut self, target: PlanningField, label: &str, value: &FieldValue) {
        let buffer = self.0.entry(target).or_default();
        buffer.push_str(&format!("{label}: {value}\n"));
    }

    fn append_comment(&mut self, field_name: &str, value: &FieldValue) {
        self.append(F::OtherComments, &field_name.replace('_', " "), value);
    }

    fn write_into(self, form: &mut PlanningFormData) {
        for (target, lines) in self.0 {
            form.set_field(target, lines.trim_end().to_owned());
        }
    }
}

/// Maps conversational field records onto the planning form.
///
/// Known fields are assigned, coerced or appended to a notes key; anything
/// else is kept as a line in `otherComments`. Blank values are skipped.
#[must_use]
pub fn convert_chat_field_array_to_planning_form(fields: &[FlatField]) -> PlanningFormData {
    let mut form = PlanningFormData::new();
    let mut notes = NoteBuffers::default();

    for field in fields {
        let Some((field_name, value)) = field.captured() else {
            continue;
        };

        match rule_for(field_name) {
            Some(Assign(target)) => form.set_field(target, value.clone()),
            Some(Integer(target)) => match value.to_integer() {
                Some(number) => form.set_field(target, number),
                None => notes.append_comment(field_name, value),
            },
            Some(Flag(target)) => match value.to_flag() {
                Some(flag) => form.set_field(target, flag),
                None => notes.append_comment(field_name, value),
            },
            Some(Note(target, label)) => notes.append(target, label, value),
            None => notes.append_comment(field_name, value),
        }
    }

    notes.write_into(&mut form);
    form
}
