//! Planning form data.

use std::collections::BTreeMap;
use std::str::FromStr;

use encore_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::FieldValue;
use crate::timeline::parse_clock_time;

/// Value type expected by a planning form key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanningFieldKind {
    /// Free text.
    Text,
    /// Non-negative whole number.
    Integer,
    /// Yes/no toggle, defaulted to `false` on a blank form.
    Flag,
    /// `HH:MM` clock time.
    Time,
}

macro_rules! planning_fields {
    ($($variant:ident => ($key:literal, $kind:ident)),+ $(,)?) => {
        /// Known planning form keys.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PlanningField {
            $(
                #[doc = concat!("`", $key, "`")]
                $variant,
            )+
        }

        impl PlanningField {
            /// Returns the camelCase form key.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            /// Returns the value type expected for this key.
            #[must_use]
            pub fn kind(&self) -> PlanningFieldKind {
                match self {
                    $(Self::$variant => PlanningFieldKind::$kind,)+
                }
            }

            /// Returns all known planning keys in form order.
            #[must_use]
            pub fn all() -> &'static [Self] {
                const ALL: &[PlanningField] = &[$(PlanningField::$variant,)+];

                ALL
            }
        }
    };
}

planning_fields! {
    CeremonyLocation => ("ceremonyLocation", Text),
    CeremonyStartTime => ("ceremonyStartTime", Time),
    CeremonyEndTime => ("ceremonyEndTime", Time),
    OfficiantName => ("officiantName", Text),
    CeremonyMusicNeeded => ("ceremonyMusicNeeded", Flag),
    ProcessionalSong => ("processionalSong", Text),
    BrideEntranceSong => ("brideEntranceSong", Text),
    RecessionalSong => ("recessionalSong", Text),
    CeremonyNotes => ("ceremonyNotes", Text),
    ReceptionLocation => ("receptionLocation", Text),
    ReceptionStartTime => ("receptionStartTime", Time),
    ReceptionEndTime => ("receptionEndTime", Time),
    GuestCount => ("guestCount", Integer),
    CocktailHourTime => ("cocktailHourTime", Time),
    CocktailMusicStyle => ("cocktailMusicStyle", Text),
    DinnerTime => ("dinnerTime", Time),
    DinnerStyle => ("dinnerStyle", Text),
    DinnerMusicStyle => ("dinnerMusicStyle", Text),
    GrandEntrance => ("grandEntrance", Flag),
    GrandEntranceSong => ("grandEntranceSong", Text),
    WeddingPartyIntroductions => ("weddingPartyIntroductions", Text),
    FirstDanceSong => ("firstDanceSong", Text),
    FatherDaughterSong => ("fatherDaughterSong", Text),
    MotherSonSong => ("motherSonSong", Text),
    ToastsTime => ("toastsTime", Time),
    ToastGivers => ("toastGivers", Text),
    CakeCuttingTime => ("cakeCuttingTime", Time),
    CakeCuttingSong => ("cakeCuttingSong", Text),
    BouquetToss => ("bouquetToss", Flag),
    GarterToss => ("garterToss", Flag),
    LastDanceSong => ("lastDanceSong", Text),
    PrivateLastDance => ("privateLastDance", Flag),
    ReceptionNotes => ("receptionNotes", Text),
    VenueName => ("venueName", Text),
    VenueAddress => ("venueAddress", Text),
    VenueContactName => ("venueContactName", Text),
    VenueContactPhone => ("venueContactPhone", Text),
    LoadInTime => ("loadInTime", Time),
    SetupNotes => ("setupNotes", Text),
    PlannerName => ("plannerName", Text),
    PlannerPhone => ("plannerPhone", Text),
    PhotographerName => ("photographerName", Text),
    VideographerName => ("videographerName", Text),
    VendorMealProvided => ("vendorMealProvided", Flag),
    MusicGenres => ("musicGenres", Text),
    DoNotPlayNotes => ("doNotPlayNotes", Text),
    CrowdDescription => ("crowdDescription", Text),
    VolumePreference => ("volumePreference", Text),
    SpecialRequests => ("specialRequests", Text),
    SpecialAnnouncements => ("specialAnnouncements", Text),
    EventTheme => ("eventTheme", Text),
    ColorScheme => ("colorScheme", Text),
    DressCode => ("dressCode", Text),
    OtherNotes => ("otherNotes", Text),
    OtherComments => ("otherComments", Text),
}

impl FromStr for PlanningField {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|field| field.as_str() == value)
            .copied()
            .ok_or_else(|| AppError::Validation(format!("unknown planning field '{value}'")))
    }
}

/// Planning form values keyed by form key.
///
/// A missing key is "not answered"; a key holding `None` is an explicit `null`.
/// Storage rows may carry keys outside [`PlanningField`], which are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanningFormData(BTreeMap<String, Option<FieldValue>>);

impl PlanningFormData {
    /// Creates an empty, partial form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a blank form with every flag defaulted to `false`.
    #[must_use]
    pub fn blank() -> Self {
        let mut form = Self::new();
        for field in PlanningField::all() {
            if field.kind() == PlanningFieldKind::Flag {
                form.set_field(*field, false);
            }
        }

        form
    }

    /// Returns the value stored under a key, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key).and_then(Option::as_ref)
    }

    /// Returns the value stored under a known planning key.
    #[must_use]
    pub fn field(&self, field: PlanningField) -> Option<&FieldValue> {
        self.get(field.as_str())
    }

    /// Returns the text stored under a known planning key.
    #[must_use]
    pub fn text(&self, field: PlanningField) -> Option<&str> {
        self.field(field).and_then(FieldValue::as_text)
    }

    /// Returns whether the key is present, including explicit `null`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Stores a value under a key, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), Some(value.into()));
    }

    /// Stores a value under a known planning key.
    pub fn set_field(&mut self, field: PlanningField, value: impl Into<FieldValue>) {
        self.set(field.as_str(), value);
    }

    /// Stores an explicit `null` under a key.
    pub fn set_null(&mut self, key: impl Into<String>) {
        self.0.insert(key.into(), None);
    }

    /// Iterates over keys in order, including explicit `null` entries.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&FieldValue>)> {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    /// Returns the number of keys present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no key is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Validates a planning form before it is saved.
///
/// Blank answers are accepted everywhere. Keys outside [`PlanningField`] are
/// not checked.
pub fn validate_planning_form(form: &PlanningFormData) -> AppResult<()> {
    for field in PlanningField::all() {
        let Some(value) = form.field(*field) else {
            continue;
        };
        if value.is_blank() {
            continue;
        }

        match field.kind() {
            PlanningFieldKind::Text => {}
            PlanningFieldKind::Integer => {
                let is_whole = match value {
                    FieldValue::Number(number) => number.is_i64() || number.is_u64(),
                    FieldValue::Text(text) => text.trim().parse::<i64>().is_ok(),
                    FieldValue::Bool(_) => false,
                };
                if !is_whole || value.to_integer().is_some_and(|count| count < 0) {
                    return Err(AppError::Validation(format!(
                        "'{}' must be a non-negative whole number, got '{value}'",
                        field.as_str()
                    )));
                }
            }
            PlanningFieldKind::Flag => {
                if value.to_flag().is_none() {
                    return Err(AppError::Validation(format!(
                        "'{}' must be yes or no, got '{value}'",
                        field.as_str()
                    )));
                }
            }
            PlanningFieldKind::Time => {
                let Some(text) = value.as_text() else {
                    return Err(AppError::Validation(format!(
                        "'{}' must be a HH:MM time, got '{value}'",
                        field.as_str()
                    )));
                };
                parse_clock_time(field.as_str(), text)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use super::{PlanningField, PlanningFieldKind, PlanningFormData, validate_planning_form};
    use crate::FieldValue;

    #[test]
    fn planning_keys_are_unique_and_parse_back() {
        let mut seen = HashSet::new();
        for field in PlanningField::all() {
            assert!(seen.insert(field.as_str()));
            assert!(matches!(
                PlanningField::from_str(field.as_str()),
                Ok(parsed) if parsed == *field
            ));
        }
        assert!(PlanningField::all().len() >= 50);
    }

    #[test]
    fn blank_form_defaults_flags_only() {
        let form = PlanningFormData::blank();
        for field in PlanningField::all() {
            let expected =
                (field.kind() == PlanningFieldKind::Flag).then_some(FieldValue::Bool(false));
            assert_eq!(form.field(*field).cloned(), expected);
        }
    }

    #[test]
    fn explicit_null_is_kept_but_has_no_value() {
        let mut form = PlanningFormData::new();
        form.set_null("venueName");
        assert!(form.contains_key("venueName"));
        assert!(form.get("venueName").is_none());
    }

    #[test]
    fn form_deserializes_nulls_and_mixed_scalars() {
        let parsed: Result<PlanningFormData, _> = serde_json::from_str(
            r#"{"guestCount": 120, "grandEntrance": true, "venueName": null, "dressCode": "Black tie"}"#,
        );
        let form = parsed.unwrap_or_else(|_| unreachable!());
        assert_eq!(form.len(), 4);
        assert_eq!(
            form.field(PlanningField::GuestCount),
            Some(&FieldValue::from(120_i64))
        );
        assert_eq!(form.text(PlanningField::DressCode), Some("Black tie"));
        assert!(form.get("venueName").is_none());
    }

    #[test]
    fn validation_accepts_well_formed_form() {
        let mut form = PlanningFormData::blank();
        form.set_field(PlanningField::GuestCount, "150");
        form.set_field(PlanningField::CeremonyStartTime, "16:00");
        form.set_field(PlanningField::ReceptionEndTime, "");
        form.set_field(PlanningField::BouquetToss, "yes");
        form.set("legacy_key", "anything goes");
        assert!(validate_planning_form(&form).is_ok());
    }

    #[test]
    fn validation_rejects_negative_or_fractional_guest_count() {
        let mut form = PlanningFormData::new();
        form.set_field(PlanningField::GuestCount, -3_i64);
        assert!(validate_planning_form(&form).is_err());

        form.set_field(PlanningField::GuestCount, "12.5");
        assert!(validate_planning_form(&form).is_err());
    }

    #[test]
    fn validation_rejects_malformed_times_and_flags() {
        let mut form = PlanningFormData::new();
        form.set_field(PlanningField::DinnerTime, "half past six");
        assert!(validate_planning_form(&form).is_err());

        let mut form = PlanningFormData::new();
        form.set_field(PlanningField::GarterToss, "perhaps");
        assert!(validate_planning_form(&form).is_err());
    }
}
