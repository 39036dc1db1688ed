use proptest::prelude::*;
use serde_json::json;

use super::{
    convert_chat_data_to_timeline, convert_chat_field_array_to_planning_form,
    convert_chat_music_data_to_form, convert_chat_planning_data_to_form,
    convert_planning_data_from_db, convert_planning_data_to_db, humanize_field_name,
    normalize_music, normalize_planning, normalize_timeline,
};
use crate::{
    CapturePayload, FieldValue, FlatField, MusicCategory, MusicIdeasFormData, NestedCapture,
    PlanningField, PlanningFormData, Song, TimelineFormData,
};

fn nested(value: serde_json::Value) -> NestedCapture {
    match CapturePayload::classify(&value) {
        CapturePayload::Nested(capture) => capture,
        _ => unreachable!(),
    }
}

#[test]
fn note_fields_accumulate_in_input_order() {
    let form = convert_chat_field_array_to_planning_form(&[
        FlatField::new("client_name", "Amy"),
        FlatField::new("fiance_name", "Sam"),
    ]);

    assert_eq!(
        form.text(PlanningField::OtherNotes),
        Some("Client: Amy\nFiancé: Sam")
    );
    assert_eq!(form.len(), 1);
}

#[test]
fn unknown_fields_fall_back_to_other_comments() {
    let form = convert_chat_field_array_to_planning_form(&[
        FlatField::new("favorite_color", "teal"),
        FlatField::new("pet_ring_bearer", "Biscuit the corgi"),
    ]);

    assert_eq!(
        form.text(PlanningField::OtherComments),
        Some("favorite color: teal\npet ring bearer: Biscuit the corgi")
    );
}

#[test]
fn blank_and_nameless_fields_are_skipped() {
    let form = convert_chat_field_array_to_planning_form(&[
        FlatField::new("client_name", ""),
        FlatField::new("venue_name", "   "),
        FlatField {
            field_name: None,
            field_value: Some(FieldValue::from("orphan")),
        },
        FlatField {
            field_name: Some("dress_code".to_owned()),
            field_value: None,
        },
    ]);

    assert!(form.is_empty());
}

#[test]
fn direct_assignments_use_last_write() {
    let form = convert_chat_field_array_to_planning_form(&[
        FlatField::new("ceremony_location", "Garden"),
        FlatField::new("ceremony_venue", "Chapel"),
    ]);

    assert_eq!(form.text(PlanningField::CeremonyLocation), Some("Chapel"));
}

#[test]
fn guest_count_is_coerced_to_integer() {
    let form = convert_chat_field_array_to_planning_form(&[FlatField::new("guest_count", "120")]);
    assert_eq!(
        form.field(PlanningField::GuestCount),
        Some(&FieldValue::from(120_i64))
    );
}

#[test]
fn uncoercible_values_are_kept_as_comments() {
    let form = convert_chat_field_array_to_planning_form(&[
        FlatField::new("guest_count", "around a hundred"),
        FlatField::new("bouquet_toss", "ask the bride"),
        FlatField::new("garter_toss", "No"),
    ]);

    assert!(form.field(PlanningField::GuestCount).is_none());
    assert_eq!(
        form.field(PlanningField::GarterToss),
        Some(&FieldValue::Bool(false))
    );
    assert_eq!(
        form.text(PlanningField::OtherComments),
        Some("guest count: around a hundred\nbouquet toss: ask the bride")
    );
}

#[test]
fn separate_note_targets_do_not_mix() {
    let form = convert_chat_field_array_to_planning_form(&[
        FlatField::new("special_requests", "Sparkler exit"),
        FlatField::new("wedding_date", "2026-06-20"),
        FlatField::new("special_requests", "No line dances"),
    ]);

    assert_eq!(
        form.text(PlanningField::SpecialRequests),
        Some("Request: Sparkler exit\nRequest: No line dances")
    );
    assert_eq!(
        form.text(PlanningField::OtherNotes),
        Some("Wedding Date: 2026-06-20")
    );
}

#[test]
fn first_dance_song_is_a_must_play() {
    let form = convert_chat_music_data_to_form(&[FlatField::new("first_dance_song", "Perfect")]);

    assert_eq!(
        form.must_play,
        vec![Song {
            song_title: "Perfect".to_owned(),
            artist: Some(String::new()),
            client_visible_title: Some("First Dance".to_owned()),
        }]
    );
    for category in MusicCategory::all() {
        if *category != MusicCategory::MustPlay {
            assert!(form.category(*category).is_empty());
        }
    }
}

#[test]
fn unknown_song_fields_are_humanized() {
    let form = convert_chat_music_data_to_form(&[
        FlatField::new("anniversary_dance_song", "At Last"),
        FlatField::new("walk_out_music", "Mr. Blue Sky"),
        FlatField::new("favorite_color", "teal"),
    ]);

    let titles: Vec<_> = form
        .must_play
        .iter()
        .map(|song| song.client_visible_title.as_deref())
        .collect();
    assert_eq!(
        titles,
        vec![Some("Anniversary Dance Song"), Some("Walk Out Music")]
    );
    assert_eq!(form.song_count(), 2);
}

#[test]
fn music_categories_follow_the_table() {
    let form = convert_chat_music_data_to_form(&[
        FlatField::new("do_not_play", "Macarena"),
        FlatField::new("guest_requests", "September"),
        FlatField::new("dedication_song", "My Girl"),
        FlatField::new("requested_only_songs", "Cha Cha Slide"),
        FlatField::new("favorite_songs", "Dancing Queen"),
    ]);

    assert_eq!(form.do_not_play.len(), 1);
    assert_eq!(form.guest_request.len(), 1);
    assert_eq!(form.dedication.len(), 1);
    assert_eq!(form.play_only_if_requested.len(), 1);
    assert_eq!(form.play_if_possible.len(), 1);
    assert!(form.must_play.is_empty());
}

#[test]
fn ceremony_time_becomes_first_timeline_item() {
    let form = convert_chat_data_to_timeline(&[FlatField::new("ceremony_time", "16:00")]);

    assert_eq!(form.timeline_items.len(), 1);
    let item = &form.timeline_items[0];
    assert_eq!(item.name, "Ceremony");
    assert_eq!(item.start_time.as_deref(), Some("16:00"));
    assert_eq!(item.end_time.as_deref(), Some(""));
    assert_eq!(item.time_offset_minutes, Some(0));
    assert_eq!(item.order, 0);
}

#[test]
fn timeline_is_allow_listed_and_ordered() {
    let form = convert_chat_data_to_timeline(&[
        FlatField::new("dinner_time", "18:30"),
        FlatField::new("favorite_color", "teal"),
        FlatField::new("ceremony_time", "16:00"),
        FlatField::new("cocktail_hour_time", "17:00"),
        FlatField::new("dinner_time", "18:45"),
    ]);

    let ids: Vec<_> = form
        .timeline_items
        .iter()
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(ids, vec!["ceremony", "cocktail_hour", "dinner"]);
    assert_eq!(form.timeline_items[2].start_time.as_deref(), Some("18:45"));
    assert!(form.validate().is_ok());
}

#[test]
fn nested_capture_assigns_per_domain() {
    let form = convert_chat_planning_data_to_form(&nested(json!({
        "ceremony": {"location": "Rose Garden", "start_time": "16:00", "officiant": "Rev. Lee"},
        "reception": {"guest_count": "150", "dinner_style": "Buffet"},
        "special_moments": {"grand_entrance": "yes", "first_dance": "Perfect"},
        "notes": {"other": "Vegan cake"}
    })));

    assert_eq!(
        form.text(PlanningField::CeremonyLocation),
        Some("Rose Garden")
    );
    assert_eq!(form.text(PlanningField::CeremonyStartTime), Some("16:00"));
    assert_eq!(form.text(PlanningField::OfficiantName), Some("Rev. Lee"));
    assert_eq!(
        form.field(PlanningField::GuestCount),
        Some(&FieldValue::from(150_i64))
    );
    assert_eq!(
        form.field(PlanningField::GrandEntrance),
        Some(&FieldValue::Bool(true))
    );
    assert_eq!(form.text(PlanningField::FirstDanceSong), Some("Perfect"));
    assert_eq!(form.text(PlanningField::OtherNotes), Some("Vegan cake"));
}

#[test]
fn nested_capture_drops_unknown_and_unusable_values() {
    let form = convert_chat_planning_data_to_form(&nested(json!({
        "ceremony": {"location": null, "unicorns": "two", "notes": ["a", "b"]},
        "reception": "not an object",
        "astrology": {"sign": "Leo"},
        "venue": {"name": "", "address": {"street": "Main"}}
    })));

    assert!(form.is_empty());
    assert!(form.field(PlanningField::OtherComments).is_none());
}

#[test]
fn nested_and_flat_mappers_differ_on_unknown_fields() {
    let flat = convert_chat_field_array_to_planning_form(&[FlatField::new("unicorns", "two")]);
    let nested_form = convert_chat_planning_data_to_form(&nested(json!({
        "ceremony": {"unicorns": "two"}
    })));

    assert_eq!(
        flat.text(PlanningField::OtherComments),
        Some("unicorns: two")
    );
    assert!(nested_form.is_empty());
}

#[test]
fn duplicate_db_rows_keep_last_value_without_coercion() {
    let form = convert_planning_data_from_db(&[
        FlatField::new("guest_count", "50"),
        FlatField::new("guest_count", "75"),
    ]);

    assert_eq!(form.get("guest_count"), Some(&FieldValue::from("75")));
}

#[test]
fn flatten_keeps_false_and_zero_but_drops_empty() {
    let mut form = PlanningFormData::new();
    form.set_field(PlanningField::BouquetToss, false);
    form.set_field(PlanningField::GuestCount, 0_i64);
    form.set_field(PlanningField::DressCode, "");
    form.set_null(PlanningField::VenueName.as_str());

    let rows = convert_planning_data_to_db(&form);
    let names: Vec<_> = rows
        .iter()
        .filter_map(|row| row.field_name.as_deref())
        .collect();
    assert_eq!(names, vec!["bouquetToss", "guestCount"]);
}

#[test]
fn non_array_payloads_produce_defaults() {
    for value in [json!(null), json!("text"), json!(7), json!({"fields": "x"})] {
        let payload = CapturePayload::classify(&value);
        assert_eq!(normalize_music(&payload), MusicIdeasFormData::default());
        assert_eq!(normalize_timeline(&payload), TimelineFormData::default());
        assert!(convert_planning_data_from_db(payload.fields()).is_empty());
    }

    assert!(normalize_planning(&CapturePayload::Unrecognized).is_empty());
}

#[test]
fn normalize_planning_dispatches_on_shape() {
    let flat = normalize_planning(&CapturePayload::classify(&json!([
        {"field_name": "venue_name", "field_value": "The Barn"}
    ])));
    let grouped = normalize_planning(&CapturePayload::classify(&json!({
        "venue": {"name": "The Barn"}
    })));

    assert_eq!(flat, grouped);
    assert_eq!(flat.text(PlanningField::VenueName), Some("The Barn"));
}

#[test]
fn humanize_title_cases_each_word() {
    assert_eq!(
        humanize_field_name("special_song_choice"),
        "Special Song Choice"
    );
    assert_eq!(humanize_field_name("song"), "Song");
    assert_eq!(humanize_field_name("dj_music_pick"), "Dj Music Pick");
}

fn field_value_strategy() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        any::<bool>().prop_map(FieldValue::Bool),
        any::<i64>().prop_map(FieldValue::from),
        "[A-Za-z0-9 :.,'-]{1,24}".prop_map(FieldValue::Text),
    ]
}

fn planning_key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(PlanningField::all()).prop_map(|field| field.as_str().to_owned()),
        "[a-z][a-z_]{0,15}",
    ]
}

proptest! {
    #[test]
    fn database_round_trip_restores_form(
        values in proptest::collection::btree_map(planning_key_strategy(), field_value_strategy(), 0..24)
    ) {
        let mut form = PlanningFormData::new();
        for (key, value) in values {
            form.set(key, value);
        }

        let restored = convert_planning_data_from_db(&convert_planning_data_to_db(&form));
        prop_assert_eq!(restored, form);
    }

    #[test]
    fn converters_never_fail_on_arbitrary_records(
        records in proptest::collection::vec(
            (proptest::option::of("[a-z_]{0,20}"), proptest::option::of(field_value_strategy())),
            0..16,
        )
    ) {
        let fields: Vec<FlatField> = records
            .into_iter()
            .map(|(field_name, field_value)| FlatField { field_name, field_value })
            .collect();

        let music = convert_chat_music_data_to_form(&fields);
        let timeline = convert_chat_data_to_timeline(&fields);
        let _planning = convert_chat_field_array_to_planning_form(&fields);

        prop_assert!(music.song_count() <= fields.len());
        prop_assert!(
            timeline
                .timeline_items
                .windows(2)
                .all(|pair| pair[0].order < pair[1].order)
        );
    }
}
