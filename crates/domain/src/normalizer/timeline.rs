use std::collections::BTreeMap;

use crate::{FlatField, TimelineFormData, TimelineItem};

/// A timed moment recognized in the capture. Its index is its running order.
struct TimelineMoment {
    field_name: &'static str,
    id: &'static str,
    name: &'static str,
    notes: &'static str,
}

const TIMELINE_MOMENTS: &[TimelineMoment] = &[
    TimelineMoment {
        field_name: "ceremony_time",
        id: "ceremony",
        name: "Ceremony",
        notes: "Processional, vows and recessional",
    },
    TimelineMoment {
        field_name: "cocktail_hour_time",
        id: "cocktail_hour",
        name: "Cocktail Hour",
        notes: "Background music while guests mingle",
    },
    TimelineMoment {
        field_name: "grand_entrance_time",
        id: "grand_entrance",
        name: "Grand Entrance",
        notes: "Introduce the wedding party and the couple",
    },
    TimelineMoment {
        field_name: "dinner_time",
        id: "dinner",
        name: "Dinner",
        notes: "Dinner service with low background music",
    },
    TimelineMoment {
        field_name: "toasts_time",
        id: "toasts",
        name: "Toasts",
        notes: "Speeches from family and friends",
    },
    TimelineMoment {
        field_name: "first_dance_time",
        id: "first_dance",
        name: "First Dance",
        notes: "The couple's first dance",
    },
    TimelineMoment {
        field_name: "parent_dances_time",
        id: "parent_dances",
        name: "Parent Dances",
        notes: "Father/daughter and mother/son dances",
    },
    TimelineMoment {
        field_name: "cake_cutting_time",
        id: "cake_cutting",
        name: "Cake Cutting",
        notes: "Announce the cake cutting",
    },
    TimelineMoment {
        field_name: "bouquet_toss_time",
        id: "bouquet_toss",
        name: "Bouquet Toss",
        notes: "Gather single guests on the dance floor",
    },
    TimelineMoment {
        field_name: "open_dancing_time",
        id: "open_dancing",
        name: "Open Dancing",
        notes: "Dance floor opens to everyone",
    },
    TimelineMoment {
        field_name: "last_dance_time",
        id: "last_dance",
        name: "Last Dance",
        notes: "Final song of the night",
    },
    TimelineMoment {
        field_name: "send_off_time",
        id: "send_off",
        name: "Send Off",
        notes: "Guests line up for the couple's exit",
    },
];

/// Extracts timed moments from conversational field records.
///
/// Only allow-listed fields produce items. A moment captured twice keeps the
/// later time, so running order stays unique. Items come back sorted by order.
#[must_use]
pub fn convert_chat_data_to_timeline(fields: &[FlatField]) -> TimelineFormData {
    let mut items: BTreeMap<i32, TimelineItem> = BTreeMap::new();

    for field in fields {
        let Some((field_name, value)) = field.captured() else {
            continue;
        };
        let Some((index, moment)) = TIMELINE_MOMENTS
            .iter()
            .enumerate()
            .find(|(_, moment)| moment.field_name == field_name)
        else {
            continue;
        };

        let order = i32::try_from(index).unwrap_or(i32::MAX);
        items.insert(
            order,
            TimelineItem {
                id: moment.id.to_owned(),
                name: moment.name.to_owned(),
                start_time: Some(value.to_string()),
                end_time: Some(String::new()),
                notes: Some(moment.notes.to_owned()),
                time_offset_minutes: Some(0),
                order,
            },
        );
    }

    TimelineFormData {
        timeline_items: items.into_values().collect(),
    }
}
