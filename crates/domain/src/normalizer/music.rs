use crate::{FlatField, MusicCategory, MusicIdeasFormData, Song};

use super::humanize_field_name;

const SONG_RULES: &[(&str, MusicCategory, &str)] = &[
    ("first_dance_song", MusicCategory::MustPlay, "First Dance"),
    ("processional_song", MusicCategory::MustPlay, "Processional"),
    ("bride_entrance_song", MusicCategory::MustPlay, "Bride Entrance"),
    ("recessional_song", MusicCategory::MustPlay, "Recessional"),
    ("grand_entrance_song", MusicCategory::MustPlay, "Grand Entrance"),
    ("father_daughter_song", MusicCategory::MustPlay, "Father/Daughter Dance"),
    ("mother_son_song", MusicCategory::MustPlay, "Mother/Son Dance"),
    ("cake_cutting_song", MusicCategory::MustPlay, "Cake Cutting"),
    ("last_dance_song", MusicCategory::MustPlay, "Last Dance"),
    ("bouquet_toss_song", MusicCategory::PlayIfPossible, "Bouquet Toss"),
    ("garter_toss_song", MusicCategory::PlayIfPossible, "Garter Toss"),
    ("favorite_songs", MusicCategory::PlayIfPossible, "Favorite"),
    ("dedication_song", MusicCategory::Dedication, "Dedication"),
    ("requested_only_songs", MusicCategory::PlayOnlyIfRequested, "Only If Requested"),
    ("do_not_play", MusicCategory::DoNotPlay, "Do Not Play"),
    ("do_not_play_songs", MusicCategory::DoNotPlay, "Do Not Play"),
    ("guest_requests", MusicCategory::GuestRequest, "Guest Request"),
];

fn song_rule(field_name: &str) -> Option<(MusicCategory, String)> {
    if let Some((_, category, label)) = SONG_RULES.iter().find(|(name, _, _)| *name == field_name) {
        return Some((*category, (*label).to_owned()));
    }

    (field_name.contains("music") || field_name.contains("song"))
        .then(|| (MusicCategory::MustPlay, humanize_field_name(field_name)))
}

/// Maps conversational field records onto the music ideas form.
///
/// Unknown fields are kept as must-play songs when their name mentions music
/// or a song, and dropped otherwise.
#[must_use]
pub fn convert_chat_music_data_to_form(fields: &[FlatField]) -> MusicIdeasFormData {
    let mut form = MusicIdeasFormData::default();

    for field in fields {
        let Some((field_name, value)) = field.captured() else {
            continue;
        };
        let Some((category, label)) = song_rule(field_name) else {
            continue;
        };

        form.category_mut(category)
            .push(Song::captured(value.to_string(), label));
    }

    form
}
