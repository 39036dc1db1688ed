//! Music ideas form data.

use std::str::FromStr;

use encore_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Song request categories shown on the music ideas form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicCategory {
    /// Songs the DJ must play.
    MustPlay,
    /// Songs to play when time allows.
    PlayIfPossible,
    /// Dedications.
    Dedication,
    /// Songs to play only when a guest asks.
    PlayOnlyIfRequested,
    /// Songs that must not be played.
    DoNotPlay,
    /// Requests collected from guests.
    GuestRequest,
}

impl MusicCategory {
    /// Returns the stable category key.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MustPlay => "must_play",
            Self::PlayIfPossible => "play_if_possible",
            Self::Dedication => "dedication",
            Self::PlayOnlyIfRequested => "play_only_if_requested",
            Self::DoNotPlay => "do_not_play",
            Self::GuestRequest => "guest_request",
        }
    }

    /// Returns all categories in form order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[MusicCategory] = &[
            MusicCategory::MustPlay,
            MusicCategory::PlayIfPossible,
            MusicCategory::Dedication,
            MusicCategory::PlayOnlyIfRequested,
            MusicCategory::DoNotPlay,
            MusicCategory::GuestRequest,
        ];

        ALL
    }
}

impl FromStr for MusicCategory {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|category| category.as_str() == value)
            .copied()
            .ok_or_else(|| AppError::Validation(format!("unknown music category '{value}'")))
    }
}

/// One song entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Song title.
    pub song_title: String,
    /// Performing artist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Moment label shown to the client, for example "First Dance".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_visible_title: Option<String>,
}

impl Song {
    /// Creates a validated song entry.
    pub fn new(
        song_title: impl Into<String>,
        artist: Option<String>,
        client_visible_title: Option<String>,
    ) -> AppResult<Self> {
        let song_title = song_title.into().trim().to_owned();
        if song_title.is_empty() {
            return Err(AppError::Validation(
                "song title must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            song_title,
            artist,
            client_visible_title,
        })
    }

    /// Creates an entry from a conversational capture.
    ///
    /// The artist is unknown and recorded as an empty string.
    #[must_use]
    pub(crate) fn captured(song_title: impl Into<String>, client_visible_title: String) -> Self {
        Self {
            song_title: song_title.into(),
            artist: Some(String::new()),
            client_visible_title: Some(client_visible_title),
        }
    }
}

/// Music ideas form: one song list per category.
///
/// Every category is present on the wire, even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MusicIdeasFormData {
    /// Songs the DJ must play.
    #[serde(default)]
    pub must_play: Vec<Song>,
    /// Songs to play when time allows.
    #[serde(default)]
    pub play_if_possible: Vec<Song>,
    /// Dedications.
    #[serde(default)]
    pub dedication: Vec<Song>,
    /// Songs to play only when a guest asks.
    #[serde(default)]
    pub play_only_if_requested: Vec<Song>,
    /// Songs that must not be played.
    #[serde(default)]
    pub do_not_play: Vec<Song>,
    /// Requests collected from guests.
    #[serde(default)]
    pub guest_request: Vec<Song>,
}

impl MusicIdeasFormData {
    /// Returns the songs of one category.
    #[must_use]
    pub fn category(&self, category: MusicCategory) -> &[Song] {
        match category {
            MusicCategory::MustPlay => &self.must_play,
            MusicCategory::PlayIfPossible => &self.play_if_possible,
            MusicCategory::Dedication => &self.dedication,
            MusicCategory::PlayOnlyIfRequested => &self.play_only_if_requested,
            MusicCategory::DoNotPlay => &self.do_not_play,
            MusicCategory::GuestRequest => &self.guest_request,
        }
    }

    /// Returns the mutable song list of one category.
    pub fn category_mut(&mut self, category: MusicCategory) -> &mut Vec<Song> {
        match category {
            MusicCategory::MustPlay => &mut self.must_play,
            MusicCategory::PlayIfPossible => &mut self.play_if_possible,
            MusicCategory::Dedication => &mut self.dedication,
            MusicCategory::PlayOnlyIfRequested => &mut self.play_only_if_requested,
            MusicCategory::DoNotPlay => &mut self.do_not_play,
            MusicCategory::GuestRequest => &mut self.guest_request,
        }
    }

    /// Returns the total number of songs across categories.
    #[must_use]
    pub fn song_count(&self) -> usize {
        MusicCategory::all()
            .iter()
            .map(|category| self.category(*category).len())
            .sum()
    }

    /// Validates every song entry before saving.
    pub fn validate(&self) -> AppResult<()> {
        for category in MusicCategory::all() {
            for (index, song) in self.category(*category).iter().enumerate() {
                if song.song_title.trim().is_empty() {
                    return Err(AppError::Validation(format!(
                        "song {index} in '{}' must have a title",
                        category.as_str()
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{MusicCategory, MusicIdeasFormData, Song};

    #[test]
    fn song_requires_title() {
        assert!(Song::new("   ", None, None).is_err());
        let song = Song::new(" Perfect ", Some("Ed Sheeran".to_owned()), None);
        assert!(matches!(song, Ok(song) if song.song_title == "Perfect"));
    }

    #[test]
    fn missing_categories_deserialize_as_empty() {
        let parsed: Result<MusicIdeasFormData, _> =
            serde_json::from_value(json!({"must_play": [{"song_title": "Perfect"}]}));
        let form = parsed.unwrap_or_else(|_| unreachable!());
        assert_eq!(form.must_play.len(), 1);
        assert!(form.do_not_play.is_empty());
        assert_eq!(form.song_count(), 1);
    }

    #[test]
    fn every_category_is_serialized() {
        let value = serde_json::to_value(MusicIdeasFormData::default())
            .unwrap_or_else(|_| unreachable!());
        for category in MusicCategory::all() {
            assert_eq!(value.get(category.as_str()), Some(&json!([])));
        }
    }

    #[test]
    fn validate_rejects_untitled_songs() {
        let mut form = MusicIdeasFormData::default();
        form.category_mut(MusicCategory::GuestRequest).push(Song {
            song_title: String::new(),
            artist: None,
            client_visible_title: None,
        });
        assert!(form.validate().is_err());
    }
}
