//! Event timeline form data.

use std::collections::HashSet;

use chrono::NaiveTime;
use encore_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Parses an `HH:MM` clock time.
pub(crate) fn parse_clock_time(label: &str, value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|error| {
        AppError::Validation(format!(
            "'{label}' must be a HH:MM time, got '{value}': {error}"
        ))
    })
}

/// One scheduled moment of the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Stable item identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Start time (`HH:MM`).
    #[serde(default)]
    pub start_time: Option<String>,
    /// End time (`HH:MM`).
    #[serde(default)]
    pub end_time: Option<String>,
    /// Notes for the DJ.
    #[serde(default)]
    pub notes: Option<String>,
    /// Offset relative to the previous item, in minutes.
    #[serde(default)]
    pub time_offset_minutes: Option<i32>,
    /// Position in the running order.
    pub order: i32,
}

impl TimelineItem {
    /// Creates a validated timeline item.
    ///
    /// Empty times are accepted as "not scheduled yet".
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_time: Option<String>,
        end_time: Option<String>,
        notes: Option<String>,
        time_offset_minutes: Option<i32>,
        order: i32,
    ) -> AppResult<Self> {
        let item = Self {
            id: NonEmptyString::new(id)?.into(),
            name: NonEmptyString::new(name)?.into(),
            start_time,
            end_time,
            notes,
            time_offset_minutes,
            order,
        };
        item.validate()?;

        Ok(item)
    }

    /// Checks identifier, name, times and offset.
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            return Err(AppError::Validation(
                "timeline items need an id and a name".to_owned(),
            ));
        }

        let start = self.scheduled(self.start_time.as_deref(), "start_time")?;
        let end = self.scheduled(self.end_time.as_deref(), "end_time")?;
        if let (Some(start), Some(end)) = (start, end)
            && end < start
        {
            return Err(AppError::Validation(format!(
                "timeline item '{}' ends before it starts",
                self.id
            )));
        }

        if self.time_offset_minutes.is_some_and(|offset| offset < 0) {
            return Err(AppError::Validation(format!(
                "timeline item '{}' has a negative time offset",
                self.id
            )));
        }

        Ok(())
    }

    fn scheduled(&self, value: Option<&str>, member: &str) -> AppResult<Option<NaiveTime>> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse_clock_time(&format!("{}.{member}", self.id), text).map(Some),
        }
    }
}

/// Timeline form: the running order of the event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimelineFormData {
    /// Items in display order.
    #[serde(default)]
    pub timeline_items: Vec<TimelineItem>,
}

impl TimelineFormData {
    /// Sorts items by running order.
    pub fn sort_by_order(&mut self) {
        self.timeline_items.sort_by_key(|item| item.order);
    }

    /// Validates every item and the uniqueness of ids and running order.
    pub fn validate(&self) -> AppResult<()> {
        let mut orders = HashSet::new();
        let mut ids = HashSet::new();

        for item in &self.timeline_items {
            item.validate()?;

            if !orders.insert(item.order) {
                return Err(AppError::Validation(format!(
                    "timeline order '{}' is used more than once",
                    item.order
                )));
            }

            if !ids.insert(item.id.as_str()) {
                return Err(AppError::Validation(format!(
                    "timeline item id '{}' is used more than once",
                    item.id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{TimelineFormData, TimelineItem};

    fn item(id: &str, start: &str, order: i32) -> TimelineItem {
        TimelineItem::new(id, id, Some(start.to_owned()), None, None, Some(0), order)
            .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn item_requires_id_and_name() {
        assert!(TimelineItem::new("", "Ceremony", None, None, None, None, 0).is_err());
        assert!(TimelineItem::new("ceremony", " ", None, None, None, None, 0).is_err());
    }

    #[test]
    fn item_rejects_malformed_or_inverted_times() {
        let malformed = TimelineItem::new(
            "dinner",
            "Dinner",
            Some("7pm".to_owned()),
            None,
            None,
            None,
            0,
        );
        assert!(malformed.is_err());

        let inverted = TimelineItem::new(
            "dinner",
            "Dinner",
            Some("19:00".to_owned()),
            Some("18:00".to_owned()),
            None,
            None,
            0,
        );
        assert!(inverted.is_err());
    }

    #[test]
    fn empty_end_time_is_unscheduled() {
        let result = TimelineItem::new(
            "ceremony",
            "Ceremony",
            Some("16:00".to_owned()),
            Some(String::new()),
            None,
            Some(0),
            0,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn form_rejects_duplicate_order() {
        let form = TimelineFormData {
            timeline_items: vec![item("ceremony", "16:00", 0), item("dinner", "18:00", 0)],
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn sort_by_order_restores_running_order() {
        let mut form = TimelineFormData {
            timeline_items: vec![item("dinner", "18:00", 3), item("ceremony", "16:00", 0)],
        };
        form.sort_by_order();
        assert_eq!(form.timeline_items[0].id, "ceremony");
        assert!(form.validate().is_ok());
    }
}
