use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::listagem::schedule::Schedule;

/// Formats accepted for naive date-times, tried in order.
/// The first one covers what a `datetime-local` input produces.
const DATE_TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum EventKind {
    #[default]
    #[serde(rename = "CONGRESSO")]
    #[strum(to_string = "CONGRESSO")]
    Congresso,
    #[serde(rename = "TREINAMENTO")]
    #[strum(to_string = "TREINAMENTO")]
    Treinamento,
    #[serde(rename = "WORKSHOP")]
    #[strum(to_string = "WORKSHOP")]
    Workshop,
    #[serde(rename = "IMERSÃO")]
    #[strum(to_string = "IMERSÃO", serialize = "IMERSAO")]
    Imersao,
    #[serde(rename = "REUNIÃO")]
    #[strum(to_string = "REUNIÃO", serialize = "REUNIAO")]
    Reuniao,
    #[serde(rename = "HACKATON")]
    #[strum(to_string = "HACKATON")]
    Hackaton,
    #[serde(rename = "STARTUP")]
    #[strum(to_string = "STARTUP")]
    Startup,
}

impl EventKind {
    /// Display label, e.g. "Imersão"
    pub fn label(&self) -> String {
        let raw: &'static str = self.into();

        voca_rs::case::capitalize(raw, true)
    }

    /// Looks a kind up by name or label, ignoring case (accents included).
    /// Unaccented spellings such as "imersao" are accepted too.
    pub fn from_name(value: &str) -> Option<EventKind> {
        let wanted = value.trim().to_lowercase();

        EventKind::iter()
            .find(|kind| kind.to_string().to_lowercase() == wanted)
            .or_else(|| EventKind::from_str(value.trim()).ok())
    }
}

#[derive(Debug, Error)]
#[error("'{0}' is not a known event kind")]
pub struct UnknownEventKind(pub String);

/// Fields of the registration form, in the order they are laid out
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::Display,
)]
pub enum EventField {
    #[strum(serialize = "nome")]
    Name,
    #[strum(serialize = "tipo")]
    Kind,
    #[strum(serialize = "descricao")]
    Description,
    #[strum(serialize = "local")]
    Location,
    #[strum(serialize = "dataInicio")]
    StartsAt,
    #[strum(serialize = "dataFinal")]
    EndsAt,
    #[strum(serialize = "linkEvento")]
    EventLink,
    #[strum(serialize = "linkImagem")]
    ImageLink,
}

impl EventField {
    pub fn max_len(&self) -> Option<usize> {
        match self {
            EventField::Name | EventField::Location => Some(150),
            EventField::Description => Some(500),
            EventField::EventLink | EventField::ImageLink => Some(255),
            EventField::Kind | EventField::StartsAt | EventField::EndsAt => None,
        }
    }
}

/// Backend-assigned identifier, kept opaque
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Number(i64),
    Text(String),
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EventId::Number(id) => write!(f, "{}", id),
            EventId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// An event as stored by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub description: String,
    pub kind: EventKind,
    pub location: String,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub event_link: Option<String>,
    pub image_link: Option<String>,
}

impl Event {
    pub fn schedule(&self) -> Schedule {
        Schedule::new(self.starts_at, self.ends_at)
    }
}

/// Unsaved event as typed into the registration form.
///
/// Dates are kept as the raw text the user entered and are sent as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventDraft {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub kind: EventKind,
    #[serde(rename = "local")]
    pub location: String,
    #[serde(rename = "dataInicio")]
    pub starts_at: String,
    #[serde(rename = "dataFinal")]
    pub ends_at: String,
    #[serde(rename = "linkEvento")]
    pub event_link: String,
    #[serde(rename = "linkImagem")]
    pub image_link: String,
}

impl EventDraft {
    pub fn set(&mut self, field: EventField, value: impl Into<String>) -> Result<(), UnknownEventKind> {
        let value = value.into();

        match field {
            EventField::Name => self.name = value,
            EventField::Kind => {
                self.kind = EventKind::from_name(&value).ok_or(UnknownEventKind(value))?
            }
            EventField::Description => self.description = value,
            EventField::Location => self.location = value,
            EventField::StartsAt => self.starts_at = value,
            EventField::EndsAt => self.ends_at = value,
            EventField::EventLink => self.event_link = value,
            EventField::ImageLink => self.image_link = value,
        }

        Ok(())
    }

    pub fn get(&self, field: EventField) -> &str {
        match field {
            EventField::Name => &self.name,
            EventField::Kind => self.kind.into(),
            EventField::Description => &self.description,
            EventField::Location => &self.location,
            EventField::StartsAt => &self.starts_at,
            EventField::EndsAt => &self.ends_at,
            EventField::EventLink => &self.event_link,
            EventField::ImageLink => &self.image_link,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a valid date-time")]
pub struct InvalidDateTime(pub String);

/// Parses a local date-time.
///
/// An explicit offset is dropped and the wall-clock time kept as written.
/// A bare date means midnight.
pub fn parse_local_date_time(value: &str) -> Result<NaiveDateTime, InvalidDateTime> {
    let value = value.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Ok(date_time.naive_local());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| InvalidDateTime(value.to_string()))
}
