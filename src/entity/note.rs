// src/entity/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{timestamp, NotePriority, NoteStatus};

/// Identifier of a stored note.
///
/// Notes created by this crate always carry a positive integer. Collections
/// edited elsewhere may hold ids of any JSON shape; those are kept verbatim
/// so a rewrite never loses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
    Number(u64),
    Other(Value),
}

impl NoteId {
    /// The id as a positive integer, if it has a usable numeric form.
    ///
    /// Numeric strings ("7") and integral floats (7.0) count; zero, negative
    /// and fractional values do not.
    pub fn as_number(&self) -> Option<u64> {
        match self {
            NoteId::Number(n) => Some(*n).filter(|n| *n > 0),
            NoteId::Other(Value::String(s)) => s.trim().parse::<u64>().ok().filter(|n| *n > 0),
            NoteId::Other(Value::Number(n)) => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64),
            NoteId::Other(_) => None,
        }
    }

    /// Match against an id typed by a user ("6" or a raw string id).
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        match (self.as_number(), query.parse::<u64>()) {
            (Some(n), Ok(q)) => n == q,
            _ => self.to_string() == query,
        }
    }
}

impl From<u64> for NoteId {
    fn from(n: u64) -> Self {
        NoteId::Number(n)
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteId::Number(n) => write!(f, "{}", n),
            NoteId::Other(Value::String(s)) => write!(f, "{}", s),
            NoteId::Other(v) => write!(f, "{}", v),
        }
    }
}

/// A complete note record as persisted in the collection file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub status: NoteStatus,
    #[serde(default)]
    pub priority: NotePriority,
    #[serde(default, deserialize_with = "super::status::lenient_bool")]
    pub is_private: bool,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u64>,
    /// Fields this crate does not model, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
