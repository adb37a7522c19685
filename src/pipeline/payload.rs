//! Parsing of generator output into a note candidate.

use serde_json::Value;
use thiserror::Error;

use crate::entity::NoteCandidate;

const FENCE: &str = "```";

#[derive(Error, Debug, PartialEq)]
pub enum PayloadError {
    #[error("payload is empty")]
    Empty,

    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("payload is JSON {0}, expected an object")]
    NotAnObject(&'static str),

    #[error("payload does not fit the note shape: {0}")]
    Shape(String),
}

/// Remove a surrounding Markdown code fence (with an optional language tag).
pub fn strip_wrapper(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let rest = match rest.find('\n') {
        Some(i) if rest[..i].trim().chars().all(|c| c.is_ascii_alphanumeric()) => &rest[i + 1..],
        _ => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    let rest = rest.trim_end();
    rest.strip_suffix(FENCE).unwrap_or(rest).trim()
}

/// Parse generator output, tolerating fences and chatter around the object.
pub fn parse_candidate(raw: &str) -> Result<NoteCandidate, PayloadError> {
    let body = strip_wrapper(raw);
    if body.is_empty() {
        return Err(PayloadError::Empty);
    }

    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(e) => embedded_object(body).ok_or_else(|| PayloadError::InvalidJson(e.to_string()))?,
    };

    match value {
        Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| PayloadError::Shape(e.to_string()))
        }
        Value::Array(_) => Err(PayloadError::NotAnObject("array")),
        Value::String(_) => Err(PayloadError::NotAnObject("string")),
        Value::Number(_) => Err(PayloadError::NotAnObject("number")),
        Value::Bool(_) => Err(PayloadError::NotAnObject("boolean")),
        Value::Null => Err(PayloadError::NotAnObject("null")),
    }
}

// "Here is the note: {...}" style replies.
fn embedded_object(body: &str) -> Option<Value> {
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<Value>(&body[start..=end])
        .ok()
        .filter(Value::is_object)
}
