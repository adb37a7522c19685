//! Schema normalization: turn a partial candidate into a complete record.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::entity::{NoteCandidate, NotePriority, NoteStatus};

/// Number of leading words used when the title falls back to the text.
const TITLE_WORDS: usize = 5;

/// Where a candidate came from.
#[derive(Debug, Clone, Copy)]
pub struct SourceContext<'a> {
    /// The raw input text, verbatim.
    pub text: &'a str,
    /// Naming hint, typically the file stem.
    pub name_hint: Option<&'a str>,
    /// Origin timestamp of the input, never the generation time.
    pub created_at: DateTime<Utc>,
}

/// A note with every required field filled in, still waiting for its
/// identity and run order.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedNote {
    pub title: String,
    pub text: String,
    pub status: NoteStatus,
    pub priority: NotePriority,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub extra: Map<String, Value>,
}

/// Fill the gaps in `candidate`. Never fails; present fields win.
///
/// `pending_id` is the identifier the note is about to receive and only
/// appears in the last-resort placeholder title.
pub fn normalize(
    candidate: NoteCandidate,
    source: &SourceContext<'_>,
    pending_id: u64,
) -> NormalizedNote {
    let text = candidate.text.unwrap_or_else(|| source.text.to_string());

    let title = match candidate.title {
        Some(title) if !title.trim().is_empty() => title,
        _ => derive_title(source.name_hint, source.text, pending_id),
    };

    let status = candidate
        .status
        .and_then(|raw| parse_or_default(&raw, "status"))
        .unwrap_or_default();
    let priority = candidate
        .priority
        .and_then(|raw| parse_or_default(&raw, "priority"))
        .unwrap_or_default();

    NormalizedNote {
        title,
        text,
        status,
        priority,
        is_private: candidate.is_private.unwrap_or(false),
        created_at: source.created_at,
        extra: candidate.extra,
    }
}

fn parse_or_default<T: std::str::FromStr>(raw: &str, field: &str) -> Option<T> {
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!(field, value = raw, "unrecognised value, using default");
            None
        }
    }
}

/// Title fallback chain: name hint, then leading words, then a placeholder.
pub fn derive_title(name_hint: Option<&str>, text: &str, pending_id: u64) -> String {
    if let Some(hint) = name_hint {
        let spaced = hint.replace(['-', '_'], " ");
        let spaced = spaced.trim();
        if !spaced.is_empty() {
            return spaced.to_string();
        }
    }

    let words: Vec<&str> = text.split_whitespace().take(TITLE_WORDS).collect();
    if !words.is_empty() {
        return words.join(" ");
    }

    format!("Note {}", pending_id)
}
