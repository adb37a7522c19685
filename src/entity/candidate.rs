// src/entity/candidate.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(test)]
use super::Note;

/// A partially formed note, as produced by the generator or assembled from
/// user input. Every modelled field may be missing.
///
/// `id`, `order` and `createdAt` are accepted so they never leak into
/// `extra`, but normalization ignores them: the assigner and the source
/// metadata own those fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
impl From<&Note> for NoteCandidate {
    fn from(note: &Note) -> Self {
        Self {
            id: serde_json::to_value(&note.id).ok(),
            title: Some(note.title.clone()),
            text: Some(note.text.clone()),
            status: Some(note.status.to_string()),
            priority: Some(note.priority.to_string()),
            is_private: Some(note.is_private),
            created_at: None,
            order: note.order.map(Value::from),
            extra: note.extra.clone(),
        }
    }
}
