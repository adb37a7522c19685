use crate::entity::{Note, NoteId};

use super::normalize::NormalizedNote;

/// Identity and ordering state for one ingestion run.
///
/// `next_id` continues after the highest usable id already stored and is
/// `None` once the id space is used up; `current_order` always starts at zero
/// and ignores stored `order` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunCounters {
    next_id: Option<u64>,
    current_order: u64,
}

impl RunCounters {
    pub fn from_notes(notes: &[Note]) -> Self {
        Self {
            next_id: next_id(notes),
            current_order: 0,
        }
    }

    /// The id the next note will receive, if any is left.
    pub fn next_id(&self) -> Option<u64> {
        self.next_id
    }

    pub fn current_order(&self) -> u64 {
        self.current_order
    }

    /// Stamp id and order onto a normalized note and advance both counters.
    /// Returns `None`, leaving the counters untouched, when no id is left.
    pub fn assign(&mut self, normalized: NormalizedNote) -> Option<Note> {
        let id = self.next_id?;
        let note = Note {
            id: NoteId::Number(id),
            title: normalized.title,
            text: normalized.text,
            status: normalized.status,
            priority: normalized.priority,
            is_private: normalized.is_private,
            created_at: Some(normalized.created_at),
            order: Some(self.current_order),
            extra: normalized.extra,
        };
        self.next_id = id.checked_add(1);
        self.current_order += 1;
        Some(note)
    }
}

/// One past the highest usable numeric id, 1 when there is none, or `None`
/// when the highest id is already `u64::MAX`.
pub fn next_id(notes: &[Note]) -> Option<u64> {
    notes
        .iter()
        .filter_map(|n| n.id.as_number())
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
}
