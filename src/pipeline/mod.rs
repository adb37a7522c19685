//! Note ingestion: gate, generate, normalize, stamp, append.
//!
//! Inputs are processed one at a time. A failure on one input is logged and
//! recorded in the run report; it never aborts the batch and never touches
//! the counters.

mod gate;
mod identity;
mod normalize;
mod payload;

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::entity::{Note, NoteCandidate};
use crate::error::{NotekeepError, Result};
use crate::llm::NoteModel;
use crate::source::SourceItem;
use crate::storage::NoteStore;

pub use gate::{classify, is_affirmative, Decision};
pub use identity::{next_id, RunCounters};
pub use normalize::{derive_title, normalize, NormalizedNote, SourceContext};
pub use payload::{parse_candidate, strip_wrapper, PayloadError};

/// Why an input did not become a note.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    EmptyInput,
    Unreadable(String),
    Rejected,
    NoPayload,
    InvalidPayload(String),
    GenerationFailed(String),
    IdsExhausted,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::EmptyInput => write!(f, "empty input"),
            SkipReason::Unreadable(e) => write!(f, "unreadable: {}", e),
            SkipReason::Rejected => write!(f, "not classified as a note"),
            SkipReason::NoPayload => write!(f, "generator returned no content"),
            SkipReason::InvalidPayload(e) => write!(f, "invalid generator payload: {}", e),
            SkipReason::GenerationFailed(e) => write!(f, "generation failed: {}", e),
            SkipReason::IdsExhausted => write!(f, "no note ids left"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Added { id: u64, title: String },
    Skipped(SkipReason),
}

/// End-of-run counts.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub seen: usize,
    pub added: usize,
    pub skipped: Vec<(PathBuf, SkipReason)>,
}

/// Normalize, stamp and append one candidate. Returns the stored note.
pub fn commit_candidate(
    candidate: NoteCandidate,
    source: &SourceContext<'_>,
    store: &mut NoteStore,
    counters: &mut RunCounters,
) -> Result<Note> {
    let pending_id = counters.next_id().ok_or(NotekeepError::IdsExhausted)?;
    let normalized = normalize(candidate, source, pending_id);
    let note = counters
        .assign(normalized)
        .ok_or(NotekeepError::IdsExhausted)?;
    store.append(note.clone());
    Ok(note)
}

pub struct IngestPipeline<'m, M: NoteModel + ?Sized> {
    model: &'m M,
    pacing: Option<Duration>,
}

impl<'m, M: NoteModel + ?Sized> IngestPipeline<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self {
            model,
            pacing: None,
        }
    }

    /// Sleep this long after each processed input (not after the last).
    pub fn with_pacing(mut self, pacing: Option<Duration>) -> Self {
        self.pacing = pacing;
        self
    }

    /// Run every item in order against `store`, then return the report.
    /// Saving is left to the caller.
    pub async fn run(&self, items: &[SourceItem], store: &mut NoteStore) -> IngestReport {
        let mut counters = RunCounters::from_notes(store.notes());
        let mut report = IngestReport::default();
        let total = items.len();

        for (index, item) in items.iter().enumerate() {
            report.seen += 1;
            match self.ingest_item(item, store, &mut counters).await {
                ItemOutcome::Added { id, title } => {
                    report.added += 1;
                    tracing::info!(
                        "[{}/{}] {} -> note {} ({})",
                        index + 1,
                        total,
                        item.path.display(),
                        id,
                        title
                    );
                }
                ItemOutcome::Skipped(reason) => {
                    tracing::warn!(
                        "[{}/{}] skipped {}: {}",
                        index + 1,
                        total,
                        item.path.display(),
                        reason
                    );
                    report.skipped.push((item.path.clone(), reason));
                }
            }

            if let Some(pause) = self.pacing.filter(|_| index + 1 < total) {
                tokio::time::sleep(pause).await;
            }
        }

        report
    }

    /// Read one file and ingest its content.
    pub async fn ingest_item(
        &self,
        item: &SourceItem,
        store: &mut NoteStore,
        counters: &mut RunCounters,
    ) -> ItemOutcome {
        match item.read_text() {
            Ok(text) => {
                self.ingest_text(&text, &item.name, item.created_at, store, counters)
                    .await
            }
            Err(e) => ItemOutcome::Skipped(SkipReason::Unreadable(e.to_string())),
        }
    }

    /// Ingest raw text. Counters advance only when a note is appended.
    pub async fn ingest_text(
        &self,
        text: &str,
        name_hint: &str,
        created_at: DateTime<Utc>,
        store: &mut NoteStore,
        counters: &mut RunCounters,
    ) -> ItemOutcome {
        if text.trim().is_empty() {
            return ItemOutcome::Skipped(SkipReason::EmptyInput);
        }
        if counters.next_id().is_none() {
            return ItemOutcome::Skipped(SkipReason::IdsExhausted);
        }

        if classify(self.model, text, name_hint).await == Decision::Reject {
            return ItemOutcome::Skipped(SkipReason::Rejected);
        }

        let raw = match self.model.generate(text, name_hint, created_at).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return ItemOutcome::Skipped(SkipReason::NoPayload),
            Err(e) => return ItemOutcome::Skipped(SkipReason::GenerationFailed(e.to_string())),
        };

        let candidate = match parse_candidate(&raw) {
            Ok(candidate) => candidate,
            Err(PayloadError::Empty) => return ItemOutcome::Skipped(SkipReason::NoPayload),
            Err(e) => {
                tracing::debug!(name = name_hint, payload = %raw, "unusable generator payload");
                return ItemOutcome::Skipped(SkipReason::InvalidPayload(e.to_string()));
            }
        };

        let source = SourceContext {
            text,
            name_hint: Some(name_hint),
            created_at,
        };
        match commit_candidate(candidate, &source, store, counters) {
            Ok(note) => ItemOutcome::Added {
                id: note.id.as_number().unwrap_or_default(),
                title: note.title,
            },
            Err(_) => ItemOutcome::Skipped(SkipReason::IdsExhausted),
        }
    }
}
