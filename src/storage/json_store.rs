use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::entity::Note;
use crate::error::{NotekeepError, Result};

const BACKUP_SUFFIX: &str = ".bak";
const TEMP_SUFFIX: &str = ".tmp";

/// What `load` found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No file yet.
    Missing,
    /// The file exists but holds only whitespace.
    Empty,
    /// A well-formed collection with this many notes.
    Loaded(usize),
    /// The file could not be used; the collection started empty.
    Malformed(String),
}

/// The whole note collection, held in memory and rewritten on save.
pub struct NoteStore {
    path: PathBuf,
    notes: Vec<Note>,
    state: LoadState,
}

impl NoteStore {
    /// Load the collection at `path`. Never fails: missing, empty and
    /// malformed files all start an empty collection.
    pub fn load(path: &Path) -> Self {
        let (notes, state) = match fs::read_to_string(path) {
            Ok(raw) if raw.trim().is_empty() => (Vec::new(), LoadState::Empty),
            Ok(raw) => match parse_collection(&raw) {
                Ok(notes) => {
                    let count = notes.len();
                    (notes, LoadState::Loaded(count))
                }
                Err(reason) => {
                    tracing::warn!(
                        path = %path.display(),
                        reason = %reason,
                        "collection is malformed, starting empty"
                    );
                    (Vec::new(), LoadState::Malformed(reason))
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => (Vec::new(), LoadState::Missing),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "collection is unreadable, starting empty"
                );
                (Vec::new(), LoadState::Malformed(e.to_string()))
            }
        };

        let mut store = Self {
            path: path.to_path_buf(),
            notes,
            state,
        };
        sort_notes(&mut store.notes);
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    /// Notes in id order (plus any appended since the last save).
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn append(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Find a note by its id as typed by a user.
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id.matches(id))
    }

    /// Rewrite the whole collection, sorted by id, as one JSON array.
    ///
    /// The file is written next to the destination and renamed over it. A
    /// malformed original is copied to `<file>.bak` before it is replaced.
    pub fn save(&mut self) -> Result<()> {
        sort_notes(&mut self.notes);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.storage_error("create directory", e))?;
        }

        if matches!(self.state, LoadState::Malformed(_)) && self.path.exists() {
            let backup = with_suffix(&self.path, BACKUP_SUFFIX);
            fs::copy(&self.path, &backup).map_err(|e| self.storage_error("back up", e))?;
            tracing::warn!(backup = %backup.display(), "kept a copy of the malformed collection");
        }

        let mut json = serde_json::to_string_pretty(&self.notes)?;
        json.push('\n');

        let tmp_path = with_suffix(&self.path, TEMP_SUFFIX);
        fs::write(&tmp_path, json).map_err(|e| self.storage_error("write", e))?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.storage_error("replace", e));
        }

        self.state = LoadState::Loaded(self.notes.len());
        tracing::debug!(path = %self.path.display(), notes = self.notes.len(), "collection saved");
        Ok(())
    }

    /// Size of the collection file on disk, 0 if absent.
    pub fn file_size(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    fn storage_error(&self, action: &str, e: std::io::Error) -> NotekeepError {
        NotekeepError::Storage(format!(
            "failed to {} {}: {}",
            action,
            self.path.display(),
            e
        ))
    }
}

/// Accepts an array of notes, or a lone note object.
fn parse_collection(raw: &str) -> std::result::Result<Vec<Note>, String> {
    let value: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    match value {
        Value::Array(_) => serde_json::from_value(value).map_err(|e| e.to_string()),
        Value::Object(_) => serde_json::from_value::<Note>(value)
            .map(|note| vec![note])
            .map_err(|e| e.to_string()),
        _ => Err("expected a JSON array of notes".to_string()),
    }
}

// Malformed ids sort first, the rest by number; the sort is stable.
fn sort_notes(notes: &mut [Note]) {
    notes.sort_by_key(|n| n.id.as_number());
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
