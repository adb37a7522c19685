//! Size warnings for the note collection.
//!
//! The whole collection is rewritten on every save, so very large files make
//! each ingestion run slower. These checks are advisory only.

/// Note count above which a warning is shown.
pub const NOTE_COUNT_WARNING_THRESHOLD: usize = 5_000;

/// Collection file size (bytes) above which a warning is shown.
pub const FILE_SIZE_WARNING_THRESHOLD: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub enum Warning {
    /// Note count exceeds recommended threshold.
    HighNoteCount { count: usize, threshold: usize },
    /// Collection file exceeds recommended size.
    LargeCollectionFile { size_mb: f64, threshold_mb: f64 },
}

/// Check thresholds and return any warnings (empty when all are fine).
pub fn check_thresholds(note_count: usize, file_size: u64) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if note_count > NOTE_COUNT_WARNING_THRESHOLD {
        warnings.push(Warning::HighNoteCount {
            count: note_count,
            threshold: NOTE_COUNT_WARNING_THRESHOLD,
        });
    }

    if file_size > FILE_SIZE_WARNING_THRESHOLD {
        warnings.push(Warning::LargeCollectionFile {
            size_mb: file_size as f64 / (1024.0 * 1024.0),
            threshold_mb: FILE_SIZE_WARNING_THRESHOLD as f64 / (1024.0 * 1024.0),
        });
    }

    warnings
}

pub fn format_warning(warning: &Warning) -> String {
    match warning {
        Warning::HighNoteCount { count, threshold } => format!(
            "Warning: {} notes exceeds recommended {} - saves may slow down",
            count, threshold
        ),
        Warning::LargeCollectionFile {
            size_mb,
            threshold_mb,
        } => format!(
            "Warning: collection file size ({:.1}MB) exceeds recommended {:.0}MB",
            size_mb, threshold_mb
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_warnings_under_threshold() {
        assert!(check_thresholds(120, 2 * 1024 * 1024).is_empty());
        assert!(check_thresholds(NOTE_COUNT_WARNING_THRESHOLD, FILE_SIZE_WARNING_THRESHOLD).is_empty());
    }

    #[test]
    fn test_high_note_count_warning() {
        let warnings = check_thresholds(7_500, 0);
        assert_eq!(warnings.len(), 1);
        match &warnings[0] {
            Warning::HighNoteCount { count, threshold } => {
                assert_eq!(*count, 7_500);
                assert_eq!(*threshold, NOTE_COUNT_WARNING_THRESHOLD);
            }
            _ => panic!("Expected HighNoteCount warning"),
        }
    }

    #[test]
    fn test_large_file_warning() {
        let warnings = check_thresholds(10, 15 * 1024 * 1024);
        match warnings.as_slice() {
            [Warning::LargeCollectionFile { size_mb, .. }] => {
                assert!(*size_mb > 14.0 && *size_mb < 16.0);
            }
            other => panic!("Expected one LargeCollectionFile warning, got {:?}", other),
        }
    }

    #[test]
    fn test_format_messages() {
        let msg = format_warning(&Warning::HighNoteCount {
            count: 6000,
            threshold: 5000,
        });
        assert!(msg.contains("6000") && msg.contains("5000"));

        let msg = format_warning(&Warning::LargeCollectionFile {
            size_mb: 12.25,
            threshold_mb: 10.0,
        });
        assert!(msg.contains("12.2") || msg.contains("12.3"));
        assert!(msg.contains("10MB"));
    }
}
