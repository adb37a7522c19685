// src/entity/status.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum NoteStatus {
    #[default]
    Open,
    Closed,
}

impl std::fmt::Display for NoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteStatus::Open => write!(f, "Open"),
            NoteStatus::Closed => write!(f, "Closed"),
        }
    }
}

impl std::str::FromStr for NoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(NoteStatus::Open),
            "closed" => Ok(NoteStatus::Closed),
            _ => Err(format!("Invalid note status: {}", s)),
        }
    }
}

// Stored collections written by hand or by older tools use any casing, and
// may hold null or unknown values; those load as the default.
impl<'de> Deserialize<'de> for NoteStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_value(deserializer, "status")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum NotePriority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for NotePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotePriority::Low => write!(f, "Low"),
            NotePriority::Medium => write!(f, "Medium"),
            NotePriority::High => write!(f, "High"),
        }
    }
}

impl std::str::FromStr for NotePriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(NotePriority::Low),
            "medium" | "normal" => Ok(NotePriority::Medium),
            "high" => Ok(NotePriority::High),
            _ => Err(format!("Invalid note priority: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for NotePriority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_value(deserializer, "priority")
    }
}

fn lenient_value<'de, D, T>(deserializer: D, field: &str) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr + Default,
{
    let raw = Value::deserialize(deserializer)?;
    let parsed = raw.as_str().and_then(|s| s.parse().ok());
    if parsed.is_none() && !raw.is_null() {
        tracing::debug!(field, value = %raw, "unrecognised stored value, using default");
    }
    Ok(parsed.unwrap_or_default())
}

/// Deserialize a stored boolean flag; null and non-boolean values read as false.
pub(crate) fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("open".parse::<NoteStatus>().unwrap(), NoteStatus::Open);
        assert_eq!("CLOSED".parse::<NoteStatus>().unwrap(), NoteStatus::Closed);
        assert_eq!(" Closed ".parse::<NoteStatus>().unwrap(), NoteStatus::Closed);
        assert!("done".parse::<NoteStatus>().is_err());
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("low".parse::<NotePriority>().unwrap(), NotePriority::Low);
        assert_eq!("High".parse::<NotePriority>().unwrap(), NotePriority::High);
        assert_eq!("normal".parse::<NotePriority>().unwrap(), NotePriority::Medium);
        assert!("urgent".parse::<NotePriority>().is_err());
    }

    #[test]
    fn test_serialized_names_are_capitalized() {
        assert_eq!(serde_json::to_string(&NoteStatus::Open).unwrap(), "\"Open\"");
        assert_eq!(
            serde_json::to_string(&NotePriority::Medium).unwrap(),
            "\"Medium\""
        );
    }

    #[test]
    fn test_deserialize_accepts_lowercase() {
        let status: NoteStatus = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(status, NoteStatus::Closed);
        let priority: NotePriority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(priority, NotePriority::High);
    }

    #[test]
    fn test_deserialize_falls_back_on_unknown_or_null() {
        let status: NoteStatus = serde_json::from_str("null").unwrap();
        assert_eq!(status, NoteStatus::Open);
        let status: NoteStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, NoteStatus::Open);
        let priority: NotePriority = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(priority, NotePriority::Medium);
        let priority: NotePriority = serde_json::from_str("3").unwrap();
        assert_eq!(priority, NotePriority::Medium);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(NoteStatus::default(), NoteStatus::Open);
        assert_eq!(NotePriority::default(), NotePriority::Medium);
    }
}
