//! Prompt text for the judge and generator requests.

use chrono::{DateTime, Utc};

use crate::entity::timestamp;

pub const JUDGE_SYSTEM: &str = "You sort raw text files for a personal note collection. \
Answer with a single word: Yes or No.";

pub const GENERATE_SYSTEM: &str = "You turn raw text into a structured note. \
Return a JSON object only, with no commentary.";

pub fn judge_prompt(text: &str, name_hint: &str) -> String {
    format!(
        r#"File name: {}

Content:
{}

Is this content worth keeping as a note (an idea, a task, a reminder, meeting notes or similar)?
Answer with Yes or No."#,
        name_hint, text
    )
}

pub fn generation_prompt(text: &str, name_hint: &str, created_at: DateTime<Utc>) -> String {
    format!(
        r#"File name: {}
Created: {}

Content:
{}

Return a JSON object for this note with these fields:
{{
  "title": "<short descriptive title>",
  "text": "<the note body, cleaned up but not shortened>",
  "status": "Open" | "Closed",
  "priority": "Low" | "Medium" | "High",
  "isPrivate": <true if the content looks personal or sensitive>
}}

Provide JSON only, no additional text."#,
        name_hint,
        timestamp::format(&created_at),
        text
    )
}
