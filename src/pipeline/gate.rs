//! Accept/reject decision for a candidate input.

use crate::llm::NoteModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

/// True when the verdict starts with the token "yes", in any case, followed
/// by nothing, whitespace or punctuation.
pub fn is_affirmative(verdict: &str) -> bool {
    let verdict = verdict.trim_start();
    let Some(head) = verdict.get(..3) else {
        return false;
    };
    if !head.eq_ignore_ascii_case("yes") {
        return false;
    }
    match verdict[3..].chars().next() {
        None => true,
        Some(c) => !c.is_alphanumeric(),
    }
}

/// Ask `model` whether `text` should become a note.
///
/// Blank text is rejected without a call. A failing judge rejects the input.
pub async fn classify<M>(model: &M, text: &str, name_hint: &str) -> Decision
where
    M: NoteModel + ?Sized,
{
    if text.trim().is_empty() {
        return Decision::Reject;
    }

    match model.judge(text, name_hint).await {
        Ok(Some(verdict)) if is_affirmative(&verdict) => Decision::Accept,
        Ok(Some(verdict)) => {
            tracing::debug!(name = name_hint, verdict = %verdict.trim(), "judge declined");
            Decision::Reject
        }
        Ok(None) => {
            tracing::debug!(name = name_hint, "judge returned no verdict");
            Decision::Reject
        }
        Err(e) => {
            tracing::warn!(name = name_hint, error = %e, "judge unavailable, rejecting");
            Decision::Reject
        }
    }
}
