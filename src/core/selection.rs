use crate::models::{Church, MatchSelection};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while parsing or validating the model's output.
/// All of these surface to callers as "malformed model output".
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("completion was not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("best match identifier is empty")]
    EmptyBestMatch,

    #[error("runner-up identifier is empty")]
    EmptyRunnerUp,

    #[error("identifier \"{0}\" is not in the submitted candidate set")]
    UnknownIdentifier(String),

    #[error("identifier \"{0}\" was selected more than once")]
    DuplicateIdentifier(String),

    #[error("expected {expected} runner-ups for this pool, model returned {actual}")]
    RunnerUpCount { expected: usize, actual: usize },
}

/// How many runner-ups a pool of the given size must produce.
/// Two when the pool allows it, fewer for degenerate pools.
pub fn expected_runner_ups(pool_size: usize) -> usize {
    pool_size.saturating_sub(1).min(2)
}

/// Parse the raw completion as a selection. Reject-or-accept only; no
/// best-effort field coercion happens here or anywhere downstream.
pub fn parse_selection(raw: &str) -> Result<MatchSelection, SelectionError> {
    Ok(serde_json::from_str(strip_json_fences(raw))?)
}

/// Validate a parsed selection against the submitted candidate set:
/// non-empty identifiers, no duplicates, referential integrity, and the
/// exact runner-up count for the pool size.
pub fn validate_selection(
    selection: &MatchSelection,
    candidates: &[Church],
) -> Result<(), SelectionError> {
    let known: HashSet<&str> = candidates.iter().map(|c| c.id.as_str()).collect();

    let best_id = selection.best_match.church_id.trim();
    if best_id.is_empty() {
        return Err(SelectionError::EmptyBestMatch);
    }
    if !known.contains(best_id) {
        return Err(SelectionError::UnknownIdentifier(best_id.to_string()));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(best_id);

    for entry in &selection.runner_ups {
        let id = entry.church_id.trim();
        if id.is_empty() {
            return Err(SelectionError::EmptyRunnerUp);
        }
        if !known.contains(id) {
            return Err(SelectionError::UnknownIdentifier(id.to_string()));
        }
        if !seen.insert(id) {
            return Err(SelectionError::DuplicateIdentifier(id.to_string()));
        }
    }

    let expected = expected_runner_ups(candidates.len());
    let actual = selection.runner_ups.len();
    if actual != expected {
        return Err(SelectionError::RunnerUpCount { expected, actual });
    }

    Ok(())
}

/// Strips ```json ... ``` or ``` ... ``` code fences some models wrap
/// their output in, despite being told not to.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let stripped = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match stripped {
        Some(inner) => {
            let inner = inner.trim_start();
            inner
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(inner)
        }
        None => text,
    }
}
