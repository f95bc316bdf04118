use crate::core::prompt::{render_system_prompt, render_user_prompt};
use crate::core::selection::{expected_runner_ups, parse_selection, validate_selection};
use crate::models::{MatchRequest, MatchSelection};
use crate::services::{GenerationClient, GenerationError};
use std::sync::Arc;
use thiserror::Error;

/// Errors produced by the matching pipeline, mapped onto the HTTP surface.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Caller's fault, fixable by correcting the form. Never retried.
    #[error("Invalid input: size, location, and churches are required.")]
    InvalidInput,

    /// The candidate list exceeds the configured prompt budget.
    #[error("Too many candidates: {actual} exceeds the limit of {limit}")]
    TooManyCandidates { actual: usize, limit: usize },

    /// Transient backend failure. Safe for the caller to retry with backoff.
    #[error("Generation backend unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The backend responded but violated the schema or referential
    /// contract. Reported distinctly so callers can decide whether the
    /// expensive call is worth repeating.
    #[error("Model returned invalid output: {0}")]
    MalformedModelOutput(String),

    #[error("Failed to render prompt: {0}")]
    Prompt(#[source] serde_json::Error),
}

impl MatchError {
    pub fn status_code(&self) -> u16 {
        match self {
            MatchError::InvalidInput | MatchError::TooManyCandidates { .. } => 400,
            MatchError::UpstreamUnavailable(_) | MatchError::MalformedModelOutput(_) => 502,
            MatchError::Prompt(_) => 500,
        }
    }
}

/// Matching orchestrator: renders the prompt contract, calls the
/// generation backend, and parses and validates the structured output.
/// Stateless across requests; the only side effect is the backend call.
#[derive(Clone)]
pub struct Matcher {
    generation: Arc<GenerationClient>,
    max_candidates: usize,
}

impl Matcher {
    pub fn new(generation: Arc<GenerationClient>, max_candidates: usize) -> Self {
        Self {
            generation,
            max_candidates,
        }
    }

    /// Produce exactly one best match plus runner-ups with justifications,
    /// using only the submitted candidates.
    ///
    /// Returns either a fully valid selection or an error; there is no
    /// partial success.
    pub async fn select(&self, request: &MatchRequest) -> Result<MatchSelection, MatchError> {
        // Terminal input checks happen before any backend traffic.
        if request.size.trim().is_empty()
            || request.location.trim().is_empty()
            || request.churches.is_empty()
        {
            return Err(MatchError::InvalidInput);
        }
        if request.churches.len() > self.max_candidates {
            return Err(MatchError::TooManyCandidates {
                actual: request.churches.len(),
                limit: self.max_candidates,
            });
        }

        let runner_up_count = expected_runner_ups(request.churches.len());
        let system = render_system_prompt(runner_up_count);
        let user = render_user_prompt(request).map_err(MatchError::Prompt)?;

        tracing::debug!(
            "Requesting selection from {} candidates ({} runner-ups expected)",
            request.churches.len(),
            runner_up_count
        );

        let raw = self
            .generation
            .complete(&system, &user)
            .await
            .map_err(|e| match e {
                GenerationError::EmptyContent => {
                    MatchError::MalformedModelOutput("backend returned no content".to_string())
                }
                other => MatchError::UpstreamUnavailable(other.to_string()),
            })?;

        let selection = parse_selection(&raw).map_err(|e| {
            tracing::warn!("Model output failed to parse: {}", e);
            MatchError::MalformedModelOutput(e.to_string())
        })?;

        validate_selection(&selection, &request.churches).map_err(|e| {
            tracing::warn!("Model output failed validation: {}", e);
            MatchError::MalformedModelOutput(e.to_string())
        })?;

        tracing::info!(
            "Selected {} with {} runner-ups",
            selection.best_match.church_id,
            selection.runner_ups.len()
        );

        Ok(selection)
    }
}
