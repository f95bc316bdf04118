//! Client-side half of the matching pipeline: the request builder that
//! fetches candidates and calls the matching service, and the persisted
//! user settings that seed the search form.

pub mod settings;

pub use settings::UserSettings;

use crate::core::reconcile::{reconcile, ReconcileError};
use crate::models::{MatchRequest, MatchSelection, PreferenceQuery, ReconciledResult};
use crate::services::{DirectoryClient, DirectoryError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced to the calling UI. All are terminal for the current
/// attempt; the UI shows a banner and lets the user resubmit or browse
/// the directory unassisted.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No candidates for the chosen location. Broaden the search; a
    /// model call with an empty candidate list cannot succeed, so this
    /// short-circuits before the matching service is ever contacted.
    #[error("No churches found for that location")]
    EmptyDirectory,

    #[error("Church directory unavailable: {0}")]
    DirectoryUnavailable(#[from] DirectoryError),

    /// Transport failure, non-success status, or malformed response body
    /// from the matching service.
    #[error("Matching service unavailable: {0}")]
    MatchingUnavailable(String),

    #[error(transparent)]
    Reconciliation(#[from] ReconcileError),

    /// A newer submission superseded this one while it was in flight;
    /// the stale result must not overwrite the newer one.
    #[error("A newer search superseded this one")]
    Stale,
}

/// Match request builder: turns a validated preference query into the
/// two-step fetch (candidate list, then match) and reconciles the result.
///
/// One logical request at a time: each call takes a sequence ticket, and
/// a response whose ticket is no longer current is discarded as stale.
/// No partial state survives a failure.
pub struct MatchClient {
    directory: Arc<DirectoryClient>,
    http: reqwest::Client,
    match_url: String,
    seq: AtomicU64,
}

impl MatchClient {
    pub fn new(directory: Arc<DirectoryClient>, match_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            directory,
            http,
            match_url,
            seq: AtomicU64::new(0),
        }
    }

    /// Run the full pipeline: fetch candidates, call the matching
    /// service, reconcile identifiers back onto full records.
    pub async fn find_match(
        &self,
        query: &PreferenceQuery,
    ) -> Result<ReconciledResult, ClientError> {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        // Step A: candidate list, filtered by location
        let candidates = self
            .directory
            .list_churches(Some(&query.location))
            .await?;

        if candidates.is_empty() {
            return Err(ClientError::EmptyDirectory);
        }

        tracing::debug!(
            "Requesting match from {} candidates for {}",
            candidates.len(),
            query.location
        );

        // Step B: the matching service
        let request = MatchRequest::from_query(query, candidates.clone());
        let response = self
            .http
            .post(&self.match_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::MatchingUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::MatchingUnavailable(format!(
                "{}: {}",
                status, body
            )));
        }

        let selection: MatchSelection = response.json().await.map_err(|e| {
            ClientError::MatchingUnavailable(format!("malformed response body: {}", e))
        })?;

        // A resubmission bumped the sequence while this one was in flight
        if self.seq.load(Ordering::SeqCst) != ticket {
            return Err(ClientError::Stale);
        }

        Ok(reconcile(&candidates, &selection)?)
    }
}
