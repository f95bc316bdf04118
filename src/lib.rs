//! Faith Finder matching service
//!
//! This library powers the church-discovery flow: a matching service that
//! asks a text-generation backend to pick one best match and runner-ups
//! from a candidate list, plus the client-side request builder and result
//! reconciler, and the admin surface over the church directory.

pub mod client;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use client::{ClientError, MatchClient, UserSettings};
pub use core::{expected_runner_ups, reconcile, MatchError, Matcher, ReconcileError};
pub use models::{
    Church, ChurchSize, DenominationPref, MatchRequest, MatchSelection, MatchedChurch,
    PreferenceQuery, ReconciledResult, SelectionEntry,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert_eq!(expected_runner_ups(10), 2);
        assert_eq!(ChurchSize::Small.as_str(), "small");
    }
}
