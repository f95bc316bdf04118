// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Church, ChurchSize, DenominationPref, MatchSelection, MatchedChurch, PreferenceQuery,
    ReconciledResult, SelectionEntry, NO_PREFERENCE_TOKEN,
};
pub use requests::{CreateChurchRequest, MatchRequest, UpdateChurchRequest};
pub use responses::{ErrorResponse, HealthResponse};
