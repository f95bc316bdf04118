// Service exports
pub mod auth;
pub mod directory;
pub mod generation;
pub mod jobs;

pub use auth::{bearer_token, verify_admin, AuthError, Claims};
pub use directory::{DirectoryClient, DirectoryError};
pub use generation::{GenerationClient, GenerationError};
pub use jobs::{JobName, JobOutcome, JobsClient, JobsError};
