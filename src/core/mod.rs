// Core matching pipeline exports
pub mod matcher;
pub mod prompt;
pub mod reconcile;
pub mod selection;

pub use matcher::{MatchError, Matcher};
pub use prompt::{render_system_prompt, render_user_prompt, BEST_MATCH_REASON_LEAD};
pub use reconcile::{reconcile, ReconcileError};
pub use selection::{
    expected_runner_ups, parse_selection, strip_json_fences, validate_selection, SelectionError,
};
