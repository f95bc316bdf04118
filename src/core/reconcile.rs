use crate::models::{Church, MatchSelection, MatchedChurch, ReconciledResult};
use std::collections::HashMap;
use thiserror::Error;

/// The matching service selected a best match the caller's candidate list
/// doesn't contain. Always a contract violation between the two pieces,
/// never an expected state; surfaced as a generic failure to the user.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("selected a church that wasn't found in the loaded list: \"{0}\"")]
    BestMatchNotFound(String),
}

/// Join the matching service's identifier-only output back onto full
/// candidate records for display.
///
/// The best match is essential: a missing identifier is fatal. Runner-ups
/// are advisory: unresolvable ones are dropped with a warning and the
/// result degrades gracefully. Pure function, identical output for
/// identical input.
pub fn reconcile(
    candidates: &[Church],
    selection: &MatchSelection,
) -> Result<ReconciledResult, ReconcileError> {
    let by_id: HashMap<&str, &Church> =
        candidates.iter().map(|c| (c.id.as_str(), c)).collect();

    let best = by_id
        .get(selection.best_match.church_id.as_str())
        .ok_or_else(|| ReconcileError::BestMatchNotFound(selection.best_match.church_id.clone()))?;
    let best_match = MatchedChurch::from_parts(best, &selection.best_match.reason);

    let mut runner_ups = Vec::with_capacity(selection.runner_ups.len());
    for entry in &selection.runner_ups {
        match by_id.get(entry.church_id.as_str()) {
            Some(church) => runner_ups.push(MatchedChurch::from_parts(church, &entry.reason)),
            None => {
                tracing::warn!(
                    "Dropping runner-up \"{}\": not in the loaded candidate list",
                    entry.church_id
                );
            }
        }
    }

    Ok(ReconciledResult {
        best_match,
        runner_ups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChurchSize, SelectionEntry};

    fn church(id: &str) -> Church {
        Church {
            id: id.to_string(),
            name: format!("Church {}", id),
            denomination: "Presbyterian".to_string(),
            size: ChurchSize::Large,
            location: "State College".to_string(),
            address: "100 Allen St".to_string(),
            latitude: Some(40.79),
            longitude: Some(-77.86),
            phone: Some("814-555-0000".to_string()),
            website: None,
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn selection(best: &str, runners: &[&str]) -> MatchSelection {
        MatchSelection {
            best_match: SelectionEntry {
                church_id: best.to_string(),
                reason: "Best match because: it fits".to_string(),
            },
            runner_ups: runners
                .iter()
                .map(|id| SelectionEntry {
                    church_id: id.to_string(),
                    reason: "A solid option nearby.".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_reconcile_joins_full_records() {
        let candidates = vec![church("a"), church("b"), church("c")];
        let result = reconcile(&candidates, &selection("a", &["b", "c"])).unwrap();

        assert_eq!(result.best_match.id, "a");
        assert_eq!(result.best_match.name, "Church a");
        assert_eq!(result.best_match.reason, "Best match because: it fits");
        assert_eq!(result.runner_ups.len(), 2);
        assert_eq!(result.runner_ups[0].id, "b");
        // Missing description normalized to empty string
        assert_eq!(result.best_match.description, "");
    }

    #[test]
    fn test_missing_best_match_is_fatal() {
        let candidates = vec![church("a"), church("b")];
        let err = reconcile(&candidates, &selection("zzz", &["a"])).unwrap_err();
        assert!(matches!(err, ReconcileError::BestMatchNotFound(id) if id == "zzz"));
    }

    #[test]
    fn test_missing_runner_up_is_dropped_silently() {
        let candidates = vec![church("a"), church("b")];
        let result = reconcile(&candidates, &selection("a", &["b", "gone"])).unwrap();
        assert_eq!(result.runner_ups.len(), 1);
        assert_eq!(result.runner_ups[0].id, "b");
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let candidates = vec![church("a"), church("b"), church("c")];
        let sel = selection("b", &["a", "c"]);
        let first = reconcile(&candidates, &sel).unwrap();
        let second = reconcile(&candidates, &sel).unwrap();
        assert_eq!(first, second);
    }
}
