use crate::models::{Church, DenominationPref, MatchRequest};
use serde_json::json;

/// Required lead for the best-match reason. Enforced by the prompt contract,
/// not by post-hoc validation.
pub const BEST_MATCH_REASON_LEAD: &str = "Best match because:";

/// Longest candidate description embedded in the prompt, in characters.
/// Keeps the prompt bounded even when enrichment writes long summaries.
const DESCRIPTION_LIMIT: usize = 400;

/// Render the fixed instruction template. The output schema is stated
/// exactly: field names, cardinality, and the rule that every identifier
/// must come from the supplied list.
pub fn render_system_prompt(runner_up_count: usize) -> String {
    format!(
        r#"You match a user to a church from a provided list.

Return ONLY valid JSON with this exact shape:
{{
  "bestMatch": {{ "churchId": string, "reason": string }},
  "runnerUps": [ {{ "churchId": string, "reason": string }} ]
}}

Rules:
- churchId MUST be one of the provided church ids.
- Pick exactly 1 bestMatch and exactly {runner_up_count} runnerUps.
- bestMatch.reason MUST start with "{BEST_MATCH_REASON_LEAD}" and include 2-4 bullet points.
- runnerUps reasons should be 1-2 sentences each.
- Be specific: reference denomination/size/location/other preferences when relevant.
- Plain language. No marketing fluff."#
    )
}

/// Render the user block: preferences first, then the candidate list as JSON.
/// Every preference line is present even when the user expressed nothing,
/// so the model always sees complete context.
pub fn render_user_prompt(request: &MatchRequest) -> Result<String, serde_json::Error> {
    let denomination = DenominationPref::parse(&request.denomination);

    let candidates: Vec<serde_json::Value> =
        request.churches.iter().map(prompt_candidate).collect();
    let church_list = serde_json::to_string(&candidates)?;

    let worship_style = request
        .worship_style
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("No preference");
    let distance = request
        .distance
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("No preference");
    let priorities = if request.priorities.is_empty() {
        "(none)".to_string()
    } else {
        request.priorities.join(", ")
    };
    let additional_info = request
        .additional_info
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("(none)");

    Ok(format!(
        "User preferences:\n\
         - Denomination: {}\n\
         - Size: {}\n\
         - Location: {}\n\
         - Worship style: {}\n\
         - Distance: {}\n\
         - Priorities: {}\n\
         - Additional info: {}\n\
         \n\
         Church list (JSON):\n\
         {}",
        denomination.prompt_label(),
        request.size,
        request.location,
        worship_style,
        distance,
        priorities,
        additional_info,
        church_list,
    ))
}

/// Project a church onto the fields the model needs. Internal bookkeeping
/// (timestamps) stays out of the prompt.
fn prompt_candidate(church: &Church) -> serde_json::Value {
    json!({
        "id": church.id,
        "name": church.name,
        "denomination": church.denomination,
        "size": church.size,
        "location": church.location,
        "address": church.address,
        "description": church
            .description
            .as_deref()
            .map(truncate_description)
            .unwrap_or_default(),
        "website": church.website,
        "phone": church.phone,
    })
}

fn truncate_description(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_LIMIT {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(DESCRIPTION_LIMIT).collect();
        truncated.push_str("...");
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChurchSize;

    fn church(id: &str, description: Option<&str>) -> Church {
        Church {
            id: id.to_string(),
            name: format!("Church {}", id),
            denomination: "Lutheran".to_string(),
            size: ChurchSize::Small,
            location: "Boalsburg".to_string(),
            address: "123 Main St".to_string(),
            latitude: Some(40.77),
            longitude: Some(-77.79),
            phone: None,
            website: Some("https://example.org".to_string()),
            description: description.map(str::to_string),
            created_at: None,
            updated_at: None,
        }
    }

    fn request(churches: Vec<Church>) -> MatchRequest {
        MatchRequest {
            denomination: String::new(),
            size: "small".to_string(),
            location: "Boalsburg".to_string(),
            worship_style: Some("Traditional".to_string()),
            distance: None,
            priorities: vec!["music".to_string(), "community".to_string()],
            additional_info: None,
            churches,
        }
    }

    #[test]
    fn test_system_prompt_states_cardinality() {
        let prompt = render_system_prompt(2);
        assert!(prompt.contains("exactly 1 bestMatch and exactly 2 runnerUps"));
        assert!(prompt.contains("MUST be one of the provided church ids"));
        assert!(prompt.contains(BEST_MATCH_REASON_LEAD));
    }

    #[test]
    fn test_system_prompt_relaxes_for_small_pools() {
        let prompt = render_system_prompt(0);
        assert!(prompt.contains("exactly 0 runnerUps"));
    }

    #[test]
    fn test_user_prompt_renders_every_preference_line() {
        let prompt = render_user_prompt(&request(vec![church("a", None)])).unwrap();
        assert!(prompt.contains("- Denomination: No preference / Not sure"));
        assert!(prompt.contains("- Size: small"));
        assert!(prompt.contains("- Worship style: Traditional"));
        assert!(prompt.contains("- Distance: No preference"));
        assert!(prompt.contains("- Priorities: music, community"));
        assert!(prompt.contains("- Additional info: (none)"));
        assert!(prompt.contains("Church list (JSON):"));
        assert!(prompt.contains("\"id\":\"a\""));
    }

    #[test]
    fn test_long_descriptions_are_truncated() {
        let long = "x".repeat(2000);
        let prompt = render_user_prompt(&request(vec![church("a", Some(&long))])).unwrap();
        assert!(!prompt.contains(&long));
        assert!(prompt.contains(&format!("{}...", "x".repeat(DESCRIPTION_LIMIT))));
    }

    #[test]
    fn test_timestamps_stay_out_of_the_prompt() {
        let mut c = church("a", None);
        c.created_at = Some(chrono::Utc::now());
        let value = prompt_candidate(&c);
        assert!(value.get("created_at").is_none());
        assert!(value.get("updated_at").is_none());
    }
}
