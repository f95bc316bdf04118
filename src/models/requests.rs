use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Church, ChurchSize, PreferenceQuery};

/// Request to match a visitor to a church from the submitted candidate list.
///
/// Denomination uses an explicit "no preference" token rather than being
/// omitted; size, location, and a non-empty candidate list are required.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[serde(default)]
    pub denomination: String,
    #[validate(length(min = 1, message = "size is required"))]
    pub size: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[serde(
        default,
        alias = "worship_style",
        rename = "worshipStyle",
        skip_serializing_if = "Option::is_none"
    )]
    pub worship_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(default)]
    pub priorities: Vec<String>,
    #[serde(
        default,
        alias = "additional_info",
        rename = "additionalInfo",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_info: Option<String>,
    #[validate(length(min = 1, message = "churches must not be empty"))]
    pub churches: Vec<Church>,
}

impl MatchRequest {
    /// Build the wire request from a validated preference query plus the
    /// candidate list the request builder already fetched.
    pub fn from_query(query: &PreferenceQuery, churches: Vec<Church>) -> Self {
        Self {
            denomination: query.denomination.as_wire().to_string(),
            size: query.size.as_str().to_string(),
            location: query.location.clone(),
            worship_style: query.worship_style.clone(),
            distance: query.distance.clone(),
            priorities: query.priorities.clone(),
            additional_info: query.additional_info.clone(),
            churches,
        }
    }
}

/// Admin request to add a church to the directory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateChurchRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub denomination: String,
    pub size: ChurchSize,
    #[validate(length(min = 1))]
    pub location: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Admin request to update a church. All fields optional; only present
/// fields are sent to the datastore.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateChurchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denomination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<ChurchSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::DenominationPref;

    fn church(id: &str) -> Church {
        Church {
            id: id.to_string(),
            name: format!("Church {}", id),
            denomination: "Methodist".to_string(),
            size: ChurchSize::Small,
            location: "Bellefonte".to_string(),
            address: String::new(),
            latitude: None,
            longitude: None,
            phone: None,
            website: None,
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_match_request_requires_size_and_location() {
        let req = MatchRequest {
            denomination: String::new(),
            size: String::new(),
            location: "State College".to_string(),
            worship_style: None,
            distance: None,
            priorities: vec![],
            additional_info: None,
            churches: vec![church("a")],
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_match_request_requires_churches() {
        let req = MatchRequest {
            denomination: "no-preference".to_string(),
            size: "medium".to_string(),
            location: "State College".to_string(),
            worship_style: None,
            distance: None,
            priorities: vec![],
            additional_info: None,
            churches: vec![],
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_from_query_sends_explicit_sentinel() {
        let query = PreferenceQuery {
            denomination: DenominationPref::NoPreference,
            size: ChurchSize::Medium,
            location: "State College".to_string(),
            worship_style: None,
            distance: None,
            priorities: vec!["youth programs".to_string()],
            additional_info: None,
        };

        let req = MatchRequest::from_query(&query, vec![church("a")]);
        assert_eq!(req.denomination, "no-preference");
        assert_eq!(req.size, "medium");
        assert!(req.validate().is_ok());
    }
}
