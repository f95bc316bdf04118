use serde::{Deserialize, Serialize};

/// Congregation size bucket used by both the directory and the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChurchSize {
    Small,
    Medium,
    Large,
}

impl ChurchSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChurchSize::Small => "small",
            ChurchSize::Medium => "medium",
            ChurchSize::Large => "large",
        }
    }
}

impl std::fmt::Display for ChurchSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single directory entry eligible for selection.
///
/// Identifiers are opaque and stable; the matching core never re-derives
/// or re-orders them. Rows are created and updated by the admin surface
/// and the import/enrichment jobs, read-only everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Church {
    pub id: String,
    pub name: String,
    pub denomination: String,
    pub size: ChurchSize,
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
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Canonical wire token for "no denomination preference".
pub const NO_PREFERENCE_TOKEN: &str = "no-preference";

/// Display label the prompt uses for the sentinel, matching what the form shows.
const NO_PREFERENCE_LABEL: &str = "No preference / Not sure";

/// Denomination preference with an explicit "no preference" sentinel.
///
/// Earlier form variants overloaded the empty string and the display label
/// for the same meaning; all three spellings deserialize into
/// `NoPreference`, and serialization always emits the canonical token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DenominationPref {
    #[default]
    NoPreference,
    Named(String),
}

impl DenominationPref {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case(NO_PREFERENCE_TOKEN)
            || trimmed.eq_ignore_ascii_case(NO_PREFERENCE_LABEL)
        {
            DenominationPref::NoPreference
        } else {
            DenominationPref::Named(trimmed.to_string())
        }
    }

    /// The value sent on the wire: never empty, never omitted.
    pub fn as_wire(&self) -> &str {
        match self {
            DenominationPref::NoPreference => NO_PREFERENCE_TOKEN,
            DenominationPref::Named(name) => name,
        }
    }

    /// The value rendered into the prompt.
    pub fn prompt_label(&self) -> &str {
        match self {
            DenominationPref::NoPreference => NO_PREFERENCE_LABEL,
            DenominationPref::Named(name) => name,
        }
    }

    pub fn is_no_preference(&self) -> bool {
        matches!(self, DenominationPref::NoPreference)
    }
}

impl Serialize for DenominationPref {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for DenominationPref {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(DenominationPref::parse(&raw))
    }
}

/// The visitor's structured search criteria.
///
/// Size and location are required; everything else is optional but always
/// transmitted explicitly so the matching service has complete context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceQuery {
    #[serde(default)]
    pub denomination: DenominationPref,
    pub size: ChurchSize,
    pub location: String,
    #[serde(default, rename = "worshipStyle")]
    pub worship_style: Option<String>,
    #[serde(default)]
    pub distance: Option<String>,
    #[serde(default)]
    pub priorities: Vec<String>,
    #[serde(default, rename = "additionalInfo")]
    pub additional_info: Option<String>,
}

/// One selected candidate: an identifier plus a natural-language reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    #[serde(rename = "churchId")]
    pub church_id: String,
    #[serde(default)]
    pub reason: String,
}

/// The matching service's raw output: identifiers and reasons only,
/// pre-reconciliation. Full candidate records are never re-embedded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSelection {
    #[serde(rename = "bestMatch")]
    pub best_match: SelectionEntry,
    #[serde(rename = "runnerUps", default)]
    pub runner_ups: Vec<SelectionEntry>,
}

/// A full church record merged with the reason it was selected.
/// Optional display fields are normalized so the display layer never
/// needs defensive checks: missing description becomes an empty string,
/// missing coordinates and contact details stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedChurch {
    pub id: String,
    pub name: String,
    pub denomination: String,
    pub size: ChurchSize,
    pub location: String,
    pub address: String,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub reason: String,
}

impl MatchedChurch {
    pub fn from_parts(church: &Church, reason: &str) -> Self {
        Self {
            id: church.id.clone(),
            name: church.name.clone(),
            denomination: church.denomination.clone(),
            size: church.size,
            location: church.location.clone(),
            address: church.address.clone(),
            description: church.description.clone().unwrap_or_default(),
            latitude: church.latitude,
            longitude: church.longitude,
            phone: church.phone.clone(),
            website: church.website.clone(),
            reason: reason.to_string(),
        }
    }
}

/// The final, display-ready structure with full candidate data merged in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledResult {
    #[serde(rename = "bestMatch")]
    pub best_match: MatchedChurch,
    #[serde(rename = "runnerUps")]
    pub runner_ups: Vec<MatchedChurch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denomination_sentinel_spellings_collapse() {
        assert_eq!(DenominationPref::parse(""), DenominationPref::NoPreference);
        assert_eq!(DenominationPref::parse("  "), DenominationPref::NoPreference);
        assert_eq!(
            DenominationPref::parse("no-preference"),
            DenominationPref::NoPreference
        );
        assert_eq!(
            DenominationPref::parse("No preference / Not sure"),
            DenominationPref::NoPreference
        );
        assert_eq!(
            DenominationPref::parse("Methodist"),
            DenominationPref::Named("Methodist".to_string())
        );
    }

    #[test]
    fn test_denomination_wire_token_is_never_empty() {
        assert_eq!(DenominationPref::NoPreference.as_wire(), "no-preference");
        assert_eq!(
            DenominationPref::Named("Baptist".to_string()).as_wire(),
            "Baptist"
        );
    }

    #[test]
    fn test_selection_wire_names() {
        let selection = MatchSelection {
            best_match: SelectionEntry {
                church_id: "a".to_string(),
                reason: "fits".to_string(),
            },
            runner_ups: vec![],
        };

        let json = serde_json::to_value(&selection).unwrap();
        assert!(json.get("bestMatch").is_some());
        assert_eq!(json["bestMatch"]["churchId"], "a");
        assert!(json.get("runnerUps").is_some());
    }

    #[test]
    fn test_matched_church_normalizes_description() {
        let church = Church {
            id: "c1".to_string(),
            name: "Grace Fellowship".to_string(),
            denomination: "Non-denominational".to_string(),
            size: ChurchSize::Medium,
            location: "State College".to_string(),
            address: String::new(),
            latitude: None,
            longitude: None,
            phone: None,
            website: None,
            description: None,
            created_at: None,
            updated_at: None,
        };

        let matched = MatchedChurch::from_parts(&church, "close by");
        assert_eq!(matched.description, "");
        assert_eq!(matched.reason, "close by");
        assert!(matched.latitude.is_none());
    }

    #[test]
    fn test_church_size_roundtrip() {
        let json = serde_json::to_string(&ChurchSize::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let parsed: ChurchSize = serde_json::from_str("\"large\"").unwrap();
        assert_eq!(parsed, ChurchSize::Large);
    }
}
