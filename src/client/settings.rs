use crate::models::NO_PREFERENCE_TOKEN;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Per-user defaults remembered across visits and used to seed the
/// search form. An explicit load/save pair over one small JSON record;
/// nothing reads or writes it ambiently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default = "default_location")]
    pub default_location: String,
    #[serde(default)]
    pub default_size: String,
    #[serde(default = "default_denomination")]
    pub default_denomination: String,
}

fn default_location() -> String {
    "State College".to_string()
}

fn default_denomination() -> String {
    NO_PREFERENCE_TOKEN.to_string()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            default_location: default_location(),
            default_size: String::new(),
            default_denomination: default_denomination(),
        }
    }
}

impl UserSettings {
    /// Read settings from disk. A missing file yields the defaults; a
    /// partial file keeps its fields and fills the rest from defaults;
    /// a corrupt file falls back to defaults entirely.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Write settings back, creating parent directories as needed.
    /// Only called on explicit user action.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join("faithfinder-match-tests")
            .join(format!("{}-{}.json", name, uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = UserSettings::load(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings, UserSettings::default());
        assert_eq!(settings.default_location, "State College");
        assert_eq!(settings.default_denomination, "no-preference");
    }

    #[test]
    fn test_round_trip() {
        let path = scratch_path("round-trip");
        let settings = UserSettings {
            default_location: "Bellefonte".to_string(),
            default_size: "small".to_string(),
            default_denomination: "Methodist".to_string(),
        };

        settings.save(&path).unwrap();
        let loaded = UserSettings::load(&path);
        assert_eq!(loaded, settings);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let path = scratch_path("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "default_size": "large" }"#).unwrap();

        let loaded = UserSettings::load(&path);
        assert_eq!(loaded.default_size, "large");
        assert_eq!(loaded.default_location, "State College");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json at all {{{").unwrap();

        let loaded = UserSettings::load(&path);
        assert_eq!(loaded, UserSettings::default());

        fs::remove_file(&path).ok();
    }
}
