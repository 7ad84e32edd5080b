//! Configuration for sharebridge

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Action an inbound event must carry to count as a share
    #[serde(default = "default_send_action")]
    pub send_action: String,

    /// Declared content type an inbound event must carry
    #[serde(default = "default_mime_type")]
    pub mime_type: String,

    /// Name of the notification pushed to the consumer
    #[serde(default = "default_event_name")]
    pub event_name: String,
}

fn default_send_action() -> String {
    crate::SEND_ACTION.to_string()
}

fn default_mime_type() -> String {
    crate::TEXT_PLAIN.to_string()
}

fn default_event_name() -> String {
    crate::SHARE_TEXT_EVENT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            send_action: default_send_action(),
            mime_type: default_mime_type(),
            event_name: default_event_name(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::from_file(config_path);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("sharebridge").join("config.yml")),
            Some(PathBuf::from("sharebridge.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Ok(Config::default())
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).context(format!("Failed to read config: {}", path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).context(format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.send_action, "android.intent.action.SEND");
        assert_eq!(config.mime_type, "text/plain");
        assert_eq!(config.event_name, "onShareText");
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(&path, "event_name: sharedText\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.event_name, "sharedText");
        assert_eq!(config.mime_type, "text/plain");
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.yml");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
