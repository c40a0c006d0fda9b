use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Longest title a link may carry.
pub const MAX_LINK_TITLE_LENGTH: usize = 32;

/// Core configuration, loadable from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub max_title_length: usize,
    /// Prefix the in-process backend mints link URLs under
    pub link_prefix: String,
    /// Fragments removed from a URL when it stands in for a missing title
    pub display_strip_prefixes: Vec<String>,
    /// Delay the worker waits before answering each request
    pub simulated_latency_ms: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            max_title_length: MAX_LINK_TITLE_LENGTH,
            link_prefix: "https://t.me/addlist/".to_string(),
            display_strip_prefixes: vec![
                "https://".to_string(),
                "t.me/+".to_string(),
                "t.me/joinchat/".to_string(),
            ],
            simulated_latency_ms: 0,
        }
    }
}

impl CoreConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to deserialize config")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = CoreConfig::from_json(r#"{"simulated_latency_ms": 25}"#).unwrap();
        assert_eq!(config.simulated_latency_ms, 25);
        assert_eq!(config.max_title_length, MAX_LINK_TITLE_LENGTH);
        assert_eq!(config.display_strip_prefixes.len(), 3);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"link_prefix": "https://example.org/l/"}"#).unwrap();

        let config = CoreConfig::load(&path).unwrap();
        assert_eq!(config.link_prefix, "https://example.org/l/");
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = CoreConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_json_keys_match_model_casing() {
        let json = CoreConfig::default().to_json().unwrap();
        assert!(json.contains("\"max_title_length\""));
        assert!(!json.contains("maxTitleLength"));
        assert_eq!(CoreConfig::from_json(&json).unwrap(), CoreConfig::default());
    }
}
