use anyhow::{Context, Result};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub api_base: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub export_dir: String,
    pub save_exchanges: bool,
    pub exchange_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash-exp".into(),
            api_base: "https://generativelanguage.googleapis.com".into(),
            api_key: None,
            timeout_secs: None,
            export_dir: ".".into(),
            save_exchanges: false,
            exchange_dir: ".stitch/tx".into(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().map(|k| !k.trim().is_empty()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stitch.toml");
        fs::write(&path, "model = \"gemini-1.5-pro\"\ntimeout_secs = 30\n").unwrap();

        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.model, "gemini-1.5-pro");
        assert_eq!(cfg.timeout_secs, Some(30));
        assert_eq!(cfg.api_base, Config::default().api_base);
        assert!(!cfg.has_api_key());
    }

    #[test]
    fn blank_key_is_not_configured() {
        let cfg = Config { api_key: Some("  ".into()), ..Config::default() };
        assert!(!cfg.has_api_key());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "model = [").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
