//! Run configuration
//!
//! Credentials come from the environment (optionally via `.env`). Run-level
//! settings have built-in defaults that a TOML file may override. The lookback
//! window and title keywords are fixed and not part of `Settings`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::JobsError;
use crate::listing::collector::{Collector, DEFAULT_KEYWORDS, DEFAULT_LOOKBACK_DAYS, DEFAULT_MAX_PAGES};

pub const ID_VAR: &str = "KVMA_ID";
pub const SECRET_VAR: &str = "KVMA_PW";

const APP_DIR: &str = "kvma-jobs";
const CONFIG_FILENAME: &str = "config.toml";

/// Member login for the site
#[derive(Clone)]
pub struct Credentials {
    pub id: String,
    secret: String,
}

impl Credentials {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }

    /// Read `KVMA_ID` / `KVMA_PW`, loading a `.env` file first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from any key lookup; blank values count as missing.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let fetch = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(JobsError::MissingCredential(key))
        };
        Ok(Self::new(fetch(ID_VAR)?, fetch(SECRET_VAR)?))
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("secret", &"***")
            .finish()
    }
}

/// Tunable settings for a run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Board searches to run, one output pair each
    pub search_terms: Vec<String>,
    pub max_pages: usize,
    pub output_dir: PathBuf,
    pub headless: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_terms: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            max_pages: DEFAULT_MAX_PAGES,
            output_dir: PathBuf::from("data"),
            headless: false,
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)
            .map_err(|e| JobsError::Config(e.to_string()))
            .context("Failed to parse settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`, or from the default location when it exists.
    ///
    /// An explicit path must exist; a missing default file just means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => {
                    debug!("No settings file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        info!("Loading settings from {:?}", path);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid settings file {:?}", path))
    }

    pub fn validate(&self) -> Result<()> {
        if self.search_terms.iter().all(|t| t.trim().is_empty()) {
            return Err(JobsError::Config("search_terms must not be empty".to_string()).into());
        }
        if self.max_pages == 0 {
            return Err(JobsError::Config("max_pages must be at least 1".to_string()).into());
        }
        Ok(())
    }

    /// Collector over the fixed keywords and lookback window, capped at `max_pages`.
    pub fn collector(&self) -> Collector {
        Collector::new(
            DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            DEFAULT_LOOKBACK_DAYS,
            self.max_pages,
        )
    }
}

/// `$XDG_CONFIG_HOME/kvma-jobs/config.toml`, or the platform config dir.
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dir_spec::config_home)
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Ensure the output directory exists.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .map_err(JobsError::Io)
        .with_context(|| format!("Failed to create output directory {:?}", dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_board_search() {
        let s = Settings::default();
        assert_eq!(s.search_terms, vec!["1년차", "인턴"]);
        assert_eq!(s.max_pages, 50);
        assert_eq!(s.output_dir, PathBuf::from("data"));
        assert!(!s.headless);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let s = Settings::from_toml_str("max_pages = 5\nheadless = true\n").unwrap();
        assert_eq!(s.max_pages, 5);
        assert!(s.headless);
        assert_eq!(s.search_terms, Settings::default().search_terms);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Settings::from_toml_str("lookback = 14\n").unwrap_err();
        assert!(format!("{:#}", err).contains("configuration error"));
    }

    #[test]
    fn test_window_and_keywords_are_not_settings() {
        assert!(Settings::from_toml_str("lookback_days = 14\n").is_err());
        assert!(Settings::from_toml_str("keywords = [\"정규직\"]\n").is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Settings::from_toml_str("search_terms = []\n").is_err());
        assert!(Settings::from_toml_str("max_pages = 0\n").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "search_terms = [\"인턴\"]\noutput_dir = \"out\"\n").unwrap();

        let s = Settings::load(Some(&path)).unwrap();
        assert_eq!(s.search_terms, vec!["인턴"]);
        assert_eq!(s.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Settings::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_collector_uses_fixed_window_and_keywords() {
        let s = Settings::from_toml_str("max_pages = 7\nsearch_terms = [\"수의사\"]\n").unwrap();
        let collector = s.collector();
        assert_eq!(collector.keywords, vec!["1년차", "인턴"]);
        assert_eq!(collector.lookback_days, 30);
        assert_eq!(collector.max_pages, 7);
    }

    #[test]
    fn test_credentials_from_lookup() {
        let creds = Credentials::from_lookup(lookup(&[("KVMA_ID", "vet"), ("KVMA_PW", "pw")])).unwrap();
        assert_eq!(creds.id, "vet");
        assert_eq!(creds.secret(), "pw");
    }

    #[test]
    fn test_missing_or_blank_credential_is_named() {
        let err = Credentials::from_lookup(lookup(&[("KVMA_ID", "vet")])).unwrap_err();
        assert_eq!(err.to_string(), "missing credential: KVMA_PW must be set");

        let err = Credentials::from_lookup(lookup(&[("KVMA_ID", " "), ("KVMA_PW", "pw")])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JobsError>(),
            Some(JobsError::MissingCredential("KVMA_ID"))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("vet", "hunter2");
        let dbg = format!("{:?}", creds);
        assert!(dbg.contains("vet"));
        assert!(!dbg.contains("hunter2"));
    }
}
