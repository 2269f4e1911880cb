//! Configuration for the competence CLI.
//!
//! Configuration only shapes how results are rendered and judged; the
//! analyzer's heuristics are fixed.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::score::DEFAULT_PASS_THRESHOLD;

/// Config file names searched for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["competence.yaml", ".competence.yaml"];

/// Supported output formats.
pub const FORMATS: &[&str] = &["pretty", "json"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    /// "pretty" (default) or "json"
    #[serde(default)]
    pub format: Option<String>,
    /// Minimum total score for a passing submission (default: 0.5)
    #[serde(default)]
    pub pass_threshold: Option<f64>,
    /// Whether the pretty report lists construct counts (default: true)
    #[serde(default)]
    pub show_counts: Option<bool>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content)
    }

    /// Parse a config from YAML text. An empty document yields the defaults.
    pub fn parse_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Returns the output format (defaults to "pretty").
    pub fn get_format(&self) -> &str {
        self.format.as_deref().unwrap_or("pretty")
    }

    /// Returns the pass threshold (defaults to `DEFAULT_PASS_THRESHOLD`).
    pub fn get_pass_threshold(&self) -> f64 {
        self.pass_threshold.unwrap_or(DEFAULT_PASS_THRESHOLD)
    }

    /// Returns whether construct counts are shown (defaults to true).
    pub fn should_show_counts(&self) -> bool {
        self.show_counts.unwrap_or(true)
    }
}

/// Check a config for values the CLI cannot use.
pub fn validate(config: &Config) -> Result<()> {
    let format = config.get_format();
    if !FORMATS.contains(&format) {
        return Err(Error::InvalidConfig(format!(
            "format {:?} must be one of {}",
            format,
            FORMATS.join(", ")
        )));
    }

    let threshold = config.get_pass_threshold();
    if !(0.0..=1.0).contains(&threshold) {
        return Err(Error::InvalidConfig(format!(
            "pass_threshold {} must be between 0.0 and 1.0",
            threshold
        )));
    }

    Ok(())
}

/// Find a config file: the working directory first, then the user config dir.
pub fn discover() -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = PathBuf::from(name);
        if path.exists() {
            return Some(path);
        }
    }

    directories::ProjectDirs::from("", "", "competence")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
        .filter(|path| path.exists())
}

/// Load the explicit config if given, else a discovered one, else defaults.
///
/// Returns the config together with the path it came from.
pub fn load(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => discover(),
    };

    let config = match &path {
        Some(p) => Config::parse_file(p)?,
        None => Config::default(),
    };
    validate(&config)?;

    Ok((config, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.get_format(), "pretty");
        assert_eq!(config.get_pass_threshold(), DEFAULT_PASS_THRESHOLD);
        assert!(config.should_show_counts());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_parse_full() {
        let config = Config::parse_str(
            r#"
version: "1"
format: json
pass_threshold: 0.75
show_counts: false
"#,
        )
        .unwrap();
        assert_eq!(config.version, "1");
        assert_eq!(config.get_format(), "json");
        assert_eq!(config.get_pass_threshold(), 0.75);
        assert!(!config.should_show_counts());
    }

    #[test]
    fn test_parse_empty_document() {
        let config = Config::parse_str("  \n").unwrap();
        assert!(config.format.is_none());
    }

    #[test]
    fn test_parse_malformed() {
        let err = Config::parse_str("pass_threshold: [not, a, number]").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_format = Config {
            format: Some("sarif".to_string()),
            ..Default::default()
        };
        assert!(matches!(validate(&bad_format), Err(Error::InvalidConfig(_))));

        let bad_threshold = Config {
            pass_threshold: Some(1.5),
            ..Default::default()
        };
        assert!(matches!(validate(&bad_threshold), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "format: json\npass_threshold: 0.25").unwrap();

        let (config, path) = load(Some(file.path())).unwrap();
        assert_eq!(path.as_deref(), Some(file.path()));
        assert_eq!(config.get_format(), "json");
        assert_eq!(config.get_pass_threshold(), 0.25);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        let err = load(Some(&missing)).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "format: xml").unwrap();
        assert!(matches!(
            load(Some(file.path())),
            Err(Error::InvalidConfig(_))
        ));
    }
}
