// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling.
//!
//! The heuristic word lists used by the checks are plain data here, so they
//! can be extended from a TOML file without touching the evaluators.

use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Heuristic rule data
    #[serde(default)]
    pub rules: RuleConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Data driving the image checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Alternatives shorter than this many characters are not relevant
    #[serde(default = "default_min_alt_length")]
    pub min_alt_length: usize,

    /// Alternatives equal to one of these (case-insensitive) are generic
    #[serde(default = "default_generic_alt_terms")]
    pub generic_alt_terms: Vec<String>,

    /// Alternatives ending with one of these extensions look like filenames
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// Patterns in the alternative suggesting the image contains text
    #[serde(default = "default_alt_text_indicators")]
    pub alt_text_indicators: Vec<String>,

    /// Patterns in the `src` filename suggesting the image contains text
    #[serde(default = "default_filename_text_indicators")]
    pub filename_text_indicators: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            min_alt_length: default_min_alt_length(),
            generic_alt_terms: default_generic_alt_terms(),
            image_extensions: default_image_extensions(),
            alt_text_indicators: default_alt_text_indicators(),
            filename_text_indicators: default_filename_text_indicators(),
        }
    }
}

fn default_min_alt_length() -> usize {
    3
}

fn default_generic_alt_terms() -> Vec<String> {
    ["image", "photo", "picture", "img", "icon", "icône", "logo"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_image_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "gif", "webp", "svg"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_alt_text_indicators() -> Vec<String> {
    [
        "titre",
        "heading",
        "text",
        "texte",
        "slogan",
        "citation",
        "quote",
        "paragraphe",
        "paragraph",
        "phrase",
        "sentence",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_filename_text_indicators() -> Vec<String> {
    [
        "text", "texte", "titre", "heading", "title", "banner", "header", "slogan", "quote",
        "citation", "typo",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Rule data with its patterns compiled, ready for the checks
#[derive(Debug, Clone)]
pub struct CompiledRules {
    pub min_alt_length: usize,
    /// Lowercased generic terms
    pub generic_alt_terms: Vec<String>,
    /// Matches an alternative ending with an image extension
    pub filename_extension: Option<Regex>,
    pub alt_text_indicators: Vec<Regex>,
    pub filename_text_indicators: Vec<Regex>,
}

impl CompiledRules {
    /// Compile rule data, failing on the first invalid pattern
    pub fn compile(rules: &RuleConfig) -> Result<Self> {
        if rules.min_alt_length == 0 {
            return Err(Error::Config(
                "rules.min_alt_length must be at least 1".to_string(),
            ));
        }

        let extensions = rules
            .image_extensions
            .iter()
            .map(|ext| regex::escape(ext.trim_start_matches('.')))
            .collect::<Vec<_>>()
            .join("|");
        // An empty alternation would match every alternative ending in "."
        let filename_extension = if extensions.is_empty() {
            None
        } else {
            Some(compile_pattern(&format!(r"\.({})$", extensions))?)
        };

        Ok(Self {
            min_alt_length: rules.min_alt_length,
            generic_alt_terms: rules
                .generic_alt_terms
                .iter()
                .map(|term| term.to_lowercase())
                .collect(),
            filename_extension,
            alt_text_indicators: compile_all(&rules.alt_text_indicators)?,
            filename_text_indicators: compile_all(&rules.filename_text_indicators)?,
        })
    }

    /// Whether `text` ends with a configured image extension
    pub fn has_image_extension(&self, text: &str) -> bool {
        self.filename_extension
            .as_ref()
            .is_some_and(|re| re.is_match(text))
    }

    /// Whether `text` is one of the generic terms, ignoring case
    pub fn is_generic_term(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.generic_alt_terms.iter().any(|term| *term == lower)
    }
}

impl Default for CompiledRules {
    fn default() -> Self {
        Self::compile(&RuleConfig::default()).expect("default rule patterns are valid")
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns.iter().map(|p| compile_pattern(p)).collect()
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Load configuration from a path; a missing file yields the defaults
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;

    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Get the default config path
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".rgaa-checker.toml")
}

/// Write default configuration to a file
pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let content = toml::to_string_pretty(&config).map_err(|e| Error::Config(e.to_string()))?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.rules.min_alt_length, 3);
        assert!(config.rules.generic_alt_terms.contains(&"icône".to_string()));
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [rules]
            generic_alt_terms = ["image", "bild"]
            "#,
        )
        .unwrap();
        assert_eq!(config.rules.generic_alt_terms, vec!["image", "bild"]);
        assert_eq!(config.rules.min_alt_length, 3);
        assert_eq!(config.rules.image_extensions.len(), 6);
    }

    #[test]
    fn test_compile_extension_pattern() {
        let rules = CompiledRules::default();
        assert!(rules.has_image_extension("hero-banner.JPG"));
        assert!(rules.has_image_extension("diagram.svg"));
        assert!(!rules.has_image_extension("jpg files explained"));
    }

    #[test]
    fn test_empty_extension_list_matches_nothing() {
        let rules = CompiledRules::compile(&RuleConfig {
            image_extensions: vec![],
            ..RuleConfig::default()
        })
        .unwrap();
        assert!(rules.filename_extension.is_none());
        assert!(!rules.has_image_extension("photo.png"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let result = CompiledRules::compile(&RuleConfig {
            alt_text_indicators: vec!["(unclosed".to_string()],
            ..RuleConfig::default()
        });
        assert!(matches!(result, Err(Error::InvalidPattern { .. })));
    }

    #[test]
    fn test_zero_min_length_rejected() {
        let result = CompiledRules::compile(&RuleConfig {
            min_alt_length: 0,
            ..RuleConfig::default()
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.rules.min_alt_length, 3);
    }

    #[test]
    fn test_write_then_load_default_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(".rgaa-checker.toml");
        write_default_config(&path).unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(
            config.rules.filename_text_indicators,
            RuleConfig::default().filename_text_indicators
        );
    }
}
