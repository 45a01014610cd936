//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::severity::Severity;

use super::defaults::{default_groups, default_types};

/// Main configuration for Gantry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Treat autofixes as failures (CI strictness)
    pub fail_on_autofix: bool,

    /// Commit header configuration
    pub header: HeaderConfig,

    /// Field rule variant selection
    pub rules: RulesConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,

    /// Versioning configuration
    pub versioning: VersioningConfig,

    /// Git configuration
    pub git: GitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fail_on_autofix: false,
            header: HeaderConfig::default(),
            rules: RulesConfig::default(),
            changelog: ChangelogConfig::default(),
            versioning: VersioningConfig::default(),
            git: GitConfig::default(),
        }
    }
}

/// Commit header configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Maximum length of the header line
    pub max_length: usize,

    /// Accepted commit types
    pub types: Vec<TypeConfig>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            max_length: 80,
            types: default_types(),
        }
    }
}

/// One accepted commit type and its classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeConfig {
    /// Type name as written in the header
    pub name: String,

    /// Bypass all further validation for this type (WIP-style)
    #[serde(default)]
    pub skip: bool,

    /// Severity class this type maps to
    #[serde(default)]
    pub severity: Severity,

    /// Changelog group collecting this type, if any
    #[serde(default)]
    pub group: Option<String>,
}

impl TypeConfig {
    /// Create a non-skip type
    pub fn new(name: &str, severity: Severity, group: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            skip: false,
            severity,
            group: group.map(str::to_string),
        }
    }

    /// Create a skip type
    pub fn skip(name: &str) -> Self {
        Self {
            name: name.to_string(),
            skip: true,
            severity: Severity::None,
            group: None,
        }
    }
}

/// Built-in rule variant for a single message field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleVariant {
    /// The built-in default rule for the field
    #[default]
    Default,
    /// Accept any text
    Any,
}

/// Which rule variant validates each field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Scope rule variant
    pub scope: RuleVariant,
    /// Subject rule variant
    pub subject: RuleVariant,
    /// Body rule variant
    pub body: RuleVariant,
    /// Footer rule variant
    pub footer: RuleVariant,
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// Preserve unknown group headings found in the Unreleased region
    pub keep_unknown_groups: bool,

    /// Changelog groups in declaration (render) order
    pub groups: Vec<GroupConfig>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            keep_unknown_groups: false,
            groups: default_groups(),
        }
    }
}

/// One changelog group mapping a section to a severity class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Group name, used as the markdown heading text
    pub name: String,

    /// Symbol rendered before the name in headings
    pub symbol: String,

    /// Severity class associated with the group
    #[serde(default)]
    pub severity: Severity,

    /// Exclude the group from rendering entirely
    #[serde(default)]
    pub skip: bool,
}

impl GroupConfig {
    /// Create a group
    pub fn new(name: &str, symbol: &str, severity: Severity) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            severity,
            skip: false,
        }
    }
}

/// Versioning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersioningConfig {
    /// Prefix of release tags (stripped on parse, re-applied on format)
    pub tag_prefix: String,

    /// Label used for tweak/prerelease bumps
    pub prerelease_label: String,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            tag_prefix: "v".to_string(),
            prerelease_label: "pre".to_string(),
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote name used for commit and release links
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.header.max_length, 80);
        assert!(!config.fail_on_autofix);
        assert_eq!(config.versioning.tag_prefix, "v");
        assert!(config.header.types.iter().any(|t| t.name == "feat"));
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let back: Config = toml::from_str(&toml).unwrap();
        assert_eq!(back.header.max_length, config.header.max_length);
        assert_eq!(back.changelog.groups.len(), config.changelog.groups.len());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str("fail_on_autofix = true").unwrap();
        assert!(config.fail_on_autofix);
        assert_eq!(config.header.max_length, 80);
        assert!(!config.header.types.is_empty());
    }
}
