//! Configuration validation

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_header(config)?;
    validate_changelog(config)?;
    validate_git(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_header(config: &Config) -> Result<()> {
    if config.header.max_length == 0 {
        return Err(ConfigError::InvalidValue {
            field: "header.max_length".to_string(),
            message: "must be greater than zero".to_string(),
        }
        .into());
    }

    if config.header.types.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "header.types".to_string(),
            message: "at least one commit type must be declared".to_string(),
        }
        .into());
    }

    // Type names are matched case-insensitively, so uniqueness is too.
    let mut seen = HashSet::new();
    for ty in &config.header.types {
        if ty.name.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "header.types".to_string(),
                message: "type name cannot be empty".to_string(),
            }
            .into());
        }
        if !seen.insert(ty.name.to_lowercase()) {
            return Err(ConfigError::Duplicate {
                kind: "commit type",
                name: ty.name.clone(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    let mut seen = HashSet::new();
    for group in &config.changelog.groups {
        if group.name.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "changelog.groups".to_string(),
                message: "group name cannot be empty".to_string(),
            }
            .into());
        }
        if !seen.insert(group.name.to_lowercase()) {
            return Err(ConfigError::Duplicate {
                kind: "changelog group",
                name: group.name.clone(),
            }
            .into());
        }
    }

    // Every group a type maps to must be declared.
    for ty in &config.header.types {
        if let Some(group) = &ty.group {
            if !seen.contains(&group.to_lowercase()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("header.types.{}", ty.name),
                    message: format!("maps to undeclared changelog group '{group}'"),
                }
                .into());
            }
        }
    }

    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "git.remote".to_string(),
            message: "remote cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}
