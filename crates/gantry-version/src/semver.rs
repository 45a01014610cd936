//! Semantic version arithmetic
//!
//! Follows the SemVer 2.0.0 specification: https://semver.org/

use serde::{Deserialize, Serialize};
use tracing::debug;

use gantry_core::error::VersionError;
use gantry_core::Severity;

use crate::resolver::Resolution;

/// Version components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionComponents {
    /// Major version
    pub major: u64,
    /// Minor version
    pub minor: u64,
    /// Patch version
    pub patch: u64,
    /// Pre-release identifier
    pub prerelease: Option<String>,
    /// Build metadata
    pub build: Option<String>,
}

impl VersionComponents {
    /// Create new version components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Set prerelease
    pub fn with_prerelease(mut self, prerelease: impl Into<String>) -> Self {
        self.prerelease = Some(prerelease.into());
        self
    }

    /// Parse a version string, stripping the given tag prefix
    pub fn parse(version: &str, tag_prefix: &str) -> Result<Self, VersionError> {
        let version = version.strip_prefix(tag_prefix).unwrap_or(version);
        let version = version.strip_prefix('v').unwrap_or(version);

        let v = semver::Version::parse(version)
            .map_err(|e| VersionError::ParseFailed(version.to_string(), e.to_string()))?;

        Ok(Self {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
            prerelease: if v.pre.is_empty() {
                None
            } else {
                Some(v.pre.to_string())
            },
            build: if v.build.is_empty() {
                None
            } else {
                Some(v.build.to_string())
            },
        })
    }

    /// Convert to string representation (no tag prefix)
    pub fn to_version_string(&self) -> String {
        let mut v = format!("{}.{}.{}", self.major, self.minor, self.patch);

        if let Some(pre) = &self.prerelease {
            v.push('-');
            v.push_str(pre);
        }

        if let Some(build) = &self.build {
            v.push('+');
            v.push_str(build);
        }

        v
    }

    /// Bump according to the aggregate severity of a commit range.
    ///
    /// `Major`/`Minor`/`Patch` are the standard semver bumps with lower
    /// components zeroed. `Tweak`/`None` only move the numeric
    /// prerelease suffix: `1.2.3` becomes `1.2.4-<label>.0`, and an
    /// existing suffix is incremented.
    pub fn bump(&self, severity: Severity, prerelease_label: &str) -> Self {
        let mut result = self.clone();

        match severity {
            Severity::Major => {
                result.major += 1;
                result.minor = 0;
                result.patch = 0;
                result.prerelease = None;
            }
            Severity::Minor => {
                result.minor += 1;
                result.patch = 0;
                result.prerelease = None;
            }
            Severity::Patch => {
                // A prerelease graduates to its release version.
                if result.prerelease.is_some() {
                    result.prerelease = None;
                } else {
                    result.patch += 1;
                }
            }
            Severity::Tweak | Severity::None => {
                if result.prerelease.is_none() {
                    result.patch += 1;
                }
                result.prerelease = Some(increment_prerelease(
                    result.prerelease.as_deref(),
                    prerelease_label,
                ));
            }
        }

        // Build metadata never survives a bump.
        result.build = None;
        result
    }
}

impl std::fmt::Display for VersionComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_version_string())
    }
}

/// Increment the numeric suffix of a prerelease identifier, starting
/// at 0 when there is none.
fn increment_prerelease(current: Option<&str>, label: &str) -> String {
    match current {
        Some(pre) => {
            if let Some(dot_pos) = pre.rfind('.') {
                let identifier = &pre[..dot_pos];
                let number = &pre[dot_pos + 1..];

                if let Ok(n) = number.parse::<u64>() {
                    return format!("{}.{}", identifier, n + 1);
                }
            }

            // No numeric tail to increment, start one.
            format!("{pre}.0")
        }
        None => format!("{label}.0"),
    }
}

/// Explicit version overrides, taking precedence component-by-component
/// over the computed bump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionOverrides {
    /// Major component
    pub major: Option<u64>,
    /// Minor component
    pub minor: Option<u64>,
    /// Patch component
    pub patch: Option<u64>,
    /// Pre-release label
    pub prerelease: Option<String>,
    /// Build number
    pub build: Option<u64>,
}

impl VersionOverrides {
    /// Whether any component is overridden
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(&self, mut components: VersionComponents) -> VersionComponents {
        if let Some(major) = self.major {
            components.major = major;
        }
        if let Some(minor) = self.minor {
            components.minor = minor;
        }
        if let Some(patch) = self.patch {
            components.patch = patch;
        }
        if let Some(prerelease) = &self.prerelease {
            components.prerelease = Some(prerelease.clone());
        }
        if let Some(build) = self.build {
            components.build = Some(build.to_string());
        }
        components
    }
}

/// Compute the next version tag from the latest tag, the aggregate
/// severity, and explicit overrides. Defaults to `0.0.1` when no prior
/// tag exists.
pub fn next_version(
    latest_tag: Option<&str>,
    resolution: &Resolution,
    overrides: &VersionOverrides,
    tag_prefix: &str,
    prerelease_label: &str,
) -> Result<String, VersionError> {
    let computed = match latest_tag {
        Some(tag) => {
            let current = VersionComponents::parse(tag, tag_prefix)?;
            current.bump(resolution.increment, prerelease_label)
        }
        None => {
            let initial = VersionComponents::new(0, 0, 1);
            if resolution.increment.is_release() {
                initial
            } else {
                initial.with_prerelease(format!("{prerelease_label}.0"))
            }
        }
    };

    let final_version = overrides.apply(computed);
    debug!(?latest_tag, next = %final_version, "computed next version");
    Ok(format!("{tag_prefix}{final_version}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution(increment: Severity) -> Resolution {
        Resolution {
            increment,
            is_breaking: increment == Severity::Major,
        }
    }

    fn next(latest: Option<&str>, increment: Severity) -> String {
        next_version(
            latest,
            &resolution(increment),
            &VersionOverrides::default(),
            "v",
            "pre",
        )
        .unwrap()
    }

    #[test]
    fn test_parse_strips_tag_prefix() {
        let v = VersionComponents::parse("v1.2.3", "v").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 2, 3));
    }

    #[test]
    fn test_parse_with_prerelease() {
        let v = VersionComponents::parse("1.0.0-pre.1", "v").unwrap();
        assert_eq!(v.prerelease.as_deref(), Some("pre.1"));
    }

    #[test]
    fn test_feat_since_tag_bumps_minor() {
        assert_eq!(next(Some("v0.7.1"), Severity::Minor), "v0.8.0");
    }

    #[test]
    fn test_major_zeroes_lower_components() {
        assert_eq!(next(Some("v1.2.3"), Severity::Major), "v2.0.0");
    }

    #[test]
    fn test_patch_bump() {
        assert_eq!(next(Some("v1.2.3"), Severity::Patch), "v1.2.4");
    }

    #[test]
    fn test_patch_graduates_prerelease() {
        assert_eq!(next(Some("v1.2.4-pre.2"), Severity::Patch), "v1.2.4");
    }

    #[test]
    fn test_tweak_starts_numeric_suffix_at_zero() {
        assert_eq!(next(Some("v1.2.3"), Severity::Tweak), "v1.2.4-pre.0");
    }

    #[test]
    fn test_tweak_increments_existing_suffix() {
        assert_eq!(next(Some("v1.2.4-pre.0"), Severity::None), "v1.2.4-pre.1");
    }

    #[test]
    fn test_no_prior_tag_defaults() {
        assert_eq!(next(None, Severity::Minor), "v0.0.1");
        assert_eq!(next(None, Severity::Tweak), "v0.0.1-pre.0");
    }

    #[test]
    fn test_overrides_take_precedence_per_component() {
        let overrides = VersionOverrides {
            major: Some(2),
            build: Some(7),
            ..Default::default()
        };
        let version = next_version(
            Some("v0.7.1"),
            &resolution(Severity::Minor),
            &overrides,
            "v",
            "pre",
        )
        .unwrap();
        assert_eq!(version, "v2.8.0+7");
    }

    #[test]
    fn test_bump_clears_build_metadata() {
        let v = VersionComponents::parse("1.2.3+99", "v").unwrap();
        let bumped = v.bump(Severity::Patch, "pre");
        assert!(bumped.build.is_none());
    }
}
