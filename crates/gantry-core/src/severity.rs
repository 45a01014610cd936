//! Severity classes driving version bumps and changelog grouping

use serde::{Deserialize, Serialize};

/// Severity class of a commit or a commit range.
///
/// Ordering is the aggregation priority: `Major > Minor > Patch >
/// Tweak > None`, so a range's aggregate severity is the `max` over
/// its commits.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No release-relevant change
    #[default]
    None,
    /// Cosmetic or internal change, prerelease-suffix bump only
    Tweak,
    /// Backwards-compatible fix
    Patch,
    /// Backwards-compatible feature
    Minor,
    /// Breaking change
    Major,
}

impl Severity {
    /// All classes in aggregation priority order, highest first.
    pub const ALL: [Severity; 5] = [
        Severity::Major,
        Severity::Minor,
        Severity::Patch,
        Severity::Tweak,
        Severity::None,
    ];

    /// Whether this class triggers a real semver component bump.
    pub fn is_release(self) -> bool {
        matches!(self, Severity::Major | Severity::Minor | Severity::Patch)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Major => "major",
            Severity::Minor => "minor",
            Severity::Patch => "patch",
            Severity::Tweak => "tweak",
            Severity::None => "none",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(Severity::Major),
            "minor" => Ok(Severity::Minor),
            "patch" => Ok(Severity::Patch),
            "tweak" => Ok(Severity::Tweak),
            "none" => Ok(Severity::None),
            other => Err(format!("unknown severity class: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_matches_priority() {
        assert!(Severity::Major > Severity::Minor);
        assert!(Severity::Minor > Severity::Patch);
        assert!(Severity::Patch > Severity::Tweak);
        assert!(Severity::Tweak > Severity::None);
    }

    #[test]
    fn test_max_aggregation() {
        let aggregate = [Severity::Patch, Severity::Major, Severity::Tweak]
            .into_iter()
            .max()
            .unwrap();
        assert_eq!(aggregate, Severity::Major);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("minor".parse::<Severity>().unwrap(), Severity::Minor);
        assert!("giant".parse::<Severity>().is_err());
    }
}
