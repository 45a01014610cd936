//! Severity aggregation over a commit range

use tracing::{debug, instrument};

use gantry_commits::ValidatedCommit;
use gantry_core::Severity;

/// Aggregate severity of a commit range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Highest severity class observed
    pub increment: Severity,
    /// At least one commit carried a breaking-change marker
    pub is_breaking: bool,
}

/// Resolve the aggregate severity of an ordered commit range.
///
/// Skip-marked and unclassifiable commits never reach this function;
/// classification already dropped them.
#[instrument(skip_all, fields(commit_count = commits.len()))]
pub fn resolve(commits: &[ValidatedCommit]) -> Resolution {
    let mut increment = Severity::None;
    let mut is_breaking = false;

    for commit in commits {
        increment = increment.max(commit.severity);
        is_breaking |= commit.is_breaking;
    }

    debug!(%increment, is_breaking, "resolved commit range");
    Resolution {
        increment,
        is_breaking,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(severity: Severity, is_breaking: bool) -> ValidatedCommit {
        ValidatedCommit {
            hash: Some("0123456789abcdef".to_string()),
            commit_type: "feat".to_string(),
            scope: None,
            subject: "x".to_string(),
            severity,
            changelog_group: None,
            is_breaking,
        }
    }

    #[test]
    fn test_empty_range_is_none() {
        let resolution = resolve(&[]);
        assert_eq!(resolution.increment, Severity::None);
        assert!(!resolution.is_breaking);
    }

    #[test]
    fn test_patch_plus_major_is_major() {
        let resolution = resolve(&[
            commit(Severity::Patch, false),
            commit(Severity::Major, true),
        ]);
        assert_eq!(resolution.increment, Severity::Major);
        assert!(resolution.is_breaking);
    }

    #[test]
    fn test_patch_plus_minor_is_minor() {
        let resolution = resolve(&[
            commit(Severity::Patch, false),
            commit(Severity::Minor, false),
        ]);
        assert_eq!(resolution.increment, Severity::Minor);
        assert!(!resolution.is_breaking);
    }

    #[test]
    fn test_tweaks_only() {
        let resolution = resolve(&[
            commit(Severity::Tweak, false),
            commit(Severity::Tweak, false),
        ]);
        assert_eq!(resolution.increment, Severity::Tweak);
    }
}
