//! Classification of parsed commits for aggregation
//!
//! The changelog and version passes recover locally from bad commits:
//! anything unparseable, unknown, or skip-marked is dropped rather than
//! aborting the run.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use gantry_core::Severity;

use crate::rules::RuleSet;
use crate::types::{HeaderParse, ParsedMessage, RawCommit, ValidatedCommit};

/// Breaking-change marker, anchored at the start of the body or footer.
/// Case-sensitive on purpose: the tag is a literal.
static BREAKING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[BREAKING CHANGES(#[0-9]+)?\]").expect("invalid regex"));

/// Classify a parsed commit by severity and changelog group.
///
/// Returns `None` for merge commits, malformed or empty messages,
/// unknown types, and skip-marked types; those never contribute to
/// severity aggregation or the changelog.
pub fn classify(
    raw: &RawCommit,
    parsed: &ParsedMessage,
    rules: &RuleSet,
) -> Option<ValidatedCommit> {
    let fields = match &parsed.header {
        HeaderParse::Fields(fields) => fields,
        _ => {
            trace!(header = %parsed.header_text, "dropping non-conventional commit");
            return None;
        }
    };

    let type_rule = rules.find_type(&fields.commit_type)?;
    if type_rule.skip {
        trace!(commit_type = %type_rule.name, "dropping skip-marked commit");
        return None;
    }

    // A breaking marker at either location outranks the type's class.
    let is_breaking = [parsed.footer.as_deref(), parsed.body.as_deref()]
        .into_iter()
        .flatten()
        .any(|text| BREAKING_REGEX.is_match(text));

    let severity = if is_breaking {
        Severity::Major
    } else {
        type_rule.severity
    };

    Some(ValidatedCommit {
        hash: raw.hash.clone(),
        commit_type: type_rule.name.clone(),
        scope: fields.scope.clone().filter(|s| !s.is_empty()),
        subject: fields.subject.clone(),
        severity,
        changelog_group: type_rule.changelog_group.clone(),
        is_breaking,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn classify_text(text: &str) -> Option<ValidatedCommit> {
        let raw = RawCommit::new("0123456789abcdef", text);
        let parsed = parse(&raw);
        classify(&raw, &parsed, &RuleSet::default())
    }

    #[test]
    fn test_classifies_feature() {
        let commit = classify_text("feat(api): add endpoint").unwrap();
        assert_eq!(commit.commit_type, "feat");
        assert_eq!(commit.severity, Severity::Minor);
        assert_eq!(commit.changelog_group.as_deref(), Some("Features"));
        assert!(!commit.is_breaking);
    }

    #[test]
    fn test_canonicalizes_type_case() {
        let commit = classify_text("FEAT: shout").unwrap();
        assert_eq!(commit.commit_type, "feat");
    }

    #[test]
    fn test_breaking_footer_forces_major() {
        let commit = classify_text("fix: tiny\n\nbody\n\n[BREAKING CHANGES] config renamed").unwrap();
        assert_eq!(commit.severity, Severity::Major);
        assert!(commit.is_breaking);
    }

    #[test]
    fn test_breaking_marker_in_body() {
        let commit = classify_text("fix: tiny\n\n[BREAKING CHANGES#3] gone").unwrap();
        assert!(commit.is_breaking);
    }

    #[test]
    fn test_breaking_marker_is_case_sensitive() {
        let commit = classify_text("fix: tiny\n\n[breaking changes] nope").unwrap();
        assert!(!commit.is_breaking);
        assert_eq!(commit.severity, Severity::Patch);
    }

    #[test]
    fn test_breaking_marker_must_be_anchored() {
        let commit = classify_text("fix: tiny\n\nsee [BREAKING CHANGES] below").unwrap();
        assert!(!commit.is_breaking);
    }

    #[test]
    fn test_drops_merge_and_malformed() {
        assert!(classify_text("Merge branch 'x'").is_none());
        assert!(classify_text("random text").is_none());
    }

    #[test]
    fn test_drops_unknown_and_skip_types() {
        assert!(classify_text("yolo: nah").is_none());
        assert!(classify_text("wip: later").is_none());
    }
}
