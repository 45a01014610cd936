//! Rule set and pluggable field rules

use std::sync::LazyLock;

use regex::Regex;

use gantry_core::config::{Config, RuleVariant};
use gantry_core::Severity;

/// Outcome of a field rule.
///
/// The variants are mutually exclusive by construction: a rejection
/// always carries a message, a fix always carries the replacement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The text is acceptable as-is
    Accepted,
    /// The text is acceptable after replacing it with the payload
    AcceptedWithFix(String),
    /// The text is not acceptable
    Rejected(String),
}

impl Outcome {
    /// Whether validation may proceed past this outcome
    pub fn is_ok(&self) -> bool {
        !matches!(self, Outcome::Rejected(_))
    }
}

/// A pluggable validator for one message field.
///
/// Built-in variants live in this module; user-supplied rules satisfy
/// the same interface, so the validator core is agnostic to origin.
pub trait FieldRule: Send + Sync {
    /// Validate the field text
    fn validate(&self, text: &str) -> Outcome;
}

/// One accepted commit type with its classification
#[derive(Debug, Clone)]
pub struct TypeRule {
    /// Canonical type name
    pub name: String,
    /// Accept immediately, bypassing all further checks
    pub skip: bool,
    /// Severity class for version bumps
    pub severity: Severity,
    /// Changelog group, if the type surfaces in the changelog
    pub changelog_group: Option<String>,
}

/// Immutable description of what a valid commit message looks like
pub struct RuleSet {
    /// Maximum header line length
    pub max_header_length: usize,
    /// Accepted types; names are case-insensitive-unique
    pub types: Vec<TypeRule>,
    /// Scope rule
    pub scope_rule: Box<dyn FieldRule>,
    /// Subject rule
    pub subject_rule: Box<dyn FieldRule>,
    /// Body rule
    pub body_rule: Box<dyn FieldRule>,
    /// Footer rule
    pub footer_rule: Box<dyn FieldRule>,
    /// Escalate autofixes to a rejection
    pub fail_on_autofix: bool,
}

impl RuleSet {
    /// Build a rule set from a validated configuration
    pub fn from_config(config: &Config) -> Self {
        let types = config
            .header
            .types
            .iter()
            .map(|t| TypeRule {
                name: t.name.clone(),
                skip: t.skip,
                severity: t.severity,
                changelog_group: t.group.clone(),
            })
            .collect();

        Self {
            max_header_length: config.header.max_length,
            types,
            scope_rule: make_rule(config.rules.scope, BuiltinField::Scope),
            subject_rule: make_rule(config.rules.subject, BuiltinField::Subject),
            body_rule: make_rule(config.rules.body, BuiltinField::Body),
            footer_rule: make_rule(config.rules.footer, BuiltinField::Footer),
            fail_on_autofix: config.fail_on_autofix,
        }
    }

    /// Resolve a type name case-insensitively
    pub fn find_type(&self, name: &str) -> Option<&TypeRule> {
        self.types
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Render all accepted type names grouped by severity class, for
    /// operator guidance in unknown-type errors.
    pub fn allowed_types(&self) -> String {
        let mut parts = Vec::new();

        for severity in Severity::ALL {
            let names: Vec<&str> = self
                .types
                .iter()
                .filter(|t| !t.skip && t.severity == severity)
                .map(|t| t.name.as_str())
                .collect();
            if !names.is_empty() {
                parts.push(format!("{severity}: {}", names.join(", ")));
            }
        }

        let skipped: Vec<&str> = self
            .types
            .iter()
            .filter(|t| t.skip)
            .map(|t| t.name.as_str())
            .collect();
        if !skipped.is_empty() {
            parts.push(format!("skipped: {}", skipped.join(", ")));
        }

        parts.join("; ")
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

enum BuiltinField {
    Scope,
    Subject,
    Body,
    Footer,
}

fn make_rule(variant: RuleVariant, field: BuiltinField) -> Box<dyn FieldRule> {
    match variant {
        RuleVariant::Any => Box::new(AnyRule),
        RuleVariant::Default => match field {
            BuiltinField::Scope => Box::new(DefaultScopeRule),
            BuiltinField::Subject => Box::new(DefaultSubjectRule),
            BuiltinField::Body => Box::new(DefaultBodyRule),
            BuiltinField::Footer => Box::new(DefaultFooterRule),
        },
    }
}

/// Accepts any text
pub struct AnyRule;

impl FieldRule for AnyRule {
    fn validate(&self, _text: &str) -> Outcome {
        Outcome::Accepted
    }
}

static SCOPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9._-]*$").expect("invalid regex"));

/// Default scope rule: empty, or lowercase alphanumerics with `.`,
/// `_`, `-` separators. Uppercase-only deviations are autofixed.
pub struct DefaultScopeRule;

impl FieldRule for DefaultScopeRule {
    fn validate(&self, text: &str) -> Outcome {
        if text.is_empty() || SCOPE_REGEX.is_match(text) {
            return Outcome::Accepted;
        }

        let lowered = text.to_lowercase();
        if SCOPE_REGEX.is_match(&lowered) {
            return Outcome::AcceptedWithFix(lowered);
        }

        Outcome::Rejected(format!(
            "scope '{text}' may only contain lowercase letters, digits, '.', '_' and '-'"
        ))
    }
}

/// Default subject rule: non-empty; a leading uppercase letter,
/// surrounding whitespace, and a trailing period are autofixed.
pub struct DefaultSubjectRule;

impl FieldRule for DefaultSubjectRule {
    fn validate(&self, text: &str) -> Outcome {
        let mut fixed = text.trim().to_string();
        while fixed.ends_with('.') {
            fixed.pop();
        }

        if let Some(first) = fixed.chars().next() {
            if first.is_uppercase() {
                let mut chars = fixed.chars();
                chars.next();
                fixed = first.to_lowercase().chain(chars).collect();
            }
        }

        if fixed.is_empty() {
            return Outcome::Rejected("subject must not be empty".to_string());
        }

        if fixed == text {
            Outcome::Accepted
        } else {
            Outcome::AcceptedWithFix(fixed)
        }
    }
}

/// Default body rule: free text is acceptable
pub struct DefaultBodyRule;

impl FieldRule for DefaultBodyRule {
    fn validate(&self, _text: &str) -> Outcome {
        Outcome::Accepted
    }
}

/// Accepted footer tags: `[CLOSE]`, `[KNOWN ISSUE]`, `[BREAKING
/// CHANGES]`, each optionally suffixed `#N` with at least one digit.
static FOOTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(CLOSE|KNOWN ISSUE|BREAKING CHANGES)(#[0-9]+)?\](\s.*)?$")
        .expect("invalid regex")
});

const FOOTER_ERROR: &str =
    "footer must start with [CLOSE], [KNOWN ISSUE] or [BREAKING CHANGES], \
     each optionally tagged with an issue number as [CLOSE#123]";

/// Default footer rule: the first line must carry one of the accepted
/// tags; continuation lines are free text.
pub struct DefaultFooterRule;

impl FieldRule for DefaultFooterRule {
    fn validate(&self, text: &str) -> Outcome {
        let first_line = text.lines().next().unwrap_or("");
        if FOOTER_REGEX.is_match(first_line) {
            Outcome::Accepted
        } else {
            Outcome::Rejected(FOOTER_ERROR.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_accepts_lowercase() {
        assert_eq!(DefaultScopeRule.validate("api"), Outcome::Accepted);
        assert_eq!(DefaultScopeRule.validate("http-diff"), Outcome::Accepted);
        assert_eq!(DefaultScopeRule.validate(""), Outcome::Accepted);
    }

    #[test]
    fn test_scope_autofixes_case() {
        assert_eq!(
            DefaultScopeRule.validate("API"),
            Outcome::AcceptedWithFix("api".to_string())
        );
    }

    #[test]
    fn test_scope_rejects_bad_characters() {
        assert!(matches!(
            DefaultScopeRule.validate("a b"),
            Outcome::Rejected(_)
        ));
    }

    #[test]
    fn test_subject_autofixes_leading_uppercase() {
        assert_eq!(
            DefaultSubjectRule.validate("Start upper case"),
            Outcome::AcceptedWithFix("start upper case".to_string())
        );
    }

    #[test]
    fn test_subject_autofixes_trailing_period() {
        assert_eq!(
            DefaultSubjectRule.validate("add thing."),
            Outcome::AcceptedWithFix("add thing".to_string())
        );
    }

    #[test]
    fn test_subject_rejects_empty() {
        assert!(matches!(
            DefaultSubjectRule.validate(""),
            Outcome::Rejected(_)
        ));
        assert!(matches!(
            DefaultSubjectRule.validate("..."),
            Outcome::Rejected(_)
        ));
    }

    #[test]
    fn test_subject_fixpoint() {
        // Re-validating a fixed subject must produce no further fix.
        let Outcome::AcceptedWithFix(fixed) = DefaultSubjectRule.validate("Add thing.") else {
            panic!("expected a fix");
        };
        assert_eq!(DefaultSubjectRule.validate(&fixed), Outcome::Accepted);
    }

    #[test]
    fn test_footer_accepts_tags() {
        assert_eq!(DefaultFooterRule.validate("[CLOSE]"), Outcome::Accepted);
        assert_eq!(
            DefaultFooterRule.validate("[CLOSE#42] fixed the thing"),
            Outcome::Accepted
        );
        assert_eq!(
            DefaultFooterRule.validate("[KNOWN ISSUE] flaky on windows"),
            Outcome::Accepted
        );
        assert_eq!(
            DefaultFooterRule.validate("[BREAKING CHANGES#7] renamed api"),
            Outcome::Accepted
        );
    }

    #[test]
    fn test_footer_rejects_empty_issue_number() {
        let outcome = DefaultFooterRule.validate("[CLOSE#] text");
        let Outcome::Rejected(message) = outcome else {
            panic!("expected rejection");
        };
        assert!(message.contains("[CLOSE]"));
        assert!(message.contains("[KNOWN ISSUE]"));
        assert!(message.contains("[BREAKING CHANGES]"));
    }

    #[test]
    fn test_footer_rejects_unknown_tag() {
        assert!(matches!(
            DefaultFooterRule.validate("[WONTFIX] nope"),
            Outcome::Rejected(_)
        ));
    }

    #[test]
    fn test_find_type_case_insensitive() {
        let rules = RuleSet::default();
        assert_eq!(rules.find_type("FEAT").unwrap().name, "feat");
        assert!(rules.find_type("nope").is_none());
    }

    #[test]
    fn test_allowed_types_grouped_by_severity() {
        let rules = RuleSet::default();
        let allowed = rules.allowed_types();
        assert!(allowed.contains("major: break"));
        assert!(allowed.contains("minor: feat"));
        assert!(allowed.contains("skipped: wip"));
    }
}
