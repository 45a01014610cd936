//! Ordered commit validation
//!
//! Checks run in a fixed order; later checks assume earlier ones passed
//! or were skipped deliberately.

use tracing::{debug, instrument};

use crate::rules::{FieldRule, Outcome, RuleSet};
use crate::types::{HeaderParse, ParsedMessage, Span};

/// Message field a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The whole header line
    Header,
    /// The commit type
    Type,
    /// The scope
    Scope,
    /// The subject
    Subject,
    /// The body
    Body,
    /// The footer
    Footer,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Field::Header => "header",
            Field::Type => "type",
            Field::Scope => "scope",
            Field::Subject => "subject",
            Field::Body => "body",
            Field::Footer => "footer",
        };
        f.write_str(s)
    }
}

/// One validation finding, in check order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A field was rewritten by an autofix
    Fixed {
        /// Field that was rewritten
        field: Field,
        /// Original text
        old: String,
        /// Replacement text
        new: String,
    },
    /// A check rejected the message
    Rejected {
        /// Field that failed
        field: Field,
        /// Offending text, for operator visibility
        value: String,
        /// Why the check failed
        message: String,
    },
}

/// Overall validation verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// All checks passed without rewrites
    Accepted,
    /// All checks passed, at least one field was rewritten
    Autofixed,
    /// At least one check failed
    Rejected,
}

/// Result of validating one commit message
#[derive(Debug)]
pub struct ValidationReport {
    /// Overall verdict
    pub status: ValidationStatus,
    /// The full message with all autofixes applied, when autofixed
    pub fixed_message: Option<String>,
    /// Findings in check order
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    fn accepted() -> Self {
        Self {
            status: ValidationStatus::Accepted,
            fixed_message: None,
            diagnostics: Vec::new(),
        }
    }

    fn rejected(field: Field, value: &str, message: impl Into<String>) -> Self {
        Self {
            status: ValidationStatus::Rejected,
            fixed_message: None,
            diagnostics: vec![Diagnostic::Rejected {
                field,
                value: value.to_string(),
                message: message.into(),
            }],
        }
    }

    /// Whether the message was rejected
    pub fn is_rejected(&self) -> bool {
        self.status == ValidationStatus::Rejected
    }
}

/// Validate a parsed message against a rule set.
#[instrument(skip_all, fields(header = %parsed.header_text))]
pub fn validate(parsed: &ParsedMessage, rules: &RuleSet) -> ValidationReport {
    // 1. Empty header: nothing else can be checked.
    let fields = match &parsed.header {
        HeaderParse::Empty => {
            return ValidationReport::rejected(Field::Header, "", "commit header is empty");
        }
        // 2. Merge commits are accepted as-is.
        HeaderParse::Merge => return ValidationReport::accepted(),
        // 3. Header present but not matching the grammar.
        HeaderParse::Malformed => {
            return ValidationReport::rejected(
                Field::Header,
                &parsed.header_text,
                "does not match format 'type(scope): subject'",
            );
        }
        HeaderParse::Fields(fields) => fields,
    };

    // 4. Resolve the type; skip types bypass every remaining check.
    let Some(type_rule) = rules.find_type(&fields.commit_type) else {
        return ValidationReport::rejected(
            Field::Type,
            &fields.commit_type,
            format!(
                "unknown commit type '{}'; valid types are {}",
                fields.commit_type,
                rules.allowed_types()
            ),
        );
    };
    if type_rule.skip {
        debug!(commit_type = %type_rule.name, "skip type, bypassing validation");
        return ValidationReport::accepted();
    }

    // 5. Header length, waived for fixup!/squash! commits.
    let header_len = parsed.header_text.chars().count();
    if header_len > rules.max_header_length && !fields.is_squash_like {
        return ValidationReport::rejected(
            Field::Header,
            &parsed.header_text,
            format!(
                "header is {header_len} characters, maximum is {}",
                rules.max_header_length
            ),
        );
    }

    let mut diagnostics = Vec::new();
    let mut fixes: Vec<(Span, String)> = Vec::new();

    // 6. Normalize the type to its canonical casing.
    if fields.commit_type != type_rule.name {
        diagnostics.push(Diagnostic::Fixed {
            field: Field::Type,
            old: fields.commit_type.clone(),
            new: type_rule.name.clone(),
        });
        fixes.push((fields.type_span, type_rule.name.clone()));
    }

    // 7.-10. Field rules in fixed order.
    let scope_text = fields.scope.clone().unwrap_or_default();
    let checks: [(Field, &dyn FieldRule, &str, Option<Span>); 4] = [
        (
            Field::Scope,
            rules.scope_rule.as_ref(),
            scope_text.as_str(),
            fields.scope_span,
        ),
        (
            Field::Subject,
            rules.subject_rule.as_ref(),
            fields.subject.as_str(),
            Some(fields.subject_span),
        ),
        (
            Field::Body,
            rules.body_rule.as_ref(),
            parsed.body.as_deref().unwrap_or(""),
            parsed.body_span,
        ),
        (
            Field::Footer,
            rules.footer_rule.as_ref(),
            parsed.footer.as_deref().unwrap_or(""),
            parsed.footer_span,
        ),
    ];

    for (field, rule, text, span) in checks {
        // Body and footer rules only run when the segment exists.
        if matches!(field, Field::Body | Field::Footer) && span.is_none() {
            continue;
        }
        match rule.validate(text) {
            Outcome::Accepted => {}
            Outcome::AcceptedWithFix(new) => {
                diagnostics.push(Diagnostic::Fixed {
                    field,
                    old: text.to_string(),
                    new: new.clone(),
                });
                if let Some(span) = span {
                    fixes.push((span, new));
                }
            }
            Outcome::Rejected(message) => {
                diagnostics.push(Diagnostic::Rejected {
                    field,
                    value: text.to_string(),
                    message,
                });
                return ValidationReport {
                    status: ValidationStatus::Rejected,
                    fixed_message: None,
                    diagnostics,
                };
            }
        }
    }

    // 11. Autofix policy.
    if fixes.is_empty() {
        return ValidationReport {
            status: ValidationStatus::Accepted,
            fixed_message: None,
            diagnostics,
        };
    }

    if rules.fail_on_autofix {
        diagnostics.push(Diagnostic::Rejected {
            field: Field::Header,
            value: parsed.header_text.clone(),
            message: "abort for fail on warnings".to_string(),
        });
        return ValidationReport {
            status: ValidationStatus::Rejected,
            fixed_message: None,
            diagnostics,
        };
    }

    let fixed = apply_fixes(&parsed.text, fixes);
    debug!(fix_count = diagnostics.len(), "autofixes applied");
    ValidationReport {
        status: ValidationStatus::Autofixed,
        fixed_message: Some(fixed),
        diagnostics,
    }
}

/// Splice fixes into the message by span, back to front so earlier
/// offsets stay valid.
fn apply_fixes(text: &str, mut fixes: Vec<(Span, String)>) -> String {
    fixes.sort_by(|a, b| b.0.start.cmp(&a.0.start));

    let mut result = text.to_string();
    for (span, new) in fixes {
        result.replace_range(span.start..span.end, &new);
    }
    result
}
