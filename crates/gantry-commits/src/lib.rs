//! Gantry Commits - commit message parsing and validation
//!
//! Splits raw commit text into header/body/footer, matches the header
//! against the `type(scope): subject` grammar, validates the result
//! against a rule set with autofix support, and classifies accepted
//! commits by severity and changelog group.

mod classify;
mod parser;
mod rules;
mod types;
mod validator;

pub use classify::classify;
pub use parser::parse;
pub use rules::{
    AnyRule, DefaultBodyRule, DefaultFooterRule, DefaultScopeRule, DefaultSubjectRule, FieldRule,
    Outcome, RuleSet, TypeRule,
};
pub use types::{
    HeaderFields, HeaderParse, ParsedMessage, RawCommit, Span, ValidatedCommit,
};
pub use validator::{validate, Diagnostic, Field, ValidationReport, ValidationStatus};
