//! Commit message types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use gantry_core::Severity;

/// A raw commit as delivered by the git collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCommit {
    /// Full commit hash, absent for messages read from a file or stdin
    pub hash: Option<String>,
    /// Complete message text
    pub text: String,
}

impl RawCommit {
    /// Create a commit with a hash
    pub fn new(hash: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            hash: Some(hash.into()),
            text: text.into(),
        }
    }

    /// Create a hashless commit from message text alone
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            hash: None,
            text: text.into(),
        }
    }

    /// First 7 characters of the hash, if any
    pub fn short_hash(&self) -> Option<&str> {
        self.hash.as_deref().map(|h| &h[..7.min(h.len())])
    }
}

/// Byte range into the original message text.
///
/// Spans let autofixes splice exactly the changed substring back into
/// the message, so a repeated substring elsewhere is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset, inclusive
    pub start: usize,
    /// End byte offset, exclusive
    pub end: usize,
}

impl Span {
    /// Create a span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The substring this span covers
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Header fields extracted by the grammar
#[derive(Debug, Clone)]
pub struct HeaderFields {
    /// Commit type as written (case preserved)
    pub commit_type: String,
    /// Span of the type within the message
    pub type_span: Span,
    /// Scope, if present
    pub scope: Option<String>,
    /// Span of the scope within the message
    pub scope_span: Option<Span>,
    /// Subject (remainder of the header line)
    pub subject: String,
    /// Span of the subject within the message
    pub subject_span: Span,
    /// Header carries a `fixup! ` or `squash! ` prefix
    pub is_squash_like: bool,
}

/// Result of matching the header line.
///
/// `Empty` and `Merge` are terminal: such messages are never validated
/// field by field.
#[derive(Debug, Clone)]
pub enum HeaderParse {
    /// No header at all (empty message or comments only)
    Empty,
    /// A `Merge ...` commit, auto-accepted
    Merge,
    /// Header present but not matching `type(scope): subject`
    Malformed,
    /// Header matched the grammar
    Fields(HeaderFields),
}

impl HeaderParse {
    /// Borrow the grammar fields, if the header matched
    pub fn fields(&self) -> Option<&HeaderFields> {
        match self {
            HeaderParse::Fields(fields) => Some(fields),
            _ => None,
        }
    }
}

/// A commit message split into its logical segments
#[derive(Debug, Clone)]
pub struct ParsedMessage {
    /// Original text, comment lines included; spans index into this
    pub text: String,
    /// First line of the header segment
    pub header_text: String,
    /// Grammar match result
    pub header: HeaderParse,
    /// Body text (interior segments joined by blank lines)
    pub body: Option<String>,
    /// Span of the body within the message
    pub body_span: Option<Span>,
    /// Footer text (last trailing segment)
    pub footer: Option<String>,
    /// Span of the footer within the message
    pub footer_span: Option<Span>,
    /// File the message was read from, if any
    pub source: Option<PathBuf>,
}

impl ParsedMessage {
    /// Attach the source file path
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whether the parse ended in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self.header, HeaderParse::Empty | HeaderParse::Merge)
    }
}

/// A commit that passed classification, ready for aggregation.
///
/// Derived once from a [`ParsedMessage`] and a rule set; never mutated
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatedCommit {
    /// Full commit hash, if known
    pub hash: Option<String>,
    /// Canonical type name from the rule set
    pub commit_type: String,
    /// Scope, if present
    pub scope: Option<String>,
    /// Subject line
    pub subject: String,
    /// Severity class (forced to Major for breaking commits)
    pub severity: Severity,
    /// Changelog group collecting this commit, if any
    pub changelog_group: Option<String>,
    /// A breaking-change marker was found in the body or footer
    pub is_breaking: bool,
}

impl ValidatedCommit {
    /// First 7 characters of the hash, if any
    pub fn short_hash(&self) -> Option<&str> {
        self.hash.as_deref().map(|h| &h[..7.min(h.len())])
    }
}
