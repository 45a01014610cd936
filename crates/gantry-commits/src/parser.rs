//! Commit message parser
//!
//! Mirrors the git commit-template conventions: lines starting with `#`
//! are comments, a fully blank line separates header, body, and footer.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::types::{HeaderFields, HeaderParse, ParsedMessage, RawCommit, Span};

/// Grammar for the header line: optional fixup/squash prefix, type,
/// optional parenthesized scope, a literal `: ` (colon + exactly one
/// space), then the subject.
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<prefix>fixup|squash)! )?(?P<type>[A-Za-z][A-Za-z0-9-]*)(?:\((?P<scope>[^()]*)\))?: (?P<subject>.*)$",
    )
    .expect("invalid header grammar")
});

/// Merge commits produced by `git merge`
static MERGE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Merge\s").expect("invalid regex"));

/// A message line with its byte offset into the original text
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    offset: usize,
    text: &'a str,
}

/// Parse a raw commit into its logical segments. Never fails: input
/// that matches no convention degrades to a terminal or malformed
/// header state.
pub fn parse(raw: &RawCommit) -> ParsedMessage {
    let text = raw.text.clone();
    let segments = split_segments(&raw.text);
    trace!(segment_count = segments.len(), "split commit message");

    let Some(header_seg) = segments.first() else {
        return ParsedMessage {
            text,
            header_text: String::new(),
            header: HeaderParse::Empty,
            body: None,
            body_span: None,
            footer: None,
            footer_span: None,
            source: None,
        };
    };

    let header_line = header_seg[0];
    let header_text = header_line.text.to_string();

    let header = if MERGE_REGEX.is_match(header_line.text) {
        HeaderParse::Merge
    } else {
        match_header(header_line)
    };

    // Merge commits are terminal: body and footer are irrelevant.
    if matches!(header, HeaderParse::Merge) {
        return ParsedMessage {
            text,
            header_text,
            header,
            body: None,
            body_span: None,
            footer: None,
            footer_span: None,
            source: None,
        };
    }

    let (body, body_span, footer, footer_span) = match segments.len() {
        0 | 1 => (None, None, None, None),
        2 => {
            let (text, span) = segment_text(&segments[1..2]);
            (Some(text), Some(span), None, None)
        }
        n => {
            let (body_text, body_span) = segment_text(&segments[1..n - 1]);
            let (footer_text, footer_span) = segment_text(&segments[n - 1..n]);
            (
                Some(body_text),
                Some(body_span),
                Some(footer_text),
                Some(footer_span),
            )
        }
    };

    ParsedMessage {
        text,
        header_text,
        header,
        body,
        body_span,
        footer,
        footer_span,
        source: None,
    }
}

/// Split the message into blank-line-separated segments, dropping
/// comment lines. Offsets refer to the original text so spans survive
/// the stripping.
fn split_segments(text: &str) -> Vec<Vec<Line<'_>>> {
    let mut segments = Vec::new();
    let mut current: Vec<Line<'_>> = Vec::new();
    let mut offset = 0;

    for line in text.split('\n') {
        let trimmed = line.trim();
        if line.starts_with('#') {
            // comment line, dropped before any interpretation
        } else if trimmed.is_empty() {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        } else {
            current.push(Line { offset, text: line });
        }
        offset += line.len() + 1;
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Join one or more segments into text and compute the covering span.
fn segment_text(segments: &[Vec<Line<'_>>]) -> (String, Span) {
    let text = segments
        .iter()
        .map(|seg| {
            seg.iter()
                .map(|l| l.text)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let first = segments[0][0];
    let last = *segments[segments.len() - 1].last().expect("segment is non-empty");
    let span = Span::new(first.offset, last.offset + last.text.len());

    (text, span)
}

/// Match the header line against the grammar, translating capture
/// positions into message-wide spans.
fn match_header(line: Line<'_>) -> HeaderParse {
    let Some(caps) = HEADER_REGEX.captures(line.text) else {
        return HeaderParse::Malformed;
    };

    let ty = caps.name("type").expect("type group always present");
    let subject = caps.name("subject").expect("subject group always present");
    let scope = caps.name("scope");

    HeaderParse::Fields(HeaderFields {
        commit_type: ty.as_str().to_string(),
        type_span: Span::new(line.offset + ty.start(), line.offset + ty.end()),
        scope: scope.map(|m| m.as_str().to_string()),
        scope_span: scope.map(|m| Span::new(line.offset + m.start(), line.offset + m.end())),
        subject: subject.as_str().to_string(),
        subject_span: Span::new(line.offset + subject.start(), line.offset + subject.end()),
        is_squash_like: caps.name("prefix").is_some(),
    })
}
