//! Changelog document parsing and serialization

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use gantry_core::config::GroupConfig;
use gantry_core::error::ChangelogError;

use crate::groups::scan_unreleased;
use crate::types::{ChangelogGroup, ExtraGroup};

/// The Unreleased marker line
static UNRELEASED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## Unreleased[ \t]*$").expect("invalid regex"));

/// A dated release heading, the boundary of the opaque history
static RELEASE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## \d{4}-\d{2}-\d{2} Release\b").expect("invalid regex"));

/// Boilerplate for a freshly created changelog
const TEMPLATE_HEADER: &str = "# Changelog\n\nAll notable changes to this project are documented in this file.\n\n";

/// An incrementally maintained changelog.
///
/// The released history is never parsed beyond locating its boundary:
/// it is carried as one opaque string so history predating the current
/// group configuration round-trips byte for byte.
#[derive(Debug, Clone)]
pub struct ChangelogDocument {
    /// Boilerplate lines before the Unreleased marker, verbatim
    pub header: String,
    /// Known groups in configuration order
    pub groups: Vec<ChangelogGroup>,
    /// Unknown groups preserved from the Unreleased region (greedy mode)
    pub extras: Vec<ExtraGroup>,
    /// Opaque released history, starting at the first release heading
    pub released: String,
}

impl ChangelogDocument {
    /// Create an empty document from the configured groups
    pub fn new(group_configs: &[GroupConfig]) -> Self {
        Self {
            header: TEMPLATE_HEADER.to_string(),
            groups: instantiate_groups(group_configs),
            extras: Vec::new(),
            released: String::new(),
        }
    }

    /// Parse an existing changelog.
    ///
    /// A document without the Unreleased marker is unrecognizable; the
    /// tool never guesses or fabricates structure, so this is fatal.
    #[instrument(skip_all, fields(len = text.len()))]
    pub fn parse(
        text: &str,
        group_configs: &[GroupConfig],
        keep_unknown: bool,
    ) -> Result<Self, ChangelogError> {
        let marker = UNRELEASED_REGEX
            .find(text)
            .ok_or(ChangelogError::TemplateNotFound)?;

        let header = text[..marker.start()].to_string();

        let after_marker = marker.end();
        let (unreleased_region, released) = match RELEASE_REGEX.find_at(text, after_marker) {
            Some(release) => (
                &text[after_marker..release.start()],
                text[release.start()..].to_string(),
            ),
            None => (&text[after_marker..], String::new()),
        };

        let mut groups = instantiate_groups(group_configs);
        let extras = scan_unreleased(unreleased_region, &mut groups, keep_unknown);

        debug!(
            group_count = groups.len(),
            extra_count = extras.len(),
            has_history = !released.is_empty(),
            "parsed changelog"
        );

        Ok(Self {
            header,
            groups,
            extras,
            released,
        })
    }

    /// Read and parse a changelog file, creating an empty document when
    /// the file does not exist yet.
    pub fn load(
        path: &Path,
        group_configs: &[GroupConfig],
        keep_unknown: bool,
    ) -> Result<Self, ChangelogError> {
        if !path.exists() {
            debug!(path = %path.display(), "changelog missing, starting from template");
            return Ok(Self::new(group_configs));
        }

        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, group_configs, keep_unknown)
    }

    /// Find a group by name, case-insensitively
    pub fn group_mut(&mut self, name: &str) -> Option<&mut ChangelogGroup> {
        self.groups
            .iter_mut()
            .find(|g| g.name.eq_ignore_ascii_case(name))
    }

    /// Whether the Unreleased region carries any content
    pub fn is_unreleased_empty(&self) -> bool {
        self.groups.iter().all(ChangelogGroup::is_empty) && self.extras.is_empty()
    }

    /// Serialize the document. Empty groups are omitted; the Unreleased
    /// region ends with exactly one trailing blank line.
    pub fn to_markdown(&self) -> String {
        let mut region = String::from("## Unreleased\n\n");

        for group in &self.groups {
            if group.is_empty() {
                continue;
            }
            region.push_str(&group.heading());
            region.push_str("\n\n");
            for line in &group.lines {
                region.push_str(line);
                region.push('\n');
            }
            region.push('\n');
        }

        for extra in &self.extras {
            for line in &extra.lines {
                region.push_str(line);
                region.push('\n');
            }
            region.push('\n');
        }

        format!(
            "{}{}{}",
            self.header,
            collapse_blank_lines(&region),
            self.released
        )
    }
}

fn instantiate_groups(group_configs: &[GroupConfig]) -> Vec<ChangelogGroup> {
    group_configs
        .iter()
        .filter(|g| !g.skip)
        .map(ChangelogGroup::from_config)
        .collect()
}

/// Collapse runs of blank lines to a single one and end with exactly
/// one trailing blank line.
pub(crate) fn collapse_blank_lines(region: &str) -> String {
    let mut out = String::with_capacity(region.len());
    let mut previous_blank = false;

    for line in region.lines() {
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        if blank {
            out.push('\n');
        } else {
            out.push_str(line.trim_end());
            out.push('\n');
        }
        previous_blank = blank;
    }

    while out.ends_with('\n') {
        out.pop();
    }
    out.push_str("\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::config::default_groups;

    #[test]
    fn test_new_document_renders_marker_only() {
        let doc = ChangelogDocument::new(&default_groups());
        let text = doc.to_markdown();

        assert!(text.starts_with("# Changelog"));
        assert!(text.contains("## Unreleased"));
        // No groups have content, so no headings render.
        assert!(!text.contains("### "));
    }

    #[test]
    fn test_parse_without_marker_is_fatal() {
        let result = ChangelogDocument::parse("# Some other file\n\ntext\n", &default_groups(), false);
        assert!(matches!(result, Err(ChangelogError::TemplateNotFound)));
    }

    #[test]
    fn test_released_history_is_byte_preserved() {
        let history = "## 2024-01-05 Release v0.1.0\n\nodd   spacing\t\n- legacy entry\n";
        let text = format!("# Changelog\n\n## Unreleased\n\n### ✨ Features\n\n- new\n\n{history}");

        let doc = ChangelogDocument::parse(&text, &default_groups(), false).unwrap();
        assert_eq!(doc.released, history);

        let rendered = doc.to_markdown();
        assert!(rendered.ends_with(history));
    }

    #[test]
    fn test_round_trip_is_stable() {
        let doc = {
            let mut doc = ChangelogDocument::new(&default_groups());
            doc.group_mut("Features").unwrap().lines.push("- one".to_string());
            doc
        };
        let once = doc.to_markdown();

        let reparsed = ChangelogDocument::parse(&once, &default_groups(), false).unwrap();
        assert_eq!(reparsed.to_markdown(), once);
    }

    #[test]
    fn test_load_missing_file_starts_from_template() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");

        let doc = ChangelogDocument::load(&path, &default_groups(), false).unwrap();
        assert!(doc.is_unreleased_empty());
        assert!(doc.released.is_empty());
    }

    #[test]
    fn test_load_existing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");
        std::fs::write(&path, "# Changelog\n\n## Unreleased\n\n### ✨ Features\n\n- old\n").unwrap();

        let mut doc = ChangelogDocument::load(&path, &default_groups(), false).unwrap();
        assert_eq!(doc.group_mut("Features").unwrap().lines, vec!["- old"]);
    }

    #[test]
    fn test_collapse_blank_lines() {
        let collapsed = collapse_blank_lines("a\n\n\n\nb\n\n\n");
        assert_eq!(collapsed, "a\n\nb\n\n");
    }

    #[test]
    fn test_skip_groups_not_instantiated() {
        let mut configs = default_groups();
        configs[0].skip = true;
        let skipped = configs[0].name.clone();

        let mut doc = ChangelogDocument::new(&configs);
        assert!(doc.group_mut(&skipped).is_none());
    }
}
