//! Line-scanning automaton for the Unreleased region
//!
//! Group membership is tracked through an explicit state machine
//! instead of regex side effects: each heading line transitions the
//! state, every other line is attributed to the current state.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::types::{ChangelogGroup, ExtraGroup};

/// `### <symbol> <name>` markdown group heading
static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^### (?P<symbol>\S+) (?P<name>.+?)\s*$").expect("invalid regex"));

/// `<span id="..."></span>` HTML anchor naming a group
static ANCHOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^<span id="(?P<id>[^"]+)"></span>\s*$"#).expect("invalid regex"));

/// Scanner state: outside any group, inside a configured group, or
/// inside a heading the configuration does not know.
enum ScanState {
    NoGroup,
    Known(usize),
    Unknown,
}

/// Scan the Unreleased region, filling the known groups' lines and
/// collecting unknown headings verbatim when `keep_unknown` is set.
///
/// Lines before any recognized heading belong to no group and are
/// dropped on re-render.
pub(crate) fn scan_unreleased(
    region: &str,
    groups: &mut [ChangelogGroup],
    keep_unknown: bool,
) -> Vec<ExtraGroup> {
    let mut state = ScanState::NoGroup;
    let mut extras: Vec<ExtraGroup> = Vec::new();
    let mut last_was_heading = false;

    for line in region.lines() {
        if let Some(target) = heading_target(line, groups) {
            match target {
                Some(idx) => {
                    trace!(group = %groups[idx].name, "entering known group");
                    state = ScanState::Known(idx);
                }
                None => {
                    if keep_unknown {
                        // An anchor directly followed by its heading
                        // stays one extra group.
                        if !(matches!(state, ScanState::Unknown) && last_was_heading) {
                            extras.push(ExtraGroup::default());
                        }
                        if let Some(extra) = extras.last_mut() {
                            extra.lines.push(line.trim_end().to_string());
                        }
                    }
                    state = ScanState::Unknown;
                }
            }
            last_was_heading = true;
            continue;
        }
        last_was_heading = false;

        match state {
            ScanState::NoGroup => {}
            ScanState::Known(idx) => {
                if !line.trim().is_empty() {
                    groups[idx].lines.push(line.trim_end().to_string());
                }
            }
            ScanState::Unknown => {
                if keep_unknown && !line.trim().is_empty() {
                    if let Some(extra) = extras.last_mut() {
                        extra.lines.push(line.trim_end().to_string());
                    }
                }
            }
        }
    }

    extras
}

/// Recognize a heading line. Returns `None` for a non-heading line,
/// `Some(Some(idx))` for a configured group, `Some(None)` for an
/// unknown one.
fn heading_target(line: &str, groups: &[ChangelogGroup]) -> Option<Option<usize>> {
    if let Some(caps) = HEADING_REGEX.captures(line) {
        let name = caps.name("name").expect("name group").as_str();
        return Some(
            groups
                .iter()
                .position(|g| g.name.eq_ignore_ascii_case(name)),
        );
    }

    if let Some(caps) = ANCHOR_REGEX.captures(line) {
        let id = caps.name("id").expect("id group").as_str();
        return Some(groups.iter().position(|g| g.slug() == id.to_lowercase()));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::config::default_groups;

    fn make_groups() -> Vec<ChangelogGroup> {
        default_groups()
            .iter()
            .map(ChangelogGroup::from_config)
            .collect()
    }

    #[test]
    fn test_lines_attributed_to_current_group() {
        let mut groups = make_groups();
        let region = "### ✨ Features\n\n- one\n- two\n\n### 🐛 Fixed\n\n- three\n";

        let extras = scan_unreleased(region, &mut groups, false);

        assert!(extras.is_empty());
        let features = groups.iter().find(|g| g.name == "Features").unwrap();
        assert_eq!(features.lines, vec!["- one", "- two"]);
        let fixed = groups.iter().find(|g| g.name == "Fixed").unwrap();
        assert_eq!(fixed.lines, vec!["- three"]);
    }

    #[test]
    fn test_lines_before_any_heading_dropped() {
        let mut groups = make_groups();
        let region = "- orphan line\n\n### ✨ Features\n\n- kept\n";

        scan_unreleased(region, &mut groups, true);

        let all_lines: Vec<_> = groups.iter().flat_map(|g| g.lines.iter()).collect();
        assert_eq!(all_lines, vec!["- kept"]);
    }

    #[test]
    fn test_unknown_heading_dropped_when_not_greedy() {
        let mut groups = make_groups();
        let region = "### ☘ xyz\n\n- mystery\n";

        let extras = scan_unreleased(region, &mut groups, false);

        assert!(extras.is_empty());
        assert!(groups.iter().all(|g| g.is_empty()));
    }

    #[test]
    fn test_unknown_heading_kept_verbatim_when_greedy() {
        let mut groups = make_groups();
        let region = "### ☘ xyz\n\n- mystery\n";

        let extras = scan_unreleased(region, &mut groups, true);

        assert_eq!(extras.len(), 1);
        assert_eq!(extras[0].lines, vec!["### ☘ xyz", "- mystery"]);
    }

    #[test]
    fn test_anchor_resolves_group() {
        let mut groups = make_groups();
        let region = "<span id=\"features\"></span>\n- via anchor\n";

        scan_unreleased(region, &mut groups, false);

        let features = groups.iter().find(|g| g.name == "Features").unwrap();
        assert_eq!(features.lines, vec!["- via anchor"]);
    }

    #[test]
    fn test_heading_name_matched_case_insensitively() {
        let mut groups = make_groups();
        let region = "### ✨ features\n- lower\n";

        scan_unreleased(region, &mut groups, false);

        let features = groups.iter().find(|g| g.name == "Features").unwrap();
        assert_eq!(features.lines, vec!["- lower"]);
    }
}
