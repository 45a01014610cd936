//! Relabeling the Unreleased region into a dated release block

use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::document::{collapse_blank_lines, ChangelogDocument};

impl ChangelogDocument {
    /// Serialize a release: the Unreleased content becomes a dated,
    /// tagged release block, preceded by a fresh empty Unreleased
    /// template with every known group as an empty heading.
    ///
    /// Releasing an empty Unreleased region only stacks an empty
    /// release block, so repeated invocations never lose data.
    #[instrument(skip(self), fields(version))]
    pub fn release(&self, version: &str, date: NaiveDate, remote_url: Option<&str>) -> String {
        let mut template = String::from("## Unreleased\n\n");
        for group in &self.groups {
            template.push_str(&group.heading());
            template.push_str("\n\n");
        }

        let date_str = date.format("%Y-%m-%d");
        let mut block = match remote_url {
            Some(remote) => format!(
                "## {date_str} Release [{version}]({remote}/releases/tag/{version})\n\n"
            ),
            None => format!("## {date_str} Release {version}\n\n"),
        };

        if !self.is_unreleased_empty() {
            let index: Vec<String> = self
                .groups
                .iter()
                .filter(|g| !g.is_empty())
                .map(|g| {
                    format!(
                        "[{} {}](#{})",
                        g.symbol,
                        g.name,
                        release_anchor(version, &g.slug())
                    )
                })
                .collect();
            if !index.is_empty() {
                block.push_str(&format!("> {}\n\n", index.join(" · ")));
            }

            for group in self.groups.iter().filter(|g| !g.is_empty()) {
                block.push_str(&format!(
                    "<span id=\"{}\"></span>\n",
                    release_anchor(version, &group.slug())
                ));
                block.push_str(&group.heading());
                block.push_str("\n\n");
                for line in &group.lines {
                    block.push_str(line);
                    block.push('\n');
                }
                block.push('\n');
            }

            for extra in &self.extras {
                for line in &extra.lines {
                    block.push_str(line);
                    block.push('\n');
                }
                block.push('\n');
            }
        }

        debug!(version, empty = self.is_unreleased_empty(), "relabeled release");

        format!(
            "{}{}{}{}",
            self.header,
            collapse_blank_lines(&template),
            collapse_blank_lines(&block),
            self.released
        )
    }
}

/// Anchor id for a group inside a release block
fn release_anchor(version: &str, slug: &str) -> String {
    format!("{}-{}", version.to_lowercase().replace('.', ""), slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::config::default_groups;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    fn doc_with_feature() -> ChangelogDocument {
        let mut doc = ChangelogDocument::new(&default_groups());
        doc.group_mut("Features")
            .unwrap()
            .lines
            .push("- **feat**(`api`): add endpoint".to_string());
        doc
    }

    #[test]
    fn test_release_relabels_unreleased() {
        let text = doc_with_feature().release(
            "v1.2.0",
            date(),
            Some("https://github.com/example/gantry"),
        );

        assert!(text.contains(
            "## 2026-08-06 Release [v1.2.0](https://github.com/example/gantry/releases/tag/v1.2.0)"
        ));
        assert!(text.contains("- **feat**(`api`): add endpoint"));
        // Fresh template precedes the release block.
        let unreleased_pos = text.find("## Unreleased").unwrap();
        let release_pos = text.find("## 2026-08-06 Release").unwrap();
        assert!(unreleased_pos < release_pos);
    }

    #[test]
    fn test_release_without_remote_uses_plain_heading() {
        let text = doc_with_feature().release("v1.2.0", date(), None);
        assert!(text.contains("## 2026-08-06 Release v1.2.0"));
        assert!(!text.contains("releases/tag"));
    }

    #[test]
    fn test_release_emits_anchor_and_index() {
        let text = doc_with_feature().release("v1.2.0", date(), None);
        assert!(text.contains("<span id=\"v120-features\"></span>"));
        assert!(text.contains("[✨ Features](#v120-features)"));
    }

    #[test]
    fn test_template_lists_all_known_groups() {
        let text = doc_with_feature().release("v1.2.0", date(), None);
        let template_end = text.find("## 2026-08-06 Release").unwrap();
        let template = &text[..template_end];

        for group in default_groups() {
            assert!(template.contains(&format!("### {} {}", group.symbol, group.name)));
        }
    }

    #[test]
    fn test_release_twice_only_adds_empty_block() {
        let groups = default_groups();
        let first = doc_with_feature().release("v1.2.0", date(), None);

        let reparsed = ChangelogDocument::parse(&first, &groups, false).unwrap();
        assert!(reparsed.is_unreleased_empty());

        let second = reparsed.release("v1.2.1", date(), None);

        // Nothing from the first release is lost.
        assert!(second.contains("- **feat**(`api`): add endpoint"));
        assert!(second.contains("## 2026-08-06 Release v1.2.0"));
        // The new block is empty: heading only, no groups before the
        // first release's block.
        let v121 = second.find("Release v1.2.1").unwrap();
        let v120 = second.find("Release v1.2.0").unwrap();
        assert!(v121 < v120);
        let between = &second[v121..v120];
        assert!(!between.contains("### "));
    }

    #[test]
    fn test_release_empty_document_keeps_template() {
        let doc = ChangelogDocument::new(&default_groups());
        let text = doc.release("v0.1.0", date(), None);

        assert!(text.contains("## Unreleased"));
        assert!(text.contains("## 2026-08-06 Release v0.1.0"));
    }
}
