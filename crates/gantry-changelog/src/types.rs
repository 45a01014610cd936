//! Changelog group types

use gantry_core::config::GroupConfig;
use gantry_core::Severity;

/// A named, symbol-tagged bucket collecting formatted commit lines.
///
/// Created fresh per document parse, mutated by merge, discarded after
/// serialization.
#[derive(Debug, Clone)]
pub struct ChangelogGroup {
    /// Group name, used as the heading text
    pub name: String,
    /// Symbol rendered before the name
    pub symbol: String,
    /// Severity class associated with the group
    pub severity: Severity,
    /// Bullet lines, in merge order
    pub lines: Vec<String>,
}

impl ChangelogGroup {
    /// Instantiate an empty group from its configuration
    pub fn from_config(config: &GroupConfig) -> Self {
        Self {
            name: config.name.clone(),
            symbol: config.symbol.clone(),
            severity: config.severity,
            lines: Vec::new(),
        }
    }

    /// Markdown heading line for this group
    pub fn heading(&self) -> String {
        format!("### {} {}", self.symbol, self.name)
    }

    /// Anchor slug: the lowercase group name
    pub fn slug(&self) -> String {
        self.name.to_lowercase()
    }

    /// Whether the group has no content
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A group heading not present in the current configuration, preserved
/// verbatim (heading line included) when greedy mode is active.
#[derive(Debug, Clone, Default)]
pub struct ExtraGroup {
    /// Raw lines, heading first
    pub lines: Vec<String>,
}
