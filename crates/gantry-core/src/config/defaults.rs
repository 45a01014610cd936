//! Default configuration values

use crate::severity::Severity;

use super::types::{GroupConfig, TypeConfig};

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "gantry.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "gantry.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".gantry.toml",
        ".gantry.yaml",
    ]
}

/// The fixed default type taxonomy.
///
/// Names are matched case-insensitively against commit headers; the
/// stored name is the canonical casing autofixes normalize to.
pub fn default_types() -> Vec<TypeConfig> {
    vec![
        TypeConfig::new("break", Severity::Major, Some("Incompatible")),
        TypeConfig::new("feat", Severity::Minor, Some("Features")),
        TypeConfig::new("deprecate", Severity::Minor, Some("Deprecated")),
        TypeConfig::new("preview", Severity::Minor, Some("Preview")),
        TypeConfig::new("fix", Severity::Patch, Some("Fixed")),
        TypeConfig::new("security", Severity::Patch, Some("Security")),
        TypeConfig::new("perf", Severity::Patch, Some("Changed")),
        TypeConfig::new("refactor", Severity::Patch, Some("Changed")),
        TypeConfig::new("revert", Severity::Patch, Some("Changed")),
        TypeConfig::new("deps", Severity::Patch, Some("Dependencies")),
        TypeConfig::new("build", Severity::Tweak, Some("Dependencies")),
        TypeConfig::new("docs", Severity::Tweak, None),
        TypeConfig::new("style", Severity::Tweak, None),
        TypeConfig::new("test", Severity::Tweak, None),
        TypeConfig::new("ci", Severity::Tweak, None),
        TypeConfig::new("chore", Severity::Tweak, None),
        TypeConfig::skip("wip"),
    ]
}

/// The fixed default changelog group taxonomy, in render order.
pub fn default_groups() -> Vec<GroupConfig> {
    vec![
        GroupConfig::new("Security", "🔒", Severity::Patch),
        GroupConfig::new("Deprecated", "⚠️", Severity::Minor),
        GroupConfig::new("Incompatible", "💥", Severity::Major),
        GroupConfig::new("Features", "✨", Severity::Minor),
        GroupConfig::new("Fixed", "🐛", Severity::Patch),
        GroupConfig::new("Changed", "♻️", Severity::Patch),
        GroupConfig::new("Preview", "🧪", Severity::Minor),
        GroupConfig::new("Dependencies", "📦", Severity::Patch),
    ]
}

/// Default configuration template written by `gantry init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Gantry configuration
# See https://github.com/example/gantry for documentation

# Reject commits whose fields were only fixable automatically
fail_on_autofix = false

[header]
max_length = 80

[rules]
scope = "default"
subject = "default"
body = "any"
footer = "default"

[changelog]
file = "CHANGELOG.md"
keep_unknown_groups = false

[versioning]
tag_prefix = "v"
prerelease_label = "pre"

[git]
remote = "origin"
"#;
