//! Shared plumbing for the range-based commands

use gantry_commits::{classify, parse, RuleSet, ValidatedCommit};
use gantry_core::config::Config;
use gantry_git::{GitRepo, TagInfo};

/// The commits since the latest release tag, classified for
/// aggregation, along with that tag.
pub fn classified_range(
    repo: &GitRepo,
    config: &Config,
) -> anyhow::Result<(Option<TagInfo>, Vec<ValidatedCommit>)> {
    let rules = RuleSet::from_config(config);
    let latest = repo.find_latest_tag(&config.versioning.tag_prefix)?;

    let raw_commits = repo.raw_commits_since(latest.as_ref().map(|t| t.name.as_str()))?;

    let commits = raw_commits
        .iter()
        .filter_map(|raw| {
            let parsed = parse(raw);
            classify(raw, &parsed, &rules)
        })
        .collect();

    Ok((latest, commits))
}
