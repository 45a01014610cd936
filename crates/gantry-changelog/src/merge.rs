//! Merging classified commits into the Unreleased region

use tracing::{debug, instrument};

use gantry_commits::ValidatedCommit;

use crate::document::ChangelogDocument;

impl ChangelogDocument {
    /// Merge classified commits into their groups, in commit order.
    ///
    /// A bullet already present in its group is not appended again, so
    /// repeated invocations over the same range are idempotent.
    #[instrument(skip_all, fields(commit_count = commits.len()))]
    pub fn merge_commits(&mut self, commits: &[ValidatedCommit], remote_url: Option<&str>) {
        let mut merged = 0usize;

        for commit in commits {
            let Some(group_name) = commit.changelog_group.clone() else {
                continue;
            };
            let bullet = format_bullet(commit, remote_url);

            // Groups the configuration skips or never declared drop
            // their commits instead of aborting the pass.
            let Some(group) = self.group_mut(&group_name) else {
                debug!(group = %group_name, "dropping commit for unconfigured group");
                continue;
            };

            if !group.lines.contains(&bullet) {
                group.lines.push(bullet);
                merged += 1;
            }
        }

        debug!(merged, "merged commits into changelog");
    }
}

/// Format one commit as a changelog bullet.
///
/// The richest form is `- **type**(`scope`): subject ([hash](url))`;
/// missing scope, remote, or hash degrade to progressively simpler
/// forms.
pub fn format_bullet(commit: &ValidatedCommit, remote_url: Option<&str>) -> String {
    let mut bullet = format!("- **{}**", commit.commit_type);

    if let Some(scope) = &commit.scope {
        bullet.push_str(&format!("(`{scope}`)"));
    }

    bullet.push_str(&format!(": {}", commit.subject));

    match (commit.short_hash(), commit.hash.as_deref(), remote_url) {
        (Some(short), Some(full), Some(remote)) => {
            bullet.push_str(&format!(" ([{short}]({remote}/commit/{full}))"));
        }
        (Some(short), _, None) => {
            bullet.push_str(&format!(" ({short})"));
        }
        _ => {}
    }

    bullet
}
