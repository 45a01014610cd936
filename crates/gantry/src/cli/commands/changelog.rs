//! Changelog command

use clap::Args;
use tracing::info;

use gantry_changelog::ChangelogDocument;
use gantry_core::config::load_config_or_default;
use gantry_git::GitRepo;

use crate::cli::{output, Cli};
use crate::exit_codes;

use super::support::classified_range;

/// Merge the commits since the last tag into the changelog
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Print the merged document instead of writing the file
    #[arg(long)]
    pub stdout: bool,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd);
        let repo = GitRepo::discover(&cwd)?;

        let (_, commits) = classified_range(&repo, &config)?;

        let path = cwd.join(&config.changelog.file);
        let mut doc = ChangelogDocument::load(
            &path,
            &config.changelog.groups,
            config.changelog.keep_unknown_groups,
        )?;

        let remote_url = repo.https_remote_url(&config.git.remote);
        doc.merge_commits(&commits, remote_url.as_deref());
        let text = doc.to_markdown();

        info!(commit_count = commits.len(), path = %path.display(), "changelog merged");

        if self.stdout {
            println!("{text}");
        } else {
            std::fs::write(&path, text)?;
            output::info(
                cli,
                format!(
                    "merged {} commits into {}",
                    commits.len(),
                    config.changelog.file.display()
                ),
            );
        }

        Ok(exit_codes::SUCCESS)
    }
}
