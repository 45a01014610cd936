//! Release command

use clap::Args;
use tracing::info;

use gantry_changelog::ChangelogDocument;
use gantry_core::config::load_config_or_default;
use gantry_git::GitRepo;
use gantry_version::{next_version, resolve, VersionOverrides};

use crate::cli::{output, Cli};
use crate::exit_codes;

use super::support::classified_range;

/// Compute the next version, merge pending commits, and relabel the
/// Unreleased region into a dated release block
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    /// Override the major component
    #[arg(long)]
    pub major: Option<u64>,

    /// Override the minor component
    #[arg(long)]
    pub minor: Option<u64>,

    /// Override the patch component
    #[arg(long)]
    pub patch: Option<u64>,

    /// Override the pre-release label
    #[arg(long)]
    pub pre: Option<String>,

    /// Override the build number
    #[arg(long)]
    pub build: Option<u64>,

    /// Print the released document instead of writing the file
    #[arg(long)]
    pub dry_run: bool,
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd);
        let repo = GitRepo::discover(&cwd)?;

        let (latest, commits) = classified_range(&repo, &config)?;
        let resolution = resolve(&commits);

        let overrides = VersionOverrides {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            prerelease: self.pre.clone(),
            build: self.build,
        };
        let version = next_version(
            latest.as_ref().map(|t| t.name.as_str()),
            &resolution,
            &overrides,
            &config.versioning.tag_prefix,
            &config.versioning.prerelease_label,
        )?;

        let path = cwd.join(&config.changelog.file);
        let mut doc = ChangelogDocument::load(
            &path,
            &config.changelog.groups,
            config.changelog.keep_unknown_groups,
        )?;

        let remote_url = repo.https_remote_url(&config.git.remote);
        doc.merge_commits(&commits, remote_url.as_deref());

        let today = chrono::Local::now().date_naive();
        let text = doc.release(&version, today, remote_url.as_deref());

        info!(version = %version, commit_count = commits.len(), "release prepared");

        if self.dry_run {
            println!("{text}");
        } else {
            std::fs::write(&path, text)?;
            output::info(
                cli,
                format!("released {} into {}", version, config.changelog.file.display()),
            );
            if cli.quiet {
                println!("{version}");
            }
        }

        Ok(exit_codes::SUCCESS)
    }
}
