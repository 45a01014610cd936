//! Version command

use clap::Args;
use console::style;
use tracing::info;

use gantry_core::config::load_config_or_default;
use gantry_git::GitRepo;
use gantry_version::{next_version, resolve, VersionOverrides};

use crate::cli::{Cli, OutputFormat};
use crate::exit_codes;

use super::support::classified_range;

/// Calculate the next version
#[derive(Debug, Args)]
pub struct VersionCommand {
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

    /// Show current version only
    #[arg(long)]
    pub current: bool,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd);
        let repo = GitRepo::discover(&cwd)?;

        let (latest, commits) = classified_range(&repo, &config)?;
        let current = latest
            .as_ref()
            .map(|t| t.name.clone())
            .unwrap_or_else(|| "none".to_string());

        if self.current {
            println!("{current}");
            return Ok(exit_codes::SUCCESS);
        }

        let resolution = resolve(&commits);
        let next = next_version(
            latest.as_ref().map(|t| t.name.as_str()),
            &resolution,
            &self.overrides(),
            &config.versioning.tag_prefix,
            &config.versioning.prerelease_label,
        )?;

        info!(current = %current, next = %next, "version resolved");

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "current": current,
                    "next": next,
                    "increment": resolution.increment.to_string(),
                    "breaking": resolution.is_breaking,
                    "commits": commits.len(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    println!("{next}");
                } else {
                    println!("{}", style("Version Calculation").bold());
                    println!();
                    println!("  Current version:  {}", style(&current).cyan());
                    println!("  Next version:     {}", style(&next).green().bold());
                    println!(
                        "  Increment:        {}",
                        style(resolution.increment.to_string()).yellow()
                    );
                    println!("  Commits analyzed: {}", commits.len());
                }
            }
        }

        Ok(exit_codes::SUCCESS)
    }

    fn overrides(&self) -> VersionOverrides {
        VersionOverrides {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            prerelease: self.pre.clone(),
            build: self.build,
        }
    }
}
