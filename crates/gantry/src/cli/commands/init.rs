//! Init command

use clap::Args;

use gantry_core::config::defaults::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML};

use crate::cli::{output, Cli};
use crate::exit_codes;

/// Write a default gantry.toml
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        let path = std::env::current_dir()?.join(DEFAULT_CONFIG_TOML);

        if path.exists() && !self.force {
            output::warn(
                cli,
                format!("{} already exists, use --force to overwrite", path.display()),
            );
            return Ok(exit_codes::SUCCESS);
        }

        std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        output::info(cli, format!("wrote {}", path.display()));

        Ok(exit_codes::SUCCESS)
    }
}
