//! Check command

use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use tracing::info;

use gantry_commits::{
    parse, validate, Diagnostic, RawCommit, RuleSet, ValidationStatus,
};
use gantry_core::config::load_config_or_default;

use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes;

/// Validate a commit message
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Commit message text
    pub message: Option<String>,

    /// Read the message from a file instead
    #[arg(short, long, conflicts_with = "message")]
    pub file: Option<PathBuf>,
}

impl CheckCommand {
    /// Execute the check command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd);
        let rules = RuleSet::from_config(&config);

        let text = match (&self.message, &self.file) {
            (Some(message), None) => message.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)?,
            _ => bail!("provide a commit message or --file <path>"),
        };

        let raw = RawCommit::from_text(text);
        let mut parsed = parse(&raw);
        if let Some(path) = &self.file {
            parsed = parsed.with_source(path.clone());
        }

        let report = validate(&parsed, &rules);
        info!(status = ?report.status, "validated commit message");

        if cli.format == OutputFormat::Json {
            return self.output_json(&report);
        }

        for diagnostic in &report.diagnostics {
            match diagnostic {
                Diagnostic::Fixed { field, old, new } => {
                    output::warn(cli, format!("autofixed {field}: '{old}' -> '{new}'"));
                }
                Diagnostic::Rejected { field, value, message } => {
                    if value.is_empty() {
                        output::error(format!("{field}: {message}"));
                    } else {
                        output::error(format!("{field}: {message} (got '{value}')"));
                    }
                }
            }
        }

        match report.status {
            ValidationStatus::Accepted => {
                output::info(cli, "commit message OK");
                Ok(exit_codes::SUCCESS)
            }
            ValidationStatus::Autofixed => {
                // Only the changed spans differ; comments and trailing
                // content survive the rewrite.
                if let Some(fixed) = report.fixed_message.as_deref() {
                    if let Some(path) = &self.file {
                        std::fs::write(path, fixed)?;
                        output::info(cli, format!("rewrote {}", path.display()));
                    } else if !cli.quiet {
                        println!("{fixed}");
                    }
                }
                Ok(exit_codes::SUCCESS)
            }
            ValidationStatus::Rejected => Ok(exit_codes::FAILURE),
        }
    }

    fn output_json(&self, report: &gantry_commits::ValidationReport) -> anyhow::Result<i32> {
        let diagnostics: Vec<serde_json::Value> = report
            .diagnostics
            .iter()
            .map(|d| match d {
                Diagnostic::Fixed { field, old, new } => serde_json::json!({
                    "kind": "fixed",
                    "field": field.to_string(),
                    "old": old,
                    "new": new,
                }),
                Diagnostic::Rejected { field, value, message } => serde_json::json!({
                    "kind": "rejected",
                    "field": field.to_string(),
                    "value": value,
                    "error": message,
                }),
            })
            .collect();

        let output = serde_json::json!({
            "status": format!("{:?}", report.status).to_lowercase(),
            "fixed_message": report.fixed_message,
            "diagnostics": diagnostics,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);

        Ok(if report.is_rejected() {
            exit_codes::FAILURE
        } else {
            exit_codes::SUCCESS
        })
    }
}
