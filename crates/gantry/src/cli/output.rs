//! Single-line, severity-prefixed diagnostics
//!
//! INFO and WARN honor `--quiet`; ERROR is always shown because the
//! exit code alone cannot convey the reason.

use console::style;

use super::Cli;

/// Informational line, silenced by `--quiet`
pub fn info(cli: &Cli, message: impl AsRef<str>) {
    if !cli.quiet {
        println!("{} {}", style("INFO").cyan(), message.as_ref());
    }
}

/// Warning line, silenced by `--quiet`
pub fn warn(cli: &Cli, message: impl AsRef<str>) {
    if !cli.quiet {
        println!("{} {}", style("WARN").yellow().bold(), message.as_ref());
    }
}

/// Error line, always shown
pub fn error(message: impl AsRef<str>) {
    eprintln!("{} {}", style("ERROR").red().bold(), message.as_ref());
}
