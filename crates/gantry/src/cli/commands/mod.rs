//! CLI commands

mod changelog;
mod check;
mod init;
mod release;
mod support;
mod version;

pub use changelog::ChangelogCommand;
pub use check::CheckCommand;
pub use init::InitCommand;
pub use release::ReleaseCommand;
pub use version::VersionCommand;
