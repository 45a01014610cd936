//! Gantry Version - severity aggregation and next-version computation

mod resolver;
mod semver;

pub use resolver::{resolve, Resolution};
pub use semver::{next_version, VersionComponents, VersionOverrides};
