//! Gantry Changelog - incremental changelog document model
//!
//! Parses an existing changelog into an Unreleased region and an opaque
//! released history, groups Unreleased lines by changelog group, merges
//! newly classified commits idempotently, and relabels the Unreleased
//! region into a dated release block.

mod document;
mod groups;
mod merge;
mod release;
mod types;

pub use document::ChangelogDocument;
pub use merge::format_bullet;
pub use types::{ChangelogGroup, ExtraGroup};
