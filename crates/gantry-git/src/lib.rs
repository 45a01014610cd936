//! Gantry Git - repository access for commit and tag enumeration
//!
//! Supplies the collaborator surface the core passes consume: raw
//! commits for a range, the latest and earliest release tags matching a
//! prefix, and the HTTPS remote URL for building links.

mod commits;
mod remote;
mod repository;
mod tags;
mod types;

pub use repository::{GitRepo, Result};
pub use types::TagInfo;
