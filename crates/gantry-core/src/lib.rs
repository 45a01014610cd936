//! Gantry Core - shared foundation for the Gantry commit tooling
//!
//! This crate provides the error taxonomy, configuration model, and the
//! severity type shared by the commit validator, the version resolver,
//! and the changelog model.

pub mod config;
pub mod error;
pub mod severity;

pub use config::{load_config_or_default, Config};
pub use error::{GantryError, Result};
pub use severity::Severity;
