//! Exit codes for the CLI

/// Success, no-op, or skip
pub const SUCCESS: i32 = 0;

/// Validation failure, fatal I/O error, or missing changelog template
pub const FAILURE: i32 = 1;
