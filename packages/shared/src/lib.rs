//! Shared utilities for Cuddle.
//!
//! Logging bootstrap and time helpers used by every binary in the workspace.

pub mod logger;
pub mod time;
