//! Shared utilities for Hiroba server and client binaries.

pub mod logger;
pub mod time;
