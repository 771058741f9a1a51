//! Core error type.
//!
//! The core only fails on configuration; placement and simulation errors
//! live in their own crates.

use thiserror::Error;

/// Errors raised by `hm-core`.
#[derive(Debug, Error)]
pub enum HmError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `hm-*` crates.
pub type HmResult<T> = Result<T, HmError>;
