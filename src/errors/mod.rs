//! Centralized error handling module
//!
//! The library reports typed [`NtfyError`] values; the CLI wraps them in
//! `anyhow` at the command boundary.

pub mod types;

pub use types::{NtfyError, NtfyResult};
