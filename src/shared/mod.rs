//! Shared modules used by both the library API and the CLI binary

pub mod clients;
pub mod config;
