//! core
//!
//! Option resolution for cartwright.
//!
//! # Modules
//!
//! - [`options`] - Normalized key/value store with typed access
//! - [`config`] - Config file syntax: loading and writing
//! - [`paths`] - Config file locations and project root discovery
//!
//! # Design Principles
//!
//! - One table, many sources: every layer writes into the same store
//! - Typed reads never fail; absent or mistyped values yield defaults
//! - Malformed input is an error, unexpected input is a help request

pub mod config;
pub mod options;
pub mod paths;
