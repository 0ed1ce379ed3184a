//! Cartwright - A Rust-native CLI for retro cartridge projects
//!
//! Cartwright is a single-binary tool that drives a cartridge asset
//! pipeline: initializing projects, resolving layered configuration,
//! and interpreting pipeline invocations for packing, converting,
//! compiling, and running cartridge images.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (grammar, interpretation, dispatch)
//! - [`core`] - Option storage, config file format, and path discovery
//! - [`ui`] - Output gating, prompts, and session state
//!
//! # Resolution Invariants
//!
//! Cartwright maintains the following invariants:
//!
//! 1. Option keys are normalized, so every decorated spelling of a key
//!    reads and writes the same slot
//! 2. Sources apply in a fixed order (defaults, global config, project
//!    config, argv) and later sources win key by key
//! 3. Typed reads never fail: absent or malformed values fall back to
//!    the caller's default, while malformed config files fail loudly
//!    with a line number
//! 4. Unexpected but harmless command-line input degrades to a help
//!    request instead of an error

pub mod cli;
pub mod core;
pub mod ui;
