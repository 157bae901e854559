//! Blueprint scaffolding library.
//!
//! This crate provides the project-level operations behind the `blueprint`
//! CLI: plugin registration, devkit definitions, release workflow templating
//! and Maya module generation. It can also be consumed programmatically, for
//! example from tests that exercise a generated project layout.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`definitions`] - Project definitions and the devkit catalogue
//! - [`dirs`] - Directory resolution abstraction for platform-specific paths
//! - [`error`] - Semantic error types with recovery hints
//! - [`init`] - Post-generation project initialisation
//! - [`inject`] - Single-file anchor edits for the `inject` command
//! - [`logging`] - Stderr logger for the binary
//! - [`module_file`] - Maya module descriptor generation
//! - [`output`] - Human-readable command summaries
//! - [`platform`] - Maya host platforms and naming conventions
//! - [`plugin`] - Plugin template copy and registration
//! - [`release_ci`] - Devkit matrix templating for the release workflow
//! - [`workspace`] - Project layout and root resolution

pub mod cli;
pub mod definitions;
pub mod dirs;
pub mod error;
pub mod init;
pub mod inject;
pub mod logging;
pub mod module_file;
pub mod output;
pub mod platform;
pub mod plugin;
pub mod release_ci;
pub mod workspace;
