//! Stderr diagnostics for the `blueprint` binary.
//!
//! Both crates log through the `log` facade. A `tracing-subscriber` fmt
//! subscriber prints to stderr, and its `tracing-log` bridge forwards the
//! `log` records into it.

use std::io::IsTerminal;
use tracing_subscriber::filter::LevelFilter;

/// Error returned when a global logger or subscriber is already installed.
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Maps the `-v`/`-q` flags to a level filter.
///
/// Quiet mode keeps warnings so skipped injections are still reported.
#[must_use]
pub fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::WARN;
    }
    match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the stderr subscriber at the level implied by the CLI flags.
///
/// Module targets are only shown with `-v`.
///
/// # Errors
///
/// Returns an error if a subscriber or `log` logger is already installed.
pub fn init(verbosity: u8, quiet: bool) -> Result<(), InitError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level_for(verbosity, quiet))
        .with_target(verbosity > 0)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .try_init()
}
