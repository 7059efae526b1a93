//! Logging utilities for the fixture server
//!
//! This module provides logging initialization and convenient re-exports
//! of the log crate macros for consistent logging across the library.
//! Standard output is reserved for the protocol, so logs always go to stderr.

use env_logger::{Builder, Target};

/// Initialize logging with the specified level, writing to stderr.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(level: LevelFilter) {
    let _ = Builder::new()
        .filter_level(level)
        .target(Target::Stderr)
        .format_timestamp_millis()
        .try_init();
}

// Re-export the log crate and its macros
pub use log::{LevelFilter, debug, error, info, trace, warn};
