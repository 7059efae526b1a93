//! Command line and runtime configuration.

use clap::Parser;
use std::path::PathBuf;

use crate::logging::LevelFilter;

/// Placeholder framework location used when none is given
pub const DEFAULT_FRAMEWORK_PATH: &str = "/mock/framework/path";

/// JSON-RPC fixture server speaking newline-delimited JSON over stdio
#[derive(Debug, Parser)]
#[command(name = "fixture-rpc-server", version, about)]
pub struct Cli {
    /// Framework path (accepted for launcher compatibility, not used)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_FRAMEWORK_PATH)]
    pub framework_path: PathBuf,

    /// Log level for diagnostics written to stderr
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: LevelFilter,
}

/// Resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Framework location, kept for launcher compatibility
    pub framework_path: PathBuf,
    /// Level for stderr diagnostics
    pub log_level: LevelFilter,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            framework_path: PathBuf::from(DEFAULT_FRAMEWORK_PATH),
            log_level: LevelFilter::Warn,
        }
    }
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            framework_path: cli.framework_path,
            log_level: cli.log_level,
        }
    }
}
