//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf};

/// Arguments for running the HTTP server.
///
/// Secrets (API key, JWT secret) are read from the environment only, see
/// [`crate::config::AppConfig`].
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on.
    #[clap(long, default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// SQLite database file.
    #[clap(long, default_value = "./buzzerbeater.db")]
    pub database: PathBuf,

    /// Directory served under `/uploads`; avatars go to `<dir>/avatars`.
    #[clap(long, default_value = "./uploads")]
    pub upload_dir: PathBuf,

    /// Log level used when `RUST_LOG` is not set.
    #[clap(long, default_value = "info")]
    pub log_level: String,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database: PathBuf::from("./buzzerbeater.db"),
            upload_dir: PathBuf::from("./uploads"),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[clap(name = "buzzerbeater", about = "BuzzerBeater basketball fan backend")]
pub struct Buzzer {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        #[clap(flatten)]
        args: ServeArgs,
    },
}
