//! Command-line and environment configuration for the server binary.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "besedka-server")]
#[command(about = "Real-time messaging server with account registration", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "BESEDKA_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "BESEDKA_PORT", default_value = "8000")]
    pub port: u16,

    /// SQLite database file; accounts are kept in memory when omitted
    #[arg(short = 'd', long, env = "BESEDKA_DATABASE")]
    pub database: Option<PathBuf>,

    /// Close connections that send nothing for this many seconds
    #[arg(long, env = "BESEDKA_IDLE_TIMEOUT_SECS")]
    pub idle_timeout_secs: Option<u64>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "BESEDKA_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
