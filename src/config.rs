//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::events::DEFAULT_PLUGIN;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "power-sidebar")]
#[command(about = "Keeps a printer power sidebar in sync with the print server")]
#[command(version)]
pub struct Config {
    /// Port the sidebar surface listens on
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Base URL of the print server
    #[arg(short, long, default_value = "http://127.0.0.1:5000")]
    pub server: String,

    /// API key sent as X-Api-Key
    #[arg(long, env = "POWER_SIDEBAR_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Plugin identifier on the print server
    #[arg(long, default_value = DEFAULT_PLUGIN)]
    pub plugin: String,

    /// How long a control stays busy after its command is acknowledged
    #[arg(long, default_value = "3000")]
    pub busy_window_ms: u64,

    /// Timeout for each request to the print server, in seconds
    #[arg(long, default_value = "10")]
    pub request_timeout_secs: u64,

    /// Only activate the controls while the host reports a logged-in session
    #[arg(long)]
    pub require_login: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn busy_window(&self) -> Duration {
        Duration::from_millis(self.busy_window_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
