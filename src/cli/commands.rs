//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// Recipient batching and route assignment service
#[derive(Parser, Debug)]
#[command(name = "recipient-router")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server mode
    Serve {
        /// Interface to bind (overrides config file)
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port to listen on (overrides config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Banner returned in the response message (overrides config file)
        #[arg(long)]
        banner: Option<String>,

        /// Echo the caller's message instead of the banner
        #[arg(long)]
        echo_message: bool,
    },

    /// Compute a route table locally for a request payload
    Route {
        /// Request payload file (JSON)
        #[arg(long, conflicts_with = "payload_json")]
        payload: Option<PathBuf>,

        /// Inline request payload JSON
        #[arg(long)]
        payload_json: Option<String>,
    },

    /// Check a running server against the expected route tables
    Verify {
        /// Base URL of the server
        #[arg(long, default_value = "http://localhost:5000")]
        url: String,

        /// Verify every recipient count from 1 up to this value
        #[arg(long, default_value = "30")]
        count: usize,

        /// Message sent with each request
        #[arg(long, default_value = "SH Rocks")]
        message: String,

        /// Message the server must respond with (unchecked if omitted)
        #[arg(long)]
        expect_message: Option<String>,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,
    },

    /// List capacity tiers and their address prefixes
    Tiers,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}
