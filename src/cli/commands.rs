//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cloud Controller v3 API client
#[derive(Parser, Debug)]
#[command(name = "ccapi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Cloud Controller endpoint (overrides config)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// UAA endpoint (overrides config)
    #[arg(long, global = true)]
    pub uaa_endpoint: Option<String>,

    /// Authorization header value (overrides config)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Refresh token (overrides config)
    #[arg(long, global = true)]
    pub refresh_token: Option<String>,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List applications
    Apps {
        /// Query filter as key=value (repeatable), e.g. space_guids=a,b
        #[arg(short, long = "query", value_parser = parse_key_val)]
        query: Vec<(String, String)>,

        /// Maximum applications to return (0 = all)
        #[arg(long, default_value = "0")]
        limit: usize,
    },

    /// Walk a paginated collection
    List {
        /// Collection path, e.g. /v3/spaces?per_page=50
        path: String,

        /// Maximum resources to return (0 = all)
        #[arg(long, default_value = "0")]
        limit: usize,
    },

    /// Fetch a single resource
    Get {
        /// Resource path, e.g. /v3/apps/<guid>
        path: String,
    },

    /// Refresh the access token
    Refresh,
}

/// Parse a `key=value` pair
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}
