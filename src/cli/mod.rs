//! CLI module
//!
//! Command-line interface over [`crate::CcClient`].
//!
//! # Commands
//!
//! - `apps` - List applications, optionally filtered
//! - `list` - Walk any paginated collection
//! - `get` - Fetch a single resource
//! - `refresh` - Refresh the access token and print the new `Authorization` value

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
