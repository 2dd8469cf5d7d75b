// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # ccapi-client
//!
//! Async client for Cloud Controller v3 style JSON APIs. Collection
//! endpoints are paginated; the client follows `pagination.next` links
//! and hands back every resource as one JSON array.
//!
//! ## Features
//!
//! - **Authenticated Transport**: a caller-supplied `Authorization` value on every GET
//! - **Transparent Pagination**: walks `next` links, stops early once a limit is met
//! - **Raw Fetch**: single resources returned byte-for-byte
//! - **Token Refresh**: explicit UAA refresh-token grant
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ccapi_client::{CcClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = CcClient::new(
//!         "https://api.example.com",
//!         "https://uaa.example.com",
//!         "bearer eyJhbGciOi...",
//!     )?;
//!
//!     // Every application, across all pages
//!     let apps = client.list_applications(&[("space_guids", "abc")]).await?;
//!
//!     // First 10 processes only
//!     let processes = client.list_resources("/v3/processes", 10).await?;
//!
//!     // A single resource, exactly as served
//!     let app = client.get_resource("/v3/apps/abc").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          CcClient                               │
//! │  list_applications()   list_resources()   get_resource()        │
//! │  set_token()           refresh_auth_token()                     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Decode   │   Output    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Token    │ GET       │ Walk state    │ Envelope  │ Aggregate   │
//! │ Refresh  │ Resolve   │ Fetch limit   │ next link │ JSON array  │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and resource models
pub mod types;

/// Access token storage and refresh
pub mod auth;

/// Authenticated HTTP transport
pub mod http;

/// Pagination walker
pub mod pagination;

/// Pagination envelope decoding
pub mod decode;

/// Result aggregation and encoding
pub mod output;

/// Route templates
pub mod template;

/// Client configuration
pub mod config;

/// The Cloud Controller client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use auth::{TokenRefresher, TokenStore};
pub use client::{CcClient, Client};
pub use config::ClientConfig;
pub use pagination::{FetchLimit, Locator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
