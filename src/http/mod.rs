//! HTTP transport module
//!
//! Provides the authenticated GET used by every fetch operation and the
//! URL resolution rules shared by the client and the pagination walker.
//!
//! # Features
//!
//! - **Authenticated Transport**: `Authorization` header on every request
//! - **Outcome Classification**: success, unexpected status, transport failure
//! - **URL Resolution**: paths and `next` links resolved against the CC endpoint

mod client;
mod resolve;

pub use client::{HttpClientConfig, HttpClientConfigBuilder, HttpTransport, Transport};
pub use resolve::{parse_endpoint, resolve_url};
