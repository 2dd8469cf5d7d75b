//! Pagination module
//!
//! Walks a server-driven pagination chain: fetch a page, decode it, follow
//! its `next` locator, and stop when the chain ends or the caller's limit
//! is met.
//!
//! # Overview
//!
//! The walk is an explicit state machine ([`WalkState`]) whose transition
//! function is pure, so every step can be tested without a server. The
//! [`Walker`] drives it with one request in flight at a time.

mod types;
mod walker;

pub use types::{FetchLimit, Locator, WalkState};
pub use walker::{WalkOutcome, Walker};
