//! Output module
//!
//! Assembles the result of a walk.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Concatenating resources across pages in fetch order
//! - Truncating to the caller's limit (tail of the last page only)
//! - Encoding the result as a single JSON array payload

mod aggregate;

pub use aggregate::{encode_resources, Aggregate};

#[cfg(test)]
mod tests;
