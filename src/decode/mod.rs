//! Response decoder module
//!
//! Parses a collection response into a [`Page`]: the ordered resources plus
//! the locator of the next page.
//!
//! # Envelope
//!
//! ```text
//! {
//!   "pagination": { "next": "/v3/apps?page=2" | {"href": "..."} | null, ... },
//!   "resources": [ {...}, {...} ]
//! }
//! ```
//!
//! Both keys are required. Resources are never inspected.

mod envelope;
mod types;

pub use envelope::decode_page;
pub use types::Page;
