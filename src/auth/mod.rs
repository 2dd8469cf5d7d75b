//! Authentication module
//!
//! The `TokenStore` holds the value sent verbatim in the `Authorization`
//! header of every request. The `TokenRefresher` performs the UAA
//! refresh-token grant and writes the new token back into the store.
//!
//! Nothing in the fetch path refreshes on its own; callers decide when to
//! call [`TokenRefresher::refresh`] (usually after an error for which
//! [`crate::Error::is_unauthorized`] is true).

mod refresher;
mod token;

pub use refresher::{TokenRefresher, DEFAULT_CLIENT_ID};
pub use token::TokenStore;
