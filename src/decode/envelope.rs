//! Pagination envelope decoder

use super::types::Page;
use crate::error::{Error, Result};
use crate::pagination::Locator;
use crate::types::Resource;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Envelope {
    pagination: PaginationInfo,
    resources: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
struct PaginationInfo {
    #[serde(default)]
    total_results: Option<u64>,
    #[serde(default)]
    next: Option<NextLink>,
}

/// `next` is either a bare URL string or a link object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NextLink {
    Url(String),
    Link { href: Option<String> },
}

impl NextLink {
    fn into_locator(self) -> Option<Locator> {
        let href = match self {
            NextLink::Url(url) => Some(url),
            NextLink::Link { href } => href,
        };
        href.filter(|h| !h.is_empty()).map(Locator::new)
    }
}

/// Decode a collection response body into a [`Page`].
///
/// Fails with `Error::Decode` on invalid JSON or when either `pagination` or
/// `resources` is missing. No partial page is ever returned.
pub fn decode_page(body: &[u8]) -> Result<Page> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| Error::decode(format!("Invalid pagination envelope: {e}")))?;

    Ok(Page {
        resources: envelope.resources,
        next: envelope.pagination.next.and_then(NextLink::into_locator),
        total_results: envelope.pagination.total_results,
    })
}
