//! Pagination walker
//!
//! Drives [`WalkState`] against a [`Transport`]. Strictly sequential: the
//! next page's URL is only known after the current page is decoded.

use super::types::{FetchLimit, Locator, WalkState};
use crate::decode::{decode_page, Page};
use crate::error::Result;
use crate::http::Transport;
use crate::output::Aggregate;
use crate::types::Resource;
use tracing::{debug, warn};
use url::Url;

/// Result of a completed walk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkOutcome {
    /// Resources in server order, truncated to the limit
    pub resources: Vec<Resource>,
    /// Number of pages fetched
    pub pages: usize,
}

/// Walks one pagination chain with a fixed token.
///
/// The token is taken once when the walker is built and used for every page,
/// so a refresh that lands mid-walk does not mix credentials.
pub struct Walker<'a, T: Transport + ?Sized> {
    transport: &'a T,
    base: &'a Url,
    token: String,
}

impl<'a, T: Transport + ?Sized> Walker<'a, T> {
    pub fn new(transport: &'a T, base: &'a Url, token: impl Into<String>) -> Self {
        Self {
            transport,
            base,
            token: token.into(),
        }
    }

    /// Walk from `start` until the chain ends or `limit` resources are held.
    ///
    /// The first error anywhere in the chain is returned as is; resources
    /// from earlier pages are discarded.
    pub async fn walk(&self, start: impl Into<Locator>, limit: FetchLimit) -> Result<WalkOutcome> {
        let mut aggregate = Aggregate::new();
        let mut pages = 0;
        let mut state = WalkState::start(start);

        loop {
            state = match state {
                WalkState::Fetching(locator) => {
                    let outcome = self.fetch_page(&locator).await;
                    if let Ok(page) = &outcome {
                        pages += 1;
                        debug!(
                            "Page {} from {}: {} resources (total {:?}), next: {}",
                            pages,
                            locator,
                            page.len(),
                            page.total_results,
                            page.next.as_ref().map_or("none", Locator::as_str)
                        );
                    }
                    WalkState::advance(outcome, &mut aggregate, limit)
                }
                WalkState::Done => {
                    let resources = aggregate.finish(limit);
                    debug!(
                        "Walk done: {} resources from {} pages (limit {})",
                        resources.len(),
                        pages,
                        limit
                    );
                    return Ok(WalkOutcome { resources, pages });
                }
                WalkState::Failed(err) => {
                    warn!("Walk aborted after {} pages: {}", pages, err);
                    return Err(err);
                }
            };
        }
    }

    /// One fetch-and-decode cycle
    async fn fetch_page(&self, locator: &Locator) -> Result<Page> {
        let url = locator.resolve(self.base)?;
        let body = self.transport.get(&url, &self.token).await?;
        decode_page(&body)
    }
}
