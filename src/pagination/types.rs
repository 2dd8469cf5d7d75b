//! Pagination types
//!
//! Defines the locator, the fetch limit, and the walk state machine.

use crate::decode::Page;
use crate::error::{Error, Result};
use crate::http::resolve_url;
use crate::output::Aggregate;
use std::fmt;
use url::Url;

/// Where to fetch a page from: a path (with optional query) or a URL.
///
/// Only path and query are honored when resolving; the authority always
/// comes from the configured endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve into a full request URL against `base`
    pub fn resolve(&self, base: &Url) -> Result<Url> {
        resolve_url(base, &self.0)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Locator {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Maximum number of resources a walk returns. Zero means no limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchLimit(usize);

impl FetchLimit {
    /// Fetch every page
    pub const UNBOUNDED: Self = Self(0);

    pub const fn new(limit: usize) -> Self {
        Self(limit)
    }

    /// The limit, or `None` when unbounded
    pub fn get(self) -> Option<usize> {
        (self.0 > 0).then_some(self.0)
    }

    pub fn is_unbounded(self) -> bool {
        self.0 == 0
    }

    /// Check if `count` collected resources already meet the limit
    pub fn is_satisfied_by(self, count: usize) -> bool {
        self.get().is_some_and(|limit| count >= limit)
    }
}

impl From<usize> for FetchLimit {
    fn from(limit: usize) -> Self {
        Self(limit)
    }
}

impl fmt::Display for FetchLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(limit) => write!(f, "{limit}"),
            None => f.write_str("unbounded"),
        }
    }
}

/// State of a walk
#[derive(Debug)]
pub enum WalkState {
    /// The page at this locator is the next one to fetch
    Fetching(Locator),
    /// Chain exhausted or limit met
    Done,
    /// A page failed; the whole walk fails with this error
    Failed(Error),
}

impl WalkState {
    /// Initial state of a walk
    pub fn start(locator: impl Into<Locator>) -> Self {
        Self::Fetching(locator.into())
    }

    /// Transition after one fetch-and-decode cycle.
    ///
    /// On success the page's resources are appended to `aggregate` in order.
    /// A present `next` is only followed while the limit is unmet, so a page
    /// that is not needed is never requested.
    pub fn advance(outcome: Result<Page>, aggregate: &mut Aggregate, limit: FetchLimit) -> Self {
        let Page {
            resources, next, ..
        } = match outcome {
            Ok(page) => page,
            Err(err) => return Self::Failed(err),
        };

        aggregate.extend(resources);

        match next {
            None => Self::Done,
            Some(_) if limit.is_satisfied_by(aggregate.len()) => Self::Done,
            Some(locator) => Self::Fetching(locator),
        }
    }

    /// Check if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Fetching(_))
    }
}
