//! Page type produced by the envelope decoder

use crate::pagination::Locator;
use crate::types::Resource;

/// One decoded page of a collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Resources in the order the server returned them
    pub resources: Vec<Resource>,
    /// Where the next page lives, `None` on the last page
    pub next: Option<Locator>,
    /// Collection size as reported by the server, if present
    pub total_results: Option<u64>,
}

impl Page {
    /// Create a page
    pub fn new(resources: Vec<Resource>, next: Option<Locator>) -> Self {
        Self {
            resources,
            next,
            total_results: None,
        }
    }

    /// Check if this is the last page
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
