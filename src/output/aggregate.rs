//! Result aggregation

use crate::error::{Error, Result};
use crate::pagination::FetchLimit;
use crate::types::Resource;
use bytes::Bytes;

/// Resources collected over a walk, in page order then server order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    resources: Vec<Resource>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page's resources, keeping their order
    pub fn extend(&mut self, resources: impl IntoIterator<Item = Resource>) {
        self.resources.extend(resources);
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn as_slice(&self) -> &[Resource] {
        &self.resources
    }

    /// Drop everything past the limit. Only the tail is ever removed.
    pub fn truncate(&mut self, limit: FetchLimit) {
        if let Some(limit) = limit.get() {
            self.resources.truncate(limit);
        }
    }

    /// Truncate and hand over the resources
    pub fn finish(mut self, limit: FetchLimit) -> Vec<Resource> {
        self.truncate(limit);
        self.resources
    }

    /// Encode as a JSON array
    pub fn to_json_bytes(&self) -> Result<Bytes> {
        encode_resources(&self.resources)
    }
}

/// Encode resources as one JSON array payload (`[]` when empty)
pub fn encode_resources(resources: &[Resource]) -> Result<Bytes> {
    serde_json::to_vec(resources)
        .map(Bytes::from)
        .map_err(|e| Error::encode(e.to_string()))
}
