//! Common types used throughout the ccapi client
//!
//! This module contains shared type aliases and the decoded resource models
//! returned by the typed helpers on [`crate::client::CcClient`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One opaque resource as returned by a collection endpoint.
///
/// The pagination core never looks inside it.
pub type Resource = JsonValue;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method used by a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Resource Models
// ============================================================================

/// Globally unique identifier of a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(pub String);

impl Guid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Guid {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Desired run state of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DesiredState {
    Started,
    #[default]
    Stopped,
}

/// Lifecycle-specific settings (buildpack and stack)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LifecycleData {
    #[serde(default)]
    pub buildpack: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
}

/// How an application is staged and run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Lifecycle {
    /// Lifecycle type, e.g. "buildpack" or "docker"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: LifecycleData,
}

/// Hypermedia link attached to a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// An application record from the `apps` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub guid: Guid,
    pub name: String,
    #[serde(default)]
    pub desired_state: DesiredState,
    #[serde(default)]
    pub total_desired_instances: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lifecycle: Lifecycle,
    #[serde(default)]
    pub environment_variables: JsonObject,
    #[serde(default)]
    pub links: HashMap<String, Link>,
    /// Side-loaded related resources, kept undecoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<JsonValue>,
}

impl Application {
    /// Check if the application is meant to be running
    pub fn is_started(&self) -> bool {
        self.desired_state == DesiredState::Started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_application_deserialize() {
        let app: Application = serde_json::from_value(json!({
            "guid": "guid-13552bb6-a866-4e2c-9d47-c2bccc4c35a1",
            "name": "my_app3",
            "desired_state": "STOPPED",
            "total_desired_instances": 0,
            "created_at": "1970-01-01T00:00:03Z",
            "updated_at": null,
            "lifecycle": {
                "type": "buildpack",
                "data": {
                    "buildpack": "name-606",
                    "stack": "name-607"
                }
            },
            "environment_variables": {
                "magic": "beautiful"
            },
            "links": {}
        }))
        .unwrap();

        assert_eq!(app.guid.as_str(), "guid-13552bb6-a866-4e2c-9d47-c2bccc4c35a1");
        assert_eq!(app.name, "my_app3");
        assert_eq!(app.desired_state, DesiredState::Stopped);
        assert!(!app.is_started());
        assert_eq!(app.created_at.timestamp(), 3);
        assert!(app.updated_at.is_none());
        assert_eq!(app.lifecycle.kind, "buildpack");
        assert_eq!(app.lifecycle.data.stack.as_deref(), Some("name-607"));
        assert_eq!(app.environment_variables["magic"], "beautiful");
        assert!(app.links.is_empty());
    }

    #[test]
    fn test_application_links() {
        let app: Application = serde_json::from_value(json!({
            "guid": "app-1",
            "name": "web",
            "desired_state": "STARTED",
            "created_at": "2015-12-22T18:28:11Z",
            "lifecycle": {"type": "docker"},
            "links": {
                "self": {"href": "/v3/apps/app-1"},
                "start": {"href": "/v3/apps/app-1/start", "method": "PUT"}
            }
        }))
        .unwrap();

        assert!(app.is_started());
        assert_eq!(app.links["self"].href, "/v3/apps/app-1");
        assert_eq!(app.links["start"].method.as_deref(), Some("PUT"));
    }

    #[test]
    fn test_guid_display() {
        let guid = Guid::from("abc");
        assert_eq!(guid.to_string(), "abc");
        assert_eq!(serde_json::to_string(&guid).unwrap(), "\"abc\"");
    }
}
