//! Client configuration
//!
//! Loaded from a YAML file, a YAML string, or `CCAPI_*` environment
//! variables.
//!
//! ```yaml
//! cc_endpoint: https://api.example.com
//! uaa_endpoint: https://uaa.example.com
//! token: bearer eyJhbGciOi...
//! refresh_token: eyJhbGciOi...
//! http:
//!   timeout_seconds: 30
//! ```

use crate::auth::DEFAULT_CLIENT_ID;
use crate::error::{Error, Result};
use crate::http::{parse_endpoint, HttpClientConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const ENV_CC_ENDPOINT: &str = "CCAPI_ENDPOINT";
pub const ENV_UAA_ENDPOINT: &str = "CCAPI_UAA_ENDPOINT";
pub const ENV_TOKEN: &str = "CCAPI_TOKEN";
pub const ENV_REFRESH_TOKEN: &str = "CCAPI_REFRESH_TOKEN";
pub const ENV_TIMEOUT_SECONDS: &str = "CCAPI_TIMEOUT_SECONDS";

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Everything needed to build a [`crate::CcClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Cloud Controller base URL
    pub cc_endpoint: String,

    /// UAA base URL, only needed for token refresh
    #[serde(default)]
    pub uaa_endpoint: Option<String>,

    /// `Authorization` header value, e.g. "bearer eyJ..."
    #[serde(default)]
    pub token: Option<String>,

    /// Refresh token for the UAA refresh grant
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// OAuth client id for the refresh grant
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// OAuth client secret for the refresh grant
    #[serde(default)]
    pub client_secret: String,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_client_id() -> String {
    DEFAULT_CLIENT_ID.to_string()
}

impl ClientConfig {
    /// Create a config with just a CC endpoint
    pub fn new(cc_endpoint: impl Into<String>) -> Self {
        Self {
            cc_endpoint: cc_endpoint.into(),
            uaa_endpoint: None,
            token: None,
            refresh_token: None,
            client_id: default_client_id(),
            client_secret: String::new(),
            http: HttpConfig::default(),
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config(format!("Config file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Build from `CCAPI_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, test maps, ...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let cc_endpoint = lookup(ENV_CC_ENDPOINT).ok_or_else(|| Error::missing_field(ENV_CC_ENDPOINT))?;

        let mut config = Self::new(cc_endpoint);
        config.apply_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: &dyn Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(endpoint) = lookup(ENV_CC_ENDPOINT) {
            self.cc_endpoint = endpoint;
        }
        if let Some(endpoint) = lookup(ENV_UAA_ENDPOINT) {
            self.uaa_endpoint = Some(endpoint);
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(refresh_token) = lookup(ENV_REFRESH_TOKEN) {
            self.refresh_token = Some(refresh_token);
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECONDS) {
            self.http.timeout_seconds = timeout.parse().map_err(|_| Error::InvalidConfigValue {
                field: ENV_TIMEOUT_SECONDS.to_string(),
                message: format!("expected whole seconds, got '{timeout}'"),
            })?;
        }
        Ok(())
    }

    /// Check required fields and endpoint URLs
    pub fn validate(&self) -> Result<()> {
        if self.cc_endpoint.trim().is_empty() {
            return Err(Error::missing_field("cc_endpoint"));
        }
        parse_endpoint(&self.cc_endpoint)?;

        if let Some(uaa) = &self.uaa_endpoint {
            parse_endpoint(uaa)?;
        }

        if self.http.timeout_seconds == 0 {
            return Err(Error::InvalidConfigValue {
                field: "http.timeout_seconds".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}

impl HttpConfig {
    /// Build the transport configuration
    pub fn to_client_config(&self) -> HttpClientConfig {
        let mut builder =
            HttpClientConfig::builder().timeout(Duration::from_secs(self.timeout_seconds));

        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_from_yaml_full() {
        let config = ClientConfig::from_yaml_str(
            r"
cc_endpoint: https://api.example.com
uaa_endpoint: https://uaa.example.com
token: bearer abc
refresh_token: rt
http:
  timeout_seconds: 5
  user_agent: my-agent/1.0
  headers:
    X-Trace: enabled
",
        )
        .unwrap();

        assert_eq!(config.cc_endpoint, "https://api.example.com");
        assert_eq!(config.uaa_endpoint.as_deref(), Some("https://uaa.example.com"));
        assert_eq!(config.token.as_deref(), Some("bearer abc"));
        assert_eq!(config.refresh_token.as_deref(), Some("rt"));
        assert_eq!(config.client_id, "cf");
        assert_eq!(config.http.timeout_seconds, 5);

        let http = config.http.to_client_config();
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert_eq!(http.user_agent, "my-agent/1.0");
        assert_eq!(http.default_headers.get("X-Trace"), Some(&"enabled".to_string()));
    }

    #[test]
    fn test_from_yaml_minimal_defaults() {
        let config = ClientConfig::from_yaml_str("cc_endpoint: http://localhost:8080").unwrap();
        assert_eq!(config, ClientConfig::new("http://localhost:8080"));
        assert_eq!(config.http.timeout_seconds, 30);
    }

    #[test]
    fn test_from_yaml_missing_endpoint() {
        let err = ClientConfig::from_yaml_str("token: abc").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));

        let err = ClientConfig::from_yaml_str("cc_endpoint: ''").unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "cc_endpoint"));
    }

    #[test]
    fn test_from_yaml_invalid_endpoint() {
        let err = ClientConfig::from_yaml_str("cc_endpoint: not-a-url").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cc_endpoint: https://api.example.com").unwrap();
        writeln!(file, "token: bearer from-file").unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.token.as_deref(), Some("bearer from-file"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_CC_ENDPOINT, "https://api.example.com"),
            (ENV_UAA_ENDPOINT, "https://uaa.example.com"),
            (ENV_TOKEN, "bearer env"),
            (ENV_TIMEOUT_SECONDS, "12"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_string())).unwrap();

        assert_eq!(config.cc_endpoint, "https://api.example.com");
        assert_eq!(config.token.as_deref(), Some("bearer env"));
        assert_eq!(config.http.timeout_seconds, 12);
        assert!(config.refresh_token.is_none());
    }

    #[test]
    fn test_from_lookup_missing_endpoint() {
        let err = ClientConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == ENV_CC_ENDPOINT));
    }

    #[test]
    fn test_from_lookup_bad_timeout() {
        let err = ClientConfig::from_lookup(|k| match k {
            ENV_CC_ENDPOINT => Some("https://api.example.com".to_string()),
            ENV_TIMEOUT_SECONDS => Some("soon".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }
}
