//! Request URL construction
//!
//! Paths handed to the client (and `next` links handed back by the server)
//! are resolved against the fixed CC endpoint. Only path and query of the
//! input are honored; scheme, host and port always come from the endpoint,
//! and the endpoint's own path prefix is kept (once).

use crate::error::{Error, Result};
use url::{ParseError, Url};

/// Resolve a path, path+query, or absolute URL against `base`.
///
/// Fails with `Error::InvalidRequest` before anything touches the network.
pub fn resolve_url(base: &Url, locator: &str) -> Result<Url> {
    validate_locator(locator)?;

    let target = match Url::parse(locator) {
        Ok(url) if url.has_host() => url,
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => scratch_base()?
            .join(locator)
            .map_err(|e| Error::invalid_request(format!("Invalid path '{locator}': {e}")))?,
        Err(e) => {
            return Err(Error::invalid_request(format!(
                "Invalid path '{locator}': {e}"
            )))
        }
    };

    // next links from a prefixed endpoint already carry the prefix
    let prefix = base.path().trim_end_matches('/');
    let path = target.path();
    let mut url = base.clone();
    if prefix.is_empty() || path.starts_with(&format!("{prefix}/")) {
        url.set_path(path);
    } else {
        url.set_path(&format!("{prefix}{path}"));
    }
    url.set_query(target.query());
    url.set_fragment(None);
    Ok(url)
}

/// Parse an endpoint URL from configuration
pub fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint)
        .map_err(|e| Error::config(format!("Invalid endpoint '{endpoint}': {e}")))?;
    if url.cannot_be_a_base() || !url.has_host() {
        return Err(Error::config(format!(
            "Endpoint '{endpoint}' is not a base URL"
        )));
    }
    Ok(url)
}

fn scratch_base() -> Result<Url> {
    Url::parse("http://locator.invalid/")
        .map_err(|e| Error::invalid_request(format!("Failed to build base URL: {e}")))
}

/// Reject what a strict URL parser would reject: stray `%`, whitespace and
/// control characters.
fn validate_locator(locator: &str) -> Result<()> {
    let bytes = locator.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return Err(Error::invalid_request(format!(
                    "Invalid URL escape in '{locator}'"
                )));
            }
            i += 3;
            continue;
        }
        if b.is_ascii_control() || b.is_ascii_whitespace() {
            return Err(Error::invalid_request(format!(
                "Invalid character in '{locator}'"
            )));
        }
        i += 1;
    }

    Ok(())
}
