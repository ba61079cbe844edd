//! HTTP utilities for statistics API communication

use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

/// Build the headers sent with every upstream request.
///
/// The API key goes into `Authorization` verbatim (no `Bearer` prefix).
pub fn api_key_header_map(api_key: &str) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    let mut key = HeaderValue::from_str(api_key)?;
    key.set_sensitive(true);
    h.insert(AUTHORIZATION, key);
    h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(h)
}
