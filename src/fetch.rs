// Outbound HTTP GET proxy
//
// One request per invocation, 10 second timeout, no retries. The target
// API is expected to wrap its payload as {"data": ...}; anything else is
// reported as an error.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::error::{ProxyError, Result};

/// Client-side timeout for every outbound request.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the shared HTTP client. Called once at startup.
pub fn client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()
}

/// Issue a single GET to `uri` with `params` as query parameters and
/// `headers` as extra request headers, and extract the `data` field from
/// the JSON response body.
pub async fn send_get(
    client: &reqwest::Client,
    uri: &str,
    params: &HashMap<String, Value>,
    headers: Option<&HashMap<String, String>>,
) -> Result<String> {
    let url = Url::parse(uri)?;

    let query: Vec<(&str, String)> = params
        .iter()
        .map(|(k, v)| (k.as_str(), scalar_string(v)))
        .collect();

    let mut header_map = HeaderMap::new();
    if let Some(extra) = headers {
        for (name, value) in extra {
            let parsed_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ProxyError::HeaderName { name: name.clone() })?;
            let parsed_value = HeaderValue::from_str(value)
                .map_err(|_| ProxyError::HeaderValue { name: name.clone() })?;
            header_map.insert(parsed_name, parsed_value);
        }
    }

    tracing::debug!(uri = %url, "sending GET request");

    let response = client
        .get(url.as_str())
        .query(&query)
        .headers(header_map)
        .send()
        .await?
        .error_for_status()?;

    let body: Value = response.json().await?;
    match body.get("data") {
        Some(data) => Ok(data.to_string()),
        None => Err(ProxyError::MissingData {
            body: body.to_string(),
        }),
    }
}

/// Render a JSON value as a query-parameter string. Strings are passed
/// through raw; everything else keeps its JSON encoding.
fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
