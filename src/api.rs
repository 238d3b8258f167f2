// API client module: a small blocking HTTP client that talks to the ClickUp
// v2 REST API. One call per invocation, no retries.

use crate::error::{Error, Result};
use crate::request::ApiRequest;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.clickup.com/api/v2";
/// Overrides the base URL, e.g. to point at a local stub server.
pub const BASE_URL_ENV_VAR: &str = "CLICKUP_API_URL";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can perform a single API call. The real implementation is
/// [`ApiClient`]; tests substitute their own.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<Value>;
}

/// Holds a reqwest blocking client, the API base URL and the token sent in
/// the `Authorization` header.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    /// Create an ApiClient using `CLICKUP_API_URL` if set, otherwise the
    /// public ClickUp endpoint.
    pub fn from_env(token: &str) -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        Self::new(&base_url, token)
    }

    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// ClickUp takes the personal token as-is, without a `Bearer` scheme.
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&self.token)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

impl Transport for ApiClient {
    fn send(&self, request: &ApiRequest) -> Result<Value> {
        let url = request.url(&self.base_url);
        tracing::info!(method = %request.method, %url, "sending request");

        let mut req = self
            .client
            .request(request.method.clone(), &url)
            .headers(self.headers()?);
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let res = req.send()?;
        let status = res.status();
        let text = res.text()?;
        tracing::info!(status = status.as_u16(), bytes = text.len(), "received response");
        handle_response(status, &text)
    }
}

/// Translate a status and raw body into the command result.
///
/// Non-2xx statuses become [`Error::Http`] with the body pretty-printed as
/// JSON when it parses, or verbatim when it does not. A successful empty
/// body becomes `{"status": "success"}`.
pub fn handle_response(status: StatusCode, body: &str) -> Result<Value> {
    if !status.is_success() {
        return Err(Error::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            detail: error_detail(body),
        });
    }
    if body.trim().is_empty() {
        return Ok(json!({ "status": "success" }));
    }
    Ok(serde_json::from_str(body)?)
}

fn error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| body.to_string())
}
