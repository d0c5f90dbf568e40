//! Authenticated JSON transport over blocking reqwest

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::error::{FmError, Result};

pub const DEFAULT_API_URL: &str = "https://api.cloudbees.io";

/// Overall per-request timeout. There is no retry.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One call against the API, addressed by unencoded path segments.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|source| FmError::Encode {
            what: format!("request body for {}", self.path()),
            source,
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Slash-joined path, used for logging and error messages.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Whether this request changes server state.
    pub fn is_write(&self) -> bool {
        !matches!(self.method, Method::GET | Method::HEAD | Method::OPTIONS)
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path())
    }
}

/// Sends API requests and returns the decoded JSON body of a 2xx response.
///
/// Non-2xx responses must fail with [`FmError::Api`] carrying the status and
/// the raw body text. An empty 2xx body decodes to `Value::Null`.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<Value>;
}

/// Production transport: bearer token, JSON content type, fixed timeout.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    token: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { DEFAULT_API_URL } else { trimmed };
        let base_url = Url::parse(trimmed)
            .map_err(|e| FmError::validation(format!("invalid API URL '{trimmed}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FmError::validation(format!("invalid API URL '{trimmed}'")));
        }

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build().map_err(|source| {
            FmError::Transport { path: base_url.to_string(), source }
        })?;

        Ok(Self { client, base_url, token: token.to_string() })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FmError::validation(format!("invalid API URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(request.segments.iter());
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<Value> {
        let url = self.url_for(request)?;
        let path = request.path();
        debug!(method = %request.method, %url, "sending API request");

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            debug!(%path, body = %body, "request payload");
            builder = builder.json(body);
        }

        let response =
            builder.send().map_err(|source| FmError::Transport { path: path.clone(), source })?;
        let status = response.status();
        let text =
            response.text().map_err(|source| FmError::Transport { path: path.clone(), source })?;
        debug!(method = %request.method, %path, %status, "received API response");

        if !status.is_success() {
            return Err(FmError::Api { status: status.as_u16(), body: text });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|source| FmError::Decode { path, source })
    }
}
