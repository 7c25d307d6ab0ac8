//! Authenticated request gateway
//!
//! Every API call goes through [`Gateway::request`]: it attaches the bearer
//! credential when the session holds one, serializes the body, and turns the
//! response into either the decoded JSON payload or a [`RequestFailed`].

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

use crate::error::{RequestFailed, Result};
use crate::session::Session;

/// Body of an outgoing request, resolved once at the call boundary
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Already serialized, sent as-is
    Raw(String),
    /// Serialized to a JSON string before sending
    Structured(Value),
}

impl RequestBody {
    pub fn into_payload(self) -> Result<String> {
        match self {
            RequestBody::Raw(s) => Ok(s),
            RequestBody::Structured(v) => serde_json::to_string(&v)
                .map_err(|e| RequestFailed::new(format!("Failed to encode request body: {}", e))),
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Structured(value)
    }
}

impl From<String> for RequestBody {
    fn from(raw: String) -> Self {
        RequestBody::Raw(raw)
    }
}

impl From<&str> for RequestBody {
    fn from(raw: &str) -> Self {
        RequestBody::Raw(raw.to_string())
    }
}

/// One call against the API: endpoint, method, body and header overrides
#[derive(Debug, Clone, Default)]
pub struct RequestDescriptor {
    pub endpoint: String,
    pub method: Method,
    pub body: Option<RequestBody>,
    pub headers: HeaderMap,
}

impl RequestDescriptor {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Clone)]
pub struct Gateway {
    http_client: Client,
    base_url: String,
    session: Session,
}

impl Gateway {
    /// Create a gateway against `base_url`. No timeout is applied unless one is given.
    pub fn new(base_url: impl Into<String>, session: Session, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("invoice-desk/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub(crate) fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn build_headers(overrides: &HeaderMap, credential: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        for (name, value) in overrides {
            headers.insert(name.clone(), value.clone());
        }
        if let Some(token) = credential {
            headers.insert(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| RequestFailed::new(format!("Invalid credential: {}", e)))?,
            );
        }
        Ok(headers)
    }

    /// Dispatch a request and decode its JSON response
    pub async fn request(&self, descriptor: RequestDescriptor) -> Result<Value> {
        let RequestDescriptor {
            endpoint,
            method,
            body,
            headers: overrides,
        } = descriptor;

        let credential = self.session.credential()?;
        let headers = Self::build_headers(&overrides, credential.as_deref())?;

        tracing::debug!(
            "{} {} (authenticated: {})",
            method,
            endpoint,
            credential.is_some()
        );

        let mut request = self
            .http_client
            .request(method.clone(), self.url(&endpoint))
            .headers(headers);
        if let Some(body) = body {
            request = request.body(body.into_payload()?);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        // Decoded regardless of status; an unparseable body is itself a failure
        let data: Value = serde_json::from_str(&text).map_err(|e| {
            tracing::debug!("{} {} returned undecodable body: {}", method, endpoint, e);
            RequestFailed::with_status(format!("Invalid JSON response: {}", e), status.as_u16())
        })?;

        if !status.is_success() {
            tracing::debug!("{} {} failed with {}", method, endpoint, status);
            return Err(RequestFailed::from_body(status.as_u16(), &data));
        }

        Ok(data)
    }
}
