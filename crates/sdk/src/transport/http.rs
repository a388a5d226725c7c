//! HTTP request executor for the Ghost Admin API.

use crate::auth::AuthHeaders;
use crate::config::{ClientConfig, TrailingSlash};
use crate::error::{GhostError, GhostResult};
use crate::observer::{NoopObserver, RequestObserver};
use reqwest::{redirect, Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// HTTP verbs the admin API is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One call against the admin API.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// Endpoint relative to the admin root, optionally with a query string.
    pub path: String,
    pub method: Method,
    /// JSON body; ignored for DELETE.
    pub body: Option<Value>,
    /// Passive resource fetch; suppresses observer events.
    pub resource_read: bool,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            resource_read: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Mark this call as a resource read.
    pub fn as_resource(mut self) -> Self {
        self.resource_read = true;
        self
    }
}

/// Join `endpoint` onto `admin_root` with exactly one separator.
///
/// Leading and trailing slashes on the endpoint path are dropped, the
/// trailing slash policy is applied to the path, and any query string is
/// re-attached after it.
pub fn endpoint_url(admin_root: &str, endpoint: &str, method: Method, policy: TrailingSlash) -> String {
    let (path, query) = match endpoint.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (endpoint, None),
    };
    let path = path.trim_matches('/');

    let trailing = match policy {
        TrailingSlash::Always => true,
        TrailingSlash::Never => false,
        TrailingSlash::ReadsOnly => matches!(method, Method::Get | Method::Put),
    };

    let mut url = admin_root.trim_end_matches('/').to_string();
    if !path.is_empty() {
        url.push('/');
        url.push_str(path);
    }
    if trailing {
        url.push('/');
    }
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Executes authenticated requests and normalizes their outcome.
///
/// The underlying `reqwest::Client` pools connections; headers are set per
/// request so concurrent calls never share credentials.
#[derive(Clone)]
pub struct RequestExecutor {
    client: Client,
    config: Arc<ClientConfig>,
    observer: Arc<dyn RequestObserver>,
}

impl fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("admin_root", &self.config.admin_root())
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

impl RequestExecutor {
    /// Create a new executor with the given configuration and no observer.
    pub fn new(config: Arc<ClientConfig>) -> GhostResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(redirect::Policy::limited(10))
            .build()
            .map_err(|e| GhostError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            observer: Arc::new(NoopObserver),
        })
    }

    /// Replace the observer receiving per-request events.
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Resolve the absolute URL for an endpoint.
    pub fn build_url(&self, endpoint: &str, method: Method) -> String {
        endpoint_url(
            &self.config.admin_root(),
            endpoint,
            method,
            self.config.trailing_slash,
        )
    }

    /// Perform `spec` with `headers` and return the parsed JSON payload.
    ///
    /// A DELETE answered with 204 yields an empty object.
    pub async fn execute(&self, spec: &RequestSpec, headers: &AuthHeaders) -> GhostResult<Value> {
        let url = self.build_url(&spec.path, spec.method);
        debug!(url = %url, method = %spec.method, "Ghost admin request");

        let outcome = self.send(spec, &url, headers).await;

        match &outcome {
            Ok(_) if !spec.resource_read => self
                .observer
                .info(&format!("API request to {} successful", url)),
            Ok(_) => {}
            Err(e) => self.report_failure(spec, e),
        }

        outcome
    }

    /// Pass a failed call to the observer unless it is a resource read.
    pub(crate) fn report_failure(&self, spec: &RequestSpec, err: &GhostError) {
        if !spec.resource_read {
            self.observer.error(&err.to_string());
        }
    }

    async fn send(&self, spec: &RequestSpec, url: &str, headers: &AuthHeaders) -> GhostResult<Value> {
        let mut request: RequestBuilder = self
            .client
            .request(spec.method.into(), url)
            .headers(headers.to_header_map()?);

        if spec.method != Method::Delete {
            if let Some(ref body) = spec.body {
                request = request.json(body);
            }
        }

        let method = spec.method.as_str();
        let response = request
            .send()
            .await
            .map_err(|e| GhostError::transport(method, url, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GhostError::from_response(method, url, status.as_u16(), &body));
        }

        if spec.method == Method::Delete && status == StatusCode::NO_CONTENT {
            return Ok(Value::Object(serde_json::Map::new()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GhostError::transport(method, url, &e))?;
        serde_json::from_slice(&bytes).map_err(|e| GhostError::decode(method, url, e))
    }

    /// Unauthenticated GET returning status and body whatever the status.
    ///
    /// An existing admin route answers 401 here; a 404 means the base URL is
    /// wrong.
    pub async fn probe(&self, endpoint: &str) -> GhostResult<(u16, String)> {
        let url = self.build_url(endpoint, Method::Get);
        debug!(url = %url, "Ghost admin probe");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GhostError::transport("GET", &url, &e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GhostError::transport("GET", &url, &e))?;
        Ok((status, body))
    }
}
