//! Main client for the Ghost SDK.

use crate::api::*;
use crate::auth::{build_auth_headers_with_version, AuthHeaders};
use crate::config::{ClientConfig, TrailingSlash, DEFAULT_API_VERSION, DEFAULT_TIMEOUT};
use crate::error::{GhostError, GhostResult};
use crate::observer::RequestObserver;
use crate::transport::{RequestExecutor, RequestSpec};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the Ghost Admin API.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GhostClient {
    config: Arc<ClientConfig>,
    pub(crate) http: RequestExecutor,
}

impl GhostClient {
    /// Create a new client builder.
    pub fn builder() -> GhostClientBuilder {
        GhostClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> GhostResult<Self> {
        let config = Arc::new(config);
        let http = RequestExecutor::new(config.clone())?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Mint a fresh token and wrap it in request headers.
    pub fn auth_headers(&self) -> GhostResult<AuthHeaders> {
        build_auth_headers_with_version(&self.config.admin_api_key, &self.config.api_version)
    }

    /// Authenticate and execute one request.
    ///
    /// A new token is minted for every call; a malformed key fails here
    /// before anything is sent and is reported to the observer like any
    /// other failed call.
    pub async fn invoke(&self, spec: &RequestSpec) -> GhostResult<Value> {
        let headers = match self.auth_headers() {
            Ok(headers) => headers,
            Err(e) => {
                self.http.report_failure(spec, &e);
                return Err(e);
            }
        };
        self.http.execute(spec, &headers).await
    }

    /// Unauthenticated GET of the admin `site` endpoint.
    pub async fn probe_admin(&self) -> GhostResult<(u16, String)> {
        self.http.probe("site").await
    }

    /// Get the posts API.
    pub fn posts(&self) -> PostsApi<'_> {
        PostsApi::new(self)
    }

    /// Get the members API.
    pub fn members(&self) -> CollectionApi<'_> {
        CollectionApi::new(self, "members").with_include("newsletters,subscriptions")
    }

    /// Get the staff users API.
    pub fn users(&self) -> CollectionApi<'_> {
        CollectionApi::new(self, "users").with_include("roles")
    }

    /// Get the tiers API.
    pub fn tiers(&self) -> CollectionApi<'_> {
        CollectionApi::new(self, "tiers").with_include("monthly_price,yearly_price,benefits")
    }

    /// Get the offers API.
    pub fn offers(&self) -> CollectionApi<'_> {
        CollectionApi::new(self, "offers")
    }

    /// Get the newsletters API.
    pub fn newsletters(&self) -> CollectionApi<'_> {
        CollectionApi::new(self, "newsletters")
    }

    /// Get the tags API.
    pub fn tags(&self) -> CollectionApi<'_> {
        CollectionApi::new(self, "tags")
    }

    /// Get the staff roles API.
    pub fn roles(&self) -> CollectionApi<'_> {
        CollectionApi::new(self, "roles")
    }

    /// Get the webhooks API. Ghost only supports add, edit and delete here.
    pub fn webhooks(&self) -> CollectionApi<'_> {
        CollectionApi::new(self, "webhooks")
    }

    /// Get the staff invites API.
    pub fn invites(&self) -> CollectionApi<'_> {
        CollectionApi::new(self, "invites")
    }

    /// Get the site API.
    pub fn site(&self) -> SiteApi<'_> {
        SiteApi::new(self)
    }
}

/// Builder for creating a GhostClient.
pub struct GhostClientBuilder {
    base_url: Option<String>,
    admin_api_key: Option<String>,
    api_version: String,
    timeout: Duration,
    trailing_slash: TrailingSlash,
    observer: Option<Arc<dyn RequestObserver>>,
}

impl GhostClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            admin_api_key: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            trailing_slash: TrailingSlash::default(),
            observer: None,
        }
    }

    /// Set the site URL of the Ghost installation.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the admin API key (`id:secret`).
    pub fn admin_api_key(mut self, key: impl Into<String>) -> Self {
        self.admin_api_key = Some(key.into());
        self
    }

    /// Set the `Accept-Version` header value.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the trailing slash policy.
    pub fn trailing_slash(mut self, policy: TrailingSlash) -> Self {
        self.trailing_slash = policy;
        self
    }

    /// Set the observer receiving per-request events.
    pub fn observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the client.
    ///
    /// The admin key is only checked for presence; its format is validated
    /// when the first token is minted.
    pub fn build(self) -> GhostResult<GhostClient> {
        let base_url_str = self
            .base_url
            .ok_or_else(|| GhostError::Config("base_url is required".to_string()))?;
        let admin_api_key = self
            .admin_api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GhostError::Config("admin_api_key is required".to_string()))?;

        let base_url = Url::parse(base_url_str.trim())?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(GhostError::Config(format!(
                "base_url must be http or https, got {}",
                base_url.scheme()
            )));
        }

        let config = ClientConfig {
            base_url,
            admin_api_key: admin_api_key.trim().to_string(),
            api_version: self.api_version,
            timeout: self.timeout,
            trailing_slash: self.trailing_slash,
        };

        let mut client = GhostClient::from_config(config)?;
        if let Some(observer) = self.observer {
            client.http = client.http.with_observer(observer);
        }
        Ok(client)
    }
}

impl Default for GhostClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const KEY: &str = "abc123:48656c6c6f";

    #[test]
    fn test_builder_requires_base_url() {
        let result = GhostClient::builder().admin_api_key(KEY).build();
        assert!(matches!(result, Err(GhostError::Config(_))));
    }

    #[test]
    fn test_builder_requires_admin_key() {
        let result = GhostClient::builder()
            .base_url("https://blog.example.com")
            .admin_api_key("  ")
            .build();
        assert!(matches!(result, Err(GhostError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_bad_urls() {
        let result = GhostClient::builder()
            .base_url("not a url")
            .admin_api_key(KEY)
            .build();
        assert!(matches!(result, Err(GhostError::InvalidUrl(_))));

        let result = GhostClient::builder()
            .base_url("ftp://blog.example.com")
            .admin_api_key(KEY)
            .build();
        assert!(matches!(result, Err(GhostError::Config(_))));
    }

    #[test]
    fn test_builder_defers_key_validation() {
        let client = GhostClient::builder()
            .base_url("https://blog.example.com")
            .admin_api_key("not-a-key")
            .build()
            .unwrap();

        assert!(matches!(
            client.auth_headers(),
            Err(GhostError::InvalidCredentialFormat(_))
        ));
    }

    #[test]
    fn test_auth_headers_use_configured_version() {
        let client = GhostClient::builder()
            .base_url("https://blog.example.com")
            .admin_api_key(KEY)
            .api_version("v6.0")
            .build()
            .unwrap();

        let headers = client.auth_headers().unwrap();
        assert_eq!(headers.accept_version, "v6.0");
        assert!(headers.authorization.starts_with("Ghost "));
    }

    #[tokio::test]
    async fn test_invoke_end_to_end() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ghost/api/admin/posts/1/"))
            .and(header("accept-version", "v5.0"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"posts": [{"id": "1"}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = GhostClient::builder()
            .base_url(server.uri())
            .admin_api_key(KEY)
            .build()
            .unwrap();

        let result = client.invoke(&RequestSpec::get("posts/1")).await.unwrap();
        assert_eq!(result, serde_json::json!({"posts": [{"id": "1"}]}));
    }

    #[tokio::test]
    async fn test_invoke_with_malformed_key_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let client = GhostClient::builder()
            .base_url(server.uri())
            .admin_api_key("abc123:zz")
            .build()
            .unwrap();

        let err = client.invoke(&RequestSpec::get("posts")).await.unwrap_err();
        assert!(matches!(err, GhostError::InvalidCredentialFormat(_)));
    }

    #[derive(Default)]
    struct ErrorLog(std::sync::Mutex<Vec<String>>);

    impl RequestObserver for ErrorLog {
        fn info(&self, _message: &str) {}
        fn debug(&self, _message: &str) {}
        fn error(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    #[tokio::test]
    async fn test_malformed_key_is_reported_to_observer() {
        let log = Arc::new(ErrorLog::default());
        let client = GhostClient::builder()
            .base_url("https://blog.example.com")
            .admin_api_key("no-colon")
            .observer(log.clone())
            .build()
            .unwrap();

        client.invoke(&RequestSpec::get("posts")).await.unwrap_err();
        client
            .invoke(&RequestSpec::get("posts/1").as_resource())
            .await
            .unwrap_err();

        let errors = log.0.lock().unwrap().clone();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Invalid admin API key"));
    }

    #[tokio::test]
    async fn test_concurrent_invocations_are_independent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ghost/api/admin/posts/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"posts": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ghost/api/admin/tags/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = GhostClient::builder()
            .base_url(server.uri())
            .admin_api_key(KEY)
            .build()
            .unwrap();

        let posts = RequestSpec::get("posts");
        let tags = RequestSpec::get("tags");
        let (ok, failed) = tokio::join!(client.invoke(&posts), client.invoke(&tags));

        assert!(ok.is_ok());
        assert!(matches!(failed, Err(GhostError::Api(_))));
    }
}
