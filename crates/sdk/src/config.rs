//! Configuration types for the Ghost SDK.

use crate::error::GhostError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Accept-Version header value sent with every admin request.
pub const DEFAULT_API_VERSION: &str = "v5.0";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Ghost client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site URL of the Ghost installation (without `/ghost/api/admin`).
    pub base_url: Url,
    /// Admin API key in `id:hex_secret` form.
    pub admin_api_key: String,
    /// Value of the `Accept-Version` header.
    pub api_version: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Trailing slash convention for endpoint paths.
    pub trailing_slash: TrailingSlash,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL and key.
    pub fn new(base_url: Url, admin_api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            admin_api_key: admin_api_key.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            trailing_slash: TrailingSlash::default(),
        }
    }

    /// The admin API root: base URL without trailing slashes plus `/ghost/api/admin`.
    pub fn admin_root(&self) -> String {
        format!("{}/ghost/api/admin", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Key identifier half of the admin key, safe to display.
    pub fn key_id(&self) -> Option<&str> {
        self.admin_api_key
            .split_once(':')
            .map(|(id, _)| id)
            .filter(|id| !id.is_empty())
    }
}

/// Which requests get a trailing slash appended to the endpoint path.
///
/// Current Ghost releases want one everywhere. Older releases accepted it
/// on GET/PUT and rejected it on POST/DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrailingSlash {
    #[default]
    Always,
    Never,
    ReadsOnly,
}

impl FromStr for TrailingSlash {
    type Err = GhostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            "reads-only" | "reads_only" => Ok(Self::ReadsOnly),
            other => Err(GhostError::Config(format!(
                "unknown trailing slash policy '{}', expected always, never or reads-only",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> ClientConfig {
        ClientConfig::new(Url::parse(base).unwrap(), "abc123:48656c6c6f")
    }

    #[test]
    fn test_client_config_defaults() {
        let config = config("https://blog.example.com");

        assert_eq!(config.api_version, "v5.0");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.trailing_slash, TrailingSlash::Always);
    }

    #[test]
    fn test_admin_root_strips_trailing_slashes() {
        assert_eq!(
            config("https://blog.example.com").admin_root(),
            "https://blog.example.com/ghost/api/admin"
        );
        assert_eq!(
            config("https://blog.example.com/").admin_root(),
            "https://blog.example.com/ghost/api/admin"
        );
        assert_eq!(
            config("https://example.com/blog//").admin_root(),
            "https://example.com/blog/ghost/api/admin"
        );
    }

    #[test]
    fn test_key_id() {
        assert_eq!(config("https://blog.example.com").key_id(), Some("abc123"));

        let mut no_colon = config("https://blog.example.com");
        no_colon.admin_api_key = "garbage".to_string();
        assert_eq!(no_colon.key_id(), None);
    }

    #[test]
    fn test_trailing_slash_from_str() {
        assert_eq!("always".parse::<TrailingSlash>().unwrap(), TrailingSlash::Always);
        assert_eq!("Never".parse::<TrailingSlash>().unwrap(), TrailingSlash::Never);
        assert_eq!("reads-only".parse::<TrailingSlash>().unwrap(), TrailingSlash::ReadsOnly);
        assert!("sometimes".parse::<TrailingSlash>().is_err());
    }
}
