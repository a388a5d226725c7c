use anyhow::{bail, Context, Result};
use ghost_sdk::{GhostClient, RequestObserver, TrailingSlash, DEFAULT_API_VERSION};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub ghost: GhostConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GhostConfig {
    /// Site URL, e.g. `https://blog.example.com`
    #[serde(default)]
    pub api_url: Option<String>,

    /// Admin API key (`id:hex_secret`)
    #[serde(default)]
    pub admin_api_key: Option<String>,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub trailing_slash: TrailingSlash,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            admin_api_key: None,
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
            trailing_slash: TrailingSlash::default(),
        }
    }
}

/// Values given on the command line or through the environment; each one
/// wins over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub admin_api_key: Option<String>,
    pub api_version: Option<String>,
    pub timeout_secs: Option<u64>,
    pub trailing_slash: Option<TrailingSlash>,
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read configuration file {}", config_path.display()))?;
            toml::from_str(&content).context("Failed to parse configuration file")
        } else {
            tracing::debug!("Configuration file {} not found, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        let ghost = &mut self.ghost;
        if overrides.api_url.is_some() {
            ghost.api_url = overrides.api_url;
        }
        if overrides.admin_api_key.is_some() {
            ghost.admin_api_key = overrides.admin_api_key;
        }
        if let Some(version) = overrides.api_version {
            ghost.api_version = version;
        }
        if let Some(timeout) = overrides.timeout_secs {
            ghost.timeout_secs = timeout;
        }
        if let Some(policy) = overrides.trailing_slash {
            ghost.trailing_slash = policy;
        }
        self
    }

    /// Build the admin client. The key's format is checked on first use.
    pub fn build_client(&self, observer: Arc<dyn RequestObserver>) -> Result<GhostClient> {
        let ghost = &self.ghost;
        let Some(api_url) = ghost.api_url.as_deref().filter(|u| !u.trim().is_empty()) else {
            bail!("Ghost API URL is not set (use --api-url, GHOST_API_URL or [ghost].api_url)");
        };
        let Some(admin_api_key) = ghost.admin_api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            bail!("Ghost admin API key is not set (use --admin-api-key, GHOST_ADMIN_API_KEY or [ghost].admin_api_key)");
        };
        if ghost.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }

        GhostClient::builder()
            .base_url(api_url)
            .admin_api_key(admin_api_key)
            .api_version(ghost.api_version.clone())
            .timeout(Duration::from_secs(ghost.timeout_secs))
            .trailing_slash(ghost.trailing_slash)
            .observer(observer)
            .build()
            .context("Failed to create Ghost client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_sdk::NoopObserver;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::load(&dir.path().join("absent.toml")).unwrap();

        assert!(config.ghost.api_url.is_none());
        assert_eq!(config.ghost.api_version, "v5.0");
        assert_eq!(config.ghost.timeout_secs, 30);
        assert_eq!(config.ghost.trailing_slash, TrailingSlash::Always);
    }

    #[test]
    fn test_load_file_and_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[ghost]
api_url = "https://blog.example.com"
admin_api_key = "abc123:48656c6c6f"
trailing_slash = "reads-only"
"#
        )
        .unwrap();

        let config = ServerConfig::load(file.path()).unwrap().apply(Overrides {
            api_version: Some("v6.0".to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        });

        assert_eq!(config.ghost.api_url.as_deref(), Some("https://blog.example.com"));
        assert_eq!(config.ghost.trailing_slash, TrailingSlash::ReadsOnly);
        assert_eq!(config.ghost.api_version, "v6.0");
        assert_eq!(config.ghost.timeout_secs, 5);

        let client = config.build_client(Arc::new(NoopObserver)).unwrap();
        assert_eq!(client.config().api_version, "v6.0");
        assert_eq!(client.config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ghost\napi_url = ").unwrap();
        assert!(ServerConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_build_client_requires_url_and_key() {
        let config = ServerConfig::default();
        let err = config.build_client(Arc::new(NoopObserver)).unwrap_err();
        assert!(err.to_string().contains("GHOST_API_URL"));

        let config = ServerConfig::default().apply(Overrides {
            api_url: Some("https://blog.example.com".to_string()),
            ..Default::default()
        });
        let err = config.build_client(Arc::new(NoopObserver)).unwrap_err();
        assert!(err.to_string().contains("GHOST_ADMIN_API_KEY"));
    }
}
