// Diagnostics for routing and configuration problems

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, Tool};
use anyhow::Result;
use ghost_sdk::GhostClient;

/// Unauthenticated GET of the admin `site` endpoint.
///
/// A reachable admin API answers 200 or 401; 404 usually means the URL
/// points at the wrong host or path.
pub struct AdminSitePingTool {
    client: GhostClient,
}

impl AdminSitePingTool {
    pub fn new(client: GhostClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for AdminSitePingTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "admin_site_ping".to_string(),
            description: "Check that the Admin API is reachable at the configured URL (no authentication)."
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        let url = format!("{}/site/", self.client.config().admin_root());

        match self.client.probe_admin().await {
            Ok((status, body)) => Ok(CallToolResult::text(format!(
                "GET {}\nstatus={}\nbody={}",
                url, status, body
            ))),
            Err(e) => {
                tracing::warn!("admin_site_ping failed: {}", e);
                Ok(CallToolResult::error(format!("admin_site_ping failed: {}", e)))
            }
        }
    }
}

/// Echo the runtime configuration without the key secret.
pub struct ConfigEchoTool {
    client: GhostClient,
}

impl ConfigEchoTool {
    pub fn new(client: GhostClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ConfigEchoTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "config_echo".to_string(),
            description: "Show the Ghost URL, API version and key id in use.".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        let config = self.client.config();
        let echo = serde_json::json!({
            "url": config.base_url.as_str(),
            "version": config.api_version,
            "keyId": config.key_id().unwrap_or("unknown"),
            "trailingSlash": config.trailing_slash,
        });
        Ok(CallToolResult::text(serde_json::to_string_pretty(&echo)?))
    }
}
