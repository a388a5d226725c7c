//! Site API endpoint.

use crate::client::GhostClient;
use crate::error::GhostResult;
use crate::transport::RequestSpec;
use serde_json::Value;

/// Site API for publication metadata.
pub struct SiteApi<'a> {
    client: &'a GhostClient,
}

impl<'a> SiteApi<'a> {
    pub(crate) fn new(client: &'a GhostClient) -> Self {
        Self { client }
    }

    /// Read title, description, URL and version of the site.
    pub async fn read(&self) -> GhostResult<Value> {
        self.client.invoke(&RequestSpec::get("site/")).await
    }
}
