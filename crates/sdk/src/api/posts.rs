//! Posts API endpoints.

use super::{envelope, segment, with_query, BrowseParams};
use crate::client::GhostClient;
use crate::error::{GhostError, GhostResult};
use crate::transport::RequestSpec;
use serde_json::Value;

const POST_INCLUDE: &str = "tags,authors";

/// Posts API for reading and authoring posts.
pub struct PostsApi<'a> {
    client: &'a GhostClient,
}

impl<'a> PostsApi<'a> {
    pub(crate) fn new(client: &'a GhostClient) -> Self {
        Self { client }
    }

    /// Browse posts; tags and authors are embedded unless `params.include` says otherwise.
    pub async fn list(&self, params: &BrowseParams) -> GhostResult<Value> {
        let mut params = params.clone();
        if params.include.is_none() {
            params.include = Some(POST_INCLUDE.to_string());
        }
        let path = with_query("posts/", &params.query_string());
        self.client.invoke(&RequestSpec::get(path)).await
    }

    /// Read a post by ID.
    pub async fn read(&self, id: &str) -> GhostResult<Value> {
        let path = format!(
            "posts/{}/?include={}&formats=html,plaintext",
            segment(id),
            segment(POST_INCLUDE)
        );
        self.client.invoke(&RequestSpec::get(path)).await
    }

    /// Find posts whose title contains `query`, or equals it when `exact`.
    pub async fn search_by_title(&self, query: &str, exact: bool, limit: u32) -> GhostResult<Value> {
        self.list(
            &BrowseParams::new()
                .filter(title_filter(query, exact))
                .limit(limit),
        )
        .await
    }

    /// Add a post. An `html` field makes Ghost convert it with `source=html`.
    pub async fn create(&self, post: Value) -> GhostResult<Value> {
        let path = if has_html(&post) {
            "posts/?source=html"
        } else {
            "posts/"
        };
        self.client
            .invoke(&RequestSpec::post(path, envelope("posts", post)))
            .await
    }

    /// Edit a post.
    ///
    /// Ghost rejects edits without the current `updated_at`; when `changes`
    /// lacks it the post is read first and its timestamp is carried over.
    pub async fn update(&self, id: &str, changes: Value) -> GhostResult<Value> {
        let mut changes = match changes {
            Value::Object(map) => map,
            _ => {
                return Err(GhostError::Api(
                    "post changes must be a JSON object".to_string(),
                ))
            }
        };

        if !changes.contains_key("updated_at") {
            let current = self.read(id).await?;
            let updated_at = current["posts"][0]["updated_at"].clone();
            if updated_at.is_null() {
                return Err(GhostError::Api(format!(
                    "post {} has no updated_at in the upstream response",
                    id
                )));
            }
            changes.insert("updated_at".to_string(), updated_at);
        }

        let changes = Value::Object(changes);
        let base = format!("posts/{}/", segment(id));
        let path = if has_html(&changes) {
            format!("{}?source=html", base)
        } else {
            base
        };
        self.client
            .invoke(&RequestSpec::put(path, envelope("posts", changes)))
            .await
    }

    /// Delete a post; Ghost answers 204 and this yields `{}`.
    pub async fn delete(&self, id: &str) -> GhostResult<Value> {
        self.client
            .invoke(&RequestSpec::delete(format!("posts/{}/", segment(id))))
            .await
    }
}

fn has_html(post: &Value) -> bool {
    post.get("html").map_or(false, |html| !html.is_null())
}

/// NQL filter on the title; `~` is Ghost's "contains" operator.
pub(crate) fn title_filter(query: &str, exact: bool) -> String {
    let escaped = query.replace('\\', "\\\\").replace('\'', "\\'");
    if exact {
        format!("title:'{}'", escaped)
    } else {
        format!("title:~'{}'", escaped)
    }
}
