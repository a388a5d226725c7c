//! Admin entities addressed by URI (`post://<id>`, `blog://info`, ...).
//!
//! Resource reads are flagged as such on the request so the observer
//! stays quiet; the payload is returned as pretty-printed JSON.

use crate::protocol::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use ghost_sdk::{GhostClient, GhostError, RequestSpec};
use thiserror::Error;

const JSON_MIME: &str = "application/json";

/// `scheme://{id}` templates and the admin collection each one reads from.
const TEMPLATES: &[(&str, &str, &str)] = &[
    ("user", "users", "roles"),
    ("member", "members", "newsletters,subscriptions"),
    ("tier", "tiers", "monthly_price,yearly_price,benefits"),
    ("offer", "offers", ""),
    ("newsletter", "newsletters", ""),
    ("post", "posts", "tags,authors"),
];

const BLOG_INFO: &str = "blog://info";

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Unknown resource URI: {0}")]
    UnknownUri(String),

    #[error("Resource URI {0} is missing an id")]
    MissingId(String),

    #[error("Invalid id in resource URI {0}")]
    InvalidId(String),

    #[error(transparent)]
    Ghost(#[from] GhostError),
}

impl ResourceError {
    /// URI problems are the caller's fault; everything else is upstream.
    pub fn is_invalid_params(&self) -> bool {
        !matches!(self, Self::Ghost(_))
    }
}

/// Static resources for `resources/list`.
pub fn list() -> Vec<Resource> {
    vec![Resource {
        uri: BLOG_INFO.to_string(),
        name: "Blog information".to_string(),
        description: "Title, description, URL and version of the Ghost site".to_string(),
        mime_type: JSON_MIME.to_string(),
    }]
}

/// Parameterized resources for `resources/templates/list`.
pub fn templates() -> Vec<ResourceTemplate> {
    TEMPLATES
        .iter()
        .map(|(scheme, collection, _)| ResourceTemplate {
            uri_template: format!("{}://{{{}_id}}", scheme, scheme),
            name: format!("Ghost {}", scheme),
            description: format!("A single {} from the admin {} collection", scheme, collection),
            mime_type: JSON_MIME.to_string(),
        })
        .collect()
}

/// Map a resource URI to the admin request that serves it.
pub fn resolve(uri: &str) -> Result<RequestSpec, ResourceError> {
    if uri == BLOG_INFO {
        return Ok(RequestSpec::get("site/").as_resource());
    }

    let (scheme, id) = uri
        .split_once("://")
        .ok_or_else(|| ResourceError::UnknownUri(uri.to_string()))?;
    let (_, collection, include) = TEMPLATES
        .iter()
        .find(|(s, _, _)| *s == scheme)
        .ok_or_else(|| ResourceError::UnknownUri(uri.to_string()))?;

    let id = id.trim_end_matches('/');
    if id.is_empty() {
        return Err(ResourceError::MissingId(uri.to_string()));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(ResourceError::InvalidId(uri.to_string()));
    }

    let path = if include.is_empty() {
        format!("{}/{}/", collection, id)
    } else {
        format!("{}/{}/?include={}", collection, id, include.replace(',', "%2C"))
    };
    Ok(RequestSpec::get(path).as_resource())
}

/// Read one resource through the authenticated client.
pub async fn read(client: &GhostClient, uri: &str) -> Result<ReadResourceResult, ResourceError> {
    let spec = resolve(uri)?;
    let payload = client.invoke(&spec).await?;
    let text = serde_json::to_string_pretty(&payload)
        .map_err(|e| GhostError::Api(format!("Error rendering resource {}: {}", uri, e)))?;

    Ok(ReadResourceResult {
        contents: vec![ResourceContents {
            uri: uri.to_string(),
            mime_type: JSON_MIME.to_string(),
            text,
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_resolve() {
        let spec = resolve("post://6489a0f1c2d3e4f5a6b7c8d9").unwrap();
        assert_eq!(spec.path, "posts/6489a0f1c2d3e4f5a6b7c8d9/?include=tags%2Cauthors");
        assert!(spec.resource_read);

        let spec = resolve("offer://o1").unwrap();
        assert_eq!(spec.path, "offers/o1/");

        let spec = resolve("blog://info").unwrap();
        assert_eq!(spec.path, "site/");
        assert!(spec.resource_read);
    }

    #[test]
    fn test_resolve_rejects_bad_uris() {
        assert!(matches!(resolve("webhook://w1"), Err(ResourceError::UnknownUri(_))));
        assert!(matches!(resolve("not a uri"), Err(ResourceError::UnknownUri(_))));
        assert!(matches!(resolve("user://"), Err(ResourceError::MissingId(_))));
        assert!(matches!(resolve("user://../site"), Err(ResourceError::InvalidId(_))));
        assert!(resolve("user://").unwrap_err().is_invalid_params());
    }

    #[test]
    fn test_templates_cover_entities() {
        let uris: Vec<String> = templates().into_iter().map(|t| t.uri_template).collect();
        assert!(uris.contains(&"user://{user_id}".to_string()));
        assert!(uris.contains(&"post://{post_id}".to_string()));
        assert_eq!(uris.len(), 6);
    }

    #[tokio::test]
    async fn test_read_returns_pretty_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ghost/api/admin/members/m1/"))
            .and(query_param("include", "newsletters,subscriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "members": [{"id": "m1", "email": "ada@example.com"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GhostClient::builder()
            .base_url(server.uri())
            .admin_api_key("abc123:48656c6c6f")
            .build()
            .unwrap();

        let result = read(&client, "member://m1").await.unwrap();
        let contents = &result.contents[0];
        assert_eq!(contents.uri, "member://m1");
        assert_eq!(contents.mime_type, "application/json");
        assert!(contents.text.contains("\n  \"members\""));
    }
}
