// Post authoring and search tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::entities::{list_schema, required_string};
use crate::tools::format::{field, ghost_failure, joined_names, records, render_list, Card, ListArgs, OutputFormat};
use crate::tools::{
    json_schema_boolean, json_schema_enum, json_schema_integer, json_schema_object, json_schema_string, Tool,
};
use anyhow::{Context, Result};
use ghost_sdk::{BrowseParams, GhostClient};
use serde::Deserialize;
use serde_json::{Map, Value};

fn post_summary(post: &Value) -> String {
    Card::new()
        .line("Title", field(post, "title", "Untitled"))
        .line("Status", field(post, "status", "Unknown"))
        .line("URL", field(post, "url", "None"))
        .line("Published", field(post, "published_at", "Not published"))
        .line("Tags", joined_names(post, "tags", "None"))
        .line("ID", field(post, "id", "Unknown"))
        .render()
}

fn post_detail(post: &Value) -> String {
    let content = post
        .get("plaintext")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| post.get("html").and_then(Value::as_str))
        .unwrap_or("No content");
    let excerpt = match post.get("custom_excerpt").and_then(Value::as_str) {
        Some(excerpt) if !excerpt.is_empty() => excerpt.to_string(),
        _ => field(post, "excerpt", "No excerpt"),
    };

    Card::new()
        .line("Title", field(post, "title", "Untitled"))
        .line("Slug", field(post, "slug", "Unknown"))
        .line("Status", field(post, "status", "Unknown"))
        .line("URL", field(post, "url", "None"))
        .line("Excerpt", excerpt)
        .line("Published", field(post, "published_at", "Not published"))
        .line("Updated", field(post, "updated_at", "Unknown"))
        .line("Tags", joined_names(post, "tags", "None"))
        .line("Authors", joined_names(post, "authors", "Unknown"))
        .line("ID", field(post, "id", "Unknown"))
        .block(format!("\nContent:\n{}", content))
        .render()
}

fn first_post(payload: &Value) -> Option<&Value> {
    records(payload, "posts").first()
}

/// Tool to search posts by title
pub struct SearchPostsTool {
    client: GhostClient,
}

impl SearchPostsTool {
    pub fn new(client: GhostClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    exact: bool,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    limit: Option<u32>,
}

#[async_trait::async_trait]
impl Tool for SearchPostsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_posts_by_title".to_string(),
            description: "Search for posts by title.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "query": json_schema_string("The title or part of the title to search for"),
                    "exact": json_schema_boolean("Match the title exactly (default: false)"),
                    "format": json_schema_enum(&["text", "json"], "Output format (default: text)"),
                    "limit": json_schema_integer("Maximum number of posts to return (default: 15)")
                }),
                vec!["query"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for search_posts_by_title")?;
        let format = OutputFormat::parse(args.format.as_deref())?;

        tracing::info!("Searching posts with title query: {}", args.query);

        let payload = match self
            .client
            .posts()
            .search_by_title(&args.query, args.exact, args.limit.unwrap_or(15).max(1))
            .await
        {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to search posts: {}", e);
                return Ok(ghost_failure(&e));
            }
        };

        let posts = records(&payload, "posts");
        if posts.is_empty() {
            return Ok(CallToolResult::text(format!(
                "No posts found with title matching '{}'",
                args.query
            )));
        }
        Ok(CallToolResult::text(render_list(posts, "posts", format, post_summary)?))
    }
}

/// Tool to list posts
pub struct ListPostsTool {
    client: GhostClient,
}

impl ListPostsTool {
    pub fn new(client: GhostClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListPostsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_posts".to_string(),
            description: "Get the list of posts from your Ghost blog.".to_string(),
            input_schema: list_schema("posts"),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListArgs =
            serde_json::from_value(arguments).context("Invalid arguments for list_posts")?;
        let format = args.output_format()?;

        tracing::info!(
            "Listing posts (page {}, limit {}, format {:?})",
            args.page,
            args.limit,
            format
        );

        let params = BrowseParams::new().page(args.page).limit(args.limit);
        match self.client.posts().list(&params).await {
            Ok(payload) => Ok(CallToolResult::text(render_list(
                records(&payload, "posts"),
                "posts",
                format,
                post_summary,
            )?)),
            Err(e) => {
                tracing::error!("Failed to list posts: {}", e);
                Ok(ghost_failure(&e))
            }
        }
    }
}

/// Tool to read a single post with its content
pub struct ReadPostTool {
    client: GhostClient,
}

impl ReadPostTool {
    pub fn new(client: GhostClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ReadPostTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "read_post".to_string(),
            description: "Get the full content of a specific blog post.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "post_id": json_schema_string("The ID of the post to retrieve")
                }),
                vec!["post_id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let id = required_string(&arguments, "post_id")?;

        tracing::info!("Reading post content for ID: {}", id);

        match self.client.posts().read(&id).await {
            Ok(payload) => match first_post(&payload) {
                Some(post) => Ok(CallToolResult::text(post_detail(post))),
                None => Ok(CallToolResult::error(format!("No post found with ID {}", id))),
            },
            Err(e) => {
                tracing::error!("Failed to read post: {}", e);
                Ok(ghost_failure(&e))
            }
        }
    }
}

/// Fields accepted by `create_post` and `update_post`
#[derive(Debug, Default, Deserialize)]
struct PostFields {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    html: Option<String>,
    #[serde(default)]
    lexical: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    custom_excerpt: Option<String>,
    #[serde(default)]
    featured: Option<bool>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl PostFields {
    fn into_record(self) -> Value {
        let mut record = Map::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                record.insert(key.to_string(), value);
            }
        };
        put("title", self.title.map(Value::from));
        put("html", self.html.map(Value::from));
        put("lexical", self.lexical.map(Value::from));
        put("status", self.status.map(Value::from));
        put("custom_excerpt", self.custom_excerpt.map(Value::from));
        put("featured", self.featured.map(Value::from));
        put(
            "tags",
            self.tags.map(|tags| {
                Value::Array(
                    tags.into_iter()
                        .map(|name| serde_json::json!({ "name": name }))
                        .collect(),
                )
            }),
        );
        put("updated_at", self.updated_at.map(Value::from));
        Value::Object(record)
    }
}

fn post_field_schema() -> Map<String, Value> {
    let properties = serde_json::json!({
        "title": json_schema_string("Post title"),
        "html": json_schema_string("Post body as HTML; converted by Ghost"),
        "lexical": json_schema_string("Post body as a Lexical JSON document"),
        "status": json_schema_enum(&["draft", "published", "scheduled"], "Publication status"),
        "custom_excerpt": json_schema_string("Excerpt shown in listings"),
        "featured": json_schema_boolean("Mark the post as featured"),
        "tags": {
            "type": "array",
            "items": {"type": "string"},
            "description": "Tag names; unknown tags are created"
        }
    });
    match properties {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Tool to create a post
pub struct CreatePostTool {
    client: GhostClient,
}

impl CreatePostTool {
    pub fn new(client: GhostClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CreatePostTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create_post".to_string(),
            description: "Create a new blog post (draft unless a status is given).".to_string(),
            input_schema: json_schema_object(Value::Object(post_field_schema()), vec!["title"]),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let fields: PostFields =
            serde_json::from_value(arguments).context("Invalid arguments for create_post")?;
        let title = fields.title.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() {
            anyhow::bail!("missing required string argument \"title\"");
        }

        tracing::info!("Creating post: {}", title);

        match self.client.posts().create(fields.into_record()).await {
            Ok(payload) => match first_post(&payload) {
                Some(post) => Ok(CallToolResult::text(format!(
                    "Post created successfully:\n{}",
                    post_summary(post)
                ))),
                None => Ok(CallToolResult::error("Ghost returned no post after create")),
            },
            Err(e) => {
                tracing::error!("Failed to create post: {}", e);
                Ok(ghost_failure(&e))
            }
        }
    }
}

/// Tool to update a post
pub struct UpdatePostTool {
    client: GhostClient,
}

impl UpdatePostTool {
    pub fn new(client: GhostClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    post_id: String,
    #[serde(flatten)]
    fields: PostFields,
}

#[async_trait::async_trait]
impl Tool for UpdatePostTool {
    fn schema(&self) -> ToolSchema {
        let mut properties = post_field_schema();
        properties.insert(
            "post_id".to_string(),
            json_schema_string("The ID of the post to update"),
        );
        properties.insert(
            "updated_at".to_string(),
            json_schema_string("Current updated_at of the post; fetched when omitted"),
        );

        ToolSchema {
            name: "update_post".to_string(),
            description: "Update an existing blog post. Only the given fields change.".to_string(),
            input_schema: json_schema_object(Value::Object(properties), vec!["post_id"]),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: UpdateArgs =
            serde_json::from_value(arguments).context("Invalid arguments for update_post")?;
        let id = args.post_id.trim().to_string();
        if id.is_empty() {
            anyhow::bail!("missing required string argument \"post_id\"");
        }

        tracing::info!("Updating post with ID: {}", id);

        match self.client.posts().update(&id, args.fields.into_record()).await {
            Ok(payload) => match first_post(&payload) {
                Some(post) => Ok(CallToolResult::text(format!(
                    "Post updated successfully:\n{}",
                    post_summary(post)
                ))),
                None => Ok(CallToolResult::error("Ghost returned no post after update")),
            },
            Err(e) => {
                tracing::error!("Failed to update post: {}", e);
                Ok(ghost_failure(&e))
            }
        }
    }
}

/// Tool to delete a post
pub struct DeletePostTool {
    client: GhostClient,
}

impl DeletePostTool {
    pub fn new(client: GhostClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeletePostTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "delete_post".to_string(),
            description: "Delete a blog post permanently.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "post_id": json_schema_string("The ID of the post to delete")
                }),
                vec!["post_id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let id = required_string(&arguments, "post_id")?;

        tracing::info!("Deleting post with ID: {}", id);

        match self.client.posts().delete(&id).await {
            Ok(_) => Ok(CallToolResult::text(format!("Post with id {} deleted.", id))),
            Err(e) => {
                tracing::error!("Failed to delete post: {}", e);
                Ok(ghost_failure(&e))
            }
        }
    }
}
