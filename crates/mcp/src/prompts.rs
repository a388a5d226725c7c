// Prompt templates offered to the client

use crate::protocol::{GetPromptResult, JsonRpcError, Prompt, PromptArgument, PromptMessage, ToolContent};
use serde_json::{Map, Value};

const SEARCH_BLOG: &str = "I want to help you search the blog posts. You can:
1. Search by title with: search_posts_by_title(\"your search term\")
2. List all posts with: list_posts()
3. Read a specific post with: read_post(\"post_id\")

What would you like to search for?";

pub fn list() -> Vec<Prompt> {
    vec![
        Prompt {
            name: "search_blog".to_string(),
            description: "Prompt template for searching blog posts".to_string(),
            arguments: vec![],
        },
        Prompt {
            name: "create_summary".to_string(),
            description: "Create a prompt to summarize a blog post".to_string(),
            arguments: vec![PromptArgument {
                name: "post_id".to_string(),
                description: "The ID of the post to summarize".to_string(),
                required: true,
            }],
        },
    ]
}

fn create_summary(post_id: &str) -> String {
    format!(
        "Please read the following blog post and provide a concise summary:

Resource: post://{}

Key points to include:
1. Main topic/theme
2. Key arguments or insights
3. Important conclusions
4. Any actionable takeaways",
        post_id
    )
}

/// Render prompt `name`; unknown names and missing arguments are invalid params.
pub fn get(name: &str, arguments: &Map<String, Value>) -> Result<GetPromptResult, JsonRpcError> {
    let (description, text) = match name {
        "search_blog" => ("Prompt template for searching blog posts", SEARCH_BLOG.to_string()),
        "create_summary" => {
            let post_id = arguments
                .get("post_id")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .ok_or_else(|| JsonRpcError::invalid_params("create_summary requires post_id"))?;
            ("Create a prompt to summarize a blog post", create_summary(post_id))
        }
        other => return Err(JsonRpcError::invalid_params(format!("Unknown prompt: {}", other))),
    };

    Ok(GetPromptResult {
        description: description.to_string(),
        messages: vec![PromptMessage {
            role: "user".to_string(),
            content: ToolContent::text(text),
        }],
    })
}
