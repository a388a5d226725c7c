use ghost_mcp::protocol::JsonRpcRequest;
use ghost_mcp::McpServer;
use ghost_sdk::GhostClient;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, McpServer) {
    let ghost = MockServer::start().await;
    let client = GhostClient::builder()
        .base_url(ghost.uri())
        .admin_api_key("6489a0f1c2d3e4f5a6b7c8d9:0123456789abcdef0123456789abcdef")
        .build()
        .unwrap();
    (ghost, McpServer::new(client))
}

async fn call(server: &McpServer, method: &str, params: Value) -> Value {
    let response = server
        .handle_request(JsonRpcRequest::new(1, method, params))
        .await
        .expect("requests with an id get a reply");
    serde_json::to_value(response).unwrap()
}

#[tokio::test]
async fn test_initialize() {
    let (_ghost, server) = setup().await;

    let response = call(
        &server,
        "initialize",
        json!({"protocolVersion": "2024-11-05", "capabilities": {}, "clientInfo": {"name": "test", "version": "0"}}),
    )
    .await;

    let result = &response["result"];
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "ghost-mcp");
    assert!(result["capabilities"]["tools"].is_object());
    assert!(result["capabilities"]["resources"].is_object());
    assert!(result["capabilities"]["prompts"].is_object());
}

#[tokio::test]
async fn test_notifications_get_no_reply() {
    let (_ghost, server) = setup().await;

    let reply = server
        .handle_request(JsonRpcRequest::notification("notifications/initialized", json!({})))
        .await;
    assert!(reply.is_none());
}

#[tokio::test]
async fn test_tools_list() {
    let (_ghost, server) = setup().await;

    let response = call(&server, "tools/list", json!({})).await;
    let tools = response["result"]["tools"].as_array().unwrap();

    assert_eq!(tools.len(), 44);
    let search = tools
        .iter()
        .find(|t| t["name"] == "search_posts_by_title")
        .unwrap();
    assert_eq!(search["inputSchema"]["required"], json!(["query"]));
}

#[tokio::test]
async fn test_tools_call_list_users() {
    let (ghost, server) = setup().await;

    Mock::given(method("GET"))
        .and(path("/ghost/api/admin/users/"))
        .and(query_param("include", "roles"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": "u1", "name": "Ada", "email": "ada@example.com", "status": "active", "roles": [{"name": "Owner"}]}]
        })))
        .expect(1)
        .mount(&ghost)
        .await;

    let response = call(&server, "tools/call", json!({"name": "list_users", "arguments": {}})).await;

    let result = &response["result"];
    assert!(result.get("isError").is_none());
    assert_eq!(
        result["content"][0]["text"],
        "Name: Ada\nEmail: ada@example.com\nRoles: Owner\nStatus: active\nID: u1"
    );
}

#[tokio::test]
async fn test_tools_call_update_and_delete() {
    let (ghost, server) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/ghost/api/admin/tags/t1/"))
        .and(body_json(json!({"tags": [{"description": "Systems programming"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tags": [{"id": "t1", "name": "Rust", "slug": "rust", "description": "Systems programming"}]
        })))
        .expect(1)
        .mount(&ghost)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/ghost/api/admin/webhooks/w1/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&ghost)
        .await;

    let updated = call(
        &server,
        "tools/call",
        json!({"name": "update_tag", "arguments": {"tag_id": "t1", "description": "Systems programming"}}),
    )
    .await;
    let text = updated["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Tag updated successfully:"));
    assert!(text.contains("Description: Systems programming"));

    let deleted = call(
        &server,
        "tools/call",
        json!({"name": "delete_webhook", "arguments": {"webhook_id": "w1"}}),
    )
    .await;
    assert_eq!(deleted["result"]["content"][0]["text"], "Webhook with id w1 deleted.");

    let nothing_to_change = call(
        &server,
        "tools/call",
        json!({"name": "update_tag", "arguments": {"tag_id": "t1"}}),
    )
    .await;
    assert_eq!(nothing_to_change["error"]["code"], -32602);
}

#[tokio::test]
async fn test_tools_call_without_arguments() {
    let (ghost, server) = setup().await;

    Mock::given(method("GET"))
        .and(path("/ghost/api/admin/tiers/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tiers": []})))
        .mount(&ghost)
        .await;

    let response = call(&server, "tools/call", json!({"name": "list_tiers"})).await;
    assert_eq!(response["result"]["content"][0]["text"], "No tiers found.");
}

#[tokio::test]
async fn test_tools_call_upstream_failure() {
    let (ghost, server) = setup().await;

    Mock::given(method("GET"))
        .and(path("/ghost/api/admin/posts/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"message": "Invalid token", "type": "UnauthorizedError"}]
        })))
        .mount(&ghost)
        .await;

    let response = call(&server, "tools/call", json!({"name": "list_posts", "arguments": {}})).await;

    let result = &response["result"];
    assert_eq!(result["isError"], true);
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("returned status 401"));
    assert!(text.contains("Invalid token"));
}

#[tokio::test]
async fn test_tools_call_errors() {
    let (_ghost, server) = setup().await;

    let unknown = call(&server, "tools/call", json!({"name": "drop_database"})).await;
    assert_eq!(unknown["error"]["code"], -32602);

    let bad_args = call(&server, "tools/call", json!({"name": "read_post", "arguments": {}})).await;
    assert_eq!(bad_args["error"]["code"], -32602);

    let not_object = call(&server, "tools/call", json!({"name": "list_tags", "arguments": [1]})).await;
    assert_eq!(not_object["error"]["code"], -32602);

    let no_params = server
        .handle_request(JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(9)),
            method: "tools/call".to_string(),
            params: None,
        })
        .await
        .unwrap();
    assert_eq!(no_params.error.unwrap().code, -32602);
}

#[tokio::test]
async fn test_resources() {
    let (ghost, server) = setup().await;

    Mock::given(method("GET"))
        .and(path("/ghost/api/admin/site/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "site": {"title": "My Blog", "version": "5.80"}
        })))
        .expect(1)
        .mount(&ghost)
        .await;

    let listed = call(&server, "resources/list", json!({})).await;
    assert_eq!(listed["result"]["resources"][0]["uri"], "blog://info");

    let templates = call(&server, "resources/templates/list", json!({})).await;
    assert_eq!(templates["result"]["resourceTemplates"].as_array().unwrap().len(), 6);

    let read = call(&server, "resources/read", json!({"uri": "blog://info"})).await;
    let contents = &read["result"]["contents"][0];
    assert_eq!(contents["mimeType"], "application/json");
    let payload: Value = serde_json::from_str(contents["text"].as_str().unwrap()).unwrap();
    assert_eq!(payload["site"]["title"], "My Blog");

    let unknown = call(&server, "resources/read", json!({"uri": "webhook://w1"})).await;
    assert_eq!(unknown["error"]["code"], -32602);
}

#[tokio::test]
async fn test_resource_upstream_failure_is_internal_error() {
    let (ghost, server) = setup().await;

    Mock::given(method("GET"))
        .and(path("/ghost/api/admin/posts/missing/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{"message": "Post not found."}]
        })))
        .mount(&ghost)
        .await;

    let response = call(&server, "resources/read", json!({"uri": "post://missing"})).await;
    assert_eq!(response["error"]["code"], -32603);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Post not found."));
}

#[tokio::test]
async fn test_prompts() {
    let (_ghost, server) = setup().await;

    let listed = call(&server, "prompts/list", json!({})).await;
    let names: Vec<&str> = listed["result"]["prompts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["search_blog", "create_summary"]);

    let summary = call(
        &server,
        "prompts/get",
        json!({"name": "create_summary", "arguments": {"post_id": "p1"}}),
    )
    .await;
    let message = &summary["result"]["messages"][0];
    assert_eq!(message["role"], "user");
    assert!(message["content"]["text"]
        .as_str()
        .unwrap()
        .contains("Resource: post://p1"));
}

#[tokio::test]
async fn test_unknown_method() {
    let (_ghost, server) = setup().await;

    let response = call(&server, "sampling/createMessage", json!({})).await;
    assert_eq!(response["error"]["code"], -32601);
    assert_eq!(response["id"], 1);
}
