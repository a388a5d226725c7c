pub mod debug;
pub mod entities;
pub mod format;
pub mod posts;
mod registry;
pub mod writes;

pub use debug::{AdminSitePingTool, ConfigEchoTool};
pub use entities::{Entity, ListEntityTool, ReadEntityTool};
pub use posts::{CreatePostTool, DeletePostTool, ListPostsTool, ReadPostTool, SearchPostsTool, UpdatePostTool};
pub use registry::{
    json_schema_boolean, json_schema_enum, json_schema_integer, json_schema_object, json_schema_string, Tool,
    ToolRegistry,
};
pub use writes::{CreateRecordTool, DeleteRecordTool, UpdateRecordTool, Writable};

use ghost_sdk::GhostClient;
use std::sync::Arc;

/// Every tool the server exposes, bound to `client`.
pub fn default_registry(client: &GhostClient) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    // Posts
    registry.register(Arc::new(SearchPostsTool::new(client.clone())));
    registry.register(Arc::new(ListPostsTool::new(client.clone())));
    registry.register(Arc::new(ReadPostTool::new(client.clone())));
    registry.register(Arc::new(CreatePostTool::new(client.clone())));
    registry.register(Arc::new(UpdatePostTool::new(client.clone())));
    registry.register(Arc::new(DeletePostTool::new(client.clone())));

    // Collections
    for entity in [
        &entities::USERS,
        &entities::MEMBERS,
        &entities::TIERS,
        &entities::OFFERS,
        &entities::NEWSLETTERS,
        &entities::TAGS,
    ] {
        registry.register(Arc::new(ListEntityTool::new(client.clone(), entity)));
        registry.register(Arc::new(ReadEntityTool::new(client.clone(), entity)));
    }
    registry.register(Arc::new(ListEntityTool::new(client.clone(), &entities::ROLES)));
    registry.register(Arc::new(ListEntityTool::new(client.clone(), &entities::INVITES)));

    // Writes
    for writable in [
        &writes::MEMBER_WRITES,
        &writes::TIER_WRITES,
        &writes::OFFER_WRITES,
        &writes::NEWSLETTER_WRITES,
        &writes::USER_WRITES,
        &writes::TAG_WRITES,
        &writes::WEBHOOK_WRITES,
        &writes::INVITE_WRITES,
    ] {
        if !writable.create.is_empty() {
            registry.register(Arc::new(CreateRecordTool::new(client.clone(), writable)));
        }
        if !writable.update.is_empty() {
            registry.register(Arc::new(UpdateRecordTool::new(client.clone(), writable)));
        }
        registry.register(Arc::new(DeleteRecordTool::new(client.clone(), writable)));
    }

    // Diagnostics
    registry.register(Arc::new(AdminSitePingTool::new(client.clone())));
    registry.register(Arc::new(ConfigEchoTool::new(client.clone())));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_names() {
        let client = GhostClient::builder()
            .base_url("https://blog.example.com")
            .admin_api_key("abc123:48656c6c6f")
            .build()
            .unwrap();

        let names: Vec<String> = default_registry(&client)
            .list_schemas()
            .into_iter()
            .map(|schema| schema.name)
            .collect();

        assert_eq!(
            names,
            vec![
                "admin_site_ping",
                "config_echo",
                "create_invite",
                "create_member",
                "create_newsletter",
                "create_offer",
                "create_post",
                "create_tag",
                "create_tier",
                "create_webhook",
                "delete_invite",
                "delete_member",
                "delete_newsletter",
                "delete_offer",
                "delete_post",
                "delete_tag",
                "delete_tier",
                "delete_user",
                "delete_webhook",
                "list_invites",
                "list_members",
                "list_newsletters",
                "list_offers",
                "list_posts",
                "list_roles",
                "list_tags",
                "list_tiers",
                "list_users",
                "read_member",
                "read_newsletter",
                "read_offer",
                "read_post",
                "read_tag",
                "read_tier",
                "read_user",
                "search_posts_by_title",
                "update_member",
                "update_newsletter",
                "update_offer",
                "update_post",
                "update_tag",
                "update_tier",
                "update_user",
                "update_webhook",
            ]
        );
    }
}
