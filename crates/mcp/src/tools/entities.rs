// List and read tools for the admin collections

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::format::{field, ghost_failure, joined_names, nested, records, render_list, Card, ListArgs};
use crate::tools::{json_schema_enum, json_schema_integer, json_schema_object, json_schema_string, Tool};
use anyhow::{bail, Context, Result};
use ghost_sdk::{BrowseParams, CollectionApi, GhostClient};
use serde_json::Value;

/// One admin collection exposed as `list_<collection>` / `read_<singular>`
pub struct Entity {
    pub collection: &'static str,
    pub singular: &'static str,
    pub api: for<'a> fn(&'a GhostClient) -> CollectionApi<'a>,
    /// Card used by the list tool
    pub summary: fn(&Value) -> String,
    /// Card used by the read tool
    pub detail: fn(&Value) -> String,
}

pub static USERS: Entity = Entity {
    collection: "users",
    singular: "user",
    api: GhostClient::users,
    summary: user_summary,
    detail: user_detail,
};

pub static MEMBERS: Entity = Entity {
    collection: "members",
    singular: "member",
    api: GhostClient::members,
    summary: member_summary,
    detail: member_detail,
};

pub static TIERS: Entity = Entity {
    collection: "tiers",
    singular: "tier",
    api: GhostClient::tiers,
    summary: tier_summary,
    detail: tier_detail,
};

pub static OFFERS: Entity = Entity {
    collection: "offers",
    singular: "offer",
    api: GhostClient::offers,
    summary: offer_summary,
    detail: offer_detail,
};

pub static NEWSLETTERS: Entity = Entity {
    collection: "newsletters",
    singular: "newsletter",
    api: GhostClient::newsletters,
    summary: newsletter_summary,
    detail: newsletter_detail,
};

pub static TAGS: Entity = Entity {
    collection: "tags",
    singular: "tag",
    api: GhostClient::tags,
    summary: tag_card,
    detail: tag_card,
};

pub static ROLES: Entity = Entity {
    collection: "roles",
    singular: "role",
    api: GhostClient::roles,
    summary: role_card,
    detail: role_card,
};

pub static INVITES: Entity = Entity {
    collection: "invites",
    singular: "invite",
    api: GhostClient::invites,
    summary: invite_card,
    detail: invite_card,
};

/// Write-only; Ghost has no browse or read endpoint for webhooks.
pub static WEBHOOKS: Entity = Entity {
    collection: "webhooks",
    singular: "webhook",
    api: GhostClient::webhooks,
    summary: webhook_card,
    detail: webhook_card,
};

/// `list_<collection>` tool
pub struct ListEntityTool {
    client: GhostClient,
    entity: &'static Entity,
}

impl ListEntityTool {
    pub fn new(client: GhostClient, entity: &'static Entity) -> Self {
        Self { client, entity }
    }
}

#[async_trait::async_trait]
impl Tool for ListEntityTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: format!("list_{}", self.entity.collection),
            description: format!("Get the list of {} from your Ghost blog.", self.entity.collection),
            input_schema: list_schema(self.entity.collection),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let name = format!("list_{}", self.entity.collection);
        let args: ListArgs = serde_json::from_value(arguments)
            .with_context(|| format!("Invalid arguments for {}", name))?;
        let format = args.output_format()?;

        tracing::info!(
            "Listing {} (page {}, limit {}, format {:?})",
            self.entity.collection,
            args.page,
            args.limit,
            format
        );

        let params = BrowseParams::new().page(args.page).limit(args.limit);
        let payload = match (self.entity.api)(&self.client).list(&params).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to list {}: {}", self.entity.collection, e);
                return Ok(ghost_failure(&e));
            }
        };

        let text = render_list(
            records(&payload, self.entity.collection),
            self.entity.collection,
            format,
            self.entity.summary,
        )?;
        Ok(CallToolResult::text(text))
    }
}

/// `read_<singular>` tool
pub struct ReadEntityTool {
    client: GhostClient,
    entity: &'static Entity,
}

impl ReadEntityTool {
    pub fn new(client: GhostClient, entity: &'static Entity) -> Self {
        Self { client, entity }
    }

    fn id_argument(&self) -> String {
        format!("{}_id", self.entity.singular)
    }
}

#[async_trait::async_trait]
impl Tool for ReadEntityTool {
    fn schema(&self) -> ToolSchema {
        let id_argument = self.id_argument();
        let mut properties = serde_json::Map::new();
        properties.insert(
            id_argument.clone(),
            json_schema_string(&format!("The ID of the {} to retrieve", self.entity.singular)),
        );

        ToolSchema {
            name: format!("read_{}", self.entity.singular),
            description: format!("Get the details of a specific {}.", self.entity.singular),
            input_schema: json_schema_object(Value::Object(properties), vec![id_argument.as_str()]),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let id = required_string(&arguments, &self.id_argument())?;

        tracing::info!("Reading {} details for ID: {}", self.entity.singular, id);

        let payload = match (self.entity.api)(&self.client).read(&id).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to read {}: {}", self.entity.singular, e);
                return Ok(ghost_failure(&e));
            }
        };

        match records(&payload, self.entity.collection).first() {
            Some(record) => Ok(CallToolResult::text((self.entity.detail)(record))),
            None => Ok(CallToolResult::error(format!(
                "No {} found with ID {}",
                self.entity.singular, id
            ))),
        }
    }
}

pub(crate) fn list_schema(plural: &str) -> Value {
    json_schema_object(
        serde_json::json!({
            "format": json_schema_enum(&["text", "json"], "Output format (default: text)"),
            "page": json_schema_integer("Page number for pagination (default: 1)"),
            "limit": json_schema_integer(&format!("Number of {} per page (default: 15)", plural)),
        }),
        vec![],
    )
}

/// Non-blank string argument `key`.
pub(crate) fn required_string(arguments: &Value, key: &str) -> Result<String> {
    match arguments.get(key).and_then(Value::as_str).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => bail!("missing required string argument \"{}\"", key),
    }
}

fn user_summary(user: &Value) -> String {
    Card::new()
        .line("Name", field(user, "name", "Unknown"))
        .line("Email", field(user, "email", "Unknown"))
        .line("Roles", joined_names(user, "roles", "None"))
        .line("Status", field(user, "status", "Unknown"))
        .line("ID", field(user, "id", "Unknown"))
        .render()
}

fn user_detail(user: &Value) -> String {
    Card::new()
        .line("Name", field(user, "name", "Unknown"))
        .line("Email", field(user, "email", "Unknown"))
        .line("Slug", field(user, "slug", "Unknown"))
        .line("Status", field(user, "status", "Unknown"))
        .line("Roles", joined_names(user, "roles", "None"))
        .line("Location", field(user, "location", "Not specified"))
        .line("Website", field(user, "website", "None"))
        .line("Bio", field(user, "bio", "No bio"))
        .line("Profile Image", field(user, "profile_image", "None"))
        .line("Cover Image", field(user, "cover_image", "None"))
        .line("Created", field(user, "created_at", "Unknown"))
        .line("Last Seen", field(user, "last_seen", "Never"))
        .render()
}

fn member_summary(member: &Value) -> String {
    Card::new()
        .line("Name", field(member, "name", "Unknown"))
        .line("Email", field(member, "email", "Unknown"))
        .line("Status", field(member, "status", "Unknown"))
        .line("Newsletters", joined_names(member, "newsletters", "None"))
        .line("Created", field(member, "created_at", "Unknown"))
        .line("ID", field(member, "id", "Unknown"))
        .render()
}

fn member_detail(member: &Value) -> String {
    let mut card = Card::new()
        .line("Name", field(member, "name", "Unknown"))
        .line("Email", field(member, "email", "Unknown"))
        .line("Status", field(member, "status", "Unknown"))
        .line("Newsletters", joined_names(member, "newsletters", "None"))
        .line("Created", field(member, "created_at", "Unknown"))
        .line("Note", field(member, "note", "No notes"))
        .line("Labels", joined_names(member, "labels", "None"))
        .line("Email Count", field(member, "email_count", "0"))
        .line("Email Opened Count", field(member, "email_opened_count", "0"))
        .line("Email Open Rate", format!("{}%", field(member, "email_open_rate", "0")))
        .line("Last Seen At", field(member, "last_seen_at", "Never"));

    let subscriptions = member
        .get("subscriptions")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    for sub in subscriptions {
        card = card.block(format!(
            "Subscription Details:\n  Status: {}\n  Start Date: {}\n  Current Period Ends: {}\n  Price: {} ({} {})",
            field(sub, "status", "Unknown"),
            field(sub, "start_date", "Unknown"),
            field(sub, "current_period_end", "Unknown"),
            nested(sub, "price", "nickname", "Unknown"),
            nested(sub, "price", "amount", "0"),
            nested(sub, "price", "currency", "USD"),
        ));
    }
    card.render()
}

/// Tier benefits are plain strings in newer Ghost versions and `{name}` objects in older ones.
fn benefits(tier: &Value) -> Vec<String> {
    tier.get("benefits")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("name").and_then(Value::as_str).map(str::to_string),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn tier_summary(tier: &Value) -> String {
    let benefits = benefits(tier);
    Card::new()
        .line("Name", field(tier, "name", "Unknown"))
        .line("Description", field(tier, "description", "No description"))
        .line("Type", field(tier, "type", "Unknown"))
        .line("Active", field(tier, "active", "False"))
        .line("Monthly Price", field(tier, "monthly_price", "N/A"))
        .line("Yearly Price", field(tier, "yearly_price", "N/A"))
        .line(
            "Benefits",
            if benefits.is_empty() {
                "None".to_string()
            } else {
                benefits.join(", ")
            },
        )
        .line("ID", field(tier, "id", "Unknown"))
        .render()
}

fn tier_detail(tier: &Value) -> String {
    let benefits = benefits(tier);
    let benefit_lines = if benefits.is_empty() {
        "No benefits listed".to_string()
    } else {
        benefits
            .iter()
            .map(|b| format!("- {}", b))
            .collect::<Vec<_>>()
            .join("\n")
    };

    Card::new()
        .line("Name", field(tier, "name", "Unknown"))
        .line("Description", field(tier, "description", "No description"))
        .line("Type", field(tier, "type", "Unknown"))
        .line("Active", field(tier, "active", "False"))
        .line("Welcome Page URL", field(tier, "welcome_page_url", "None"))
        .line("Created", field(tier, "created_at", "Unknown"))
        .line("Updated", field(tier, "updated_at", "Unknown"))
        .line("Monthly Price", field(tier, "monthly_price", "N/A"))
        .line("Yearly Price", field(tier, "yearly_price", "N/A"))
        .line("Currency", field(tier, "currency", "Unknown"))
        .block(format!("Benefits:\n{}", benefit_lines))
        .render()
}

fn offer_summary(offer: &Value) -> String {
    Card::new()
        .line("Name", field(offer, "name", "Unknown"))
        .line("Code", field(offer, "code", "Unknown"))
        .line("Display Title", field(offer, "display_title", "No display title"))
        .line("Type", field(offer, "type", "Unknown"))
        .line("Amount", field(offer, "amount", "Unknown"))
        .line("Duration", field(offer, "duration", "Unknown"))
        .line("Status", field(offer, "status", "Unknown"))
        .line("Tier", nested(offer, "tier", "name", "Unknown"))
        .line("ID", field(offer, "id", "Unknown"))
        .render()
}

fn offer_detail(offer: &Value) -> String {
    Card::new()
        .line("Name", field(offer, "name", "Unknown"))
        .line("Code", field(offer, "code", "Unknown"))
        .line("Display Title", field(offer, "display_title", "No display title"))
        .line("Display Description", field(offer, "display_description", "No description"))
        .line("Type", field(offer, "type", "Unknown"))
        .line("Status", field(offer, "status", "Unknown"))
        .line("Cadence", field(offer, "cadence", "Unknown"))
        .line("Amount", field(offer, "amount", "Unknown"))
        .line("Duration", field(offer, "duration", "Unknown"))
        .line("Currency", field(offer, "currency", "N/A"))
        .line("Tier", nested(offer, "tier", "name", "Unknown"))
        .line("Redemption Count", field(offer, "redemption_count", "0"))
        .line("Created", field(offer, "created_at", "Unknown"))
        .render()
}

fn newsletter_summary(newsletter: &Value) -> String {
    Card::new()
        .line("Name", field(newsletter, "name", "Unknown"))
        .line("Description", field(newsletter, "description", "No description"))
        .line("Status", field(newsletter, "status", "Unknown"))
        .line("Visibility", field(newsletter, "visibility", "Unknown"))
        .line("Subscribe on Signup", field(newsletter, "subscribe_on_signup", "False"))
        .line("ID", field(newsletter, "id", "Unknown"))
        .render()
}

fn newsletter_detail(newsletter: &Value) -> String {
    Card::new()
        .line("Name", field(newsletter, "name", "Unknown"))
        .line("Description", field(newsletter, "description", "No description"))
        .line("Status", field(newsletter, "status", "Unknown"))
        .line("Visibility", field(newsletter, "visibility", "Unknown"))
        .line("Subscribe on Signup", field(newsletter, "subscribe_on_signup", "False"))
        .line("Sort Order", field(newsletter, "sort_order", "0"))
        .line("Sender Email", field(newsletter, "sender_email", "Not set"))
        .line("Sender Reply To", field(newsletter, "sender_reply_to", "Not set"))
        .line("Show Header Icon", field(newsletter, "show_header_icon", "True"))
        .line("Show Header Title", field(newsletter, "show_header_title", "True"))
        .line("Show Header Name", field(newsletter, "show_header_name", "True"))
        .line("Show Feature Image", field(newsletter, "show_feature_image", "True"))
        .line("Title Font Category", field(newsletter, "title_font_category", "Unknown"))
        .line("Body Font Category", field(newsletter, "body_font_category", "Unknown"))
        .line("Show Badge", field(newsletter, "show_badge", "True"))
        .line("Created", field(newsletter, "created_at", "Unknown"))
        .line("Updated", field(newsletter, "updated_at", "Unknown"))
        .render()
}

fn tag_card(tag: &Value) -> String {
    Card::new()
        .line("Name", field(tag, "name", "Unknown"))
        .line("Slug", field(tag, "slug", "Unknown"))
        .line("Description", field(tag, "description", "No description"))
        .line("Visibility", field(tag, "visibility", "Unknown"))
        .line("Posts", nested(tag, "count", "posts", "0"))
        .line("ID", field(tag, "id", "Unknown"))
        .render()
}

fn role_card(role: &Value) -> String {
    Card::new()
        .line("Name", field(role, "name", "Unknown"))
        .line("Description", field(role, "description", "No description"))
        .line("ID", field(role, "id", "Unknown"))
        .render()
}

fn invite_card(invite: &Value) -> String {
    Card::new()
        .line("Email", field(invite, "email", "Unknown"))
        .line("Status", field(invite, "status", "Unknown"))
        .line("Role ID", field(invite, "role_id", "Unknown"))
        .line("Expires", field(invite, "expires", "Unknown"))
        .line("ID", field(invite, "id", "Unknown"))
        .render()
}

fn webhook_card(webhook: &Value) -> String {
    Card::new()
        .line("Name", field(webhook, "name", "Unnamed"))
        .line("Event", field(webhook, "event", "Unknown"))
        .line("Target URL", field(webhook, "target_url", "Unknown"))
        .line("Status", field(webhook, "status", "Unknown"))
        .line("Last Triggered", field(webhook, "last_triggered_at", "Never"))
        .line("ID", field(webhook, "id", "Unknown"))
        .render()
}
