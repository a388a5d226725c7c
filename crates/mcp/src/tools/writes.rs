// Create, update and delete tools driven by per-collection field tables

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::entities::{self, required_string, Entity};
use crate::tools::format::{ghost_failure, records};
use crate::tools::{json_schema_boolean, json_schema_object, json_schema_string, Tool};
use anyhow::{bail, Result};
use ghost_sdk::GhostClient;
use serde_json::{json, Map, Value};

/// How a tool argument is checked and written into the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
    /// Array of strings, sent as is.
    TextList,
    /// Strings become `{"name": ..}`; objects pass through.
    NameList,
    /// Strings become `{"id": ..}`; objects pass through.
    IdList,
    /// A string id sent as `{"<key>": {"id": ..}}`.
    Reference(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub description: &'static str,
}

const fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Field {
    Field {
        name,
        kind,
        required: true,
        description,
    }
}

const fn optional(name: &'static str, kind: FieldKind, description: &'static str) -> Field {
    Field {
        name,
        kind,
        required: false,
        description,
    }
}

impl Field {
    fn schema(&self) -> Value {
        match self.kind {
            FieldKind::Text | FieldKind::Reference(_) => json_schema_string(self.description),
            FieldKind::Integer => json!({"type": "integer", "description": self.description}),
            FieldKind::Boolean => json_schema_boolean(self.description),
            FieldKind::TextList => json!({
                "type": "array",
                "items": {"type": "string"},
                "description": self.description
            }),
            FieldKind::NameList | FieldKind::IdList => json!({
                "type": "array",
                "items": {"type": ["string", "object"]},
                "description": self.description
            }),
        }
    }

    /// Wire key and value for `value`, or an argument error.
    fn convert(&self, value: &Value) -> Result<(&'static str, Value)> {
        let converted = match self.kind {
            FieldKind::Text => match value.as_str() {
                Some(text) if self.required && text.trim().is_empty() => {
                    bail!("missing required string argument \"{}\"", self.name)
                }
                Some(text) => Value::from(text),
                None => bail!("argument \"{}\" must be a string", self.name),
            },
            FieldKind::Integer => match value.as_i64() {
                Some(number) => Value::from(number),
                None => bail!("argument \"{}\" must be an integer", self.name),
            },
            FieldKind::Boolean => match value.as_bool() {
                Some(flag) => Value::from(flag),
                None => bail!("argument \"{}\" must be a boolean", self.name),
            },
            FieldKind::TextList => {
                let items = self.items(value)?;
                if !items.iter().all(Value::is_string) {
                    bail!("argument \"{}\" must be a list of strings", self.name);
                }
                Value::Array(items.to_vec())
            }
            FieldKind::NameList => Value::Array(self.keyed_items(value, "name")?),
            FieldKind::IdList => Value::Array(self.keyed_items(value, "id")?),
            FieldKind::Reference(key) => match value.as_str().map(str::trim) {
                Some(id) if !id.is_empty() => return Ok((key, json!({ "id": id }))),
                _ => bail!("argument \"{}\" must be a non-empty string", self.name),
            },
        };
        Ok((self.name, converted))
    }

    fn items<'a>(&self, value: &'a Value) -> Result<&'a [Value]> {
        match value.as_array() {
            Some(items) => Ok(items),
            None => bail!("argument \"{}\" must be a list", self.name),
        }
    }

    fn keyed_items(&self, value: &Value, key: &str) -> Result<Vec<Value>> {
        self.items(value)?
            .iter()
            .map(|item| match item {
                Value::String(text) => Ok(json!({ key: text })),
                Value::Object(object) if object.get(key).is_some_and(Value::is_string) => {
                    Ok(item.clone())
                }
                _ => bail!(
                    "argument \"{}\" items must be strings or objects with \"{}\"",
                    self.name,
                    key
                ),
            })
            .collect()
    }
}

/// Record body built from the fields present in `arguments`.
fn build_record(fields: &[Field], arguments: &Value) -> Result<Map<String, Value>> {
    let mut record = Map::new();
    for field in fields {
        match arguments.get(field.name) {
            None | Some(Value::Null) if field.required => {
                bail!("missing required argument \"{}\"", field.name)
            }
            None | Some(Value::Null) => {}
            Some(value) => {
                let (key, value) = field.convert(value)?;
                record.insert(key.to_string(), value);
            }
        }
    }
    Ok(record)
}

/// A collection that accepts writes, with the fields each write takes.
pub struct Writable {
    pub entity: &'static Entity,
    pub create: &'static [Field],
    pub update: &'static [Field],
}

impl Writable {
    fn label(&self) -> String {
        let mut chars = self.entity.singular.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    fn id_argument(&self) -> String {
        format!("{}_id", self.entity.singular)
    }

    fn schema_properties(&self, fields: &[Field]) -> Map<String, Value> {
        fields
            .iter()
            .map(|field| (field.name.to_string(), field.schema()))
            .collect()
    }

    /// Success text for a create or update payload.
    fn confirm(&self, payload: &Value, verb: &str) -> CallToolResult {
        match records(payload, self.entity.collection).first() {
            Some(record) => CallToolResult::text(format!(
                "{} {} successfully:\n{}",
                self.label(),
                verb,
                (self.entity.detail)(record)
            )),
            None => CallToolResult::error(format!(
                "Ghost returned no {} after the request",
                self.entity.singular
            )),
        }
    }
}

pub static MEMBER_WRITES: Writable = Writable {
    entity: &entities::MEMBERS,
    create: &[
        required("email", FieldKind::Text, "Member email address"),
        optional("name", FieldKind::Text, "Member name"),
        optional("note", FieldKind::Text, "Private note about the member"),
        optional("labels", FieldKind::NameList, "Label names or {name, slug} objects"),
        optional("newsletters", FieldKind::IdList, "Newsletter IDs to subscribe to"),
    ],
    update: &[
        optional("email", FieldKind::Text, "Member email address"),
        optional("name", FieldKind::Text, "Member name"),
        optional("note", FieldKind::Text, "Private note about the member"),
        optional("labels", FieldKind::NameList, "Label names or {name, slug} objects"),
        optional("newsletters", FieldKind::IdList, "Newsletter IDs the member is subscribed to"),
    ],
};

pub static TIER_WRITES: Writable = Writable {
    entity: &entities::TIERS,
    create: &[
        required("name", FieldKind::Text, "Tier name"),
        optional("description", FieldKind::Text, "Tier description"),
        optional("welcome_page_url", FieldKind::Text, "Page shown after signup"),
        optional("visibility", FieldKind::Text, "public or none"),
        optional("monthly_price", FieldKind::Integer, "Monthly price in the smallest currency unit"),
        optional("yearly_price", FieldKind::Integer, "Yearly price in the smallest currency unit"),
        optional("currency", FieldKind::Text, "Three-letter currency code"),
        optional("benefits", FieldKind::TextList, "Benefit descriptions"),
    ],
    update: &[
        optional("name", FieldKind::Text, "Tier name"),
        optional("description", FieldKind::Text, "Tier description"),
        optional("welcome_page_url", FieldKind::Text, "Page shown after signup"),
        optional("visibility", FieldKind::Text, "public or none"),
        optional("monthly_price", FieldKind::Integer, "Monthly price in the smallest currency unit"),
        optional("yearly_price", FieldKind::Integer, "Yearly price in the smallest currency unit"),
        optional("currency", FieldKind::Text, "Three-letter currency code"),
        optional("benefits", FieldKind::TextList, "Benefit descriptions"),
    ],
};

pub static OFFER_WRITES: Writable = Writable {
    entity: &entities::OFFERS,
    create: &[
        required("name", FieldKind::Text, "Internal offer name"),
        required("code", FieldKind::Text, "Code used in the offer URL"),
        required("cadence", FieldKind::Text, "month or year"),
        required("duration", FieldKind::Text, "once, repeating or forever"),
        required("amount", FieldKind::Integer, "Discount amount or percentage"),
        required("tier_id", FieldKind::Reference("tier"), "ID of the tier the offer applies to"),
        required("type", FieldKind::Text, "percent, fixed or trial"),
        optional("display_title", FieldKind::Text, "Title shown to visitors"),
        optional("display_description", FieldKind::Text, "Description shown to visitors"),
        optional("duration_in_months", FieldKind::Integer, "Months, for repeating offers"),
        optional("currency", FieldKind::Text, "Currency code, for fixed offers"),
    ],
    update: &[
        optional("name", FieldKind::Text, "Internal offer name"),
        optional("code", FieldKind::Text, "Code used in the offer URL"),
        optional("display_title", FieldKind::Text, "Title shown to visitors"),
        optional("display_description", FieldKind::Text, "Description shown to visitors"),
    ],
};

pub static NEWSLETTER_WRITES: Writable = Writable {
    entity: &entities::NEWSLETTERS,
    create: &[
        required("name", FieldKind::Text, "Newsletter name"),
        optional("description", FieldKind::Text, "Newsletter description"),
        optional("sender_reply_to", FieldKind::Text, "newsletter or support"),
        optional("status", FieldKind::Text, "active or archived"),
        optional("subscribe_on_signup", FieldKind::Boolean, "Subscribe new members automatically"),
        optional("show_header_icon", FieldKind::Boolean, "Show the site icon in the header"),
        optional("show_header_title", FieldKind::Boolean, "Show the site title in the header"),
        optional("show_header_name", FieldKind::Boolean, "Show the newsletter name in the header"),
        optional("title_font_category", FieldKind::Text, "serif or sans_serif"),
        optional("title_alignment", FieldKind::Text, "left or center"),
        optional("show_feature_image", FieldKind::Boolean, "Show post feature images"),
        optional("body_font_category", FieldKind::Text, "serif or sans_serif"),
        optional("show_badge", FieldKind::Boolean, "Show the Ghost badge"),
    ],
    update: &[
        optional("name", FieldKind::Text, "Newsletter name"),
        optional("description", FieldKind::Text, "Newsletter description"),
        optional("sender_name", FieldKind::Text, "Sender name"),
        optional("sender_email", FieldKind::Text, "Sender email address"),
        optional("sender_reply_to", FieldKind::Text, "newsletter or support"),
        optional("status", FieldKind::Text, "active or archived"),
        optional("subscribe_on_signup", FieldKind::Boolean, "Subscribe new members automatically"),
        optional("sort_order", FieldKind::Integer, "Position among newsletters"),
        optional("header_image", FieldKind::Text, "Header image URL"),
        optional("show_header_icon", FieldKind::Boolean, "Show the site icon in the header"),
        optional("show_header_title", FieldKind::Boolean, "Show the site title in the header"),
        optional("title_font_category", FieldKind::Text, "serif or sans_serif"),
        optional("title_alignment", FieldKind::Text, "left or center"),
        optional("show_feature_image", FieldKind::Boolean, "Show post feature images"),
        optional("body_font_category", FieldKind::Text, "serif or sans_serif"),
        optional("footer_content", FieldKind::Text, "Footer HTML"),
        optional("show_badge", FieldKind::Boolean, "Show the Ghost badge"),
        optional("show_header_name", FieldKind::Boolean, "Show the newsletter name in the header"),
    ],
};

/// Staff users are created through invites.
pub static USER_WRITES: Writable = Writable {
    entity: &entities::USERS,
    create: &[],
    update: &[
        optional("name", FieldKind::Text, "Display name"),
        optional("email", FieldKind::Text, "Email address"),
        optional("slug", FieldKind::Text, "URL slug"),
        optional("bio", FieldKind::Text, "Short biography"),
        optional("website", FieldKind::Text, "Website URL"),
        optional("location", FieldKind::Text, "Location"),
        optional("facebook", FieldKind::Text, "Facebook username"),
        optional("twitter", FieldKind::Text, "Twitter handle"),
    ],
};

pub static TAG_WRITES: Writable = Writable {
    entity: &entities::TAGS,
    create: &[
        required("name", FieldKind::Text, "Tag name"),
        optional("description", FieldKind::Text, "Tag description"),
        optional("slug", FieldKind::Text, "URL slug; derived from the name when omitted"),
    ],
    update: &[
        optional("name", FieldKind::Text, "Tag name"),
        optional("description", FieldKind::Text, "Tag description"),
        optional("slug", FieldKind::Text, "URL slug"),
    ],
};

pub static WEBHOOK_WRITES: Writable = Writable {
    entity: &entities::WEBHOOKS,
    create: &[
        required("event", FieldKind::Text, "Event that fires the webhook, e.g. post.published"),
        required("target_url", FieldKind::Text, "URL that receives the payload"),
        optional("name", FieldKind::Text, "Webhook name"),
        optional("secret", FieldKind::Text, "Secret used to sign payloads"),
        optional("api_version", FieldKind::Text, "API version of the payload"),
        optional("integration_id", FieldKind::Text, "Owning integration; needed for staff-authenticated requests"),
    ],
    update: &[
        optional("event", FieldKind::Text, "Event that fires the webhook"),
        optional("target_url", FieldKind::Text, "URL that receives the payload"),
        optional("name", FieldKind::Text, "Webhook name"),
        optional("api_version", FieldKind::Text, "API version of the payload"),
    ],
};

pub static INVITE_WRITES: Writable = Writable {
    entity: &entities::INVITES,
    create: &[
        required("role_id", FieldKind::Text, "ID of the role to grant; see list_roles"),
        required("email", FieldKind::Text, "Email address to invite"),
    ],
    update: &[],
};

/// `create_<singular>` tool
pub struct CreateRecordTool {
    client: GhostClient,
    writable: &'static Writable,
}

impl CreateRecordTool {
    pub fn new(client: GhostClient, writable: &'static Writable) -> Self {
        Self { client, writable }
    }
}

#[async_trait::async_trait]
impl Tool for CreateRecordTool {
    fn schema(&self) -> ToolSchema {
        let fields = self.writable.create;
        ToolSchema {
            name: format!("create_{}", self.writable.entity.singular),
            description: format!("Create a new {}.", self.writable.entity.singular),
            input_schema: json_schema_object(
                Value::Object(self.writable.schema_properties(fields)),
                fields.iter().filter(|f| f.required).map(|f| f.name).collect(),
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let entity = self.writable.entity;
        let record = build_record(self.writable.create, &arguments)?;

        tracing::info!("Creating {}", entity.singular);

        match (entity.api)(&self.client).create(Value::Object(record)).await {
            Ok(payload) => Ok(self.writable.confirm(&payload, "created")),
            Err(e) => {
                tracing::error!("Failed to create {}: {}", entity.singular, e);
                Ok(ghost_failure(&e))
            }
        }
    }
}

/// `update_<singular>` tool
pub struct UpdateRecordTool {
    client: GhostClient,
    writable: &'static Writable,
}

impl UpdateRecordTool {
    pub fn new(client: GhostClient, writable: &'static Writable) -> Self {
        Self { client, writable }
    }
}

#[async_trait::async_trait]
impl Tool for UpdateRecordTool {
    fn schema(&self) -> ToolSchema {
        let singular = self.writable.entity.singular;
        let id_argument = self.writable.id_argument();
        let mut properties = self.writable.schema_properties(self.writable.update);
        properties.insert(
            id_argument.clone(),
            json_schema_string(&format!("The ID of the {} to update", singular)),
        );

        ToolSchema {
            name: format!("update_{}", singular),
            description: format!(
                "Update an existing {}. Only the fields given are changed.",
                singular
            ),
            input_schema: json_schema_object(Value::Object(properties), vec![id_argument.as_str()]),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let entity = self.writable.entity;
        let id = required_string(&arguments, &self.writable.id_argument())?;
        let record = build_record(self.writable.update, &arguments)?;
        if record.is_empty() {
            bail!("no fields to update for {} {}", entity.singular, id);
        }

        tracing::info!("Updating {} with ID: {}", entity.singular, id);

        match (entity.api)(&self.client).update(&id, Value::Object(record)).await {
            Ok(payload) => Ok(self.writable.confirm(&payload, "updated")),
            Err(e) => {
                tracing::error!("Failed to update {}: {}", entity.singular, e);
                Ok(ghost_failure(&e))
            }
        }
    }
}

/// `delete_<singular>` tool
pub struct DeleteRecordTool {
    client: GhostClient,
    writable: &'static Writable,
}

impl DeleteRecordTool {
    pub fn new(client: GhostClient, writable: &'static Writable) -> Self {
        Self { client, writable }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteRecordTool {
    fn schema(&self) -> ToolSchema {
        let singular = self.writable.entity.singular;
        let id_argument = self.writable.id_argument();
        let mut properties = Map::new();
        properties.insert(
            id_argument.clone(),
            json_schema_string(&format!("The ID of the {} to delete", singular)),
        );

        ToolSchema {
            name: format!("delete_{}", singular),
            description: format!("Delete a {}. This cannot be undone.", singular),
            input_schema: json_schema_object(Value::Object(properties), vec![id_argument.as_str()]),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let entity = self.writable.entity;
        let id = required_string(&arguments, &self.writable.id_argument())?;

        tracing::info!("Deleting {} with ID: {}", entity.singular, id);

        match (entity.api)(&self.client).delete(&id).await {
            Ok(_) => Ok(CallToolResult::text(format!(
                "{} with id {} deleted.",
                self.writable.label(),
                id
            ))),
            Err(e) => {
                tracing::error!("Failed to delete {}: {}", entity.singular, e);
                Ok(ghost_failure(&e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> GhostClient {
        GhostClient::builder()
            .base_url(server.uri())
            .admin_api_key("abc123:48656c6c6f")
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_record_converts_fields() {
        let record = build_record(
            MEMBER_WRITES.create,
            &json!({
                "email": "ada@example.com",
                "labels": ["vip", {"name": "beta", "slug": "beta"}],
                "newsletters": ["n1"],
                "note": null,
                "ignored": 1
            }),
        )
        .unwrap();

        assert_eq!(
            Value::Object(record),
            json!({
                "email": "ada@example.com",
                "labels": [{"name": "vip"}, {"name": "beta", "slug": "beta"}],
                "newsletters": [{"id": "n1"}]
            })
        );
    }

    #[test]
    fn test_build_record_reference_field() {
        let record = build_record(
            OFFER_WRITES.create,
            &json!({
                "name": "Spring",
                "code": "spring",
                "cadence": "month",
                "duration": "once",
                "amount": 20,
                "tier_id": "t1",
                "type": "percent"
            }),
        )
        .unwrap();

        assert_eq!(record["tier"], json!({"id": "t1"}));
        assert!(!record.contains_key("tier_id"));
    }

    #[test]
    fn test_build_record_rejects_bad_arguments() {
        assert!(build_record(TAG_WRITES.create, &json!({})).is_err());
        assert!(build_record(TAG_WRITES.create, &json!({"name": "  "})).is_err());
        assert!(build_record(TIER_WRITES.update, &json!({"monthly_price": "5"})).is_err());
        assert!(build_record(TIER_WRITES.update, &json!({"benefits": [1]})).is_err());
        assert!(build_record(MEMBER_WRITES.update, &json!({"labels": [{"slug": "x"}]})).is_err());
        assert!(build_record(NEWSLETTER_WRITES.update, &json!({"show_badge": "yes"})).is_err());
    }

    #[test]
    fn test_schemas() {
        let client = GhostClient::builder()
            .base_url("https://blog.example.com")
            .admin_api_key("abc123:48656c6c6f")
            .build()
            .unwrap();

        let create = CreateRecordTool::new(client.clone(), &WEBHOOK_WRITES).schema();
        assert_eq!(create.name, "create_webhook");
        assert_eq!(create.input_schema["required"], json!(["event", "target_url"]));

        let update = UpdateRecordTool::new(client.clone(), &OFFER_WRITES).schema();
        assert_eq!(update.name, "update_offer");
        assert_eq!(update.input_schema["required"], json!(["offer_id"]));
        assert!(update.input_schema["properties"]["display_title"].is_object());

        let delete = DeleteRecordTool::new(client, &INVITE_WRITES).schema();
        assert_eq!(delete.name, "delete_invite");
        assert_eq!(delete.input_schema["required"], json!(["invite_id"]));
    }

    #[tokio::test]
    async fn test_create_tag() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ghost/api/admin/tags/"))
            .and(body_json(json!({"tags": [{"name": "Rust", "slug": "rust"}]})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "tags": [{"id": "t1", "name": "Rust", "slug": "rust"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = CreateRecordTool::new(client(&server).await, &TAG_WRITES);
        let result = tool
            .execute(json!({"name": "Rust", "slug": "rust"}))
            .await
            .unwrap();

        let text = result.content[0].as_text();
        assert!(text.starts_with("Tag created successfully:"));
        assert!(text.contains("Slug: rust"));
    }

    #[tokio::test]
    async fn test_update_member_puts_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/ghost/api/admin/members/m1/"))
            .and(body_json(json!({
                "members": [{"name": "Grace Hopper", "labels": [{"name": "vip"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "members": [{"id": "m1", "name": "Grace Hopper", "email": "grace@example.com", "labels": [{"name": "vip"}]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = UpdateRecordTool::new(client(&server).await, &MEMBER_WRITES);
        let result = tool
            .execute(json!({"member_id": "m1", "name": "Grace Hopper", "labels": ["vip"]}))
            .await
            .unwrap();

        assert!(result.is_error.is_none());
        let text = result.content[0].as_text();
        assert!(text.starts_with("Member updated successfully:\nName: Grace Hopper"));
        assert!(text.contains("Labels: vip"));
    }

    #[tokio::test]
    async fn test_update_requires_a_field() {
        let server = MockServer::start().await;

        let tool = UpdateRecordTool::new(client(&server).await, &TAG_WRITES);
        assert!(tool.execute(json!({"tag_id": "t1"})).await.is_err());
        assert!(tool.execute(json!({"name": "Rust"})).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_newsletter() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/ghost/api/admin/newsletters/n1/"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let tool = DeleteRecordTool::new(client(&server).await, &NEWSLETTER_WRITES);
        let result = tool.execute(json!({"newsletter_id": "n1"})).await.unwrap();

        assert!(result.is_error.is_none());
        assert_eq!(result.content[0].as_text(), "Newsletter with id n1 deleted.");
    }

    #[tokio::test]
    async fn test_delete_tag_failure() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/ghost/api/admin/tags/t1/"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "errors": [{"message": "Permission error", "context": "Cannot delete tag"}]
            })))
            .mount(&server)
            .await;

        let tool = DeleteRecordTool::new(client(&server).await, &TAG_WRITES);
        let result = tool.execute(json!({"tag_id": "t1"})).await.unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(result.content[0]
            .as_text()
            .contains("Permission error (Cannot delete tag)"));
    }

    #[tokio::test]
    async fn test_create_without_record_in_reply() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ghost/api/admin/invites/"))
            .and(body_json(json!({"invites": [{"role_id": "r1", "email": "new@example.com"}]})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"invites": []})))
            .mount(&server)
            .await;

        let tool = CreateRecordTool::new(client(&server).await, &INVITE_WRITES);
        let result = tool
            .execute(json!({"role_id": "r1", "email": "new@example.com"}))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.content[0].as_text(),
            "Error: Ghost returned no invite after the request"
        );
    }
}
