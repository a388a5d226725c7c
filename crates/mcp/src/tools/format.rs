// Text rendering shared by the entity tools

use crate::protocol::CallToolResult;
use anyhow::{bail, Result};
use ghost_sdk::GhostError;
use serde::Deserialize;
use serde_json::Value;

pub const RECORD_SEPARATOR: &str = "\n---\n";

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    15
}

/// Output format accepted by the list tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            None => Ok(Self::Text),
            Some(s) if s.is_empty() || s == "text" => Ok(Self::Text),
            Some(s) if s == "json" => Ok(Self::Json),
            Some(s) => bail!("format must be \"text\" or \"json\", got \"{}\"", s),
        }
    }
}

/// Arguments common to every list tool
#[derive(Debug, Deserialize)]
pub struct ListArgs {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl ListArgs {
    pub fn output_format(&self) -> Result<OutputFormat> {
        if self.page == 0 || self.limit == 0 {
            bail!("page and limit must be at least 1");
        }
        OutputFormat::parse(self.format.as_deref())
    }
}

/// Render a scalar field, or `fallback` when absent or null.
pub fn field(record: &Value, key: &str, fallback: &str) -> String {
    scalar(record.get(key)).unwrap_or_else(|| fallback.to_string())
}

/// Render `record[outer][inner]`, or `fallback`.
pub fn nested(record: &Value, outer: &str, inner: &str, fallback: &str) -> String {
    scalar(record.get(outer).and_then(|v| v.get(inner))).unwrap_or_else(|| fallback.to_string())
}

/// The `name` of every object in the array at `key`.
pub fn names(record: &Value, key: &str) -> Vec<String> {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|item| scalar(item.get("name"))).collect())
        .unwrap_or_default()
}

/// Comma-separated `names`, or `fallback` when there are none.
pub fn joined_names(record: &Value, key: &str, fallback: &str) -> String {
    let names = names(record, key);
    if names.is_empty() {
        fallback.to_string()
    } else {
        names.join(", ")
    }
}

fn scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        other => Some(other.to_string()),
    }
}

/// The array under `collection` in an admin API payload.
pub fn records<'a>(payload: &'a Value, collection: &str) -> &'a [Value] {
    payload
        .get(collection)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// `Label: value` lines for one record.
#[derive(Debug, Default)]
pub struct Card {
    lines: Vec<String>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, label: &str, value: impl AsRef<str>) -> Self {
        self.lines.push(format!("{}: {}", label, value.as_ref()));
        self
    }

    /// Free-form block appended after the labelled lines.
    pub fn block(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self
    }

    pub fn render(self) -> String {
        self.lines.join("\n")
    }
}

/// Render a list payload in the requested format.
pub fn render_list(
    records: &[Value],
    plural: &str,
    format: OutputFormat,
    card: fn(&Value) -> String,
) -> Result<String> {
    if records.is_empty() {
        return Ok(format!("No {} found.", plural));
    }
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Text => Ok(records
            .iter()
            .map(card)
            .collect::<Vec<_>>()
            .join(RECORD_SEPARATOR)),
    }
}

/// Error result for a failed Ghost call. Configuration problems get a hint
/// since retrying cannot fix them.
pub fn ghost_failure(err: &GhostError) -> CallToolResult {
    if err.is_configuration() {
        CallToolResult::error(format!(
            "{}. Check the configured Ghost URL and admin API key.",
            err
        ))
    } else {
        CallToolResult::error(err.to_string())
    }
}
