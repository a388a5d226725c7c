//! Admin API endpoints.
//!
//! Every accessor returns the raw JSON payload; callers pick the fields
//! they render.

mod posts;
mod site;

pub use posts::PostsApi;
pub use site::SiteApi;

use crate::client::GhostClient;
use crate::error::GhostResult;
use crate::transport::RequestSpec;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;
use url::form_urlencoded;

/// Bytes escaped inside one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Query parameters accepted by the admin `browse` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// NQL filter expression.
    pub filter: Option<String>,
    pub order: Option<String>,
    pub include: Option<String>,
}

impl BrowseParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include = Some(include.into());
        self
    }

    /// URL-encoded query string, empty when no parameter is set.
    pub fn query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(page) = self.page {
            query.append_pair("page", &page.to_string());
        }
        if let Some(limit) = self.limit {
            query.append_pair("limit", &limit.to_string());
        }
        if let Some(ref filter) = self.filter {
            query.append_pair("filter", filter);
        }
        if let Some(ref order) = self.order {
            query.append_pair("order", order);
        }
        if let Some(ref include) = self.include {
            query.append_pair("include", include);
        }
        query.finish()
    }
}

/// `path` with `query` appended when non-empty.
pub(crate) fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

/// Percent-encode a single path segment.
pub(crate) fn segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Wrap a bare record as `{"<collection>": [record]}`.
pub(crate) fn envelope(collection: &str, record: Value) -> Value {
    let mut body = serde_json::Map::new();
    body.insert(collection.to_string(), Value::Array(vec![record]));
    Value::Object(body)
}

fn include_query(include: Option<&str>) -> String {
    match include {
        Some(include) => form_urlencoded::Serializer::new(String::new())
            .append_pair("include", include)
            .finish(),
        None => String::new(),
    }
}

/// Browse/read/add/edit/delete against one admin collection.
pub struct CollectionApi<'a> {
    client: &'a GhostClient,
    collection: &'static str,
    include: Option<&'static str>,
}

impl<'a> CollectionApi<'a> {
    pub(crate) fn new(client: &'a GhostClient, collection: &'static str) -> Self {
        Self {
            client,
            collection,
            include: None,
        }
    }

    /// Relations embedded in browse and read responses unless overridden.
    pub(crate) fn with_include(mut self, include: &'static str) -> Self {
        self.include = Some(include);
        self
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    /// Browse the collection.
    pub async fn list(&self, params: &BrowseParams) -> GhostResult<Value> {
        let mut params = params.clone();
        if params.include.is_none() {
            params.include = self.include.map(str::to_string);
        }
        let path = with_query(&format!("{}/", self.collection), &params.query_string());
        self.client.invoke(&RequestSpec::get(path)).await
    }

    /// Read one record by ID.
    pub async fn read(&self, id: &str) -> GhostResult<Value> {
        let path = with_query(
            &format!("{}/{}/", self.collection, segment(id)),
            &include_query(self.include),
        );
        self.client.invoke(&RequestSpec::get(path)).await
    }

    /// Add a record. `record` is the bare object; it is wrapped as
    /// `{"<collection>": [record]}`.
    pub async fn create(&self, record: Value) -> GhostResult<Value> {
        let body = envelope(self.collection, record);
        self.client
            .invoke(&RequestSpec::post(format!("{}/", self.collection), body))
            .await
    }

    /// Edit a record by ID.
    pub async fn update(&self, id: &str, record: Value) -> GhostResult<Value> {
        let body = envelope(self.collection, record);
        self.client
            .invoke(&RequestSpec::put(
                format!("{}/{}/", self.collection, segment(id)),
                body,
            ))
            .await
    }

    /// Delete a record by ID.
    pub async fn delete(&self, id: &str) -> GhostResult<Value> {
        self.client
            .invoke(&RequestSpec::delete(format!(
                "{}/{}/",
                self.collection,
                segment(id)
            )))
            .await
    }
}
