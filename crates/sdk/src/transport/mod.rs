//! Transport layer for the Ghost SDK.

pub mod http;

pub use http::{endpoint_url, Method, RequestExecutor, RequestSpec};
