//! # Ghost SDK
//!
//! Authenticated client for the Ghost Admin API.
//!
//! Every request mints a fresh five-minute HS256 token from the admin API
//! key, sends it as `Authorization: Ghost <token>` alongside a fixed
//! `Accept-Version` header, and folds every failure into
//! [`GhostError::Api`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ghost_sdk::{BrowseParams, GhostClient, GhostResult};
//!
//! #[tokio::main]
//! async fn main() -> GhostResult<()> {
//!     let client = GhostClient::builder()
//!         .base_url("https://blog.example.com")
//!         .admin_api_key("6489a0f1c2d3e4f5a6b7c8d9:0123456789abcdef")
//!         .build()?;
//!
//!     let posts = client.posts().list(&BrowseParams::new().limit(5)).await?;
//!     println!("{}", posts);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Raw requests
//!
//! ```rust,no_run
//! use ghost_sdk::{GhostClient, RequestSpec};
//!
//! # async fn example(client: GhostClient) -> ghost_sdk::GhostResult<()> {
//! let deleted = client.invoke(&RequestSpec::delete("posts/6489a0f1c2d3e4f5a6b7c8d9")).await?;
//! assert!(deleted.as_object().map_or(false, |o| o.is_empty()));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod observer;
pub mod transport;

// Re-export main client
pub use client::{GhostClient, GhostClientBuilder};
pub use config::{ClientConfig, TrailingSlash, DEFAULT_API_VERSION};
pub use error::{GhostError, GhostResult};

pub use api::{BrowseParams, CollectionApi, PostsApi, SiteApi};
pub use auth::{
    build_auth_headers, build_auth_headers_with_version, issue_token, AuthHeaders, Credential,
    SignedToken, TokenClaims, DEFAULT_AUDIENCE, TOKEN_TTL_SECS,
};
pub use observer::{NoopObserver, RequestObserver, TracingObserver};
pub use transport::{Method, RequestExecutor, RequestSpec};
