//! MCP server exposing a Ghost site's Admin API as tools, resources and
//! prompts over stdio.

pub mod config;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

pub use config::{Overrides, ServerConfig};
pub use server::McpServer;
