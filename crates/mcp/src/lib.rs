//! MCP (Model Context Protocol) adapter for the remote note service.
//!
//! Speaks JSON-RPC 2.0 over a line-oriented transport and exposes the note
//! tool catalog plus note resources to the host.
//!
//! # Architecture
//!
//! - **types**: JSON-RPC 2.0 and MCP-specific protocol types
//! - **transport**: Pluggable transport layer (stdio, channels)
//! - **resources**: `note://` URI parsing and resource reads
//! - **server**: request dispatch over a `ToolRegistry` and `NoteResources`
//! - **error**: Unified error types
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use notebridge_client::NotesClient;
//! use notebridge_core::NotesConfig;
//! use notebridge_mcp::server::McpServer;
//! use notebridge_mcp::transport::StdioTransport;
//!
//! # async fn example() {
//! let config = NotesConfig::from_lookup(|key| std::env::var(key).ok()).unwrap();
//! let api = Arc::new(NotesClient::new(&config));
//! let mut server = McpServer::for_api(api).unwrap();
//! let mut transport = StdioTransport::new();
//! server.run(&mut transport).await.unwrap();
//! # }
//! ```

pub mod types;
pub mod transport;
pub mod resources;
pub mod server;
pub mod error;

pub use types::*;
pub use transport::{McpTransport, StdioTransport, ChannelTransport};
pub use resources::{NoteResources, NoteUri};
pub use server::McpServer;
pub use error::McpError;
