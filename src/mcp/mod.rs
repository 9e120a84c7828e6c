//! MCP protocol layer: JSON-RPC types, request dispatch, and transports.
//!
//! # Module Structure
//!
//! - `types`: JSON-RPC 2.0 and MCP message types
//! - `server`: transport-agnostic request dispatcher
//! - `sse`: HTTP+SSE transport
//! - `stdio`: line-delimited stdin/stdout transport

pub use server::McpServer;
pub use sse::SseTransportServer;

pub mod server;
pub mod sse;
pub mod stdio;
pub mod types;
