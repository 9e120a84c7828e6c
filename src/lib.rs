//! clipboard-mcp: an MCP server that puts text on the system clipboard.
//!
//! # Architecture
//!
//! The crate is organized as a pipeline from transport to clipboard:
//!
//! - `mcp`: JSON-RPC types, the request dispatcher, and the SSE and stdio
//!   transports
//! - `tools`: the tool registry and the three clipboard tools
//!   (`save_to_clipboard`, `save_command_to_clipboard`,
//!   `save_code_to_clipboard`)
//! - `gateway`: validation, clipboard writes, and acknowledgement strings
//! - `clipboard`: the `ClipboardWriter` seam over the OS clipboard
//!
//! A request flows transport -> `McpServer` -> `ToolRegistry` -> tool ->
//! `ClipboardGateway` -> `ClipboardWriter`, and the acknowledgement string
//! flows back the same way as a text content block.

pub mod clipboard;
pub mod gateway;
pub mod mcp;
pub mod tools;
