//! Tool registry and clipboard tool implementations.
//!
//! # Module Structure
//!
//! - `types`: Core types (Tool trait, ToolDescriptor, ToolError)
//! - `registry`: ToolRegistry for managing and invoking tools
//! - `clip`: The three clipboard tools
//!
//! # Adding New Tools
//!
//! 1. Implement the `Tool` trait in a submodule
//! 2. Register it in `ToolRegistry::new`
//! 3. Cover it in the registry tests

pub use registry::ToolRegistry;
pub use types::{Tool, ToolDescriptor, ToolError};

mod clip;
mod registry;
mod types;
