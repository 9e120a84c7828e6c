//! Shared types and traits for the tool system.

use serde::{Deserialize, Serialize};

use crate::gateway::ClipboardGateway;

/// MCP-compatible tool descriptor.
/// Maps 1:1 with the MCP tool definition shape so the protocol layer can
/// advertise tools without translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Errors that can occur before a tool reaches the gateway.
///
/// Gateway outcomes (empty input, clipboard failure) are not errors: the
/// gateway reports them as plain result strings.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("execution failed: {0}")]
    Execution(String),
}

/// Trait for implementing clipboard tools.
///
/// Tools are invoked by the protocol dispatcher and must be Send + Sync for
/// use across connections.
pub trait Tool: Send + Sync {
    /// Returns the descriptor for this tool, including name, description,
    /// and JSON schema for inputs.
    fn descriptor(&self) -> ToolDescriptor;

    /// Invokes the tool against the gateway with the given JSON arguments.
    fn invoke(
        &self,
        gateway: &ClipboardGateway,
        args: serde_json::Value,
    ) -> Result<String, ToolError>;
}

/// Extract a required string argument from a tool's JSON arguments.
pub(crate) fn required_str<'a>(
    args: &'a serde_json::Value,
    field: &str,
) -> Result<&'a str, ToolError> {
    args.get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::InvalidInput(format!("{} (string) is required", field)))
}

/// Extract an optional string argument, defaulting to the empty string.
/// A present-but-non-string value is rejected rather than silently ignored.
pub(crate) fn optional_str<'a>(
    args: &'a serde_json::Value,
    field: &str,
) -> Result<&'a str, ToolError> {
    match args.get(field) {
        None | Some(serde_json::Value::Null) => Ok(""),
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(_) => Err(ToolError::InvalidInput(format!(
            "{} must be a string",
            field
        ))),
    }
}
