//! Tool registry for discovery and invocation.
//!
//! The registry is the static table mapping tool name to handler + schema.
//! Tools are accessed by name; all invocations route through the shared
//! clipboard gateway.

use std::collections::HashMap;

use crate::gateway::ClipboardGateway;
use crate::tools::clip::{SaveCodeTool, SaveCommandTool, SaveContentTool};
use crate::tools::types::{Tool, ToolDescriptor, ToolError};

/// Registry of all available tools.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates a new registry with all built-in tools registered.
    pub fn new() -> Self {
        let mut tools: HashMap<String, Box<dyn Tool>> = HashMap::new();

        tools.insert("save_to_clipboard".to_string(), Box::new(SaveContentTool));
        tools.insert(
            "save_command_to_clipboard".to_string(),
            Box::new(SaveCommandTool),
        );
        tools.insert("save_code_to_clipboard".to_string(), Box::new(SaveCodeTool));

        Self { tools }
    }

    /// List all available tools, sorted by name for stable output.
    pub fn list(&self) -> Vec<ToolDescriptor> {
        let mut descriptors: Vec<ToolDescriptor> =
            self.tools.values().map(|t| t.descriptor()).collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Look up a tool by name.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Invoke a tool by name with the given arguments.
    pub fn invoke(
        &self,
        gateway: &ClipboardGateway,
        name: &str,
        args: serde_json::Value,
    ) -> Result<String, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::InvalidInput(format!("unknown tool: {}", name)))?;
        tool.invoke(gateway, args)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::clipboard::ClipboardWriter;

    struct NullClipboard;

    impl ClipboardWriter for NullClipboard {
        fn write(&self, _text: &str) -> bool {
            true
        }
    }

    fn test_gateway() -> ClipboardGateway {
        ClipboardGateway::new(Arc::new(NullClipboard))
    }

    #[test]
    fn test_registry_has_all_tools() {
        let registry = ToolRegistry::new();
        let names: Vec<String> = registry.list().into_iter().map(|t| t.name).collect();

        assert_eq!(
            names,
            [
                "save_code_to_clipboard",
                "save_command_to_clipboard",
                "save_to_clipboard",
            ]
        );
    }

    #[test]
    fn test_descriptors_declare_required_fields() {
        let registry = ToolRegistry::new();
        for descriptor in registry.list() {
            let required = descriptor
                .input_schema
                .get("required")
                .and_then(|v| v.as_array())
                .expect("schema declares required fields");
            assert_eq!(required.len(), 1, "{} requires one field", descriptor.name);
        }
    }

    #[test]
    fn test_invoke_routes_by_name() {
        let registry = ToolRegistry::new();
        let gateway = test_gateway();

        let result = registry
            .invoke(&gateway, "save_to_clipboard", json!({"content": "hi"}))
            .unwrap();
        assert!(result.contains("Saved to clipboard: hi"));

        let result = registry
            .invoke(
                &gateway,
                "save_command_to_clipboard",
                json!({"command": "ls -la", "description": "list files"}),
            )
            .unwrap();
        assert!(result.contains("(list files): ls -la"));

        let result = registry
            .invoke(
                &gateway,
                "save_code_to_clipboard",
                json!({"code": "a\nb", "language": "python"}),
            )
            .unwrap();
        assert!(result.contains("(python): a b"));
    }

    #[test]
    fn test_invoke_unknown_tool() {
        let registry = ToolRegistry::new();
        let gateway = test_gateway();

        let err = registry
            .invoke(&gateway, "save_image_to_clipboard", json!({}))
            .unwrap_err();
        assert!(err.to_string().contains("unknown tool"));
    }

    #[test]
    fn test_invoke_missing_required_argument() {
        let registry = ToolRegistry::new();
        let gateway = test_gateway();

        let err = registry
            .invoke(&gateway, "save_to_clipboard", json!({}))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }
}
