//! The three clipboard tools exposed to MCP clients.
//!
//! Descriptions double as usage guidance for the calling LLM: they spell out
//! when the model should reach for each tool, which is why the generic tool
//! is worded far more forcefully than the code variant.

use crate::gateway::ClipboardGateway;
use crate::tools::types::{optional_str, required_str, Tool, ToolDescriptor, ToolError};

/// Tool for saving arbitrary content to the clipboard.
pub struct SaveContentTool;

impl Tool for SaveContentTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "save_to_clipboard".into(),
            description: concat!(
                "MANDATORY: Save content to clipboard for immediate user access. ",
                "Use this whenever you provide shell commands, installation commands, ",
                "code snippets, letters or message templates, short factual answers, ",
                "configuration snippets, URLs, or file paths - any text the user asked ",
                "you to write or would type into a terminal. ",
                "Do not include explanations; save only the raw, usable content."
            )
            .into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "content": {"type": "string", "description": "The exact content to save to clipboard"}
                },
                "required": ["content"]
            }),
        }
    }

    fn invoke(
        &self,
        gateway: &ClipboardGateway,
        args: serde_json::Value,
    ) -> Result<String, ToolError> {
        let content = required_str(&args, "content")?;
        Ok(gateway.save_content(content))
    }
}

/// Tool for saving terminal commands to the clipboard.
pub struct SaveCommandTool;

impl Tool for SaveCommandTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "save_command_to_clipboard".into(),
            description: concat!(
                "MANDATORY: Save terminal/shell commands to clipboard for immediate execution. ",
                "Use this for any bash/shell/terminal command: file operations ",
                "(find, grep, ls), package installations (pip install, npm install), ",
                "system commands (sudo apt install, chmod), and anything else the user ",
                "would run in a terminal."
            )
            .into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "command": {"type": "string", "description": "The exact command to save to clipboard"},
                    "description": {"type": "string", "description": "Optional description of what the command does"}
                },
                "required": ["command"]
            }),
        }
    }

    fn invoke(
        &self,
        gateway: &ClipboardGateway,
        args: serde_json::Value,
    ) -> Result<String, ToolError> {
        let command = required_str(&args, "command")?;
        let description = optional_str(&args, "description")?;
        Ok(gateway.save_command(command, description))
    }
}

/// Tool for saving code snippets to the clipboard.
pub struct SaveCodeTool;

impl Tool for SaveCodeTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "save_code_to_clipboard".into(),
            description: concat!(
                "Save a code snippet to clipboard for immediate use. ",
                "Use this for code snippets, configuration files, or structured text ",
                "the user wants to paste into their editor or terminal."
            )
            .into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "code": {"type": "string", "description": "The code snippet to save to clipboard"},
                    "language": {"type": "string", "description": "Optional language identifier for context"}
                },
                "required": ["code"]
            }),
        }
    }

    fn invoke(
        &self,
        gateway: &ClipboardGateway,
        args: serde_json::Value,
    ) -> Result<String, ToolError> {
        let code = required_str(&args, "code")?;
        let language = optional_str(&args, "language")?;
        Ok(gateway.save_code(code, language))
    }
}
