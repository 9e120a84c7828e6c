//! Stdio transport for the MCP server.
//!
//! Line-delimited JSON-RPC: one message per line on stdin, one response per
//! line on stdout. Logs go to stderr so they never corrupt the protocol
//! stream.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::mcp::server::McpServer;

/// Serve JSON-RPC over stdin/stdout until stdin closes.
pub async fn run(server: Arc<McpServer>) -> std::io::Result<()> {
    info!("stdio transport ready");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(response) = server.handle_message(line) else {
            debug!("notification, no response");
            continue;
        };

        let serialized = serde_json::to_string(&response)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        stdout.write_all(serialized.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
