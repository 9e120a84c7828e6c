use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clipboard_mcp::clipboard::SystemClipboard;
use clipboard_mcp::gateway::ClipboardGateway;
use clipboard_mcp::mcp::{stdio, McpServer, SseTransportServer};
use clipboard_mcp::tools::ToolRegistry;

/// MCP server exposing clipboard tools over SSE or stdio.
#[derive(Parser, Debug)]
#[command(name = "clipboard-mcp", version, about)]
struct Args {
    /// Host to bind the SSE transport to.
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Port to bind the SSE transport to.
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Transport to serve the protocol over.
    #[arg(long, value_enum, default_value_t = Transport::Sse)]
    transport: Transport,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Transport {
    Sse,
    Stdio,
}

fn init_tracing() {
    // stderr only: stdout belongs to the stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing();
    let args = Args::parse();

    let gateway = Arc::new(ClipboardGateway::new(Arc::new(SystemClipboard::new())));
    let server = Arc::new(McpServer::new(ToolRegistry::new(), gateway));

    match args.transport {
        Transport::Stdio => stdio::run(server).await,
        Transport::Sse => {
            let listener = TcpListener::bind((args.host.as_str(), args.port)).await?;
            info!(host = %args.host, port = args.port, "starting SSE transport");

            let transport = Arc::new(SseTransportServer::new(server));
            tokio::select! {
                result = transport.run(listener) => result,
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received");
                    Ok(())
                }
            }
        }
    }
}
