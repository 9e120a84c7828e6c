//! SSE transport for the MCP server.
//!
//! Implements the HTTP+SSE pairing used by MCP remote servers:
//!
//! - `GET /sse` opens a long-lived event stream. The first event is an
//!   `endpoint` event telling the client where to POST its messages; after
//!   that the stream carries `message` events with JSON-RPC responses.
//! - `POST /messages?sessionId=<id>` delivers one JSON-RPC message. The HTTP
//!   reply is `202 Accepted`; the JSON-RPC response (if any) arrives on the
//!   session's event stream.
//!
//! The HTTP handling is deliberately minimal: request head, content-length,
//! body. Anything fancier belongs to a reverse proxy.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex, Semaphore};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::mcp::server::McpServer;

/// Maximum concurrent connections.
const MAX_CONNECTIONS: usize = 100;

/// Maximum size of an HTTP request head.
const MAX_HEAD_BYTES: usize = 16 * 1024;

/// Maximum size of a POSTed JSON-RPC message.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Buffered responses per session before backpressure kicks in.
const SESSION_CHANNEL_CAPACITY: usize = 64;

/// Keep-alive comment interval for idle event streams.
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

type SessionMap = Arc<Mutex<HashMap<String, mpsc::Sender<String>>>>;

/// SSE transport server. One instance serves many concurrent sessions.
pub struct SseTransportServer {
    server: Arc<McpServer>,
    sessions: SessionMap,
}

impl SseTransportServer {
    pub fn new(server: Arc<McpServer>) -> Self {
        Self {
            server,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Serve connections from the listener until the task is cancelled.
    pub async fn run(self: Arc<Self>, listener: TcpListener) -> std::io::Result<()> {
        let limiter = Arc::new(Semaphore::new(MAX_CONNECTIONS));
        info!(addr = %listener.local_addr()?, "SSE transport listening");

        loop {
            let (stream, peer) = listener.accept().await?;
            let Ok(permit) = limiter.clone().acquire_owned().await else {
                break Ok(());
            };

            let this = Arc::clone(&self);
            tokio::spawn(async move {
                debug!(%peer, "connection accepted");
                if let Err(e) = this.handle_connection(stream).await {
                    debug!(%peer, "connection ended: {}", e);
                }
                drop(permit);
            });
        }
    }

    async fn handle_connection(&self, mut stream: TcpStream) -> std::io::Result<()> {
        let (head, leftover) = read_request_head(&mut stream).await?;
        let head = match parse_request_head(&head) {
            Ok(head) => head,
            Err(reason) => {
                return write_simple_response(&mut stream, "400 Bad Request", &reason).await;
            }
        };

        match (head.method.as_str(), head.path.as_str()) {
            ("GET", "/sse") => self.handle_sse_session(stream).await,
            ("POST", "/messages") => self.handle_post(stream, &head, leftover).await,
            _ => write_simple_response(&mut stream, "404 Not Found", "not found").await,
        }
    }

    /// Open an event stream and pump JSON-RPC responses into it.
    async fn handle_sse_session(&self, stream: TcpStream) -> std::io::Result<()> {
        let session_id = Uuid::new_v4().to_string();
        let (tx, mut rx) = mpsc::channel::<String>(SESSION_CHANNEL_CAPACITY);
        self.sessions.lock().await.insert(session_id.clone(), tx);
        info!(session = %session_id, "SSE session opened");

        let (mut read_half, mut write_half) = stream.into_split();
        let result = async {
            write_half
                .write_all(
                    b"HTTP/1.1 200 OK\r\n\
                      Content-Type: text/event-stream\r\n\
                      Cache-Control: no-cache\r\n\
                      Connection: keep-alive\r\n\r\n",
                )
                .await?;

            let endpoint = format!("/messages?sessionId={}", session_id);
            write_event(&mut write_half, "endpoint", &endpoint).await?;

            let mut keep_alive = tokio::time::interval(KEEP_ALIVE_INTERVAL);
            keep_alive.tick().await; // first tick fires immediately
            let mut drain = [0u8; 512];

            loop {
                tokio::select! {
                    message = rx.recv() => {
                        let Some(message) = message else { break };
                        write_event(&mut write_half, "message", &message).await?;
                    }
                    _ = keep_alive.tick() => {
                        write_half.write_all(b": keep-alive\n\n").await?;
                    }
                    read = read_half.read(&mut drain) => {
                        // Clients signal departure by closing their end.
                        match read {
                            Ok(0) | Err(_) => break,
                            Ok(_) => {}
                        }
                    }
                }
            }
            Ok(())
        }
        .await;

        self.sessions.lock().await.remove(&session_id);
        info!(session = %session_id, "SSE session closed");
        result
    }

    /// Accept one JSON-RPC message and route the response to its session.
    async fn handle_post(
        &self,
        mut stream: TcpStream,
        head: &RequestHead,
        leftover: Vec<u8>,
    ) -> std::io::Result<()> {
        let Some(session_id) = head.query_param("sessionId") else {
            return write_simple_response(&mut stream, "400 Bad Request", "missing sessionId")
                .await;
        };

        let sender = self.sessions.lock().await.get(&session_id).cloned();
        let Some(sender) = sender else {
            return write_simple_response(&mut stream, "404 Not Found", "unknown session").await;
        };

        if head.content_length > MAX_BODY_BYTES {
            return write_simple_response(&mut stream, "413 Payload Too Large", "body too large")
                .await;
        }

        let body = read_body(&mut stream, head.content_length, leftover).await?;
        let Ok(body) = String::from_utf8(body) else {
            return write_simple_response(&mut stream, "400 Bad Request", "body is not UTF-8")
                .await;
        };

        if let Some(response) = self.server.handle_message(&body) {
            match serde_json::to_string(&response) {
                Ok(serialized) => {
                    if sender.send(serialized).await.is_err() {
                        warn!(session = %session_id, "session stream gone, response dropped");
                    }
                }
                Err(e) => warn!("failed to serialize response: {}", e),
            }
        }

        write_simple_response(&mut stream, "202 Accepted", "Accepted").await
    }
}

/// Parsed HTTP request head.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RequestHead {
    method: String,
    path: String,
    query: String,
    content_length: usize,
}

impl RequestHead {
    /// Look up a single query parameter by exact name.
    fn query_param(&self, name: &str) -> Option<String> {
        self.query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
    }
}

/// Read from the stream until the blank line ending the request head.
///
/// Returns the head bytes and any body bytes that arrived in the same reads.
async fn read_request_head(stream: &mut TcpStream) -> std::io::Result<(String, Vec<u8>)> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    loop {
        if let Some(end) = find_head_end(&buf) {
            let leftover = buf.split_off(end + 4);
            let head = String::from_utf8(buf).map_err(|_| {
                std::io::Error::new(std::io::ErrorKind::InvalidData, "head is not UTF-8")
            })?;
            return Ok((head, leftover));
        }
        if buf.len() > MAX_HEAD_BYTES {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "request head too large",
            ));
        }

        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "connection closed mid-head",
            ));
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Parse the request line and the headers we care about.
fn parse_request_head(head: &str) -> Result<RequestHead, String> {
    let mut lines = head.lines();
    let request_line = lines.next().ok_or("empty request")?;

    let mut parts = request_line.split_whitespace();
    let method = parts.next().ok_or("missing method")?.to_string();
    let target = parts.next().ok_or("missing request target")?;
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path.to_string(), query.to_string()),
        None => (target.to_string(), String::new()),
    };

    let mut content_length = 0;
    for line in lines {
        if let Some((key, value)) = line.split_once(':') {
            if key.eq_ignore_ascii_case("content-length") {
                content_length = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid content-length: {}", value.trim()))?;
            }
        }
    }

    Ok(RequestHead {
        method,
        path,
        query,
        content_length,
    })
}

/// Read exactly `content_length` body bytes, starting from the leftover.
async fn read_body(
    stream: &mut TcpStream,
    content_length: usize,
    leftover: Vec<u8>,
) -> std::io::Result<Vec<u8>> {
    let mut body = leftover;
    body.truncate(content_length);
    if body.len() < content_length {
        let start = body.len();
        body.resize(content_length, 0);
        stream.read_exact(&mut body[start..]).await?;
    }
    Ok(body)
}

/// Format and write one SSE event frame.
async fn write_event(
    write_half: &mut OwnedWriteHalf,
    event_type: &str,
    data: &str,
) -> std::io::Result<()> {
    write_half
        .write_all(format_sse_event(event_type, data).as_bytes())
        .await
}

/// Serialize an SSE event: `event:` line, one `data:` line per payload line,
/// blank-line terminator.
fn format_sse_event(event_type: &str, data: &str) -> String {
    let mut out = format!("event: {}\n", event_type);
    for line in data.lines() {
        out.push_str("data: ");
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out
}

async fn write_simple_response(
    stream: &mut TcpStream,
    status: &str,
    body: &str,
) -> std::io::Result<()> {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}
