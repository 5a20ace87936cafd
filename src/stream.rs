//! Streaming listener over the server's WebSocket endpoint.
//!
//! The handshake carries the session id both as a query parameter and as an
//! `X-Session-ID` header, since it is unknown which one the server reads.
//! A dedicated task reads frames and pretty-prints them while the caller
//! keeps sending tool calls; on shutdown a single normal-closure frame is
//! sent and the reader is awaited for a bounded interval.

use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::convert;
use crate::encoding::Candidate;
use crate::error::{ProbeError, Result};
use crate::tools::ToolCallRequest;

/// Fixed timeout for establishing the streaming connection.
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(45);

/// How long to wait for the peer after sending our close frame.
pub const CLOSE_WAIT: Duration = Duration::from_secs(1);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// An established streaming connection.
///
/// Outgoing frames are written only by the owner of this value; incoming
/// frames are consumed by the background reader spawned at connect time.
pub struct McpStream {
    write: SplitSink<WsStream, Message>,
    /// Fires when the reader has drained the connection.
    done: oneshot::Receiver<()>,
    session_id: String,
}

impl McpStream {
    /// Connect to `ws://<server>/mcp/stream` and spawn the frame reader.
    pub async fn connect(server: &str, session_id: &str) -> Result<Self> {
        let url = format!("ws://{server}/mcp/stream?sessionId={session_id}");

        let mut request = url.as_str().into_client_request()?;
        let headers = request.headers_mut();
        headers.insert("Origin", HeaderValue::from_str(&format!("http://{server}"))?);
        headers.insert("X-Session-ID", HeaderValue::from_str(session_id)?);

        debug!(url = %url, "connecting websocket");
        let (ws, response) = tokio::time::timeout(HANDSHAKE_TIMEOUT, connect_async(request))
            .await
            .map_err(|_| ProbeError::HandshakeTimeout)??;
        info!(status = %response.status(), "websocket connection established");

        let (write, read) = ws.split();
        let (done_tx, done) = oneshot::channel();
        tokio::spawn(read_loop(read, done_tx));

        Ok(Self {
            write,
            done,
            session_id: session_id.to_string(),
        })
    }

    /// Send a tool call over the socket.
    ///
    /// The flat `simple-body` shape goes out first; if that send fails at
    /// the transport level, the MCP-style `tool-input` shape is tried once.
    /// Replies, if any, arrive asynchronously on the reader.
    pub async fn call_tool(&mut self, call: &ToolCallRequest) -> Result<()> {
        let primary = Candidate::SimpleBody.body(&self.session_id, call);
        let text = serde_json::to_string(&primary)?;
        debug!(payload = %text, "sending tool call");

        if let Err(e) = self.write.send(Message::Text(text)).await {
            warn!(error = %e, "send failed, retrying with the toolInput shape");
            let fallback = Candidate::ToolInput.body(&self.session_id, call);
            let text = serde_json::to_string(&fallback)?;
            debug!(payload = %text, "sending tool call");
            self.write.send(Message::Text(text)).await?;
        }

        info!(tool = %call.tool_name, "tool call sent");
        Ok(())
    }

    /// Close the connection gracefully.
    ///
    /// Sends exactly one normal-closure frame, then waits at most
    /// [`CLOSE_WAIT`] for the reader to observe the peer's side closing.
    /// Returns even when no acknowledgement ever arrives.
    pub async fn close(mut self) -> Result<()> {
        self.write
            .send(Message::Close(Some(CloseFrame {
                code: CloseCode::Normal,
                reason: "".into(),
            })))
            .await?;

        if tokio::time::timeout(CLOSE_WAIT, &mut self.done).await.is_err() {
            warn!("peer did not acknowledge close in time");
        }
        Ok(())
    }
}

/// Read frames until the connection closes, pretty-printing each payload.
async fn read_loop(mut read: SplitStream<WsStream>, done: oneshot::Sender<()>) {
    while let Some(frame) = read.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                println!("Received:\n{}", convert::pretty(&text));
            }
            Ok(Message::Binary(bytes)) => {
                let text = String::from_utf8_lossy(&bytes);
                println!("Received:\n{}", convert::pretty(&text));
            }
            Ok(Message::Close(frame)) => {
                info!(?frame, "connection closed by server");
                break;
            }
            // Ping/pong is handled inside tungstenite.
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "read error");
                break;
            }
        }
    }
    let _ = done.send(());
}
