//! Integration tests for the streaming listener, driven against a local
//! WebSocket server.

use std::time::{Duration, Instant};

use fi_mcp_probe::{McpStream, ToolCallRequest, CLOSE_WAIT};
use futures_util::StreamExt;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::handshake::server::{Request, Response};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::Message;

#[tokio::test]
async fn handshake_carries_session_in_query_and_header() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let callback = move |req: &Request, resp: Response| {
            let uri = req.uri().to_string();
            let header = req
                .headers()
                .get("X-Session-ID")
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            let _ = tx.send((uri, header));
            Ok(resp)
        };
        let mut ws = tokio_tungstenite::accept_hdr_async(socket, callback)
            .await
            .unwrap();
        while let Some(Ok(_)) = ws.next().await {}
    });

    let stream = McpStream::connect(&addr.to_string(), "probe_session_1")
        .await
        .unwrap();

    let (uri, header) = rx.recv().await.unwrap();
    assert!(uri.contains("sessionId=probe_session_1"));
    assert_eq!(header.as_deref(), Some("probe_session_1"));

    stream.close().await.unwrap();
}

#[tokio::test]
async fn tool_calls_go_out_in_the_simple_shape() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
        while let Some(Ok(message)) = ws.next().await {
            if let Message::Text(text) = message {
                let _ = tx.send(text);
            }
        }
    });

    let mut stream = McpStream::connect(&addr.to_string(), "probe_session_1")
        .await
        .unwrap();
    stream
        .call_tool(&ToolCallRequest::new("fetch_credit_report"))
        .await
        .unwrap();

    let text = rx.recv().await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["sessionId"], "probe_session_1");
    assert_eq!(value["toolName"], "fetch_credit_report");
    assert!(value["parameters"].as_object().unwrap().is_empty());

    stream.close().await.unwrap();
}

#[tokio::test]
async fn close_is_bounded_without_an_acknowledgement() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // A server that receives our close frame but never acknowledges it:
    // after reading the frame it just sits on the open socket.
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
        loop {
            match ws.next().await {
                Some(Ok(Message::Close(frame))) => {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    return frame;
                }
                Some(Ok(_)) => {}
                _ => return None,
            }
        }
    });

    let stream = McpStream::connect(&addr.to_string(), "probe_session_1")
        .await
        .unwrap();

    let started = Instant::now();
    stream.close().await.unwrap();
    assert!(
        started.elapsed() < CLOSE_WAIT + Duration::from_millis(500),
        "close did not return within the bounded wait"
    );

    let frame = server.await.unwrap();
    assert_eq!(frame.map(|f| f.code), Some(CloseCode::Normal));
}
