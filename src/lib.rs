//! # fi-mcp-probe
//!
//! Probe client for the Fi money MCP (Model Context Protocol) dev server.
//!
//! The server's accepted tool-call message shape is undocumented, so this
//! crate logs in over HTTP, then tries a fixed list of guessed encodings —
//! session id in the query string, a header, a cookie, or one of several
//! JSON body shapes — against `/mcp/stream`, recording each attempt's status
//! and body for a human to compare. It can also hold a streaming WebSocket
//! open to receive asynchronous replies, or serve tool replies straight from
//! the server's on-disk test data. This is a reverse-engineering harness,
//! not a protocol implementation: nothing here learns which shape won.
//!
//! ## Usage
//!
//! The binary drives everything:
//!
//! ```text
//! fi-mcp-probe login
//! fi-mcp-probe probe fetch_net_worth
//! fi-mcp-probe stream
//! fi-mcp-probe local --data-dir test_data_dir
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use fi_mcp_probe::{ProbeClient, Session, ToolCallRequest};
//!
//! # async fn run() -> fi_mcp_probe::Result<()> {
//! let session = Session::new("probe_session_1", "1111111111");
//! let mut client = ProbeClient::new("localhost:8080", session);
//! client.login().await?;
//! let attempts = client.probe_tool(&ToolCallRequest::new("fetch_net_worth")).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod convert;
mod encoding;
mod error;
mod session;
mod stream;
mod tools;

pub use client::{Attempt, AttemptOutcome, ProbeClient};
pub use convert::pretty;
pub use encoding::{Candidate, CANDIDATES};
pub use error::{ProbeError, Result};
pub use session::{Session, TEST_PHONE_NUMBERS};
pub use stream::{McpStream, CLOSE_WAIT, HANDSHAKE_TIMEOUT};
pub use tools::{read_local, resolve, tools, ToolCallRequest, ToolDef, TOOL_NAMES};
