//! Authenticated HTTP probe client.
//!
//! Performs the form-encoded login that binds the server-side session to our
//! identifier, then sweeps the candidate encodings against `/mcp/stream`,
//! recording every attempt's status and body. There is no success predicate:
//! the records exist for a human to compare.

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::encoding::CANDIDATES;
use crate::error::{ProbeError, Result};
use crate::session::Session;
use crate::tools::ToolCallRequest;

/// What happened to a single candidate attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// The server answered; status and raw body, success or not.
    Reply {
        /// HTTP status of the reply.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },
    /// Request construction or transport failed before a reply arrived.
    Failed(ProbeError),
}

/// Record of one candidate attempt in a sweep.
#[derive(Debug)]
pub struct Attempt {
    /// Label of the candidate encoding that was tried.
    pub candidate: &'static str,
    /// How the attempt ended.
    pub outcome: AttemptOutcome,
}

/// HTTP client bound to one probe session.
pub struct ProbeClient {
    http: reqwest::Client,
    /// Server address as `host:port`.
    server: String,
    session: Session,
    /// Set after a 200 from `/login`; tool calls are refused before that.
    logged_in: bool,
}

impl ProbeClient {
    /// Create a client for the given server address (`host:port`).
    pub fn new(server: impl Into<String>, session: Session) -> Self {
        Self {
            http: reqwest::Client::new(),
            server: server.into(),
            session,
            logged_in: false,
        }
    }

    /// The session this client logs in as.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn http_base(&self) -> String {
        format!("http://{}", self.server)
    }

    /// Log in: visit the mock login page, then POST the form credentials.
    ///
    /// Only HTTP 200 counts as success; any other status or transport error
    /// is fatal for the run. Returns the login response body on success.
    pub async fn login(&mut self) -> Result<String> {
        let base = self.http_base();

        // The server expects the browser login page to have been visited for
        // this session first. The response itself is ignored.
        let mock_url = format!("{base}/mockWebPage?sessionId={}", self.session.session_id());
        debug!(url = %mock_url, "visiting mock login page");
        self.http.get(&mock_url).send().await?;

        info!(
            session_id = self.session.session_id(),
            phone_number = self.session.phone_number(),
            "logging in"
        );
        let response = self
            .http
            .post(format!("{base}/login"))
            .form(&[
                ("sessionId", self.session.session_id()),
                ("phoneNumber", self.session.phone_number()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProbeError::LoginFailed { status });
        }

        let body = response.text().await?;
        self.logged_in = true;
        info!("login successful");
        Ok(body)
    }

    /// Sweep every candidate encoding for one tool call.
    ///
    /// Refuses to run before a successful login. Each candidate is always
    /// attempted: a construction or transport failure is recorded and the
    /// sweep moves on. Which attempt (if any) the server accepted is for the
    /// caller to judge from the records.
    pub async fn probe_tool(&self, call: &ToolCallRequest) -> Result<Vec<Attempt>> {
        if !self.logged_in {
            return Err(ProbeError::NotLoggedIn);
        }

        let base = self.http_base();
        let session_id = self.session.session_id();
        let mut attempts = Vec::with_capacity(CANDIDATES.len());

        for candidate in &CANDIDATES {
            let label = candidate.label();

            let request = match candidate.request(&self.http, &base, session_id, call) {
                Ok(request) => request,
                Err(e) => {
                    warn!(candidate = label, error = %e, "request construction failed");
                    attempts.push(Attempt {
                        candidate: label,
                        outcome: AttemptOutcome::Failed(e),
                    });
                    continue;
                }
            };

            if let Some(bytes) = request.body().and_then(|b| b.as_bytes()) {
                debug!(
                    candidate = label,
                    payload = %String::from_utf8_lossy(bytes),
                    "sending tool call"
                );
            }

            match self.http.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    match response.text().await {
                        Ok(body) => {
                            info!(candidate = label, status = %status, "got reply");
                            attempts.push(Attempt {
                                candidate: label,
                                outcome: AttemptOutcome::Reply { status, body },
                            });
                        }
                        Err(e) => {
                            warn!(candidate = label, error = %e, "failed to read reply body");
                            attempts.push(Attempt {
                                candidate: label,
                                outcome: AttemptOutcome::Failed(e.into()),
                            });
                        }
                    }
                }
                Err(e) => {
                    warn!(candidate = label, error = %e, "send failed");
                    attempts.push(Attempt {
                        candidate: label,
                        outcome: AttemptOutcome::Failed(e.into()),
                    });
                }
            }
        }

        Ok(attempts)
    }
}
