//! Candidate request encodings.
//!
//! The dev server's accepted message shape is unknown, so a tool call is
//! tried in several guessed encodings: the session identifier travels as a
//! query parameter, a custom header, a cookie, or inside one of five JSON
//! body shapes. The order below is fixed; the sweep never learns which shape
//! the server actually accepted.

use serde_json::{json, Value as JsonValue};

use crate::error::Result;
use crate::tools::ToolCallRequest;

/// One guessed shape for delivering a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// Session id as `?sessionId=` query parameter, MCP-style body.
    QueryParam,
    /// Session id in `X-Session-ID` / `Session-ID` headers, MCP-style body.
    CustomHeader,
    /// Session id in a `Cookie: sessionId=` header, MCP-style body.
    Cookie,
    /// Flat body: `{"sessionId", "toolName", "parameters"}`.
    SimpleBody,
    /// Flat body with a type tag: `{"type", "sessionId", "name", "parameters"}`.
    TypedFlat,
    /// Body with a nested request object: `{"sessionId", "callToolRequest"}`.
    NestedRequest,
    /// Flat body with snake_case keys.
    SnakeCase,
    /// MCP-style body carrying the session id: `{"type", "sessionId", "toolInput"}`.
    ToolInput,
}

/// Every candidate, in the fixed order the sweep tries them.
pub const CANDIDATES: [Candidate; 8] = [
    Candidate::QueryParam,
    Candidate::CustomHeader,
    Candidate::Cookie,
    Candidate::SimpleBody,
    Candidate::TypedFlat,
    Candidate::NestedRequest,
    Candidate::SnakeCase,
    Candidate::ToolInput,
];

impl Candidate {
    /// Short label used in attempt records and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Candidate::QueryParam => "query-param",
            Candidate::CustomHeader => "custom-header",
            Candidate::Cookie => "cookie",
            Candidate::SimpleBody => "simple-body",
            Candidate::TypedFlat => "typed-flat",
            Candidate::NestedRequest => "nested-request",
            Candidate::SnakeCase => "snake-case",
            Candidate::ToolInput => "tool-input",
        }
    }

    /// Build the JSON body this candidate sends.
    ///
    /// The transport candidates (query parameter, header, cookie) all carry
    /// the same MCP-style body; the session id rides outside it.
    pub fn body(&self, session_id: &str, call: &ToolCallRequest) -> JsonValue {
        match self {
            Candidate::QueryParam | Candidate::CustomHeader | Candidate::Cookie => json!({
                "type": "callTool",
                "toolInput": {
                    "name": call.tool_name,
                    "parameters": call.parameters,
                },
            }),
            Candidate::SimpleBody => json!({
                "sessionId": session_id,
                "toolName": call.tool_name,
                "parameters": call.parameters,
            }),
            Candidate::TypedFlat => json!({
                "type": "callTool",
                "sessionId": session_id,
                "name": call.tool_name,
                "parameters": call.parameters,
            }),
            Candidate::NestedRequest => json!({
                "sessionId": session_id,
                "callToolRequest": {
                    "toolName": call.tool_name,
                    "params": call.parameters,
                },
            }),
            Candidate::SnakeCase => json!({
                "session_id": session_id,
                "tool_name": call.tool_name,
                "parameters": call.parameters,
            }),
            Candidate::ToolInput => json!({
                "type": "callTool",
                "sessionId": session_id,
                "toolInput": {
                    "name": call.tool_name,
                    "parameters": call.parameters,
                },
            }),
        }
    }

    /// Build the concrete HTTP request for this candidate.
    ///
    /// Construction can fail (for instance when the session id is not a
    /// legal header value); the sweep records that and moves on.
    pub fn request(
        &self,
        http: &reqwest::Client,
        base_url: &str,
        session_id: &str,
        call: &ToolCallRequest,
    ) -> Result<reqwest::Request> {
        let url = format!("{base_url}/mcp/stream");

        let builder = match self {
            Candidate::QueryParam => http.post(&url).query(&[("sessionId", session_id)]),
            Candidate::CustomHeader => http
                .post(&url)
                .header("X-Session-ID", session_id)
                .header("Session-ID", session_id),
            Candidate::Cookie => http
                .post(&url)
                .header(reqwest::header::COOKIE, format!("sessionId={session_id}")),
            _ => http.post(&url),
        };

        let request = builder.json(&self.body(session_id, call)).build()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call() -> ToolCallRequest {
        ToolCallRequest::new("fetch_net_worth")
    }

    #[test]
    fn sweep_order_is_fixed() {
        let labels: Vec<&str> = CANDIDATES.iter().map(Candidate::label).collect();
        assert_eq!(
            labels,
            [
                "query-param",
                "custom-header",
                "cookie",
                "simple-body",
                "typed-flat",
                "nested-request",
                "snake-case",
                "tool-input",
            ]
        );
    }

    #[test]
    fn body_shapes_carry_the_session_where_expected() {
        let call = call();

        let simple = Candidate::SimpleBody.body("s1", &call);
        assert_eq!(simple["sessionId"], "s1");
        assert_eq!(simple["toolName"], "fetch_net_worth");
        assert!(simple["parameters"].as_object().unwrap().is_empty());

        let snake = Candidate::SnakeCase.body("s1", &call);
        assert_eq!(snake["session_id"], "s1");
        assert_eq!(snake["tool_name"], "fetch_net_worth");

        let nested = Candidate::NestedRequest.body("s1", &call);
        assert_eq!(nested["callToolRequest"]["toolName"], "fetch_net_worth");

        let tool_input = Candidate::ToolInput.body("s1", &call);
        assert_eq!(tool_input["type"], "callTool");
        assert_eq!(tool_input["toolInput"]["name"], "fetch_net_worth");

        // Transport candidates leave the session id out of the body.
        let header = Candidate::CustomHeader.body("s1", &call);
        assert!(header.get("sessionId").is_none());
        assert_eq!(header["toolInput"]["name"], "fetch_net_worth");
    }

    #[test]
    fn query_param_candidate_encodes_the_session_in_the_url() {
        let http = reqwest::Client::new();
        let request = Candidate::QueryParam
            .request(&http, "http://localhost:8080", "probe_1", &call())
            .unwrap();
        assert_eq!(request.url().query(), Some("sessionId=probe_1"));
    }

    #[test]
    fn header_candidates_fail_construction_for_illegal_session_ids() {
        let http = reqwest::Client::new();
        // A newline can never appear in a header value.
        let bad = "probe\n1";

        assert!(Candidate::CustomHeader
            .request(&http, "http://localhost:8080", bad, &call())
            .is_err());
        assert!(Candidate::Cookie
            .request(&http, "http://localhost:8080", bad, &call())
            .is_err());

        // The same session id is still fine for the body-only candidates.
        assert!(Candidate::SimpleBody
            .request(&http, "http://localhost:8080", bad, &call())
            .is_ok());
    }
}
