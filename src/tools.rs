//! Tool surface of the dev server.
//!
//! Tools: fetch_net_worth, fetch_credit_report, fetch_epf_details,
//! fetch_mf_transactions, fetch_bank_transactions, fetch_stock_transactions
//!
//! All six take no parameters; the data returned depends entirely on the
//! phone number the session logged in with. Besides the live probe paths,
//! this module serves tool replies straight from the server's test data
//! directory (`<dir>/<phone>/<tool>.json`), which stands in for a live call.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{ProbeError, Result};

/// The fixed set of tool names the dev server understands.
pub const TOOL_NAMES: [&str; 6] = [
    "fetch_net_worth",
    "fetch_credit_report",
    "fetch_epf_details",
    "fetch_mf_transactions",
    "fetch_bank_transactions",
    "fetch_stock_transactions",
];

/// A tool definition mirroring the MCP tools/list shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    /// Tool name (e.g., "fetch_net_worth")
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonValue,
}

impl ToolDef {
    /// Create a new tool definition.
    pub fn new(name: &str, description: &str, input_schema: JsonValue) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// A single tool invocation. Immutable once built.
#[derive(Debug, Clone)]
pub struct ToolCallRequest {
    /// Name of the server-side tool to invoke.
    pub tool_name: String,
    /// Tool parameters; every known tool takes none.
    pub parameters: Map<String, JsonValue>,
}

impl ToolCallRequest {
    /// Create a parameterless call for the given tool.
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            parameters: Map::new(),
        }
    }
}

fn no_params() -> JsonValue {
    serde_json::json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

/// Get all tool definitions, in menu order.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "fetch_net_worth",
            "Fetch the net worth summary for the logged-in phone number: asset and \
             liability totals with a per-account breakdown.",
            no_params(),
        ),
        ToolDef::new(
            "fetch_credit_report",
            "Fetch the credit report: score, open accounts, and repayment history.",
            no_params(),
        ),
        ToolDef::new(
            "fetch_epf_details",
            "Fetch Employees' Provident Fund balances and contribution history.",
            no_params(),
        ),
        ToolDef::new(
            "fetch_mf_transactions",
            "Fetch mutual fund transactions: orders, folios, and NAV at execution.",
            no_params(),
        ),
        ToolDef::new(
            "fetch_bank_transactions",
            "Fetch bank account transactions across all linked accounts.",
            no_params(),
        ),
        ToolDef::new(
            "fetch_stock_transactions",
            "Fetch stock transactions: trades, quantities, and prices.",
            no_params(),
        ),
    ]
}

/// Resolve interactive input to a tool name.
///
/// Accepts either a 1-based menu number or a full tool name.
pub fn resolve(input: &str) -> Result<&'static str> {
    if let Ok(n) = input.parse::<usize>() {
        if (1..=TOOL_NAMES.len()).contains(&n) {
            return Ok(TOOL_NAMES[n - 1]);
        }
    }

    TOOL_NAMES
        .iter()
        .find(|name| **name == input)
        .copied()
        .ok_or_else(|| ProbeError::UnknownTool(input.to_string()))
}

/// Read a tool reply from the local test data directory.
///
/// Returns the exact byte content of `<data_dir>/<phone_number>/<tool_name>.json`.
pub fn read_local(data_dir: &Path, phone_number: &str, tool_name: &str) -> Result<Vec<u8>> {
    let path: PathBuf = data_dir
        .join(phone_number)
        .join(format!("{tool_name}.json"));

    std::fs::read(&path).map_err(|source| ProbeError::TestData { path, source })
}
