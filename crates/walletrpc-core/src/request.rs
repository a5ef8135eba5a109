//! JSON-RPC 2.0 wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters of a JSON-RPC call — positional list or named map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcParams {
    List(Vec<Value>),
    Map(serde_json::Map<String, Value>),
}

impl RpcParams {
    /// Number of parameters.
    pub fn len(&self) -> usize {
        match self {
            Self::List(v) => v.len(),
            Self::Map(m) => m.len(),
        }
    }

    /// Returns `true` if no parameters were given.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RpcParams {
    /// An absent `params` field is treated as the empty positional list.
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl From<Vec<Value>> for RpcParams {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

/// A JSON-RPC 2.0 request payload — one logical invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcPayload {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    #[serde(default)]
    pub params: RpcParams,
}

impl JsonRpcPayload {
    /// Create a new JSON-RPC 2.0 payload.
    pub fn new(id: u64, method: impl Into<String>, params: impl Into<RpcParams>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            method: method.into(),
            params: params.into(),
        }
    }
}

/// The error object of a per-call error record.
///
/// `code` and `data` are optional — injected transports are not required
/// to attach either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl std::fmt::Display for RpcErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "RPC error {}: {}", code, self.message),
            None => write!(f, "RPC error: {}", self.message),
        }
    }
}

/// The outcome of one dispatched payload — a result or an error record,
/// carrying the id of the request it answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallRecord {
    Result { id: u64, result: Value },
    Error { id: u64, error: RpcErrorBody },
}

impl CallRecord {
    /// Id of the request this record answers.
    pub fn id(&self) -> u64 {
        match self {
            Self::Result { id, .. } | Self::Error { id, .. } => *id,
        }
    }

    /// Returns `true` if this record carries a result.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Result { .. })
    }

    /// Unwrap the result value or return the error record.
    pub fn into_result(self) -> Result<Value, RpcErrorBody> {
        match self {
            Self::Result { result, .. } => Ok(result),
            Self::Error { error, .. } => Err(error),
        }
    }
}
