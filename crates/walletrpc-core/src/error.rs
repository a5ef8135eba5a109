//! Error taxonomy: raw transport failures and classified RPC errors.

use serde_json::Value;
use thiserror::Error;

use crate::request::{JsonRpcPayload, RpcErrorBody};

/// Marker prepended to error messages for calls the user declined.
///
/// Written by the adapter's classification hook when the transport reports
/// code 4001; recognized by [`classify_rpc_error`].
pub const USER_DENIED_PREFIX: &str = "user-denied: ";

/// Marker prepended to error messages for methods the transport cannot serve
/// (transport code 4200).
pub const UNSUPPORTED_PREFIX: &str = "unsupported: ";

/// Failure reported by an injected wallet transport.
///
/// The transport family attaches a numeric `code` and arbitrary `data` when
/// it has them; both are read-only inputs and are preserved verbatim across
/// the dispatch boundary.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct WalletError {
    pub message: String,
    pub code: Option<i64>,
    pub data: Option<Value>,
}

impl WalletError {
    /// Create a failure with a message and no code or data.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            data: None,
        }
    }

    /// Create a failure with a transport-family code.
    pub fn with_code(message: impl Into<String>, code: i64) -> Self {
        Self {
            message: message.into(),
            code: Some(code),
            data: None,
        }
    }

    /// Returns `true` if the user declined the request in their wallet.
    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(4001)
    }

    /// Returns `true` if the transport does not implement the method.
    pub fn is_unsupported_method(&self) -> bool {
        self.code == Some(4200)
    }
}

impl From<WalletError> for RpcErrorBody {
    fn from(e: WalletError) -> Self {
        Self {
            code: e.code,
            message: e.message,
            data: e.data,
        }
    }
}

/// A classified RPC error — the taxonomy the client base hands to callers.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Dispatch was handed a batch the backend cannot express. Raised before
    /// any transport call is attempted; a contract violation, not a
    /// transient failure.
    #[error("backend does not support batch dispatch (got {size} requests)")]
    BatchUnsupported { size: usize },

    /// The user declined the request in their wallet.
    #[error("user rejected {method}: {message}")]
    UserRejected {
        method: String,
        message: String,
        code: Option<i64>,
        data: Option<Value>,
    },

    /// The backend does not implement the requested operation.
    #[error("unsupported operation {method}: {message}")]
    Unsupported {
        method: String,
        message: String,
        code: Option<i64>,
        data: Option<Value>,
    },

    /// The requested account is not among those the backend exposes.
    #[error("unknown account: {requested}")]
    UnknownAccount { requested: String },

    /// No record matching the request id came back from dispatch.
    #[error("no response for request {id}")]
    MissingResponse { id: u64 },

    /// Response could not be deserialized into the expected shape.
    #[error("deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Any other JSON-RPC error response.
    #[error("error calling {method}: {error}")]
    Server { method: String, error: RpcErrorBody },
}

impl RpcError {
    /// The numeric error code carried by the underlying record, if any.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::UserRejected { code, .. } | Self::Unsupported { code, .. } => *code,
            Self::Server { error, .. } => error.code,
            _ => None,
        }
    }

    /// Returns `true` if the user declined the request.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::UserRejected { .. })
    }
}

/// Generic classification of a per-call error record.
///
/// Marker-prefixed messages (see [`USER_DENIED_PREFIX`] and
/// [`UNSUPPORTED_PREFIX`]) take precedence; `-32601` (method not found)
/// also classifies as unsupported. The record's `code` and `data` survive
/// classification so callers can still inspect them.
pub fn classify_rpc_error(payload: &JsonRpcPayload, error: &RpcErrorBody) -> RpcError {
    let method = payload.method.clone();

    if error.message.starts_with(USER_DENIED_PREFIX) {
        return RpcError::UserRejected {
            method,
            message: error.message.clone(),
            code: error.code,
            data: error.data.clone(),
        };
    }

    if error.message.starts_with(UNSUPPORTED_PREFIX) || error.code == Some(-32601) {
        return RpcError::Unsupported {
            method,
            message: error.message.clone(),
            code: error.code,
            data: error.data.clone(),
        };
    }

    RpcError::Server {
        method,
        error: error.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: Option<i64>, message: &str) -> RpcErrorBody {
        RpcErrorBody {
            code,
            message: message.into(),
            data: None,
        }
    }

    #[test]
    fn user_denied_marker_classifies_as_rejection() {
        let payload = JsonRpcPayload::new(1, "eth_requestAccounts", vec![]);
        let err = classify_rpc_error(
            &payload,
            &record(Some(4001), "user-denied: User rejected the request"),
        );
        assert!(err.is_user_rejection());
        assert_eq!(err.code(), Some(4001));
        assert!(err.to_string().contains(USER_DENIED_PREFIX));
    }

    #[test]
    fn unsupported_marker_and_method_not_found() {
        let payload = JsonRpcPayload::new(1, "eth_subscribe", vec![]);
        let err = classify_rpc_error(&payload, &record(Some(4200), "unsupported: no subscriptions"));
        assert!(matches!(err, RpcError::Unsupported { .. }));

        let err = classify_rpc_error(&payload, &record(Some(-32601), "method not found"));
        assert!(matches!(err, RpcError::Unsupported { .. }));
    }

    #[test]
    fn unmarked_errors_pass_through_as_server_errors() {
        let payload = JsonRpcPayload::new(2, "eth_call", vec![]);
        let err = classify_rpc_error(&payload, &record(Some(-32000), "execution reverted"));
        match err {
            RpcError::Server { method, error } => {
                assert_eq!(method, "eth_call");
                assert_eq!(error.message, "execution reverted");
                assert_eq!(error.code, Some(-32000));
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[test]
    fn wallet_error_predicates() {
        assert!(WalletError::with_code("no", 4001).is_user_rejection());
        assert!(WalletError::with_code("nope", 4200).is_unsupported_method());
        assert!(!WalletError::new("boom").is_user_rejection());
    }
}
