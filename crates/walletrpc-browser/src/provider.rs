//! JSON-RPC client backed by an injected single-call wallet transport.
//!
//! Features:
//! - Single-call dispatch with batch rejection (`batch_max = 1`)
//! - Transport error normalization (4001 / 4200 code rewriting)
//! - Debug event channel around every transport call
//! - Signer resolution with an `eth_requestAccounts` permission prompt

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use walletrpc_core::{
    classify_rpc_error, AccountSelector, CallRecord, DispatchCapabilities, JsonRpcClient,
    JsonRpcPayload, RpcError, RpcErrorBody, RpcParams, Signer, WalletError, WalletTransport,
    UNSUPPORTED_PREFIX, USER_DENIED_PREFIX,
};

use crate::debug::{DebugBus, DebugEvent};

/// A transport failure tagged with the payload that provoked it.
///
/// The payload is kept so callers that bypass dispatch (the permission
/// prompt in [`WalletRpcClient::resolve_signer`]) can still classify the
/// failure against its originating request.
#[derive(Debug, Clone)]
struct RequestFailure {
    error: WalletError,
    payload: JsonRpcPayload,
}

/// JSON-RPC client over an injected single-call wallet transport.
///
/// The transport binding is fixed at construction and never changes. The
/// client reports `batch_max = 1` to the base and additionally enforces it
/// in `dispatch`: the underlying interface can express exactly one logical
/// call per invocation, so a batch is a contract violation rather than a
/// transient failure.
pub struct WalletRpcClient<T: WalletTransport> {
    transport: T,
    debug: DebugBus,
    next_id: AtomicU64,
}

impl<T: WalletTransport> WalletRpcClient<T> {
    /// Wrap an injected transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            debug: DebugBus::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Subscribe to the debug event side channel.
    pub fn subscribe_debug(&self) -> broadcast::Receiver<DebugEvent> {
        self.debug.subscribe()
    }

    /// Forward one payload to the transport, bracketed by debug events.
    ///
    /// Exactly one `SendRequest` precedes the transport call and exactly one
    /// `ReceiveResult` or `ReceiveError` follows its resolution.
    async fn raw_request(&self, payload: &JsonRpcPayload) -> Result<Value, RequestFailure> {
        self.debug.emit(DebugEvent::SendRequest {
            method: payload.method.clone(),
            params: payload.params.clone(),
        });

        match self
            .transport
            .request(&payload.method, payload.params.clone())
            .await
        {
            Ok(result) => {
                self.debug.emit(DebugEvent::ReceiveResult {
                    result: result.clone(),
                });
                Ok(result)
            }
            Err(error) => {
                tracing::warn!(
                    method = %payload.method,
                    code = ?error.code,
                    "transport call failed"
                );
                self.debug.emit(DebugEvent::ReceiveError {
                    error: error.clone(),
                });
                Err(RequestFailure {
                    error,
                    payload: payload.clone(),
                })
            }
        }
    }

    /// Check whether the wallet currently exposes the selected account.
    ///
    /// An index is a position check — `true` iff the account list has more
    /// than `index` entries. An address matches case-insensitively against
    /// every listed account.
    pub async fn has_account(
        &self,
        selector: impl Into<AccountSelector>,
    ) -> Result<bool, RpcError> {
        let accounts: Vec<String> =
            serde_json::from_value(self.send("eth_accounts", RpcParams::default()).await?)?;

        Ok(match selector.into() {
            AccountSelector::Index(i) => accounts.len() > i,
            AccountSelector::Address(a) => accounts.iter().any(|x| x.eq_ignore_ascii_case(&a)),
        })
    }

    /// Resolve a signer, prompting the wallet for account access if needed.
    ///
    /// When the selected account is not yet exposed, issues
    /// `eth_requestAccounts` directly on the transport — the call is a
    /// side-effecting permission grant, so it bypasses dispatch's
    /// result-wrapping. A rejection is classified against its originating
    /// payload and raised. Once the account is present, resolution falls
    /// through to the base's generic lookup.
    pub async fn resolve_signer(
        &self,
        selector: impl Into<AccountSelector>,
    ) -> Result<Signer, RpcError> {
        let selector = selector.into();

        if !self.has_account(selector.clone()).await? {
            let payload =
                JsonRpcPayload::new(self.next_request_id(), "eth_requestAccounts", vec![]);
            if let Err(failure) = self.raw_request(&payload).await {
                let record = RpcErrorBody::from(failure.error);
                return Err(self.classify_error(&failure.payload, &record));
            }
        }

        self.lookup_signer(selector).await
    }
}

#[async_trait]
impl<T: WalletTransport> JsonRpcClient for WalletRpcClient<T> {
    async fn dispatch(&self, batch: &[JsonRpcPayload]) -> Result<Vec<CallRecord>, RpcError> {
        // Enforced locally even though capabilities() already says so.
        let payload = match batch {
            [payload] => payload,
            other => {
                return Err(RpcError::BatchUnsupported { size: other.len() });
            }
        };

        match self.raw_request(payload).await {
            Ok(result) => Ok(vec![CallRecord::Result {
                id: payload.id,
                result,
            }]),
            Err(failure) => Ok(vec![CallRecord::Error {
                id: payload.id,
                error: failure.error.into(),
            }]),
        }
    }

    fn next_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn capabilities(&self) -> DispatchCapabilities {
        DispatchCapabilities { batch_max: 1 }
    }

    /// Rewrite transport-family codes into message markers, then classify
    /// generically. Works on an owned copy so the caller's record is never
    /// mutated; `code` and `data` survive the rewrite.
    fn classify_error(&self, payload: &JsonRpcPayload, error: &RpcErrorBody) -> RpcError {
        let mut error = error.clone();
        match error.code {
            Some(4001) => error.message = format!("{USER_DENIED_PREFIX}{}", error.message),
            Some(4200) => error.message = format!("{UNSUPPORTED_PREFIX}{}", error.message),
            _ => {}
        }
        classify_rpc_error(payload, &error)
    }
}
