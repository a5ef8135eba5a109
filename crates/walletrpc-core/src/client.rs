//! The `JsonRpcClient` trait — the generic client-base contract.
//!
//! A backend implements the low-level pieces (`dispatch`, id allocation,
//! capabilities) and inherits the generic machinery: the `send` entry point
//! with its one-time start gate, response correlation by id, error
//! classification and signer lookup. Queuing, polling and retry loops are a
//! concrete base's business, not part of this contract.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{classify_rpc_error, RpcError};
use crate::request::{CallRecord, JsonRpcPayload, RpcErrorBody, RpcParams};
use crate::signer::{AccountSelector, Signer};

/// Capabilities a dispatch backend reports to the client base.
#[derive(Debug, Clone, Copy)]
pub struct DispatchCapabilities {
    /// Largest batch the backend will accept in one `dispatch` call.
    pub batch_max: usize,
}

impl Default for DispatchCapabilities {
    fn default() -> Self {
        Self { batch_max: 100 }
    }
}

/// The contract between a dispatch backend and the generic client base.
///
/// Required methods are the backend-specific surface; provided methods are
/// the base's generic behavior and only need overriding when a backend has
/// a sharper answer (e.g. transport-family error codes).
#[async_trait]
pub trait JsonRpcClient: Send + Sync {
    /// Low-level dispatch: produce exactly one [`CallRecord`] per accepted
    /// payload, with matching ids. Transport-level failures are returned as
    /// error records; an `Err` is reserved for contract violations.
    async fn dispatch(&self, batch: &[JsonRpcPayload]) -> Result<Vec<CallRecord>, RpcError>;

    /// Allocate the next request id.
    fn next_request_id(&self) -> u64;

    /// Capabilities consulted before batching calls together.
    fn capabilities(&self) -> DispatchCapabilities {
        DispatchCapabilities::default()
    }

    /// One-time startup hook awaited by [`send`](Self::send) before any
    /// dispatch. The default base has no connection to start.
    async fn ensure_started(&self) -> Result<(), RpcError> {
        Ok(())
    }

    /// Turn a per-call error record into a classified error.
    fn classify_error(&self, payload: &JsonRpcPayload, error: &RpcErrorBody) -> RpcError {
        classify_rpc_error(payload, error)
    }

    /// Send a single request and unwrap its result.
    ///
    /// Builds the payload with a fresh id, dispatches it, correlates the
    /// answering record by id and either returns the raw result value or
    /// the classified error.
    async fn send(&self, method: &str, params: RpcParams) -> Result<Value, RpcError> {
        self.ensure_started().await?;

        let payload = JsonRpcPayload::new(self.next_request_id(), method, params);
        tracing::debug!(id = payload.id, method = %payload.method, "sending request");

        let records = self.dispatch(std::slice::from_ref(&payload)).await?;
        let record = records
            .into_iter()
            .find(|r| r.id() == payload.id)
            .ok_or(RpcError::MissingResponse { id: payload.id })?;

        match record.into_result() {
            Ok(result) => Ok(result),
            Err(error) => Err(self.classify_error(&payload, &error)),
        }
    }

    /// Generic signer resolution: list the backend's accounts and select
    /// one by position or case-insensitive address.
    async fn lookup_signer(&self, selector: AccountSelector) -> Result<Signer, RpcError> {
        let accounts: Vec<String> =
            serde_json::from_value(self.send("eth_accounts", RpcParams::default()).await?)?;

        let requested = selector.to_string();
        let address = match selector {
            AccountSelector::Index(i) => accounts.get(i).cloned(),
            AccountSelector::Address(a) => {
                accounts.iter().find(|x| x.eq_ignore_ascii_case(&a)).cloned()
            }
        };

        address
            .map(Signer::new)
            .ok_or(RpcError::UnknownAccount { requested })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    use crate::error::USER_DENIED_PREFIX;

    /// Backend answering from a fixed script, for exercising the provided
    /// methods of the contract.
    struct StaticBackend {
        accounts: Vec<String>,
        error: Option<RpcErrorBody>,
        skew_ids: bool,
        next_id: AtomicU64,
    }

    impl StaticBackend {
        fn with_accounts(accounts: &[&str]) -> Self {
            Self {
                accounts: accounts.iter().map(|a| a.to_string()).collect(),
                error: None,
                skew_ids: false,
                next_id: AtomicU64::new(1),
            }
        }
    }

    #[async_trait]
    impl JsonRpcClient for StaticBackend {
        async fn dispatch(&self, batch: &[JsonRpcPayload]) -> Result<Vec<CallRecord>, RpcError> {
            let payload = &batch[0];
            let id = if self.skew_ids { payload.id + 1 } else { payload.id };

            if let Some(error) = &self.error {
                return Ok(vec![CallRecord::Error {
                    id,
                    error: error.clone(),
                }]);
            }

            let result = match payload.method.as_str() {
                "eth_accounts" => serde_json::json!(self.accounts),
                _ => Value::String("0x1".into()),
            };
            Ok(vec![CallRecord::Result { id, result }])
        }

        fn next_request_id(&self) -> u64 {
            self.next_id.fetch_add(1, Ordering::Relaxed)
        }
    }

    #[tokio::test]
    async fn send_unwraps_correlated_result() {
        let backend = StaticBackend::with_accounts(&[]);
        let result = backend.send("eth_chainId", RpcParams::default()).await.unwrap();
        assert_eq!(result, Value::String("0x1".into()));
    }

    #[tokio::test]
    async fn send_detects_uncorrelated_records() {
        let mut backend = StaticBackend::with_accounts(&[]);
        backend.skew_ids = true;
        let err = backend
            .send("eth_chainId", RpcParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::MissingResponse { .. }));
    }

    #[tokio::test]
    async fn send_classifies_error_records() {
        let mut backend = StaticBackend::with_accounts(&[]);
        backend.error = Some(RpcErrorBody {
            code: Some(4001),
            message: format!("{USER_DENIED_PREFIX}User rejected the request"),
            data: None,
        });
        let err = backend
            .send("eth_sendTransaction", RpcParams::default())
            .await
            .unwrap_err();
        assert!(err.is_user_rejection());
    }

    #[tokio::test]
    async fn lookup_signer_by_index_and_address() {
        let backend = StaticBackend::with_accounts(&["0xAAA", "0xBBB"]);

        let signer = backend.lookup_signer(AccountSelector::Index(1)).await.unwrap();
        assert_eq!(signer.address(), "0xBBB");

        let signer = backend
            .lookup_signer(AccountSelector::Address("0xaaa".into()))
            .await
            .unwrap();
        assert_eq!(signer.address(), "0xAAA");
    }

    #[tokio::test]
    async fn lookup_signer_unknown_account() {
        let backend = StaticBackend::with_accounts(&["0xAAA"]);

        let err = backend.lookup_signer(AccountSelector::Index(3)).await.unwrap_err();
        assert!(matches!(err, RpcError::UnknownAccount { .. }));

        let err = backend
            .lookup_signer(AccountSelector::Address("0xCCC".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::UnknownAccount { .. }));
    }
}
