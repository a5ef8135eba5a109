//! The `WalletTransport` trait — the injected single-call boundary.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::WalletError;
use crate::request::RpcParams;

/// The single operation an injected wallet transport exposes.
///
/// This is the sole I/O boundary of the bridge: one named call in, a promise
/// of its raw result (or a rejection carrying optional `code`/`data`) out.
/// The transport has no notion of request ids or batching — both live on the
/// client side.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` for use across Tokio tasks.
///
/// # Object Safety
/// The trait is object-safe and can be stored as `Arc<dyn WalletTransport>`.
#[async_trait]
pub trait WalletTransport: Send + Sync + 'static {
    /// Perform a single named call and return its raw result.
    async fn request(&self, method: &str, params: RpcParams) -> Result<Value, WalletError>;
}
