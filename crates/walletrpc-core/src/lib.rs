//! walletrpc-core — client-base contract and types for WalletRPC.
//!
//! # Overview
//!
//! WalletRPC bridges injected single-call wallet transports (the
//! `request(method, params)` interface browser wallets expose) into the
//! dispatch and batching semantics of a generic JSON-RPC client base.
//! The core crate defines:
//!
//! - [`WalletTransport`] — the injected single-call transport trait
//! - [`JsonRpcClient`] — the client-base contract a dispatch backend implements
//! - [`JsonRpcPayload`] / [`CallRecord`] — wire types
//! - [`WalletError`] / [`RpcError`] — raw and classified error types
//! - [`AccountSelector`] / [`Signer`] — account selection for signer lookup

pub mod client;
pub mod error;
pub mod request;
pub mod signer;
pub mod transport;

pub use client::{DispatchCapabilities, JsonRpcClient};
pub use error::{classify_rpc_error, RpcError, WalletError, UNSUPPORTED_PREFIX, USER_DENIED_PREFIX};
pub use request::{CallRecord, JsonRpcPayload, RpcErrorBody, RpcParams};
pub use signer::{AccountSelector, Signer};
pub use transport::WalletTransport;
