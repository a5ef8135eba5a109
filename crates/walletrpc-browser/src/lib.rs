//! walletrpc-browser — JSON-RPC client over injected browser wallets.
//!
//! # Features
//! - Wraps a single-call `request(method, params)` wallet transport
//! - Implements the generic client-base dispatch contract (`batch_max = 1`)
//! - Normalizes wallet error codes (4001 user rejection, 4200 unsupported)
//! - Fire-and-forget debug events around every transport call
//! - Signer resolution with an account-access prompt

pub mod debug;
pub mod provider;

pub use debug::{DebugBus, DebugEvent};
pub use provider::WalletRpcClient;
