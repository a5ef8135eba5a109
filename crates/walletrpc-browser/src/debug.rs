//! Fire-and-forget debug event channel.
//!
//! Every transport call is bracketed by notifications on this channel:
//! one [`DebugEvent::SendRequest`] strictly before the call, then exactly
//! one [`DebugEvent::ReceiveResult`] or [`DebugEvent::ReceiveError`] after
//! it resolves. Consumers are optional; publishing never blocks and cannot
//! fail the call path.

use serde_json::Value;
use tokio::sync::broadcast;

use walletrpc_core::{RpcParams, WalletError};

/// Buffered events per subscriber before the oldest are dropped.
const CHANNEL_CAPACITY: usize = 64;

/// A side-channel notification emitted around a transport call.
#[derive(Debug, Clone)]
pub enum DebugEvent {
    /// A payload is about to be forwarded to the transport.
    SendRequest { method: String, params: RpcParams },
    /// The transport resolved with a result.
    ReceiveResult { result: Value },
    /// The transport rejected the call.
    ReceiveError { error: WalletError },
}

/// Broadcast publisher for [`DebugEvent`]s.
#[derive(Debug, Clone)]
pub struct DebugBus {
    tx: broadcast::Sender<DebugEvent>,
}

impl DebugBus {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Hand out a receiver for events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DebugEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. A send with no live receivers is not an error.
    pub fn emit(&self, event: DebugEvent) {
        tracing::trace!(?event, "debug event");
        let _ = self.tx.send(event);
    }
}

impl Default for DebugBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_without_subscribers_is_silent() {
        let bus = DebugBus::new();
        bus.emit(DebugEvent::ReceiveResult {
            result: Value::String("0x1".into()),
        });
    }

    #[test]
    fn subscribers_see_events_in_order() {
        let bus = DebugBus::new();
        let mut rx = bus.subscribe();

        bus.emit(DebugEvent::SendRequest {
            method: "eth_chainId".into(),
            params: RpcParams::default(),
        });
        bus.emit(DebugEvent::ReceiveResult {
            result: Value::String("0x1".into()),
        });

        assert!(matches!(rx.try_recv().unwrap(), DebugEvent::SendRequest { .. }));
        assert!(matches!(rx.try_recv().unwrap(), DebugEvent::ReceiveResult { .. }));
        assert!(rx.try_recv().is_err());
    }
}
