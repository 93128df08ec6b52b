use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::info;

use crate::ids::RequestId;

use super::request::Request;

/// The network collaborator the pipeline is built against.
///
/// Implementations own connection handling entirely; the core only ever
/// polls for a request, hands back a rendered wire message, and flips the
/// transport on and off around the pipeline's lifetime. All four operations
/// must be non-blocking: `receive_message` answers `None` rather than
/// waiting, and a `false` from `send_message` means "no progress this
/// cycle", which the pipeline tolerates and retries.
pub trait Transport: Send + Sync {
    /// Begin accepting traffic on `port`. Returns whether startup succeeded.
    fn start(&self, port: u16) -> bool;

    /// Stop accepting traffic. Idempotent.
    fn stop(&self);

    /// Poll for at most one pending request.
    fn receive_message(&self) -> Option<Request>;

    /// Emit a rendered wire message for the connection identified by `id`.
    /// Returns whether emission succeeded.
    fn send_message(&self, id: RequestId, wire: &str) -> bool;
}

/// In-memory transport for tests and in-process hosts.
///
/// Producers push requests with [`inject`](ChannelTransport::inject); the
/// pipeline polls them back out in FIFO order. Emitted wire messages pile up
/// until the host collects them with [`drain_sent`](ChannelTransport::drain_sent).
/// Both directions refuse to move traffic while the transport is stopped,
/// matching how a real listener behaves between `stop` and `start`.
#[derive(Debug, Default)]
pub struct ChannelTransport {
    running: AtomicBool,
    inbox: Mutex<VecDeque<Request>>,
    outbox: Mutex<Vec<(RequestId, String)>>,
}

impl ChannelTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a request for the pipeline to pick up on a later intake step.
    pub fn inject(&self, request: Request) {
        self.inbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(request);
    }

    /// Collect every wire message emitted since the last drain.
    #[must_use]
    pub fn drain_sent(&self) -> Vec<(RequestId, String)> {
        std::mem::take(&mut *self.outbox.lock().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Transport for ChannelTransport {
    fn start(&self, port: u16) -> bool {
        self.running.store(true, Ordering::SeqCst);
        info!(port = port, "Transport started");
        true
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        info!("Transport stopped");
    }

    fn receive_message(&self) -> Option<Request> {
        if !self.is_running() {
            return None;
        }
        self.inbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    fn send_message(&self, id: RequestId, wire: &str) -> bool {
        if !self.is_running() {
            return false;
        }
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, wire.to_string()));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn test_receive_requires_start() {
        let transport = ChannelTransport::new();
        transport.inject(Request::new(Method::GET, "/x", ""));
        assert!(transport.receive_message().is_none());

        assert!(transport.start(0));
        assert!(transport.receive_message().is_some());
    }

    #[test]
    fn test_send_requires_start() {
        let transport = ChannelTransport::new();
        let id = RequestId::new();
        assert!(!transport.send_message(id, "x"));

        transport.start(0);
        assert!(transport.send_message(id, "x"));
        assert_eq!(transport.drain_sent().len(), 1);
        assert!(transport.drain_sent().is_empty());
    }

    #[test]
    fn test_stop_halts_traffic() {
        let transport = ChannelTransport::new();
        transport.start(0);
        transport.stop();
        transport.inject(Request::new(Method::GET, "/x", ""));
        assert!(transport.receive_message().is_none());
        assert!(!transport.send_message(RequestId::new(), "x"));
    }
}
