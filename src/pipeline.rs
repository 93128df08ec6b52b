//! # Pipeline Module
//!
//! The poll-driven cycle that moves work between the transport, the queues,
//! and the dispatcher. One [`RequestPipeline::poll`] runs the three stages
//! in sequence:
//!
//! 1. **Intake** - pull at most one request from the transport into the
//!    request queue.
//! 2. **Request processing** - drain the request queue through the
//!    dispatcher, pushing each result (with its original request id) onto
//!    the response queue.
//! 3. **Response processing** - drain the response queue, rendering each
//!    response to its wire form and handing it to the transport.
//!
//! Every stage is idempotent and safe to invoke on an empty queue; it simply
//! reports that no work was done. A transport fault (`None` receive, `false`
//! send) means "no progress this cycle" and is retried on the next poll,
//! never treated as fatal. Requests are processed in strict arrival order,
//! and a response is only enqueued after its request has been fully
//! dispatched.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::dispatcher::Dispatcher;
use crate::queue::{RequestQueue, ResponseQueue};
use crate::runtime_config::RuntimeConfig;
use crate::server::Transport;

/// Drives request intake, dispatch, and response emission over the two
/// queues.
///
/// Every collaborator is passed in at construction time; the pipeline holds
/// no hidden state beyond the queues it was given. The host owns the loop:
/// the pipeline only ever does one bounded slice of work per call, and
/// suspension (if any) happens inside the transport.
pub struct RequestPipeline {
    transport: Arc<dyn Transport>,
    dispatcher: Arc<Dispatcher>,
    requests: Arc<RequestQueue>,
    responses: Arc<ResponseQueue>,
    queue_warn_depth: usize,
}

impl RequestPipeline {
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        dispatcher: Arc<Dispatcher>,
        requests: Arc<RequestQueue>,
        responses: Arc<ResponseQueue>,
        config: &RuntimeConfig,
    ) -> Self {
        Self {
            transport,
            dispatcher,
            requests,
            responses,
            queue_warn_depth: config.queue_warn_depth,
        }
    }

    /// Pull at most one request from the transport into the request queue.
    ///
    /// Returns whether intake occurred. `false` covers both "nothing
    /// pending" and a transport that is not running; the caller retries on
    /// the next cycle either way.
    pub fn intake(&self) -> bool {
        let Some(request) = self.transport.receive_message() else {
            return false;
        };

        let depth = self.requests.len();
        if depth >= self.queue_warn_depth {
            warn!(
                depth = depth,
                warn_depth = self.queue_warn_depth,
                "Request queue depth above watermark"
            );
        }

        debug!(
            request_id = %request.id,
            method = %request.method,
            path = %request.path,
            "Request received"
        );
        self.requests.push(request);
        true
    }

    /// Dispatch one queued request, pushing its response onto the response
    /// queue. Returns `false` when the request queue is empty.
    pub fn process_request(&self) -> bool {
        let Some(request) = self.requests.pop() else {
            return false;
        };
        let response = self.dispatcher.dispatch(&request);
        self.responses.push(response);
        true
    }

    /// Drain the request queue through the dispatcher.
    ///
    /// Returns whether any request was processed. Partial drains are fine;
    /// whatever remains is picked up on the next invocation.
    pub fn process_requests(&self) -> bool {
        let mut processed_any = false;
        while self.process_request() {
            processed_any = true;
        }
        processed_any
    }

    /// Emit one queued response through the transport. Returns `false` when
    /// the response queue is empty or emission fails.
    ///
    /// A response the transport refuses is dropped, not re-queued: delivery
    /// is not guaranteed at this boundary, and re-queuing would stall every
    /// response behind a dead connection.
    pub fn process_response(&self) -> bool {
        let Some(response) = self.responses.pop() else {
            return false;
        };

        let wire = response.to_wire();
        if self.transport.send_message(response.id, &wire) {
            debug!(
                request_id = %response.id,
                status = response.status,
                "Response emitted"
            );
            true
        } else {
            warn!(
                request_id = %response.id,
                status = response.status,
                "Transport refused response; dropping"
            );
            false
        }
    }

    /// Drain the response queue out to the transport, stopping early if a
    /// send fails. Returns whether any response was emitted.
    pub fn process_responses(&self) -> bool {
        let mut emitted_any = false;
        while self.process_response() {
            emitted_any = true;
        }
        emitted_any
    }

    /// Run one full cycle: intake, request processing, response processing.
    ///
    /// Returns whether any stage did work, so a host can back off when the
    /// pipeline reports an idle cycle.
    pub fn poll(&self) -> bool {
        let received = self.intake();
        let processed = self.process_requests();
        let emitted = self.process_responses();
        received || processed || emitted
    }
}
