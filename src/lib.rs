//! # routeq
//!
//! **routeq** is a queue-decoupled HTTP request router: it matches an
//! incoming request (method, path, body) to exactly one registered handler
//! and turns the handler's result into a response, while separating the act
//! of *receiving* a request from the act of *processing* it through explicit
//! FIFO queues.
//!
//! ## Architecture
//!
//! The library is organized into a handful of small modules:
//!
//! - **[`router`]** - Path matching via a segment trie with literal and
//!   variable (`:name`) segments
//! - **[`params`]** - Lazy conversion of matched path variables into typed
//!   values
//! - **[`dispatcher`]** - Per-verb dispatch tables plus the request
//!   dispatcher with its failure boundary
//! - **[`queue`]** - The FIFO request and response queues between pipeline
//!   stages
//! - **[`pipeline`]** - The poll-driven intake / dispatch / emit cycle
//! - **[`server`]** - The transport seam (`Transport` trait), request and
//!   response types, and wire rendering
//! - **[`ids`]** - ULID-backed request correlation ids
//! - **[`runtime_config`]** - Environment-variable runtime configuration
//!
//! ## Request Flow
//!
//! 1. The pipeline polls the transport and enqueues at most one request per
//!    intake step.
//! 2. The request-processing step drains the request queue through the
//!    dispatcher: trie search, table lookup, handler invocation inside a
//!    failure boundary.
//! 3. Each result becomes a [`server::Response`] carrying the original
//!    request id, enqueued in arrival order.
//! 4. The response-processing step renders each response to its wire form
//!    and hands it to the transport.
//!
//! A routing miss produces a fixed not-found payload; a conversion failure,
//! handler error, or handler panic produces a fixed internal-error payload.
//! Neither ever escapes the dispatcher or stops the pipeline.
//!
//! ## Quick Start
//!
//! ```rust
//! use routeq::{Dispatcher, Method};
//! use routeq::server::Request;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher
//!     .register(Method::GET, "/greet/:name", |_body, params| {
//!         let name: String = params.get("name")?;
//!         Ok(format!("Hello, {name}"))
//!     })
//!     .unwrap();
//!
//! let response = dispatcher.dispatch(&Request::new(
//!     Method::GET,
//!     "/greet/Ada",
//!     String::new(),
//! ));
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body, "Hello, Ada");
//! ```
//!
//! ## Concurrency Model
//!
//! routeq assumes a single logical thread of control driven by an external
//! poll loop; its own operations are synchronous and non-blocking. The route
//! trie and dispatch tables are populated during startup and read-only
//! afterwards. The two queues serialize push/pop internally, so a host that
//! drives stages from more than one thread still observes strict FIFO order.

pub mod dispatcher;
pub mod ids;
pub mod params;
pub mod pipeline;
pub mod queue;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use dispatcher::{DispatchTable, Dispatcher, Handler};
pub use http::Method;
pub use ids::RequestId;
pub use params::{FromParam, Json, ParamError};
pub use pipeline::RequestPipeline;
pub use queue::{Queue, RequestQueue, ResponseQueue};
pub use router::{PathParams, RouteError, RouteMatch, RoutePattern, RouteTrie, Segment};
pub use server::{ChannelTransport, Request, Response, Transport};
