//! # Dispatcher Module
//!
//! Composes the route trie, the per-verb dispatch tables, and the parameter
//! codec into the one operation the pipeline cares about: turn a request
//! into a response, no matter what.
//!
//! ## Request Flow
//!
//! 1. Trie search resolves the concrete path to a registered pattern plus
//!    variable bindings.
//! 2. The dispatch table looks up the handler for `(verb, pattern)`.
//! 3. The handler runs inside a failure boundary; its body is returned
//!    unchanged on success.
//!
//! Every path through [`Dispatcher::dispatch`] terminates in exactly one of
//! three outcomes: the handler's body, the fixed not-found payload, or the
//! fixed internal-error payload. A routing miss is a normal outcome; a
//! conversion failure, a handler error, or a handler panic is contained at
//! the boundary and never reaches the caller.
//!
//! ## Registration
//!
//! Handlers are registered once, before the pipeline starts:
//!
//! ```rust
//! use routeq::{Dispatcher, Method};
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher
//!     .register(Method::GET, "/pets/:id", |_body, params| {
//!         let id: u64 = params.get("id")?;
//!         Ok(format!("pet {id}"))
//!     })
//!     .unwrap();
//! ```
//!
//! Re-registering the same `(verb, pattern)` replaces the previous handler
//! with a warning; a variable-name conflict at a trie position is rejected
//! outright, since that is a construction-time misconfiguration.

mod core;

pub use core::{DispatchTable, Dispatcher, Handler};
