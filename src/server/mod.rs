//! # Server Module
//!
//! The transport seam and the request/response types that cross it.
//!
//! routeq never owns a socket: accepting connections and moving bytes is
//! the job of a collaborator behind the [`Transport`] trait. The core pulls
//! [`Request`] values out of it, and pushes rendered [`Response`] wire
//! messages back into it, one poll cycle at a time.
//!
//! [`ChannelTransport`] is the in-memory implementation used by tests and
//! in-process hosts; anything that can poll for a request and accept a wire
//! message can stand in for it.

pub mod request;
pub mod response;
pub mod transport;

pub use request::Request;
pub use response::Response;
pub use transport::{ChannelTransport, Transport};
