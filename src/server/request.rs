use http::Method;
use serde::{Deserialize, Serialize};

use crate::ids::RequestId;

/// An HTTP-shaped request as delivered by the transport.
///
/// The core treats this as read-only input: it never rewrites the path or
/// body, and the id travels unchanged onto the eventual [`Response`]
/// (`crate::server::Response`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Correlation id, carried onto the matching response
    pub id: RequestId,
    /// HTTP verb
    #[serde(with = "http_serde_method")]
    pub method: Method,
    /// Concrete request path, e.g. `/users/123`
    pub path: String,
    /// Raw request body; empty string when the request carried none
    pub body: String,
}

impl Request {
    /// Build a request with a freshly generated id.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_id(RequestId::new(), method, path, body)
    }

    /// Build a request with a caller-supplied id, as a transport that
    /// already assigned one does.
    #[must_use]
    pub fn with_id(
        id: RequestId,
        method: Method,
        path: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id,
            method,
            path: path.into(),
            body: body.into(),
        }
    }
}

/// Serde adapter for `http::Method`, which has no serde impls of its own.
mod http_serde_method {
    use http::Method;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(method.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Method, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<Method>()
            .map_err(|_| serde::de::Error::custom("invalid http method"))
    }
}
