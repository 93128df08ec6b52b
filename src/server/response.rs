use serde::{Deserialize, Serialize};

use crate::ids::RequestId;

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

fn content_type(status: u16) -> &'static str {
    // Handler bodies are opaque strings; the dispatcher-produced error
    // payloads (404/500) are JSON.
    match status {
        200 | 201 => "text/plain",
        _ => "application/json",
    }
}

/// The outcome of dispatching one request, queued for emission.
///
/// Constructed by the dispatcher, consumed by the response-processing step,
/// which renders it with [`Response::to_wire`] and hands the result to the
/// transport together with the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Id of the request this response answers
    pub id: RequestId,
    /// HTTP status code
    pub status: u16,
    /// Response body exactly as the handler (or the dispatcher's fixed
    /// payload) produced it
    pub body: String,
}

impl Response {
    #[must_use]
    pub fn new(id: RequestId, status: u16, body: impl Into<String>) -> Self {
        Self {
            id,
            status,
            body: body.into(),
        }
    }

    /// Render this response as an HTTP/1.1 wire message.
    ///
    /// The pipeline depends only on this method's existence; a host with a
    /// different wire format can render from the fields directly.
    #[must_use]
    pub fn to_wire(&self) -> String {
        let body = &self.body;
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n{}",
            self.status,
            status_reason(self.status),
            content_type(self.status),
            body.len(),
            body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(404), "Not Found");
        assert_eq!(status_reason(500), "Internal Server Error");
    }

    #[test]
    fn test_to_wire_shape() {
        let resp = Response::new(RequestId::new(), 200, "Hello, Ada");
        let wire = resp.to_wire();
        assert!(wire.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(wire.contains("Content-Type: text/plain\r\n"));
        assert!(wire.contains("Content-Length: 10\r\n"));
        assert!(wire.ends_with("\r\n\r\nHello, Ada"));
    }

    #[test]
    fn test_error_payload_is_json_typed() {
        let resp = Response::new(RequestId::new(), 500, r#"{"error":"Internal Server Error"}"#);
        assert!(resp.to_wire().contains("Content-Type: application/json\r\n"));
    }
}
