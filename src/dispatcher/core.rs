use anyhow::Result;
use http::Method;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, error, info, warn};

use crate::router::{PathParams, RouteError, RoutePattern, RouteTrie};
use crate::server::{Request, Response};

/// A registered request handler.
///
/// Receives the raw request body and the matched path variables; typed
/// conversion is the handler's own (lazy) call via
/// [`PathParams::get`]. Conversion errors propagate with `?` and are
/// contained at the dispatch boundary like any other handler fault.
pub type Handler = Box<dyn Fn(&str, &PathParams) -> Result<String> + Send + Sync>;

fn not_found_body(path: &str) -> String {
    serde_json::json!({
        "error": "Not Found",
        "message": format!("No handler found for {path}"),
    })
    .to_string()
}

fn internal_error_body() -> String {
    serde_json::json!({ "error": "Internal Server Error" }).to_string()
}

/// Nine independent per-verb mappings from pattern text to handler.
///
/// Keyed by *pattern*, never by concrete URL: one `/users/:id` entry serves
/// every concrete user path, and pattern resolution stays entirely in the
/// trie.
#[derive(Default)]
pub struct DispatchTable {
    get: HashMap<String, Handler>,
    post: HashMap<String, Handler>,
    put: HashMap<String, Handler>,
    patch: HashMap<String, Handler>,
    delete: HashMap<String, Handler>,
    options: HashMap<String, Handler>,
    head: HashMap<String, Handler>,
    trace: HashMap<String, Handler>,
    connect: HashMap<String, Handler>,
}

impl DispatchTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `method` is one of the nine verbs this table carries.
    #[must_use]
    pub fn supports(method: &Method) -> bool {
        matches!(
            method.as_str(),
            "GET" | "POST" | "PUT" | "PATCH" | "DELETE" | "OPTIONS" | "HEAD" | "TRACE" | "CONNECT"
        )
    }

    fn table(&self, method: &Method) -> Option<&HashMap<String, Handler>> {
        match method.as_str() {
            "GET" => Some(&self.get),
            "POST" => Some(&self.post),
            "PUT" => Some(&self.put),
            "PATCH" => Some(&self.patch),
            "DELETE" => Some(&self.delete),
            "OPTIONS" => Some(&self.options),
            "HEAD" => Some(&self.head),
            "TRACE" => Some(&self.trace),
            "CONNECT" => Some(&self.connect),
            _ => None,
        }
    }

    fn table_mut(&mut self, method: &Method) -> Option<&mut HashMap<String, Handler>> {
        match method.as_str() {
            "GET" => Some(&mut self.get),
            "POST" => Some(&mut self.post),
            "PUT" => Some(&mut self.put),
            "PATCH" => Some(&mut self.patch),
            "DELETE" => Some(&mut self.delete),
            "OPTIONS" => Some(&mut self.options),
            "HEAD" => Some(&mut self.head),
            "TRACE" => Some(&mut self.trace),
            "CONNECT" => Some(&mut self.connect),
            _ => None,
        }
    }

    /// Map `pattern` to `handler` for `method`. Returns the handler that was
    /// displaced, if this registration replaced one.
    ///
    /// # Errors
    ///
    /// [`RouteError::UnsupportedMethod`] when `method` is outside the nine
    /// verbs.
    pub fn insert(
        &mut self,
        method: &Method,
        pattern: String,
        handler: Handler,
    ) -> Result<Option<Handler>, RouteError> {
        let table = self
            .table_mut(method)
            .ok_or_else(|| RouteError::UnsupportedMethod {
                method: method.to_string(),
            })?;
        Ok(table.insert(pattern, handler))
    }

    /// Look up the handler registered for `(method, pattern)`.
    #[must_use]
    pub fn lookup(&self, method: &Method, pattern: &str) -> Option<&Handler> {
        self.table(method)?.get(pattern)
    }

    /// Total number of registered handlers across all verbs.
    #[must_use]
    pub fn len(&self) -> usize {
        [
            &self.get,
            &self.post,
            &self.put,
            &self.patch,
            &self.delete,
            &self.options,
            &self.head,
            &self.trace,
            &self.connect,
        ]
        .iter()
        .map(|t| t.len())
        .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Routes one request to exactly one handler and turns the outcome into a
/// [`Response`].
///
/// Built by constructor injection: the trie and tables live inside, are
/// populated through [`Dispatcher::register`] during startup, and are
/// read-only afterwards, so the dispatcher can be shared as `Arc` across
/// pipeline stages.
#[derive(Default)]
pub struct Dispatcher {
    trie: RouteTrie,
    table: DispatchTable,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` and the `:`-sigil `pattern`.
    ///
    /// Called once per route before the pipeline starts. Re-registering the
    /// same `(method, pattern)` replaces the previous handler and logs a
    /// warning.
    ///
    /// # Errors
    ///
    /// [`RouteError`] for a malformed pattern, an unsupported verb, or a
    /// variable-name conflict with an already-registered route. These are
    /// the only failures in the crate that may abort startup.
    pub fn register<F>(&mut self, method: Method, pattern: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&str, &PathParams) -> Result<String> + Send + Sync + 'static,
    {
        let parsed = RoutePattern::parse(pattern)?;
        if !DispatchTable::supports(&method) {
            return Err(RouteError::UnsupportedMethod {
                method: method.to_string(),
            });
        }

        let pattern = self.trie.insert(method.clone(), parsed)?;
        let displaced =
            self.table
                .insert(&method, pattern.as_str().to_string(), Box::new(handler))?;

        if displaced.is_some() {
            warn!(
                method = %method,
                pattern = %pattern,
                "Replaced existing handler for route"
            );
        }

        Ok(())
    }

    /// Dispatch one request and return its response.
    ///
    /// Never fails and never panics outward: a routing miss yields the fixed
    /// not-found payload, and any fault inside the handler (including lazy
    /// parameter conversion) yields the fixed internal-error payload. The
    /// variable name and raw value behind a conversion failure stay in the
    /// logs, not in the body.
    #[must_use]
    pub fn dispatch(&self, request: &Request) -> Response {
        let Some(route_match) = self.trie.search(&request.path) else {
            debug!(
                method = %request.method,
                path = %request.path,
                "No route matched for path"
            );
            return Response::new(request.id, 404, not_found_body(&request.path));
        };

        let pattern = route_match.pattern.as_str();
        let Some(handler) = self.table.lookup(&request.method, pattern) else {
            debug!(
                method = %request.method,
                path = %request.path,
                pattern = %pattern,
                "Route matched but no handler for method"
            );
            return Response::new(request.id, 404, not_found_body(&request.path));
        };

        info!(
            request_id = %request.id,
            method = %request.method,
            pattern = %pattern,
            "Request dispatched to handler"
        );

        match catch_unwind(AssertUnwindSafe(|| {
            handler(&request.body, &route_match.params)
        })) {
            Ok(Ok(body)) => Response::new(request.id, 200, body),
            Ok(Err(err)) => {
                error!(
                    request_id = %request.id,
                    pattern = %pattern,
                    error = %err,
                    "Handler failed"
                );
                Response::new(request.id, 500, internal_error_body())
            }
            Err(panic) => {
                let panic_message = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(
                    request_id = %request.id,
                    pattern = %pattern,
                    panic_message = %panic_message,
                    "Handler panicked"
                );
                Response::new(request.id, 500, internal_error_body())
            }
        }
    }

    /// Number of registered routes.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.table.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_body_is_exact() {
        assert_eq!(
            not_found_body("/status"),
            r#"{"error":"Not Found","message":"No handler found for /status"}"#
        );
    }

    #[test]
    fn test_internal_error_body_is_exact() {
        assert_eq!(internal_error_body(), r#"{"error":"Internal Server Error"}"#);
    }

    #[test]
    fn test_table_keys_by_pattern_not_url() {
        let mut table = DispatchTable::new();
        table
            .insert(
                &Method::GET,
                "/users/:id".to_string(),
                Box::new(|_, _| Ok(String::new())),
            )
            .unwrap();

        assert!(table.lookup(&Method::GET, "/users/:id").is_some());
        assert!(table.lookup(&Method::GET, "/users/123").is_none());
        assert!(table.lookup(&Method::POST, "/users/:id").is_none());
    }

    #[test]
    fn test_table_verbs_are_independent() {
        let mut table = DispatchTable::new();
        for method in [Method::GET, Method::POST, Method::DELETE] {
            table
                .insert(
                    &method,
                    "/items".to_string(),
                    Box::new(|_, _| Ok(String::new())),
                )
                .unwrap();
        }
        assert_eq!(table.len(), 3);
        assert!(table.lookup(&Method::PUT, "/items").is_none());
    }
}
