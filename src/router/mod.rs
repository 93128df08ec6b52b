//! # Router Module
//!
//! Path matching and route resolution for routeq. Registered path patterns
//! are held in a segment trie; a concrete request path is resolved to the
//! pattern that terminates at its final segment, together with the values
//! bound by the pattern's variable segments.
//!
//! ## Patterns
//!
//! A pattern is an ordered sequence of `/`-delimited segments, each either a
//! literal (`users`) or a variable marked with a `:` sigil (`:id`). Patterns
//! are parsed once at registration time and immutable afterwards.
//!
//! ## Matching
//!
//! At every trie level the literal child is preferred; the variable child is
//! taken only when no literal child matches the current segment. The choice
//! is made once per level with no backtracking, so a concrete route such as
//! `/users/active` always takes precedence over a co-located `/users/:id`.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use routeq::router::{RoutePattern, RouteTrie};
//!
//! let mut trie = RouteTrie::new();
//! let pattern = RoutePattern::parse("/users/:id").unwrap();
//! trie.insert(Method::GET, pattern).unwrap();
//!
//! let m = trie.search("/users/123").unwrap();
//! assert_eq!(m.pattern.as_str(), "/users/:id");
//! assert_eq!(m.params.raw("id"), Some("123"));
//! ```
//!
//! ## Performance
//!
//! Registration and lookup are both O(segments); variable bindings for
//! typical routes stay on the stack via `SmallVec`.

mod pattern;
mod trie;

pub use pattern::{RouteError, RoutePattern, Segment};
pub use trie::{ParamVec, PathParams, RouteMatch, RouteTrie, MAX_INLINE_PARAMS};
