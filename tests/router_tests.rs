//! Tests for route trie matching and pattern registration
//!
//! Covers the matching contract: substituted variable values come back as
//! bindings in left-to-right order, literal segments always beat a
//! co-located variable segment, and registration conflicts are rejected at
//! startup rather than surfacing during lookup.

use http::Method;
use routeq::router::{RouteError, RoutePattern, RouteTrie};

mod tracing_util;
use tracing_util::TestTracing;

fn trie_with(routes: &[(Method, &str)]) -> RouteTrie {
    let mut trie = RouteTrie::new();
    for (method, pattern) in routes {
        trie.insert(method.clone(), RoutePattern::parse(pattern).unwrap())
            .unwrap();
    }
    trie
}

#[test]
fn test_registered_patterns_match_with_substituted_values() {
    let _tracing = TestTracing::init();
    let trie = trie_with(&[
        (Method::GET, "/"),
        (Method::GET, "/pets"),
        (Method::GET, "/pets/:id"),
        (Method::GET, "/users/:user_id/posts/:post_id"),
    ]);

    let m = trie.search("/pets/abc-123").unwrap();
    assert_eq!(m.pattern.as_str(), "/pets/:id");
    assert_eq!(m.params.raw("id"), Some("abc-123"));

    let m = trie.search("/users/7/posts/42").unwrap();
    assert_eq!(m.pattern.as_str(), "/users/:user_id/posts/:post_id");
    let bindings: Vec<(String, String)> = m
        .params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(
        bindings,
        vec![
            ("user_id".to_string(), "7".to_string()),
            ("post_id".to_string(), "42".to_string()),
        ]
    );
}

#[test]
fn test_literal_over_variable_precedence() {
    let _tracing = TestTracing::init();
    let trie = trie_with(&[(Method::GET, "/users/active"), (Method::GET, "/users/:id")]);

    // The concrete route wins; `id` must never bind "active".
    let m = trie.search("/users/active").unwrap();
    assert_eq!(m.pattern.as_str(), "/users/active");
    assert!(m.params.raw("id").is_none());

    let m = trie.search("/users/other").unwrap();
    assert_eq!(m.pattern.as_str(), "/users/:id");
    assert_eq!(m.params.raw("id"), Some("other"));
}

#[test]
fn test_miss_on_unknown_path_or_depth() {
    let _tracing = TestTracing::init();
    let trie = trie_with(&[(Method::GET, "/pets/:id")]);

    assert!(trie.search("/unknown").is_none());
    assert!(trie.search("/pets").is_none());
    assert!(trie.search("/pets/1/extra").is_none());
}

#[test]
fn test_variable_name_conflict_is_rejected_at_registration() {
    let _tracing = TestTracing::init();
    let mut trie = trie_with(&[(Method::GET, "/orgs/:org_id/members")]);

    let err = trie
        .insert(Method::GET, RoutePattern::parse("/orgs/:id/teams").unwrap())
        .unwrap_err();
    assert!(matches!(err, RouteError::VariableConflict { .. }));

    // The first registration stands and still matches.
    let m = trie.search("/orgs/9/members").unwrap();
    assert_eq!(m.params.raw("org_id"), Some("9"));
}

#[test]
fn test_same_pattern_multiple_methods_share_one_node() {
    let _tracing = TestTracing::init();
    let trie = trie_with(&[
        (Method::GET, "/items/:id"),
        (Method::PUT, "/items/:id"),
        (Method::DELETE, "/items/:id"),
    ]);

    // search is method-blind; verb selection belongs to the dispatch table.
    let m = trie.search("/items/5").unwrap();
    assert_eq!(m.pattern.as_str(), "/items/:id");
}

#[test]
fn test_deep_mixed_pattern() {
    let _tracing = TestTracing::init();
    let trie = trie_with(&[(Method::POST, "/api/v1/users/:id/settings/:key")]);

    let m = trie.search("/api/v1/users/jane/settings/theme").unwrap();
    assert_eq!(m.params.raw("id"), Some("jane"));
    assert_eq!(m.params.raw("key"), Some("theme"));
    assert!(trie.search("/api/v2/users/jane/settings/theme").is_none());
}
