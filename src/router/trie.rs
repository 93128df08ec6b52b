use http::Method;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

use crate::params::{FromParam, ParamError};

use super::pattern::{RouteError, RoutePattern, Segment};

/// Maximum number of path variables before binding storage spills to the
/// heap. Most REST-style routes carry well under eight.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated variable-binding storage for the match hot path.
///
/// Names come from the static route trie, so they are shared `Arc<str>`;
/// values are per-request data copied out of the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Variable bindings extracted from a concrete path, in left-to-right path
/// order.
///
/// Raw values stay strings until a handler asks for a typed view through
/// [`PathParams::get`]; the trie never converts anything itself.
#[derive(Debug, Clone, Default)]
pub struct PathParams {
    params: ParamVec,
}

impl PathParams {
    pub(crate) fn new(params: ParamVec) -> Self {
        Self { params }
    }

    /// Get the raw string bound to `name`.
    ///
    /// Uses "last write wins" semantics: if the same variable name occurs at
    /// several path depths, the deepest binding is returned.
    #[inline]
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert the value bound to `name` into `T`.
    ///
    /// This is the only place parameter conversion happens; it runs lazily,
    /// when a handler declares it needs a typed variable.
    ///
    /// # Errors
    ///
    /// [`ParamError::Missing`] when no such binding exists, or the
    /// converter's error when the raw value cannot be coerced to `T`.
    pub fn get<T: FromParam>(&self, name: &str) -> Result<T, ParamError> {
        let raw = self.raw(name).ok_or_else(|| ParamError::Missing {
            name: name.to_string(),
        })?;
        T::from_param(raw).map_err(|e| e.with_name(name))
    }

    /// Iterate the bindings in left-to-right path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Result of successfully resolving a concrete path against the trie.
///
/// Produced fresh per lookup; nothing is retained between requests.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The registered pattern that terminates at the matched node
    pub pattern: Arc<RoutePattern>,
    /// Variable bindings in left-to-right path order
    pub params: PathParams,
}

/// Variable child of a trie node: the single non-literal slot.
#[derive(Debug)]
struct VarChild {
    name: Arc<str>,
    node: Box<TrieNode>,
}

#[derive(Debug, Default)]
struct TrieNode {
    /// Literal children keyed by exact segment text (unique keys)
    literals: HashMap<String, TrieNode>,
    /// At most one variable child per node; a second variable name at the
    /// same position is a registration conflict
    variable: Option<VarChild>,
    /// Verbs for which a registered pattern ends at this node
    methods: HashSet<Method>,
    /// The pattern ending here, shared by every verb that terminates here
    pattern: Option<Arc<RoutePattern>>,
}

impl TrieNode {
    fn insert(
        &mut self,
        segments: &[Segment],
        method: Method,
        pattern: &Arc<RoutePattern>,
    ) -> Result<(), RouteError> {
        let Some((segment, remaining)) = segments.split_first() else {
            self.methods.insert(method);
            if self.pattern.is_none() {
                self.pattern = Some(Arc::clone(pattern));
            }
            return Ok(());
        };

        match segment {
            Segment::Literal(text) => self
                .literals
                .entry(text.clone())
                .or_default()
                .insert(remaining, method, pattern),
            Segment::Variable(name) => {
                let child = self.variable.get_or_insert_with(|| VarChild {
                    name: Arc::clone(name),
                    node: Box::default(),
                });
                if child.name != *name {
                    return Err(RouteError::VariableConflict {
                        pattern: pattern.as_str().to_string(),
                        existing: child.name.to_string(),
                        conflicting: name.to_string(),
                    });
                }
                child.node.insert(remaining, method, pattern)
            }
        }
    }
}

/// Segment trie over the registered path patterns.
///
/// Built incrementally during registration and read-only during request
/// handling. Lookup walks one node per path segment: the literal child is
/// preferred, the variable child is the fallback, and the choice is never
/// revisited, which keeps resolution O(segments) and makes concrete routes
/// shade co-located variable routes deterministically.
#[derive(Debug, Default)]
pub struct RouteTrie {
    root: TrieNode,
    route_count: usize,
}

impl RouteTrie {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pattern` for `method`, creating trie nodes as needed and
    /// marking the final node terminal for the verb.
    ///
    /// Re-registering the same `(method, pattern)` is not an error here; the
    /// dispatch table decides what replacement means.
    ///
    /// # Errors
    ///
    /// [`RouteError::VariableConflict`] when the pattern binds a variable
    /// name at a position already occupied by a different name.
    pub fn insert(
        &mut self,
        method: Method,
        pattern: RoutePattern,
    ) -> Result<Arc<RoutePattern>, RouteError> {
        let pattern = Arc::new(pattern);
        self.root
            .insert(pattern.segments(), method.clone(), &pattern)?;
        self.route_count += 1;

        info!(
            method = %method,
            pattern = %pattern,
            route_count = self.route_count,
            "Route registered"
        );

        Ok(pattern)
    }

    /// Resolve a concrete path to a registered pattern and its variable
    /// bindings.
    ///
    /// The walk fails as soon as a segment has neither a literal nor a
    /// variable child to descend into, or when the final node is terminal
    /// for no verb. Verb selection is not done here; an unregistered method
    /// on a matched path falls out at the dispatch-table lookup instead.
    #[must_use]
    pub fn search(&self, path: &str) -> Option<RouteMatch> {
        let mut node = &self.root;
        let mut params = ParamVec::new();

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if let Some(child) = node.literals.get(segment) {
                node = child;
            } else if let Some(var) = &node.variable {
                params.push((Arc::clone(&var.name), segment.to_string()));
                node = &var.node;
            } else {
                debug!(path = %path, segment = %segment, "No route matched");
                return None;
            }
        }

        let pattern = node.pattern.as_ref()?;
        debug!(path = %path, pattern = %pattern, "Route matched");
        Some(RouteMatch {
            pattern: Arc::clone(pattern),
            params: PathParams::new(params),
        })
    }

    /// Number of `(method, pattern)` registrations accepted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }
}
