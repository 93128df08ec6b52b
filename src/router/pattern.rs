use std::fmt;
use std::sync::Arc;

/// One `/`-delimited component of a registered path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Exact text that must match the request segment byte-for-byte.
    Literal(String),
    /// Named placeholder that binds whatever the request segment holds.
    ///
    /// The name is shared as `Arc<str>` because it is cloned into every
    /// match result; `Arc::clone` is an O(1) refcount bump instead of a
    /// string copy.
    Variable(Arc<str>),
}

/// A registered path template composed of literal and variable segments.
///
/// Parsed once from the `:`-sigil convention (`/users/:id`) at registration
/// time and immutable afterwards. The canonical text form doubles as the
/// dispatch-table key, so the same pattern registered for several verbs
/// renders identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
    canonical: String,
}

impl RoutePattern {
    /// Parse a pattern from its text form.
    ///
    /// A segment prefixed with `:` is a variable named by the remainder;
    /// every other non-empty segment is a literal. Empty segments (leading,
    /// trailing, or doubled slashes) are ignored, so `/users/` and `/users`
    /// are the same pattern. The root pattern is `/`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::EmptyVariable`] when a segment is a bare `:`.
    pub fn parse(text: &str) -> Result<Self, RouteError> {
        let mut segments = Vec::new();
        for raw in text.split('/').filter(|s| !s.is_empty()) {
            if let Some(name) = raw.strip_prefix(':') {
                if name.is_empty() {
                    return Err(RouteError::EmptyVariable {
                        pattern: text.to_string(),
                    });
                }
                segments.push(Segment::Variable(Arc::from(name)));
            } else {
                segments.push(Segment::Literal(raw.to_string()));
            }
        }

        let canonical = if segments.is_empty() {
            "/".to_string()
        } else {
            let mut out = String::with_capacity(text.len());
            for segment in &segments {
                out.push('/');
                match segment {
                    Segment::Literal(text) => out.push_str(text),
                    Segment::Variable(name) => {
                        out.push(':');
                        out.push_str(name);
                    }
                }
            }
            out
        };

        Ok(Self {
            segments,
            canonical,
        })
    }

    /// The ordered segments of this pattern.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Canonical text form, e.g. `/users/:id`. Used as the dispatch-table
    /// key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Route registration error
///
/// Returned by pattern parsing and trie insertion. These are the only
/// failures in routeq that may legitimately abort startup; nothing produced
/// during request handling maps to this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A pattern segment was a bare `:` with no variable name.
    EmptyVariable {
        /// The offending pattern text as supplied by the caller
        pattern: String,
    },
    /// Two different variable names were registered at the same trie
    /// position.
    ///
    /// A node holds at most one variable child; allowing a second name
    /// would make matching ambiguous. The first registration stands and the
    /// conflicting one is rejected.
    VariableConflict {
        /// The pattern whose registration was rejected
        pattern: String,
        /// The variable name already occupying this position
        existing: String,
        /// The variable name the rejected pattern tried to register
        conflicting: String,
    },
    /// The HTTP method is not one of the nine verbs the dispatch table
    /// carries.
    UnsupportedMethod {
        /// The method as supplied by the caller
        method: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::EmptyVariable { pattern } => {
                write!(
                    f,
                    "route registration error: pattern '{pattern}' contains a variable \
                    segment with no name (bare ':')"
                )
            }
            RouteError::VariableConflict {
                pattern,
                existing,
                conflicting,
            } => {
                write!(
                    f,
                    "route registration error: pattern '{pattern}' binds variable \
                    ':{conflicting}' at a position already occupied by ':{existing}'; \
                    a node holds at most one variable child"
                )
            }
            RouteError::UnsupportedMethod { method } => {
                write!(
                    f,
                    "route registration error: method '{method}' is not a supported verb"
                )
            }
        }
    }
}

impl std::error::Error for RouteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literals_and_variables() {
        let p = RoutePattern::parse("/users/:id/posts").unwrap();
        assert_eq!(p.segments().len(), 3);
        assert_eq!(p.segments()[0], Segment::Literal("users".to_string()));
        assert!(matches!(&p.segments()[1], Segment::Variable(n) if n.as_ref() == "id"));
        assert_eq!(p.as_str(), "/users/:id/posts");
    }

    #[test]
    fn test_parse_normalizes_slashes() {
        let a = RoutePattern::parse("/users/").unwrap();
        let b = RoutePattern::parse("users").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "/users");
    }

    #[test]
    fn test_parse_root() {
        let root = RoutePattern::parse("/").unwrap();
        assert!(root.segments().is_empty());
        assert_eq!(root.as_str(), "/");
    }

    #[test]
    fn test_parse_rejects_bare_sigil() {
        let err = RoutePattern::parse("/users/:").unwrap_err();
        assert!(matches!(err, RouteError::EmptyVariable { .. }));
    }

    #[test]
    fn test_display_matches_canonical() {
        let p = RoutePattern::parse("/a/:b/c").unwrap();
        assert_eq!(p.to_string(), "/a/:b/c");
    }
}
