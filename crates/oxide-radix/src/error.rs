//! Error types for route registration and configuration.
//!
//! Lookups never fail: a request that matches nothing is reported through
//! [`crate::Dispatch`], not through this type. Everything here describes a
//! mistake in the route declarations themselves.

use thiserror::Error;

/// Router-specific errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A route was registered with an empty method.
    #[error("method must not be empty")]
    EmptyMethod,

    /// The pattern is empty or does not begin with `/`.
    #[error("path must begin with '/' in path '{0}'")]
    InvalidPattern(String),

    /// The same method and pattern were registered twice.
    #[error("a handle is already registered for path '{0}'")]
    DuplicateRoute(String),

    /// A wildcard is declared without a name, e.g. `/users/:` or `/files/*`.
    #[error("wildcards must be named with a non-empty name in path '{0}'")]
    EmptyWildcardName(String),

    /// Two wildcards share a single path segment, e.g. `/:a:b`.
    #[error("only one wildcard per path segment is allowed, has: '{segment}' in path '{pattern}'")]
    MultipleWildcards {
        /// The offending segment.
        segment: String,
        /// The full pattern being registered.
        pattern: String,
    },

    /// The same parameter name is used twice in one pattern, e.g.
    /// `/:id/posts/:id`.
    #[error("duplicate parameter name '{name}' in path '{pattern}'")]
    DuplicateParamName {
        /// The repeated name, without its sigil.
        name: String,
        /// The full pattern being registered.
        pattern: String,
    },

    /// A wildcard differs from the wildcard already registered at the same
    /// position in the tree.
    #[error(
        "'{segment}' in new path '{pattern}' conflicts with existing wildcard '{existing}'"
    )]
    WildcardConflict {
        /// The conflicting segment of the new pattern.
        segment: String,
        /// The full pattern being registered.
        pattern: String,
        /// The wildcard already present in the tree.
        existing: String,
    },

    /// A catch-all segment is followed by more pattern characters.
    #[error("catch-all routes are only allowed at the end of the path in path '{0}'")]
    CatchAllNotLast(String),

    /// A catch-all segment does not start right after a `/`.
    #[error("no / before catch-all in path '{0}'")]
    CatchAllWithoutSlash(String),

    /// A required path parameter is missing from a match.
    #[error("missing path parameter: {0}")]
    MissingParam(String),

    /// Router options could not be parsed.
    #[error("invalid router options: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
