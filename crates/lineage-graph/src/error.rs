use std::fmt;

use crate::graph::handle::{Edge, Vertex};

/// Machine-readable error codes for callers that branch on failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    CycleDetected,
    MalformedGraph,
    InvalidHandle,
}

impl ErrorCode {
    /// Stable code identifier (`G####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::CycleDetected => "G2001",
            Self::MalformedGraph => "G2002",
            Self::InvalidHandle => "G3001",
        }
    }

    /// Short human-facing summary for logs.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::CycleDetected => "Graph contains a cycle",
            Self::MalformedGraph => "Graph violates an algorithm precondition",
            Self::InvalidHandle => "Null or stale graph handle",
        }
    }

    /// Optional remediation hint for the caller.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::CycleDetected | Self::MalformedGraph => {
                Some("Use find_cycles() to locate the loop and remove one of its edges.")
            }
            Self::InvalidHandle => {
                Some("Discard handles derived from removed vertices; never reuse them.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A handle that was rejected by a graph operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Vertex(Vertex),
    Edge(Edge),
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex(v) => write!(f, "vertex {v}"),
            Self::Edge(e) => write!(f, "edge {e}"),
        }
    }
}

/// Errors reported by [`LineageGraph`](crate::LineageGraph) operations.
///
/// Lookup misses are never errors: they come back as a null handle, `None`
/// or an empty `Vec`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The algorithm requires a DAG; `vertex` lies on a cycle.
    #[error("cycle detected at {vertex}")]
    CycleDetected { vertex: Vertex },

    /// A traversal found an invariant violation in its input.
    #[error("malformed graph: {reason}")]
    MalformedGraph { reason: String },

    /// A null or removed handle was passed where a live one is required.
    #[error("invalid handle: {handle}")]
    InvalidHandle { handle: Handle },
}

impl GraphError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::CycleDetected { .. } => ErrorCode::CycleDetected,
            Self::MalformedGraph { .. } => ErrorCode::MalformedGraph,
            Self::InvalidHandle { .. } => ErrorCode::InvalidHandle,
        }
    }

    pub(crate) const fn invalid_vertex(vertex: Vertex) -> Self {
        Self::InvalidHandle {
            handle: Handle::Vertex(vertex),
        }
    }

    pub(crate) const fn invalid_edge(edge: Edge) -> Self {
        Self::InvalidHandle {
            handle: Handle::Edge(edge),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::{ErrorCode, GraphError};
    use crate::graph::handle::Vertex;
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::CycleDetected,
            ErrorCode::MalformedGraph,
            ErrorCode::InvalidHandle,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::MalformedGraph.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('G'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn errors_map_to_codes() {
        let err = GraphError::invalid_vertex(Vertex::null());
        assert_eq!(err.code(), ErrorCode::InvalidHandle);
        assert_eq!(err.to_string(), "invalid handle: vertex null");
    }
}
