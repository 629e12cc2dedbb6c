//! Layout failures

/// The one failure a layout call can produce. No partial layout is ever
/// returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Edges form a cycle, so no layering exists
    #[error("graph contains a cycle through {node}")]
    Cyclic {
        /// A node on the cycle
        node: String,
    },

    /// Edge endpoint is not a node of the graph
    #[error("edge {edge} references unknown node {node}")]
    UnknownEndpoint {
        /// Edge id
        edge: String,
        /// Missing node id
        node: String,
    },

    /// Two nodes share an id
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    /// Unrecognized option key or unparsable value
    #[error("invalid layout option {key}={value}")]
    InvalidOption {
        /// Option key as given
        key: String,
        /// Offending value
        value: String,
    },

    /// External layout backend failed
    #[error("layout engine failed: {0}")]
    Engine(String),
}

impl LayoutError {
    /// Create an invalid option error
    #[inline]
    #[must_use]
    pub fn invalid_option(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Check if the same call may succeed when repeated.
    ///
    /// Malformed graphs and options fail the same way every time.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Engine(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_backend_failures_are_retryable() {
        assert!(LayoutError::Engine("worker crashed".into()).is_retryable());
        assert!(!LayoutError::DuplicateNode("topic__a".into()).is_retryable());
        assert!(!LayoutError::Cyclic { node: "a".into() }.is_retryable());
        assert!(!LayoutError::invalid_option("direction", "SIDEWAYS").is_retryable());
    }

    #[test]
    fn messages_name_the_offender() {
        let err = LayoutError::UnknownEndpoint {
            edge: "e-3".into(),
            node: "topic__ghost".into(),
        };
        assert_eq!(err.to_string(), "edge e-3 references unknown node topic__ghost");
    }
}
