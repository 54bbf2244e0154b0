//! Error types.
//!
//! The tab view trusts its caller for most inputs. These errors cover the
//! places where a bad input can be detected cheaply: navigation state
//! validation, unknown route keys, and layout engine failures.

use thiserror::Error;

/// Errors raised by the tab view and its navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabViewError {
    /// `jump_to` was given a key that matches no route.
    #[error("no route with key {0:?}")]
    UnknownRoute(String),

    /// A navigation state must hold at least one route.
    #[error("navigation state has no routes")]
    EmptyRoutes,

    /// The focused index does not point at a route.
    #[error("focused index {index} is out of bounds for {len} routes")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Two routes share a key.
    #[error("duplicate route key {0:?}")]
    DuplicateKey(String),
}

/// Errors raised while computing layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Taffy rejected an operation on its tree.
    #[error("layout engine failure: {0:?}")]
    Taffy(#[from] taffy::TaffyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TabViewError::UnknownRoute("inbox".into()).to_string(),
            "no route with key \"inbox\""
        );
        assert_eq!(
            TabViewError::IndexOutOfBounds { index: 3, len: 2 }.to_string(),
            "focused index 3 is out of bounds for 2 routes"
        );
    }

    #[test]
    fn test_taffy_error_converts() {
        let err: LayoutError = taffy::TaffyError::InvalidInputNode(taffy::NodeId::from(7u64)).into();
        assert!(matches!(err, LayoutError::Taffy(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
