//! Faults a sticky instance can report.
//!
//! None of these propagate to the host. They are logged, recorded on the
//! instance, and the element degrades to normal static behavior.

use crate::css::parser::ParseError;
use crate::dom::node::NodeId;
use crate::geometry::Px;

use super::config::ContextRef;

/// Errors raised while initializing or measuring a sticky element.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StickyError {
    #[error("undefined context element")]
    UndefinedContext,
    #[error("invalid context selector `{selector}`: {source}")]
    InvalidContext {
        selector: String,
        #[source]
        source: ParseError,
    },
    /// Neither the element nor any ancestor is (or matches) the context.
    #[error("no context element matches `{0}`")]
    ContextNotFound(ContextRef),
    #[error(
        "insufficient scrolling space available: {height}px element + {scroll_space}px scroll space >= {context_height}px context"
    )]
    InsufficientSpace {
        height: Px,
        scroll_space: Px,
        context_height: Px,
    },
    #[error("node {0:?} has no layout")]
    Detached(NodeId),
}

impl StickyError {
    /// Whether this is a configuration problem detected at initialization.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            StickyError::UndefinedContext
                | StickyError::InvalidContext { .. }
                | StickyError::ContextNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(StickyError::UndefinedContext.to_string(), "undefined context element");
        let err = StickyError::InsufficientSpace {
            height: 900.0,
            scroll_space: 200.0,
            context_height: 1000.0,
        };
        assert_eq!(
            err.to_string(),
            "insufficient scrolling space available: 900px element + 200px scroll space >= 1000px context"
        );
        assert!(!err.is_configuration());
    }

    #[test]
    fn configuration_kinds() {
        assert!(StickyError::UndefinedContext.is_configuration());
        assert!(StickyError::ContextNotFound(".layout".into()).is_configuration());
        let parse = crate::css::parser::parse_selector_list("..").unwrap_err();
        let err = StickyError::InvalidContext { selector: "..".into(), source: parse };
        assert!(err.is_configuration());
        assert!(std::error::Error::source(&err).is_some());
    }
}
