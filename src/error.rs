//! Error types for target resolution.
//!
//! The binding and component layers never surface these to their callers;
//! they are logged as diagnostics and the affected step is skipped. They are
//! public so lower-level code can resolve targets itself.

use crate::css::parser::SelectorError;

/// Why a target selector could not be turned into an element.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindError {
    #[error("element not found: {selector}")]
    TargetNotFound { selector: String },
    #[error("component target not found: {selector}")]
    ContainerNotFound { selector: String },
    #[error("invalid selector '{selector}': {source}")]
    InvalidSelector {
        selector: String,
        #[source]
        source: SelectorError,
    },
}

impl BindError {
    /// The selector that failed to resolve.
    pub fn selector(&self) -> &str {
        match self {
            BindError::TargetNotFound { selector }
            | BindError::ContainerNotFound { selector }
            | BindError::InvalidSelector { selector, .. } => selector,
        }
    }
}
