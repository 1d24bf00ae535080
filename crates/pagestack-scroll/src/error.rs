//! Scroll error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScrollError {
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Application root not found: {0}")]
    AppRootNotFound(String),

    #[error("Node is detached from the document: {0}")]
    DetachedNode(String),

    #[error("Failed to read computed style: {0}")]
    Style(String),

    #[error("DOM error: {0}")]
    Dom(String),
}
