//! Host platform capability
//!
//! Everything the scroll store and the navigation resolver need from the
//! host document and history: node lookup, computed styles, scroll offsets,
//! the current history record, and a hook that runs after the next render.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Result;

/// Deferred work scheduled to run once the rendering layer has updated.
pub type RenderCallback = Box<dyn FnOnce() + 'static>;

/// Scroll offsets captured for a single node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollSnapshot {
    pub left: f64,
    pub top: f64,
}

impl ScrollSnapshot {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

/// History record attached by the host to each navigation.
///
/// Only `position` is interpreted. It grows by one on every forward
/// navigation and shrinks on back navigation. Any other fields the host
/// stores are carried along untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HistoryState {
    pub fn at(position: i64) -> Self {
        Self {
            position: Some(position),
            extra: serde_json::Map::new(),
        }
    }
}

pub trait Platform: 'static {
    /// Handle to a node in the host document
    type Node: Clone + fmt::Debug + 'static;

    fn viewport_size(&self) -> ViewportSize;

    /// The element that scrolls the viewport (`document.documentElement`)
    fn scrolling_element(&self) -> Option<Self::Node>;

    fn body(&self) -> Option<Self::Node>;

    /// Look up the first node matching `selector`.
    ///
    /// A selector that parses but matches nothing yields `Ok(None)`.
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Node>>;

    /// All descendants of `root` matching `selector`, in document order.
    fn query_selector_all(&self, root: &Self::Node, selector: &str) -> Result<Vec<Self::Node>>;

    /// The computed `overflow` shorthand of `node`
    fn computed_overflow(&self, node: &Self::Node) -> Result<String>;

    fn scroll_offset(&self, node: &Self::Node) -> Result<ScrollSnapshot>;

    fn set_scroll_left(&self, node: &Self::Node, left: f64) -> Result<()>;

    fn set_scroll_top(&self, node: &Self::Node, top: f64) -> Result<()>;

    /// History record for the navigation currently being resolved
    fn history_state(&self) -> Option<HistoryState>;

    /// Run `callback` once, after the rendering layer finishes its next update.
    fn after_render(&self, callback: RenderCallback);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_state_keeps_host_fields() {
        let json = r#"{"position":4,"back":"/list","current":"/detail","replaced":false}"#;
        let state: HistoryState = serde_json::from_str(json).unwrap();

        assert_eq!(state.position, Some(4));
        assert_eq!(state.extra.get("back").unwrap(), "/list");
        assert_eq!(state.extra.len(), 3);
    }

    #[test]
    fn test_history_state_without_position() {
        let state: HistoryState = serde_json::from_str(r#"{"current":"/"}"#).unwrap();
        assert!(state.position.is_none());
    }
}
