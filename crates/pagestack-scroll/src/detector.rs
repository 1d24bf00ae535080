//! Scrollable node detection

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Selectors a route declares for its own scroll containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrollingElement {
    Single(String),
    Many(Vec<String>),
}

impl ScrollingElement {
    /// Selectors in declaration order with duplicates removed
    pub fn selectors(&self) -> Vec<&str> {
        let mut selectors: Vec<&str> = Vec::new();
        let declared: Vec<&str> = match self {
            ScrollingElement::Single(selector) => vec![selector.as_str()],
            ScrollingElement::Many(list) => list.iter().map(String::as_str).collect(),
        };

        for selector in declared {
            if !selectors.contains(&selector) {
                selectors.push(selector);
            }
        }

        selectors
    }
}

impl From<&str> for ScrollingElement {
    fn from(selector: &str) -> Self {
        ScrollingElement::Single(selector.to_string())
    }
}

impl From<Vec<String>> for ScrollingElement {
    fn from(selectors: Vec<String>) -> Self {
        ScrollingElement::Many(selectors)
    }
}

pub struct ScrollableNodeDetector<'a, P: Platform> {
    platform: &'a P,
}

impl<'a, P: Platform> ScrollableNodeDetector<'a, P> {
    pub fn new(platform: &'a P) -> Self {
        Self { platform }
    }

    /// A node scrolls when its computed overflow is `scroll` or `auto`.
    pub fn is_scrollable(&self, node: Option<&P::Node>) -> bool {
        let Some(node) = node else {
            return false;
        };

        match self.platform.computed_overflow(node) {
            Ok(overflow) => {
                let overflow = overflow.to_ascii_lowercase();
                overflow.contains("scroll") || overflow.contains("auto")
            }
            Err(e) => {
                tracing::debug!(node = ?node, error = %e, "Could not read overflow");
                false
            }
        }
    }

    /// Resolve each declared selector to a node.
    ///
    /// Selectors that match nothing come back as `None`; the caller filters them.
    pub fn resolve_manual_nodes(
        &self,
        element: &ScrollingElement,
    ) -> crate::Result<Vec<Option<P::Node>>> {
        element
            .selectors()
            .into_iter()
            .map(|selector| self.platform.query_selector(selector))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePlatform;

    #[test]
    fn test_is_scrollable() {
        let platform = FakePlatform::new();
        let detector = ScrollableNodeDetector::new(&platform);

        let auto = platform.add_element(None, "auto", "auto");
        let scroll = platform.add_element(None, "scroll", "SCROLL");
        let visible = platform.add_element(None, "visible", "visible");
        let hidden = platform.add_element(None, "hidden", "hidden");
        let mixed = platform.add_element(None, "mixed", "hidden Auto");

        assert!(detector.is_scrollable(Some(&auto)));
        assert!(detector.is_scrollable(Some(&scroll)));
        assert!(detector.is_scrollable(Some(&mixed)));
        assert!(!detector.is_scrollable(Some(&visible)));
        assert!(!detector.is_scrollable(Some(&hidden)));
        assert!(!detector.is_scrollable(None));
    }

    #[test]
    fn test_style_read_failure_is_not_scrollable() {
        let platform = FakePlatform::new();
        let detector = ScrollableNodeDetector::new(&platform);

        let list = platform.add_element(None, "list", "auto");
        assert!(detector.is_scrollable(Some(&list)));

        platform.fail_style(list);
        assert!(!detector.is_scrollable(Some(&list)));
    }

    #[test]
    fn test_selectors_deduplicated() {
        let element = ScrollingElement::Many(vec![
            "#list".to_string(),
            "#side".to_string(),
            "#list".to_string(),
        ]);
        assert_eq!(element.selectors(), vec!["#list", "#side"]);

        let single = ScrollingElement::from("#list");
        assert_eq!(single.selectors(), vec!["#list"]);
    }

    #[test]
    fn test_scrolling_element_from_json() {
        let single: ScrollingElement = serde_json::from_str(r##""#list""##).unwrap();
        assert_eq!(single, ScrollingElement::Single("#list".to_string()));

        let many: ScrollingElement = serde_json::from_str(r##"["#a", "#b"]"##).unwrap();
        assert_eq!(many.selectors(), vec!["#a", "#b"]);
    }

    #[test]
    fn test_resolve_manual_nodes() {
        let platform = FakePlatform::new();
        let list = platform.add_element(None, "list", "auto");
        let detector = ScrollableNodeDetector::new(&platform);

        let element = ScrollingElement::Many(vec!["#list".to_string(), "#missing".to_string()]);
        let nodes = detector.resolve_manual_nodes(&element).unwrap();

        assert_eq!(nodes, vec![Some(list), None]);
    }

    #[test]
    fn test_resolve_manual_nodes_invalid_selector() {
        let platform = FakePlatform::new();
        let detector = ScrollableNodeDetector::new(&platform);

        let element = ScrollingElement::from("div >>> p");
        assert!(detector.resolve_manual_nodes(&element).is_err());
    }
}
