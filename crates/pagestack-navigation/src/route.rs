//! Route objects handed over by the host router

use serde::{Deserialize, Serialize};

use pagestack_scroll::{ScrollRoute, ScrollingElement};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    /// Whether the view stays mounted when navigated away from (default `true`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<bool>,
    /// Scroll containers the view declares instead of scanning the whole app
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrolling_element: Option<ScrollingElement>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Path including query and hash, unique per navigable state
    pub full_path: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub meta: RouteMeta,
}

impl Route {
    pub fn new(full_path: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_keep_alive(mut self, keep_alive: bool) -> Self {
        self.meta.keep_alive = Some(keep_alive);
        self
    }

    pub fn with_scrolling_element(mut self, element: impl Into<ScrollingElement>) -> Self {
        self.meta.scrolling_element = Some(element.into());
        self
    }

    /// Keep-alive policy with the default applied
    pub fn keeps_alive(&self) -> bool {
        self.meta.keep_alive.unwrap_or(true)
    }
}

impl ScrollRoute for Route {
    fn scroll_key(&self) -> &str {
        &self.full_path
    }

    fn scrolling_element(&self) -> Option<&ScrollingElement> {
        self.meta.scrolling_element.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_alive_defaults_to_true() {
        assert!(Route::new("/").keeps_alive());
        assert!(Route::new("/").with_keep_alive(true).keeps_alive());
        assert!(!Route::new("/").with_keep_alive(false).keeps_alive());
    }

    #[test]
    fn test_route_from_host_json() {
        let json = r##"{
            "fullPath": "/list?page=2",
            "name": "List",
            "meta": { "keepAlive": false, "scrollingElement": ["#list", "#side"] }
        }"##;
        let route: Route = serde_json::from_str(json).unwrap();

        assert_eq!(route.full_path, "/list?page=2");
        assert_eq!(route.name.as_deref(), Some("List"));
        assert!(!route.keeps_alive());
        assert_eq!(route.scroll_key(), "/list?page=2");
        assert_eq!(
            route.scrolling_element().map(|e| e.selectors()),
            Some(vec!["#list", "#side"])
        );
    }

    #[test]
    fn test_route_minimal_json() {
        let route: Route = serde_json::from_str(r#"{"fullPath": "/"}"#).unwrap();
        assert!(route.name.is_none());
        assert!(route.keeps_alive());
        assert!(route.scrolling_element().is_none());
    }
}
