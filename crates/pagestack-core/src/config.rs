//! Page stack configuration

use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Selector of the element the application is mounted on
    pub el: String,
    /// Maximum number of pages kept on the stack
    pub max: usize,
    /// Skip scroll capture and restore entirely
    pub disable_save_scroll_position: bool,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Replace values the page stack cannot honor, warning about each.
    pub fn normalized(mut self) -> Self {
        if self.max == 0 {
            tracing::warn!("Config max of 0 clamped to 1");
            self.max = 1;
        }
        if self.el.trim().is_empty() {
            let el = Config::default().el;
            tracing::warn!(el = %el, "Empty config el replaced by the default");
            self.el = el;
        }
        self
    }

    pub fn save_scroll_position(&self) -> bool {
        !self.disable_save_scroll_position
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            el: "#app".to_string(),
            max: 10,
            disable_save_scroll_position: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.el, "#app");
        assert_eq!(config.max, 10);
        assert!(config.save_scroll_position());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = Config::from_json(r#"{"max": 3}"#).unwrap();
        assert_eq!(config.max, 3);
        assert_eq!(config.el, "#app");

        let config = Config::from_json(r##"{"el": "#root", "disableSaveScrollPosition": true}"##)
            .unwrap();
        assert_eq!(config.el, "#root");
        assert!(!config.save_scroll_position());
    }

    #[test]
    fn test_unusable_values_normalized() {
        let config = Config::from_json(r#"{"max": 0}"#).unwrap();
        assert_eq!(config.max, 1);

        let config = Config::from_json(r#"{"el": " ", "max": 4}"#).unwrap();
        assert_eq!(config.el, "#app");
        assert_eq!(config.max, 4);
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            Config::from_json("not json"),
            Err(crate::error::CoreError::Serialization(_))
        ));
    }
}
