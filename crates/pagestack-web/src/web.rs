//! Browser platform

use std::sync::Arc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{js_sys, window, Document, Element, Window};

use pagestack_core::{
    install, AppContext, Config, HistoryState, HostRouter, InstallOptions, PageStackRouter,
    Platform, RenderCallback, ScrollError, ScrollSnapshot, ViewportSize,
};

use crate::state::decode_history_state;

type Result<T> = std::result::Result<T, ScrollError>;

fn dom_error(e: JsValue) -> ScrollError {
    ScrollError::Dom(format!("{:?}", e))
}

pub struct WebPlatform {
    window: Window,
    document: Document,
}

impl WebPlatform {
    /// Returns `None` outside a browser main thread.
    pub fn new() -> Option<Self> {
        let window = window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }
}

impl Platform for WebPlatform {
    type Node = Element;

    fn viewport_size(&self) -> ViewportSize {
        let dimension = |value: std::result::Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or_default()
        };
        ViewportSize {
            width: dimension(self.window.inner_width()),
            height: dimension(self.window.inner_height()),
        }
    }

    fn scrolling_element(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn query_selector(&self, selector: &str) -> Result<Option<Element>> {
        self.document
            .query_selector(selector)
            .map_err(|_| ScrollError::InvalidSelector(selector.to_string()))
    }

    fn query_selector_all(&self, root: &Element, selector: &str) -> Result<Vec<Element>> {
        let list = root
            .query_selector_all(selector)
            .map_err(|_| ScrollError::InvalidSelector(selector.to_string()))?;

        Ok((0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn computed_overflow(&self, node: &Element) -> Result<String> {
        let style = self
            .window
            .get_computed_style(node)
            .map_err(dom_error)?
            .ok_or_else(|| ScrollError::Style(node.tag_name()))?;

        style.get_property_value("overflow").map_err(dom_error)
    }

    fn scroll_offset(&self, node: &Element) -> Result<ScrollSnapshot> {
        if !node.is_connected() {
            return Err(ScrollError::DetachedNode(node.tag_name()));
        }
        Ok(ScrollSnapshot::new(
            f64::from(node.scroll_left()),
            f64::from(node.scroll_top()),
        ))
    }

    fn set_scroll_left(&self, node: &Element, left: f64) -> Result<()> {
        if !node.is_connected() {
            return Err(ScrollError::DetachedNode(node.tag_name()));
        }
        node.set_scroll_left(left.round() as i32);
        Ok(())
    }

    fn set_scroll_top(&self, node: &Element, top: f64) -> Result<()> {
        if !node.is_connected() {
            return Err(ScrollError::DetachedNode(node.tag_name()));
        }
        node.set_scroll_top(top.round() as i32);
        Ok(())
    }

    fn history_state(&self) -> Option<HistoryState> {
        let state = self.window.history().ok()?.state().ok()?;
        if state.is_null() || state.is_undefined() {
            return None;
        }

        let json: Option<String> = js_sys::JSON::stringify(&state).ok().map(String::from);
        decode_history_state(json.as_deref())
    }

    /// Runs on the microtask queue, after the current update has been flushed.
    fn after_render(&self, callback: RenderCallback) {
        wasm_bindgen_futures::spawn_local(async move {
            callback();
        });
    }
}

/// Install the page stack against the current document.
pub fn install_web<R: HostRouter>(
    app: &AppContext,
    router: R,
    config: Config,
) -> pagestack_core::Result<PageStackRouter<WebPlatform>> {
    let platform = WebPlatform::new()
        .ok_or_else(|| pagestack_core::CoreError::Config("no browser window".to_string()))?;

    install(
        app,
        Arc::new(platform),
        InstallOptions::new(router).with_config(config),
    )
}
