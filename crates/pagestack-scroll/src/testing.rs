//! In-memory platform for tests
//!
//! Models a flat node table with parent links, id selectors (`#id`), the
//! universal selector (`*`), computed overflow, scroll offsets, the current
//! history record and a queue of after-render callbacks that tests flush by
//! hand.

use parking_lot::{Mutex, RwLock};

use crate::error::ScrollError;
use crate::platform::{HistoryState, Platform, RenderCallback, ScrollSnapshot, ViewportSize};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FakeNode(usize);

#[derive(Debug, Clone)]
struct FakeElement {
    id: Option<String>,
    parent: Option<usize>,
    overflow: String,
    scroll: ScrollSnapshot,
    detached: bool,
    style_fails: bool,
}

const ROOT: usize = 0;
const BODY: usize = 1;

pub struct FakePlatform {
    elements: RwLock<Vec<FakeElement>>,
    history: RwLock<Option<HistoryState>>,
    pending: Mutex<Vec<RenderCallback>>,
    viewport: ViewportSize,
}

impl FakePlatform {
    /// A document holding only the viewport scroll root and an empty body.
    pub fn new() -> Self {
        let root = FakeElement {
            id: None,
            parent: None,
            overflow: "visible".to_string(),
            scroll: ScrollSnapshot::default(),
            detached: false,
            style_fails: false,
        };
        let body = FakeElement {
            parent: Some(ROOT),
            ..root.clone()
        };

        Self {
            elements: RwLock::new(vec![root, body]),
            history: RwLock::new(None),
            pending: Mutex::new(Vec::new()),
            viewport: ViewportSize {
                width: 375.0,
                height: 667.0,
            },
        }
    }

    /// Append an element under `parent` (the body when `None`).
    pub fn add_element(&self, parent: Option<FakeNode>, id: &str, overflow: &str) -> FakeNode {
        let mut elements = self.elements.write();
        elements.push(FakeElement {
            id: Some(id.to_string()),
            parent: Some(parent.map(|p| p.0).unwrap_or(BODY)),
            overflow: overflow.to_string(),
            scroll: ScrollSnapshot::default(),
            detached: false,
            style_fails: false,
        });
        FakeNode(elements.len() - 1)
    }

    pub fn root(&self) -> FakeNode {
        FakeNode(ROOT)
    }

    pub fn set_overflow(&self, node: FakeNode, overflow: &str) {
        self.elements.write()[node.0].overflow = overflow.to_string();
    }

    pub fn set_scroll(&self, node: FakeNode, left: f64, top: f64) {
        self.elements.write()[node.0].scroll = ScrollSnapshot::new(left, top);
    }

    pub fn scroll(&self, node: FakeNode) -> ScrollSnapshot {
        self.elements.read()[node.0].scroll
    }

    /// Remove a node from the document while keeping the handle valid.
    pub fn detach(&self, node: FakeNode) {
        self.elements.write()[node.0].detached = true;
    }

    /// Make every computed style read on `node` fail.
    pub fn fail_style(&self, node: FakeNode) {
        self.elements.write()[node.0].style_fails = true;
    }

    pub fn set_history_position(&self, position: i64) {
        *self.history.write() = Some(HistoryState::at(position));
    }

    pub fn set_history_state(&self, state: Option<HistoryState>) {
        *self.history.write() = state;
    }

    pub fn pending_renders(&self) -> usize {
        self.pending.lock().len()
    }

    /// Run every queued after-render callback; returns how many ran.
    pub fn flush_render(&self) -> usize {
        let callbacks: Vec<RenderCallback> = std::mem::take(&mut *self.pending.lock());
        let count = callbacks.len();
        for callback in callbacks {
            callback();
        }
        count
    }

    fn is_attached(elements: &[FakeElement], mut index: usize) -> bool {
        loop {
            if elements[index].detached {
                return false;
            }
            match elements[index].parent {
                Some(parent) => index = parent,
                None => return true,
            }
        }
    }

    fn is_descendant(elements: &[FakeElement], mut index: usize, ancestor: usize) -> bool {
        while let Some(parent) = elements[index].parent {
            if parent == ancestor {
                return true;
            }
            index = parent;
        }
        false
    }

    fn parse_id_selector(selector: &str) -> Result<&str> {
        let id = selector
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ScrollError::InvalidSelector(selector.to_string()))?;

        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ScrollError::InvalidSelector(selector.to_string()));
        }

        Ok(id)
    }

    fn attached(&self, node: &FakeNode) -> Result<()> {
        if Self::is_attached(&self.elements.read(), node.0) {
            Ok(())
        } else {
            Err(ScrollError::DetachedNode(format!("{:?}", node)))
        }
    }
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for FakePlatform {
    type Node = FakeNode;

    fn viewport_size(&self) -> ViewportSize {
        self.viewport
    }

    fn scrolling_element(&self) -> Option<FakeNode> {
        Some(FakeNode(ROOT))
    }

    fn body(&self) -> Option<FakeNode> {
        Some(FakeNode(BODY))
    }

    fn query_selector(&self, selector: &str) -> Result<Option<FakeNode>> {
        let id = Self::parse_id_selector(selector)?;
        let elements = self.elements.read();

        Ok(elements
            .iter()
            .enumerate()
            .find(|(index, el)| {
                el.id.as_deref() == Some(id) && Self::is_attached(&elements, *index)
            })
            .map(|(index, _)| FakeNode(index)))
    }

    fn query_selector_all(&self, root: &FakeNode, selector: &str) -> Result<Vec<FakeNode>> {
        let elements = self.elements.read();
        let wanted = if selector.trim() == "*" {
            None
        } else {
            Some(Self::parse_id_selector(selector)?)
        };

        Ok((0..elements.len())
            .filter(|&index| Self::is_descendant(&elements, index, root.0))
            .filter(|&index| Self::is_attached(&elements, index))
            .filter(|&index| wanted.is_none() || elements[index].id.as_deref() == wanted)
            .map(FakeNode)
            .collect())
    }

    fn computed_overflow(&self, node: &FakeNode) -> Result<String> {
        let elements = self.elements.read();
        let element = elements
            .get(node.0)
            .ok_or_else(|| ScrollError::Style(format!("unknown node {:?}", node)))?;
        if element.style_fails {
            return Err(ScrollError::Style(format!("{:?}", node)));
        }

        // Detached nodes report an empty computed style, like a real document
        if Self::is_attached(&elements, node.0) {
            Ok(element.overflow.clone())
        } else {
            Ok(String::new())
        }
    }

    fn scroll_offset(&self, node: &FakeNode) -> Result<ScrollSnapshot> {
        self.attached(node)?;
        Ok(self.elements.read()[node.0].scroll)
    }

    fn set_scroll_left(&self, node: &FakeNode, left: f64) -> Result<()> {
        self.attached(node)?;
        self.elements.write()[node.0].scroll.left = left;
        Ok(())
    }

    fn set_scroll_top(&self, node: &FakeNode, top: f64) -> Result<()> {
        self.attached(node)?;
        self.elements.write()[node.0].scroll.top = top;
        Ok(())
    }

    fn history_state(&self) -> Option<HistoryState> {
        self.history.read().clone()
    }

    fn after_render(&self, callback: RenderCallback) {
        self.pending.lock().push(callback);
    }
}
