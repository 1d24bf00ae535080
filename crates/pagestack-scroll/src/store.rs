//! Scroll position store
//!
//! Entries are keyed by the route's full path and are read exactly once:
//! [`ScrollPositionStore::get`] removes what it returns, so a restore that is
//! superseded by another navigation before its deferred callback runs finds
//! nothing and applies nothing twice.
//!
//! Nothing else evicts entries. A page that is never navigated back to keeps
//! its entry, node handles included, until [`ScrollPositionStore::clear`].

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::detector::{ScrollableNodeDetector, ScrollingElement};
use crate::error::ScrollError;
use crate::platform::{Platform, ScrollSnapshot};
use crate::Result;

/// What the store needs to know about a route.
pub trait ScrollRoute {
    /// Unique key for the navigable state, normally the full path
    fn scroll_key(&self) -> &str;

    /// Scroll containers the route declares itself, if any
    fn scrolling_element(&self) -> Option<&ScrollingElement>;
}

type SavedPositions<N> = Vec<(N, ScrollSnapshot)>;

pub struct ScrollPositionStore<P: Platform> {
    platform: Arc<P>,
    positions: Arc<RwLock<HashMap<String, SavedPositions<P::Node>>>>,
}

impl<P: Platform> ScrollPositionStore<P> {
    pub fn new(platform: Arc<P>) -> Self {
        Self {
            platform,
            positions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Capture the offsets of every scrollable node on the page being left.
    ///
    /// Never fails: a DOM error is logged and nothing is stored for the route.
    pub fn save<R: ScrollRoute + ?Sized>(&self, from: &R, app_root: &str) {
        let key = from.scroll_key();

        match self.capture(from.scrolling_element(), app_root) {
            Ok(saved) => {
                tracing::debug!(
                    key = %key,
                    nodes = saved.len(),
                    viewport = ?self.platform.viewport_size(),
                    "Saved scroll positions"
                );
                self.positions.write().insert(key.to_string(), saved);
            }
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Failed to save scroll positions");
            }
        }
    }

    /// Remove and return the positions saved under `key`.
    pub fn get(&self, key: &str) -> SavedPositions<P::Node> {
        self.take(key).unwrap_or_default()
    }

    /// Consume the positions saved for `to` and apply them after the next render.
    ///
    /// Returns whether a deferred restore was scheduled.
    pub fn restore<R: ScrollRoute + ?Sized>(&self, to: &R) -> bool {
        let key = to.scroll_key().to_string();
        let Some(saved) = self.take(&key) else {
            return false;
        };

        let platform = Arc::clone(&self.platform);
        self.platform.after_render(Box::new(move || {
            for (node, snapshot) in &saved {
                if let Err(e) = apply_snapshot(platform.as_ref(), node, snapshot) {
                    tracing::error!(
                        key = %key,
                        node = ?node,
                        error = %e,
                        "Failed to restore scroll position"
                    );
                }
            }
            tracing::debug!(key = %key, nodes = saved.len(), "Restored scroll positions");
        }));

        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.positions.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.positions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.read().is_empty()
    }

    pub fn clear(&self) {
        self.positions.write().clear();
    }

    fn take(&self, key: &str) -> Option<SavedPositions<P::Node>> {
        self.positions.write().remove(key)
    }

    fn capture(
        &self,
        manual: Option<&ScrollingElement>,
        app_root: &str,
    ) -> Result<SavedPositions<P::Node>> {
        let platform = self.platform.as_ref();
        let detector = ScrollableNodeDetector::new(platform);
        let app_root_node = platform.query_selector(app_root)?;

        let mut candidates = vec![platform.scrolling_element(), platform.body()];
        match manual {
            Some(element) => {
                candidates.push(app_root_node);
                candidates.extend(detector.resolve_manual_nodes(element)?);
            }
            None => {
                let root = app_root_node
                    .ok_or_else(|| ScrollError::AppRootNotFound(app_root.to_string()))?;
                let descendants = platform.query_selector_all(&root, "*")?;
                candidates.push(Some(root));
                candidates.extend(descendants.into_iter().map(Some));
            }
        }

        candidates
            .into_iter()
            .flatten()
            .filter(|node| detector.is_scrollable(Some(node)))
            .map(|node| {
                let snapshot = platform.scroll_offset(&node)?;
                Ok((node, snapshot))
            })
            .collect()
    }
}

/// Offsets of zero are skipped, so a saved zero leaves the node where it is.
fn apply_snapshot<P: Platform>(
    platform: &P,
    node: &P::Node,
    snapshot: &ScrollSnapshot,
) -> Result<()> {
    if snapshot.left != 0.0 {
        platform.set_scroll_left(node, snapshot.left)?;
    }
    if snapshot.top != 0.0 {
        platform.set_scroll_top(node, snapshot.top)?;
    }
    Ok(())
}

impl<P: Platform> Clone for ScrollPositionStore<P> {
    fn clone(&self) -> Self {
        Self {
            platform: Arc::clone(&self.platform),
            positions: Arc::clone(&self.positions),
        }
    }
}
