//! Navigation resolution
//!
//! Decides from the history position delta whether a completed navigation
//! was a forward push, a back pop or an in-place replace, and sequences the
//! scroll save/restore around the stack mutation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use pagestack_scroll::{HistoryState, Platform, ScrollPositionStore};

use crate::route::Route;
use crate::stack::{NavigationStack, PageEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationDirection {
    Forward,
    Back,
    Unknown,
}

impl NavigationDirection {
    pub fn from_delta(delta: i64) -> Self {
        match delta {
            d if d > 0 => NavigationDirection::Forward,
            d if d < 0 => NavigationDirection::Back,
            _ => NavigationDirection::Unknown,
        }
    }
}

/// Outcome of resolving one navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub delta: i64,
    pub direction: NavigationDirection,
}

impl Transition {
    pub fn new(delta: i64) -> Self {
        Self {
            delta,
            direction: NavigationDirection::from_delta(delta),
        }
    }
}

/// Signed distance between the incoming history position and the top page.
///
/// Zero when the stack is empty or the host supplied no position. A top page
/// recorded without a position counts as position 0. Saturates instead of
/// overflowing on extreme host positions.
pub fn compute_delta(last: Option<&PageEntry>, current: Option<&HistoryState>) -> i64 {
    let Some(last) = last else {
        return 0;
    };
    let Some(current_position) = current.and_then(|state| state.position) else {
        return 0;
    };

    current_position.saturating_sub(last.state.position.unwrap_or(0))
}

pub struct NavigationResolver<P: Platform> {
    platform: Arc<P>,
    scroll: ScrollPositionStore<P>,
    app_root: String,
    save_scroll_position: bool,
}

impl<P: Platform> NavigationResolver<P> {
    pub fn new(
        platform: Arc<P>,
        scroll: ScrollPositionStore<P>,
        app_root: impl Into<String>,
        save_scroll_position: bool,
    ) -> Self {
        Self {
            platform,
            scroll,
            app_root: app_root.into(),
            save_scroll_position,
        }
    }

    pub fn scroll_store(&self) -> &ScrollPositionStore<P> {
        &self.scroll
    }

    /// Reconcile `stack` with a completed navigation from `from` to `to`.
    pub fn resolve(&self, stack: &mut NavigationStack, to: &Route, from: &Route) -> Transition {
        let state = self.platform.history_state();
        let transition = Transition::new(compute_delta(stack.top(), state.as_ref()));
        let state = state.unwrap_or_default();

        if transition.delta > 0 {
            if self.save_scroll_position {
                self.scroll.save(from, &self.app_root);
            }
            stack.push(PageEntry::for_route(to, state.clone()));
        }

        if transition.delta < 0 {
            if self.save_scroll_position {
                self.scroll.restore(to);
            }
            stack.pop();
        }

        // Runs after both branches, so a push is immediately replaced by the same page
        stack.replace(PageEntry::for_route(to, state));

        tracing::debug!(
            to = %to.full_path,
            from = %from.full_path,
            delta = transition.delta,
            direction = ?transition.direction,
            depth = stack.len(),
            "Resolved navigation"
        );

        transition
    }
}
