//! Page stack
//!
//! Bounded, chronologically ordered record of the pages the user walked
//! through. When a push would exceed the capacity the oldest page is evicted.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use pagestack_scroll::HistoryState;

use crate::route::Route;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEntry {
    /// View identifier; unnamed views are still tracked
    pub name: Option<String>,
    /// History record captured when the entry was pushed
    pub state: HistoryState,
}

impl PageEntry {
    pub fn new(name: Option<String>, state: HistoryState) -> Self {
        Self { name, state }
    }

    pub fn for_route(route: &Route, state: HistoryState) -> Self {
        Self::new(route.name.clone(), state)
    }
}

#[derive(Debug, Clone)]
pub struct NavigationStack {
    entries: VecDeque<PageEntry>,
    max: usize,
}

impl NavigationStack {
    /// Create a stack holding at most `max` entries (at least one).
    pub fn new(max: usize) -> Self {
        let max = max.max(1);
        Self {
            entries: VecDeque::with_capacity(max),
            max,
        }
    }

    /// Push a page on top, evicting the oldest when full.
    pub fn push(&mut self, entry: PageEntry) {
        if self.entries.len() >= self.max {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::debug!(
                    name = ?evicted.name,
                    position = ?evicted.state.position,
                    max = self.max,
                    "Evicted oldest page"
                );
            }
        }
        self.entries.push_back(entry);
    }

    /// Remove the top page. An empty stack stays empty.
    pub fn pop(&mut self) -> Option<PageEntry> {
        self.entries.pop_back()
    }

    /// Swap the top page for `entry`.
    pub fn replace(&mut self, entry: PageEntry) {
        self.pop();
        self.push(entry);
    }

    pub fn top(&self) -> Option<&PageEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn entries(&self) -> impl Iterator<Item = &PageEntry> {
        self.entries.iter()
    }

    /// Names of the tracked views, oldest first
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|entry| entry.name.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, position: i64) -> PageEntry {
        PageEntry::new(Some(name.to_string()), HistoryState::at(position))
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut stack = NavigationStack::new(2);

        stack.push(entry("A", 1));
        assert_eq!(stack.names(), vec!["A"]);

        stack.push(entry("B", 2));
        assert_eq!(stack.names(), vec!["A", "B"]);

        stack.push(entry("C", 3));
        assert_eq!(stack.names(), vec!["B", "C"]);
    }

    #[test]
    fn test_length_never_exceeds_max() {
        for max in 1..6 {
            let mut stack = NavigationStack::new(max);
            for i in 0..20 {
                stack.push(entry(&format!("page-{}", i), i));
                assert!(stack.len() <= max);

                // Retained entries are the most recent ones, in push order
                let first = (i + 1 - stack.len() as i64).max(0);
                let expected: Vec<String> = (first..=i).map(|n| format!("page-{}", n)).collect();
                assert_eq!(stack.names(), expected);
            }
        }
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut stack = NavigationStack::new(0);
        assert_eq!(stack.max(), 1);

        stack.push(entry("A", 1));
        stack.push(entry("B", 2));
        assert_eq!(stack.names(), vec!["B"]);
    }

    #[test]
    fn test_unnamed_entries_are_pushed() {
        let mut stack = NavigationStack::new(3);
        stack.push(PageEntry::new(None, HistoryState::at(1)));
        stack.push(entry("A", 2));

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.names(), vec!["A"]);
    }

    #[test]
    fn test_pop_empty_is_noop() {
        let mut stack = NavigationStack::new(3);
        assert!(stack.pop().is_none());
        assert!(stack.is_empty());

        stack.push(entry("A", 1));
        assert_eq!(stack.pop(), Some(entry("A", 1)));
        assert!(stack.pop().is_none());
    }

    #[test]
    fn test_replace_top() {
        let mut stack = NavigationStack::new(3);
        stack.push(entry("A", 1));
        stack.push(entry("B", 2));

        stack.replace(entry("C", 2));
        assert_eq!(stack.names(), vec!["A", "C"]);
        assert_eq!(stack.top(), Some(&entry("C", 2)));
    }

    #[test]
    fn test_replace_on_empty_stack_pushes() {
        let mut stack = NavigationStack::new(3);
        stack.replace(entry("A", 1));
        assert_eq!(stack.names(), vec!["A"]);
    }

    #[test]
    fn test_replace_at_capacity_keeps_older_entries() {
        let mut stack = NavigationStack::new(2);
        stack.push(entry("A", 1));
        stack.push(entry("B", 2));

        stack.replace(entry("C", 2));
        assert_eq!(stack.names(), vec!["A", "C"]);
    }
}
