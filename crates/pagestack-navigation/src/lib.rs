//! PageStack Navigation
//!
//! Keeps a bounded stack of visited pages in step with the host history:
//! - position grows → push (after saving the scroll state of the page left)
//! - position shrinks → pop (after scheduling the scroll restore of the page entered)
//! - always → the top entry is replaced with the page entered

mod resolver;
mod route;
mod stack;

pub use resolver::{compute_delta, NavigationDirection, NavigationResolver, Transition};
pub use route::{Route, RouteMeta};
pub use stack::{NavigationStack, PageEntry};
