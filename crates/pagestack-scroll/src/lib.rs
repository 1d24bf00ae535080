//! PageStack Scroll Restoration
//!
//! Captures the scroll offsets of every scrollable node on a page when it is
//! navigated away from, and re-applies them when the page is revisited.
//!
//! All host access goes through the [`Platform`] capability so the store can
//! run against a real document or an in-memory fake.

mod detector;
mod error;
mod platform;
mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use detector::{ScrollableNodeDetector, ScrollingElement};
pub use error::ScrollError;
pub use platform::{HistoryState, Platform, RenderCallback, ScrollSnapshot, ViewportSize};
pub use store::{ScrollPositionStore, ScrollRoute};

pub type Result<T> = std::result::Result<T, ScrollError>;
