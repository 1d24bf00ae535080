//! PageStack Core
//!
//! Keeps the views of a single-page application mounted in step with the
//! browser history: pages pushed while moving forward stay cached, pages
//! popped while moving back are torn down, and scroll offsets come back
//! when a cached page is shown again.
//!
//! The manager is created once by [`install`], which hooks it into the host
//! router and provides it to the [`AppContext`] for the rendering layer.

mod adapter;
mod config;
mod error;
mod install;
mod observer;
mod registry;
mod router;

pub use adapter::{AfterEachHook, HostRouter, IntegrationAdapter};
pub use config::Config;
pub use error::CoreError;
pub use install::{install, page_stack_router_key, use_page_stack_router, InstallOptions};
pub use observer::{SubscriptionId, ViewNameObserver};
pub use registry::{AppContext, InjectionKey};
pub use router::PageStackRouter;

// Re-export core components
pub use pagestack_navigation::{
    compute_delta, NavigationDirection, NavigationResolver, NavigationStack, PageEntry, Route,
    RouteMeta, Transition,
};
pub use pagestack_scroll::{
    HistoryState, Platform, RenderCallback, ScrollError, ScrollPositionStore, ScrollRoute,
    ScrollSnapshot, ScrollableNodeDetector, ScrollingElement, ViewportSize,
};

pub type Result<T> = std::result::Result<T, CoreError>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
