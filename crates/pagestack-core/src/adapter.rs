//! Host router integration
//!
//! Filters completed navigations by the keep-alive policy before they reach
//! the page stack. Unnamed routes and routes with `keepAlive: false` never
//! enter the stack.

use std::rc::Rc;

use pagestack_navigation::{Route, Transition};
use pagestack_scroll::Platform;

use crate::router::PageStackRouter;

/// Hook called by the host router with `(to, from)` after each navigation
pub type AfterEachHook = Box<dyn Fn(&Route, &Route) + 'static>;

pub trait HostRouter {
    /// Register `hook` to run after every completed navigation.
    fn after_each(&self, hook: AfterEachHook);
}

impl<T: HostRouter + ?Sized> HostRouter for &T {
    fn after_each(&self, hook: AfterEachHook) {
        (**self).after_each(hook)
    }
}

impl<T: HostRouter + ?Sized> HostRouter for Rc<T> {
    fn after_each(&self, hook: AfterEachHook) {
        (**self).after_each(hook)
    }
}

pub struct IntegrationAdapter<P: Platform> {
    router: PageStackRouter<P>,
}

impl<P: Platform> IntegrationAdapter<P> {
    pub fn new(router: PageStackRouter<P>) -> Self {
        Self { router }
    }

    /// Whether a navigation to `to` takes part in the page stack
    pub fn should_track(to: &Route) -> bool {
        to.name.is_some() && to.keeps_alive()
    }

    /// Handle one completed navigation; `None` when it was skipped.
    pub fn on_after_each(&self, to: &Route, from: &Route) -> Option<Transition> {
        if !Self::should_track(to) {
            tracing::trace!(to = %to.full_path, "Navigation not tracked");
            return None;
        }
        Some(self.router.navigate(to, from))
    }

    /// Hook this adapter into `host`.
    pub fn attach<R: HostRouter>(self, host: &R) {
        host.after_each(Box::new(move |to: &Route, from: &Route| {
            self.on_after_each(to, from);
        }));
    }

    /// Views the rendering layer should keep mounted
    pub fn include(&self) -> Vec<String> {
        self.router.view_names()
    }
}
