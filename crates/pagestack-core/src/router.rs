//! Page stack manager
//!
//! Owns the page stack, the scroll store and the view name observer.
//! One instance is created per application and shared by cloning.

use parking_lot::RwLock;
use std::sync::Arc;

use pagestack_navigation::{NavigationResolver, NavigationStack, PageEntry, Route, Transition};
use pagestack_scroll::{Platform, ScrollPositionStore};

use crate::config::Config;
use crate::observer::{SubscriptionId, ViewNameObserver};

pub struct PageStackRouter<P: Platform> {
    /// Configuration
    config: Config,
    /// Host document and history access
    platform: Arc<P>,
    /// Visited pages, oldest first
    stack: Arc<RwLock<NavigationStack>>,
    /// Push/pop/replace decision and scroll sequencing
    resolver: Arc<NavigationResolver<P>>,
    /// Rendering layer subscriptions
    observer: ViewNameObserver,
    last_transition: Arc<RwLock<Option<Transition>>>,
}

impl<P: Platform> PageStackRouter<P> {
    pub fn new(config: Config, platform: Arc<P>) -> Self {
        let scroll = ScrollPositionStore::new(Arc::clone(&platform));
        let resolver = NavigationResolver::new(
            Arc::clone(&platform),
            scroll,
            config.el.clone(),
            config.save_scroll_position(),
        );

        Self {
            stack: Arc::new(RwLock::new(NavigationStack::new(config.max))),
            resolver: Arc::new(resolver),
            observer: ViewNameObserver::new(),
            last_transition: Arc::new(RwLock::new(None)),
            platform,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reconcile the stack with a completed navigation.
    pub fn navigate(&self, to: &Route, from: &Route) -> Transition {
        let transition = self.mutate(|stack| self.resolver.resolve(stack, to, from));
        *self.last_transition.write() = Some(transition);
        transition
    }

    /// Push `location` with the current history record.
    pub fn push(&self, location: &Route) {
        let entry = self.entry_for(location);
        self.mutate(|stack| stack.push(entry));
    }

    pub fn pop(&self) -> Option<PageEntry> {
        self.mutate(|stack| stack.pop())
    }

    /// Replace the top page with `location`.
    pub fn replace(&self, location: &Route) {
        let entry = self.entry_for(location);
        self.mutate(|stack| stack.replace(entry));
    }

    /// Names of the views to keep mounted, oldest first
    pub fn view_names(&self) -> Vec<String> {
        self.stack.read().names()
    }

    /// Whether the view called `name` is currently on the stack
    pub fn is_cached(&self, name: &str) -> bool {
        self.stack
            .read()
            .entries()
            .any(|entry| entry.name.as_deref() == Some(name))
    }

    pub fn entries(&self) -> Vec<PageEntry> {
        self.stack.read().entries().cloned().collect()
    }

    pub fn depth(&self) -> usize {
        self.stack.read().len()
    }

    pub fn last_transition(&self) -> Option<Transition> {
        *self.last_transition.read()
    }

    pub fn subscribe(&self, listener: impl Fn(&[String]) + 'static) -> SubscriptionId {
        self.observer.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observer.unsubscribe(id)
    }

    pub fn scroll_store(&self) -> &ScrollPositionStore<P> {
        self.resolver.scroll_store()
    }

    /// Drop all pages, saved scroll positions and subscribers.
    pub fn reset(&self) {
        self.mutate(|stack| stack.clear());
        self.scroll_store().clear();
        self.observer.clear();
        *self.last_transition.write() = None;
        tracing::info!("Page stack reset");
    }

    fn entry_for(&self, location: &Route) -> PageEntry {
        PageEntry::for_route(location, self.platform.history_state().unwrap_or_default())
    }

    /// Apply `f` to the stack, then notify subscribers outside the lock.
    fn mutate<T>(&self, f: impl FnOnce(&mut NavigationStack) -> T) -> T {
        let (result, names) = {
            let mut stack = self.stack.write();
            let result = f(&mut stack);
            (result, stack.names())
        };
        self.observer.publish(&names);
        result
    }
}

impl<P: Platform> Clone for PageStackRouter<P> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            platform: Arc::clone(&self.platform),
            stack: Arc::clone(&self.stack),
            resolver: Arc::clone(&self.resolver),
            observer: self.observer.clone(),
            last_transition: Arc::clone(&self.last_transition),
        }
    }
}
