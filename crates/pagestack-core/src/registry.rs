//! Application context
//!
//! Explicit registry of application-wide services, keyed by typed injection
//! keys. The context is passed to whoever needs it; there is no global.

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

pub struct InjectionKey<T> {
    id: Uuid,
    _marker: PhantomData<fn() -> T>,
}

impl<T> InjectionKey<T> {
    /// A fresh key, distinct from every other key
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub const fn from_uuid(id: Uuid) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl<T> Default for InjectionKey<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for InjectionKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for InjectionKey<T> {}

impl<T> fmt::Debug for InjectionKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InjectionKey").field(&self.id).finish()
    }
}

#[derive(Default)]
pub struct AppContext {
    provides: RwLock<HashMap<Uuid, Box<dyn Any>>>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `key`, replacing any earlier value.
    pub fn provide<T: 'static>(&self, key: &InjectionKey<T>, value: T) {
        if self.provides.write().insert(key.id, Box::new(value)).is_some() {
            tracing::warn!(key = %key.id, "Replaced an already provided value");
        }
    }

    pub fn inject<T: Clone + 'static>(&self, key: &InjectionKey<T>) -> Option<T> {
        self.provides
            .read()
            .get(&key.id)
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    pub fn contains<T>(&self, key: &InjectionKey<T>) -> bool {
        self.provides.read().contains_key(&key.id)
    }

    /// Tear down everything provided to the application.
    pub fn dispose(&self) {
        let count = {
            let mut provides = self.provides.write();
            let count = provides.len();
            provides.clear();
            count
        };
        tracing::info!(services = count, "Application context disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provide_and_inject() {
        let app = AppContext::new();
        let key: InjectionKey<String> = InjectionKey::new();

        assert!(app.inject(&key).is_none());
        app.provide(&key, "value".to_string());
        assert_eq!(app.inject(&key), Some("value".to_string()));
    }

    #[test]
    fn test_keys_are_unique() {
        let app = AppContext::new();
        let first: InjectionKey<u32> = InjectionKey::new();
        let second: InjectionKey<u32> = InjectionKey::new();

        app.provide(&first, 1);
        assert_eq!(app.inject(&first), Some(1));
        assert!(app.inject(&second).is_none());
    }

    #[test]
    fn test_dispose_clears() {
        let app = AppContext::new();
        let key: InjectionKey<u32> = InjectionKey::new();
        app.provide(&key, 7);

        app.dispose();
        assert!(!app.contains(&key));
    }
}
