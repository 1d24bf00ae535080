//! Installation
//!
//! Builds the page stack manager, hooks it into the host router and makes it
//! available through the application context.

use std::sync::Arc;
use uuid::Uuid;

use pagestack_scroll::Platform;

use crate::adapter::{HostRouter, IntegrationAdapter};
use crate::config::Config;
use crate::error::CoreError;
use crate::registry::{AppContext, InjectionKey};
use crate::router::PageStackRouter;
use crate::Result;

const PAGE_STACK_ROUTER_KEY: Uuid = Uuid::from_u128(0x7061_6765_7374_6163_6b2d_726f_7574_6572);

pub struct InstallOptions<R> {
    /// Host router; installation fails without one
    pub router: Option<R>,
    pub config: Config,
}

impl<R> InstallOptions<R> {
    pub fn new(router: R) -> Self {
        Self {
            router: Some(router),
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
}

impl<R> Default for InstallOptions<R> {
    fn default() -> Self {
        Self {
            router: None,
            config: Config::default(),
        }
    }
}

/// Key under which [`install`] provides the manager
pub fn page_stack_router_key<P: Platform>() -> InjectionKey<PageStackRouter<P>> {
    InjectionKey::from_uuid(PAGE_STACK_ROUTER_KEY)
}

/// Fetch the installed manager from `app`.
pub fn use_page_stack_router<P: Platform>(app: &AppContext) -> Result<PageStackRouter<P>> {
    app.inject(&page_stack_router_key::<P>())
        .ok_or(CoreError::NotInstalled)
}

pub fn install<P, R>(
    app: &AppContext,
    platform: Arc<P>,
    options: InstallOptions<R>,
) -> Result<PageStackRouter<P>>
where
    P: Platform,
    R: HostRouter,
{
    let router = options.router.ok_or(CoreError::MissingRouter)?;
    let manager = PageStackRouter::new(options.config.normalized(), platform);
    IntegrationAdapter::new(manager.clone()).attach(&router);
    app.provide(&page_stack_router_key::<P>(), manager.clone());

    tracing::info!(
        version = crate::VERSION,
        el = %manager.config().el,
        max = manager.config().max,
        save_scroll_position = manager.config().save_scroll_position(),
        "Page stack router installed"
    );

    Ok(manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AfterEachHook;
    use pagestack_navigation::Route;
    use pagestack_scroll::testing::FakePlatform;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeRouter {
        hooks: RefCell<Vec<AfterEachHook>>,
    }

    impl FakeRouter {
        fn fire(&self, to: &Route, from: &Route) {
            for hook in self.hooks.borrow().iter() {
                hook(to, from);
            }
        }
    }

    impl HostRouter for FakeRouter {
        fn after_each(&self, hook: AfterEachHook) {
            self.hooks.borrow_mut().push(hook);
        }
    }

    #[test]
    fn test_install_requires_router() {
        let app = AppContext::new();
        let platform = Arc::new(FakePlatform::new());
        let options: InstallOptions<FakeRouter> = InstallOptions::default();

        let result = install(&app, platform, options);
        assert!(matches!(result, Err(CoreError::MissingRouter)));
        assert!(use_page_stack_router::<FakePlatform>(&app).is_err());
    }

    #[test]
    fn test_install_clamps_zero_max() {
        let app = AppContext::new();
        let platform = Arc::new(FakePlatform::new());
        let config = Config {
            max: 0,
            ..Config::default()
        };
        let options = InstallOptions::new(FakeRouter::default()).with_config(config);

        let manager = install(&app, platform, options).unwrap();
        assert_eq!(manager.config().max, 1);
    }

    #[test]
    fn test_install_provides_manager_and_hooks_router() {
        let app = AppContext::new();
        let platform = Arc::new(FakePlatform::new());
        platform.add_element(None, "app", "visible");
        let host = Rc::new(FakeRouter::default());

        install(&app, Arc::clone(&platform), InstallOptions::new(Rc::clone(&host))).unwrap();
        let manager = use_page_stack_router::<FakePlatform>(&app).unwrap();
        assert_eq!(manager.config().max, 10);

        platform.set_history_position(1);
        host.fire(&Route::new("/home").named("Home"), &Route::new("/"));
        platform.set_history_position(2);
        host.fire(&Route::new("/about"), &Route::new("/home"));
        platform.set_history_position(3);
        host.fire(&Route::new("/list").named("List"), &Route::new("/about"));

        // The unnamed route was skipped, the others were resolved in order
        assert_eq!(manager.view_names(), vec!["Home", "List"]);

        app.dispose();
        assert!(matches!(
            use_page_stack_router::<FakePlatform>(&app),
            Err(CoreError::NotInstalled)
        ));
    }
}
