//! HandlerRegistration — installs the deprecation handler at most once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use super::deprecation_handler::DeprecationHandler;
use super::dispatcher::{HandlerId, NoticeDispatcher};
use crate::classifier::Classifier;

/// Registration guard, one per process (typically a `static`). The first
/// `register` installs a handler; later calls are no-ops returning `None`,
/// and every caller reaches the same handler through `handler()`.
#[derive(Debug, Default)]
pub struct HandlerRegistration {
    registered: AtomicBool,
    installed: OnceLock<(HandlerId, Arc<DeprecationHandler>)>,
}

impl HandlerRegistration {
    pub const fn new() -> Self {
        Self {
            registered: AtomicBool::new(false),
            installed: OnceLock::new(),
        }
    }

    /// Install a deprecation handler on `dispatcher`, chaining to whatever
    /// handler was active. Returns `None` if this guard already registered one.
    pub fn register(
        &self,
        dispatcher: &NoticeDispatcher,
        classifier: Classifier,
    ) -> Option<Arc<DeprecationHandler>> {
        if self.registered.swap(true, Ordering::AcqRel) {
            tracing::warn!("deprecation handler already registered; skipping");
            return None;
        }

        let handler = Arc::new(DeprecationHandler::new(
            classifier,
            dispatcher.active_handler(),
        ));
        let id = dispatcher.install(handler.clone());
        let _ = self.installed.set((id, Arc::clone(&handler)));
        Some(handler)
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::Acquire)
    }

    /// The shared handler, once registered.
    pub fn handler(&self) -> Option<Arc<DeprecationHandler>> {
        self.installed.get().map(|(_, handler)| Arc::clone(handler))
    }

    pub fn handler_id(&self) -> Option<HandlerId> {
        self.installed.get().map(|(id, _)| *id)
    }

    /// Whether the registered handler is on `dispatcher`'s stack at all.
    pub fn is_installed_on(&self, dispatcher: &NoticeDispatcher) -> bool {
        self.handler_id().is_some_and(|id| dispatcher.is_installed(id))
    }

    /// Whether the registered handler is still the dispatcher's active one.
    pub fn is_still_active(&self, dispatcher: &NoticeDispatcher) -> bool {
        match self.handler_id() {
            Some(id) => dispatcher.active_id() == Some(id),
            None => false,
        }
    }
}
