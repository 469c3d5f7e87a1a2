//! NoticeDispatcher — a stack of notice handlers, top one active.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use depwatch_core::types::{Frame, Notice};

/// Outcome of offering a notice to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The handler consumed the notice.
    Handled,
    /// The handler passed; default processing should continue.
    Declined,
}

/// Receives notices raised while it is the active handler.
pub trait NoticeHandler: Send + Sync {
    fn handle(&self, notice: &Notice, trace: &[Frame]) -> Disposition;
}

/// Identifies one installation on a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Installed = (HandlerId, Arc<dyn NoticeHandler>);

/// Process-scoped handler stack. `install` pushes, `restore` pops, and only
/// the top handler sees dispatched notices.
#[derive(Default)]
pub struct NoticeDispatcher {
    handlers: Mutex<Vec<Installed>>,
    next_id: AtomicU64,
}

impl NoticeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `handler` the active handler.
    pub fn install(&self, handler: Arc<dyn NoticeHandler>) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, handler));
        id
    }

    /// Remove the active handler, reactivating the one below it.
    pub fn restore(&self) -> Option<HandlerId> {
        self.lock().pop().map(|(id, _)| id)
    }

    pub fn active_id(&self) -> Option<HandlerId> {
        self.lock().last().map(|(id, _)| *id)
    }

    pub fn active_handler(&self) -> Option<Arc<dyn NoticeHandler>> {
        self.lock().last().map(|(_, handler)| Arc::clone(handler))
    }

    /// Whether `id` is anywhere on the stack, active or not.
    pub fn is_installed(&self, id: HandlerId) -> bool {
        self.lock().iter().any(|(installed, _)| *installed == id)
    }

    pub fn depth(&self) -> usize {
        self.lock().len()
    }

    /// Offer a notice to the active handler. `Declined` when none is installed.
    pub fn dispatch(&self, notice: &Notice, trace: &[Frame]) -> Disposition {
        // Released before the call so handlers may install or dispatch.
        let Some(handler) = self.active_handler() else {
            return Disposition::Declined;
        };
        handler.handle(notice, trace)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Installed>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for NoticeDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoticeDispatcher")
            .field("depth", &self.depth())
            .field("active", &self.active_id())
            .finish()
    }
}
