//! Notice handling: the process-scoped dispatcher, the deprecation handler,
//! and the guard that installs it at most once.

pub mod deprecation_handler;
pub mod dispatcher;
pub mod registration;

pub use deprecation_handler::DeprecationHandler;
pub use dispatcher::{Disposition, HandlerId, NoticeDispatcher, NoticeHandler};
pub use registration::HandlerRegistration;
