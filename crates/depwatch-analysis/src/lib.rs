//! # depwatch-analysis
//!
//! Deprecation engine for test runs.
//! Contains the classifier, registry, notice dispatch, reporters,
//! and the listener that ties them to a test run's lifecycle.

pub mod classifier;
pub mod handler;
pub mod listener;
pub mod registry;
pub mod reporters;

pub use classifier::Classifier;
pub use handler::{DeprecationHandler, HandlerRegistration, NoticeDispatcher};
pub use listener::{DeprecationListener, RunSummary, TestListener};
pub use registry::{DeprecationRegistry, DeprecationSnapshot};
