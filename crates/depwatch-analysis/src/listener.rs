//! Test-run listener — attaches the deprecation handler for a run and
//! renders the reports when the run is flushed.

use std::io::{self, Stdout, Write};
use std::sync::Arc;
use std::time::Duration;

use depwatch_core::types::GroupCounts;
use depwatch_core::{DepwatchConfig, DepwatchError, DepwatchResult, ReportMode};

use crate::classifier::Classifier;
use crate::handler::{DeprecationHandler, HandlerRegistration, NoticeDispatcher};
use crate::registry::DeprecationSnapshot;
use crate::reporters::{CheckstyleReporter, GroupSummaryReporter, Reporter, TextReporter};

/// Lifecycle hooks of a host test runner. Every hook defaults to a no-op.
pub trait TestListener {
    fn start_test_suite(&mut self, _suite: &str) {}
    fn end_test_suite(&mut self, _suite: &str) {}
    fn start_test(&mut self, _test: &str) {}
    fn end_test(&mut self, _test: &str, _elapsed: Duration) {}
    fn add_error(&mut self, _test: &str, _message: &str, _elapsed: Duration) {}
    fn add_failure(&mut self, _test: &str, _message: &str, _elapsed: Duration) {}
    fn add_incomplete_test(&mut self, _test: &str, _message: &str, _elapsed: Duration) {}
    fn add_risky_test(&mut self, _test: &str, _message: &str, _elapsed: Duration) {}
    fn add_skipped_test(&mut self, _test: &str, _message: &str, _elapsed: Duration) {}

    /// End of run.
    fn flush(&mut self) -> DepwatchResult<()> {
        Ok(())
    }
}

/// Outcome of a flushed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub counts: GroupCounts,
    pub mode: ReportMode,
    /// Whether the counts exceed `mode`. Acting on it is up to the caller.
    pub threshold_exceeded: bool,
    /// Issues written to the checkstyle report, if one was configured.
    pub checkstyle_issues: Option<usize>,
    /// The deprecation handler was no longer the active handler at flush.
    pub handler_replaced: bool,
}

/// Collects deprecations for a run and reports them on flush.
pub struct DeprecationListener<W: Write = Stdout> {
    handler: Arc<DeprecationHandler>,
    guard: &'static HandlerRegistration,
    dispatcher: Arc<NoticeDispatcher>,
    config: DepwatchConfig,
    mode: ReportMode,
    out: W,
}

impl DeprecationListener<Stdout> {
    /// Attach with a frame-trusting classifier built from `config`.
    pub fn attach(
        guard: &'static HandlerRegistration,
        dispatcher: Arc<NoticeDispatcher>,
        config: DepwatchConfig,
    ) -> DepwatchResult<Self> {
        let classifier = Classifier::from_config(&config);
        Self::attach_with(guard, dispatcher, config, classifier)
    }

    /// Attach with configuration taken from the process environment.
    pub fn from_env(
        guard: &'static HandlerRegistration,
        dispatcher: Arc<NoticeDispatcher>,
    ) -> DepwatchResult<Self> {
        Self::attach(guard, dispatcher, DepwatchConfig::from_env())
    }

    /// Register through `guard`, or share the handler it already holds.
    /// `classifier` is only used when this call performs the registration.
    /// Sharing requires the same dispatcher the handler was installed on.
    pub fn attach_with(
        guard: &'static HandlerRegistration,
        dispatcher: Arc<NoticeDispatcher>,
        config: DepwatchConfig,
        classifier: Classifier,
    ) -> DepwatchResult<Self> {
        let mode = config.effective_mode()?;
        let handler = match guard.register(&dispatcher, classifier) {
            Some(handler) => handler,
            None => {
                let handler = guard.handler().ok_or_else(|| {
                    DepwatchError::ConfigError("deprecation handler registration in progress".to_string())
                })?;
                if !guard.is_installed_on(&dispatcher) {
                    return Err(DepwatchError::ConfigError(
                        "deprecation handler is registered on a different dispatcher".to_string(),
                    ));
                }
                handler
            }
        };

        Ok(Self {
            handler,
            guard,
            dispatcher,
            config,
            mode,
            out: io::stdout(),
        })
    }
}

impl<W: Write> DeprecationListener<W> {
    /// Send the printed summaries to `out` instead.
    pub fn with_output<O: Write>(self, out: O) -> DeprecationListener<O> {
        DeprecationListener {
            handler: self.handler,
            guard: self.guard,
            dispatcher: self.dispatcher,
            config: self.config,
            mode: self.mode,
            out,
        }
    }

    pub fn handler(&self) -> &Arc<DeprecationHandler> {
        &self.handler
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn snapshot(&self) -> DeprecationSnapshot {
        self.handler.registry().snapshot()
    }

    /// Write the checkstyle report (if configured), then print the summaries.
    /// The summaries are printed even when the checkstyle report fails; that
    /// failure is returned afterwards.
    pub fn finish(&mut self) -> DepwatchResult<RunSummary> {
        let snapshot = self.snapshot();

        let checkstyle = match self.config.checkstyle_path.as_deref() {
            Some(path) => CheckstyleReporter::new()
                .write_to_path(&snapshot, path)
                .map(Some),
            None => Ok(None),
        };
        if let Err(e) = &checkstyle {
            tracing::error!(error = %e, "checkstyle report failed");
        }

        let printed = self.print_summaries(&snapshot);

        let handler_replaced = !self.guard.is_still_active(&self.dispatcher);
        if handler_replaced {
            tracing::warn!("the deprecation handler was replaced during the run");
        }

        let checkstyle_issues = checkstyle?;
        printed?;

        let counts = snapshot.group_counts();
        Ok(RunSummary {
            total: snapshot.len(),
            counts,
            mode: self.mode,
            threshold_exceeded: self.mode.is_exceeded(&counts),
            checkstyle_issues,
            handler_replaced,
        })
    }

    fn print_summaries(&mut self, snapshot: &DeprecationSnapshot) -> DepwatchResult<()> {
        TextReporter::new()
            .with_max_call_sites(self.config.effective_max_call_sites())
            .report(snapshot, &mut self.out)?;

        if self.config.effective_verbose() {
            let mut groups = GroupSummaryReporter::new().with_traces(self.config.effective_show_traces());
            if let Ok(cwd) = std::env::current_dir() {
                groups = groups.with_strip_prefix(cwd);
            }
            let text = groups.generate(snapshot)?;
            self.out.write_all(text.as_bytes())?;
        }

        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> TestListener for DeprecationListener<W> {
    fn flush(&mut self) -> DepwatchResult<()> {
        self.finish().map(|_| ())
    }
}
