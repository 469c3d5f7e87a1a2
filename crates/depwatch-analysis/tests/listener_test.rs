//! Listener lifecycle: registration sharing, flush order, and failure policy.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use depwatch_analysis::handler::{Disposition, NoticeHandler};
use depwatch_analysis::{DeprecationListener, HandlerRegistration, NoticeDispatcher, TestListener};
use depwatch_core::config::depwatch_config::CHECKSTYLE_ENV;
use depwatch_core::types::{Frame, Notice};
use depwatch_core::{DepwatchConfig, DepwatchError, ReportMode};

// ─── Helpers ───────────────────────────────────────────────────────────────

/// Each test gets its own process-lifetime guard.
fn fresh_guard() -> &'static HandlerRegistration {
    Box::leak(Box::new(HandlerRegistration::new()))
}

fn trace(class: &str, method: &str) -> Vec<Frame> {
    vec![
        Frame::method("vendor::Lib", "old").at("src/lib.rs", 5),
        Frame::method(class, method).at("tests/lib_test.rs", 12),
        Frame::method("test::runner", "run_test"),
    ]
}

fn raise(dispatcher: &NoticeDispatcher, message: &str, class: &str, method: &str) {
    let disposition = dispatcher.dispatch(&Notice::deprecated(message), &trace(class, method));
    assert_eq!(disposition, Disposition::Handled);
}

fn output_of<W: AsRef<[u8]> + std::io::Write>(listener: &DeprecationListener<W>) -> String {
    String::from_utf8(listener.output().as_ref().to_vec()).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// REGISTRATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn two_listeners_share_one_registry() {
    let guard = fresh_guard();
    let dispatcher = Arc::new(NoticeDispatcher::new());

    let first = DeprecationListener::attach(guard, dispatcher.clone(), DepwatchConfig::default()).unwrap();
    raise(&dispatcher, "Foo is deprecated", "A", "x");

    let second = DeprecationListener::attach(guard, dispatcher.clone(), DepwatchConfig::default()).unwrap();
    raise(&dispatcher, "Foo is deprecated", "A", "y");

    assert_eq!(dispatcher.depth(), 1, "handler installed once");
    assert!(Arc::ptr_eq(first.handler(), second.handler()));
    assert_eq!(first.snapshot().len(), 2);
    assert_eq!(second.snapshot().len(), 2);
}

#[test]
fn attach_to_other_dispatcher_is_rejected() {
    let guard = fresh_guard();
    let a = Arc::new(NoticeDispatcher::new());
    let b = Arc::new(NoticeDispatcher::new());

    let _first = DeprecationListener::attach(guard, a.clone(), DepwatchConfig::default()).unwrap();
    let err = DeprecationListener::attach(guard, b.clone(), DepwatchConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, DepwatchError::ConfigError(_)));

    assert_eq!(b.dispatch(&Notice::deprecated("Foo"), &trace("A", "x")), Disposition::Declined);
    raise(&a, "Foo is deprecated", "A", "x");
    assert_eq!(guard.handler().unwrap().registry().len(), 1);
}

#[test]
fn invalid_mode_is_rejected_at_attach() {
    let config = DepwatchConfig {
        mode: Some("sometimes".to_string()),
        ..Default::default()
    };
    let err = DeprecationListener::attach(fresh_guard(), Arc::new(NoticeDispatcher::new()), config)
        .err()
        .unwrap();
    assert!(matches!(err, DepwatchError::InvalidMode(_)));
}

// ═══════════════════════════════════════════════════════════════════════════
// FLUSH
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn lifecycle_hooks_are_no_ops() {
    let dispatcher = Arc::new(NoticeDispatcher::new());
    let mut listener = DeprecationListener::attach(fresh_guard(), dispatcher.clone(), DepwatchConfig::default())
        .unwrap()
        .with_output(Vec::new());

    listener.start_test_suite("suite");
    listener.start_test("A::x");
    raise(&dispatcher, "Foo is deprecated", "A", "x");
    listener.add_failure("A::x", "assertion failed", Duration::from_millis(3));
    listener.add_skipped_test("A::y", "skipped", Duration::ZERO);
    listener.end_test("A::x", Duration::from_millis(5));
    listener.end_test_suite("suite");

    assert_eq!(listener.snapshot().len(), 1);
    assert!(output_of(&listener).is_empty(), "nothing printed before flush");

    listener.flush().unwrap();
    assert_eq!(output_of(&listener), "\n1) 1x Foo is deprecated:\n\tA::x\n");
}

#[test]
fn empty_run_prints_nothing_and_writes_no_file() {
    let mut listener = DeprecationListener::attach(
        fresh_guard(),
        Arc::new(NoticeDispatcher::new()),
        DepwatchConfig::default(),
    )
    .unwrap()
    .with_output(Vec::new());

    let summary = listener.finish().unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.checkstyle_issues, None);
    assert!(!summary.threshold_exceeded);
    assert!(output_of(&listener).is_empty());
}

#[test]
fn checkstyle_destination_from_environment_lookup() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("deprecations.xml");
    let path_str = path.display().to_string();
    let config = DepwatchConfig::default().with_overrides_from(|key| {
        (key == CHECKSTYLE_ENV).then(|| path_str.clone())
    });

    let dispatcher = Arc::new(NoticeDispatcher::new());
    let mut listener = DeprecationListener::attach(fresh_guard(), dispatcher.clone(), config)
        .unwrap()
        .with_output(Vec::new());
    raise(&dispatcher, "Foo is deprecated", "A", "x");
    raise(&dispatcher, "Bar is deprecated", "B", "z");

    let summary = listener.finish().unwrap();
    assert_eq!(summary.checkstyle_issues, Some(2));

    let xml = std::fs::read_to_string(&path).unwrap();
    assert!(xml.contains("<file name=\"tests/lib_test.rs\">"));
    assert_eq!(xml.matches("<error").count(), 2);
    assert!(output_of(&listener).contains("1) 1x Foo is deprecated:"));
}

#[test]
fn unwritable_checkstyle_still_prints_summary() {
    let tmp = tempfile::tempdir().unwrap();
    let config = DepwatchConfig {
        checkstyle_path: Some(tmp.path().join("no-such-dir").join("out.xml")),
        ..Default::default()
    };

    let dispatcher = Arc::new(NoticeDispatcher::new());
    let mut listener = DeprecationListener::attach(fresh_guard(), dispatcher.clone(), config)
        .unwrap()
        .with_output(Vec::new());
    raise(&dispatcher, "Foo is deprecated", "A", "x");

    let err = listener.finish().unwrap_err();
    assert!(matches!(err, DepwatchError::ReportWrite { ref path, .. } if path.ends_with("out.xml")));
    assert_eq!(output_of(&listener), "\n1) 1x Foo is deprecated:\n\tA::x\n");
}

#[test]
fn verbose_appends_group_summary() {
    let config = DepwatchConfig {
        verbose: Some(true),
        ..Default::default()
    };
    let dispatcher = Arc::new(NoticeDispatcher::new());
    let mut listener = DeprecationListener::attach(fresh_guard(), dispatcher.clone(), config)
        .unwrap()
        .with_output(Vec::new());
    raise(&dispatcher, "Foo is deprecated.", "app::ATest", "test_x");

    listener.finish().unwrap();
    let out = output_of(&listener);
    let text_at = out.find("1) 1x Foo is deprecated.:").unwrap();
    let groups_at = out.find("Unsilenced deprecation notices (1)").unwrap();
    assert!(text_at < groups_at);
    assert!(out.contains("    1x in ATest::test_x from app\n"));
}

#[test]
fn strict_mode_verdict_and_replaced_handler() {
    let config = DepwatchConfig {
        mode: Some("strict".to_string()),
        ..Default::default()
    };
    let dispatcher = Arc::new(NoticeDispatcher::new());
    let mut listener = DeprecationListener::attach(fresh_guard(), dispatcher.clone(), config)
        .unwrap()
        .with_output(Vec::new());
    raise(&dispatcher, "Foo is deprecated", "A", "x");

    struct Replacement;
    impl NoticeHandler for Replacement {
        fn handle(&self, _notice: &Notice, _trace: &[Frame]) -> Disposition {
            Disposition::Declined
        }
    }
    dispatcher.install(Arc::new(Replacement));

    let summary = listener.finish().unwrap();
    assert_eq!(summary.mode, ReportMode::Strict);
    assert!(summary.threshold_exceeded);
    assert!(summary.handler_replaced);
    assert_eq!(summary.counts.unsilenced, 1);
}

#[test]
fn checkstyle_path_is_optional() {
    let config = DepwatchConfig::default().with_overrides_from(|_| None);
    assert_eq!(config.checkstyle_path, None::<PathBuf>);
}
