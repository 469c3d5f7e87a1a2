//! The captured deprecation record.

use std::path::Path;

use serde::Serialize;

use super::frame::{Frame, MethodRef};
use super::group::Group;

/// One captured deprecation occurrence. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deprecation {
    group: Group,
    message: String,
    method: Option<MethodRef>,
    trace: Vec<Frame>,
}

impl Deprecation {
    pub fn new(
        group: Group,
        message: impl Into<String>,
        trace: Vec<Frame>,
        method: Option<MethodRef>,
    ) -> Self {
        Self {
            group,
            message: message.into(),
            method,
            trace,
        }
    }

    pub fn group(&self) -> Group {
        self.group
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Test method the deprecation was traced back to, if any.
    pub fn method(&self) -> Option<&MethodRef> {
        self.method.as_ref()
    }

    pub fn trace(&self) -> &[Frame] {
        &self.trace
    }

    /// `Class::method` of the resolved call site.
    pub fn method_full_name(&self) -> Option<String> {
        self.method.as_ref().map(MethodRef::full_name)
    }

    /// Human-readable diagnostic: heading, message, and the captured stack.
    /// File paths under `strip_prefix` are shown relative to it.
    pub fn render_trace(&self, strip_prefix: Option<&Path>) -> String {
        let origin = self
            .method_full_name()
            .unwrap_or_else(|| "(unknown)".to_string());

        let mut out = format!(
            "{} deprecation triggered by {}:\n{}\nStack trace:\n",
            self.group.label(),
            origin,
            self.message
        );

        for (i, frame) in self.trace.iter().enumerate() {
            let mut frame = frame.clone();
            if let (Some(prefix), Some(file)) = (strip_prefix, frame.file.as_deref()) {
                if let Ok(relative) = Path::new(file).strip_prefix(prefix) {
                    frame.file = Some(relative.display().to_string());
                }
            }
            out.push_str(&format!("#{i} {frame}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Deprecation {
        Deprecation::new(
            Group::Remaining,
            "Foo is deprecated",
            vec![
                Frame::method("lib::Foo", "old").at("/work/src/foo.rs", 10),
                Frame::method("app::FooTest", "test_old").at("/work/tests/foo.rs", 4),
            ],
            Some(MethodRef::new("app::FooTest", "test_old").declared_at("/work/tests/foo.rs", 3)),
        )
    }

    #[test]
    fn render_trace_strips_prefix() {
        let rendered = sample().render_trace(Some(Path::new("/work")));
        assert!(rendered.starts_with("Remaining deprecation triggered by app::FooTest::test_old:\n"));
        assert!(rendered.contains("Foo is deprecated\nStack trace:\n"));
        assert!(rendered.contains("#0 lib::Foo::old (src/foo.rs:10)"));
        assert!(rendered.contains("#1 app::FooTest::test_old (tests/foo.rs:4)"));
    }

    #[test]
    fn render_trace_without_method() {
        let dep = Deprecation::new(Group::Other, "Bar", Vec::new(), None);
        let rendered = dep.render_trace(None);
        assert!(rendered.starts_with("Other deprecation triggered by (unknown):"));
        assert!(rendered.ends_with("Stack trace:\n"));
    }
}
