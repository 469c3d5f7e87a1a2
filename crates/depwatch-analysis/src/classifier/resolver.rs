//! Call-site resolution — maps a stack frame to a declaring method.

use std::sync::Arc;

use depwatch_core::types::{Frame, MethodRef};
use rustc_hash::FxHashMap;

/// Maps a stack frame to the method that declares it.
/// Returning `None` is a normal outcome, not an error.
pub trait CallSiteResolver: Send + Sync {
    fn resolve(&self, frame: &Frame) -> Option<MethodRef>;
}

/// Test-group metadata supplied by the host test framework.
pub trait GroupMetadata: Send + Sync {
    fn groups(&self, class: &str, method: &str) -> Vec<String>;
}

impl<T: CallSiteResolver + ?Sized> CallSiteResolver for Arc<T> {
    fn resolve(&self, frame: &Frame) -> Option<MethodRef> {
        (**self).resolve(frame)
    }
}

impl<T: GroupMetadata + ?Sized> GroupMetadata for Arc<T> {
    fn groups(&self, class: &str, method: &str) -> Vec<String> {
        (**self).groups(class, method)
    }
}

/// Trusts the frame itself: class and function become the method, the
/// frame's location becomes the declaring location.
///
/// A frame only knows where the call happened, so `MethodRef::line` is the
/// line of the call inside the test body, not the line the method is
/// declared on. Use [`TestCatalog`] when reports need declaring lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameResolver;

impl CallSiteResolver for FrameResolver {
    fn resolve(&self, frame: &Frame) -> Option<MethodRef> {
        let class = frame.class.as_deref().filter(|c| !c.is_empty())?;
        let function = frame.function.as_deref().filter(|f| !f.is_empty())?;
        Some(MethodRef {
            class: class.to_string(),
            name: function.to_string(),
            file: frame.file.clone(),
            line: frame.line,
        })
    }
}

/// A declared test method as known to the host framework.
#[derive(Debug, Clone, Default)]
pub struct TestMethod {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub groups: Vec<String>,
}

/// Index of declared test methods, populated by the host framework.
/// Resolves only methods it knows and serves their group metadata.
#[derive(Debug, Default)]
pub struct TestCatalog {
    methods: FxHashMap<(String, String), TestMethod>,
}

impl TestCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a test method declaration.
    pub fn declare(&mut self, class: impl Into<String>, method: impl Into<String>, decl: TestMethod) {
        self.methods.insert((class.into(), method.into()), decl);
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    fn lookup(&self, class: &str, method: &str) -> Option<&TestMethod> {
        self.methods.get(&(class.to_string(), method.to_string()))
    }
}

impl CallSiteResolver for TestCatalog {
    fn resolve(&self, frame: &Frame) -> Option<MethodRef> {
        let class = frame.class.as_deref()?;
        let function = frame.function.as_deref()?;
        let decl = self.lookup(class, function)?;
        Some(MethodRef {
            class: class.to_string(),
            name: function.to_string(),
            file: decl.file.clone(),
            line: decl.line,
        })
    }
}

impl GroupMetadata for TestCatalog {
    fn groups(&self, class: &str, method: &str) -> Vec<String> {
        self.lookup(class, method)
            .map(|decl| decl.groups.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_resolver_requires_class_and_function() {
        let frame = Frame::method("app::FooTest", "test_a").at("tests/foo.rs", 8);
        let method = FrameResolver.resolve(&frame).unwrap();
        assert_eq!(method.full_name(), "app::FooTest::test_a");
        assert_eq!(method.file.as_deref(), Some("tests/foo.rs"));
        assert_eq!(method.line, Some(8));

        let later_call = Frame::method("app::FooTest", "test_a").at("tests/foo.rs", 12);
        assert_eq!(FrameResolver.resolve(&later_call).unwrap().line, Some(12), "call line, not declaration");

        assert!(FrameResolver.resolve(&Frame::function("main")).is_none());
        assert!(FrameResolver.resolve(&Frame::method("", "x")).is_none());
    }

    #[test]
    fn catalog_resolves_declared_methods_only() {
        let mut catalog = TestCatalog::new();
        catalog.declare(
            "app::FooTest",
            "test_a",
            TestMethod {
                file: Some("tests/foo.rs".to_string()),
                line: Some(3),
                groups: vec!["slow".to_string()],
            },
        );

        let method = catalog
            .resolve(&Frame::method("app::FooTest", "test_a").at("tests/foo.rs", 9))
            .unwrap();
        assert_eq!(method.line, Some(3), "declaring line wins over call line");
        assert!(catalog.resolve(&Frame::method("app::FooTest", "test_b")).is_none());

        assert_eq!(catalog.groups("app::FooTest", "test_a"), vec!["slow".to_string()]);
        assert!(catalog.groups("app::FooTest", "test_b").is_empty());
    }
}
