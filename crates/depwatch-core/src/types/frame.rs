//! Stack frames and resolved call sites.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry of a captured call stack.
///
/// Stacks are stored most-recent-first: index 0 raised the notice, the last
/// element is the outermost frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Type or module path that owns the function, if any.
    pub class: Option<String>,
    pub function: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl Frame {
    /// A method frame, e.g. `Frame::method("app::InvoiceTest", "test_total")`.
    pub fn method(class: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            function: Some(function.into()),
            ..Self::default()
        }
    }

    /// A free-function frame with no owning class.
    pub fn function(function: impl Into<String>) -> Self {
        Self {
            function: Some(function.into()),
            ..Self::default()
        }
    }

    /// Split a symbol path like `app::billing::Invoice::total` into a method
    /// frame. A path with a single segment becomes a free-function frame.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.rsplit_once("::") {
            Some((class, function)) if !class.is_empty() && !function.is_empty() => {
                Self::method(class, function)
            }
            _ => Self::function(symbol),
        }
    }

    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.class, &self.function) {
            (Some(class), Some(function)) => write!(f, "{class}::{function}")?,
            (Some(class), None) => f.write_str(class)?,
            (None, Some(function)) => f.write_str(function)?,
            (None, None) => f.write_str("{main}")?,
        }
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, " ({file}:{line})"),
            (Some(file), None) => write!(f, " ({file})"),
            _ => Ok(()),
        }
    }
}

/// A call site resolved to a declaring class and method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    pub class: String,
    pub name: String,
    /// Declaring source file.
    pub file: Option<String>,
    /// First line of the declaration.
    pub line: Option<u32>,
}

impl MethodRef {
    pub fn new(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            file: None,
            line: None,
        }
    }

    pub fn declared_at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// `Class::method`.
    pub fn full_name(&self) -> String {
        format!("{}::{}", self.class, self.name)
    }

    /// Class path without its last segment. Empty for a top-level type.
    pub fn namespace(&self) -> &str {
        self.class.rsplit_once("::").map(|(ns, _)| ns).unwrap_or("")
    }

    /// Last segment of the class path.
    pub fn short_class(&self) -> &str {
        self.class
            .rsplit_once("::")
            .map(|(_, name)| name)
            .unwrap_or(&self.class)
    }

    /// Key used to deduplicate repeated invocations of one call site.
    pub fn call_site_key(&self) -> (&str, &str) {
        (&self.class, &self.name)
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.class, self.name)
    }
}
