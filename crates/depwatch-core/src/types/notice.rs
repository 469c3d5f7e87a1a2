//! Raw notices as raised by instrumented code.

use serde::{Deserialize, Serialize};

/// Severity class of a raised notice. Only `Deprecated` is consumed by the
/// deprecation handler; everything else is passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Deprecated,
    Notice,
    Warning,
    Error,
}

/// A notice as it reaches the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    /// Diagnostic-reporting mask active when the notice fired. Zero means the
    /// caller silenced it.
    pub reporting_mask: u32,
}

impl Notice {
    /// Mask value used when nothing is silenced.
    pub const REPORT_ALL: u32 = u32::MAX;

    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file: None,
            line: None,
            reporting_mask: Self::REPORT_ALL,
        }
    }

    /// A deprecation raised with reporting enabled.
    pub fn deprecated(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Deprecated, message)
    }

    /// A deprecation raised under a zero reporting mask.
    pub fn silenced_deprecation(message: impl Into<String>) -> Self {
        Self::deprecated(message).with_mask(0)
    }

    pub fn with_mask(mut self, mask: u32) -> Self {
        self.reporting_mask = mask;
        self
    }

    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    pub fn is_deprecation(&self) -> bool {
        self.kind == NoticeKind::Deprecated
    }

    pub fn is_silenced(&self) -> bool {
        self.reporting_mask == 0
    }
}
