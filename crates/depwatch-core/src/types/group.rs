//! Deprecation groups and per-group tallies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reporting group of a captured deprecation. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    /// Raised while the reporting mask was non-zero.
    Unsilenced,
    /// Raised from a test flagged as legacy.
    Legacy,
    /// Raised from a resolved, non-legacy test method.
    Remaining,
    /// No test method could be resolved.
    Other,
}

impl Group {
    /// Summary order used by the per-group report.
    pub const REPORT_ORDER: [Group; 4] = [
        Group::Unsilenced,
        Group::Remaining,
        Group::Legacy,
        Group::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unsilenced => "unsilenced",
            Self::Legacy => "legacy",
            Self::Remaining => "remaining",
            Self::Other => "other",
        }
    }

    /// Capitalized label, e.g. "Unsilenced".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unsilenced => "Unsilenced",
            Self::Legacy => "Legacy",
            Self::Remaining => "Remaining",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occurrence counts per group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCounts {
    pub unsilenced: usize,
    pub legacy: usize,
    pub remaining: usize,
    pub other: usize,
}

impl GroupCounts {
    pub fn add(&mut self, group: Group) {
        *self.slot_mut(group) += 1;
    }

    pub fn get(&self, group: Group) -> usize {
        match group {
            Group::Unsilenced => self.unsilenced,
            Group::Legacy => self.legacy,
            Group::Remaining => self.remaining,
            Group::Other => self.other,
        }
    }

    pub fn total(&self) -> usize {
        self.unsilenced + self.legacy + self.remaining + self.other
    }

    /// Deprecations that count against a strict or threshold mode.
    /// Legacy tests are exempt.
    pub fn enforced(&self) -> usize {
        self.unsilenced + self.remaining + self.other
    }

    fn slot_mut(&mut self, group: Group) -> &mut usize {
        match group {
            Group::Unsilenced => &mut self.unsilenced,
            Group::Legacy => &mut self.legacy,
            Group::Remaining => &mut self.remaining,
            Group::Other => &mut self.other,
        }
    }
}
