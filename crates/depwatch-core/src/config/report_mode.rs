//! Report mode: how many deprecations a run tolerates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DepwatchError;
use crate::types::GroupCounts;

/// Tolerance policy for non-legacy deprecations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportMode {
    /// Report only; never exceeded.
    #[default]
    Weak,
    /// Any unsilenced, remaining, or other deprecation exceeds.
    Strict,
    /// Exceeded when more than `n` enforced deprecations were collected.
    Threshold(usize),
}

impl ReportMode {
    /// Whether the collected counts exceed this mode's tolerance.
    pub fn is_exceeded(&self, counts: &GroupCounts) -> bool {
        match self {
            Self::Weak => false,
            Self::Strict => counts.enforced() > 0,
            Self::Threshold(max) => counts.enforced() > *max,
        }
    }
}

impl FromStr for ReportMode {
    type Err = DepwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weak" => Ok(Self::Weak),
            "strict" => Ok(Self::Strict),
            other => other
                .parse::<usize>()
                .map(Self::Threshold)
                .map_err(|_| DepwatchError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weak => f.write_str("weak"),
            Self::Strict => f.write_str("strict"),
            Self::Threshold(n) => write!(f, "{n}"),
        }
    }
}
