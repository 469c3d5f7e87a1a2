//! Per-group breakdown: counts per group, per message, and per call site.
//!
//! ```text
//!
//! Remaining deprecation notices (3)
//!
//! Foo is deprecated: 3x
//!     2x in FooTest::test_a from app
//!     1x in FooTest::test_b from app
//! ```

use std::path::PathBuf;

use depwatch_core::types::Group;
use depwatch_core::DepwatchResult;

use super::buckets::{bucket_by_message, CallSite, UNKNOWN_CALL_SITE};
use super::Reporter;
use crate::registry::DeprecationSnapshot;

#[derive(Debug, Clone, Default)]
pub struct GroupSummaryReporter {
    show_traces: bool,
    strip_prefix: Option<PathBuf>,
}

impl GroupSummaryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the representative stack trace under each call site.
    pub fn with_traces(mut self, show: bool) -> Self {
        self.show_traces = show;
        self
    }

    /// Paths under this prefix are printed relative to it in traces.
    pub fn with_strip_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.strip_prefix = Some(prefix.into());
        self
    }

    fn render(&self, snapshot: &DeprecationSnapshot) -> String {
        let counts = snapshot.group_counts();
        let mut out = String::new();

        for group in Group::REPORT_ORDER {
            let total = counts.get(group);
            if total == 0 {
                continue;
            }
            out.push_str(&format!("\n{} deprecation notices ({})\n", group.label(), total));

            let in_group = snapshot.iter().filter(|d| d.group() == group);
            for bucket in bucket_by_message(in_group) {
                out.push_str(&format!(
                    "\n{}: {}x\n",
                    bucket.message.trim_end_matches('.'),
                    bucket.count
                ));

                let mut sites = bucket.call_sites;
                sites.sort_by(|a, b| b.count.cmp(&a.count));
                for site in &sites {
                    out.push_str(&format!("    {}x in {}\n", site.count, site_label(site)));
                    if self.show_traces {
                        let trace = site
                            .representative
                            .render_trace(self.strip_prefix.as_deref());
                        for line in trace.lines() {
                            out.push_str(&format!("        {line}\n"));
                        }
                    }
                }
            }
        }

        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// `Type::method from namespace`, or `Type::method` for top-level types.
fn site_label(site: &CallSite<'_>) -> String {
    match site.method() {
        Some(method) if !method.namespace().is_empty() => format!(
            "{}::{} from {}",
            method.short_class(),
            method.name,
            method.namespace()
        ),
        Some(method) => method.full_name(),
        None => UNKNOWN_CALL_SITE.to_string(),
    }
}

impl Reporter for GroupSummaryReporter {
    fn name(&self) -> &'static str {
        "groups"
    }

    fn generate(&self, snapshot: &DeprecationSnapshot) -> DepwatchResult<String> {
        Ok(self.render(snapshot))
    }
}
