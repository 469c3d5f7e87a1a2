//! Text summary — one numbered entry per distinct message.
//!
//! ```text
//!
//! 1) 2x Foo is deprecated:
//! 	app::FooTest::test_a
//! 	app::FooTest::test_b
//! ```

use std::io::Write;

use depwatch_core::DepwatchResult;

use super::buckets::bucket_by_message;
use super::Reporter;
use crate::registry::DeprecationSnapshot;

/// Numbered per-message summary, most frequent message first.
#[derive(Debug, Clone)]
pub struct TextReporter {
    max_call_sites: usize,
}

impl TextReporter {
    pub fn new() -> Self {
        Self { max_call_sites: 3 }
    }

    /// Call sites listed before the ".. and N more" line.
    pub fn with_max_call_sites(mut self, max: usize) -> Self {
        self.max_call_sites = max;
        self
    }

    /// Write the summary to `out`. Empty snapshots write nothing.
    pub fn report<W: Write>(&self, snapshot: &DeprecationSnapshot, out: &mut W) -> DepwatchResult<()> {
        let text = self.generate(snapshot)?;
        out.write_all(text.as_bytes())?;
        Ok(())
    }

    fn render(&self, snapshot: &DeprecationSnapshot) -> String {
        let mut out = String::new();

        for (i, bucket) in bucket_by_message(snapshot).iter().enumerate() {
            out.push('\n');
            out.push_str(&format!("{}) {}x {}:\n", i + 1, bucket.count, bucket.message));

            for site in bucket.call_sites.iter().take(self.max_call_sites) {
                out.push_str(&format!("\t{}\n", site.label()));
            }
            let hidden = bucket.call_sites.len().saturating_sub(self.max_call_sites);
            if hidden > 0 {
                out.push_str(&format!("\t.. and {hidden} more\n"));
            }
        }
        out
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for TextReporter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn generate(&self, snapshot: &DeprecationSnapshot) -> DepwatchResult<String> {
        Ok(self.render(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depwatch_core::types::{Deprecation, Group, MethodRef};

    fn at(message: &str, class: &str, method: &str) -> Deprecation {
        Deprecation::new(
            Group::Unsilenced,
            message,
            Vec::new(),
            Some(MethodRef::new(class, method)),
        )
    }

    #[test]
    fn empty_snapshot_prints_nothing() {
        let mut out = Vec::new();
        TextReporter::new()
            .report(&DeprecationSnapshot::default(), &mut out)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn exact_layout() {
        let snapshot = DeprecationSnapshot::from(vec![
            at("Foo is deprecated", "A", "x"),
            at("Foo is deprecated", "A", "y"),
            at("Bar is deprecated", "B", "z"),
        ]);
        let text = TextReporter::new().generate(&snapshot).unwrap();
        assert_eq!(
            text,
            "\n1) 2x Foo is deprecated:\n\tA::x\n\tA::y\n\n2) 1x Bar is deprecated:\n\tB::z\n"
        );
    }

    #[test]
    fn truncates_after_limit() {
        let snapshot = DeprecationSnapshot::from(
            ["a", "b", "c", "d", "e"]
                .iter()
                .map(|m| at("Foo", "A", m))
                .collect::<Vec<_>>(),
        );
        let text = TextReporter::new().generate(&snapshot).unwrap();
        assert!(text.contains("\tA::c\n\t.. and 2 more\n"));
        assert!(!text.contains("A::d"));

        let wide = TextReporter::new().with_max_call_sites(10).generate(&snapshot).unwrap();
        assert!(wide.contains("A::e"));
        assert!(!wide.contains(".. and"));
    }

    #[test]
    fn name() {
        assert_eq!(TextReporter::new().name(), "text");
    }
}
