//! Checkstyle XML report — one `<file>` per declaring source file.
//!
//! Records without a resolved method, or whose method has no declaring file,
//! have nowhere to attach and are skipped. Columns are not tracked.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use depwatch_core::types::Deprecation;
use depwatch_core::{DepwatchError, DepwatchResult};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use rustc_hash::FxHashMap;

use super::Reporter;
use crate::registry::DeprecationSnapshot;

const CHECKSTYLE_VERSION: &str = "2.5.0";

/// One `<error>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckstyleIssue<'a> {
    pub line: u32,
    pub column: u32,
    pub severity: &'static str,
    pub source: &'a str,
    pub message: &'a str,
}

/// One `<file>` entry with its issues in record order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckstyleFile<'a> {
    pub name: &'a str,
    pub issues: Vec<CheckstyleIssue<'a>>,
}

/// Group placeable records by declaring file, in first-appearance order.
pub fn collect_files(snapshot: &DeprecationSnapshot) -> Vec<CheckstyleFile<'_>> {
    let mut files: Vec<CheckstyleFile<'_>> = Vec::new();
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();

    for record in snapshot {
        let Some((file, issue)) = issue_for(record) else {
            continue;
        };
        let idx = *index.entry(file).or_insert_with(|| {
            files.push(CheckstyleFile {
                name: file,
                issues: Vec::new(),
            });
            files.len() - 1
        });
        files[idx].issues.push(issue);
    }
    files
}

fn issue_for(record: &Deprecation) -> Option<(&str, CheckstyleIssue<'_>)> {
    let method = record.method()?;
    let file = method.file.as_deref()?;
    Some((
        file,
        CheckstyleIssue {
            line: method.line.unwrap_or(1),
            column: 1,
            severity: record.group().as_str(),
            source: record.message(),
            message: record.message(),
        },
    ))
}

/// Checkstyle-format XML for CI tooling.
#[derive(Debug, Clone, Default)]
pub struct CheckstyleReporter;

impl CheckstyleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Write the document to `path`, replacing any existing file.
    /// Returns the number of `<error>` entries written.
    pub fn write_to_path(&self, snapshot: &DeprecationSnapshot, path: &Path) -> DepwatchResult<usize> {
        let report_error = |source: io::Error| DepwatchError::ReportWrite {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(report_error)?;
        let mut out = BufWriter::new(file);
        let issues = self.write(snapshot, &mut out).map_err(report_error)?;
        out.flush().map_err(report_error)?;

        tracing::info!(path = %path.display(), issues, "checkstyle report written");
        Ok(issues)
    }

    /// Write the document to any sink. Returns the number of issues.
    pub fn write<W: Write>(&self, snapshot: &DeprecationSnapshot, out: W) -> io::Result<usize> {
        let mut writer = Writer::new_with_indent(out, b' ', 4);
        let mut issues = 0;

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let mut root = BytesStart::new("checkstyle");
        root.push_attribute(("version", CHECKSTYLE_VERSION));
        writer.write_event(Event::Start(root))?;

        for file in collect_files(snapshot) {
            let mut element = BytesStart::new("file");
            element.push_attribute(("name", file.name));
            writer.write_event(Event::Start(element))?;

            for issue in &file.issues {
                let line = issue.line.to_string();
                let column = issue.column.to_string();
                let mut error = BytesStart::new("error");
                error.push_attribute(("line", line.as_str()));
                error.push_attribute(("column", column.as_str()));
                error.push_attribute(("severity", issue.severity));
                error.push_attribute(("source", issue.source));
                error.push_attribute(("message", issue.message));
                writer.write_event(Event::Empty(error))?;
                issues += 1;
            }

            writer.write_event(Event::End(BytesEnd::new("file")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("checkstyle")))?;
        writer.get_mut().write_all(b"\n")?;
        Ok(issues)
    }
}

impl Reporter for CheckstyleReporter {
    fn name(&self) -> &'static str {
        "checkstyle"
    }

    fn generate(&self, snapshot: &DeprecationSnapshot) -> DepwatchResult<String> {
        let mut buf = Vec::new();
        self.write(snapshot, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
