use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Diagnostic, DiagnosticKind, LoadError, LoadResult};
use crate::record::{parse_record, CourseRecord};
use crate::{Course, CourseTable};

/// Result of one load attempt: the validated table plus every per-line
/// diagnostic produced along the way, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub table: CourseTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// Load and validate a course catalog file.
///
/// Failure to read the file is the only fatal outcome; malformed lines and
/// invalid records are reported through [`LoadOutcome::diagnostics`] while
/// the scan continues.
pub fn load_from_path(path: &Path) -> LoadResult<LoadOutcome> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(load_from_str(&contents))
}

/// Load a catalog from an in-memory buffer (tests, stdin).
///
/// The source is scanned twice. Pass 1 collects the universe of accepted
/// course numbers so that prerequisites may reference courses defined later
/// in the file; pass 2 validates each record's prerequisites against that
/// universe and builds the table. Parse failures are diagnosed in both
/// passes, so those messages appear twice per offending line.
pub fn load_from_str(contents: &str) -> LoadOutcome {
    let lines: Vec<&str> = contents.lines().collect();
    let mut diagnostics = Vec::new();

    let universe = collect_universe(&lines, &mut diagnostics);
    let table = build_table(&lines, &universe, &mut diagnostics);

    LoadOutcome { table, diagnostics }
}

/// Pass 1: every course number that parses cleanly and is not a duplicate.
fn collect_universe(lines: &[&str], diagnostics: &mut Vec<Diagnostic>) -> HashSet<String> {
    let mut universe = HashSet::new();

    for (line, raw) in numbered(lines) {
        let Some(record) = parse_line(line, raw, diagnostics) else {
            continue;
        };

        if !universe.insert(record.number.clone()) {
            diagnostics.push(Diagnostic {
                line,
                kind: DiagnosticKind::DuplicateCourseNumber(record.number),
            });
        }
    }

    universe
}

/// Pass 2: validate prerequisites against the universe and build the table.
fn build_table(
    lines: &[&str],
    universe: &HashSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> CourseTable {
    let mut table = CourseTable::default();
    let mut admitted = HashSet::new();

    for (line, raw) in numbered(lines) {
        let Some(record) = parse_line(line, raw, diagnostics) else {
            continue;
        };

        if !admitted.insert(record.number.clone()) {
            // Duplicate line, already reported in pass 1.
            continue;
        }

        let unknown = record
            .prerequisites
            .iter()
            .find(|prerequisite| !universe.contains(*prerequisite));

        if let Some(prerequisite) = unknown {
            diagnostics.push(Diagnostic {
                line,
                kind: DiagnosticKind::UnknownPrerequisite {
                    course: record.number,
                    prerequisite: prerequisite.clone(),
                },
            });
            continue;
        }

        let course = Course {
            number: record.number,
            title: record.title,
            prerequisites: record.prerequisites,
        };
        debug_assert!(
            !table.contains(&course.number),
            "pass 1 guarantees unique accepted course numbers"
        );
        table.insert(course);
    }

    table
}

/// Non-blank lines paired with their 1-based line numbers.
fn numbered<'a>(lines: &'a [&'a str]) -> impl Iterator<Item = (usize, &'a str)> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, raw)| (idx + 1, *raw))
        .filter(|(_, raw)| !raw.trim().is_empty())
}

/// Shared per-pass parse step: a parse failure becomes a diagnostic and the
/// line is skipped.
fn parse_line(line: usize, raw: &str, diagnostics: &mut Vec<Diagnostic>) -> Option<CourseRecord> {
    match parse_record(raw) {
        Ok(record) => Some(record),
        Err(err) => {
            diagnostics.push(Diagnostic {
                line,
                kind: err.into(),
            });
            None
        }
    }
}
