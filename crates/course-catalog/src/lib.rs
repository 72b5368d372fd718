//! Course catalog loading and lookup for the advising toolkit.
//!
//! The crate ingests a flat comma-delimited course file, validates
//! referential integrity between courses and their prerequisites with a
//! two-pass scan, and exposes the resulting table for sorted listing and
//! single-course detail queries. Everything is in-memory; a reload replaces
//! the previous table wholesale.

mod error;
mod loader;
mod record;

pub use error::{Diagnostic, DiagnosticKind, LoadError, LoadResult, RecordError};
pub use loader::{load_from_path, load_from_str, LoadOutcome};
pub use record::{normalize_course_number, parse_record, CourseRecord};

use std::collections::HashMap;

/// A validated course. Immutable once admitted to a [`CourseTable`]; every
/// entry in `prerequisites` is a key of the table the course belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub number: String,
    pub title: String,
    pub prerequisites: Vec<String>,
}

/// Lookup table keyed by normalized course number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseTable {
    courses: HashMap<String, Course>,
}

impl CourseTable {
    /// Look up a course. The query is normalized first, so lookups are
    /// case- and surrounding-whitespace-insensitive. `None` means not found.
    pub fn get(&self, query: &str) -> Option<&Course> {
        self.courses.get(&normalize_course_number(query))
    }

    /// All courses in ascending lexicographic order of course number.
    pub fn sorted_courses(&self) -> Vec<&Course> {
        let mut courses: Vec<&Course> = self.courses.values().collect();
        courses.sort_by(|a, b| a.number.cmp(&b.number));
        courses
    }

    /// Resolve a course's prerequisites against this table. The load
    /// invariant guarantees every lookup succeeds, but callers presenting
    /// the result keep a number-only fallback rather than panicking.
    pub fn resolved_prerequisites<'a>(&'a self, course: &'a Course) -> Vec<(&'a str, Option<&'a str>)> {
        course
            .prerequisites
            .iter()
            .map(|number| {
                (
                    number.as_str(),
                    self.courses.get(number).map(|c| c.title.as_str()),
                )
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub(crate) fn contains(&self, number: &str) -> bool {
        self.courses.contains_key(number)
    }

    pub(crate) fn insert(&mut self, course: Course) {
        self.courses.insert(course.number.clone(), course);
    }
}
