use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure of an entire load attempt. Per-line problems are never
/// fatal; they surface as [`Diagnostic`] values instead.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read course file '{path}': {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Why a single line failed to parse into a candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("bad format: expected at least a course number and title")]
    BadFormat,

    #[error("missing course number or title")]
    MissingRequiredField,
}

/// Why a line or record was excluded from the loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    #[error("bad format: expected at least a course number and title")]
    BadFormat,

    #[error("missing course number or title")]
    MissingRequiredField,

    #[error("duplicate course number '{0}'")]
    DuplicateCourseNumber(String),

    #[error("invalid prerequisite '{prerequisite}' for course '{course}'")]
    UnknownPrerequisite { course: String, prerequisite: String },
}

impl From<RecordError> for DiagnosticKind {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::BadFormat => DiagnosticKind::BadFormat,
            RecordError::MissingRequiredField => DiagnosticKind::MissingRequiredField,
        }
    }
}

/// Non-fatal report attached to a 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}
