use crate::error::RecordError;

/// One successfully parsed catalog line, normalized but not yet validated
/// against the rest of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    pub number: String,
    pub title: String,
    pub prerequisites: Vec<String>,
}

/// Canonical form of a course identifier: trimmed, ASCII-uppercased.
///
/// Applied everywhere an identifier is read or compared (parsed fields,
/// universe membership, table keys, query lookups) so that `cs200`,
/// `CS200 ` and `CS200` all name the same course.
pub fn normalize_course_number(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}

/// Parse one non-blank catalog line into a candidate record.
///
/// The line is split on commas with no quoting support; every field is
/// trimmed. A trailing comma yields a trailing empty field, which lands in
/// the prerequisite positions and is dropped there. Fields from index 2 on
/// are prerequisite tokens; empty ones mean "no prerequisite" and are
/// skipped while the order of the rest is preserved.
pub fn parse_record(line: &str) -> Result<CourseRecord, RecordError> {
    let fields = split_fields(line);

    if fields.len() < 2 {
        return Err(RecordError::BadFormat);
    }

    let number = normalize_course_number(fields[0]);
    let title = fields[1].to_string();

    if number.is_empty() || title.is_empty() {
        return Err(RecordError::MissingRequiredField);
    }

    let prerequisites = fields[2..]
        .iter()
        .map(|field| normalize_course_number(field))
        .filter(|token| !token.is_empty())
        .collect();

    Ok(CourseRecord {
        number,
        title,
        prerequisites,
    })
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}
