use std::path::PathBuf;

use course_catalog::{load_from_path, load_from_str, DiagnosticKind, LoadError};
use pretty_assertions::assert_eq;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn loads_a_clean_catalog_with_forward_references() {
    // Given: a catalog whose prerequisites reference later lines
    let path = fixture_path("catalog.txt");

    // When
    let outcome = load_from_path(&path).unwrap();

    // Then
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.table.len(), 8);

    let algorithms = outcome.table.get("CSCI300").unwrap();
    assert_eq!(algorithms.title, "Introduction to Algorithms");
    assert_eq!(algorithms.prerequisites, vec!["CSCI200", "MATH201"]);
}

#[test]
fn messy_catalog_keeps_only_valid_courses() {
    let path = fixture_path("messy.txt");

    let outcome = load_from_path(&path).unwrap();

    assert_eq!(outcome.table.len(), 3);
    assert!(outcome.table.get("CS101").is_some());
    assert!(outcome.table.get("CS201").is_some());
    assert!(outcome.table.get("CS202").is_some());

    // One duplicate, one bad prerequisite, and three parse failures that
    // are each reported once per pass.
    assert_eq!(outcome.diagnostics.len(), 8);
    assert_eq!(
        outcome
            .diagnostics
            .iter()
            .filter(|d| matches!(d.kind, DiagnosticKind::DuplicateCourseNumber(_)))
            .count(),
        1
    );
    assert_eq!(
        outcome
            .diagnostics
            .iter()
            .filter(|d| matches!(d.kind, DiagnosticKind::UnknownPrerequisite { .. }))
            .count(),
        1
    );
}

#[test]
fn detail_resolves_prerequisite_titles() {
    // Scenario A
    let outcome = load_from_str("CS101,Intro to CS\nCS201,Data Structures,CS101\n");

    assert_eq!(outcome.table.len(), 2);
    let course = outcome.table.get("CS201").unwrap();
    let resolved = outcome.table.resolved_prerequisites(course);
    assert_eq!(resolved, vec![("CS101", Some("Intro to CS"))]);
}

#[test]
fn unknown_prerequisite_drops_the_whole_course() {
    // Scenario B
    let outcome = load_from_str("CS301,Advanced,CS999\n");

    assert!(outcome.table.get("CS301").is_none());
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(
        outcome.diagnostics[0].kind,
        DiagnosticKind::UnknownPrerequisite {
            course: "CS301".to_string(),
            prerequisite: "CS999".to_string(),
        }
    );
}

#[test]
fn duplicate_course_numbers_first_occurrence_wins() {
    // Scenario C
    let outcome = load_from_str("cs101,Intro\nCS101,Intro Again\n");

    assert_eq!(outcome.table.len(), 1);
    assert_eq!(outcome.table.get("cs101").unwrap().title, "Intro");

    let duplicates: Vec<_> = outcome
        .diagnostics
        .iter()
        .filter(|d| matches!(d.kind, DiagnosticKind::DuplicateCourseNumber(_)))
        .collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].line, 2);
}

#[test]
fn trailing_comma_means_no_prerequisites() {
    // Scenario D
    let outcome = load_from_str("CS101,Intro,\n");

    assert!(outcome.diagnostics.is_empty());
    assert!(outcome.table.get("CS101").unwrap().prerequisites.is_empty());
}

#[test]
fn unreadable_source_is_fatal_with_no_diagnostics() {
    // Scenario E
    let path = fixture_path("no_such_file.txt");

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, LoadError::SourceUnreadable { .. }));
}

#[test]
fn loading_twice_is_idempotent() {
    let path = fixture_path("messy.txt");

    let first = load_from_path(&path).unwrap();
    let second = load_from_path(&path).unwrap();

    assert_eq!(first.table, second.table);
    assert_eq!(first.diagnostics, second.diagnostics);
}

#[test]
fn no_dangling_prerequisites_survive_into_the_table() {
    let path = fixture_path("messy.txt");

    let outcome = load_from_path(&path).unwrap();

    for course in outcome.table.sorted_courses() {
        for prerequisite in &course.prerequisites {
            assert!(
                outcome.table.get(prerequisite).is_some(),
                "dangling prerequisite {prerequisite} on {}",
                course.number
            );
        }
    }
}

#[test]
fn sorted_listing_is_ordered_and_complete() {
    let path = fixture_path("catalog.txt");

    let outcome = load_from_path(&path).unwrap();
    let sorted = outcome.table.sorted_courses();

    assert_eq!(sorted.len(), outcome.table.len());
    for pair in sorted.windows(2) {
        assert!(pair[0].number < pair[1].number);
    }
    assert_eq!(sorted[0].number, "CSCI100");
    assert_eq!(sorted.last().unwrap().number, "MATH201");
}

#[test]
fn reload_replaces_the_previous_table_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.txt");

    std::fs::write(&path, "CS101,Intro\n").unwrap();
    let first = load_from_path(&path).unwrap();
    assert_eq!(first.table.len(), 1);

    std::fs::write(&path, "CS500,Compilers\n").unwrap();
    let second = load_from_path(&path).unwrap();
    assert!(second.table.get("CS101").is_none());
    assert!(second.table.get("CS500").is_some());
}

#[test]
fn queries_normalize_case_and_whitespace() {
    let outcome = load_from_str("CS101,Intro to CS\n");

    assert!(outcome.table.get(" cs101 ").is_some());
    assert!(outcome.table.get("CS102").is_none());
}
