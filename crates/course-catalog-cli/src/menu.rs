//! Interactive advising menu: load a catalog, list courses, look one up.
//!
//! Mirrors the behavior of the original assistance program: invalid menu
//! choices and malformed catalog content are reported and the loop keeps
//! running; only option 9 (or end of input) leaves it.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use course_catalog::{normalize_course_number, CourseTable};

use crate::{load_catalog, print_course_detail, report_diagnostics, ExitCode, MenuArgs};

pub(crate) fn handle_menu(args: MenuArgs) -> Result<i32> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Welcome to the advising assistance program.");

    let mut file = args.file;
    let mut table: Option<CourseTable> = None;

    loop {
        print_menu()?;
        let Some(choice) = read_trimmed_line(&mut input)? else {
            break; // end of input behaves like exit
        };

        match choice.as_str() {
            "1" => {
                let Some(path) = resolve_file(&mut input, &mut file)? else {
                    break;
                };
                match load_catalog(&path)? {
                    Some(outcome) if !outcome.table.is_empty() => {
                        report_diagnostics(&path, &outcome);
                        println!(
                            "Data loaded successfully ({} courses).",
                            outcome.table.len()
                        );
                        table = Some(outcome.table);
                    }
                    Some(outcome) => {
                        report_diagnostics(&path, &outcome);
                        println!("No courses loaded. Check the reported problems and try again.");
                        table = None;
                    }
                    None => {
                        // Unreadable file; forget the name so option 1 re-prompts.
                        file = None;
                        table = None;
                    }
                }
            }
            "2" => match &table {
                Some(table) => {
                    for course in table.sorted_courses() {
                        println!("{}, {}", course.number, course.title);
                    }
                }
                None => println!("Please load data first (option 1)."),
            },
            "3" => match &table {
                Some(table) => {
                    prompt("Enter a course number (e.g. CSCI200): ")?;
                    let Some(query) = read_trimmed_line(&mut input)? else {
                        break;
                    };
                    match table.get(&query) {
                        Some(course) => {
                            let stdout = io::stdout();
                            let mut handle = stdout.lock();
                            print_course_detail(&mut handle, table, course)?;
                            handle.flush()?;
                        }
                        None => {
                            println!("Course not found: {}", normalize_course_number(&query));
                        }
                    }
                }
                None => println!("Please load data first (option 1)."),
            },
            "9" => {
                println!("Goodbye.");
                break;
            }
            _ => println!("Invalid option. Please enter 1, 2, 3, or 9."),
        }
    }

    Ok(ExitCode::Success as i32)
}

fn print_menu() -> Result<()> {
    println!();
    println!("Menu:");
    println!("  1. Load course data");
    println!("  2. Print course list");
    println!("  3. Print course");
    println!("  9. Exit");
    prompt("Enter your choice: ")
}

fn prompt(text: &str) -> Result<()> {
    print!("{text}");
    io::stdout().flush()?;
    Ok(())
}

/// Read one line, trimmed. `None` means the input stream ended.
fn read_trimmed_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

/// File name given on the command line, or prompted for (and remembered)
/// on first use. `None` means the input stream ended at the prompt.
fn resolve_file<R: BufRead>(input: &mut R, file: &mut Option<PathBuf>) -> Result<Option<PathBuf>> {
    if let Some(path) = file {
        return Ok(Some(path.clone()));
    }

    loop {
        prompt("Enter the course data file name: ")?;
        match read_trimmed_line(input)? {
            None => return Ok(None),
            Some(name) if name.is_empty() => continue,
            Some(name) => {
                let path = PathBuf::from(name);
                *file = Some(path.clone());
                return Ok(Some(path));
            }
        }
    }
}
