//! Command-line surface for the course catalog library.
//!
//! Subcommands cover the two read operations (`list`, `show`), a
//! diagnostics-only load (`check`), and the interactive advising menu
//! (`menu`). Malformed catalog lines never terminate the process; they are
//! reported on stderr while the load continues.

mod menu;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use course_catalog::{load_from_path, load_from_str, Course, CourseTable, LoadError, LoadOutcome};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    NotFound = 1,
    Diagnostics = 2,
    SourceUnreadable = 3,
}

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Command::List(args) => handle_list(args),
        Command::Show(args) => handle_show(args),
        Command::Check(args) => handle_check(args),
        Command::Menu(args) => menu::handle_menu(args),
    }
}

#[derive(Parser)]
#[command(name = "course-catalog", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every course as "NUMBER, Title", sorted by course number
    List(ListArgs),
    /// Print one course with its resolved prerequisites
    Show(ShowArgs),
    /// Load a catalog and report diagnostics without printing courses
    Check(CheckArgs),
    /// Interactive advising menu
    Menu(MenuArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Path to the course catalog file, or `-` for stdin
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Emit the listing as a JSON array
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ShowArgs {
    /// Path to the course catalog file, or `-` for stdin
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Course number to look up (case-insensitive)
    #[arg(value_name = "COURSE")]
    course: String,

    /// Emit the course as a JSON object
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CheckArgs {
    /// Path to the course catalog file, or `-` for stdin
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

#[derive(Args)]
pub(crate) struct MenuArgs {
    /// Path to the course catalog file; prompted for when omitted
    #[arg(value_name = "FILE")]
    pub(crate) file: Option<PathBuf>,
}

fn handle_list(args: ListArgs) -> Result<i32> {
    let outcome = match load_catalog(&args.file)? {
        Some(outcome) => outcome,
        None => return Ok(ExitCode::SourceUnreadable as i32),
    };
    report_diagnostics(&args.file, &outcome);

    if args.json {
        let payload = outcome
            .table
            .sorted_courses()
            .iter()
            .map(|course| json!({ "number": course.number, "title": course.title }))
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(ExitCode::Success as i32);
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for course in outcome.table.sorted_courses() {
        if !write_line(&mut handle, &format!("{}, {}", course.number, course.title))? {
            return Ok(ExitCode::Success as i32);
        }
    }
    flush(&mut handle)?;

    Ok(ExitCode::Success as i32)
}

fn handle_show(args: ShowArgs) -> Result<i32> {
    let outcome = match load_catalog(&args.file)? {
        Some(outcome) => outcome,
        None => return Ok(ExitCode::SourceUnreadable as i32),
    };
    report_diagnostics(&args.file, &outcome);

    let course = match outcome.table.get(&args.course) {
        Some(course) => course,
        None => {
            eprintln!(
                "Course not found: {}",
                course_catalog::normalize_course_number(&args.course)
            );
            return Ok(ExitCode::NotFound as i32);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&course_json(&outcome.table, course))?);
        return Ok(ExitCode::Success as i32);
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    print_course_detail(&mut handle, &outcome.table, course)?;
    flush(&mut handle)?;

    Ok(ExitCode::Success as i32)
}

fn handle_check(args: CheckArgs) -> Result<i32> {
    let outcome = match load_catalog(&args.file)? {
        Some(outcome) => outcome,
        None => return Ok(ExitCode::SourceUnreadable as i32),
    };

    if outcome.diagnostics.is_empty() {
        println!(
            "{}: {} courses, no problems found",
            args.file.display(),
            outcome.table.len()
        );
        return Ok(ExitCode::Success as i32);
    }

    for diagnostic in &outcome.diagnostics {
        println!("{}: {}", args.file.display(), diagnostic);
    }
    println!(
        "{}: {} courses loaded, {} problems",
        args.file.display(),
        outcome.table.len(),
        outcome.diagnostics.len()
    );

    Ok(ExitCode::Diagnostics as i32)
}

/// Load the catalog, treating `-` as stdin. An unreadable source is
/// reported once on stderr and surfaces as `None`; it is not a process
/// error because the shell must keep running in menu mode.
pub(crate) fn load_catalog(path: &Path) -> Result<Option<LoadOutcome>> {
    if path == Path::new("-") {
        let mut contents = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut contents)
            .context("failed to read catalog from stdin")?;
        return Ok(Some(load_from_str(&contents)));
    }

    match load_from_path(path) {
        Ok(outcome) => Ok(Some(outcome)),
        Err(err @ LoadError::SourceUnreadable { .. }) => {
            eprintln!("{err}");
            Ok(None)
        }
    }
}

pub(crate) fn report_diagnostics(path: &Path, outcome: &LoadOutcome) {
    for diagnostic in &outcome.diagnostics {
        eprintln!("{}: {}", path.display(), diagnostic);
    }
}

/// Write the course line followed by its prerequisites resolved to
/// `NUMBER, Title`. Lookups cannot miss for a validated table, but a bare
/// number is printed if one ever does.
pub(crate) fn print_course_detail<W: Write>(
    out: &mut W,
    table: &CourseTable,
    course: &Course,
) -> Result<()> {
    write_line(out, &format!("{}, {}", course.number, course.title))?;

    if course.prerequisites.is_empty() {
        write_line(out, "Prerequisites: None")?;
        return Ok(());
    }

    write_line(out, "Prerequisites:")?;
    for (number, title) in table.resolved_prerequisites(course) {
        let rendered = match title {
            Some(title) => format!("  {number}, {title}"),
            None => format!("  {number}"),
        };
        write_line(out, &rendered)?;
    }

    Ok(())
}

fn course_json(table: &CourseTable, course: &Course) -> serde_json::Value {
    json!({
        "number": course.number,
        "title": course.title,
        "prerequisites": table
            .resolved_prerequisites(course)
            .iter()
            .map(|(number, title)| json!({ "number": number, "title": title }))
            .collect::<Vec<_>>(),
    })
}

/// Write one line, swallowing broken pipes. Returns false when the reader
/// has gone away and output should stop.
fn write_line<W: Write>(out: &mut W, line: &str) -> Result<bool> {
    match writeln!(out, "{line}") {
        Ok(()) => Ok(true),
        Err(err) if should_ignore_pipe_error(&err) => Ok(false),
        Err(err) => Err(err).context(format!("Failed to print line: {line}")),
    }
}

fn flush<W: Write>(out: &mut W) -> Result<()> {
    match out.flush() {
        Ok(()) => Ok(()),
        Err(err) if should_ignore_pipe_error(&err) => Ok(()),
        Err(err) => Err(err).context("Failed to flush stdout"),
    }
}

fn should_ignore_pipe_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::BrokenPipe | io::ErrorKind::WouldBlock
    )
}
