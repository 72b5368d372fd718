use std::process;

fn main() {
    match course_catalog_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("course-catalog error: {err}");
            process::exit(1);
        }
    }
}
