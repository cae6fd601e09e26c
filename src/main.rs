//! studyplan - A console study planner

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = studyplan::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
