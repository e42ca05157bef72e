//! todo - in-memory todo lists with categories, priorities and due dates

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = todolist::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
