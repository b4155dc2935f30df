//! planmark - outline text to Topic/Task/Todo plans and back

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = planmark::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
