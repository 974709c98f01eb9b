use std::process::ExitCode;
mod cli;

/// The forecast command entry point.
fn main() -> ExitCode {
    let args = cli::command().get_matches();
    match cli::initialize_and_run(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
