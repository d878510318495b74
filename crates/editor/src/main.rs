use std::process::ExitCode;

mod app;

fn main() -> ExitCode {
    match app::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::from(1)
        }
    }
}
