use std::process::ExitCode;

fn main() -> ExitCode {
    gifting_cli::run()
}
