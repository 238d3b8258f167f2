// Entrypoint for the CLI.
// - Keeps `main` small: parse flags, then hand off to `cli::run`.
// - Every failure is reported on stderr and ends the process non-zero.

use clap::Parser;
use clickup_cli::api::ApiClient;
use clickup_cli::cli::{run, CliArgs};
use clickup_cli::credentials::resolve_token;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Err(e) = clickup_cli::logger::init(&args.log_level) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    match run(&args, resolve_token, ApiClient::from_env) {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
