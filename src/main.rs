use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gamma_check::cli;
use gamma_check::core::types::Detection;

/// Exit status for any failure, matching clap's usage-error status
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("gamma_check=debug,info")
    } else {
        EnvFilter::new("gamma_check=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        cli::Commands::Check(args) => cli::check::run(args, cli.format, cli.verbose).map(|d| {
            match d {
                Detection::Detected => ExitCode::SUCCESS,
                Detection::NotDetected => ExitCode::FAILURE,
            }
        }),
        cli::Commands::Regions(args) => {
            cli::regions::run(args, cli.format, cli.verbose).map(|()| ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
