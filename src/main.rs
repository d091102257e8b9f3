use std::process::ExitCode;

use clap::Parser;
use shopgate::cli::{execute, Cli};
use shopgate::config::{load_config, print_schema};
use shopgate::startup::start;
use shopgate::utils::logger::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.schema {
        return match print_schema() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error printing schema: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = load_config();
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let (store, _) = match start(&config).await {
        Ok(started) => started,
        Err(e) => {
            eprintln!("Error starting session store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match execute(&store, &cli.selected(), &mut std::io::stdout()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            ExitCode::FAILURE
        }
    }
}
