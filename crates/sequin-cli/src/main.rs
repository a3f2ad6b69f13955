//! Sequin CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use sequin_cli::{
    Args,
    error_adapter::{error_reports, render_reports},
};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Sequin");
    debug!(args:?; "Parsed arguments");

    match sequin_cli::run(&args) {
        Ok(0) => info!("Completed successfully"),
        Ok(diagnostics) => info!(diagnostics; "Completed with diagnostics"),
        Err(err) => {
            // Render each diagnostic independently
            for report in render_reports(&error_reports(&err)) {
                error!("{report}");
            }
            process::exit(1);
        }
    }
}
