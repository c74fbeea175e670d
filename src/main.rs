//! Storefront interactive shell

use std::{io, process::ExitCode};

use tracing::{error, info};

use storefront::{catalog::Catalog, config::ShopConfig, observability, shell::Shell};

/// Storefront entry point
pub fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments; clap prints help and usage errors itself
    let config = ShopConfig::load().unwrap_or_else(|err| err.exit());

    if let Err(err) = observability::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("Logging error: {err}");
        }

        return ExitCode::FAILURE;
    }

    let catalog = match &config.catalog {
        Some(path) => Catalog::from_path(path),
        None => Catalog::builtin(),
    };

    let mut store = match catalog {
        Ok(catalog) => catalog.into_store(),
        Err(err) => {
            error!(error = %err, "failed to load catalog");

            #[expect(
                clippy::print_stderr,
                reason = "catalog errors must reach the user even when logs are filtered"
            )]
            {
                eprintln!("Catalog error: {err}");
            }

            return ExitCode::FAILURE;
        }
    };

    info!(products = store.len(), "store opened");

    let stdin = io::stdin();
    let stdout = io::stdout();

    let result = Shell::new(&mut store, stdin.lock(), stdout.lock())
        .with_color(!config.no_color)
        .run();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "shell terminated");

            ExitCode::FAILURE
        }
    }
}
