//! Hexagon - encrypted credentials, notes and MFA seeds with secure sharing.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hexagon::cli::output;
use hexagon::cli::{execute, Cli};
use hexagon::error::{Error, ShareError, StoreError, ValidationError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("HEXAGON_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("hexagon=debug")
        } else {
            EnvFilter::new("hexagon=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .init();

    if let Err(e) = execute(cli.command, cli.global) {
        // Format error with suggestion if available
        let suggestion = match &e {
            Error::Store(StoreError::UserNotFound(_)) => Some("run: hexagon user add <email>"),
            Error::Validation(ValidationError::Empty("user")) => {
                Some("pass --user <email> or set HEXAGON_USER")
            }
            Error::Validation(ValidationError::Empty("password")) => {
                Some("pass --password or set HEXAGON_PASSWORD")
            }
            Error::Share(ShareError::NotFound(_)) => {
                Some("the share was already used or cancelled")
            }
            Error::Share(ShareError::Unauthorized) => {
                Some("only an owner (or the named receiver) can do this")
            }
            _ if e.is_authentication() => Some("check the password"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
