// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use procommit::{App, Cli, Error};

#[tokio::main]
async fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("procommit=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("procommit=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::env::var("NO_COLOR").is_err())
        .without_time()
        .init();

    let result = match App::new(cli) {
        Ok(mut app) => app.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        std::process::exit(report(e));
    }
}

/// Print the outcome and pick the exit status
fn report(e: Error) -> i32 {
    match e {
        Error::Cancelled => {
            eprintln!("Aborted.");
            0
        }
        Error::Rejected => {
            eprintln!("{} {}", style("info:").cyan(), e);
            0
        }
        _ => {
            tracing::error!(error = %e, "procommit failed");
            eprintln!("{:?}", miette::Report::new(e));
            1
        }
    }
}
