//! Bangumi season crawler - seasonal anime rankings from the Bangumi API
//!
//! A command-line tool that fetches season rankings, caches raw responses under
//! `result/` and prints them as a table, plus helpers for the API's OpenAPI
//! document.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bgm_season::app;
use bgm_season::cli::Cli;

/// Sets up stderr logging; `RUST_LOG` wins over the verbosity flag
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // help and version go to stdout and are not failures
            if err.use_stderr() {
                eprint!("{}", err);
                process::exit(1);
            }
            print!("{}", err);
            process::exit(0);
        }
    };

    // A missing .env file is fine; the variables may already be set
    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = app::run(cli, &mut out).await;
    let _ = out.flush();

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
