//! counterctl: get / increment / decrement the counter on a running server.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::fmt;

use counter_client::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.filter() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("counterctl: {e}");
            return ExitCode::FAILURE;
        }
    };
    fmt().json().with_env_filter(filter).with_writer(std::io::stderr).init();

    let res = match cli.client() {
        Ok(client) => cli::execute(&client, cli.command).await,
        Err(e) => Err(e),
    };
    match res {
        Ok(Some(value)) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "counterctl failed");
            eprintln!("counterctl: {e}");
            ExitCode::FAILURE
        }
    }
}
