use std::process::ExitCode;

mod apigee;
mod auth;
mod cli;
mod config;
mod error;
mod logging;
mod provision;
mod scope;
mod target_server;

#[tokio::main]
async fn main() -> ExitCode {
    cli::run().await
}
