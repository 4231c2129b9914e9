//! HTTP service and command line front end for the JobSwipe scoring engine.

mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use jobswipe::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
