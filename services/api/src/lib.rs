mod cli;
mod infra;
mod routes;
mod server;
mod store;

use zip_directory::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
