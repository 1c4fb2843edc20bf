mod cli;
mod infra;
mod routes;
mod server;

use assignment_portal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
