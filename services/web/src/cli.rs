use crate::server;
use assignment_portal::config::AppConfig;
use assignment_portal::error::AppError;
use assignment_portal::submission::{CandidatesApi, HttpCandidatesApi};
use assignment_portal::telemetry;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Assignment Portal",
    about = "Serve the candidate assignment submission form",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Fetch the candidate levels offered by the remote API and print them
    Levels,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Levels => print_levels().await,
    }
}

async fn print_levels() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let api = HttpCandidatesApi::new(&config.remote)?;
    let levels = api.fetch_levels().await?;

    if levels.is_empty() {
        println!("No candidate levels offered by {}", config.remote.base_url);
    }
    for level in levels {
        println!("{level}");
    }
    Ok(())
}
