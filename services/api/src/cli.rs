use crate::predict::{run_predict, PredictArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use healthguard::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "HealthGuard AI",
    about = "Serve or run diabetes and heart disease risk predictions",
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
    /// Score a single health record from a JSON file and print the prediction
    Predict(PredictArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the directory holding the scaler and classifier artifacts
    #[arg(long)]
    pub(crate) models_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
    }
}
