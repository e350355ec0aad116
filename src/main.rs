use clap::{Parser, Subcommand};
use guardian::cmd::{DashboardArgs, RelayArgs, dashboard, relay};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding `app.yaml`.
    #[arg(long, global = true, default_value = "configs")]
    config_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs the notification relay.
    Relay(RelayArgs),
    /// Runs the dashboard HTTP server.
    Dashboard(DashboardArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Relay(args) => relay::execute(Some(cli.config_dir), args).await,
        Commands::Dashboard(args) => dashboard::execute(Some(cli.config_dir), args).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Guardian failed to start.");
    }
    result.map_err(Into::into)
}
