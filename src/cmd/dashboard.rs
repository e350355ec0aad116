//! `guardian dashboard`: serves the local status dashboard API.

use clap::Parser;

use super::Error;
use crate::{context::AppContextBuilder, supervisor::Supervisor};

/// Arguments of the `dashboard` subcommand.
#[derive(Parser, Debug, Default)]
pub struct DashboardArgs {
    /// Listen address, overriding `server.listen_address`.
    #[arg(short, long)]
    pub listen: Option<String>,
}

/// Runs the dashboard until a shutdown signal arrives.
pub async fn execute(config_dir: Option<String>, args: DashboardArgs) -> Result<(), Error> {
    let context = AppContextBuilder::new(config_dir).listen_address(args.listen).build()?;

    let supervisor = Supervisor::builder()
        .config(context.config)
        .store(context.store)
        .statuses(context.statuses)
        .event_log(context.event_log)
        .build_dashboard()
        .await?;

    tracing::info!("Supervisor initialized, starting dashboard...");
    supervisor.run().await?;
    Ok(())
}
