//! Entry point: load `.env`, parse the CLI and run the server.

use anyhow::Context;
use buzzerbeater::{
    api,
    cli::{Buzzer, Commands},
    config::AppConfig,
    observability::init_tracing_with_level,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment.
    let _ = dotenvy::dotenv();

    let app = Buzzer::parse();

    match app.command {
        Commands::Serve { args } => {
            init_tracing_with_level(&args.log_level);
            let config = AppConfig::from_env(args).context("invalid configuration")?;
            api::serve(config).await.context("server failed")?;
        }
    }

    Ok(())
}
