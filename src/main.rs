use clap::Parser;
use strk_model::cli::{self, Cli, Commands};
use strk_model::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load_or_default(&cli.config)?;

    // Initialize telemetry
    strk_model::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Value(args) => {
            tracing::debug!("Evaluating current scenario");
            args.execute(&config)?;
        }
        Commands::Plot(args) => {
            tracing::debug!("Rendering surface chart");
            args.execute(&config)?;
        }
        Commands::Surface(args) => {
            tracing::debug!("Exporting surface");
            args.execute(&config)?;
        }
        Commands::Config => cli::show_config(&config)?,
    }

    Ok(())
}
