//! CLI interface for strk-model
//!
//! Provides subcommands for:
//! - `value`: Print the analysis summary for the current inputs
//! - `plot`: Render the surface chart and print the summary
//! - `surface`: Export the sampled surface as JSON
//! - `config`: Show the effective configuration

mod inputs;
mod plot;
mod surface;
mod value;

pub use inputs::InputArgs;
pub use plot::PlotArgs;
pub use surface::SurfaceArgs;
pub use value::ValueArgs;

use crate::config::Config;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "strk-model")]
#[command(about = "STRK fair value surface over the 10Y UST yield and MSTR price")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print fair value and deviation for the current inputs
    Value(ValueArgs),
    /// Render the fair value surface chart
    Plot(PlotArgs),
    /// Export the sampled surface as JSON
    Surface(SurfaceArgs),
    /// Show configuration
    Config,
}

/// Print the effective configuration as TOML
pub fn show_config(config: &Config) -> anyhow::Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
