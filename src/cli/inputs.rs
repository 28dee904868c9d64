//! Input flags shared by the evaluating commands

use crate::analysis::Analysis;
use crate::config::Config;
use crate::controls::InputOverrides;
use crate::model::{ModelParams, StrkModel};
use clap::Args;
use rust_decimal::Decimal;

/// Control overrides; omitted flags use the control defaults
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Current 10Y UST yield as a fraction (e.g. 0.043)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Current MSTR price
    #[arg(long)]
    pub underlying: Option<Decimal>,

    /// Current STRK market price
    #[arg(long)]
    pub market_price: Option<Decimal>,

    /// Projected 10Y UST yield
    #[arg(long)]
    pub projected_rate: Option<Decimal>,

    /// Projected MSTR price
    #[arg(long)]
    pub projected_underlying: Option<Decimal>,

    /// Leave out the projected scenario
    #[arg(long, conflicts_with_all = ["projected_rate", "projected_underlying"])]
    pub no_projection: bool,
}

impl InputArgs {
    pub fn overrides(&self) -> InputOverrides {
        InputOverrides {
            rate: self.rate,
            underlying_price: self.underlying,
            market_price: self.market_price,
            projected_rate: self.projected_rate,
            projected_underlying_price: self.projected_underlying,
            skip_projection: self.no_projection,
        }
    }

    /// Validate inputs against the controls and evaluate the model
    pub fn analyze(&self, config: &Config) -> anyhow::Result<(ModelParams, Analysis)> {
        let params = ModelParams::from_config(&config.model)?;
        let inputs = config.controls.resolve(&self.overrides())?;
        let analysis = Analysis::run(&StrkModel::new(params), &config.surface, inputs)?;
        Ok((params, analysis))
    }
}
