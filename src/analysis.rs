//! Scenario analysis
//!
//! Pull-model evaluation: callers resolve the current control values, then
//! [`Analysis::run`] computes the surface, the current valuation, the market
//! deviation and the projected valuation in one synchronous pass.

use crate::config::SurfaceConfig;
use crate::controls::ScenarioInputs;
use crate::model::{Deviation, ModelError, Range, StrkModel, Surface, Valuation};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the chart and summary renderers need for one set of inputs
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub inputs: ScenarioInputs,
    pub surface: Surface,
    /// Model valuation at the current (rate, underlying)
    pub current: Valuation,
    /// Market price against the current fair value
    pub deviation: Deviation,
    /// Model valuation at the projected (rate, underlying)
    pub projected: Option<Valuation>,
    pub generated_at: DateTime<Utc>,
}

impl Analysis {
    /// Evaluate the model for one set of inputs
    pub fn run(
        model: &StrkModel,
        grid: &SurfaceConfig,
        inputs: ScenarioInputs,
    ) -> Result<Self, ModelError> {
        let surface = model.build_surface(
            Range::new(grid.rate_min, grid.rate_max),
            Range::new(grid.price_min, grid.price_max),
            grid.rate_samples,
            grid.price_samples,
        )?;

        model.check_rate(inputs.rate)?;
        let current = model.valuation(inputs.rate, inputs.underlying_price);
        let deviation = Deviation::new(inputs.market_price, current.fair_value)?;

        let projected = match inputs.projected {
            Some(p) => {
                model.check_rate(p.rate)?;
                Some(model.valuation(p.rate, p.underlying_price))
            }
            None => None,
        };

        tracing::info!(
            rate = inputs.rate,
            underlying = inputs.underlying_price,
            market_price = inputs.market_price,
            fair_value = current.fair_value,
            regime = ?current.regime,
            deviation_pct = deviation.percent,
            verdict = %deviation.verdict,
            "Evaluated scenario"
        );

        if let Some(p) = &projected {
            tracing::debug!(
                rate = p.rate,
                underlying = p.underlying_price,
                fair_value = p.fair_value,
                regime = ?p.regime,
                "Evaluated projected scenario"
            );
        }

        Ok(Self {
            inputs,
            surface,
            current,
            deviation,
            projected,
            generated_at: Utc::now(),
        })
    }
}
