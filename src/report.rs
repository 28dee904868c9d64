//! Text summary of an analysis

use crate::analysis::Analysis;
use crate::controls::{ControlPanel, DisplayFormat};
use crate::model::{ModelParams, Regime, StrkModel};
use std::fmt;

const CURRENCY: DisplayFormat = DisplayFormat::Currency { decimals: 2 };

/// Markdown-style summary: inputs, model output, deviation, projection
pub struct Summary<'a> {
    analysis: &'a Analysis,
    panel: &'a ControlPanel,
    explanation: Option<ModelParams>,
}

impl<'a> Summary<'a> {
    pub fn new(analysis: &'a Analysis, panel: &'a ControlPanel) -> Self {
        Self {
            analysis,
            panel,
            explanation: None,
        }
    }

    /// Append a description of the model with these constants
    pub fn with_explanation(mut self, params: ModelParams) -> Self {
        self.explanation = Some(params);
        self
    }
}

fn regime_label(regime: Regime) -> &'static str {
    match regime {
        Regime::Straight => "straight value",
        Regime::Conversion => "conversion value",
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.analysis;
        let p = self.panel;
        let inputs = &a.inputs;

        writeln!(f, "## Current Analysis")?;
        writeln!(f)?;
        writeln!(f, "**Current Market Inputs:**")?;
        writeln!(f, "- {}: {}", p.current_rate.label, p.current_rate.display(inputs.rate))?;
        writeln!(
            f,
            "- {}: {}",
            p.current_underlying.label,
            p.current_underlying.display(inputs.underlying_price)
        )?;
        writeln!(
            f,
            "- {}: {}",
            p.market_price.label,
            p.market_price.display(inputs.market_price)
        )?;
        writeln!(f)?;
        writeln!(f, "**Current Model Output:**")?;
        writeln!(
            f,
            "- Model STRK Price: {} ({})",
            CURRENCY.format(a.current.fair_value),
            regime_label(a.current.regime)
        )?;
        writeln!(
            f,
            "- Difference: {} ({:+.2}%)",
            CURRENCY.format(a.deviation.absolute),
            a.deviation.percent
        )?;
        writeln!(
            f,
            "- **{}** ({})",
            a.deviation.verdict,
            a.deviation.verdict.describe()
        )?;

        if let Some(projected) = &a.projected {
            writeln!(f)?;
            writeln!(f, "---")?;
            writeln!(f)?;
            writeln!(f, "**Projected Scenario:**")?;
            writeln!(
                f,
                "- {}: {}",
                p.projected_rate.label,
                p.projected_rate.display(projected.rate)
            )?;
            writeln!(
                f,
                "- {}: {}",
                p.projected_underlying.label,
                p.projected_underlying.display(projected.underlying_price)
            )?;
            writeln!(
                f,
                "- Projected Model STRK Price: {} ({})",
                CURRENCY.format(projected.fair_value),
                regime_label(projected.regime)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "**Legend:**")?;
        writeln!(f, "- Red marker = Current STRK Price (Market)")?;
        writeln!(f, "- Green marker = Current Model Prediction")?;
        if a.projected.is_some() {
            writeln!(f, "- Blue marker = Projected Model Prediction")?;
        }
        writeln!(f, "- Red line = deviation from model")?;

        if let Some(params) = &self.explanation {
            writeln!(f)?;
            writeln!(f, "### Model Explanation")?;
            writeln!(f)?;
            writeln!(f, "The STRK price model takes the larger of two components:")?;
            writeln!(f)?;
            writeln!(
                f,
                "1. **Straight Value**: ${} / (10Y UST + {} risk premium)",
                params.face_value(),
                params.risk_premium()
            )?;
            writeln!(f, "   - Higher yields -> lower STRK price")?;
            writeln!(f, "   - Bond-like valuation floor")?;
            writeln!(
                f,
                "2. **Conversion Value**: MSTR Price / {}",
                params.conversion_ratio()
            )?;
            writeln!(f, "   - Higher MSTR -> higher STRK price")?;
            writeln!(f, "   - Equity upside")?;
            writeln!(f)?;
            writeln!(
                f,
                "At {} the two are equal when MSTR trades at {}.",
                p.current_rate.display(inputs.rate),
                CURRENCY.format(StrkModel::new(*params).crossover_price(inputs.rate))
            )?;
        }

        Ok(())
    }
}
