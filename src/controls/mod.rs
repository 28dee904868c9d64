//! Input controls
//!
//! Slider-style controls that bound, step and label every model input.
//! Values are checked here, at the boundary, before they reach the model.

mod control;
mod types;

pub use control::Control;
pub use types::{ControlError, DisplayFormat, ProjectedInputs, ScenarioInputs};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Optional user-supplied values; `None` falls back to the control default
#[derive(Debug, Clone, Default)]
pub struct InputOverrides {
    pub rate: Option<Decimal>,
    pub underlying_price: Option<Decimal>,
    pub market_price: Option<Decimal>,
    pub projected_rate: Option<Decimal>,
    pub projected_underlying_price: Option<Decimal>,
    /// Drop the projected scenario entirely
    pub skip_projection: bool,
}

/// The full set of controls driving one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlPanel {
    pub current_rate: Control,
    pub current_underlying: Control,
    pub market_price: Control,
    pub projected_rate: Control,
    pub projected_underlying: Control,
}

impl ControlPanel {
    /// All controls in display order
    pub fn controls(&self) -> [&Control; 5] {
        [
            &self.current_rate,
            &self.current_underlying,
            &self.market_price,
            &self.projected_rate,
            &self.projected_underlying,
        ]
    }

    /// Check every control definition
    pub fn check(&self) -> Result<(), ControlError> {
        self.controls().into_iter().try_for_each(Control::check)
    }

    /// Resolve overrides against the controls into validated inputs
    pub fn resolve(&self, overrides: &InputOverrides) -> Result<ScenarioInputs, ControlError> {
        let projected = if overrides.skip_projection {
            None
        } else {
            Some(ProjectedInputs {
                rate: self.projected_rate.resolve(overrides.projected_rate)?,
                underlying_price: self
                    .projected_underlying
                    .resolve(overrides.projected_underlying_price)?,
            })
        };

        Ok(ScenarioInputs {
            rate: self.current_rate.resolve(overrides.rate)?,
            underlying_price: self.current_underlying.resolve(overrides.underlying_price)?,
            market_price: self.market_price.resolve(overrides.market_price)?,
            projected,
        })
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        let percent = DisplayFormat::Percent { decimals: 3 };
        let currency = DisplayFormat::Currency { decimals: 2 };

        Self {
            current_rate: Control::new(
                "Current 10Y UST Yield",
                dec!(0.005),
                dec!(0.10),
                dec!(0.001),
                dec!(0.043),
                percent,
            ),
            current_underlying: Control::new(
                "Current MSTR Price",
                dec!(100),
                dec!(4000),
                dec!(5),
                dec!(165),
                currency,
            ),
            market_price: Control::new(
                "Current STRK Price",
                dec!(50),
                dec!(300),
                dec!(1),
                dec!(84),
                currency,
            ),
            projected_rate: Control::new(
                "Projected 10Y UST Yield",
                dec!(0.005),
                dec!(0.10),
                dec!(0.001),
                dec!(0.035),
                percent,
            ),
            projected_underlying: Control::new(
                "Projected MSTR Price",
                dec!(100),
                dec!(4000),
                dec!(5),
                dec!(500),
                currency,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_panel_is_consistent() {
        assert!(ControlPanel::default().check().is_ok());
    }

    #[test]
    fn test_resolve_defaults() {
        let inputs = ControlPanel::default()
            .resolve(&InputOverrides::default())
            .unwrap();

        assert_relative_eq!(inputs.rate, 0.043, epsilon = 1e-15);
        assert_relative_eq!(inputs.underlying_price, 165.0);
        assert_relative_eq!(inputs.market_price, 84.0);

        let projected = inputs.projected.unwrap();
        assert_relative_eq!(projected.rate, 0.035, epsilon = 1e-15);
        assert_relative_eq!(projected.underlying_price, 500.0);
    }

    #[test]
    fn test_resolve_overrides() {
        let overrides = InputOverrides {
            underlying_price: Some(dec!(1203)),
            market_price: Some(dec!(120)),
            skip_projection: true,
            ..Default::default()
        };
        let inputs = ControlPanel::default().resolve(&overrides).unwrap();

        // Snapped to the $5 step
        assert_relative_eq!(inputs.underlying_price, 1205.0);
        assert_relative_eq!(inputs.market_price, 120.0);
        assert!(inputs.projected.is_none());
    }

    #[test]
    fn test_resolve_rejects_out_of_range() {
        let overrides = InputOverrides {
            market_price: Some(dec!(10)),
            ..Default::default()
        };
        let err = ControlPanel::default().resolve(&overrides).unwrap_err();
        assert!(err.to_string().contains("Current STRK Price"));
    }

    #[test]
    fn test_projection_not_validated_when_skipped() {
        let overrides = InputOverrides {
            projected_rate: Some(dec!(5)),
            skip_projection: true,
            ..Default::default()
        };
        assert!(ControlPanel::default().resolve(&overrides).is_ok());
    }
}
