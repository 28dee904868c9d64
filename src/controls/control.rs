//! Slider-style input control

use super::{ControlError, DisplayFormat};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A bounded, stepped input with a default and a display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
    pub default: Decimal,
    pub label: String,
    pub display_format: DisplayFormat,
}

impl Control {
    /// Create a new control
    pub fn new(
        label: impl Into<String>,
        min: Decimal,
        max: Decimal,
        step: Decimal,
        default: Decimal,
        display_format: DisplayFormat,
    ) -> Self {
        Self {
            min,
            max,
            step,
            default,
            label: label.into(),
            display_format,
        }
    }

    /// Check the control definition itself
    pub fn check(&self) -> Result<(), ControlError> {
        let reason = if self.min > self.max {
            Some(format!("min {} exceeds max {}", self.min, self.max))
        } else if self.step <= Decimal::ZERO {
            Some(format!("step {} must be positive", self.step))
        } else if self.default < self.min || self.default > self.max {
            Some(format!(
                "default {} is outside [{}, {}]",
                self.default, self.min, self.max
            ))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ControlError::Misconfigured {
                label: self.label.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Snap `value` onto the step grid anchored at `min`
    ///
    /// Values outside `[min, max]` are rejected, never clamped.
    pub fn validate(&self, value: Decimal) -> Result<Decimal, ControlError> {
        if value < self.min || value > self.max {
            return Err(ControlError::OutOfRange {
                label: self.label.clone(),
                value,
                min: self.min,
                max: self.max,
            });
        }

        let steps = ((value - self.min) / self.step)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let snapped = (self.min + steps * self.step).min(self.max);

        if snapped != value {
            tracing::debug!(
                control = %self.label,
                %value,
                %snapped,
                "Snapped control value to step"
            );
        }

        Ok(snapped.normalize())
    }

    /// Validate and convert to f64 for the model
    pub fn resolve(&self, value: Option<Decimal>) -> Result<f64, ControlError> {
        let snapped = self.validate(value.unwrap_or(self.default))?;
        f64::try_from(snapped).map_err(|_| ControlError::NotRepresentable {
            label: self.label.clone(),
            value: snapped,
        })
    }

    /// Format a value with this control's display format
    pub fn display(&self, value: f64) -> String {
        self.display_format.format(value)
    }
}
