//! Control types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Control validation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    #[error("{label} {value} is outside [{min}, {max}]")]
    OutOfRange {
        label: String,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("{label} is misconfigured: {reason}")]
    Misconfigured { label: String, reason: String },

    #[error("{label} value {value} is not representable")]
    NotRepresentable { label: String, value: Decimal },
}

/// How a control value is shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayFormat {
    /// Fraction shown as a percentage: 0.043 -> 4.300%
    Percent { decimals: usize },
    /// Dollar amount: 165 -> $165.00
    Currency { decimals: usize },
    /// Plain number
    Number { decimals: usize },
}

impl DisplayFormat {
    /// Format a value
    pub fn format(&self, value: f64) -> String {
        match *self {
            DisplayFormat::Percent { decimals } => format!("{:.*}%", decimals, value * 100.0),
            DisplayFormat::Currency { decimals } => {
                if value < 0.0 {
                    format!("-${:.*}", decimals, -value)
                } else {
                    format!("${:.*}", decimals, value)
                }
            }
            DisplayFormat::Number { decimals } => format!("{:.*}", decimals, value),
        }
    }
}

/// Validated inputs for one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioInputs {
    pub rate: f64,
    pub underlying_price: f64,
    pub market_price: f64,
    pub projected: Option<ProjectedInputs>,
}

/// Projected (rate, underlying) scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedInputs {
    pub rate: f64,
    pub underlying_price: f64,
}
