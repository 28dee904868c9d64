//! Model types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when model inputs fall outside the formula's domain
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// A model constant is zero, negative or not finite
    #[error("Invalid model parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A sampling axis cannot be built
    #[error("Invalid {axis} axis: {reason}")]
    InvalidAxis { axis: &'static str, reason: String },

    /// Rate drives the straight-value denominator to zero or below
    #[error("Rate {rate} is at or below -risk_premium ({risk_premium})")]
    RateOutOfDomain { rate: f64, risk_premium: f64 },

    /// A price or derived quantity is NaN or infinite
    #[error("Non-finite {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

/// Which branch of the max attains the fair value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// Bond floor dominates
    Straight,
    /// Equity upside dominates
    Conversion,
}

/// Fair value together with both of its components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub rate: f64,
    pub underlying_price: f64,
    /// face_value / (rate + risk_premium)
    pub straight_value: f64,
    /// underlying_price / conversion_ratio
    pub conversion_value: f64,
    /// max(straight_value, conversion_value)
    pub fair_value: f64,
    pub regime: Regime,
}

/// A single sampled point of the surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationPoint {
    pub rate: f64,
    pub underlying_price: f64,
    pub fair_value: f64,
}
