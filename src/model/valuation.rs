//! Straight-vs-conversion fair value model
//!
//! fair_value = max(face_value / (rate + risk_premium), underlying_price / conversion_ratio)
//!
//! The straight value is the bond floor: a fixed dividend discounted at the
//! 10Y yield plus a credit premium. The conversion value is what the share
//! converts into at the current underlying price.

use super::{ModelError, Regime, Valuation};
use crate::config::ModelConfig;

/// Default annual dividend numerator of the straight value
pub const DEFAULT_FACE_VALUE: f64 = 8.0;
/// Default spread added to the rate in the straight-value denominator
pub const DEFAULT_RISK_PREMIUM: f64 = 0.0423;
/// Default number of underlying shares per preferred share, inverted
pub const DEFAULT_CONVERSION_RATIO: f64 = 10.0;

/// Validated model constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    face_value: f64,
    risk_premium: f64,
    conversion_ratio: f64,
}

impl ModelParams {
    /// Create model parameters, rejecting non-positive or non-finite constants
    pub fn new(
        face_value: f64,
        risk_premium: f64,
        conversion_ratio: f64,
    ) -> Result<Self, ModelError> {
        for (name, value) in [
            ("face_value", face_value),
            ("risk_premium", risk_premium),
            ("conversion_ratio", conversion_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ModelError::InvalidParameter { name, value });
            }
        }

        Ok(Self {
            face_value,
            risk_premium,
            conversion_ratio,
        })
    }

    /// Create from ModelConfig
    pub fn from_config(config: &ModelConfig) -> Result<Self, ModelError> {
        Self::new(config.face_value, config.risk_premium, config.conversion_ratio)
    }

    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    pub fn risk_premium(&self) -> f64 {
        self.risk_premium
    }

    pub fn conversion_ratio(&self) -> f64 {
        self.conversion_ratio
    }
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            face_value: DEFAULT_FACE_VALUE,
            risk_premium: DEFAULT_RISK_PREMIUM,
            conversion_ratio: DEFAULT_CONVERSION_RATIO,
        }
    }
}

/// Fair value model over (rate, underlying price)
#[derive(Debug, Clone, Copy, Default)]
pub struct StrkModel {
    params: ModelParams,
}

impl StrkModel {
    /// Create a new model
    pub fn new(params: ModelParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Bond-floor component
    ///
    /// Callers guarantee `rate > -risk_premium`; see [`StrkModel::check_rate`].
    pub fn straight_value(&self, rate: f64) -> f64 {
        self.params.face_value / (rate + self.params.risk_premium)
    }

    /// Equity-upside component
    pub fn conversion_value(&self, underlying_price: f64) -> f64 {
        underlying_price / self.params.conversion_ratio
    }

    /// max(straight, conversion)
    pub fn fair_value(&self, rate: f64, underlying_price: f64) -> f64 {
        self.straight_value(rate).max(self.conversion_value(underlying_price))
    }

    /// Fair value with both components and the dominating regime
    pub fn valuation(&self, rate: f64, underlying_price: f64) -> Valuation {
        let straight_value = self.straight_value(rate);
        let conversion_value = self.conversion_value(underlying_price);

        // Ties go to the bond floor
        let (fair_value, regime) = if conversion_value > straight_value {
            (conversion_value, Regime::Conversion)
        } else {
            (straight_value, Regime::Straight)
        };

        Valuation {
            rate,
            underlying_price,
            straight_value,
            conversion_value,
            fair_value,
            regime,
        }
    }

    /// Underlying price at which conversion value equals straight value
    pub fn crossover_price(&self, rate: f64) -> f64 {
        self.params.conversion_ratio * self.straight_value(rate)
    }

    /// Reject rates that drive the straight-value denominator to zero or below
    pub fn check_rate(&self, rate: f64) -> Result<f64, ModelError> {
        if !rate.is_finite() || rate + self.params.risk_premium <= 0.0 {
            return Err(ModelError::RateOutOfDomain {
                rate,
                risk_premium: self.params.risk_premium,
            });
        }
        Ok(rate)
    }
}
