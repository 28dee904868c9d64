//! Market price deviation from model fair value

use super::types::ModelError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Qualitative classification of a deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Market trades below fair value
    Undervalued,
    /// Market trades above fair value
    Overvalued,
    /// Market equals fair value exactly
    FairValue,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Undervalued => "Undervalued",
            Verdict::Overvalued => "Overvalued",
            Verdict::FairValue => "Fair Value",
        }
    }

    /// One-line description
    pub fn describe(&self) -> &'static str {
        match self {
            Verdict::Undervalued => "market trades below model fair value",
            Verdict::Overvalued => "market trades above model fair value",
            Verdict::FairValue => "market trades at model fair value",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Deviation of the market price from fair value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    /// market_price - fair_value
    pub absolute: f64,
    /// 100 * absolute / fair_value
    pub percent: f64,
    pub verdict: Verdict,
}

impl Deviation {
    /// Compare a market price against a fair value
    ///
    /// Both prices must be finite and the fair value non-zero.
    pub fn new(market_price: f64, fair_value: f64) -> Result<Self, ModelError> {
        let absolute = finite("market price", market_price)? - finite("fair value", fair_value)?;
        let percent = finite("deviation percent", 100.0 * absolute / fair_value)?;

        let verdict = match absolute.partial_cmp(&0.0) {
            Some(Ordering::Less) => Verdict::Undervalued,
            Some(Ordering::Greater) => Verdict::Overvalued,
            Some(Ordering::Equal) => Verdict::FairValue,
            None => {
                return Err(ModelError::NonFinite {
                    what: "deviation",
                    value: absolute,
                })
            }
        };

        Ok(Self {
            absolute,
            percent,
            verdict,
        })
    }
}

fn finite(what: &'static str, value: f64) -> Result<f64, ModelError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NonFinite { what, value })
    }
}

/// (absolute, percent) deviation of `market_price` from `fair_value`
pub fn deviation(market_price: f64, fair_value: f64) -> Result<(f64, f64), ModelError> {
    let d = Deviation::new(market_price, fair_value)?;
    Ok((d.absolute, d.percent))
}
