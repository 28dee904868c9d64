//! Fair value model module
//!
//! Prices STRK as the max of a straight (bond-floor) value driven by the
//! 10Y UST yield and a conversion value driven by the MSTR price, and
//! samples that price over a rate x underlying grid.

mod deviation;
mod surface;
mod types;
mod valuation;

pub use deviation::{deviation, Deviation, Verdict};
pub use surface::{Range, Surface};
pub use types::{ModelError, Regime, Valuation, ValuationPoint};
pub use valuation::{
    ModelParams, StrkModel, DEFAULT_CONVERSION_RATIO, DEFAULT_FACE_VALUE, DEFAULT_RISK_PREMIUM,
};
