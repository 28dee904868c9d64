//! Fair-value surface sampling
//!
//! Grid layout is row-major by underlying price: `values[price_index][rate_index]`.
//! This is the `z` orientation chart libraries expect for `x = rates`,
//! `y = underlying_prices`.

use super::{ModelError, StrkModel, ValuationPoint};
use serde::{Deserialize, Serialize};

/// Closed sampling interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `samples` evenly spaced points including both endpoints
    ///
    /// A single sample yields `min`.
    pub fn linspace(&self, samples: usize) -> Vec<f64> {
        match samples {
            0 => Vec::new(),
            1 => vec![self.min],
            n => {
                let step = (self.max - self.min) / (n - 1) as f64;
                (0..n)
                    .map(|i| if i == n - 1 { self.max } else { self.min + step * i as f64 })
                    .collect()
            }
        }
    }

    fn validate(&self, axis: &'static str, samples: usize) -> Result<(), ModelError> {
        let reason = if samples == 0 {
            Some("sample count must be at least 1".to_string())
        } else if !self.min.is_finite() || !self.max.is_finite() {
            Some(format!("bounds must be finite, got [{}, {}]", self.min, self.max))
        } else if self.min > self.max {
            Some(format!("min {} exceeds max {}", self.min, self.max))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ModelError::InvalidAxis { axis, reason }),
            None => Ok(()),
        }
    }
}

/// Sampled fair-value surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Rate axis (columns)
    pub rates: Vec<f64>,
    /// Underlying price axis (rows)
    pub underlying_prices: Vec<f64>,
    /// Fair values, one row per underlying price
    pub values: Vec<Vec<f64>>,
}

impl Surface {
    /// Total number of sampled points
    pub fn len(&self) -> usize {
        self.rates.len() * self.underlying_prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when `values` holds one full row per underlying price
    pub fn is_rectangular(&self) -> bool {
        self.values.len() == self.underlying_prices.len()
            && self.values.iter().all(|row| row.len() == self.rates.len())
    }

    /// Fair value at (rate index, price index)
    pub fn value(&self, rate_index: usize, price_index: usize) -> Option<f64> {
        self.values.get(price_index)?.get(rate_index).copied()
    }

    /// Iterate all points, price-major
    pub fn points(&self) -> impl Iterator<Item = ValuationPoint> + '_ {
        self.underlying_prices
            .iter()
            .zip(&self.values)
            .flat_map(move |(&underlying_price, row)| {
                self.rates
                    .iter()
                    .zip(row)
                    .map(move |(&rate, &fair_value)| ValuationPoint {
                        rate,
                        underlying_price,
                        fair_value,
                    })
            })
    }

    /// (min, max) of the sampled fair values
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.values.iter().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    pub fn rate_range(&self) -> Option<Range> {
        Some(Range::new(*self.rates.first()?, *self.rates.last()?))
    }

    pub fn price_range(&self) -> Option<Range> {
        Some(Range::new(
            *self.underlying_prices.first()?,
            *self.underlying_prices.last()?,
        ))
    }
}

impl StrkModel {
    /// Evaluate the fair value on an evenly spaced rate x underlying grid
    pub fn build_surface(
        &self,
        rate_range: Range,
        price_range: Range,
        rate_samples: usize,
        price_samples: usize,
    ) -> Result<Surface, ModelError> {
        rate_range.validate("rate", rate_samples)?;
        price_range.validate("underlying price", price_samples)?;
        self.check_rate(rate_range.min)?;

        let rates = rate_range.linspace(rate_samples);
        let underlying_prices = price_range.linspace(price_samples);

        let values = underlying_prices
            .iter()
            .map(|&price| rates.iter().map(|&rate| self.fair_value(rate, price)).collect())
            .collect();

        tracing::debug!(
            rate_samples,
            price_samples,
            rate_min = rate_range.min,
            rate_max = rate_range.max,
            price_min = price_range.min,
            price_max = price_range.max,
            "Built fair value surface"
        );

        Ok(Surface {
            rates,
            underlying_prices,
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints() {
        let xs = Range::new(0.01, 0.10).linspace(10);
        assert_eq!(xs.len(), 10);
        assert_eq!(xs[0], 0.01);
        assert_eq!(xs[9], 0.10);
        assert_relative_eq!(xs[1], 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_linspace_single_sample() {
        assert_eq!(Range::new(100.0, 4000.0).linspace(1), vec![100.0]);
    }

    #[test]
    fn test_surface_shape() {
        let model = StrkModel::default();
        let surface = model
            .build_surface(Range::new(0.01, 0.10), Range::new(100.0, 4000.0), 100, 50)
            .unwrap();

        assert_eq!(surface.len(), 5000);
        assert_eq!(surface.points().count(), 5000);
        assert_eq!(surface.values.len(), 50);
        assert!(surface.values.iter().all(|row| row.len() == 100));
        assert!(surface.is_rectangular());
    }

    #[test]
    fn test_surface_matches_pointwise() {
        let model = StrkModel::default();
        let surface = model
            .build_surface(Range::new(0.005, 0.10), Range::new(100.0, 4000.0), 7, 5)
            .unwrap();

        for point in surface.points() {
            assert_eq!(point.fair_value, model.fair_value(point.rate, point.underlying_price));
        }
    }

    #[test]
    fn test_surface_orientation() {
        let model = StrkModel::default();
        let surface = model
            .build_surface(Range::new(0.01, 0.10), Range::new(100.0, 4000.0), 3, 2)
            .unwrap();

        // Last row is the highest underlying price: conversion value everywhere
        assert_eq!(surface.value(0, 1), Some(400.0));
        assert_eq!(surface.value(0, 0), Some(model.straight_value(0.01)));
        assert_eq!(surface.value(3, 0), None);
    }

    #[test]
    fn test_surface_rejects_bad_axes() {
        let model = StrkModel::default();
        let prices = Range::new(100.0, 4000.0);

        assert!(matches!(
            model.build_surface(Range::new(0.01, 0.10), prices, 0, 10),
            Err(ModelError::InvalidAxis { axis: "rate", .. })
        ));
        assert!(matches!(
            model.build_surface(Range::new(0.10, 0.01), prices, 10, 10),
            Err(ModelError::InvalidAxis { .. })
        ));
        assert!(matches!(
            model.build_surface(Range::new(-0.05, 0.01), prices, 10, 10),
            Err(ModelError::RateOutOfDomain { .. })
        ));
        assert!(matches!(
            model.build_surface(Range::new(0.01, 0.10), Range::new(f64::NAN, 1.0), 10, 10),
            Err(ModelError::InvalidAxis { axis: "underlying price", .. })
        ));
    }

    #[test]
    fn test_value_bounds() {
        let model = StrkModel::default();
        let surface = model
            .build_surface(Range::new(0.01, 0.05), Range::new(200.0, 3000.0), 10, 10)
            .unwrap();

        let (lo, hi) = surface.value_bounds().unwrap();
        assert_relative_eq!(lo, model.straight_value(0.05), epsilon = 1e-12);
        assert_relative_eq!(hi, 300.0, epsilon = 1e-12);
    }
}
