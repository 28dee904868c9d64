//! strk-model: fair value surface for STRK
//!
//! STRK is priced as the larger of a straight value,
//! `face_value / (10Y UST + risk_premium)`, and a conversion value,
//! `MSTR / conversion_ratio`. This library provides:
//! - The valuation model, surface sampling and market deviation
//! - Slider-style input controls with range checks and stepping
//! - Pull-model scenario analysis
//! - Plotly (HTML) and static SVG chart backends
//! - Text summaries
//! - Configuration, logging and the CLI

pub mod analysis;
pub mod cli;
pub mod config;
pub mod controls;
pub mod model;
pub mod render;
pub mod report;
pub mod telemetry;
