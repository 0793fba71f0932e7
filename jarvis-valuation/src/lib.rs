//! jarvis-valuation - Product valuation, ROI and cost estimation for Product Jarvis.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod calculator;
pub mod error;
pub mod routes;
pub mod valuation;

pub use calculator::{analyze_roi, CostEstimate, RoiAnalysis, TaskLine};
pub use error::ValuationError;
pub use routes::{build_router, AppState};
pub use valuation::{
    ValidationReport, ValuationConfig, ValuationEngine, ValuationInput, ValuationResult,
};
