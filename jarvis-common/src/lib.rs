//! Jarvis Common - Shared configuration, errors, and logging for Product Jarvis services.
//!
//! This crate provides:
//! - Configuration types and loading
//! - Configuration validation
//! - Shared request error type
//! - Logging setup and request context helpers
//! - Formatting utilities used across Jarvis services

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod util;
pub mod validation;

pub use config::{
    CalculatorSettings, Config, ExternalValueBasis, NetworkConfig, ObservabilityConfig,
    ServicesConfig, TrainingCostPolicy, ValuationSettings,
};
pub use error::Error;
pub use validation::{Validate, ValidationError, ValidationResult};
