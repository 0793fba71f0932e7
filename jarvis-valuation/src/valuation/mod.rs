//! Valuation & ROI Module.
//!
//! Turns structured business inputs into a bounded value range and an
//! investment recommendation.
//!
//! # Pipeline
//!
//! 1. **Validate**: every bound is checked up front and all violations are
//!    reported together.
//! 2. **Drivers**: internal drivers (time savings, error reduction, cost
//!    avoidance, risk mitigation, process standardization) are derated by
//!    adoption; external drivers yield a net three-year revenue projection.
//! 3. **Strategic multiplier**: five qualitative scores map to `[0.5, 2.0]`.
//! 4. **Confidence band**: the stated confidence sets the low/high range.
//! 5. **ROI**: the range midpoint against the estimated cost picks one of
//!    BUILD, CONSIDER, DEFER or KILL.
//!
//! # Usage
//!
//! ```ignore
//! use jarvis_valuation::valuation::{ValuationEngine, ValuationInput};
//!
//! let engine = ValuationEngine::new();
//! let result = engine.compute(&input)?;
//!
//! println!("Recommendation: {}", result.recommendation);
//! println!("ROI: {}", result.roi_percent);
//! ```

pub mod drivers;
pub mod engine;
pub mod external;
pub mod recommendation;
pub mod result;
pub mod strategic;
pub mod types;
pub mod validation;

pub use engine::{ValuationConfig, ValuationEngine};
pub use result::{
    BadgeColor, Driver, DriverValue, DriverValues, ExternalBreakdown, GuardedRatio,
    InternalBreakdown, Recommendation, RoiPercent, ValuationResult, ValueRange,
};
pub use types::{
    Adoption, ConfidenceLevel, CostAvoidance, CostPeriod, CustomerEconomics, ErrorReduction,
    ExternalDrivers, GtmCosts, Growth, InternalDrivers, MarketSizing, ProcessStandardization,
    ProductType, Revenue, RiskMitigation, StrategicScores, TimeSavings, ValuationInput,
    ValueWeights,
};
pub use validation::{validate_input, ErrorCode, FieldViolation, ValidationReport};
