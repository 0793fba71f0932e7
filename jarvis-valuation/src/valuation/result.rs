//! Valuation Output Types.

use serde::{Deserialize, Serialize};

use super::types::{ConfidenceLevel, ProductType};

// ============================================================================
// Driver Values
// ============================================================================

/// Named value driver reported in a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Driver {
    TimeSavings,
    ErrorReduction,
    CostAvoidance,
    RiskMitigation,
    ProcessStandardization,
    /// Net external revenue on the configured basis
    ExternalRevenue,
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimeSavings => write!(f, "Time Savings"),
            Self::ErrorReduction => write!(f, "Error Reduction"),
            Self::CostAvoidance => write!(f, "Cost Avoidance"),
            Self::RiskMitigation => write!(f, "Risk Mitigation"),
            Self::ProcessStandardization => write!(f, "Process Standardization"),
            Self::ExternalRevenue => write!(f, "External Revenue"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriverValue {
    pub driver: Driver,
    pub value: f64,
}

/// Per-driver values in computation order. Internal values are
/// pre-adoption.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverValues(Vec<DriverValue>);

impl DriverValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, driver: Driver, value: f64) {
        self.0.push(DriverValue { driver, value });
    }

    pub fn get(&self, driver: Driver) -> Option<f64> {
        self.0.iter().find(|d| d.driver == driver).map(|d| d.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DriverValue> {
        self.0.iter()
    }

    pub fn drivers(&self) -> Vec<Driver> {
        self.0.iter().map(|d| d.driver).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// Guarded Figures
// ============================================================================

/// A ratio whose denominator may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum GuardedRatio {
    Value(f64),
    /// Denominator was zero
    Undefined,
}

impl GuardedRatio {
    /// Divide, yielding `Undefined` for a zero denominator.
    pub fn divide(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            Self::Undefined
        } else {
            Self::Value(numerator / denominator)
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

/// ROI in percent. `Unbounded` when there is value but no cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum RoiPercent {
    Value(f64),
    Unbounded,
}

impl RoiPercent {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl std::fmt::Display for RoiPercent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v:.0}%"),
            Self::Unbounded => write!(f, "unbounded"),
        }
    }
}

// ============================================================================
// Range and Recommendation
// ============================================================================

/// Confidence-adjusted value range. Invariant: `0 <= low <= mid <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl ValueRange {
    pub fn is_ordered(&self) -> bool {
        0.0 <= self.low && self.low <= self.mid && self.mid <= self.high
    }
}

/// Investment recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Build,
    Consider,
    Defer,
    Kill,
}

impl Recommendation {
    /// Badge color shown next to the recommendation.
    pub fn color(&self) -> BadgeColor {
        match self {
            Self::Build => BadgeColor::Green,
            Self::Consider => BadgeColor::Yellow,
            Self::Defer => BadgeColor::Orange,
            Self::Kill => BadgeColor::Red,
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Build => write!(f, "BUILD"),
            Self::Consider => write!(f, "CONSIDER"),
            Self::Defer => write!(f, "DEFER"),
            Self::Kill => write!(f, "KILL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Green,
    Yellow,
    Orange,
    Red,
}

// ============================================================================
// Breakdowns
// ============================================================================

/// How the internal total was derived from the raw drivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalBreakdown {
    /// Sum of internal drivers before adoption
    pub raw_total: f64,
    pub adoption_factor: f64,
    pub adoption_adjusted_value: f64,
    /// One-time cost of training every affected user
    pub training_cost: f64,
    /// Portion of training cost charged against annual value
    pub training_adjustment: f64,
    pub internal_total: f64,
}

impl InternalBreakdown {
    pub fn figures(&self) -> [f64; 6] {
        [
            self.raw_total,
            self.adoption_factor,
            self.adoption_adjusted_value,
            self.training_cost,
            self.training_adjustment,
            self.internal_total,
        ]
    }
}

/// External unit economics and revenue projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalBreakdown {
    /// SOM customer count (informational)
    pub achievable_customers: f64,
    pub customer_ltv: f64,
    pub ltv_cac_ratio: GuardedRatio,
    pub payback_months: GuardedRatio,
    pub revenue_by_year: [f64; 3],
    pub gross_three_year_revenue: f64,
    pub total_acquisition_cost: f64,
    pub total_gtm_cost: f64,
    pub net_three_year_revenue: f64,
    /// External value on the configured basis
    pub external_total: f64,
}

impl ExternalBreakdown {
    /// Every numeric figure; undefined ratios count as zero.
    pub fn figures(&self) -> [f64; 12] {
        let [year1, year2, year3] = self.revenue_by_year;
        [
            self.achievable_customers,
            self.customer_ltv,
            self.ltv_cac_ratio.value().unwrap_or(0.0),
            self.payback_months.value().unwrap_or(0.0),
            year1,
            year2,
            year3,
            self.gross_three_year_revenue,
            self.total_acquisition_cost,
            self.total_gtm_cost,
            self.net_three_year_revenue,
            self.external_total,
        ]
    }
}

// ============================================================================
// Result
// ============================================================================

/// Output of one valuation computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub product_type: ProductType,
    pub driver_values: DriverValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<InternalBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalBreakdown>,
    /// Weighted total of active drivers; may be negative
    pub total_economic_value: f64,
    /// In [0.5, 2.0]
    pub strategic_multiplier: f64,
    pub confidence_level: ConfidenceLevel,
    pub value_range: ValueRange,
    pub estimated_cost: f64,
    pub roi_percent: RoiPercent,
    pub recommendation: Recommendation,
    pub color: BadgeColor,
    pub reasoning: String,
    pub rice_score: f64,
    /// Fields reported as undefined because a denominator was zero
    pub division_guards: Vec<String>,
}

impl ValuationResult {
    /// Returns whether the product clears the bar for investment.
    pub fn is_fundable(&self) -> bool {
        matches!(
            self.recommendation,
            Recommendation::Build | Recommendation::Consider
        )
    }
}
