//! Valuation Input Types.
//!
//! Structured business inputs for a product valuation: internal value
//! drivers, external market drivers, strategic scores and confidence.
//! JSON field names are camelCase to match the product records the
//! frontend submits.

use serde::{Deserialize, Serialize};

// ============================================================================
// Classification Enums
// ============================================================================

/// Where a product's value is realized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    /// Saves the organization time or money
    Internal,
    /// Sold to outside customers
    External,
    /// Blended internal and external value
    Both,
}

impl ProductType {
    /// Whether internal drivers are required.
    pub fn has_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Both)
    }

    /// Whether external drivers are required.
    pub fn has_external(&self) -> bool {
        matches!(self, Self::External | Self::Both)
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal => write!(f, "Internal"),
            Self::External => write!(f, "External"),
            Self::Both => write!(f, "Both"),
        }
    }
}

/// Billing period of the alternative solution being avoided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CostPeriod {
    Monthly,
    #[default]
    Annually,
    /// Spread over a three-year horizon.
    #[serde(alias = "One-time")]
    OneTime,
}

impl CostPeriod {
    /// Multiplier turning one payment into an annual amount.
    pub fn annualization_factor(&self) -> f64 {
        match self {
            Self::Monthly => 12.0,
            Self::Annually => 1.0,
            Self::OneTime => 1.0 / 3.0,
        }
    }
}

/// Stated confidence in the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConfidenceLevel {
    High,
    #[default]
    Medium,
    Low,
    Speculative,
}

impl ConfidenceLevel {
    /// `(low, high)` multipliers bounding the reported value range.
    pub fn band(&self) -> (f64, f64) {
        match self {
            Self::High => (0.9, 1.1),
            Self::Medium => (0.6, 1.0),
            Self::Low => (0.3, 0.7),
            Self::Speculative => (0.1, 0.4),
        }
    }

    /// Confidence factor used by the RICE score.
    pub fn rice_factor(&self) -> f64 {
        match self {
            Self::High => 1.0,
            Self::Medium => 0.8,
            Self::Low => 0.5,
            Self::Speculative => 0.2,
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
            Self::Speculative => write!(f, "Speculative"),
        }
    }
}

// ============================================================================
// Internal Drivers
// ============================================================================

/// Hours given back to employees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSavings {
    pub hours_saved_per_user_per_week: f64,
    /// Whole number of people
    pub affected_users: f64,
    /// Fully loaded cost per hour
    pub avg_hourly_cost: f64,
}

/// Fewer costly mistakes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReduction {
    pub current_errors_per_month: f64,
    pub cost_per_error: f64,
    /// Expected reduction (0-100)
    pub reduction_percent: f64,
}

/// Spend on an alternative solution that is no longer needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostAvoidance {
    pub alternative_cost: f64,
    pub period: CostPeriod,
}

/// Expected-loss reduction for a business risk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMitigation {
    /// Annual probability the risk occurs (0-100)
    pub probability_percent: f64,
    pub cost_if_occurs: f64,
    /// How much of the risk is removed (0-100)
    pub reduction_percent: f64,
}

/// Adoption and rollout assumptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adoption {
    pub adoption_rate_percent: f64,
    pub training_cost_per_user: f64,
    pub rollout_months: f64,
    pub weeks_to_full_productivity: f64,
}

/// Annual value of standardizing a process, estimated directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStandardization {
    pub annual_value: f64,
}

/// Value drivers for internally used products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalDrivers {
    pub time_savings: TimeSavings,
    pub error_reduction: ErrorReduction,
    pub cost_avoidance: CostAvoidance,
    pub risk_mitigation: RiskMitigation,
    pub adoption: Adoption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_standardization: Option<ProcessStandardization>,
}

// ============================================================================
// External Drivers
// ============================================================================

/// TAM/SAM/SOM funnel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSizing {
    /// Whole number of customers
    pub total_potential_customers: f64,
    pub serviceable_percent: f64,
    pub achievable_market_share_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    pub price_per_unit: f64,
    /// Annual revenue per customer
    pub average_deal_size: f64,
    pub sales_cycle_months: f64,
    pub conversion_rate_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerEconomics {
    pub gross_margin_percent: f64,
    pub customer_lifetime_months: f64,
    pub customer_acquisition_cost: f64,
    /// When positive, lifetime is derived from churn instead of stated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_churn_rate_percent: Option<f64>,
}

/// Go-to-market spend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GtmCosts {
    pub annual_marketing_spend: f64,
    pub annual_sales_team_cost: f64,
}

/// Cumulative customer counts at the end of each year. Whole numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Growth {
    pub year1_customers: f64,
    pub year2_customers: f64,
    pub year3_customers: f64,
}

impl Growth {
    pub fn by_year(&self) -> [f64; 3] {
        [
            self.year1_customers,
            self.year2_customers,
            self.year3_customers,
        ]
    }
}

/// Value drivers for products sold to outside customers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDrivers {
    pub market_sizing: MarketSizing,
    pub revenue: Revenue,
    pub customer_economics: CustomerEconomics,
    pub gtm_costs: GtmCosts,
    pub growth: Growth,
}

// ============================================================================
// Weights and Scores
// ============================================================================

/// Internal/external split for `ProductType::Both`. Must sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueWeights {
    pub internal_percent: f64,
    pub external_percent: f64,
}

/// Five qualitative scores feeding the strategic multiplier.
///
/// The 1-5 scores are whole numbers; they are carried as `f64` so that an
/// out-of-range value still deserializes and is reported by validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicScores {
    /// 1-5
    pub reach: f64,
    /// One of 0.25, 0.5, 1, 2, 3
    pub impact: f64,
    /// 1-5
    pub strategic_alignment: f64,
    /// 1-5
    pub differentiation: f64,
    /// 1-5
    pub urgency: f64,
}

impl StrategicScores {
    /// Allowed impact scores, from minimal to massive.
    pub const IMPACT_SCALE: [f64; 5] = [0.25, 0.5, 1.0, 2.0, 3.0];

    /// Lowest score on every axis.
    pub fn minimum() -> Self {
        Self {
            reach: 1.0,
            impact: 0.25,
            strategic_alignment: 1.0,
            differentiation: 1.0,
            urgency: 1.0,
        }
    }

    /// Highest score on every axis.
    pub fn maximum() -> Self {
        Self {
            reach: 5.0,
            impact: 3.0,
            strategic_alignment: 5.0,
            differentiation: 5.0,
            urgency: 5.0,
        }
    }
}

impl Default for StrategicScores {
    /// Mid-scale on every axis.
    fn default() -> Self {
        Self {
            reach: 3.0,
            impact: 1.0,
            strategic_alignment: 3.0,
            differentiation: 3.0,
            urgency: 3.0,
        }
    }
}

// ============================================================================
// Input
// ============================================================================

/// Complete valuation request for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationInput {
    pub product_type: ProductType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_drivers: Option<InternalDrivers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_drivers: Option<ExternalDrivers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_weights: Option<ValueWeights>,
    pub strategic_scores: StrategicScores,
    pub confidence_level: ConfidenceLevel,
    /// Labor + software cost from the cost calculator
    pub estimated_cost: f64,
    /// Total estimated task hours, used by the RICE score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_hours: Option<f64>,
}
