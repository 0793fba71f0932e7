//! Input validation.
//!
//! Every bound is checked before any driver is computed and all
//! violations are collected into one [`ValidationReport`], so a caller can
//! highlight every bad field at once.

use serde::{Deserialize, Serialize};

use super::types::{
    Adoption, CostAvoidance, ErrorReduction, ExternalDrivers, InternalDrivers, ProductType,
    RiskMitigation, StrategicScores, TimeSavings, ValuationInput, ValueWeights,
};

/// Tolerance when checking that the weight split sums to 100.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

// ============================================================================
// Error Codes
// ============================================================================

/// Machine-readable failure code for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A numeric field violates its documented bound
    InvalidRange,
    /// The product type requires a driver group that is absent
    MissingDriverGroup,
    /// Weight split missing or not summing to 100
    InvalidWeights,
    /// A ratio denominator is zero; reported, never rejected
    DivisionGuard,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange => write!(f, "INVALID_RANGE"),
            Self::MissingDriverGroup => write!(f, "MISSING_DRIVER_GROUP"),
            Self::InvalidWeights => write!(f, "INVALID_WEIGHTS"),
            Self::DivisionGuard => write!(f, "DIVISION_GUARD"),
        }
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// camelCase JSON path, e.g. `internalDrivers.adoption.adoptionRatePercent`
    pub field: String,
    pub code: ErrorCode,
    pub message: String,
}

/// Aggregated validation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{} invalid field(s): {}", .violations.len(), summarize(.violations))]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<FieldViolation>,
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} ({})", v.field, v.code))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationReport {
    pub fn from_violations(violations: Vec<FieldViolation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether any violation carries `code`.
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.violations.iter().any(|v| v.code == code)
    }

    /// Violation for the given field path, if any.
    pub fn violation(&self, field: &str) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }

    /// `Ok(())` when valid, otherwise the report itself as the error.
    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

// ============================================================================
// Field Checker
// ============================================================================

/// Accumulates field violations for one validation pass.
#[derive(Debug, Default)]
pub struct FieldChecker {
    violations: Vec<FieldViolation>,
}

impl FieldChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, code: ErrorCode, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.into(),
            code,
            message: message.into(),
        });
    }

    /// Finite and `>= 0`.
    pub fn non_negative(&mut self, field: &str, value: f64) {
        if !value.is_finite() {
            self.push(field, ErrorCode::InvalidRange, "must be a finite number");
        } else if value < 0.0 {
            self.push(
                field,
                ErrorCode::InvalidRange,
                format!("must be >= 0, got {value}"),
            );
        }
    }

    /// Finite and strictly positive.
    pub fn positive(&mut self, field: &str, value: f64) {
        if !value.is_finite() {
            self.push(field, ErrorCode::InvalidRange, "must be a finite number");
        } else if value <= 0.0 {
            self.push(
                field,
                ErrorCode::InvalidRange,
                format!("must be > 0, got {value}"),
            );
        }
    }

    /// Finite and within `[0, 100]`.
    pub fn percent(&mut self, field: &str, value: f64) {
        if !value.is_finite() {
            self.push(field, ErrorCode::InvalidRange, "must be a finite number");
        } else if !(0.0..=100.0).contains(&value) {
            self.push(
                field,
                ErrorCode::InvalidRange,
                format!("must be between 0 and 100, got {value}"),
            );
        }
    }

    /// Finite, `>= 0` and whole.
    pub fn count(&mut self, field: &str, value: f64) {
        self.non_negative(field, value);
        if value.is_finite() && value >= 0.0 && value.fract() != 0.0 {
            self.push(
                field,
                ErrorCode::InvalidRange,
                format!("must be a whole number, got {value}"),
            );
        }
    }

    /// Whole score within `[1, 5]`.
    pub fn score(&mut self, field: &str, value: f64) {
        if !value.is_finite() || value.fract() != 0.0 || !(1.0..=5.0).contains(&value) {
            self.push(
                field,
                ErrorCode::InvalidRange,
                format!("must be a whole number between 1 and 5, got {value}"),
            );
        }
    }

    /// Figures derived from `field`, any of which may have overflowed to
    /// infinity or NaN. Reported at most once.
    pub fn computed(&mut self, field: &str, figures: &[f64]) {
        if figures.iter().any(|v| !v.is_finite()) {
            self.push(
                field,
                ErrorCode::InvalidRange,
                "values are too large to produce a finite result",
            );
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn finish(self) -> ValidationReport {
        ValidationReport::from_violations(self.violations)
    }
}

// ============================================================================
// Input Validation
// ============================================================================

/// Validate a full valuation input.
///
/// Driver groups not used by the product type are ignored, as are weights
/// for anything other than `Both`.
pub fn validate_input(input: &ValuationInput) -> ValidationReport {
    let mut checker = FieldChecker::new();

    if input.product_type.has_internal() {
        match &input.internal_drivers {
            Some(drivers) => check_internal(&mut checker, drivers),
            None => checker.push(
                "internalDrivers",
                ErrorCode::MissingDriverGroup,
                format!("required for {} products", input.product_type),
            ),
        }
    }

    if input.product_type.has_external() {
        match &input.external_drivers {
            Some(drivers) => check_external(&mut checker, drivers),
            None => checker.push(
                "externalDrivers",
                ErrorCode::MissingDriverGroup,
                format!("required for {} products", input.product_type),
            ),
        }
    }

    if input.product_type == ProductType::Both {
        match &input.value_weights {
            Some(weights) => check_weights(&mut checker, weights),
            None => checker.push(
                "valueWeights",
                ErrorCode::InvalidWeights,
                "required for Both products",
            ),
        }
    }

    check_scores(&mut checker, &input.strategic_scores);
    checker.non_negative("estimatedCost", input.estimated_cost);
    if let Some(hours) = input.effort_hours {
        checker.non_negative("effortHours", hours);
    }

    checker.finish()
}

fn check_internal(checker: &mut FieldChecker, drivers: &InternalDrivers) {
    let TimeSavings {
        hours_saved_per_user_per_week,
        affected_users,
        avg_hourly_cost,
    } = &drivers.time_savings;
    checker.non_negative(
        "internalDrivers.timeSavings.hoursSavedPerUserPerWeek",
        *hours_saved_per_user_per_week,
    );
    checker.count("internalDrivers.timeSavings.affectedUsers", *affected_users);
    checker.non_negative("internalDrivers.timeSavings.avgHourlyCost", *avg_hourly_cost);

    let ErrorReduction {
        current_errors_per_month,
        cost_per_error,
        reduction_percent,
    } = &drivers.error_reduction;
    checker.non_negative(
        "internalDrivers.errorReduction.currentErrorsPerMonth",
        *current_errors_per_month,
    );
    checker.non_negative("internalDrivers.errorReduction.costPerError", *cost_per_error);
    checker.percent(
        "internalDrivers.errorReduction.reductionPercent",
        *reduction_percent,
    );

    let CostAvoidance {
        alternative_cost, ..
    } = &drivers.cost_avoidance;
    checker.non_negative("internalDrivers.costAvoidance.alternativeCost", *alternative_cost);

    let RiskMitigation {
        probability_percent,
        cost_if_occurs,
        reduction_percent,
    } = &drivers.risk_mitigation;
    checker.percent(
        "internalDrivers.riskMitigation.probabilityPercent",
        *probability_percent,
    );
    checker.non_negative("internalDrivers.riskMitigation.costIfOccurs", *cost_if_occurs);
    checker.percent(
        "internalDrivers.riskMitigation.reductionPercent",
        *reduction_percent,
    );

    let Adoption {
        adoption_rate_percent,
        training_cost_per_user,
        rollout_months,
        weeks_to_full_productivity,
    } = &drivers.adoption;
    checker.percent(
        "internalDrivers.adoption.adoptionRatePercent",
        *adoption_rate_percent,
    );
    checker.non_negative(
        "internalDrivers.adoption.trainingCostPerUser",
        *training_cost_per_user,
    );
    checker.non_negative("internalDrivers.adoption.rolloutMonths", *rollout_months);
    checker.non_negative(
        "internalDrivers.adoption.weeksToFullProductivity",
        *weeks_to_full_productivity,
    );

    if let Some(standardization) = &drivers.process_standardization {
        checker.non_negative(
            "internalDrivers.processStandardization.annualValue",
            standardization.annual_value,
        );
    }
}

fn check_external(checker: &mut FieldChecker, drivers: &ExternalDrivers) {
    let market = &drivers.market_sizing;
    checker.count(
        "externalDrivers.marketSizing.totalPotentialCustomers",
        market.total_potential_customers,
    );
    checker.percent(
        "externalDrivers.marketSizing.serviceablePercent",
        market.serviceable_percent,
    );
    checker.percent(
        "externalDrivers.marketSizing.achievableMarketSharePercent",
        market.achievable_market_share_percent,
    );

    let revenue = &drivers.revenue;
    checker.non_negative("externalDrivers.revenue.pricePerUnit", revenue.price_per_unit);
    checker.non_negative(
        "externalDrivers.revenue.averageDealSize",
        revenue.average_deal_size,
    );
    checker.non_negative(
        "externalDrivers.revenue.salesCycleMonths",
        revenue.sales_cycle_months,
    );
    checker.percent(
        "externalDrivers.revenue.conversionRatePercent",
        revenue.conversion_rate_percent,
    );

    let economics = &drivers.customer_economics;
    checker.percent(
        "externalDrivers.customerEconomics.grossMarginPercent",
        economics.gross_margin_percent,
    );
    checker.positive(
        "externalDrivers.customerEconomics.customerLifetimeMonths",
        economics.customer_lifetime_months,
    );
    checker.non_negative(
        "externalDrivers.customerEconomics.customerAcquisitionCost",
        economics.customer_acquisition_cost,
    );
    if let Some(churn) = economics.monthly_churn_rate_percent {
        checker.percent(
            "externalDrivers.customerEconomics.monthlyChurnRatePercent",
            churn,
        );
    }

    let growth = &drivers.growth;
    checker.count("externalDrivers.growth.year1Customers", growth.year1_customers);
    checker.count("externalDrivers.growth.year2Customers", growth.year2_customers);
    checker.count("externalDrivers.growth.year3Customers", growth.year3_customers);

    let gtm = &drivers.gtm_costs;
    checker.non_negative(
        "externalDrivers.gtmCosts.annualMarketingSpend",
        gtm.annual_marketing_spend,
    );
    checker.non_negative(
        "externalDrivers.gtmCosts.annualSalesTeamCost",
        gtm.annual_sales_team_cost,
    );
}

fn check_weights(checker: &mut FieldChecker, weights: &ValueWeights) {
    checker.percent("valueWeights.internalPercent", weights.internal_percent);
    checker.percent("valueWeights.externalPercent", weights.external_percent);

    let sum = weights.internal_percent + weights.external_percent;
    if !sum.is_finite() || (sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
        checker.push(
            "valueWeights",
            ErrorCode::InvalidWeights,
            format!("internalPercent + externalPercent must equal 100, got {sum}"),
        );
    }
}

fn check_scores(checker: &mut FieldChecker, scores: &StrategicScores) {
    checker.score("strategicScores.reach", scores.reach);
    checker.score(
        "strategicScores.strategicAlignment",
        scores.strategic_alignment,
    );
    checker.score("strategicScores.differentiation", scores.differentiation);
    checker.score("strategicScores.urgency", scores.urgency);

    let allowed = StrategicScores::IMPACT_SCALE
        .iter()
        .any(|step| (step - scores.impact).abs() < 1e-9);
    if !allowed {
        checker.push(
            "strategicScores.impact",
            ErrorCode::InvalidRange,
            format!(
                "must be one of 0.25, 0.5, 1, 2, 3, got {}",
                scores.impact
            ),
        );
    }
}
