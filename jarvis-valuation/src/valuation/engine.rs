//! Valuation Engine.
//!
//! Runs the full pipeline: validate, compute drivers, weight the totals,
//! apply the strategic multiplier and confidence band, then derive ROI and
//! a recommendation. Each call depends only on its input and the engine
//! configuration, so one engine can be shared across request handlers.

use jarvis_common::util::format_currency_compact;
use jarvis_common::{ExternalValueBasis, TrainingCostPolicy, ValuationSettings};
use tracing::{debug, info, warn};

use super::drivers::{internal_breakdown, InternalPolicy};
use super::external::external_breakdown;
use super::recommendation::{reasoning, roi_percent, value_range};
use super::result::{Driver, DriverValues, Recommendation, ValuationResult};
use super::strategic::{rice_score, strategic_multiplier};
use super::types::{ProductType, ValuationInput};
use super::validation::{validate_input, FieldChecker, ValidationReport};

/// Valuation engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationConfig {
    /// How one-time training cost is charged against annual value
    pub training_cost_policy: TrainingCostPolicy,
    /// Years over which training cost is spread when amortized
    pub amortization_years: u32,
    /// Whether external value is net three-year revenue or a third of it
    pub external_value_basis: ExternalValueBasis,
    /// Derate adoption further by time to full productivity
    pub apply_productivity_ramp: bool,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            training_cost_policy: TrainingCostPolicy::Amortized,
            amortization_years: 3,
            external_value_basis: ExternalValueBasis::Annualized,
            apply_productivity_ramp: false,
        }
    }
}

impl From<&ValuationSettings> for ValuationConfig {
    fn from(settings: &ValuationSettings) -> Self {
        Self {
            training_cost_policy: settings.training_cost_policy,
            amortization_years: settings.amortization_years,
            external_value_basis: settings.external_value_basis,
            apply_productivity_ramp: settings.apply_productivity_ramp,
        }
    }
}

impl ValuationConfig {
    fn internal_policy(&self) -> InternalPolicy {
        InternalPolicy {
            training_cost_policy: self.training_cost_policy,
            amortization_years: self.amortization_years,
            apply_productivity_ramp: self.apply_productivity_ramp,
        }
    }
}

/// Deterministic product valuation engine.
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    config: ValuationConfig,
}

impl ValuationEngine {
    /// Create a new engine with default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config.
    pub fn with_config(config: ValuationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Check an input without computing anything.
    pub fn validate(&self, input: &ValuationInput) -> ValidationReport {
        validate_input(input)
    }

    /// Compute a valuation.
    ///
    /// Every invalid field is reported in the returned [`ValidationReport`];
    /// nothing is computed unless the whole input is valid.
    pub fn compute(&self, input: &ValuationInput) -> Result<ValuationResult, ValidationReport> {
        let report = validate_input(input);
        if !report.is_valid() {
            warn!(
                product_type = %input.product_type,
                violations = report.violations.len(),
                "Valuation input rejected"
            );
            return Err(report);
        }

        let mut driver_values = DriverValues::new();
        let mut division_guards = Vec::new();

        let internal = match (&input.internal_drivers, input.product_type.has_internal()) {
            (Some(drivers), true) => Some(internal_breakdown(
                drivers,
                self.config.internal_policy(),
                &mut driver_values,
            )),
            _ => None,
        };

        let external = match (&input.external_drivers, input.product_type.has_external()) {
            (Some(drivers), true) => {
                let breakdown = external_breakdown(drivers, self.config.external_value_basis);
                driver_values.push(Driver::ExternalRevenue, breakdown.external_total);
                if breakdown.ltv_cac_ratio.is_undefined() {
                    division_guards.push("ltvCacRatio".to_string());
                }
                if breakdown.payback_months.is_undefined() {
                    division_guards.push("paybackMonths".to_string());
                }
                Some(breakdown)
            }
            _ => None,
        };

        let internal_total = internal.as_ref().map_or(0.0, |b| b.internal_total);
        let external_total = external.as_ref().map_or(0.0, |b| b.external_total);

        let total_economic_value = match input.product_type {
            ProductType::Internal => internal_total,
            ProductType::External => external_total,
            ProductType::Both => {
                let (internal_pct, external_pct) = input
                    .value_weights
                    .as_ref()
                    .map_or((50.0, 50.0), |w| (w.internal_percent, w.external_percent));
                internal_total * (internal_pct / 100.0) + external_total * (external_pct / 100.0)
            }
        };

        debug!(
            internal_total,
            external_total, total_economic_value, "Driver totals computed"
        );

        let multiplier = strategic_multiplier(&input.strategic_scores);
        let base = total_economic_value * multiplier;
        let range = value_range(base, input.confidence_level);

        debug!(
            multiplier,
            base,
            low = range.low,
            mid = range.mid,
            high = range.high,
            confidence = %input.confidence_level,
            "Confidence band applied"
        );

        let roi = roi_percent(range.mid, input.estimated_cost);
        let rice = rice_score(
            &input.strategic_scores,
            input.confidence_level,
            input.effort_hours,
        );

        // Individually valid inputs can still overflow once multiplied.
        let mut overflow = FieldChecker::new();
        if let Some(breakdown) = &internal {
            overflow.computed("internalDrivers", &breakdown.figures());
        }
        if let Some(breakdown) = &external {
            overflow.computed("externalDrivers", &breakdown.figures());
        }
        let combined = [total_economic_value, base, range.low, range.mid, range.high];
        if overflow.is_empty() {
            for field in driver_group_fields(input.product_type) {
                overflow.computed(field, &combined);
            }
        }
        if overflow.is_empty() {
            overflow.computed("estimatedCost", &[roi.value().unwrap_or(0.0)]);
        }
        overflow.computed("effortHours", &[rice]);

        let overflow = overflow.finish();
        if !overflow.is_valid() {
            warn!(
                product_type = %input.product_type,
                violations = overflow.violations.len(),
                "Valuation overflowed"
            );
            return Err(overflow);
        }

        if roi.is_unbounded() {
            division_guards.push("roiPercent".to_string());
        }
        let recommendation = Recommendation::from_roi(roi);

        info!(
            product_type = %input.product_type,
            value = %format_currency_compact(range.mid),
            roi = %roi,
            recommendation = %recommendation,
            "Valuation computed"
        );

        Ok(ValuationResult {
            product_type: input.product_type,
            driver_values,
            internal,
            external,
            total_economic_value,
            strategic_multiplier: multiplier,
            confidence_level: input.confidence_level,
            value_range: range,
            estimated_cost: input.estimated_cost,
            roi_percent: roi,
            recommendation,
            color: recommendation.color(),
            reasoning: reasoning(recommendation, roi, &range, input.estimated_cost),
            rice_score: rice,
            division_guards,
        })
    }
}

fn driver_group_fields(product_type: ProductType) -> Vec<&'static str> {
    let mut fields = Vec::with_capacity(2);
    if product_type.has_internal() {
        fields.push("internalDrivers");
    }
    if product_type.has_external() {
        fields.push("externalDrivers");
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::result::{GuardedRatio, RoiPercent};
    use crate::valuation::types::*;
    use crate::valuation::validation::ErrorCode;

    fn make_test_input() -> ValuationInput {
        ValuationInput {
            product_type: ProductType::Internal,
            internal_drivers: Some(InternalDrivers {
                time_savings: TimeSavings {
                    hours_saved_per_user_per_week: 5.0,
                    affected_users: 10.0,
                    avg_hourly_cost: 50.0,
                },
                adoption: Adoption {
                    adoption_rate_percent: 100.0,
                    ..Default::default()
                },
                ..Default::default()
            }),
            external_drivers: None,
            value_weights: None,
            strategic_scores: StrategicScores::default(),
            confidence_level: ConfidenceLevel::High,
            estimated_cost: 50_000.0,
            effort_hours: None,
        }
    }

    fn make_external_drivers() -> ExternalDrivers {
        ExternalDrivers {
            market_sizing: MarketSizing {
                total_potential_customers: 5_000.0,
                serviceable_percent: 50.0,
                achievable_market_share_percent: 10.0,
            },
            revenue: Revenue {
                price_per_unit: 500.0,
                average_deal_size: 6_000.0,
                sales_cycle_months: 2.0,
                conversion_rate_percent: 5.0,
            },
            customer_economics: CustomerEconomics {
                gross_margin_percent: 80.0,
                customer_lifetime_months: 24.0,
                customer_acquisition_cost: 1_000.0,
                monthly_churn_rate_percent: None,
            },
            gtm_costs: GtmCosts {
                annual_marketing_spend: 10_000.0,
                annual_sales_team_cost: 20_000.0,
            },
            growth: Growth {
                year1_customers: 10.0,
                year2_customers: 25.0,
                year3_customers: 50.0,
            },
        }
    }

    #[test]
    fn test_internal_scenario() {
        let engine = ValuationEngine::new();
        let result = engine.compute(&make_test_input()).unwrap();

        assert_eq!(result.driver_values.get(Driver::TimeSavings), Some(130_000.0));
        assert_eq!(result.total_economic_value, 130_000.0);
        assert!((result.strategic_multiplier - 1.181_818_18).abs() < 1e-6);
        assert!((result.value_range.mid - 153_636.36).abs() < 0.01);
        assert_eq!(result.recommendation, Recommendation::Build);
        assert!(result.external.is_none());
        assert!(result.division_guards.is_empty());
    }

    #[test]
    fn test_rejects_invalid_input() {
        let mut input = make_test_input();
        input.internal_drivers = None;

        let report = ValuationEngine::new().compute(&input).unwrap_err();
        assert!(report.has_code(ErrorCode::MissingDriverGroup));
    }

    #[test]
    fn test_both_weights_totals() {
        let mut input = make_test_input();
        input.product_type = ProductType::Both;
        input.external_drivers = Some(make_external_drivers());
        input.value_weights = Some(ValueWeights {
            internal_percent: 60.0,
            external_percent: 40.0,
        });

        let result = ValuationEngine::new().compute(&input).unwrap();
        let internal = result.internal.as_ref().unwrap().internal_total;
        let external = result.external.as_ref().unwrap().external_total;

        assert!(
            (result.total_economic_value - (internal * 0.6 + external * 0.4)).abs() < 1e-6
        );
        assert_eq!(
            result.driver_values.drivers().last(),
            Some(&Driver::ExternalRevenue)
        );
    }

    #[test]
    fn test_zero_cac_reports_division_guard() {
        let mut drivers = make_external_drivers();
        drivers.customer_economics.customer_acquisition_cost = 0.0;

        let input = ValuationInput {
            product_type: ProductType::External,
            internal_drivers: None,
            external_drivers: Some(drivers),
            ..make_test_input()
        };

        let result = ValuationEngine::new().compute(&input).unwrap();
        let external = result.external.unwrap();
        assert_eq!(external.ltv_cac_ratio, GuardedRatio::Undefined);
        assert_eq!(external.payback_months, GuardedRatio::Value(0.0));
        assert_eq!(result.division_guards, vec!["ltvCacRatio".to_string()]);
    }

    #[test]
    fn test_zero_cost_is_unbounded() {
        let mut input = make_test_input();
        input.estimated_cost = 0.0;

        let result = ValuationEngine::new().compute(&input).unwrap();
        assert_eq!(result.roi_percent, RoiPercent::Unbounded);
        assert_eq!(result.recommendation, Recommendation::Build);
        assert!(result.division_guards.contains(&"roiPercent".to_string()));
    }

    #[test]
    fn test_training_policy_changes_total() {
        let mut input = make_test_input();
        if let Some(drivers) = input.internal_drivers.as_mut() {
            drivers.adoption.training_cost_per_user = 300.0;
        }

        let amortized = ValuationEngine::new().compute(&input).unwrap();
        assert!((amortized.total_economic_value - 129_000.0).abs() < 1e-9);

        let first_year = ValuationEngine::with_config(ValuationConfig {
            training_cost_policy: TrainingCostPolicy::FirstYear,
            ..Default::default()
        })
        .compute(&input)
        .unwrap();
        assert!((first_year.total_economic_value - 127_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_overflowing_internal_drivers() {
        for adoption in [0.0, 100.0] {
            let mut input = make_test_input();
            if let Some(drivers) = input.internal_drivers.as_mut() {
                drivers.time_savings.hours_saved_per_user_per_week = 1e200;
                drivers.time_savings.avg_hourly_cost = 1e200;
                drivers.adoption.adoption_rate_percent = adoption;
            }

            let report = ValuationEngine::new().compute(&input).unwrap_err();
            assert_eq!(report.violations.len(), 1);
            let violation = report.violation("internalDrivers").unwrap();
            assert_eq!(violation.code, ErrorCode::InvalidRange);
        }
    }

    #[test]
    fn test_rejects_overflowing_external_drivers() {
        let mut drivers = make_external_drivers();
        drivers.revenue.average_deal_size = 1e300;
        drivers.growth.year3_customers = 1e10;

        let input = ValuationInput {
            product_type: ProductType::External,
            internal_drivers: None,
            external_drivers: Some(drivers),
            ..make_test_input()
        };

        let report = ValuationEngine::new().compute(&input).unwrap_err();
        assert!(report.violation("externalDrivers").is_some());
    }

    #[test]
    fn test_rejects_overflowing_roi_and_rice() {
        let mut input = make_test_input();
        input.estimated_cost = 1e-310;
        input.effort_hours = Some(1e-310);

        let report = ValuationEngine::new().compute(&input).unwrap_err();
        assert!(report.violation("estimatedCost").is_some());
        assert!(report.violation("effortHours").is_some());
    }

    #[test]
    fn test_config_from_settings() {
        let settings = ValuationSettings {
            training_cost_policy: TrainingCostPolicy::Ignored,
            amortization_years: 5,
            external_value_basis: ExternalValueBasis::ThreeYearTotal,
            apply_productivity_ramp: true,
        };
        let config = ValuationConfig::from(&settings);
        assert_eq!(config.training_cost_policy, TrainingCostPolicy::Ignored);
        assert_eq!(config.amortization_years, 5);
        assert_eq!(config.external_value_basis, ExternalValueBasis::ThreeYearTotal);
        assert!(config.apply_productivity_ramp);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let engine = ValuationEngine::new();
        let input = make_test_input();
        assert_eq!(engine.compute(&input), engine.compute(&input));
    }
}
