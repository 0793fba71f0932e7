//! Internal value drivers.
//!
//! Every driver returns an annualized dollar amount. Adoption is not a
//! driver of its own; it derates the sum of the others.

use jarvis_common::TrainingCostPolicy;

use super::result::{Driver, DriverValues, InternalBreakdown};
use super::types::{
    Adoption, CostAvoidance, ErrorReduction, InternalDrivers, RiskMitigation, TimeSavings,
};

/// Working weeks per year.
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Weeks after which a slow ramp stops reducing value further.
pub const RAMP_HORIZON_WEEKS: f64 = 104.0;

/// Lowest share of value kept by a slow productivity ramp.
pub const MIN_RAMP_FACTOR: f64 = 0.5;

pub fn time_savings(ts: &TimeSavings) -> f64 {
    ts.hours_saved_per_user_per_week * ts.affected_users * ts.avg_hourly_cost * WEEKS_PER_YEAR
}

pub fn error_reduction(er: &ErrorReduction) -> f64 {
    er.current_errors_per_month * 12.0 * er.cost_per_error * (er.reduction_percent / 100.0)
}

pub fn cost_avoidance(ca: &CostAvoidance) -> f64 {
    ca.alternative_cost * ca.period.annualization_factor()
}

/// Expected annual loss removed.
pub fn risk_mitigation(rm: &RiskMitigation) -> f64 {
    (rm.probability_percent / 100.0) * rm.cost_if_occurs * (rm.reduction_percent / 100.0)
}

/// Share of value kept while users ramp up: `clamp(1 - weeks/104, 0.5, 1)`.
pub fn productivity_ramp(weeks_to_full_productivity: f64) -> f64 {
    if weeks_to_full_productivity <= 0.0 {
        return 1.0;
    }
    (1.0 - weeks_to_full_productivity / RAMP_HORIZON_WEEKS).clamp(MIN_RAMP_FACTOR, 1.0)
}

/// Derating factor applied to the raw internal total.
pub fn adoption_factor(adoption: &Adoption, apply_ramp: bool) -> f64 {
    let base = adoption.adoption_rate_percent / 100.0;
    if apply_ramp {
        base * productivity_ramp(adoption.weeks_to_full_productivity)
    } else {
        base
    }
}

/// One-time cost of training every affected user.
pub fn training_cost(adoption: &Adoption, affected_users: f64) -> f64 {
    adoption.training_cost_per_user * affected_users
}

/// Amount of the one-time training cost charged against annual value.
pub fn training_adjustment(
    training_cost: f64,
    policy: TrainingCostPolicy,
    amortization_years: u32,
) -> f64 {
    match policy {
        TrainingCostPolicy::FirstYear => training_cost,
        TrainingCostPolicy::Amortized => training_cost / f64::from(amortization_years.max(1)),
        TrainingCostPolicy::Ignored => 0.0,
    }
}

/// Settings that shape how the internal total is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InternalPolicy {
    pub training_cost_policy: TrainingCostPolicy,
    pub amortization_years: u32,
    pub apply_productivity_ramp: bool,
}

/// Compute every internal driver, record the raw values, and derive the
/// adoption-adjusted internal total.
pub fn internal_breakdown(
    drivers: &InternalDrivers,
    policy: InternalPolicy,
    values: &mut DriverValues,
) -> InternalBreakdown {
    values.push(Driver::TimeSavings, time_savings(&drivers.time_savings));
    values.push(
        Driver::ErrorReduction,
        error_reduction(&drivers.error_reduction),
    );
    values.push(Driver::CostAvoidance, cost_avoidance(&drivers.cost_avoidance));
    values.push(
        Driver::RiskMitigation,
        risk_mitigation(&drivers.risk_mitigation),
    );
    if let Some(standardization) = &drivers.process_standardization {
        values.push(Driver::ProcessStandardization, standardization.annual_value);
    }

    let raw_total: f64 = values
        .iter()
        .filter(|v| v.driver != Driver::ExternalRevenue)
        .map(|v| v.value)
        .sum();

    let factor = adoption_factor(&drivers.adoption, policy.apply_productivity_ramp);
    let adjusted = raw_total * factor;

    let training = training_cost(&drivers.adoption, drivers.time_savings.affected_users);
    let adjustment = training_adjustment(
        training,
        policy.training_cost_policy,
        policy.amortization_years,
    );

    InternalBreakdown {
        raw_total,
        adoption_factor: factor,
        adoption_adjusted_value: adjusted,
        training_cost: training,
        training_adjustment: adjustment,
        internal_total: adjusted - adjustment,
    }
}
