//! Task labor costs, hours tracking, overhead and fees.

use jarvis_common::util::round_to;
use serde::{Deserialize, Serialize};

/// Below this actual/estimated ratio a task is under budget.
pub const UNDER_THRESHOLD: f64 = 0.9;
/// Above this actual/estimated ratio a task is over budget.
pub const OVER_THRESHOLD: f64 = 1.1;

/// Labor cost of a task at the minimum and maximum hourly rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCosts {
    pub task_cost_min: f64,
    pub task_cost_max: f64,
    pub actual_cost_min: f64,
    pub actual_cost_max: f64,
}

pub fn task_costs(
    estimated_hours: f64,
    actual_hours: f64,
    hourly_cost_min: f64,
    hourly_cost_max: f64,
) -> TaskCosts {
    TaskCosts {
        task_cost_min: estimated_hours * hourly_cost_min,
        task_cost_max: estimated_hours * hourly_cost_max,
        actual_cost_min: actual_hours * hourly_cost_min,
        actual_cost_max: actual_hours * hourly_cost_max,
    }
}

/// Actual hours as a percentage of the estimate, one decimal place.
pub fn hours_progress(actual_hours: f64, estimated_hours: f64) -> f64 {
    if estimated_hours <= 0.0 {
        return 0.0;
    }
    round_to(actual_hours / estimated_hours * 100.0, 1)
}

/// Progress of actual hours against the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursStatus {
    NotStarted,
    Under,
    OnTrack,
    Over,
}

impl std::fmt::Display for HoursStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::Under => write!(f, "under"),
            Self::OnTrack => write!(f, "on_track"),
            Self::Over => write!(f, "over"),
        }
    }
}

pub fn hours_status(actual_hours: f64, estimated_hours: f64) -> HoursStatus {
    if actual_hours == 0.0 || estimated_hours <= 0.0 {
        return HoursStatus::NotStarted;
    }
    let ratio = actual_hours / estimated_hours;
    if ratio < UNDER_THRESHOLD {
        HoursStatus::Under
    } else if ratio <= OVER_THRESHOLD {
        HoursStatus::OnTrack
    } else {
        HoursStatus::Over
    }
}

/// Labor plus software overhead, with a percentage fee on top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverheadAndFees {
    pub overhead_min: f64,
    pub overhead_max: f64,
    pub fee_percent: f64,
    pub fee_amount_min: f64,
    pub fee_amount_max: f64,
    pub total_min: f64,
    pub total_max: f64,
}

pub fn overhead_and_fees(
    labor_cost_min: f64,
    labor_cost_max: f64,
    software_cost: f64,
    fee_percent: f64,
) -> OverheadAndFees {
    let overhead_min = labor_cost_min + software_cost;
    let overhead_max = labor_cost_max + software_cost;
    let fee_amount_min = overhead_min * fee_percent / 100.0;
    let fee_amount_max = overhead_max * fee_percent / 100.0;

    OverheadAndFees {
        overhead_min,
        overhead_max,
        fee_percent,
        fee_amount_min,
        fee_amount_max,
        total_min: overhead_min + fee_amount_min,
        total_max: overhead_max + fee_amount_max,
    }
}
