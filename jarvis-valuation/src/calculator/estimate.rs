//! Cost estimates aggregated from task lines, and ROI analysis against an
//! expected value.

use serde::{Deserialize, Serialize};

use super::costs::{
    hours_progress, hours_status, overhead_and_fees, task_costs, HoursStatus, OverheadAndFees,
    TaskCosts,
};
use super::roi::{cost_recommendation, gain_pain, roi_range, CostRecommendation, GainPain, RoiRange};
use crate::valuation::validation::{ErrorCode, FieldChecker, ValidationReport};

/// One unit of planned work staffed by a position with an hourly rate range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskLine {
    pub name: String,
    #[serde(default)]
    pub position_title: String,
    pub estimated_hours: f64,
    #[serde(default)]
    pub actual_hours: Option<f64>,
    pub hourly_cost_min: f64,
    pub hourly_cost_max: f64,
}

/// Costs and progress for one task line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBreakdown {
    pub name: String,
    pub position_title: String,
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub hours_progress: f64,
    pub hours_status: HoursStatus,
    pub hourly_cost_min: f64,
    pub hourly_cost_max: f64,
    #[serde(flatten)]
    pub costs: TaskCosts,
}

impl TaskBreakdown {
    pub fn from_line(line: &TaskLine) -> Self {
        let actual = line.actual_hours.unwrap_or(0.0);
        Self {
            name: line.name.clone(),
            position_title: line.position_title.clone(),
            estimated_hours: line.estimated_hours,
            actual_hours: actual,
            hours_progress: hours_progress(actual, line.estimated_hours),
            hours_status: hours_status(actual, line.estimated_hours),
            hourly_cost_min: line.hourly_cost_min,
            hourly_cost_max: line.hourly_cost_max,
            costs: task_costs(
                line.estimated_hours,
                actual,
                line.hourly_cost_min,
                line.hourly_cost_max,
            ),
        }
    }
}

/// Full cost estimate for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub tasks: Vec<TaskBreakdown>,
    pub total_estimated_hours: f64,
    pub total_actual_hours: f64,
    pub hours_progress: f64,
    pub hours_status: HoursStatus,
    pub labor_cost_min: f64,
    pub labor_cost_max: f64,
    pub software_cost: f64,
    #[serde(flatten)]
    pub fees: OverheadAndFees,
    /// Midpoint of the total cost range
    pub estimated_cost: f64,
}

impl CostEstimate {
    /// Aggregate task lines, software spend and a fee into one estimate.
    pub fn from_tasks(
        tasks: &[TaskLine],
        software_cost: f64,
        fee_percent: f64,
    ) -> Result<Self, ValidationReport> {
        let mut checker = FieldChecker::new();
        for (i, task) in tasks.iter().enumerate() {
            checker.non_negative(&format!("tasks[{i}].estimatedHours"), task.estimated_hours);
            if let Some(actual) = task.actual_hours {
                checker.non_negative(&format!("tasks[{i}].actualHours"), actual);
            }
            checker.non_negative(&format!("tasks[{i}].hourlyCostMin"), task.hourly_cost_min);
            checker.non_negative(&format!("tasks[{i}].hourlyCostMax"), task.hourly_cost_max);
        }
        checker.non_negative("softwareCost", software_cost);
        checker.percent("feePercent", fee_percent);
        checker.finish().into_result()?;

        let breakdowns: Vec<TaskBreakdown> = tasks.iter().map(TaskBreakdown::from_line).collect();

        let total_estimated_hours: f64 = breakdowns.iter().map(|t| t.estimated_hours).sum();
        let total_actual_hours: f64 = breakdowns.iter().map(|t| t.actual_hours).sum();
        let labor_cost_min: f64 = breakdowns.iter().map(|t| t.costs.task_cost_min).sum();
        let labor_cost_max: f64 = breakdowns.iter().map(|t| t.costs.task_cost_max).sum();

        let fees = overhead_and_fees(labor_cost_min, labor_cost_max, software_cost, fee_percent);

        let mut overflow = FieldChecker::new();
        overflow.computed(
            "tasks",
            &[
                total_estimated_hours,
                total_actual_hours,
                fees.total_min,
                fees.total_max,
            ],
        );
        overflow.finish().into_result()?;

        Ok(Self {
            tasks: breakdowns,
            total_estimated_hours,
            total_actual_hours,
            hours_progress: hours_progress(total_actual_hours, total_estimated_hours),
            hours_status: hours_status(total_actual_hours, total_estimated_hours),
            labor_cost_min,
            labor_cost_max,
            software_cost,
            estimated_cost: (fees.total_min + fees.total_max) / 2.0,
            fees,
        })
    }

    /// Single cost figure for a valuation input.
    pub fn estimated_cost(&self) -> f64 {
        self.estimated_cost
    }

    /// Total estimated hours, usable as RICE effort.
    pub fn effort_hours(&self) -> f64 {
        self.total_estimated_hours
    }

    pub fn cost_min(&self) -> f64 {
        self.fees.total_min
    }

    pub fn cost_max(&self) -> f64 {
        self.fees.total_max
    }
}

/// ROI range, gain/pain and recommendation for a value against a cost range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiAnalysis {
    pub estimated_value: f64,
    pub cost_min: f64,
    pub cost_max: f64,
    #[serde(flatten)]
    pub roi: RoiRange,
    #[serde(flatten)]
    pub gain_pain: GainPain,
    pub gain_pain_mid: f64,
    pub recommendation: CostRecommendation,
}

pub fn analyze_roi(
    estimated_value: f64,
    cost_min: f64,
    cost_max: f64,
) -> Result<RoiAnalysis, ValidationReport> {
    let mut checker = FieldChecker::new();
    if !estimated_value.is_finite() {
        checker.push(
            "estimatedValue",
            ErrorCode::InvalidRange,
            "must be a finite number",
        );
    }
    checker.non_negative("costMin", cost_min);
    checker.non_negative("costMax", cost_max);
    if cost_min.is_finite() && cost_max.is_finite() && cost_min > cost_max {
        checker.push(
            "costMin",
            ErrorCode::InvalidRange,
            format!("must not exceed costMax ({cost_max}), got {cost_min}"),
        );
    }
    checker.finish().into_result()?;

    let roi = roi_range(estimated_value, cost_min, cost_max);
    let gain_pain = gain_pain(estimated_value, cost_min, cost_max);
    let gain_pain_mid = gain_pain.mid();
    let recommendation = cost_recommendation(roi.roi_low, roi.roi_high, gain_pain_mid);

    Ok(RoiAnalysis {
        estimated_value,
        cost_min,
        cost_max,
        roi,
        gain_pain,
        gain_pain_mid,
        recommendation,
    })
}
