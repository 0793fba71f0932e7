//! Cost Calculator Module.
//!
//! Labor and software cost estimation for a product, plus ROI and
//! gain/pain analysis against a cost range. The estimate's midpoint is what
//! a valuation uses as its `estimatedCost`.

pub mod costs;
pub mod estimate;
pub mod roi;

pub use costs::{
    hours_progress, hours_status, overhead_and_fees, task_costs, HoursStatus, OverheadAndFees,
    TaskCosts,
};
pub use estimate::{analyze_roi, CostEstimate, RoiAnalysis, TaskBreakdown, TaskLine};
pub use roi::{
    cost_recommendation, gain_pain, roi_range, CostRecommendation, GainPain, GainPainRatio,
    RoiRange,
};
