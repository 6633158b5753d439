use serde::{Deserialize, Serialize};

use larder_planner::ReorderRecommendation;

use crate::baseline::BaselineOrder;

/// Dynamic-plan spend against the recurring baseline.
///
/// `savings` is baseline minus dynamic: positive means the dynamic plan is
/// cheaper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostComparison {
    pub dynamic_total: f64,
    pub baseline_total: f64,
    pub savings: f64,
}

pub fn compare_costs(
    recommendations: &[ReorderRecommendation],
    baseline: &[BaselineOrder],
) -> CostComparison {
    let dynamic_total: f64 = recommendations.iter().map(|rec| rec.estimated_cost).sum();
    let baseline_total: f64 = baseline.iter().map(|order| order.cost).sum();
    CostComparison {
        dynamic_total,
        baseline_total,
        savings: baseline_total - dynamic_total,
    }
}
