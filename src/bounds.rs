// =============================================================================
// Display Bounds — per-bucket [min, max] ranges for the persisted projection
// =============================================================================
//
// Callers persist a trimmed projection of the engine output: risk level plus
// one bucket per class with its percentage and an adjustable display range.
// The range half-width scales with risk tolerance (equities widen for
// tolerant investors, defensive classes tighten), then a context multiplier
// derived from the investor's circumstances shrinks or stretches it, and the
// result is clamped into hard per-class bands.
// =============================================================================

use std::collections::BTreeMap;

use serde::Serialize;

use crate::answers::{AnswerSet, AgeBand, JobStability};
use crate::types::{AssetClass, RiskLevel};

/// One persisted bucket of the plan projection.
#[derive(Debug, Clone, Serialize)]
pub struct PlanBucket {
    pub class: AssetClass,
    pub pct: u32,
    /// Inclusive [min, max] display range around `pct`.
    pub range: (f64, f64),
}

/// The reduced projection callers persist and render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProjection {
    pub risk_level: RiskLevel,
    pub buckets: Vec<PlanBucket>,
}

/// Base half-width per class as a function of risk tolerance t ∈ [0, 1]:
/// equities 4..10, gold/real estate 3..7, defensive 2..4 (inverted — a
/// tolerant investor needs less slack on the defensive side).
fn base_half_width(class: AssetClass, tolerance: f64) -> f64 {
    match class {
        AssetClass::Stocks | AssetClass::MutualFunds => 4.0 + 6.0 * tolerance,
        AssetClass::Gold | AssetClass::RealEstate => 3.0 + 4.0 * tolerance,
        AssetClass::Debt | AssetClass::Liquid => 2.0 + 2.0 * (1.0 - tolerance),
    }
}

/// Hard floor/ceiling per class that no display range may escape.
fn hard_band(class: AssetClass) -> (f64, f64) {
    match class {
        AssetClass::Stocks | AssetClass::MutualFunds => (0.0, 70.0),
        AssetClass::Gold => (0.0, 15.0),
        AssetClass::RealEstate => (0.0, 10.0),
        AssetClass::Debt => (0.0, 75.0),
        AssetClass::Liquid => (0.0, 80.0),
    }
}

/// Context multiplier on the half-width, clamped to [0.5, 1.5].
///
/// Flexible circumstances widen the range; fragile ones tighten it. The
/// nudge sizes are calibration values.
fn context_multiplier(answers: &AnswerSet) -> f64 {
    let mut m: f64 = 1.0;

    if answers.investment_horizon.is_long() {
        m += 0.2;
    }
    if answers.investment_horizon == crate::answers::Horizon::UnderTwoYears {
        m -= 0.2;
    }
    if matches!(answers.age, AgeBand::From55To65 | AgeBand::Over65) {
        m -= 0.1;
    }
    if answers.emergency_fund_months.is_thin() {
        m -= 0.1;
    }
    if answers.dependents.is_many() {
        m -= 0.1;
    }
    if !answers.has_insurance {
        m -= 0.1;
    }
    match answers.job_stability {
        JobStability::VeryStable => m += 0.1,
        JobStability::NotStable => m -= 0.1,
        _ => {}
    }

    m.clamp(0.5, 1.5)
}

/// Display range for one bucket.
fn range_for(class: AssetClass, pct: u32, tolerance: f64, multiplier: f64) -> (f64, f64) {
    let half = base_half_width(class, tolerance) * multiplier;
    let (floor, ceiling) = hard_band(class);
    let pct = pct as f64;
    // The bucket's own value always lies inside its range.
    let min = (pct - half).clamp(floor, ceiling).min(pct);
    let max = (pct + half).clamp(floor, ceiling).max(pct);
    (min, max)
}

/// Build the persisted projection from the final integer allocation.
pub fn project_plan(
    allocation: &BTreeMap<AssetClass, u32>,
    answers: &AnswerSet,
    risk_score: f64,
) -> PlanProjection {
    let tolerance = (risk_score / 100.0).clamp(0.0, 1.0);
    let multiplier = context_multiplier(answers);

    let buckets = AssetClass::ALL
        .iter()
        .map(|class| PlanBucket {
            class: *class,
            pct: allocation[class],
            range: range_for(*class, allocation[class], tolerance, multiplier),
        })
        .collect();

    PlanProjection {
        risk_level: RiskLevel::from_score(risk_score),
        buckets,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{Dependents, EmergencyFundMonths, Horizon};

    fn allocation() -> BTreeMap<AssetClass, u32> {
        [
            (AssetClass::Stocks, 25),
            (AssetClass::MutualFunds, 30),
            (AssetClass::Gold, 8),
            (AssetClass::RealEstate, 7),
            (AssetClass::Debt, 15),
            (AssetClass::Liquid, 15),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn every_bucket_range_contains_its_own_pct() {
        let projection = project_plan(&allocation(), &AnswerSet::default(), 55.0);
        for bucket in &projection.buckets {
            let (min, max) = bucket.range;
            assert!(min <= bucket.pct as f64 && bucket.pct as f64 <= max);
            assert!(min >= 0.0 && max <= 100.0);
        }
    }

    #[test]
    fn higher_tolerance_widens_equity_ranges() {
        let cautious = project_plan(&allocation(), &AnswerSet::default(), 20.0);
        let bold = project_plan(&allocation(), &AnswerSet::default(), 80.0);
        let width = |p: &PlanProjection, class: AssetClass| {
            let b = p.buckets.iter().find(|b| b.class == class).unwrap();
            b.range.1 - b.range.0
        };
        assert!(width(&bold, AssetClass::Stocks) > width(&cautious, AssetClass::Stocks));
        // Defensive bands move the other way.
        assert!(width(&bold, AssetClass::Debt) < width(&cautious, AssetClass::Debt));
    }

    #[test]
    fn fragile_circumstances_tighten_the_multiplier() {
        let mut fragile = AnswerSet::default();
        fragile.investment_horizon = Horizon::UnderTwoYears;
        fragile.emergency_fund_months = EmergencyFundMonths::ZeroToOne;
        fragile.dependents = Dependents::FivePlus;
        fragile.has_insurance = false;
        fragile.job_stability = JobStability::NotStable;
        assert_eq!(context_multiplier(&fragile), 0.5);

        let mut flexible = AnswerSet::default();
        flexible.investment_horizon = Horizon::TwentyPlus;
        flexible.job_stability = JobStability::VeryStable;
        assert!((context_multiplier(&flexible) - 1.3).abs() < 1e-12);
    }

    #[test]
    fn ranges_respect_hard_class_bands() {
        let mut alloc = allocation();
        alloc.insert(AssetClass::Gold, 12);
        let projection = project_plan(&alloc, &AnswerSet::default(), 90.0);
        let gold = projection.buckets.iter().find(|b| b.class == AssetClass::Gold).unwrap();
        assert!(gold.range.1 <= 15.0);
        let re = projection
            .buckets
            .iter()
            .find(|b| b.class == AssetClass::RealEstate)
            .unwrap();
        assert!(re.range.1 <= 10.0);
    }

    #[test]
    fn projection_reports_the_risk_level_band() {
        let projection = project_plan(&allocation(), &AnswerSet::default(), 30.0);
        assert_eq!(projection.risk_level, RiskLevel::Conservative);
    }
}
