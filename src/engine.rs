// =============================================================================
// Recommendation Engine — orchestration of the full advisory pipeline
// =============================================================================
//
// Runs the fixed pipeline over one answer set:
//
//   signals -> dynamic base -> category splits -> goal pass -> avoid pass
//     -> insurance shift -> guardrails -> integer rounding
//     -> consistency audit -> rationale -> stress test
//
// Pure and infallible: any well-typed answer set, however sparse or
// contradictory, produces a complete result. Unknown answers fall back to
// their documented neutral signals instead of erroring.
// =============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::allocation;
use crate::answers::AnswerSet;
use crate::calibration::Calibration;
use crate::consistency::{self, ConsistencyWarning};
use crate::rationale;
use crate::signal_processor::calculate_signals;
use crate::stress::{self, StressTestResult};
use crate::types::{AssetClass, RiskProfile, Signal};

/// Everything the engine produces for one questionnaire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    /// Integer percentages per class, summing to exactly 100.
    pub allocation: BTreeMap<AssetClass, u32>,
    pub risk_score: f64,
    pub risk_profile: RiskProfile,
    pub signals: Vec<Signal>,
    pub rationale: Vec<String>,
    pub consistency_warnings: Vec<ConsistencyWarning>,
    pub consistency_score: u32,
    pub stress_test: StressTestResult,
}

/// Produce a full recommendation for one answer set.
pub fn generate_recommendation(answers: &AnswerSet, calibration: &Calibration) -> AllocationResult {
    let signals = calculate_signals(answers, calibration);

    let base = allocation::calculate_dynamic_base(&signals, calibration);
    debug!(
        equity_base = base.equity_base,
        risk_score = base.risk_score,
        "dynamic base computed"
    );

    let floats = allocation::build_allocation(base, answers);
    let floats = allocation::apply_goal_adjustments(floats, answers);
    let floats = allocation::redistribute_avoided(floats, answers);
    let floats = allocation::apply_insurance_adjustment(floats, answers, calibration);
    let floats = allocation::enforce_guardrails(floats, answers, calibration);
    let final_allocation = allocation::finalize(floats, answers, calibration);

    let warnings = consistency::validate(answers);
    let consistency_score =
        consistency::consistency_score(warnings.len(), calibration.warning_penalty);

    let rationale = rationale::generate(
        &final_allocation,
        &signals,
        answers,
        base.risk_score,
        &warnings,
    );
    let stress_test = stress::run_stress_test(&final_allocation, answers);

    AllocationResult {
        allocation: final_allocation,
        risk_score: base.risk_score,
        risk_profile: RiskProfile::from_score(base.risk_score),
        signals,
        rationale,
        consistency_warnings: warnings,
        consistency_score,
        stress_test,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{
        AgeBand, EmergencyFundMonths, Goal, Horizon, Knowledge, LiquidityNeeds, MaxLoss,
        VolatilityComfort,
    };
    use crate::types::RiskLevel;

    fn young_builder() -> AnswerSet {
        AnswerSet {
            age: AgeBand::Under25,
            investment_horizon: Horizon::TwentyPlus,
            primary_goal: Goal::WealthBuilding,
            volatility_comfort: VolatilityComfort::BuyMore,
            investment_knowledge: Knowledge::Experienced,
            emergency_fund_months: EmergencyFundMonths::SevenToTwelve,
            ..AnswerSet::default()
        }
    }

    fn retiree() -> AnswerSet {
        AnswerSet {
            age: AgeBand::Over65,
            investment_horizon: Horizon::UnderTwoYears,
            primary_goal: Goal::Preservation,
            volatility_comfort: VolatilityComfort::PanicSell,
            max_acceptable_loss: MaxLoss::FivePct,
            emergency_fund_months: EmergencyFundMonths::ZeroToOne,
            has_insurance: false,
            ..AnswerSet::default()
        }
    }

    fn profile_grid() -> Vec<AnswerSet> {
        let mut grid = vec![
            AnswerSet::default(),
            young_builder(),
            retiree(),
        ];
        for goal in [
            Goal::Retirement,
            Goal::IncomeGeneration,
            Goal::ChildEducation,
            Goal::HomePurchase,
            Goal::Unknown,
        ] {
            grid.push(AnswerSet { primary_goal: goal, ..AnswerSet::default() });
        }
        let mut uninsured = young_builder();
        uninsured.has_insurance = false;
        grid.push(uninsured);
        let mut avoider = AnswerSet::default();
        avoider.avoid_assets = vec![AssetClass::Gold, AssetClass::RealEstate];
        grid.push(avoider);
        let mut liquid_needy = AnswerSet::default();
        liquid_needy.liquidity_needs = LiquidityNeeds::Frequently;
        liquid_needy.withdrawal_next_2_years = true;
        grid.push(liquid_needy);
        grid
    }

    #[test]
    fn every_profile_sums_to_exactly_one_hundred() {
        let c = Calibration::default();
        for answers in profile_grid() {
            let result = generate_recommendation(&answers, &c);
            let total: u32 = result.allocation.values().sum();
            assert_eq!(total, 100, "profile {:?}", answers.primary_goal);
        }
    }

    #[test]
    fn guardrails_hold_on_the_integer_output() {
        let c = Calibration::default();
        for answers in profile_grid() {
            let result = generate_recommendation(&answers, &c);
            let a = &result.allocation;
            assert!(a[&AssetClass::Gold] <= 12);
            assert!(a[&AssetClass::RealEstate] <= 7);
            assert!(a[&AssetClass::Stocks] + a[&AssetClass::MutualFunds] <= 60);
            if !answers.avoids(AssetClass::Gold) {
                assert!(a[&AssetClass::Gold] >= 3);
            }
            if !answers.avoids(AssetClass::Liquid) {
                assert!(a[&AssetClass::Liquid] >= 5);
            }
        }
    }

    #[test]
    fn avoided_classes_end_at_zero() {
        let c = Calibration::default();
        let mut answers = AnswerSet::default();
        answers.avoid_assets = vec![AssetClass::Gold, AssetClass::RealEstate, AssetClass::Stocks];
        let result = generate_recommendation(&answers, &c);
        assert_eq!(result.allocation[&AssetClass::Gold], 0);
        assert_eq!(result.allocation[&AssetClass::RealEstate], 0);
        assert_eq!(result.allocation[&AssetClass::Stocks], 0);
        assert_eq!(result.allocation.values().sum::<u32>(), 100);
    }

    #[test]
    fn risk_score_sits_inside_its_profile_band() {
        let c = Calibration::default();
        for answers in profile_grid() {
            let result = generate_recommendation(&answers, &c);
            assert!(result.risk_score >= 0.0 && result.risk_score <= 100.0);
            let (lo, hi) = result.risk_profile.level.band();
            let score = result.risk_score.floor() as u32;
            assert!(score >= lo && score <= hi);
        }
    }

    #[test]
    fn young_builder_takes_more_equity_than_retiree() {
        let c = Calibration::default();
        let young = generate_recommendation(&young_builder(), &c);
        let old = generate_recommendation(&retiree(), &c);
        let equity = |r: &AllocationResult| {
            r.allocation[&AssetClass::Stocks] + r.allocation[&AssetClass::MutualFunds]
        };
        assert!(equity(&young) > equity(&old));
        assert_eq!(old.risk_profile.level, RiskLevel::Conservative);
        assert!(young.risk_profile.level > old.risk_profile.level);
        assert!(old.risk_score < young.risk_score);
    }

    #[test]
    fn identical_input_yields_byte_identical_output() {
        let c = Calibration::default();
        let answers = young_builder();
        let a = serde_json::to_string(&generate_recommendation(&answers, &c)).unwrap();
        let b = serde_json::to_string(&generate_recommendation(&answers, &c)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_insurance_lowers_equity_for_a_moderate_profile() {
        let c = Calibration::default();
        // Mid-range profile where the equity cap does not bind, so the
        // insurance shift is visible in the integer output.
        let mut insured = AnswerSet::default();
        insured.age = AgeBand::From35To45;
        insured.investment_horizon = Horizon::FiveToTen;
        let mut uninsured = insured.clone();
        uninsured.has_insurance = false;

        let with = generate_recommendation(&insured, &c);
        let without = generate_recommendation(&uninsured, &c);
        let equity = |r: &AllocationResult| {
            r.allocation[&AssetClass::Stocks] + r.allocation[&AssetClass::MutualFunds]
        };
        assert!(equity(&without) < equity(&with));
    }

    #[test]
    fn contradictory_answers_still_produce_a_complete_result() {
        let c = Calibration::default();
        let answers = AnswerSet {
            investment_horizon: Horizon::UnderTwoYears,
            primary_goal: Goal::WealthBuilding,
            emergency_fund_months: EmergencyFundMonths::ZeroToOne,
            ..AnswerSet::default()
        };
        let result = generate_recommendation(&answers, &c);
        assert!(!result.consistency_warnings.is_empty());
        assert!(result.consistency_score < 100);
        assert!(!result.rationale.is_empty());
        assert_eq!(result.stress_test.scenarios.len(), 4);
        assert_eq!(result.allocation.values().sum::<u32>(), 100);
    }

    #[test]
    fn empty_answer_set_gets_the_neutral_recommendation() {
        let c = Calibration::default();
        let answers: AnswerSet = serde_json::from_str("{}").unwrap();
        let result = generate_recommendation(&answers, &c);
        assert_eq!(result.allocation.values().sum::<u32>(), 100);
        assert!(!result.rationale.is_empty());
    }

    #[test]
    fn rationale_ends_with_warnings_when_present() {
        let c = Calibration::default();
        let answers = AnswerSet {
            investment_horizon: Horizon::UnderTwoYears,
            primary_goal: Goal::WealthBuilding,
            ..AnswerSet::default()
        };
        let result = generate_recommendation(&answers, &c);
        let last = result.rationale.last().unwrap();
        assert_eq!(last, result.consistency_warnings[0].message);
    }
}
