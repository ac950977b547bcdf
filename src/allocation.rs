// =============================================================================
// Allocation Calculator — signals to a concrete six-class portfolio
// =============================================================================
//
// A pipeline of pure `Allocation -> Allocation` transformations applied in a
// fixed order:
//
//   dynamic base -> equity/safety split -> goal tactical pass
//     -> avoided-asset redistribution -> insurance adjustment
//     -> guardrails -> largest-remainder rounding + integer sweep
//
// Every stage saturates instead of going negative, and the final output is a
// set of integer percentages summing to exactly 100 by construction.
// =============================================================================

use std::collections::BTreeMap;

use crate::answers::{AgeBand, AnswerSet, Goal, Horizon, Knowledge};
use crate::calibration::Calibration;
use crate::types::{Allocation, AssetClass, Signal};

// ---------------------------------------------------------------------------
// Dynamic base
// ---------------------------------------------------------------------------

/// The equity/safety split and risk score derived from the weighted signals.
#[derive(Debug, Clone, Copy)]
pub struct BaseAllocation {
    pub equity_base: f64,
    pub safety_base: f64,
    pub risk_score: f64,
}

/// Reduce the weighted signals to an equity/safety base split.
///
/// Both averages are weight-normalized so the result is insensitive to how
/// many signals fired. Safety pulls equity down at half strength (a strong
/// safety need mostly adds safety assets rather than removing equity), and
/// pulls the risk score down at 0.3 strength.
pub fn calculate_dynamic_base(signals: &[Signal], calibration: &Calibration) -> BaseAllocation {
    let mut equity_sum = 0.0;
    let mut safety_sum = 0.0;
    let mut weight_sum = 0.0;
    for signal in signals {
        equity_sum += signal.equity_signal * signal.weight;
        safety_sum += signal.safety_signal * signal.weight;
        weight_sum += signal.weight;
    }

    let (avg_equity, avg_safety) = if weight_sum > 0.0 {
        (equity_sum / weight_sum, safety_sum / weight_sum)
    } else {
        (0.0, 0.0)
    };

    let equity_base = (50.0 + avg_equity - 0.5 * avg_safety)
        .clamp(calibration.equity_base_floor, calibration.equity_base_ceiling);
    let risk_score = (50.0 + avg_equity - 0.3 * avg_safety)
        .clamp(calibration.risk_score_floor, calibration.risk_score_ceiling);

    BaseAllocation {
        equity_base,
        safety_base: 100.0 - equity_base,
        risk_score,
    }
}

// ---------------------------------------------------------------------------
// Category splits
// ---------------------------------------------------------------------------

/// Split the equity base between direct stocks and mutual funds.
///
/// Defaults to a fund-heavy 35/65; knowledge tilts toward direct stocks, and
/// wealth builders who are not yet retired take another 10 points of direct
/// exposure.
pub fn split_equity(equity_base: f64, answers: &AnswerSet) -> (f64, f64) {
    let mut stocks_ratio = match answers.investment_knowledge {
        Knowledge::Beginner => 0.25,
        Knowledge::SomeKnowledge | Knowledge::Unknown => 0.35,
        Knowledge::Experienced => 0.40,
        Knowledge::Expert => 0.50,
    };

    if answers.primary_goal == Goal::WealthBuilding && answers.age != AgeBand::Over65 {
        stocks_ratio += 0.10;
    }

    let stocks = equity_base * stocks_ratio;
    (stocks, equity_base - stocks)
}

/// Split the safety base across liquid, gold, real estate and debt.
pub fn split_safety(safety_base: f64, answers: &AnswerSet) -> (f64, f64, f64, f64) {
    let (mut liquid, mut gold, mut real_estate, mut debt): (f64, f64, f64, f64) = match answers.investment_horizon {
        // Short horizon: capital must stay reachable.
        Horizon::UnderTwoYears => (0.60, 0.15, 0.15, 0.10),
        // Very long horizon: illiquidity is affordable, favor real estate.
        Horizon::TwentyPlus => (0.25, 0.25, 0.35, 0.15),
        _ => (0.35, 0.20, 0.25, 0.20),
    };

    if answers.needs_liquidity_soon() {
        liquid = (liquid + 0.20).min(0.70);
        gold *= 0.8;
        real_estate *= 0.8;
        debt *= 0.8;
    }

    if answers.emergency_fund_months.is_thin() {
        liquid = (liquid + 0.15).min(0.60);
        gold *= 0.9;
        real_estate *= 0.9;
        debt *= 0.9;
    }

    let total = liquid + gold + real_estate + debt;
    (
        safety_base * liquid / total,
        safety_base * gold / total,
        safety_base * real_estate / total,
        safety_base * debt / total,
    )
}

/// Assemble the first full allocation from the base split.
pub fn build_allocation(base: BaseAllocation, answers: &AnswerSet) -> Allocation {
    let (stocks, mutual_funds) = split_equity(base.equity_base, answers);
    let (liquid, gold, real_estate, debt) = split_safety(base.safety_base, answers);

    let mut allocation = Allocation::zero();
    allocation.set(AssetClass::Stocks, stocks);
    allocation.set(AssetClass::MutualFunds, mutual_funds);
    allocation.set(AssetClass::Gold, gold);
    allocation.set(AssetClass::RealEstate, real_estate);
    allocation.set(AssetClass::Debt, debt);
    allocation.set(AssetClass::Liquid, liquid);
    allocation
}

// ---------------------------------------------------------------------------
// Goal tactical pass
// ---------------------------------------------------------------------------

/// Per-category floor/ceiling applied to every goal-adjusted class.
const GOAL_ADJUST_MIN: f64 = 5.0;
const GOAL_ADJUST_MAX: f64 = 45.0;

/// Fixed tactical deltas per goal. Each touched class is clamped to
/// [5, 45] before the whole allocation is rescaled to 100.
pub fn apply_goal_adjustments(allocation: Allocation, answers: &AnswerSet) -> Allocation {
    let deltas: &[(AssetClass, f64)] = match answers.primary_goal {
        Goal::WealthBuilding => &[
            (AssetClass::Stocks, 5.0),
            (AssetClass::MutualFunds, 5.0),
            (AssetClass::Liquid, -10.0),
        ],
        Goal::HomePurchase => &[
            (AssetClass::Liquid, 15.0),
            (AssetClass::Stocks, -8.0),
            (AssetClass::MutualFunds, -7.0),
        ],
        Goal::IncomeGeneration => &[
            (AssetClass::Debt, 10.0),
            (AssetClass::MutualFunds, 5.0),
            (AssetClass::Stocks, -15.0),
        ],
        Goal::Preservation => &[
            (AssetClass::Debt, 10.0),
            (AssetClass::Gold, 5.0),
            (AssetClass::Stocks, -10.0),
            (AssetClass::MutualFunds, -5.0),
        ],
        Goal::Retirement | Goal::ChildEducation | Goal::Unknown => &[],
    };

    if deltas.is_empty() {
        return allocation;
    }

    let mut out = allocation;
    for &(class, delta) in deltas {
        let adjusted = (out.get(class) + delta).clamp(GOAL_ADJUST_MIN, GOAL_ADJUST_MAX);
        out.set(class, adjusted);
    }
    out.scaled_to_100()
}

// ---------------------------------------------------------------------------
// Avoided assets
// ---------------------------------------------------------------------------

/// Zero every avoided class and hand its percentage to the remaining
/// non-zero classes proportionally.
///
/// If the avoid list covers everything with a balance there is nothing left
/// to receive the redistribution, so the request cannot be honored and the
/// allocation is returned unchanged.
pub fn redistribute_avoided(allocation: Allocation, answers: &AnswerSet) -> Allocation {
    if answers.avoid_assets.is_empty() {
        return allocation;
    }

    let mut out = allocation;
    let mut freed = 0.0;
    for class in AssetClass::ALL {
        if answers.avoids(class) {
            freed += out.get(class);
            out.set(class, 0.0);
        }
    }

    if freed <= 0.0 {
        return out;
    }

    let remaining_total: f64 = AssetClass::ALL
        .iter()
        .filter(|class| !answers.avoids(**class))
        .map(|class| out.get(*class))
        .sum();

    if remaining_total <= f64::EPSILON {
        return allocation;
    }

    for class in AssetClass::ALL {
        if !answers.avoids(class) {
            let share = out.get(class) / remaining_total;
            out.add(class, freed * share);
        }
    }

    out.scaled_to_100()
}

// ---------------------------------------------------------------------------
// Insurance adjustment
// ---------------------------------------------------------------------------

/// Uninsured investors get equity shifted toward liquidity and debt instead
/// of a flat score penalty: up to `insurance_equity_shift` points come out of
/// Stocks/Mutual Funds proportionally, two thirds landing in Liquid and one
/// third in Debt.
pub fn apply_insurance_adjustment(
    allocation: Allocation,
    answers: &AnswerSet,
    calibration: &Calibration,
) -> Allocation {
    if answers.has_insurance {
        return allocation;
    }

    let equity = allocation.equity_total();
    if equity <= 0.0 {
        return allocation;
    }

    let cut = calibration.insurance_equity_shift.min(equity);
    let stocks_fraction = allocation.get(AssetClass::Stocks) / equity;

    let mut out = allocation;
    out.add(AssetClass::Stocks, -cut * stocks_fraction);
    out.add(AssetClass::MutualFunds, -cut * (1.0 - stocks_fraction));

    // Liquid takes the larger share of the shift; both receivers respect the
    // avoid set.
    let to_liquid = cut * 2.0 / 3.0;
    let to_debt = cut - to_liquid;
    match (answers.avoids(AssetClass::Liquid), answers.avoids(AssetClass::Debt)) {
        (false, false) => {
            out.add(AssetClass::Liquid, to_liquid);
            out.add(AssetClass::Debt, to_debt);
        }
        (false, true) => out.add(AssetClass::Liquid, cut),
        (true, false) => out.add(AssetClass::Debt, cut),
        (true, true) => return allocation,
    }

    out.scaled_to_100()
}

// ---------------------------------------------------------------------------
// Guardrails
// ---------------------------------------------------------------------------

/// Hard per-class floors and ceilings, applied last before rounding.
///
/// Every guardrail is a transfer (the total never changes): floors pull from
/// Debt, ceilings push their excess into Debt, and a Debt overflow spills
/// into Liquid. Avoided classes are exempt — the avoid invariant always wins
/// over a floor.
pub fn enforce_guardrails(
    allocation: Allocation,
    answers: &AnswerSet,
    calibration: &Calibration,
) -> Allocation {
    let mut out = allocation;

    let raise_from_debt = |out: &mut Allocation, class: AssetClass, floor: f64| {
        let need = floor - out.get(class);
        if need > 0.0 {
            let take = need.min(out.get(AssetClass::Debt));
            out.add(AssetClass::Debt, -take);
            out.add(class, take);
        }
    };
    let cut_to_debt = |out: &mut Allocation, class: AssetClass, cap: f64| {
        let excess = out.get(class) - cap;
        if excess > 0.0 {
            out.add(class, -excess);
            out.add(AssetClass::Debt, excess);
        }
    };

    if !answers.avoids(AssetClass::Liquid) {
        raise_from_debt(&mut out, AssetClass::Liquid, calibration.liquid_floor);
    }
    if !answers.avoids(AssetClass::Gold) {
        raise_from_debt(&mut out, AssetClass::Gold, calibration.gold_floor);
        cut_to_debt(&mut out, AssetClass::Gold, calibration.gold_cap);
    }
    if !answers.avoids(AssetClass::RealEstate) {
        cut_to_debt(&mut out, AssetClass::RealEstate, calibration.real_estate_cap);
    }

    // Global equity cap, cut pro-rata between the two equity classes.
    let equity = out.equity_total();
    if equity > calibration.equity_cap {
        let cut = equity - calibration.equity_cap;
        let stocks_fraction = out.get(AssetClass::Stocks) / equity;
        out.add(AssetClass::Stocks, -cut * stocks_fraction);
        out.add(AssetClass::MutualFunds, -cut * (1.0 - stocks_fraction));
        if !answers.avoids(AssetClass::Debt) {
            out.add(AssetClass::Debt, cut);
        } else if !answers.avoids(AssetClass::Liquid) {
            out.add(AssetClass::Liquid, cut);
        } else {
            // Nowhere to put the excess without breaking the avoid
            // invariant; give it back.
            out.add(AssetClass::Stocks, cut * stocks_fraction);
            out.add(AssetClass::MutualFunds, cut * (1.0 - stocks_fraction));
        }
    }

    // Debt overflow spills into Liquid.
    let debt_excess = out.get(AssetClass::Debt) - calibration.debt_cap;
    if debt_excess > 0.0 && !answers.avoids(AssetClass::Liquid) {
        out.add(AssetClass::Debt, -debt_excess);
        out.add(AssetClass::Liquid, debt_excess);
    }

    out
}

// ---------------------------------------------------------------------------
// Final rounding
// ---------------------------------------------------------------------------

/// Round to integers and re-assert the guardrail caps on the integer output.
///
/// Largest-remainder rounding can hand a leftover unit to a class sitting
/// exactly on its cap (two .5 remainders inside a capped equity total), so a
/// final sweep moves whole excess points into the first non-avoided receiver
/// with headroom.
pub fn finalize(
    allocation: Allocation,
    answers: &AnswerSet,
    calibration: &Calibration,
) -> BTreeMap<AssetClass, u32> {
    let mut rounded = allocation.round_largest_remainder();

    let receiver = |rounded: &BTreeMap<AssetClass, u32>, exclude: &[AssetClass]| {
        [AssetClass::Debt, AssetClass::Liquid, AssetClass::MutualFunds, AssetClass::Stocks]
            .into_iter()
            .find(|class| {
                !answers.avoids(*class)
                    && !exclude.contains(class)
                    && headroom(rounded, *class, calibration) > 0
            })
    };

    // Equity cap.
    let equity_cap = calibration.equity_cap.floor() as u32;
    let mut equity = rounded[&AssetClass::Stocks] + rounded[&AssetClass::MutualFunds];
    while equity > equity_cap {
        let from = if rounded[&AssetClass::Stocks] >= rounded[&AssetClass::MutualFunds] {
            AssetClass::Stocks
        } else {
            AssetClass::MutualFunds
        };
        let Some(to) = receiver(&rounded, &[AssetClass::Stocks, AssetClass::MutualFunds]) else {
            break;
        };
        *rounded.get_mut(&from).unwrap() -= 1;
        *rounded.get_mut(&to).unwrap() += 1;
        equity -= 1;
    }

    // Per-class ceilings.
    for (class, cap) in [
        (AssetClass::Gold, calibration.gold_cap.floor() as u32),
        (AssetClass::RealEstate, calibration.real_estate_cap.floor() as u32),
        (AssetClass::Debt, calibration.debt_cap.floor() as u32),
    ] {
        while rounded[&class] > cap {
            let Some(to) = receiver(&rounded, &[class]) else {
                break;
            };
            *rounded.get_mut(&class).unwrap() -= 1;
            *rounded.get_mut(&to).unwrap() += 1;
        }
    }

    rounded
}

/// How many whole points `class` can still absorb under its cap.
fn headroom(rounded: &BTreeMap<AssetClass, u32>, class: AssetClass, c: &Calibration) -> u32 {
    let current = rounded[&class];
    let cap = match class {
        AssetClass::Stocks | AssetClass::MutualFunds => {
            let equity = rounded[&AssetClass::Stocks] + rounded[&AssetClass::MutualFunds];
            return (c.equity_cap.floor() as u32).saturating_sub(equity);
        }
        AssetClass::Gold => c.gold_cap.floor() as u32,
        AssetClass::RealEstate => c.real_estate_cap.floor() as u32,
        AssetClass::Debt => c.debt_cap.floor() as u32,
        AssetClass::Liquid => 100,
    };
    cap.saturating_sub(current)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{EmergencyFundMonths, LiquidityNeeds, VolatilityComfort};
    use crate::signal_processor::calculate_signals;
    use crate::types::allocation_from;

    fn aggressive_answers() -> AnswerSet {
        AnswerSet {
            age: AgeBand::Under25,
            investment_horizon: Horizon::TwentyPlus,
            primary_goal: Goal::WealthBuilding,
            volatility_comfort: VolatilityComfort::BuyMore,
            investment_knowledge: Knowledge::Experienced,
            ..AnswerSet::default()
        }
    }

    fn conservative_answers() -> AnswerSet {
        AnswerSet {
            age: AgeBand::Over65,
            investment_horizon: Horizon::UnderTwoYears,
            primary_goal: Goal::Preservation,
            volatility_comfort: VolatilityComfort::PanicSell,
            ..AnswerSet::default()
        }
    }

    #[test]
    fn base_stays_within_bounds_for_extreme_profiles() {
        let c = Calibration::default();
        for answers in [aggressive_answers(), conservative_answers()] {
            let signals = calculate_signals(&answers, &c);
            let base = calculate_dynamic_base(&signals, &c);
            assert!(base.equity_base >= 10.0 && base.equity_base <= 85.0);
            assert!((base.equity_base + base.safety_base - 100.0).abs() < 1e-9);
            assert!(base.risk_score >= 10.0 && base.risk_score <= 90.0);
        }
    }

    #[test]
    fn aggressive_profile_scores_higher_than_conservative() {
        let c = Calibration::default();
        let aggressive = calculate_dynamic_base(&calculate_signals(&aggressive_answers(), &c), &c);
        let conservative =
            calculate_dynamic_base(&calculate_signals(&conservative_answers(), &c), &c);
        assert!(aggressive.risk_score > conservative.risk_score);
        assert!(aggressive.equity_base > conservative.equity_base);
    }

    #[test]
    fn empty_signal_list_yields_neutral_base() {
        let c = Calibration::default();
        let base = calculate_dynamic_base(&[], &c);
        assert_eq!(base.equity_base, 50.0);
        assert_eq!(base.risk_score, 50.0);
    }

    #[test]
    fn expert_takes_more_direct_stock_exposure_than_beginner() {
        let mut a = AnswerSet::default();
        a.investment_knowledge = Knowledge::Expert;
        let (expert_stocks, _) = split_equity(50.0, &a);
        a.investment_knowledge = Knowledge::Beginner;
        let (beginner_stocks, _) = split_equity(50.0, &a);
        assert!(expert_stocks > beginner_stocks);
        assert_eq!(expert_stocks, 25.0);
        assert_eq!(beginner_stocks, 12.5);
    }

    #[test]
    fn short_horizon_safety_is_liquid_heavy() {
        let mut a = AnswerSet::default();
        a.investment_horizon = Horizon::UnderTwoYears;
        let (liquid, gold, real_estate, debt) = split_safety(40.0, &a);
        assert!(liquid > gold + real_estate);
        assert!((liquid + gold + real_estate + debt - 40.0).abs() < 1e-9);
    }

    #[test]
    fn frequent_liquidity_needs_shift_safety_toward_liquid() {
        let mut a = AnswerSet::default();
        let (base_liquid, ..) = split_safety(40.0, &a);
        a.liquidity_needs = LiquidityNeeds::Frequently;
        let (bumped_liquid, ..) = split_safety(40.0, &a);
        assert!(bumped_liquid > base_liquid);
    }

    #[test]
    fn thin_emergency_fund_shifts_safety_toward_liquid() {
        let mut a = AnswerSet::default();
        let (base_liquid, ..) = split_safety(40.0, &a);
        a.emergency_fund_months = EmergencyFundMonths::TwoToThree;
        let (bumped_liquid, ..) = split_safety(40.0, &a);
        assert!(bumped_liquid > base_liquid);
    }

    #[test]
    fn home_purchase_goal_boosts_liquid() {
        let allocation = allocation_from(&[
            (AssetClass::Stocks, 25.0),
            (AssetClass::MutualFunds, 30.0),
            (AssetClass::Gold, 8.0),
            (AssetClass::RealEstate, 7.0),
            (AssetClass::Debt, 15.0),
            (AssetClass::Liquid, 15.0),
        ]);
        let mut a = AnswerSet::default();
        a.primary_goal = Goal::HomePurchase;
        let adjusted = apply_goal_adjustments(allocation, &a);
        assert!(adjusted.get(AssetClass::Liquid) > allocation.get(AssetClass::Liquid));
        assert!(adjusted.get(AssetClass::Stocks) < allocation.get(AssetClass::Stocks));
        assert!((adjusted.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn avoided_classes_are_zeroed_and_redistributed() {
        let allocation = allocation_from(&[
            (AssetClass::Stocks, 30.0),
            (AssetClass::MutualFunds, 30.0),
            (AssetClass::Gold, 10.0),
            (AssetClass::RealEstate, 10.0),
            (AssetClass::Debt, 10.0),
            (AssetClass::Liquid, 10.0),
        ]);
        let mut a = AnswerSet::default();
        a.avoid_assets = vec![AssetClass::Gold, AssetClass::RealEstate];
        let out = redistribute_avoided(allocation, &a);
        assert_eq!(out.get(AssetClass::Gold), 0.0);
        assert_eq!(out.get(AssetClass::RealEstate), 0.0);
        assert!((out.total() - 100.0).abs() < 1e-9);
        // The freed 20 points land proportionally on the rest.
        assert!(out.get(AssetClass::Stocks) > 30.0);
        assert!(out.get(AssetClass::Liquid) > 10.0);
    }

    #[test]
    fn avoiding_everything_cannot_be_honored() {
        let allocation = allocation_from(&[
            (AssetClass::Stocks, 50.0),
            (AssetClass::Debt, 50.0),
        ]);
        let mut a = AnswerSet::default();
        a.avoid_assets = AssetClass::ALL.to_vec();
        let out = redistribute_avoided(allocation, &a);
        assert_eq!(out, allocation);
    }

    #[test]
    fn insurance_adjustment_moves_equity_to_liquid_and_debt() {
        let allocation = allocation_from(&[
            (AssetClass::Stocks, 30.0),
            (AssetClass::MutualFunds, 30.0),
            (AssetClass::Gold, 10.0),
            (AssetClass::RealEstate, 5.0),
            (AssetClass::Debt, 10.0),
            (AssetClass::Liquid, 15.0),
        ]);
        let c = Calibration::default();
        let mut a = AnswerSet::default();
        a.has_insurance = false;
        let out = apply_insurance_adjustment(allocation, &a, &c);
        assert!(out.equity_total() < allocation.equity_total());
        assert!(
            out.get(AssetClass::Liquid) + out.get(AssetClass::Debt)
                > allocation.get(AssetClass::Liquid) + allocation.get(AssetClass::Debt)
        );
        assert!((out.total() - 100.0).abs() < 1e-9);

        a.has_insurance = true;
        assert_eq!(apply_insurance_adjustment(allocation, &a, &c), allocation);
    }

    #[test]
    fn guardrails_clamp_gold_and_real_estate() {
        let allocation = allocation_from(&[
            (AssetClass::Stocks, 20.0),
            (AssetClass::MutualFunds, 20.0),
            (AssetClass::Gold, 20.0),
            (AssetClass::RealEstate, 15.0),
            (AssetClass::Debt, 15.0),
            (AssetClass::Liquid, 10.0),
        ]);
        let c = Calibration::default();
        let a = AnswerSet::default();
        let out = enforce_guardrails(allocation, &a, &c);
        assert!(out.get(AssetClass::Gold) <= 12.0);
        assert!(out.get(AssetClass::RealEstate) <= 7.0);
        assert!((out.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn guardrails_cap_total_equity() {
        let allocation = allocation_from(&[
            (AssetClass::Stocks, 40.0),
            (AssetClass::MutualFunds, 35.0),
            (AssetClass::Gold, 5.0),
            (AssetClass::RealEstate, 5.0),
            (AssetClass::Debt, 5.0),
            (AssetClass::Liquid, 10.0),
        ]);
        let c = Calibration::default();
        let a = AnswerSet::default();
        let out = enforce_guardrails(allocation, &a, &c);
        assert!(out.equity_total() <= 60.0 + 1e-9);
        assert!((out.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn guardrail_floors_skip_avoided_classes() {
        let allocation = allocation_from(&[
            (AssetClass::Stocks, 40.0),
            (AssetClass::MutualFunds, 20.0),
            (AssetClass::Debt, 30.0),
            (AssetClass::Liquid, 10.0),
        ]);
        let c = Calibration::default();
        let mut a = AnswerSet::default();
        a.avoid_assets = vec![AssetClass::Gold];
        let out = enforce_guardrails(allocation, &a, &c);
        assert_eq!(out.get(AssetClass::Gold), 0.0);
    }

    #[test]
    fn finalize_resolves_rounding_past_the_equity_cap() {
        // Float equity sits exactly on the cap; the .5 remainders would round
        // both equity classes up without the integer sweep.
        let allocation = allocation_from(&[
            (AssetClass::Stocks, 35.5),
            (AssetClass::MutualFunds, 24.5),
            (AssetClass::Gold, 3.2),
            (AssetClass::RealEstate, 7.0),
            (AssetClass::Debt, 20.3),
            (AssetClass::Liquid, 9.5),
        ]);
        let c = Calibration::default();
        let a = AnswerSet::default();
        let out = finalize(allocation, &a, &c);
        assert_eq!(out.values().sum::<u32>(), 100);
        assert!(out[&AssetClass::Stocks] + out[&AssetClass::MutualFunds] <= 60);
        assert!(out[&AssetClass::Gold] <= 12);
        assert!(out[&AssetClass::RealEstate] <= 7);
    }
}
