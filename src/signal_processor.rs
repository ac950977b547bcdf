// =============================================================================
// Signal Processor — weighted multi-factor signal assembly
// =============================================================================
//
// Converts an answer set into the weighted signal list the allocation
// calculator consumes. Three passes, in order:
//   1. Factor weighting — fixed base weights, with the age/horizon split
//      shifted by the primary goal (the goal's own weight never moves).
//   2. Knowledge multiplier — one multiplier on every component, each
//      component capped afterwards so experience never dominates.
//   3. Goal tactical edits — small per-goal reshaping of individual signals.
//
// Pure: same answers + calibration always produce the same signal list.
// =============================================================================

use crate::answers::{AnswerSet, Goal, Horizon};
use crate::calibration::Calibration;
use crate::signal_catalog as catalog;
use crate::types::Signal;

// ---------------------------------------------------------------------------
// Factor weights
// ---------------------------------------------------------------------------

/// Per-factor weights. Base values sum to 1.0 and every goal-driven shift is
/// a pure transfer between age and horizon, so the sum is invariant.
#[derive(Debug, Clone, Copy)]
pub struct FactorWeights {
    pub age: f64,
    pub horizon: f64,
    pub dependents: f64,
    pub emergency_fund: f64,
    pub volatility: f64,
    pub loss_tolerance: f64,
    pub goal: f64,
    pub insurance: f64,
}

impl FactorWeights {
    const BASE: FactorWeights = FactorWeights {
        age: 0.25,
        horizon: 0.25,
        dependents: 0.075,
        emergency_fund: 0.075,
        volatility: 0.075,
        loss_tolerance: 0.075,
        goal: 0.15,
        insurance: 0.05,
    };

    /// Weights for the given primary goal.
    ///
    /// Retirement leans on horizon; goals with a fixed external date (child
    /// education, home purchase) lean harder on horizon; income and
    /// preservation goals lean on the investor's life stage instead.
    pub fn for_goal(goal: Goal, calibration: &Calibration) -> Self {
        let mut w = Self::BASE;
        match goal {
            Goal::Retirement => {
                w.horizon += calibration.retirement_horizon_shift;
                w.age -= calibration.retirement_horizon_shift;
            }
            Goal::ChildEducation | Goal::HomePurchase => {
                w.horizon += calibration.timeline_goal_horizon_shift;
                w.age -= calibration.timeline_goal_horizon_shift;
            }
            Goal::IncomeGeneration | Goal::Preservation => {
                w.age += calibration.stability_goal_age_shift;
                w.horizon -= calibration.stability_goal_age_shift;
            }
            Goal::WealthBuilding | Goal::Unknown => {}
        }
        w
    }

    pub fn sum(&self) -> f64 {
        self.age
            + self.horizon
            + self.dependents
            + self.emergency_fund
            + self.volatility
            + self.loss_tolerance
            + self.goal
            + self.insurance
    }
}

// ---------------------------------------------------------------------------
// Signal assembly
// ---------------------------------------------------------------------------

fn make_signal(factor: &'static str, entry: catalog::FactorEntry, weight: f64) -> Signal {
    Signal {
        factor,
        equity_signal: entry.equity,
        safety_signal: entry.safety,
        weight,
        explanation: entry.explanation,
    }
}

/// Produce the full weighted signal list for an answer set.
pub fn calculate_signals(answers: &AnswerSet, calibration: &Calibration) -> Vec<Signal> {
    let weights = FactorWeights::for_goal(answers.primary_goal, calibration);

    let mut signals = vec![
        make_signal("age", catalog::age_entry(answers.age), weights.age),
        make_signal(
            "investment_horizon",
            catalog::horizon_entry(answers.investment_horizon),
            weights.horizon,
        ),
        make_signal(
            "dependents",
            catalog::dependents_entry(answers.dependents),
            weights.dependents,
        ),
        make_signal(
            "emergency_fund",
            catalog::emergency_fund_entry(answers.emergency_fund_months),
            weights.emergency_fund,
        ),
        make_signal(
            "volatility_comfort",
            catalog::volatility_entry(answers.volatility_comfort),
            weights.volatility,
        ),
        make_signal(
            "loss_tolerance",
            catalog::loss_tolerance_entry(answers.max_acceptable_loss),
            weights.loss_tolerance,
        ),
        make_signal(
            "primary_goal",
            catalog::goal_entry(answers.primary_goal),
            weights.goal,
        ),
        make_signal(
            "insurance",
            catalog::insurance_entry(answers.has_insurance),
            weights.insurance,
        ),
    ];

    apply_knowledge_multiplier(&mut signals, answers, calibration);
    apply_goal_edits(&mut signals, answers, calibration);

    signals
}

/// Scale every component by the knowledge multiplier, then clamp each to the
/// calibration cap so the multiplier models experience without dominating.
fn apply_knowledge_multiplier(
    signals: &mut [Signal],
    answers: &AnswerSet,
    calibration: &Calibration,
) {
    let multiplier = calibration.knowledge_multiplier(answers.investment_knowledge);
    let cap = calibration.signal_component_cap;
    for signal in signals.iter_mut() {
        signal.equity_signal = (signal.equity_signal * multiplier).clamp(-cap, cap);
        signal.safety_signal = (signal.safety_signal * multiplier).clamp(-cap, cap);
    }
}

/// Goal-specific tactical reshaping of individual signals.
fn apply_goal_edits(signals: &mut [Signal], answers: &AnswerSet, calibration: &Calibration) {
    let cap = calibration.tactical_signal_cap;

    match answers.primary_goal {
        // Education money has a hard deadline: dampen whatever confidence the
        // investor has about riding out volatility.
        Goal::ChildEducation => {
            if let Some(s) = find_mut(signals, "volatility_comfort") {
                s.equity_signal = (s.equity_signal * 0.8).clamp(-cap, cap);
                s.safety_signal = (s.safety_signal * 1.2).clamp(-cap, cap);
            }
        }
        // A down payment amplifies the cost of a thin emergency fund.
        Goal::HomePurchase => {
            if let Some(s) = find_mut(signals, "emergency_fund") {
                s.safety_signal = (s.safety_signal * 1.3).clamp(-cap, cap);
            }
        }
        // Retirement with a decade-plus runway lets youth count for more.
        Goal::Retirement if answers.investment_horizon.is_long() => {
            if let Some(s) = find_mut(signals, "age") {
                if s.equity_signal > 0.0 {
                    s.equity_signal = (s.equity_signal * 1.1).min(cap);
                }
            }
        }
        _ => {}
    }
}

fn find_mut<'a>(signals: &'a mut [Signal], factor: &str) -> Option<&'a mut Signal> {
    signals.iter_mut().find(|s| s.factor == factor)
}

// =============================================================================
// Tests
// =============================================================================
