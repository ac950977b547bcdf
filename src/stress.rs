// =============================================================================
// Stress Tester — historical shock replay over the final allocation
// =============================================================================
//
// Scenarios are data: each row carries a per-class drop table, the historical
// evidence behind it and a recovery estimate. Adding a scenario means adding
// a row to SCENARIOS, not control flow.
//
// Classes a scenario does not cover fall back to documented defaults:
// Debt -5, Liquid 0, everything else -15.
// =============================================================================

use std::collections::BTreeMap;

use serde::Serialize;

use crate::answers::{AnswerSet, Dependents, EmergencyFundMonths, IncomeBand};
use crate::types::AssetClass;

/// One historical market shock.
pub struct StressScenario {
    pub name: &'static str,
    /// Percentage move per asset class during the scenario (negative = drop).
    pub drops: &'static [(AssetClass, f64)],
    pub evidence: &'static str,
    pub recovery: &'static str,
}

const SCENARIOS: &[StressScenario] = &[
    StressScenario {
        name: "2008 Financial Crisis",
        drops: &[
            (AssetClass::Stocks, -45.0),
            (AssetClass::MutualFunds, -38.0),
            (AssetClass::Debt, 2.0),
            (AssetClass::Gold, 24.0),
            (AssetClass::RealEstate, -25.0),
            (AssetClass::Liquid, 0.0),
        ],
        evidence: "Global equity indices halved while gold rallied as a flight-to-safety asset.",
        recovery: "Broad equity markets took roughly 4 years to reclaim their prior peak.",
    },
    StressScenario {
        name: "2020 Pandemic Shock",
        drops: &[
            (AssetClass::Stocks, -35.0),
            (AssetClass::MutualFunds, -30.0),
            (AssetClass::Debt, 8.0),
            (AssetClass::Gold, 18.0),
            (AssetClass::RealEstate, -15.0),
            (AssetClass::Liquid, 0.0),
        ],
        evidence: "Fastest bear market on record, cushioned by aggressive central-bank easing.",
        recovery: "Equities recovered within 6-9 months on unprecedented stimulus.",
    },
    StressScenario {
        name: "High Inflation (1970s-style)",
        drops: &[
            (AssetClass::Stocks, -15.0),
            (AssetClass::MutualFunds, -12.0),
            (AssetClass::Debt, -20.0),
            (AssetClass::Gold, 45.0),
            (AssetClass::RealEstate, 25.0),
            (AssetClass::Liquid, -8.0),
        ],
        evidence: "Sustained double-digit inflation eroded bonds and cash while hard assets surged.",
        recovery: "Real returns stayed depressed for most of a decade until inflation broke.",
    },
    StressScenario {
        name: "Interest Rate Spike",
        drops: &[
            (AssetClass::Stocks, -20.0),
            (AssetClass::MutualFunds, -18.0),
            (AssetClass::Debt, -15.0),
            (AssetClass::Gold, 5.0),
            (AssetClass::RealEstate, -30.0),
            (AssetClass::Liquid, 2.0),
        ],
        evidence: "Sharp rate rises repriced bonds and hit leveraged real estate hardest.",
        recovery: "Rate-sensitive assets stabilized within 1-2 years as hikes paused.",
    },
];

fn drop_for(scenario: &StressScenario, class: AssetClass) -> f64 {
    scenario
        .drops
        .iter()
        .find(|(c, _)| *c == class)
        .map(|(_, d)| *d)
        .unwrap_or(match class {
            AssetClass::Debt => -5.0,
            AssetClass::Liquid => 0.0,
            _ => -15.0,
        })
}

/// Outcome of one scenario against a concrete allocation.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    /// Portfolio-level move in percent (negative = loss).
    pub portfolio_impact: f64,
    /// Months of expenses covered after the shock, floored at zero.
    pub months_covered: f64,
    pub recommendation: &'static str,
    pub evidence: &'static str,
    pub recovery: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct StressTestResult {
    pub scenarios: Vec<ScenarioOutcome>,
}

/// Rough monthly expense estimate from the income band, scaled by a
/// dependents-driven expense ratio.
fn estimate_monthly_expenses(answers: &AnswerSet) -> f64 {
    let annual_income = match answers.annual_income {
        IncomeBand::Under50K => 35_000.0,
        IncomeBand::FiftyKToOneLakh => 75_000.0,
        IncomeBand::OneToTwoLakh | IncomeBand::Unknown => 150_000.0,
        IncomeBand::TwoToFiveLakh => 350_000.0,
        IncomeBand::FiveLakhPlus => 750_000.0,
    };

    let expense_ratio = match answers.dependents {
        Dependents::None => 0.6,
        Dependents::OneToTwo | Dependents::Unknown => 0.7,
        Dependents::ThreeToFour | Dependents::FivePlus => 0.8,
    };

    annual_income / 12.0 * expense_ratio
}

/// Emergency fund in currency terms: months-band midpoint times estimated
/// monthly expenses. Unknown assumes adequate coverage.
fn emergency_fund_value(answers: &AnswerSet, monthly_expenses: f64) -> f64 {
    let months = match answers.emergency_fund_months {
        EmergencyFundMonths::ZeroToOne => 0.5,
        EmergencyFundMonths::TwoToThree => 2.5,
        EmergencyFundMonths::FourToSix | EmergencyFundMonths::Unknown => 5.0,
        EmergencyFundMonths::SevenToTwelve => 9.0,
        EmergencyFundMonths::TwelvePlus => 15.0,
    };
    monthly_expenses * months
}

fn recommendation(portfolio_impact_fraction: f64, months_covered: f64) -> &'static str {
    if months_covered < 3.0 {
        "Consider increasing emergency fund before investing"
    } else if portfolio_impact_fraction < -0.30 {
        "Consider reducing equity exposure for this scenario"
    } else if portfolio_impact_fraction < -0.20 {
        "Portfolio within acceptable risk parameters"
    } else {
        "Portfolio shows good resilience"
    }
}

/// Replay every scenario against the integer allocation.
pub fn run_stress_test(
    allocation: &BTreeMap<AssetClass, u32>,
    answers: &AnswerSet,
) -> StressTestResult {
    let monthly_expenses = estimate_monthly_expenses(answers);
    let ef_value = emergency_fund_value(answers, monthly_expenses);

    let scenarios = SCENARIOS
        .iter()
        .map(|scenario| {
            let impact_fraction: f64 = allocation
                .iter()
                .map(|(class, pct)| (*pct as f64 / 100.0) * (drop_for(scenario, *class) / 100.0))
                .sum();

            let months_covered = ((ef_value + impact_fraction * answers.investment_amount)
                / monthly_expenses)
                .max(0.0);

            ScenarioOutcome {
                name: scenario.name,
                portfolio_impact: impact_fraction * 100.0,
                months_covered,
                recommendation: recommendation(impact_fraction, months_covered),
                evidence: scenario.evidence,
                recovery: scenario.recovery,
            }
        })
        .collect();

    StressTestResult { scenarios }
}

// =============================================================================
// Tests
// =============================================================================
