// =============================================================================
// Rationale Generator — deterministic advisor-style narrative
// =============================================================================
//
// Assembles the explanation list in a fixed order:
//   1. lead statement from the dominant signal (largest |equity × weight|,
//      first-in-order wins ties)
//   2. risk-level implication from the total equity percentage
//   3. goal-alignment sentence quoting the actual allocated percentages
//   4. special-circumstance sentences, when present
//   5. asset-by-asset construction breakdown
//   6. behavioral warnings, critical first, verbatim
//
// Same inputs always produce the byte-identical string list.
// =============================================================================

use std::collections::BTreeMap;

use crate::answers::{
    AgeBand, AnswerSet, Dependents, EmergencyFundMonths, Goal, JobStability, VolatilityComfort,
};
use crate::consistency::{ConsistencyWarning, Severity};
use crate::types::{AssetClass, RiskLevel, Signal};

/// Build the full ordered rationale.
pub fn generate(
    allocation: &BTreeMap<AssetClass, u32>,
    signals: &[Signal],
    answers: &AnswerSet,
    risk_score: f64,
    warnings: &[ConsistencyWarning],
) -> Vec<String> {
    let mut rationale = Vec::with_capacity(6 + warnings.len());

    if let Some(dominant) = dominant_signal(signals) {
        rationale.push(leading_statement(dominant, answers));
    }

    rationale.push(risk_explanation(risk_score, allocation, answers));
    rationale.push(goal_alignment(answers.primary_goal, allocation));

    rationale.extend(special_circumstances(answers, allocation));

    rationale.push(construction_line(allocation));

    for severity in [Severity::Critical, Severity::Warning] {
        for warning in warnings.iter().filter(|w| w.severity == severity) {
            rationale.push(warning.message.to_string());
        }
    }

    rationale
}

/// The signal with the largest weighted equity magnitude. Ties keep the
/// earlier signal so the output stays order-stable.
fn dominant_signal(signals: &[Signal]) -> Option<&Signal> {
    signals.iter().reduce(|max, signal| {
        if (signal.equity_signal * signal.weight).abs() > (max.equity_signal * max.weight).abs() {
            signal
        } else {
            max
        }
    })
}

fn leading_statement(dominant: &Signal, answers: &AnswerSet) -> String {
    match dominant.factor {
        "age" => match answers.age {
            AgeBand::Under25 => {
                "At your young age, you have decades to build wealth through equity markets."
            }
            AgeBand::From25To35 => {
                "You're in prime wealth-building years with excellent capacity for growth investments."
            }
            AgeBand::From35To45 => {
                "Your peak earning phase allows for significant equity exposure while building long-term wealth."
            }
            AgeBand::From45To55 => {
                "As you approach retirement planning, we're balancing growth with gradual stability increases."
            }
            AgeBand::From55To65 => {
                "Nearing retirement, your portfolio emphasizes preservation while maintaining some growth potential."
            }
            AgeBand::Over65 => {
                "In retirement, capital preservation and income generation are your primary priorities."
            }
            AgeBand::Unknown => dominant.explanation,
        }
        .to_string(),
        "primary_goal" => match answers.primary_goal {
            Goal::Retirement => {
                "Your retirement planning strategy balances long-term growth with progressive risk reduction."
            }
            Goal::WealthBuilding => {
                "For wealth building, we're emphasizing growth-oriented assets to maximize long-term returns."
            }
            Goal::IncomeGeneration => {
                "Your income focus requires stable, yield-generating investments for regular cash flow."
            }
            Goal::HomePurchase => {
                "For your home purchase goal, we're prioritizing capital preservation and liquidity."
            }
            Goal::ChildEducation => {
                "Education planning needs predictable growth while preserving capital as the timeline approaches."
            }
            Goal::Preservation => {
                "Capital preservation takes priority, focusing on stability over aggressive growth."
            }
            Goal::Unknown => dominant.explanation,
        }
        .to_string(),
        _ => dominant.explanation.to_string(),
    }
}

fn risk_explanation(
    risk_score: f64,
    allocation: &BTreeMap<AssetClass, u32>,
    answers: &AnswerSet,
) -> String {
    let equity_total = allocation[&AssetClass::Stocks] + allocation[&AssetClass::MutualFunds];

    match RiskLevel::from_score(risk_score) {
        RiskLevel::Aggressive => format!(
            "Your {}% equity allocation reflects your comfort with volatility and long-term \
             growth focus, supported by your {} approach to market fluctuations.",
            equity_total,
            volatility_phrase(answers.volatility_comfort),
        ),
        RiskLevel::Conservative => format!(
            "The conservative {}% allocation to safety assets provides stability aligned with \
             your risk comfort level and circumstances.",
            100 - equity_total.min(100),
        ),
        RiskLevel::Moderate => format!(
            "This balanced {}% equity approach provides growth potential while maintaining \
             appropriate safety buffers for your situation.",
            equity_total,
        ),
    }
}

fn volatility_phrase(comfort: VolatilityComfort) -> &'static str {
    match comfort {
        VolatilityComfort::PanicSell => "panic sell",
        VolatilityComfort::VeryUncomfortable => "very uncomfortable",
        VolatilityComfort::SomewhatConcerned => "somewhat concerned",
        VolatilityComfort::StayCalm => "stay calm",
        VolatilityComfort::BuyMore => "buy more",
        VolatilityComfort::Unknown => "measured",
    }
}

fn goal_alignment(goal: Goal, allocation: &BTreeMap<AssetClass, u32>) -> String {
    let pct = |class: AssetClass| allocation[&class];
    match goal {
        Goal::Retirement => format!(
            "The {}% allocation to income-generating and hedge assets supports your retirement timeline.",
            pct(AssetClass::Debt) + pct(AssetClass::Gold),
        ),
        Goal::WealthBuilding => format!(
            "Heavy equity weighting of {}% maximizes long-term wealth accumulation potential.",
            pct(AssetClass::Stocks) + pct(AssetClass::MutualFunds),
        ),
        Goal::IncomeGeneration => format!(
            "{}% in debt instruments provides the steady income stream you're seeking.",
            pct(AssetClass::Debt),
        ),
        Goal::HomePurchase => format!(
            "{}% in liquid assets ensures capital availability for your home purchase timeline.",
            pct(AssetClass::Liquid),
        ),
        Goal::ChildEducation => {
            "Balanced approach preserves capital while generating growth for education expenses."
                .to_string()
        }
        Goal::Preservation => format!(
            "{}% in preservation assets protects your capital from market volatility.",
            pct(AssetClass::Debt) + pct(AssetClass::Gold) + pct(AssetClass::Liquid),
        ),
        Goal::Unknown => "This allocation aligns with your stated investment objectives.".to_string(),
    }
}

/// One sentence per applicable circumstance, in fixed check order.
fn special_circumstances(
    answers: &AnswerSet,
    allocation: &BTreeMap<AssetClass, u32>,
) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();

    if matches!(
        answers.emergency_fund_months,
        EmergencyFundMonths::ZeroToOne | EmergencyFundMonths::TwoToThree
    ) {
        sentences.push(format!(
            "Higher liquid allocation ({}%) addresses your emergency fund gap.",
            allocation[&AssetClass::Liquid],
        ));
    }

    if matches!(answers.dependents, Dependents::ThreeToFour | Dependents::FivePlus) {
        sentences.push(format!(
            "Family responsibilities support the conservative positioning with {}% in stable assets.",
            allocation[&AssetClass::Debt] + allocation[&AssetClass::Liquid],
        ));
    }

    if answers.withdrawal_next_2_years {
        sentences.push(
            "Anticipated withdrawals within 2 years justify the emphasis on liquid and stable investments."
                .to_string(),
        );
    }

    if answers.job_stability == JobStability::NotStable {
        sentences.push(
            "Income volatility supports maintaining higher safety buffers in your allocation."
                .to_string(),
        );
    }

    sentences
}

fn construction_line(allocation: &BTreeMap<AssetClass, u32>) -> String {
    let parts: &[(AssetClass, &str)] = &[
        (AssetClass::Stocks, "direct stocks for growth potential"),
        (AssetClass::MutualFunds, "mutual funds for diversified equity exposure"),
        (AssetClass::Debt, "debt for stable income"),
        (AssetClass::Gold, "gold as inflation hedge"),
        (AssetClass::RealEstate, "real estate for portfolio diversification"),
        (AssetClass::Liquid, "liquid funds for flexibility and opportunities"),
    ];

    let components: Vec<String> = parts
        .iter()
        .filter(|(class, _)| allocation[class] > 0)
        .map(|(class, text)| format!("{}% {}", allocation[class], text))
        .collect();

    format!("Portfolio construction: {}.", components.join(", "))
}

// =============================================================================
// Tests
// =============================================================================
