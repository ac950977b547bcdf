// =============================================================================
// Behavioral Consistency Validator — contradiction rules over the answer set
// =============================================================================
//
// A fixed, ordered table of independent predicates. Every matching rule emits
// exactly one warning; rules never short-circuit each other and never touch
// the allocation — this is advisory output displayed next to the plan.
//
// Adding a rule means adding a table row, not control flow.
// =============================================================================

use serde::Serialize;

use crate::answers::{
    AgeBand, AnswerSet, EmergencyFundMonths, ExpectedReturn, Goal, Horizon, JobStability,
    LiquidityNeeds, MaxLoss, PreviousLosses,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Critical,
}

/// One flagged contradiction between answers.
#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyWarning {
    pub severity: Severity,
    /// Stable grouping key for the UI, e.g. "timeline" or "liquidity".
    pub category: &'static str,
    pub message: &'static str,
    pub suggested_action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisor_note: Option<&'static str>,
}

struct Rule {
    severity: Severity,
    category: &'static str,
    message: &'static str,
    suggested_action: &'static str,
    advisor_note: Option<&'static str>,
    applies: fn(&AnswerSet) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        severity: Severity::Warning,
        category: "timeline",
        message: "Wealth building needs years to compound, but your horizon is under two years.",
        suggested_action: "Extend your timeline, or treat this money as short-term savings instead.",
        advisor_note: None,
        applies: |a| {
            a.investment_horizon == Horizon::UnderTwoYears && a.primary_goal == Goal::WealthBuilding
        },
    },
    Rule {
        severity: Severity::Critical,
        category: "emergency_fund",
        message: "You are planning for retirement with no emergency buffer in place.",
        suggested_action: "Build 3-6 months of expenses in liquid savings before locking money into long-term assets.",
        advisor_note: Some("An emergency forces early withdrawals at the worst possible time."),
        applies: |a| {
            a.emergency_fund_months == EmergencyFundMonths::ZeroToOne
                && a.primary_goal == Goal::Retirement
        },
    },
    Rule {
        severity: Severity::Warning,
        category: "timeline",
        message: "A 20+ year horizon is unusual past 65; confirm whether this money is really for the next generation.",
        suggested_action: "If this is legacy money, plan it separately with named beneficiaries.",
        advisor_note: None,
        applies: |a| a.age == AgeBand::Over65 && a.investment_horizon == Horizon::TwentyPlus,
    },
    Rule {
        severity: Severity::Warning,
        category: "liquidity",
        message: "Frequent withdrawals undercut a wealth-building strategy built on staying invested.",
        suggested_action: "Carve out a separate spending pot so the growth portfolio can stay untouched.",
        advisor_note: None,
        applies: |a| {
            a.liquidity_needs == LiquidityNeeds::Frequently
                && a.primary_goal == Goal::WealthBuilding
        },
    },
    Rule {
        severity: Severity::Critical,
        category: "expectations",
        message: "Expecting 20%+ returns while accepting at most a 5% loss is not an achievable combination.",
        suggested_action: "Revisit either the return expectation or the loss tolerance; they imply opposite portfolios.",
        advisor_note: Some("High return targets require accepting drawdowns well beyond 5%."),
        applies: |a| {
            a.max_acceptable_loss == MaxLoss::FivePct
                && a.expected_return == ExpectedReturn::TwentyPlus
        },
    },
    Rule {
        severity: Severity::Warning,
        category: "timeline",
        message: "A planned withdrawal within two years conflicts with the stated 10+ year horizon.",
        suggested_action: "Split the near-term amount into a liquid pot and keep the rest on the long timeline.",
        advisor_note: None,
        applies: |a| a.withdrawal_next_2_years && a.investment_horizon.is_long(),
    },
    Rule {
        severity: Severity::Critical,
        category: "stability",
        message: "Unstable income with no emergency fund leaves no cushion for an income gap.",
        suggested_action: "Prioritize an emergency fund before any market exposure.",
        advisor_note: None,
        applies: |a| {
            a.job_stability == JobStability::NotStable
                && a.emergency_fund_months == EmergencyFundMonths::ZeroToOne
        },
    },
    Rule {
        severity: Severity::Warning,
        category: "risk_capacity",
        message: "Past major losses alongside a 40%+ loss tolerance suggests the tolerance may be overstated.",
        suggested_action: "Review how the previous losses felt before committing to this risk level.",
        advisor_note: None,
        applies: |a| {
            a.previous_losses == PreviousLosses::MajorLossesStillInvesting
                && a.max_acceptable_loss == MaxLoss::FortyPctPlus
        },
    },
];

/// Evaluate every rule against the answer set, in table order.
pub fn validate(answers: &AnswerSet) -> Vec<ConsistencyWarning> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(answers))
        .map(|rule| ConsistencyWarning {
            severity: rule.severity,
            category: rule.category,
            message: rule.message,
            suggested_action: rule.suggested_action,
            advisor_note: rule.advisor_note,
        })
        .collect()
}

/// Consistency score: 100 minus a fixed penalty per warning, floored at 0.
pub fn consistency_score(warning_count: usize, penalty: u32) -> u32 {
    100u32.saturating_sub(penalty.saturating_mul(warning_count as u32))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_answers_produce_no_warnings() {
        let answers = AnswerSet {
            age: AgeBand::From25To35,
            investment_horizon: Horizon::TenToTwenty,
            primary_goal: Goal::WealthBuilding,
            emergency_fund_months: EmergencyFundMonths::FourToSix,
            ..AnswerSet::default()
        };
        assert!(validate(&answers).is_empty());
    }

    #[test]
    fn short_horizon_wealth_building_flags_timeline() {
        let answers = AnswerSet {
            investment_horizon: Horizon::UnderTwoYears,
            primary_goal: Goal::WealthBuilding,
            ..AnswerSet::default()
        };
        let warnings = validate(&answers);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, "timeline");
        assert_eq!(warnings[0].severity, Severity::Warning);
    }

    #[test]
    fn retiree_with_short_horizon_raises_no_timeline_warning() {
        let answers = AnswerSet {
            age: AgeBand::Over65,
            investment_horizon: Horizon::UnderTwoYears,
            primary_goal: Goal::Preservation,
            ..AnswerSet::default()
        };
        assert!(validate(&answers).iter().all(|w| w.category != "timeline"));
    }

    #[test]
    fn retiree_with_twenty_year_horizon_raises_timeline_warning() {
        let answers = AnswerSet {
            age: AgeBand::Over65,
            investment_horizon: Horizon::TwentyPlus,
            ..AnswerSet::default()
        };
        let warnings = validate(&answers);
        assert!(warnings.iter().any(|w| w.category == "timeline"));
    }

    #[test]
    fn independent_rules_can_all_fire() {
        let answers = AnswerSet {
            investment_horizon: Horizon::UnderTwoYears,
            primary_goal: Goal::WealthBuilding,
            liquidity_needs: LiquidityNeeds::Frequently,
            max_acceptable_loss: MaxLoss::FivePct,
            expected_return: ExpectedReturn::TwentyPlus,
            job_stability: JobStability::NotStable,
            emergency_fund_months: EmergencyFundMonths::ZeroToOne,
            ..AnswerSet::default()
        };
        let warnings = validate(&answers);
        assert!(warnings.len() >= 4);
        assert!(warnings.iter().any(|w| w.severity == Severity::Critical));
    }

    #[test]
    fn warnings_preserve_table_order() {
        let answers = AnswerSet {
            investment_horizon: Horizon::UnderTwoYears,
            primary_goal: Goal::WealthBuilding,
            liquidity_needs: LiquidityNeeds::Frequently,
            ..AnswerSet::default()
        };
        let warnings = validate(&answers);
        assert_eq!(warnings[0].category, "timeline");
        assert_eq!(warnings[1].category, "liquidity");
    }

    // The 15-point penalty is a calibration value subject to product tuning.
    #[test]
    fn score_drops_fifteen_points_per_warning_and_floors_at_zero() {
        assert_eq!(consistency_score(0, 15), 100);
        assert_eq!(consistency_score(2, 15), 70);
        assert_eq!(consistency_score(7, 15), 0);
    }
}
