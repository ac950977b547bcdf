// =============================================================================
// Signal Catalog — static answer-to-signal lookup tables
// =============================================================================
//
// One exhaustive table per questionnaire factor. Each entry carries the raw
// equity/safety push (both in [-15, +15]) and the advisor-style explanation
// for that answer. The `Unknown` arm of every table is the documented neutral
// fallback: a zero signal with its own explanation, never an error.
//
// Weighting, reweighting and multipliers live in `signal_processor`; this
// module is pure reference data.
// =============================================================================

use crate::answers::{
    AgeBand, Dependents, EmergencyFundMonths, Goal, Horizon, MaxLoss, VolatilityComfort,
};

/// Raw table entry before weighting.
#[derive(Debug, Clone, Copy)]
pub struct FactorEntry {
    pub equity: f64,
    pub safety: f64,
    pub explanation: &'static str,
}

const fn entry(equity: f64, safety: f64, explanation: &'static str) -> FactorEntry {
    FactorEntry { equity, safety, explanation }
}

pub fn age_entry(age: AgeBand) -> FactorEntry {
    match age {
        AgeBand::Under25 => entry(15.0, -8.0, "Young age provides maximum risk capacity for long-term growth"),
        AgeBand::From25To35 => entry(12.0, -5.0, "Prime wealth-building years with high equity tolerance"),
        AgeBand::From35To45 => entry(8.0, -2.0, "Peak earning years allow significant equity exposure"),
        AgeBand::From45To55 => entry(3.0, 3.0, "Pre-retirement phase begins gradual shift to stability"),
        AgeBand::From55To65 => entry(-5.0, 8.0, "Approaching retirement requires increased focus on preservation"),
        AgeBand::Over65 => entry(-10.0, 15.0, "Retirement phase prioritizes capital preservation and income"),
        AgeBand::Unknown => entry(0.0, 0.0, "Age not specified; applying neutral growth positioning"),
    }
}

pub fn horizon_entry(horizon: Horizon) -> FactorEntry {
    match horizon {
        Horizon::UnderTwoYears => entry(-15.0, 15.0, "Short horizon requires maximum liquidity and capital preservation"),
        Horizon::TwoToFive => entry(-5.0, 5.0, "Medium-short horizon favors defensive positioning"),
        Horizon::FiveToTen => entry(5.0, -2.0, "Medium horizon allows moderate equity exposure"),
        Horizon::TenToTwenty => entry(10.0, -5.0, "Long horizon enables significant equity allocation"),
        Horizon::TwentyPlus => entry(15.0, -8.0, "Very long horizon maximizes growth potential through equity"),
        Horizon::Unknown => entry(0.0, 0.0, "Horizon not specified; assuming a balanced medium-term outlook"),
    }
}

pub fn dependents_entry(dependents: Dependents) -> FactorEntry {
    match dependents {
        Dependents::None => entry(0.0, 0.0, "No dependents allows for neutral risk positioning"),
        Dependents::OneToTwo => entry(-2.0, 5.0, "Few dependents suggest slight increase in safety allocation"),
        Dependents::ThreeToFour => entry(-5.0, 8.0, "Multiple dependents require increased financial security"),
        Dependents::FivePlus => entry(-8.0, 12.0, "Many dependents necessitate conservative, stable approach"),
        Dependents::Unknown => entry(0.0, 0.0, "Dependents not specified; no family-driven adjustment applied"),
    }
}

pub fn emergency_fund_entry(months: EmergencyFundMonths) -> FactorEntry {
    match months {
        EmergencyFundMonths::ZeroToOne => entry(-15.0, 15.0, "Insufficient emergency fund requires immediate liquidity focus"),
        EmergencyFundMonths::TwoToThree => entry(-8.0, 10.0, "Low emergency fund suggests increasing liquid reserves"),
        EmergencyFundMonths::FourToSix => entry(0.0, 0.0, "Adequate emergency fund allows normal risk allocation"),
        EmergencyFundMonths::SevenToTwelve => entry(3.0, -2.0, "Good emergency buffer enables slightly higher risk"),
        EmergencyFundMonths::TwelvePlus => entry(5.0, -5.0, "Excellent emergency fund supports increased equity exposure"),
        EmergencyFundMonths::Unknown => entry(0.0, 0.0, "Emergency fund not specified; assuming adequate coverage"),
    }
}

pub fn volatility_entry(comfort: VolatilityComfort) -> FactorEntry {
    match comfort {
        VolatilityComfort::PanicSell => entry(-15.0, 15.0, "Low volatility tolerance requires defensive allocation"),
        VolatilityComfort::VeryUncomfortable => entry(-8.0, 10.0, "Limited comfort with volatility suggests caution"),
        VolatilityComfort::SomewhatConcerned => entry(0.0, 0.0, "Moderate volatility comfort allows balanced approach"),
        VolatilityComfort::StayCalm => entry(8.0, -5.0, "Good volatility tolerance supports higher equity exposure"),
        VolatilityComfort::BuyMore => entry(12.0, -8.0, "Excellent volatility tolerance enables aggressive positioning"),
        VolatilityComfort::Unknown => entry(0.0, 0.0, "Volatility comfort not specified; assuming moderate tolerance"),
    }
}

pub fn loss_tolerance_entry(max_loss: MaxLoss) -> FactorEntry {
    match max_loss {
        MaxLoss::FivePct => entry(-10.0, 10.0, "Low loss tolerance requires conservative approach"),
        MaxLoss::TenPct => entry(-5.0, 5.0, "Limited loss tolerance suggests defensive positioning"),
        MaxLoss::TwentyPct => entry(0.0, 0.0, "Moderate loss tolerance allows balanced allocation"),
        MaxLoss::ThirtyPct => entry(5.0, -3.0, "Good loss tolerance supports higher equity exposure"),
        MaxLoss::FortyPctPlus => entry(10.0, -5.0, "High loss tolerance enables aggressive growth strategy"),
        MaxLoss::Unknown => entry(0.0, 0.0, "Loss tolerance not specified; assuming a moderate drawdown limit"),
    }
}

pub fn goal_entry(goal: Goal) -> FactorEntry {
    match goal {
        Goal::Retirement => entry(5.0, 3.0, "Retirement planning balances growth with stability"),
        Goal::WealthBuilding => entry(10.0, -5.0, "Wealth building prioritizes long-term growth"),
        Goal::IncomeGeneration => entry(-5.0, 10.0, "Income focus requires stable, yield-generating assets"),
        Goal::ChildEducation => entry(3.0, 2.0, "Education planning needs balanced growth and preservation"),
        Goal::HomePurchase => entry(-10.0, 15.0, "Home purchase requires capital preservation and liquidity"),
        Goal::Preservation => entry(-8.0, 12.0, "Capital preservation prioritizes safety over growth"),
        Goal::Unknown => entry(0.0, 0.0, "Goal not specified; applying general-purpose balanced targets"),
    }
}

pub fn insurance_entry(has_insurance: bool) -> FactorEntry {
    if has_insurance {
        entry(0.0, 0.0, "Adequate insurance coverage in place; no defensive adjustment needed")
    } else {
        entry(-10.0, 10.0, "Lack of insurance requires more conservative positioning")
    }
}

// =============================================================================
// Tests
// =============================================================================
