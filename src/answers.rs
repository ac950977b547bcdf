// =============================================================================
// Questionnaire answer model
// =============================================================================
//
// Every categorical field is a closed enum. Deserialization never fails on an
// unexpected value: each enum carries an `#[serde(other)] Unknown` variant and
// every field has a documented neutral default, so partial or slightly
// malformed answer sets still produce a complete recommendation. Only a
// structurally malformed body (wrong JSON shape) is rejected, and that happens
// at the HTTP layer before the engine runs.
// =============================================================================

use serde::Deserialize;

use crate::types::AssetClass;

/// Age band. Neutral fallback: `Unknown` (catalog emits a zero signal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "<25")]
    Under25,
    #[serde(rename = "25-35")]
    From25To35,
    #[serde(rename = "35-45")]
    From35To45,
    #[serde(rename = "45-55")]
    From45To55,
    #[serde(rename = "55-65")]
    From55To65,
    #[serde(rename = "65+")]
    Over65,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Investment horizon. Neutral fallback: `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Horizon {
    #[serde(rename = "<2 years")]
    UnderTwoYears,
    #[serde(rename = "2-5 years")]
    TwoToFive,
    #[serde(rename = "5-10 years")]
    FiveToTen,
    #[serde(rename = "10-20 years")]
    TenToTwenty,
    #[serde(rename = "20+ years")]
    TwentyPlus,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Horizon {
    /// Ten years or more.
    pub fn is_long(&self) -> bool {
        matches!(self, Horizon::TenToTwenty | Horizon::TwentyPlus)
    }
}

/// Annual income band (rupees). Neutral fallback: `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum IncomeBand {
    #[serde(rename = "<50K")]
    Under50K,
    #[serde(rename = "50K-1L")]
    FiftyKToOneLakh,
    #[serde(rename = "1L-2L")]
    OneToTwoLakh,
    #[serde(rename = "2L-5L")]
    TwoToFiveLakh,
    #[serde(rename = "5L+")]
    FiveLakhPlus,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Emergency fund coverage in months of expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum EmergencyFundMonths {
    #[serde(rename = "0-1")]
    ZeroToOne,
    #[serde(rename = "2-3")]
    TwoToThree,
    #[serde(rename = "4-6")]
    FourToSix,
    #[serde(rename = "7-12")]
    SevenToTwelve,
    #[serde(rename = "12+")]
    TwelvePlus,
    #[default]
    #[serde(other)]
    Unknown,
}

impl EmergencyFundMonths {
    /// Under four months of coverage.
    pub fn is_thin(&self) -> bool {
        matches!(self, EmergencyFundMonths::ZeroToOne | EmergencyFundMonths::TwoToThree)
    }
}

/// Number of financial dependents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Dependents {
    #[serde(rename = "0")]
    None,
    #[serde(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "3-4")]
    ThreeToFour,
    #[serde(rename = "5+")]
    FivePlus,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Dependents {
    pub fn is_many(&self) -> bool {
        matches!(self, Dependents::ThreeToFour | Dependents::FivePlus)
    }
}

/// Monthly obligations band (rupees).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Obligations {
    #[serde(rename = "<10K")]
    Under10K,
    #[serde(rename = "10K-25K")]
    TenTo25K,
    #[serde(rename = "25K-50K")]
    TwentyFiveTo50K,
    #[serde(rename = "50K+")]
    FiftyKPlus,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Reaction to a sharp market drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityComfort {
    PanicSell,
    VeryUncomfortable,
    SomewhatConcerned,
    StayCalm,
    BuyMore,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Maximum acceptable portfolio loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum MaxLoss {
    #[serde(rename = "5%")]
    FivePct,
    #[serde(rename = "10%")]
    TenPct,
    #[serde(rename = "20%")]
    TwentyPct,
    #[serde(rename = "30%")]
    ThirtyPct,
    #[serde(rename = "40%+")]
    FortyPctPlus,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Self-reported investment knowledge. Neutral fallback behaves like
/// `SomeKnowledge` wherever the level drives a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Knowledge {
    Beginner,
    SomeKnowledge,
    Experienced,
    Expert,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Experience with past investment losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviousLosses {
    NeverInvested,
    NoMajorLosses,
    SomeLossesLearned,
    MajorLossesStillInvesting,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Primary investment goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Retirement,
    WealthBuilding,
    IncomeGeneration,
    ChildEducation,
    HomePurchase,
    Preservation,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Expected annual return band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ExpectedReturn {
    #[serde(rename = "5-8%")]
    FiveToEight,
    #[serde(rename = "8-12%")]
    EightToTwelve,
    #[serde(rename = "12-15%")]
    TwelveToFifteen,
    #[serde(rename = "15-20%")]
    FifteenToTwenty,
    #[serde(rename = "20%+")]
    TwentyPlus,
    #[default]
    #[serde(other)]
    Unknown,
}

/// How often the investor needs to pull money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityNeeds {
    Never,
    OnceYear,
    FewTimesYear,
    Monthly,
    Frequently,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Job / income stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStability {
    VeryStable,
    SomewhatStable,
    NotStable,
    #[default]
    #[serde(other)]
    Unknown,
}

fn default_has_insurance() -> bool {
    // Absent insurance info is treated as covered: the defensive insurance
    // shift only applies when the investor explicitly reports no coverage.
    true
}

/// The full questionnaire answer set the engine consumes.
///
/// Immutable once deserialized. Every field is optional on the wire; absent
/// fields take the neutral defaults documented on each enum.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerSet {
    pub age: AgeBand,
    pub investment_horizon: Horizon,
    pub annual_income: IncomeBand,
    /// Amount being invested, in rupees. Used only by the stress tester.
    pub investment_amount: f64,
    pub emergency_fund_months: EmergencyFundMonths,
    pub dependents: Dependents,
    pub monthly_obligations: Obligations,
    pub volatility_comfort: VolatilityComfort,
    pub max_acceptable_loss: MaxLoss,
    pub investment_knowledge: Knowledge,
    pub previous_losses: PreviousLosses,
    pub primary_goal: Goal,
    pub expected_return: ExpectedReturn,
    pub liquidity_needs: LiquidityNeeds,
    pub job_stability: JobStability,
    #[serde(rename = "withdrawalNext2Years")]
    pub withdrawal_next_2_years: bool,
    #[serde(default = "default_has_insurance")]
    pub has_insurance: bool,
    pub avoid_assets: Vec<AssetClass>,
}

impl Default for AnswerSet {
    fn default() -> Self {
        Self {
            age: AgeBand::default(),
            investment_horizon: Horizon::default(),
            annual_income: IncomeBand::default(),
            investment_amount: 0.0,
            emergency_fund_months: EmergencyFundMonths::default(),
            dependents: Dependents::default(),
            monthly_obligations: Obligations::default(),
            volatility_comfort: VolatilityComfort::default(),
            max_acceptable_loss: MaxLoss::default(),
            investment_knowledge: Knowledge::default(),
            previous_losses: PreviousLosses::default(),
            primary_goal: Goal::default(),
            expected_return: ExpectedReturn::default(),
            liquidity_needs: LiquidityNeeds::default(),
            job_stability: JobStability::default(),
            withdrawal_next_2_years: false,
            has_insurance: default_has_insurance(),
            avoid_assets: Vec::new(),
        }
    }
}

impl AnswerSet {
    pub fn avoids(&self, class: AssetClass) -> bool {
        self.avoid_assets.contains(&class)
    }

    /// Near-term liquidity pressure: frequent withdrawals or a planned
    /// withdrawal within two years.
    pub fn needs_liquidity_soon(&self) -> bool {
        self.liquidity_needs == LiquidityNeeds::Frequently || self.withdrawal_next_2_years
    }
}

// =============================================================================
// Tests
// =============================================================================
