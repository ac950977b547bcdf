// =============================================================================
// Shared types used across the Finsight advisor engine
// =============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Asset classes
// ---------------------------------------------------------------------------

/// The six asset classes every plan is expressed in.
///
/// The declaration order is load-bearing: it is the fixed tie-break order for
/// largest-remainder rounding and the display order of every plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    Stocks,
    #[serde(rename = "Mutual Funds")]
    MutualFunds,
    Gold,
    #[serde(rename = "Real Estate")]
    RealEstate,
    Debt,
    Liquid,
}

impl AssetClass {
    /// All classes in fixed order.
    pub const ALL: [AssetClass; 6] = [
        AssetClass::Stocks,
        AssetClass::MutualFunds,
        AssetClass::Gold,
        AssetClass::RealEstate,
        AssetClass::Debt,
        AssetClass::Liquid,
    ];

    /// Human-readable label, matching the wire name.
    pub fn label(&self) -> &'static str {
        match self {
            AssetClass::Stocks => "Stocks",
            AssetClass::MutualFunds => "Mutual Funds",
            AssetClass::Gold => "Gold",
            AssetClass::RealEstate => "Real Estate",
            AssetClass::Debt => "Debt",
            AssetClass::Liquid => "Liquid",
        }
    }

    fn index(&self) -> usize {
        match self {
            AssetClass::Stocks => 0,
            AssetClass::MutualFunds => 1,
            AssetClass::Gold => 2,
            AssetClass::RealEstate => 3,
            AssetClass::Debt => 4,
            AssetClass::Liquid => 5,
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Allocation (working, fractional percentages)
// ---------------------------------------------------------------------------

/// A fractional allocation over the six asset classes, in percent.
///
/// This is the working representation inside the calculation pipeline. Each
/// pipeline stage is a pure `Allocation -> Allocation` transformation; only
/// the final rounding step produces integers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Allocation {
    values: [f64; 6],
}

impl Allocation {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, class: AssetClass) -> f64 {
        self.values[class.index()]
    }

    pub fn set(&mut self, class: AssetClass, pct: f64) {
        self.values[class.index()] = pct.max(0.0);
    }

    /// Add a (possibly negative) delta, saturating at zero.
    pub fn add(&mut self, class: AssetClass, delta: f64) {
        let i = class.index();
        self.values[i] = (self.values[i] + delta).max(0.0);
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Combined Stocks + Mutual Funds percentage.
    pub fn equity_total(&self) -> f64 {
        self.get(AssetClass::Stocks) + self.get(AssetClass::MutualFunds)
    }

    /// Scale so the total is exactly 100 (no-op on an empty allocation).
    pub fn scaled_to_100(&self) -> Self {
        let total = self.total();
        if total <= f64::EPSILON {
            return *self;
        }
        let mut out = *self;
        for v in &mut out.values {
            *v = *v * 100.0 / total;
        }
        out
    }

    /// Round to integer percentages summing to exactly 100 using the
    /// largest-remainder method: floor every value, then hand the leftover
    /// units to the classes with the largest fractional remainder, ties
    /// broken by the fixed class order.
    pub fn round_largest_remainder(&self) -> BTreeMap<AssetClass, u32> {
        let scaled = self.scaled_to_100();

        let mut floors: BTreeMap<AssetClass, u32> = BTreeMap::new();
        let mut remainders: Vec<(AssetClass, f64)> = Vec::with_capacity(6);
        let mut floor_sum: i64 = 0;

        for class in AssetClass::ALL {
            let v = scaled.get(class).clamp(0.0, 100.0);
            let floor = v.floor();
            floors.insert(class, floor as u32);
            floor_sum += floor as i64;
            remainders.push((class, v - floor));
        }

        // Stable sort keeps the fixed class order for equal remainders.
        remainders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut leftover = 100 - floor_sum;
        let mut i = 0;
        while leftover > 0 && !remainders.is_empty() {
            let class = remainders[i % remainders.len()].0;
            *floors.get_mut(&class).unwrap() += 1;
            leftover -= 1;
            i += 1;
        }

        floors
    }
}

/// Build an allocation from explicit per-class values.
pub fn allocation_from(pairs: &[(AssetClass, f64)]) -> Allocation {
    let mut out = Allocation::zero();
    for &(class, pct) in pairs {
        out.set(class, pct);
    }
    out
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// A weighted directional nudge toward more or less equity exposure derived
/// from a single questionnaire answer. Ephemeral: produced fresh on every
/// engine call, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Signal {
    /// Factor name, e.g. "age" or "investment_horizon".
    pub factor: &'static str,
    /// Equity push in [-15, +15].
    pub equity_signal: f64,
    /// Safety push in [-15, +15].
    pub safety_signal: f64,
    /// Weight in [0, 1]. All factor weights sum to 1.0.
    pub weight: f64,
    /// Advisor-style explanation of this factor's contribution.
    pub explanation: &'static str,
}

// ---------------------------------------------------------------------------
// Risk profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskLevel {
    /// Band lookup. Out-of-range scores are clamped into [0, 100] first, so
    /// the level is always the unique band containing the (clamped) score.
    pub fn from_score(score: f64) -> Self {
        let s = score.clamp(0.0, 100.0);
        if s < 40.0 {
            RiskLevel::Conservative
        } else if s < 70.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Aggressive
        }
    }

    /// Inclusive score band for this level.
    pub fn band(&self) -> (u32, u32) {
        match self {
            RiskLevel::Conservative => (0, 39),
            RiskLevel::Moderate => (40, 69),
            RiskLevel::Aggressive => (70, 100),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Conservative => {
                "Capital preservation first; growth assets kept to a minority of the portfolio"
            }
            RiskLevel::Moderate => {
                "Balanced growth and stability with meaningful but controlled equity exposure"
            }
            RiskLevel::Aggressive => {
                "Growth-led positioning that accepts significant drawdowns for long-term returns"
            }
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conservative => write!(f, "Conservative"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Aggressive => write!(f, "Aggressive"),
        }
    }
}

/// Risk score plus its band, as shown to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct RiskProfile {
    pub level: RiskLevel,
    /// Numeric score in [0, 100].
    pub score: f64,
    /// Inclusive [low, high] bounds of the band containing `score`.
    pub band: (u32, u32),
    pub description: &'static str,
}

impl RiskProfile {
    pub fn from_score(score: f64) -> Self {
        let score = score.clamp(0.0, 100.0);
        let level = RiskLevel::from_score(score);
        Self {
            level,
            score,
            band: level.band(),
            description: level.description(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_sums_to_100() {
        let a = allocation_from(&[
            (AssetClass::Stocks, 33.3),
            (AssetClass::MutualFunds, 33.3),
            (AssetClass::Debt, 33.4),
        ]);
        let rounded = a.round_largest_remainder();
        assert_eq!(rounded.values().sum::<u32>(), 100);
    }

    #[test]
    fn rounding_scales_unnormalized_input() {
        let a = allocation_from(&[
            (AssetClass::Stocks, 20.0),
            (AssetClass::Debt, 20.0),
            (AssetClass::Liquid, 20.0),
        ]);
        let rounded = a.round_largest_remainder();
        assert_eq!(rounded.values().sum::<u32>(), 100);
        // Equal inputs scale to equal thirds: 34/33/33 after remainder split.
        assert_eq!(rounded[&AssetClass::Stocks], 34);
        assert_eq!(rounded[&AssetClass::Debt], 33);
        assert_eq!(rounded[&AssetClass::Liquid], 33);
    }

    #[test]
    fn rounding_preserves_exact_zeros() {
        let a = allocation_from(&[(AssetClass::Stocks, 60.0), (AssetClass::Debt, 40.0)]);
        let rounded = a.round_largest_remainder();
        assert_eq!(rounded[&AssetClass::Gold], 0);
        assert_eq!(rounded[&AssetClass::RealEstate], 0);
        assert_eq!(rounded.values().sum::<u32>(), 100);
    }

    #[test]
    fn remainder_ties_break_by_class_order() {
        let a = allocation_from(&[
            (AssetClass::Stocks, 33.5),
            (AssetClass::Debt, 33.5),
            (AssetClass::Liquid, 33.0),
        ]);
        let rounded = a.round_largest_remainder();
        // One leftover unit; Stocks precedes Debt in the fixed order.
        assert_eq!(rounded[&AssetClass::Stocks], 34);
        assert_eq!(rounded[&AssetClass::Debt], 33);
    }

    #[test]
    fn risk_level_bands_partition_the_score_range() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Conservative);
        assert_eq!(RiskLevel::from_score(39.9), RiskLevel::Conservative);
        assert_eq!(RiskLevel::from_score(40.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(69.9), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(70.0), RiskLevel::Aggressive);
        assert_eq!(RiskLevel::from_score(100.0), RiskLevel::Aggressive);
    }

    #[test]
    fn risk_level_clamps_out_of_range_scores() {
        assert_eq!(RiskLevel::from_score(-20.0), RiskLevel::Conservative);
        assert_eq!(RiskLevel::from_score(250.0), RiskLevel::Aggressive);
        let profile = RiskProfile::from_score(250.0);
        assert_eq!(profile.score, 100.0);
        assert_eq!(profile.band, (70, 100));
    }

    #[test]
    fn allocation_add_saturates_at_zero() {
        let mut a = Allocation::zero();
        a.set(AssetClass::Gold, 5.0);
        a.add(AssetClass::Gold, -8.0);
        assert_eq!(a.get(AssetClass::Gold), 0.0);
    }
}
