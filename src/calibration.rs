// =============================================================================
// Calibration — tunable engine constants with atomic save
// =============================================================================
//
// The weighting shifts, multipliers and guardrail bounds below are empirically
// chosen product-calibration values, not derived quantities. They live in one
// serde struct so product can retune them from a JSON file without touching
// engine control flow.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash. Every field carries `#[serde(default)]` so adding new fields never
// breaks loading an older calibration file.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::answers::Knowledge;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_beginner_multiplier() -> f64 {
    0.8
}

fn default_some_knowledge_multiplier() -> f64 {
    0.9
}

fn default_experienced_multiplier() -> f64 {
    1.0
}

fn default_expert_multiplier() -> f64 {
    1.2
}

fn default_signal_component_cap() -> f64 {
    10.0
}

fn default_tactical_signal_cap() -> f64 {
    15.0
}

fn default_retirement_horizon_shift() -> f64 {
    0.05
}

fn default_timeline_goal_horizon_shift() -> f64 {
    0.10
}

fn default_stability_goal_age_shift() -> f64 {
    0.05
}

fn default_equity_base_floor() -> f64 {
    10.0
}

fn default_equity_base_ceiling() -> f64 {
    85.0
}

fn default_risk_score_floor() -> f64 {
    10.0
}

fn default_risk_score_ceiling() -> f64 {
    90.0
}

fn default_insurance_equity_shift() -> f64 {
    10.0
}

fn default_liquid_floor() -> f64 {
    5.0
}

fn default_gold_floor() -> f64 {
    3.0
}

fn default_gold_cap() -> f64 {
    12.0
}

fn default_real_estate_cap() -> f64 {
    7.0
}

fn default_equity_cap() -> f64 {
    60.0
}

fn default_debt_cap() -> f64 {
    70.0
}

fn default_warning_penalty() -> u32 {
    15
}

// =============================================================================
// Calibration
// =============================================================================

/// All product-tunable constants the engine consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calibration {
    // ── Knowledge multiplier (applied to every signal component) ────────
    #[serde(default = "default_beginner_multiplier")]
    pub beginner_multiplier: f64,
    #[serde(default = "default_some_knowledge_multiplier")]
    pub some_knowledge_multiplier: f64,
    #[serde(default = "default_experienced_multiplier")]
    pub experienced_multiplier: f64,
    #[serde(default = "default_expert_multiplier")]
    pub expert_multiplier: f64,

    /// Hard cap on each signal component after the knowledge multiplier.
    #[serde(default = "default_signal_component_cap")]
    pub signal_component_cap: f64,
    /// Hard cap on components touched by goal-specific tactical edits.
    #[serde(default = "default_tactical_signal_cap")]
    pub tactical_signal_cap: f64,

    // ── Goal-dependent weight shifts between age and horizon ────────────
    #[serde(default = "default_retirement_horizon_shift")]
    pub retirement_horizon_shift: f64,
    /// Shift for goals with an externally fixed timeline (child education,
    /// home purchase).
    #[serde(default = "default_timeline_goal_horizon_shift")]
    pub timeline_goal_horizon_shift: f64,
    /// Shift toward age for income-generation and preservation goals.
    #[serde(default = "default_stability_goal_age_shift")]
    pub stability_goal_age_shift: f64,

    // ── Base allocation bounds ───────────────────────────────────────────
    #[serde(default = "default_equity_base_floor")]
    pub equity_base_floor: f64,
    #[serde(default = "default_equity_base_ceiling")]
    pub equity_base_ceiling: f64,
    #[serde(default = "default_risk_score_floor")]
    pub risk_score_floor: f64,
    #[serde(default = "default_risk_score_ceiling")]
    pub risk_score_ceiling: f64,

    /// Maximum equity percentage shifted to Liquid/Debt when uninsured.
    #[serde(default = "default_insurance_equity_shift")]
    pub insurance_equity_shift: f64,

    // ── Guardrails (hard per-class floors and ceilings) ──────────────────
    #[serde(default = "default_liquid_floor")]
    pub liquid_floor: f64,
    #[serde(default = "default_gold_floor")]
    pub gold_floor: f64,
    #[serde(default = "default_gold_cap")]
    pub gold_cap: f64,
    #[serde(default = "default_real_estate_cap")]
    pub real_estate_cap: f64,
    #[serde(default = "default_equity_cap")]
    pub equity_cap: f64,
    #[serde(default = "default_debt_cap")]
    pub debt_cap: f64,

    /// Consistency-score penalty per behavioral warning.
    #[serde(default = "default_warning_penalty")]
    pub warning_penalty: u32,
}

impl Default for Calibration {
    fn default() -> Self {
        // Deserializing an empty object applies every serde default exactly
        // once, keeping the defaults in a single place.
        serde_json::from_str("{}").expect("empty calibration must deserialize")
    }
}

impl Calibration {
    /// Multiplier for the investor's knowledge level. `Unknown` behaves like
    /// some-knowledge.
    pub fn knowledge_multiplier(&self, knowledge: Knowledge) -> f64 {
        match knowledge {
            Knowledge::Beginner => self.beginner_multiplier,
            Knowledge::SomeKnowledge | Knowledge::Unknown => self.some_knowledge_multiplier,
            Knowledge::Experienced => self.experienced_multiplier,
            Knowledge::Expert => self.expert_multiplier,
        }
    }

    /// Load calibration from a JSON file, falling back to defaults for any
    /// missing field.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read calibration file {}", path.display()))?;
        let calibration: Calibration = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse calibration file {}", path.display()))?;
        info!(path = %path.display(), "calibration loaded");
        Ok(calibration)
    }

    /// Persist calibration atomically (write tmp, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let tmp = path.with_extension("tmp");
        let json = serde_json::to_string_pretty(self).context("failed to serialize calibration")?;
        std::fs::write(&tmp, json)
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("failed to rename {} into place", tmp.display()))?;
        info!(path = %path.display(), "calibration saved");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
