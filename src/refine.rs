// =============================================================================
// Second-Opinion Reconciliation — blend an external alternative into a plan
// =============================================================================
//
// An external refinement service proposes an alternative bucket set for an
// existing baseline plan. This module reconciles the two without any I/O:
// per class the alternative is clamped to baseline ±5 points, averaged with
// the baseline, then the blend is renormalized, run back through the
// guardrails and rounded. A `clamped` flag reports whether the alternative
// strayed outside the divergence cap anywhere.
// =============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::allocation;
use crate::answers::AnswerSet;
use crate::calibration::Calibration;
use crate::types::{allocation_from, AssetClass};

/// Maximum per-class divergence the alternative may contribute.
const DIVERGENCE_CAP: f64 = 5.0;

#[derive(Debug, Clone, Serialize)]
pub struct RefinedPlan {
    /// Integer percentages summing to exactly 100.
    pub allocation: BTreeMap<AssetClass, u32>,
    /// True when any class of the alternative was pulled back to the cap.
    pub clamped: bool,
}

/// Reconcile a baseline plan with an externally proposed alternative.
///
/// Classes missing from the alternative keep their baseline value. The
/// result honors the same guardrails and avoid set as the original plan.
pub fn reconcile(
    baseline: &BTreeMap<AssetClass, u32>,
    alternative: &BTreeMap<AssetClass, f64>,
    answers: &AnswerSet,
    calibration: &Calibration,
) -> RefinedPlan {
    let mut clamped = false;
    let mut blended: Vec<(AssetClass, f64)> = Vec::with_capacity(6);

    for class in AssetClass::ALL {
        let base = *baseline.get(&class).unwrap_or(&0) as f64;
        let value = match alternative.get(&class) {
            Some(proposed) => {
                let bounded = proposed.clamp(base - DIVERGENCE_CAP, base + DIVERGENCE_CAP);
                if (bounded - proposed).abs() > f64::EPSILON {
                    clamped = true;
                }
                (base + bounded) / 2.0
            }
            None => base,
        };
        blended.push((class, value.max(0.0)));
    }

    if clamped {
        debug!("alternative exceeded the divergence cap, clamped before blending");
    }

    let floats = allocation_from(&blended).scaled_to_100();
    let floats = allocation::enforce_guardrails(floats, answers, calibration);
    let rounded = allocation::finalize(floats, answers, calibration);

    RefinedPlan { allocation: rounded, clamped }
}

// =============================================================================
// Tests
// =============================================================================
