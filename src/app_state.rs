// =============================================================================
// Central Application State — FinSight Advisor Service
// =============================================================================
//
// Shared state for the HTTP layer. The engine itself is pure; the only
// mutable pieces are the hot-reloadable calibration and a couple of
// operational counters.
//
// Thread safety:
//   - Atomic counters for lock-free request accounting.
//   - parking_lot::RwLock around the calibration; handlers clone a snapshot
//     so an in-flight request never observes a torn config swap.
// =============================================================================

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::calibration::Calibration;

/// Central application state shared across handlers via `Arc<AppState>`.
pub struct AppState {
    /// Total recommendation requests served since startup.
    pub recommendations_served: AtomicU64,
    /// Total refine requests served since startup.
    pub refinements_served: AtomicU64,

    /// Active calibration. Swapped whole on admin update.
    pub calibration: RwLock<Calibration>,
    /// Where calibration updates are persisted, when configured.
    pub calibration_path: Option<PathBuf>,

    /// Instant when the service was started. Used for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(calibration: Calibration, calibration_path: Option<PathBuf>) -> Self {
        Self {
            recommendations_served: AtomicU64::new(0),
            refinements_served: AtomicU64::new(0),
            calibration: RwLock::new(calibration),
            calibration_path,
            start_time: std::time::Instant::now(),
        }
    }

    /// Clone the active calibration. Engine calls work off this snapshot.
    pub fn calibration_snapshot(&self) -> Calibration {
        self.calibration.read().clone()
    }

    /// Swap in a new calibration and return the previous one.
    pub fn replace_calibration(&self, next: Calibration) -> Calibration {
        std::mem::replace(&mut *self.calibration.write(), next)
    }

    pub fn count_recommendation(&self) -> u64 {
        self.recommendations_served.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn count_refinement(&self) -> u64 {
        self.refinements_served.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibration_snapshot_is_independent_of_later_swaps() {
        let state = AppState::new(Calibration::default(), None);
        let snapshot = state.calibration_snapshot();

        let mut tuned = Calibration::default();
        tuned.equity_cap = 50.0;
        state.replace_calibration(tuned);

        assert_eq!(snapshot.equity_cap, 60.0);
        assert_eq!(state.calibration_snapshot().equity_cap, 50.0);
    }

    #[test]
    fn request_counters_increment() {
        let state = AppState::new(Calibration::default(), None);
        assert_eq!(state.count_recommendation(), 1);
        assert_eq!(state.count_recommendation(), 2);
        assert_eq!(state.count_refinement(), 1);
    }
}
