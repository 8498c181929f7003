// src/line_tracker.rs
//
// Per-boundary lane line state, tracked across consecutive video frames.
//
// One `LineTracker` holds the rolling history of polynomial fits for a
// single lane boundary and maintains their running mean (the "best fit")
// used to reduce frame-to-frame jitter in the rendered overlay. Detection,
// curve fitting, curvature math and drawing all live upstream or
// downstream; this object only stores what the frame loop hands it.
//
// One instance per boundary — a typical pipeline owns two (`LanePair`),
// fed strictly in frame order by a single caller.

use crate::config::TrackingConfig;
use crate::error::TrackingError;
use crate::fit::LaneFit;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Rolling state for one lane boundary.
///
/// The tracker owns its fit ring buffer and the derived best fit. The `pub`
/// fields are shared storage slots written by the external frame loop
/// (detector, curvature calculator, renderer); the tracker never touches
/// them and makes no guarantee about their consistency.
#[derive(Debug, Clone)]
pub struct LineTracker {
    /// Whether the boundary was detected in the most recent frame.
    /// Set by the caller, cleared by `reset`.
    pub detected: bool,
    /// X-sample sets of recent fitted lines, kept for overlay plotting.
    /// Append-only and unbounded — the caller decides when (if ever) to
    /// prune it.
    pub recent_xfitted: Vec<Vec<f32>>,
    /// Averaged x-values of the fitted line over recent iterations.
    /// Computed and written by the caller.
    pub bestx: Option<Vec<f32>>,
    /// Radius of curvature of the boundary, in whatever units the
    /// caller's geometry stage uses.
    pub radius_of_curvature: Option<f32>,
    /// Lateral distance of the vehicle center from this line, in meters.
    pub line_base_pos: Option<f32>,
    /// Coefficient-wise difference between the last two fits, written by
    /// the caller's sanity-check stage.
    pub diffs: [f32; 3],
    /// X coordinates of the pixels backing the most recent fit.
    pub allx: Option<Vec<f32>>,
    /// Y coordinates of the pixels backing the most recent fit.
    pub ally: Option<Vec<f32>>,

    /// Ring buffer of the most recent fits, oldest first.
    current_fit: VecDeque<LaneFit>,
    /// Maximum number of fits retained; fixed at construction.
    capacity: usize,
    /// Per-coefficient mean over `current_fit`. `LaneFit::ZERO` until the
    /// first append.
    best_fit: LaneFit,
}

impl LineTracker {
    /// Create a tracker that smooths over the last `history_capacity` fits.
    ///
    /// Fails with `InvalidCapacity` for a zero capacity: a buffer that
    /// never retains a fit has no defined mean.
    pub fn new(history_capacity: usize) -> Result<Self, TrackingError> {
        if history_capacity == 0 {
            return Err(TrackingError::InvalidCapacity(history_capacity));
        }
        Ok(Self {
            detected: false,
            recent_xfitted: Vec::new(),
            bestx: None,
            radius_of_curvature: None,
            line_base_pos: None,
            diffs: [0.0; 3],
            allx: None,
            ally: None,
            current_fit: VecDeque::with_capacity(history_capacity),
            capacity: history_capacity,
            best_fit: LaneFit::ZERO,
        })
    }

    /// Append the current frame's fit and recompute the smoothed best fit.
    ///
    /// When the history already holds `capacity` fits the oldest one is
    /// evicted first (strict FIFO). The best fit is the per-coefficient
    /// arithmetic mean over whatever the buffer holds afterwards, so a
    /// first append returns the fit unchanged.
    ///
    /// Returns the newly computed best fit; the same value stays readable
    /// through [`best_fit`](Self::best_fit).
    pub fn append_fit(&mut self, fit: LaneFit) -> LaneFit {
        self.current_fit.push_back(fit);
        if self.current_fit.len() > self.capacity {
            let evicted = self.current_fit.pop_front();
            trace!(?evicted, "fit history full, dropped oldest");
        }

        let k = self.current_fit.len() as f32;
        let mut sum = [0.0f32; 3];
        for f in &self.current_fit {
            sum[0] += f.a;
            sum[1] += f.b;
            sum[2] += f.c;
        }
        self.best_fit = LaneFit::new(sum[0] / k, sum[1] / k, sum[2] / k);

        debug!(
            history = self.current_fit.len(),
            a = self.best_fit.a,
            b = self.best_fit.b,
            c = self.best_fit.c,
            "appended fit"
        );

        self.best_fit
    }

    /// The smoothed fit: mean of the retained history, `LaneFit::ZERO`
    /// before any append. Pure read, no side effects.
    pub fn best_fit(&self) -> LaneFit {
        self.best_fit
    }

    /// Maximum number of fits retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of fits currently in the history.
    pub fn history_len(&self) -> usize {
        self.current_fit.len()
    }

    /// Retained fits, oldest first.
    pub fn fits(&self) -> impl Iterator<Item = &LaneFit> {
        self.current_fit.iter()
    }

    /// Clear the tracker-owned state (e.g. when the video changes).
    ///
    /// Drops the fit history, the best fit and the detected flag. The
    /// caller-managed slots are left as-is since their lifecycle belongs
    /// to the caller.
    pub fn reset(&mut self) {
        self.current_fit.clear();
        self.best_fit = LaneFit::ZERO;
        self.detected = false;
        debug!("tracker reset");
    }
}

/// The left and right boundary trackers of one driving lane.
///
/// The two sides are fully independent — no state is shared and no
/// coordination happens between them.
#[derive(Debug, Clone)]
pub struct LanePair {
    pub left: LineTracker,
    pub right: LineTracker,
}

impl LanePair {
    pub fn new(history_capacity: usize) -> Result<Self, TrackingError> {
        Ok(Self {
            left: LineTracker::new(history_capacity)?,
            right: LineTracker::new(history_capacity)?,
        })
    }

    pub fn from_config(config: &TrackingConfig) -> Result<Self, TrackingError> {
        Self::new(config.smoothing_window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(a: f32, b: f32, c: f32) -> LaneFit {
        LaneFit::new(a, b, c)
    }

    fn assert_fit_eq(actual: LaneFit, expected: LaneFit) {
        assert!(
            (actual.a - expected.a).abs() < 1e-5
                && (actual.b - expected.b).abs() < 1e-5
                && (actual.c - expected.c).abs() < 1e-5,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_fresh_tracker_has_zero_best_fit() {
        let tracker = LineTracker::new(5).unwrap();
        assert_eq!(tracker.best_fit(), LaneFit::ZERO);
        assert!(!tracker.detected);
        assert_eq!(tracker.history_len(), 0);
        assert_eq!(tracker.diffs, [0.0; 3]);
        assert!(tracker.bestx.is_none());
        assert!(tracker.radius_of_curvature.is_none());
        assert!(tracker.line_base_pos.is_none());
        assert!(tracker.allx.is_none());
        assert!(tracker.ally.is_none());
        assert!(tracker.recent_xfitted.is_empty());
    }

    #[test]
    fn test_single_append_mean_is_the_fit() {
        let mut tracker = LineTracker::new(5).unwrap();
        let returned = tracker.append_fit(fit(1.5, -2.0, 300.0));
        assert_fit_eq(returned, fit(1.5, -2.0, 300.0));
        assert_fit_eq(tracker.best_fit(), fit(1.5, -2.0, 300.0));
    }

    #[test]
    fn test_running_mean_with_bounded_history() {
        // Capacity 3: after the 4th append the first fit is gone and the
        // mean covers [2, 3, 4].
        let mut tracker = LineTracker::new(3).unwrap();
        for a in [1.0, 2.0, 3.0] {
            tracker.append_fit(fit(a, 0.0, 0.0));
        }
        let best = tracker.append_fit(fit(4.0, 0.0, 0.0));
        assert_fit_eq(best, fit(3.0, 0.0, 0.0));
        assert_eq!(tracker.history_len(), 3);
    }

    #[test]
    fn test_fifo_eviction_drops_oldest() {
        let capacity = 4;
        let mut tracker = LineTracker::new(capacity).unwrap();
        for i in 1..=(capacity + 1) {
            tracker.append_fit(fit(i as f32, 0.0, 0.0));
        }
        let held: Vec<f32> = tracker.fits().map(|f| f.a).collect();
        assert_eq!(held, vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_best_fit_read_is_idempotent() {
        let mut tracker = LineTracker::new(3).unwrap();
        tracker.append_fit(fit(0.5, 1.0, 250.0));
        tracker.append_fit(fit(1.5, 3.0, 350.0));
        let first = tracker.best_fit();
        for _ in 0..10 {
            assert_eq!(tracker.best_fit(), first);
        }
    }

    #[test]
    fn test_coefficients_averaged_independently() {
        let mut tracker = LineTracker::new(2).unwrap();
        tracker.append_fit(fit(1.0, 10.0, 100.0));
        let best = tracker.append_fit(fit(3.0, 20.0, 200.0));
        assert_fit_eq(best, fit(2.0, 15.0, 150.0));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert_eq!(
            LineTracker::new(0).unwrap_err(),
            TrackingError::InvalidCapacity(0)
        );
        assert!(LanePair::new(0).is_err());
    }

    #[test]
    fn test_smoothing_over_five_frames_window_four() {
        // End-to-end smoothing scenario: 5 appends into a window of 4.
        let mut tracker = LineTracker::new(4).unwrap();
        for a in [0.0, 0.1, 0.2, 0.3] {
            tracker.append_fit(fit(a, 0.0, 0.0));
        }
        let best = tracker.append_fit(fit(0.4, 0.0, 0.0));
        assert_fit_eq(best, fit(0.25, 0.0, 0.0));
    }

    #[test]
    fn test_reset_clears_tracker_owned_state_only() {
        let mut tracker = LineTracker::new(3).unwrap();
        tracker.append_fit(fit(1.0, 2.0, 3.0));
        tracker.detected = true;
        tracker.radius_of_curvature = Some(420.0);
        tracker.recent_xfitted.push(vec![100.0, 101.0]);

        tracker.reset();

        assert_eq!(tracker.history_len(), 0);
        assert_eq!(tracker.best_fit(), LaneFit::ZERO);
        assert!(!tracker.detected);
        // Caller-managed slots survive a reset.
        assert_eq!(tracker.radius_of_curvature, Some(420.0));
        assert_eq!(tracker.recent_xfitted.len(), 1);
    }

    #[test]
    fn test_lane_pair_sides_are_independent() {
        let mut pair = LanePair::new(3).unwrap();
        pair.left.append_fit(fit(1.0, 0.0, 200.0));
        pair.right.append_fit(fit(-1.0, 0.0, 900.0));

        assert_fit_eq(pair.left.best_fit(), fit(1.0, 0.0, 200.0));
        assert_fit_eq(pair.right.best_fit(), fit(-1.0, 0.0, 900.0));

        pair.left.reset();
        assert_eq!(pair.left.history_len(), 0);
        assert_eq!(pair.right.history_len(), 1);
    }
}
