// src/lib.rs
//
// Lane line state tracking for a frame-by-frame lane-finding pipeline.
//
// Signal flow (everything but the tracker lives in the caller):
//   Lane pixels → polynomial fitter → LineTracker::append_fit → best fit
//                                       ↑ caller-managed slots (curvature,
//                                         base position, pixel coords)
//
// One `LineTracker` per lane boundary, typically owned as a `LanePair`
// (left + right) and updated once per processed frame.

pub mod config;
pub mod error;
pub mod fit;
pub mod line_tracker;

// Re-exports for ergonomic access from the frame loop
pub use config::TrackingConfig;
pub use error::TrackingError;
pub use fit::LaneFit;
pub use line_tracker::{LanePair, LineTracker};
