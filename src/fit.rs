// src/fit.rs
//
// Quadratic lane boundary fit: x = a·y² + b·y + c, the per-frame output of
// the external polynomial fitter. y is the image row (independent variable,
// increases downward), x the boundary's column at that row.

use crate::error::TrackingError;

/// Coefficients of one quadratic lane boundary fit.
///
/// Positive `a`: the boundary curves rightward as y increases (downward).
/// `c` is the boundary's x-position at y = 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LaneFit {
    /// Quadratic coefficient — sign determines curvature direction.
    pub a: f32,
    /// Linear coefficient — slope at y = 0.
    pub b: f32,
    /// Constant — x-intercept at y = 0.
    pub c: f32,
}

impl LaneFit {
    /// The identity fit `[0, 0, 0]`. Value of a tracker's best fit before
    /// any frame has been appended.
    pub const ZERO: Self = Self {
        a: 0.0,
        b: 0.0,
        c: 0.0,
    };

    pub fn new(a: f32, b: f32, c: f32) -> Self {
        Self { a, b, c }
    }

    /// Build a fit from a raw coefficient slice (e.g. straight out of a
    /// least-squares solver).
    ///
    /// Rejects slices that are not exactly `[a, b, c]` and any non-finite
    /// value. Malformed input is never truncated or padded.
    pub fn from_coefficients(coeffs: &[f32]) -> Result<Self, TrackingError> {
        if coeffs.len() != 3 {
            return Err(TrackingError::MalformedFit { len: coeffs.len() });
        }
        if let Some(index) = coeffs.iter().position(|v| !v.is_finite()) {
            return Err(TrackingError::NonFiniteCoefficient { index });
        }
        Ok(Self {
            a: coeffs[0],
            b: coeffs[1],
            c: coeffs[2],
        })
    }

    /// Coefficients as `[a, b, c]`.
    pub fn coefficients(&self) -> [f32; 3] {
        [self.a, self.b, self.c]
    }

    /// Evaluate the polynomial at image row `y`.
    pub fn x_at(&self, y: f32) -> f32 {
        self.a * y * y + self.b * y + self.c
    }
}

impl From<[f32; 3]> for LaneFit {
    fn from([a, b, c]: [f32; 3]) -> Self {
        Self { a, b, c }
    }
}

impl From<LaneFit> for [f32; 3] {
    fn from(fit: LaneFit) -> Self {
        fit.coefficients()
    }
}
