use crate::NormalizedKeyPoint;
use cw_core::{Error, Result};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Radial lens distortion with three coefficients.
///
/// $$
/// α(r^2) = 1 + k_1 ⋅ r^2 + k_2 ⋅ r^4 + k_3 ⋅ r^6
/// $$
///
/// Distortion scales an ideal normalized keypoint $(x, y)$ with $r^2 = x^2 + y^2$ to $(x ⋅ α, y ⋅ α)$.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RadialDistortion {
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
}

impl RadialDistortion {
    pub fn new(k1: f64, k2: f64, k3: f64) -> Self {
        Self { k1, k2, k3 }
    }

    /// Computes the scale factor $α(r^2)$.
    pub fn evaluate(&self, r2: f64) -> f64 {
        1.0 + self.k1 * r2 + self.k2 * r2.powi(2) + self.k3 * r2.powi(3)
    }

    /// Applies distortion to an ideal normalized keypoint.
    ///
    /// Fails with [`Error::Arithmetic`] if the radius or the scale factor is not finite, which
    /// happens for points far outside the field of view or extreme coefficients.
    pub fn distort(&self, point: NormalizedKeyPoint) -> Result<NormalizedKeyPoint> {
        let r2 = point.coords.norm_squared();
        if !r2.is_finite() {
            return Err(Error::Arithmetic(format!(
                "squared radius of {:?} is not finite",
                point.coords
            )));
        }
        let alpha = self.evaluate(r2);
        if !alpha.is_finite() {
            return Err(Error::Arithmetic(format!(
                "radial distortion factor at r2 = {} is not finite",
                r2
            )));
        }
        Ok(NormalizedKeyPoint((point.coords * alpha).into()))
    }
}

/// Tangential (decentering) lens distortion coefficients.
///
/// These are part of the calibration record, but projection does not apply them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TangentialDistortion {
    pub p1: f64,
    pub p2: f64,
}

impl TangentialDistortion {
    pub fn new(p1: f64, p2: f64) -> Self {
        Self { p1, p2 }
    }
}
