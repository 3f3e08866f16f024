use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::Point2;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A point on an image frame in pixel coordinates.
///
/// Keypoints produced by projection refer to the original (distorted) image, so they are
/// neither undistorted nor normalized. They are not rounded to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct KeyPoint(pub Point2<f64>);

impl KeyPoint {
    pub fn new(u: f64, v: f64) -> Self {
        Self(Point2::new(u, v))
    }

    /// Horizontal pixel coordinate.
    pub fn u(&self) -> f64 {
        self.0.x
    }

    /// Vertical pixel coordinate.
    pub fn v(&self) -> f64 {
        self.0.y
    }
}
