use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Point3, Vector4};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A point measured in the wall (world) frame `W`.
///
/// The unit of distance is whatever the calibration declares as its world units,
/// which is millimeters for the curtain wall dataset.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct WorldPoint(pub Point3<f64>);

impl WorldPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Point3::new(x, y, z))
    }

    /// Retrieve the homogeneous vector `[x, y, z, 1]`.
    pub fn homogeneous(self) -> Vector4<f64> {
        self.0.to_homogeneous()
    }

    /// Normalizes a homogeneous coordinate into a point.
    ///
    /// Returns `None` when the last component is zero (a point at infinity).
    pub fn from_homogeneous(v: Vector4<f64>) -> Option<Self> {
        Point3::from_homogeneous(v).map(Self)
    }
}

/// A point measured in the camera frame `C`, where the positive X axis is right,
/// positive Y axis is down, and positive Z axis is forwards from the optical center.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CameraPoint(pub Point3<f64>);

impl CameraPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Point3::new(x, y, z))
    }

    pub fn homogeneous(self) -> Vector4<f64> {
        self.0.to_homogeneous()
    }

    pub fn from_homogeneous(v: Vector4<f64>) -> Option<Self> {
        Point3::from_homogeneous(v).map(Self)
    }

    /// The depth of the point along the optical axis.
    pub fn depth(self) -> f64 {
        self.0.z
    }
}
