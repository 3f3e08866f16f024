//! This crate plugs into `cw-core` and provides the pinhole camera model used by the curtain wall dataset.
//! It converts points measured in the camera frame (or in the wall frame, given the camera pose) into pixel
//! coordinates in the original, distorted image. Radial distortion is applied with three coefficients
//! (`k1`, `k2`, `k3`). The calibration record also carries two tangential coefficients (`p1`, `p2`), but
//! the projection does not apply them.

mod calibration;
mod distortion;
mod projection;

pub use calibration::*;
pub use distortion::*;
pub use projection::*;

use nalgebra::{DMatrix, Matrix3, Point2, Point3, Vector2};
use cw_core::{CameraPoint, Error, KeyPoint, Result};
use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A point in normalized image coordinates, on the virtual image plane at depth `1.0`
/// in front of the camera.
///
/// Depending on where it came from, the point is either ideal (straight from a [`CameraPoint`])
/// or has had lens distortion applied by [`RadialDistortion::distort`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct NormalizedKeyPoint(pub Point2<f64>);

impl NormalizedKeyPoint {
    /// Divides the camera point by its depth.
    ///
    /// Fails with [`Error::Arithmetic`] when the point lies on the plane of the optical
    /// center (zero depth) or so close to it that the division overflows.
    ///
    /// ```
    /// use cw_core::CameraPoint;
    /// use cw_pinhole::NormalizedKeyPoint;
    ///
    /// let nkp = NormalizedKeyPoint::from_camera_point(CameraPoint::new(1.0, -2.0, 4.0)).unwrap();
    /// assert_eq!((nkp.x, nkp.y), (0.25, -0.5));
    /// assert!(NormalizedKeyPoint::from_camera_point(CameraPoint::new(1.0, 2.0, 0.0)).is_err());
    /// ```
    pub fn from_camera_point(point: CameraPoint) -> Result<Self> {
        let depth = point.depth();
        if !depth.is_finite() || depth.abs() < f64::EPSILON {
            return Err(Error::Arithmetic(format!(
                "cannot normalize camera point {:?} with depth {}",
                point.coords, depth
            )));
        }
        let normalized = Point2::new(point.x / depth, point.y / depth);
        if !normalized.coords.iter().all(|n| n.is_finite()) {
            return Err(Error::Arithmetic(format!(
                "normalizing camera point {:?} overflowed",
                point.coords
            )));
        }
        Ok(Self(normalized))
    }

    /// Conceptually appends a `1.0` component to get the point on the virtual image plane.
    pub fn virtual_image_point(self) -> Point3<f64> {
        self.coords.push(1.0).into()
    }
}

/// This contains intrinsic camera parameters as per
/// [this Wikipedia page](https://en.wikipedia.org/wiki/Camera_resectioning#Intrinsic_parameters).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CameraIntrinsics {
    pub focals: Vector2<f64>,
    pub principal_point: Point2<f64>,
    pub skew: f64,
}

impl CameraIntrinsics {
    /// Creates camera intrinsics that would create an identity intrinsic matrix.
    pub fn identity() -> Self {
        Self {
            focals: Vector2::new(1.0, 1.0),
            skew: 0.0,
            principal_point: Point2::new(0.0, 0.0),
        }
    }

    pub fn focals(self, focals: Vector2<f64>) -> Self {
        Self { focals, ..self }
    }

    pub fn focal(self, focal: f64) -> Self {
        Self {
            focals: Vector2::new(focal, focal),
            ..self
        }
    }

    pub fn principal_point(self, principal_point: Point2<f64>) -> Self {
        Self {
            principal_point,
            ..self
        }
    }

    pub fn skew(self, skew: f64) -> Self {
        Self { skew, ..self }
    }

    /// Reads intrinsics back out of a matrix `K` whose shape is only known at runtime.
    ///
    /// `K` must be 3x3 ([`Error::Shape`] otherwise) and upper triangular with a last row of
    /// `[0, 0, 1]` ([`Error::Value`] otherwise).
    pub fn try_from_matrix(k: &DMatrix<f64>) -> Result<Self> {
        if k.shape() != (3, 3) {
            return Err(Error::Shape {
                expected: (3, 3),
                found: k.shape(),
            });
        }
        if k[(1, 0)] != 0.0 || k[(2, 0)] != 0.0 || k[(2, 1)] != 0.0 || k[(2, 2)] != 1.0 {
            return Err(Error::Value(format!(
                "intrinsic matrix must be upper triangular with a last row of [0, 0, 1], found {}",
                k
            )));
        }
        Ok(Self {
            focals: Vector2::new(k[(0, 0)], k[(1, 1)]),
            principal_point: Point2::new(k[(0, 2)], k[(1, 2)]),
            skew: k[(0, 1)],
        })
    }

    /// The intrinsic matrix `K`.
    #[rustfmt::skip]
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.focals.x,  self.skew,      self.principal_point.x,
            0.0,            self.focals.y,  self.principal_point.y,
            0.0,            0.0,            1.0,
        )
    }

    /// Takes in a point from an image in pixel coordinates and
    /// converts it to a [`NormalizedKeyPoint`].
    ///
    /// No distortion is removed, so calibrating a pixel of the distorted image gives a distorted
    /// normalized keypoint.
    pub fn calibrate(&self, point: KeyPoint) -> NormalizedKeyPoint {
        let centered = point.0 - self.principal_point;
        let y = centered.y / self.focals.y;
        let x = (centered.x - self.skew * y) / self.focals.x;
        NormalizedKeyPoint(Point2::new(x, y))
    }

    /// Converts a [`NormalizedKeyPoint`] into pixel coordinates by multiplying
    /// `K * [x, y, 1]`.
    ///
    /// ```
    /// use cw_core::KeyPoint;
    /// use nalgebra::{Point2, Vector2};
    /// use cw_pinhole::{CameraIntrinsics, NormalizedKeyPoint};
    ///
    /// let intrinsics = CameraIntrinsics {
    ///     focals: Vector2::new(800.0, 900.0),
    ///     principal_point: Point2::new(500.0, 600.0),
    ///     skew: 1.7,
    /// };
    /// let kp = KeyPoint::new(471.0, 322.0);
    /// let ukp = intrinsics.uncalibrate(intrinsics.calibrate(kp));
    /// assert!((kp.0 - ukp.0).norm() < 1e-9);
    /// ```
    pub fn uncalibrate(&self, projection: NormalizedKeyPoint) -> KeyPoint {
        let uvw = self.matrix() * projection.virtual_image_point().coords;
        // The last row of K is [0, 0, 1], so w is always 1.
        KeyPoint(uvw.xy().into())
    }
}
