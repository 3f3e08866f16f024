use crate::{CameraIntrinsics, RadialDistortion, TangentialDistortion};
use core::fmt;
use nalgebra::{Matrix3, Point2, Vector2};
use cw_core::KeyPoint;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Units of measure of world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(rename_all = "lowercase"))]
pub enum WorldUnits {
    Millimeters,
    Centimeters,
    Meters,
}

impl fmt::Display for WorldUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldUnits::Millimeters => write!(f, "millimeters"),
            WorldUnits::Centimeters => write!(f, "centimeters"),
            WorldUnits::Meters => write!(f, "meters"),
        }
    }
}

/// The calibration of a single camera.
///
/// This is a plain record, constant for a given camera. Focal lengths, principal point and
/// image dimensions are in pixels; world coordinates are in [`Calibration::world_units`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Calibration {
    /// First radial distortion coefficient, scaling `r²`.
    pub k1: f64,
    /// Second radial distortion coefficient, scaling `r⁴`.
    pub k2: f64,
    /// Third radial distortion coefficient, scaling `r⁶`.
    pub k3: f64,
    /// First tangential distortion coefficient. Stored but not applied by projection.
    pub p1: f64,
    /// Second tangential distortion coefficient. Stored but not applied by projection.
    pub p2: f64,
    /// Horizontal focal length.
    pub fx: f64,
    /// Vertical focal length.
    pub fy: f64,
    /// Horizontal coordinate of the principal point.
    pub cx: f64,
    /// Vertical coordinate of the principal point.
    pub cy: f64,
    /// Skew.
    pub s: f64,
    pub image_height: u32,
    pub image_width: u32,
    pub world_units: WorldUnits,
}

impl Calibration {
    /// Builds a calibration out of its parts.
    pub fn from_parts(
        intrinsics: CameraIntrinsics,
        radial: RadialDistortion,
        tangential: TangentialDistortion,
        (image_width, image_height): (u32, u32),
        world_units: WorldUnits,
    ) -> Self {
        Self {
            k1: radial.k1,
            k2: radial.k2,
            k3: radial.k3,
            p1: tangential.p1,
            p2: tangential.p2,
            fx: intrinsics.focals.x,
            fy: intrinsics.focals.y,
            cx: intrinsics.principal_point.x,
            cy: intrinsics.principal_point.y,
            s: intrinsics.skew,
            image_height,
            image_width,
            world_units,
        }
    }

    /// Replaces focal lengths, principal point and skew.
    #[must_use]
    pub fn with_intrinsics(self, intrinsics: CameraIntrinsics) -> Self {
        Self::from_parts(
            intrinsics,
            self.radial(),
            self.tangential(),
            (self.image_width, self.image_height),
            self.world_units,
        )
    }

    pub fn intrinsics(&self) -> CameraIntrinsics {
        CameraIntrinsics {
            focals: Vector2::new(self.fx, self.fy),
            principal_point: Point2::new(self.cx, self.cy),
            skew: self.s,
        }
    }

    pub fn radial(&self) -> RadialDistortion {
        RadialDistortion::new(self.k1, self.k2, self.k3)
    }

    pub fn tangential(&self) -> TangentialDistortion {
        TangentialDistortion::new(self.p1, self.p2)
    }

    /// The intrinsic matrix `K = [[fx, s, cx], [0, fy, cy], [0, 0, 1]]`.
    pub fn k(&self) -> Matrix3<f64> {
        self.intrinsics().matrix()
    }

    /// Whether a pixel lies inside the image.
    pub fn contains(&self, keypoint: KeyPoint) -> bool {
        (0.0..self.image_width as f64).contains(&keypoint.u())
            && (0.0..self.image_height as f64).contains(&keypoint.v())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calibration() -> Calibration {
        Calibration::from_parts(
            CameraIntrinsics::identity()
                .focals(Vector2::new(1821.05, 1817.92))
                .principal_point(Point2::new(741.83, 1019.95)),
            RadialDistortion::new(-0.15, 0.05, 0.0),
            TangentialDistortion::new(0.001, -0.002),
            (1536, 2048),
            WorldUnits::Millimeters,
        )
    }

    #[test]
    fn parts_roundtrip() {
        let cal = calibration();
        assert_eq!(cal.radial(), RadialDistortion::new(-0.15, 0.05, 0.0));
        assert_eq!(cal.tangential(), TangentialDistortion::new(0.001, -0.002));
        assert_eq!((cal.image_width, cal.image_height), (1536, 2048));
        assert_eq!(
            cal.k(),
            Matrix3::new(1821.05, 0.0, 741.83, 0.0, 1817.92, 1019.95, 0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn with_intrinsics_keeps_distortion() {
        let cal = calibration().with_intrinsics(CameraIntrinsics::identity().focal(10.0));
        assert_eq!((cal.fx, cal.fy, cal.cx, cal.cy, cal.s), (10.0, 10.0, 0.0, 0.0, 0.0));
        assert_eq!(cal.k1, -0.15);
        assert_eq!(cal.p2, -0.002);
    }

    #[test]
    fn contains_bounds() {
        let cal = calibration();
        assert!(cal.contains(KeyPoint::new(0.0, 0.0)));
        assert!(cal.contains(KeyPoint::new(1535.9, 2047.9)));
        assert!(!cal.contains(KeyPoint::new(1536.0, 10.0)));
        assert!(!cal.contains(KeyPoint::new(10.0, -0.1)));
        assert!(!cal.contains(KeyPoint::new(f64::NAN, 10.0)));
    }

    #[test]
    fn units_display() {
        assert_eq!(WorldUnits::Millimeters.to_string(), "millimeters");
    }
}
