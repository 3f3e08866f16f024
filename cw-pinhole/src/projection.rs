use crate::{Calibration, NormalizedKeyPoint};
use cw_core::{CameraPoint, Error, KeyPoint, Result, Transform, WorldPoint};
use log::*;

impl Calibration {
    /// Projects a point measured in the camera frame into pixel coordinates of the
    /// original (distorted) image.
    ///
    /// The point is divided by its depth, scaled by the radial distortion factor
    /// `1 + k1 r² + k2 r⁴ + k3 r⁶` and multiplied by `K`. Tangential coefficients are not applied.
    pub fn camera_to_image(&self, point: CameraPoint) -> Result<KeyPoint> {
        if point.depth() < 0.0 {
            debug!("projecting camera point {:?} which lies behind the camera", point.coords);
        }
        let normalized = NormalizedKeyPoint::from_camera_point(point)?;
        let distorted = self.radial().distort(normalized)?;
        let keypoint = self.intrinsics().uncalibrate(distorted);
        if !keypoint.coords.iter().all(|n| n.is_finite()) {
            return Err(Error::Arithmetic(format!(
                "projection of camera point {:?} is not finite",
                point.coords
            )));
        }
        trace!(
            "camera point {:?} projected to ({}, {})",
            point.coords,
            keypoint.u(),
            keypoint.v()
        );
        Ok(keypoint)
    }

    /// Projects a point measured in the wall frame.
    ///
    /// `camera_from_world` is `T_C_W`, the transform that maps wall coordinates into camera coordinates.
    pub fn world_to_image(
        &self,
        camera_from_world: &Transform,
        point: WorldPoint,
    ) -> Result<KeyPoint> {
        // The point becomes a translation-only frame P, so T_C_P = T_C_W * T_W_P.
        let world_from_point = Transform::identity().with_translation(point.coords);
        let camera_from_point = camera_from_world.compose_transform(&world_from_point);
        let camera_point = CameraPoint::new(
            camera_from_point.x(),
            camera_from_point.y(),
            camera_from_point.z(),
        );
        self.camera_to_image(camera_point)
    }
}

/// Maps a point in the wall frame to pixel coordinates in the distorted image.
///
/// ```
/// use cw_core::{Transform, WorldPoint};
/// use cw_pinhole::{world_to_image, Calibration, WorldUnits};
///
/// let calibration = Calibration {
///     k1: 0.0, k2: 0.0, k3: 0.0,
///     p1: 0.0, p2: 0.0,
///     fx: 1821.05, fy: 1817.92,
///     cx: 741.83, cy: 1019.95,
///     s: 0.0,
///     image_height: 2048, image_width: 1536,
///     world_units: WorldUnits::Millimeters,
/// };
/// let kp = world_to_image(&calibration, &Transform::identity(), WorldPoint::new(0.0, 0.0, 1.0)).unwrap();
/// assert_eq!((kp.u(), kp.v()), (741.83, 1019.95));
/// ```
pub fn world_to_image(
    calibration: &Calibration,
    camera_from_world: &Transform,
    point: WorldPoint,
) -> Result<KeyPoint> {
    calibration.world_to_image(camera_from_world, point)
}
