use cw_core::{KeyPoint, Result, Transform, WorldPoint};
use cw_pinhole::Calibration;
use image::{DynamicImage, Rgba};
use imageproc::drawing;
use log::*;
use std::fmt;
use std::str::FromStr;

/// Marker colours, cycled through in point order.
pub const MARKER_COLOURS: [[u8; 3]; 10] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
];

pub fn marker_colour(index: usize) -> Rgba<u8> {
    let [r, g, b] = MARKER_COLOURS[index % MARKER_COLOURS.len()];
    Rgba([r, g, b, 255])
}

/// Draws an `x` of half-width `marker_size` pixels centred on each keypoint.
///
/// Markers partly or entirely outside the image are clipped.
pub fn render_points(image: &DynamicImage, keypoints: &[KeyPoint], marker_size: u32) -> DynamicImage {
    let mut canvas = image.to_rgba8();
    let half = marker_size as f32;
    for (ix, keypoint) in keypoints.iter().enumerate() {
        let colour = marker_colour(ix);
        let (u, v) = (keypoint.u() as f32, keypoint.v() as f32);
        drawing::draw_line_segment_mut(
            &mut canvas,
            (u - half, v - half),
            (u + half, v + half),
            colour,
        );
        drawing::draw_line_segment_mut(
            &mut canvas,
            (u - half, v + half),
            (u + half, v - half),
            colour,
        );
    }
    DynamicImage::ImageRgba8(canvas)
}

/// Projects wall frame points into the image seen from `camera_from_world` (`T_C_W`).
///
/// Each projection is logged; points landing outside the image are kept but warned about.
pub fn project_points(
    calibration: &Calibration,
    camera_from_world: &Transform,
    points: &[WorldPoint],
) -> Result<Vec<KeyPoint>> {
    points
        .iter()
        .map(|&point| -> Result<KeyPoint> {
            let keypoint = calibration.world_to_image(camera_from_world, point)?;
            info!(
                "({}, {}, {}) -> ({:.2}, {:.2})",
                point.x,
                point.y,
                point.z,
                keypoint.u(),
                keypoint.v()
            );
            if !calibration.contains(keypoint) {
                warn!(
                    "({}, {}, {}) falls outside the {}x{} image",
                    point.x, point.y, point.z, calibration.image_width, calibration.image_height
                );
            }
            Ok(keypoint)
        })
        .collect()
}

/// A wall frame point given on the command line as `X,Y,Z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointArg(pub WorldPoint);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePointError(String);

impl fmt::Display for ParsePointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a point as X,Y,Z, got {:?}", self.0)
    }
}

impl std::error::Error for ParsePointError {}

impl FromStr for PointArg {
    type Err = ParsePointError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let err = || ParsePointError(s.to_owned());
        let coords = s
            .split(',')
            .map(|c| c.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| err())?;
        match coords[..] {
            [x, y, z] => Ok(Self(WorldPoint::new(x, y, z))),
            _ => Err(err()),
        }
    }
}
