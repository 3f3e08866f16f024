use approx::assert_relative_eq;
use nalgebra::{Matrix3, Vector3, Vector4};
use cw_core::{CameraPoint, Error, QuaternionOrder, Transform, WorldPoint};
use cw_pinhole::{world_to_image, Calibration, WorldUnits};

fn undistorted() -> Calibration {
    Calibration {
        k1: 0.0,
        k2: 0.0,
        k3: 0.0,
        p1: 0.0,
        p2: 0.0,
        fx: 1821.05,
        fy: 1817.92,
        cx: 741.83,
        cy: 1019.95,
        s: 0.0,
        image_height: 2048,
        image_width: 1536,
        world_units: WorldUnits::Millimeters,
    }
}

#[test]
fn optical_axis_lands_on_principal_point() {
    let kp = world_to_image(
        &undistorted(),
        &Transform::identity(),
        WorldPoint::new(0.0, 0.0, 1.0),
    )
    .unwrap();
    assert_eq!(kp.u(), 741.83);
    assert_eq!(kp.v(), 1019.95);
}

#[test]
fn optical_axis_ignores_distortion() {
    let cal = Calibration {
        k1: -0.1552775701035,
        k2: 0.0472686081157939,
        k3: 0.01,
        ..undistorted()
    };
    let kp = world_to_image(&cal, &Transform::identity(), WorldPoint::new(0.0, 0.0, 2500.0)).unwrap();
    assert_eq!((kp.u(), kp.v()), (741.83, 1019.95));
}

#[test]
fn k1_only_matches_hand_computation() {
    let k1 = -0.1552775701035;
    let cal = Calibration { k1, ..undistorted() };
    let (xc, yc, zc) = (120.0, -340.0, 1500.0);
    let kp = world_to_image(&cal, &Transform::identity(), WorldPoint::new(xc, yc, zc)).unwrap();

    let (xn, yn) = (xc / zc, yc / zc);
    let r2 = xn * xn + yn * yn;
    let alpha = 1.0 + k1 * r2;
    let expected_u = cal.fx * xn * alpha + cal.cx;
    let expected_v = cal.fy * yn * alpha + cal.cy;
    assert_relative_eq!(kp.u(), expected_u, epsilon = 1e-9);
    assert_relative_eq!(kp.v(), expected_v, epsilon = 1e-9);
}

#[test]
fn all_radial_terms_and_skew() {
    let cal = Calibration {
        k1: -0.2,
        k2: 0.05,
        k3: -0.01,
        s: 3.0,
        ..undistorted()
    };
    let p = Vector3::new(-400.0, 250.0, 900.0);
    let kp = world_to_image(&cal, &Transform::identity(), WorldPoint(p.into())).unwrap();

    let (xn, yn) = (p.x / p.z, p.y / p.z);
    let r2 = xn * xn + yn * yn;
    let alpha = 1.0 + cal.k1 * r2 + cal.k2 * r2 * r2 + cal.k3 * r2 * r2 * r2;
    let uvw = cal.k() * Vector3::new(xn * alpha, yn * alpha, 1.0);
    assert_relative_eq!(kp.u(), uvw.x, epsilon = 1e-9);
    assert_relative_eq!(kp.v(), uvw.y, epsilon = 1e-9);
}

#[test]
fn tangential_coefficients_are_not_applied() {
    let plain = undistorted();
    let tangential = Calibration {
        p1: 0.3,
        p2: -0.2,
        ..plain
    };
    let t = Transform::identity();
    let p = WorldPoint::new(300.0, 200.0, 1000.0);
    assert_eq!(
        world_to_image(&plain, &t, p).unwrap(),
        world_to_image(&tangential, &t, p).unwrap()
    );
}

#[test]
fn zero_depth_is_arithmetic_error() {
    let err = world_to_image(
        &undistorted(),
        &Transform::identity(),
        WorldPoint::new(1.0, 2.0, 0.0),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Arithmetic(_)), "{:?}", err);
}

#[test]
fn zero_depth_after_transform() {
    // The camera sits 500 units behind the wall, so a point 500 units in front of the wall
    // is at the camera's depth.
    let t_c_w = Transform::identity().with_translation(Vector3::new(0.0, 0.0, 500.0));
    let err = world_to_image(&undistorted(), &t_c_w, WorldPoint::new(10.0, 10.0, -500.0)).unwrap_err();
    assert!(matches!(err, Error::Arithmetic(_)));
}

#[test]
fn extreme_distortion_is_arithmetic_error() {
    let cal = Calibration {
        k3: 1e300,
        ..undistorted()
    };
    let err = world_to_image(&cal, &Transform::identity(), WorldPoint::new(1e9, 0.0, 1.0)).unwrap_err();
    assert!(matches!(err, Error::Arithmetic(_)));
}

#[test]
fn world_to_image_uses_camera_pose() {
    // Camera 2 m in front of the wall, looking back at it (rotated half a turn about y).
    let t_w_c = Transform::identity()
        .with_quaternion(&[0.0, 0.0, 1.0, 0.0], QuaternionOrder::Wxyz)
        .unwrap()
        .with_translation(Vector3::new(50.0, 80.0, 2000.0));
    let t_c_w = t_w_c.inverse();
    let cal = Calibration {
        k1: -0.1552775701035,
        k2: 0.0472686081157939,
        ..undistorted()
    };

    let p = WorldPoint::new(103.2, 153.2, 0.0);
    let camera = t_c_w * p.homogeneous();
    assert_relative_eq!(camera, Vector4::new(-53.2, 73.2, 2000.0, 1.0), epsilon = 1e-9);

    let via_world = cal.world_to_image(&t_c_w, p).unwrap();
    let via_camera = cal
        .camera_to_image(CameraPoint::new(camera.x, camera.y, camera.z))
        .unwrap();
    assert_relative_eq!(via_world.0, via_camera.0, epsilon = 1e-9);
    assert!(cal.contains(via_world));
}

#[test]
fn point_behind_camera_still_projects() {
    let t_c_w = Transform::identity().with_rotation(Matrix3::identity());
    let kp = world_to_image(&undistorted(), &t_c_w, WorldPoint::new(0.0, 0.0, -10.0)).unwrap();
    assert_eq!((kp.u(), kp.v()), (741.83, 1019.95));
}
