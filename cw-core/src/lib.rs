//! # Curtain Wall Core
//!
//! This library provides the shared types for working with the glass curtain wall installation dataset:
//! rigid homogeneous transforms, points tagged with the frame they are measured in, and pixel keypoints.
//! The other crates in this workspace (`cw-pinhole`, `cw-dataset`) build on top of these types.
//!
//! ## Frames
//!
//! Every point and every transform is expressed in a named reference frame. The dataset uses three:
//!
//! * `W` - the wall frame, in which the motion capture system reports poses and in which panel corners are measured
//! * `C` - the camera frame, where the positive X axis is right, positive Y axis is down, and positive Z axis is
//!   forwards out of the optical center
//! * a point frame, which is just a translation-only frame sitting at some point of interest
//!
//! A [`Transform`] is named `T_A_B` when it maps coordinates measured in frame `B` into coordinates measured in
//! frame `A`. Composition chains the inner frames away, so `T_C_W * T_W_P` gives `T_C_P`:
//!
//! ```
//! use cw_core::Transform;
//! use cw_core::nalgebra::Vector3;
//!
//! let t_c_w = Transform::identity().with_translation(Vector3::new(0.0, 0.0, 500.0));
//! let t_w_p = Transform::identity().with_translation(Vector3::new(10.0, 20.0, 0.0));
//! let t_c_p = t_c_w * t_w_p;
//! assert_eq!(t_c_p.translation(), Vector3::new(10.0, 20.0, 500.0));
//! ```
//!
//! ```text
//!        W                 C
//!        o-------->        o-------->  x
//!        |                 |\
//!        |    p            | \  z (forwards)
//!        v                 v
//! ```

mod error;
mod keypoint;
mod point;
mod transform;

pub use error::*;
pub use keypoint::*;
pub use nalgebra;
pub use point::*;
pub use transform::*;
