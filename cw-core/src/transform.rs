use crate::{Error, Result, Side};
use core::ops::Mul;
use derive_more::{AsRef, From, Into};
use nalgebra::{DMatrix, Matrix3, Matrix4, Quaternion, Rotation3, UnitQuaternion, Vector3, Vector4};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Component ordering of a quaternion stored as four numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum QuaternionOrder {
    /// `[w, x, y, z]`, as reported by the motion capture system.
    Wxyz,
    /// `[x, y, z, w]`, scalar last.
    Xyzw,
}

/// A rigid homogeneous transformation `[[R, P], [0, 0, 0, 1]]`.
///
/// A transform named `T_A_B` maps coordinates measured in frame `B` into frame `A`.
/// Transforms are immutable values: every `with_*` method, [`Transform::inverse`] and every
/// composition returns a new transform built from a copy of the matrix.
///
/// The rotation block is only required to be 3x3. Nothing checks that it is orthonormal,
/// but [`Transform::inverse`] is only correct when it is.
#[derive(Debug, Clone, Copy, PartialEq, AsRef, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Transform(Matrix4<f64>);

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Creates a transform with no rotation and no translation.
    pub fn identity() -> Self {
        Self(Matrix4::identity())
    }

    /// Creates a transform from a dynamically sized matrix, which must be 4x4.
    ///
    /// ```
    /// use cw_core::{Error, Transform};
    /// use cw_core::nalgebra::DMatrix;
    ///
    /// let t = Transform::from_matrix(&DMatrix::identity(4, 4)).unwrap();
    /// assert_eq!(t, Transform::identity());
    ///
    /// let err = Transform::from_matrix(&DMatrix::identity(3, 4)).unwrap_err();
    /// assert!(matches!(err, Error::Shape { found: (3, 4), .. }));
    /// ```
    pub fn from_matrix(matrix: &DMatrix<f64>) -> Result<Self> {
        if matrix.shape() != (4, 4) {
            return Err(Error::Shape {
                expected: (4, 4),
                found: matrix.shape(),
            });
        }
        Ok(Self(Matrix4::from_fn(|r, c| matrix[(r, c)])))
    }

    /// Retrieve the homogeneous matrix.
    pub fn matrix(&self) -> Matrix4<f64> {
        self.0
    }

    #[must_use]
    pub fn with_x(&self, x: f64) -> Self {
        let mut matrix = self.0;
        matrix[(0, 3)] = x;
        Self(matrix)
    }

    #[must_use]
    pub fn with_y(&self, y: f64) -> Self {
        let mut matrix = self.0;
        matrix[(1, 3)] = y;
        Self(matrix)
    }

    #[must_use]
    pub fn with_z(&self, z: f64) -> Self {
        let mut matrix = self.0;
        matrix[(2, 3)] = z;
        Self(matrix)
    }

    /// Replaces the translation block, leaving every other entry untouched.
    #[must_use]
    pub fn with_translation(&self, translation: Vector3<f64>) -> Self {
        let mut matrix = self.0;
        matrix.fixed_slice_mut::<3, 1>(0, 3).copy_from(&translation);
        Self(matrix)
    }

    /// Replaces the whole fourth column, including the bottom-right entry.
    ///
    /// The last component of `translation` should be `1.0`. Anything else changes the
    /// homogeneous divisor of every point this transform is applied to.
    #[must_use]
    pub fn with_translation_homogeneous(&self, translation: Vector4<f64>) -> Self {
        let mut matrix = self.0;
        matrix.set_column(3, &translation);
        Self(matrix)
    }

    /// Replaces the rotation block, leaving every other entry untouched.
    #[must_use]
    pub fn with_rotation(&self, rotation: Matrix3<f64>) -> Self {
        let mut matrix = self.0;
        matrix.fixed_slice_mut::<3, 3>(0, 0).copy_from(&rotation);
        Self(matrix)
    }

    /// Replaces the rotation block with the rotation matrix of a quaternion.
    ///
    /// The quaternion must have exactly four finite components. It is not normalized,
    /// so a quaternion that is not of unit norm produces a rotation block that is not orthonormal.
    ///
    /// ```
    /// use cw_core::{QuaternionOrder, Transform};
    /// use cw_core::nalgebra::Matrix3;
    ///
    /// let half = core::f64::consts::FRAC_1_SQRT_2;
    /// // A quarter turn about z.
    /// let t = Transform::identity()
    ///     .with_quaternion(&[half, 0.0, 0.0, half], QuaternionOrder::Wxyz)
    ///     .unwrap();
    /// let expected = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
    /// assert!((t.rotation() - expected).norm() < 1e-12);
    /// ```
    pub fn with_quaternion(&self, quaternion: &[f64], order: QuaternionOrder) -> Result<Self> {
        let q: [f64; 4] = quaternion.try_into().map_err(|_| {
            Error::Value(format!(
                "quaternion must have 4 components, found {}",
                quaternion.len()
            ))
        })?;
        if q.iter().any(|n| !n.is_finite()) {
            return Err(Error::Value(format!(
                "quaternion components must be finite, found {:?}",
                q
            )));
        }
        let [w, i, j, k] = match order {
            QuaternionOrder::Wxyz => q,
            QuaternionOrder::Xyzw => [q[3], q[0], q[1], q[2]],
        };
        Ok(self.with_rotation(quaternion_matrix(Quaternion::new(w, i, j, k))))
    }

    pub fn x(&self) -> f64 {
        self.0[(0, 3)]
    }

    pub fn y(&self) -> f64 {
        self.0[(1, 3)]
    }

    pub fn z(&self) -> f64 {
        self.0[(2, 3)]
    }

    pub fn translation(&self) -> Vector3<f64> {
        self.0.fixed_slice::<3, 1>(0, 3).into_owned()
    }

    /// The fourth column. Its last entry is the matrix's bottom-right entry, normally `1.0`.
    pub fn translation_homogeneous(&self) -> Vector4<f64> {
        self.0.column(3).into_owned()
    }

    pub fn rotation(&self) -> Matrix3<f64> {
        self.0.fixed_slice::<3, 3>(0, 0).into_owned()
    }

    /// Converts the rotation block into a quaternion in the requested ordering.
    ///
    /// `q` and `-q` describe the same rotation, so callers comparing quaternions should accept either sign.
    pub fn quaternion(&self, order: QuaternionOrder) -> Vector4<f64> {
        let rotation = Rotation3::from_matrix_unchecked(self.rotation());
        // Stored as [i, j, k, w].
        let xyzw = UnitQuaternion::from_rotation_matrix(&rotation)
            .into_inner()
            .coords;
        match order {
            QuaternionOrder::Xyzw => xyzw,
            QuaternionOrder::Wxyz => Vector4::new(xyzw.w, xyzw.x, xyzw.y, xyzw.z),
        }
    }

    /// Inverts the transform using `R^T` and `-R^T * P` instead of a general 4x4 inverse.
    ///
    /// Only correct when the rotation block is orthonormal. The result always has a bottom row of `[0, 0, 0, 1]`.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation().transpose();
        let translation = -(rotation * self.translation());
        Self::identity()
            .with_rotation(rotation)
            .with_translation(translation)
    }

    /// Composes `self * rhs`.
    ///
    /// Composing with a transform or a 4x4 matrix gives a transform; composing with a
    /// homogeneous point gives a plain point.
    ///
    /// ```
    /// use cw_core::{Composed, Transform};
    /// use cw_core::nalgebra::{Vector3, Vector4};
    ///
    /// let t = Transform::identity().with_translation(Vector3::new(1.0, 2.0, 3.0));
    /// assert!(matches!(t.compose(t), Composed::Transform(_)));
    /// assert_eq!(
    ///     t.compose(Vector4::new(0.0, 0.0, 0.0, 1.0)),
    ///     Composed::Point(Vector4::new(1.0, 2.0, 3.0, 1.0)),
    /// );
    /// ```
    pub fn compose(&self, rhs: impl Into<Operand>) -> Composed {
        match rhs.into() {
            Operand::Transform(rhs) => Composed::Transform(self.compose_transform(&rhs)),
            Operand::Matrix(rhs) => Composed::Transform(Self(self.0 * rhs)),
            Operand::Point(rhs) => Composed::Point(self.apply_to_point(rhs)),
        }
    }

    /// Composes `self * rhs` for two transforms.
    #[must_use]
    pub fn compose_transform(&self, rhs: &Transform) -> Self {
        Self(self.0 * rhs.0)
    }

    /// Maps a homogeneous point through the transform.
    pub fn apply_to_point(&self, point: Vector4<f64>) -> Vector4<f64> {
        self.0 * point
    }

    /// Composes `self * rhs` where the shape of `rhs` is only known at runtime.
    ///
    /// A 4x4 matrix gives a transform, a 4x1 column gives a point, anything else fails
    /// with [`Error::Operand`].
    pub fn try_compose(&self, rhs: &DMatrix<f64>) -> Result<Composed> {
        match rhs.shape() {
            (4, 4) => Ok(self.compose(Matrix4::from_fn(|r, c| rhs[(r, c)]))),
            (4, 1) => Ok(self.compose(Vector4::from_fn(|r, _| rhs[(r, 0)]))),
            _ => Err(Error::Operand(Side::Right)),
        }
    }

    /// Composes `lhs * self`.
    #[must_use]
    pub fn pre_compose(&self, lhs: &Matrix4<f64>) -> Self {
        Self(lhs * self.0)
    }

    /// Composes `lhs * self` where the shape of `lhs` is only known at runtime.
    ///
    /// Only a 4x4 matrix is accepted. Points are never multiplied from the left.
    pub fn try_pre_compose(&self, lhs: &DMatrix<f64>) -> Result<Self> {
        if lhs.shape() != (4, 4) {
            return Err(Error::Operand(Side::Left));
        }
        Ok(self.pre_compose(&Matrix4::from_fn(|r, c| lhs[(r, c)])))
    }
}

/// The homogeneous form of the quaternion to rotation matrix formula.
///
/// Equal to the usual `1 - 2(y² + z²)` form for unit quaternions, and scales with `|q|²` otherwise.
#[rustfmt::skip]
fn quaternion_matrix(q: Quaternion<f64>) -> Matrix3<f64> {
    let (w, x, y, z) = (q.w, q.i, q.j, q.k);
    let (ww, xx, yy, zz) = (w * w, x * x, y * y, z * z);
    let (wx, wy, wz) = (2.0 * w * x, 2.0 * w * y, 2.0 * w * z);
    let (xy, xz, yz) = (2.0 * x * y, 2.0 * x * z, 2.0 * y * z);
    Matrix3::new(
        ww + xx - yy - zz,  xy - wz,            xz + wy,
        xy + wz,            ww - xx + yy - zz,  yz - wx,
        xz - wy,            yz + wx,            ww - xx - yy + zz,
    )
}

/// The right-hand side of [`Transform::compose`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Transform(Transform),
    Matrix(Matrix4<f64>),
    /// A homogeneous point `[x, y, z, w]`.
    Point(Vector4<f64>),
}

impl From<Transform> for Operand {
    fn from(t: Transform) -> Self {
        Operand::Transform(t)
    }
}

impl From<Matrix4<f64>> for Operand {
    fn from(m: Matrix4<f64>) -> Self {
        Operand::Matrix(m)
    }
}

impl From<Vector4<f64>> for Operand {
    fn from(p: Vector4<f64>) -> Self {
        Operand::Point(p)
    }
}

/// The result of [`Transform::compose`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Composed {
    Transform(Transform),
    Point(Vector4<f64>),
}

impl Composed {
    pub fn transform(self) -> Option<Transform> {
        match self {
            Composed::Transform(t) => Some(t),
            Composed::Point(_) => None,
        }
    }

    pub fn point(self) -> Option<Vector4<f64>> {
        match self {
            Composed::Point(p) => Some(p),
            Composed::Transform(_) => None,
        }
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.compose_transform(&rhs)
    }
}

impl Mul<Matrix4<f64>> for Transform {
    type Output = Transform;

    fn mul(self, rhs: Matrix4<f64>) -> Transform {
        Transform(self.0 * rhs)
    }
}

impl Mul<Transform> for Matrix4<f64> {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        rhs.pre_compose(&self)
    }
}

impl Mul<Vector4<f64>> for Transform {
    type Output = Vector4<f64>;

    fn mul(self, rhs: Vector4<f64>) -> Vector4<f64> {
        self.apply_to_point(rhs)
    }
}
