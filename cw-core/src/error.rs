use core::fmt;
use thiserror::Error;

/// Which side of a composition an operand was supplied on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Errors raised by transforms and projections.
///
/// Every error is raised at the point of detection and no operation leaves partial state behind,
/// since all the values involved are immutable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A matrix or vector had the wrong dimensions.
    #[error("expected a {}x{} matrix, found {}x{}", expected.0, expected.1, found.0, found.1)]
    Shape {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A malformed quaternion, intrinsic matrix or point.
    #[error("invalid value: {0}")]
    Value(String),
    /// Zero depth or a non-finite intermediate during projection.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
    /// A composition operand that is neither a transform, a 4x4 matrix nor (on the right) a homogeneous point.
    #[error("bad {0}-hand operand")]
    Operand(Side),
}

pub type Result<T> = core::result::Result<T, Error>;
