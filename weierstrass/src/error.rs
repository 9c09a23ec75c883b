//! Error type

use core::fmt::{self, Display};

/// Result type with the `weierstrass` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Point construction errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Coordinates do not satisfy the curve equation, or are not reduced
    /// modulo the field prime.
    PointNotOnCurve,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PointNotOnCurve => f.write_str("point is not on the curve"),
        }
    }
}

impl core::error::Error for Error {}
