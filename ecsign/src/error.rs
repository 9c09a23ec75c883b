//! Error type

use core::fmt::{self, Display};

/// Result type with the `ecsign` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// ECDSA engine errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Object identifier does not name one of the supported curves.
    UnknownCurve,

    /// Encoded point is malformed or does not lie on the curve.
    MalformedPoint,

    /// Encoded value has the wrong length.
    InvalidLength {
        /// Length required by the curve.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },

    /// Secret exponent outside of `[1, n)`.
    InvalidSecretExponent,

    /// DER structure is malformed.
    UnexpectedDer(&'static str),

    /// PEM armor is malformed or carries an unexpected label.
    Pem,

    /// Digest is longer than the curve's byte length.
    BadDigest {
        /// Length of the digest supplied.
        len: usize,
        /// Maximum length accepted by the curve.
        max: usize,
    },

    /// Signature verification failed.
    BadSignature,

    /// Signature encoding is malformed.
    MalformedSignature,

    /// Signing produced `r = 0` or `s = 0` for the given nonce.
    DegenerateSignature,

    /// Random sampling did not produce an in-range value within the
    /// iteration bound; the entropy source is most likely broken.
    EntropyExhausted,

    /// The entropy source reported a failure.
    Entropy,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownCurve => f.write_str("unknown curve"),
            Error::MalformedPoint => f.write_str("malformed point encoding"),
            Error::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {expected} bytes, got {actual}")
            }
            Error::InvalidSecretExponent => f.write_str("secret exponent out of range"),
            Error::UnexpectedDer(msg) => write!(f, "unexpected DER: {msg}"),
            Error::Pem => f.write_str("PEM error"),
            Error::BadDigest { len, max } => {
                write!(f, "digest too long: {len} bytes, curve accepts at most {max}")
            }
            Error::BadSignature => f.write_str("signature verification failed"),
            Error::MalformedSignature => f.write_str("malformed signature encoding"),
            Error::DegenerateSignature => f.write_str("nonce produced r or s equal to zero"),
            Error::EntropyExhausted => {
                f.write_str("entropy source failed to produce an in-range value")
            }
            Error::Entropy => f.write_str("entropy source failure"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<weierstrass::Error> for Error {
    fn from(_: weierstrass::Error) -> Error {
        Error::MalformedPoint
    }
}

impl From<::der::Error> for Error {
    fn from(err: ::der::Error) -> Error {
        use ::der::ErrorKind;

        Error::UnexpectedDer(match err.kind() {
            ErrorKind::Incomplete { .. } => "length longer than provided buffer",
            ErrorKind::Length { .. } | ErrorKind::Overflow | ErrorKind::Overlength => {
                "invalid length"
            }
            ErrorKind::Noncanonical { .. } => "non-canonical encoding",
            ErrorKind::OidMalformed => "malformed object identifier",
            ErrorKind::TagUnexpected { .. } | ErrorKind::TagUnknown { .. } => "unexpected tag",
            ErrorKind::TrailingData { .. } => "trailing data",
            ErrorKind::Value { .. } => "invalid value",
            _ => "malformed DER",
        })
    }
}

#[cfg(feature = "pem")]
impl From<pem_rfc7468::Error> for Error {
    fn from(_: pem_rfc7468::Error) -> Error {
        Error::Pem
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use ::der::ErrorKind;

    #[test]
    fn der_errors() {
        assert_eq!(
            Error::from(::der::Error::from(ErrorKind::Overlength)),
            Error::UnexpectedDer("invalid length")
        );
        assert_eq!(
            Error::from(::der::Error::from(ErrorKind::OidMalformed)),
            Error::UnexpectedDer("malformed object identifier")
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_error() {
        use std::{boxed::Box, string::ToString};

        let err: Box<dyn std::error::Error> = Box::new(Error::BadDigest { len: 32, max: 24 });
        assert_eq!(
            err.to_string(),
            "digest too long: 32 bytes, curve accepts at most 24"
        );
    }
}
