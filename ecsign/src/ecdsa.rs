//! Elliptic Curve Digital Signature Algorithm (ECDSA)
//!
//! ## Signing/Verification Example
//!
//! ```
//! # #[cfg(feature = "sha2")]
//! # {
//! use ecsign::{
//!     curves,
//!     ecdsa::{SignatureFormat, SigningKey},
//! };
//! use sha2::Sha256;
//!
//! let signing_key = SigningKey::from_bytes(&[0x42; 32], curves::nist256p())?;
//! let message = b"ECDSA proves knowledge of a secret number in the context of a single message";
//!
//! let signature = signing_key.sign_deterministic::<Sha256>(message, &[])?;
//! let encoded = signature.encode(SignatureFormat::Der, signing_key.curve())?;
//!
//! let verifying_key = signing_key.verifying_key();
//! verifying_key.verify::<Sha256>(&encoded, message, SignatureFormat::Der)?;
//! # }
//! # Ok::<(), ecsign::Error>(())
//! ```

pub mod recoverable;

mod signature;
mod signing;
mod verifying;

pub use self::{
    recoverable::RecoveryId,
    signature::{Signature, SignatureFormat},
    signing::SigningKey,
    verifying::VerifyingKey,
};

use crate::{Curve, Error, Result, util::bit_length};
use num_bigint::BigUint;

/// Convert a message digest to the integer `e` used by the signing equation.
///
/// The leftmost `bit_length(n)` bits of the digest are kept. Digests longer
/// than the curve's byte length are rejected unless `allow_truncate` is set,
/// in which case the excess bytes are dropped.
pub(crate) fn digest_to_number(
    digest: &[u8],
    curve: &Curve,
    allow_truncate: bool,
) -> Result<BigUint> {
    let max = curve.baselen();
    let digest = if digest.len() <= max {
        digest
    } else if allow_truncate {
        &digest[..max]
    } else {
        return Err(Error::BadDigest {
            len: digest.len(),
            max,
        });
    };

    let e = BigUint::from_bytes_be(digest);
    let excess = (digest.len() * 8).saturating_sub(bit_length(curve.order()));
    Ok(e >> excess)
}

#[cfg(test)]
mod tests {
    use super::digest_to_number;
    use crate::{Error, curves};
    use num_bigint::BigUint;

    #[test]
    fn digest_width_matches_order() {
        let curve = curves::nist256p();
        assert_eq!(digest_to_number(&[0xff; 32], curve, false).unwrap().bits(), 256);
        assert_eq!(digest_to_number(&[0x01], curve, false), Ok(BigUint::from(1u8)));
    }

    #[test]
    fn long_digests() {
        let curve = curves::nist192p();
        assert_eq!(
            digest_to_number(&[0u8; 32], curve, false),
            Err(Error::BadDigest { len: 32, max: 24 })
        );

        let mut digest = [0u8; 32];
        digest[23] = 1;
        digest[24] = 0xff;
        assert_eq!(digest_to_number(&digest, curve, true), Ok(BigUint::from(1u8)));
    }

    #[test]
    fn p521_drops_low_bits() {
        let curve = curves::nist521p();
        let e = digest_to_number(&[0xff; 66], curve, false).unwrap();
        assert_eq!(e.bits(), 521);
        assert_eq!(e, (BigUint::from(1u8) << 521) - 1u8);
    }
}
