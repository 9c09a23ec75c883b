//! Public key recovery.
//!
//! An ECDSA signature `(r, s)` over a known digest determines the signer's
//! public key up to a handful of candidates: `r` is the x-coordinate of the
//! nonce point `R` reduced modulo `n`, and for each possible `R` the key is
//! `r⁻¹(sR − eG)`. A [`RecoveryId`] records which `R` was used so the key can
//! be recovered exactly.

use super::{Signature, SignatureFormat, VerifyingKey, digest_to_number};
use crate::{Curve, Error, Result};
use alloc::vec::Vec;
use digest::Digest;
use num_bigint::BigUint;
use num_traits::Zero;
use weierstrass::{Point, numbertheory};

/// Recovery id: which of the candidate nonce points produced a signature.
///
/// Bit 0 is the parity of the y-coordinate of `R`, bit 1 is set when the
/// x-coordinate of `R` exceeded the group order and was reduced to form `r`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct RecoveryId(u8);

impl RecoveryId {
    /// Maximum supported value for the recovery ID (inclusive).
    pub const MAX: u8 = 3;

    /// Create a recovery id from its two flags.
    pub const fn new(is_y_odd: bool, is_x_reduced: bool) -> Self {
        Self((is_x_reduced as u8) << 1 | (is_y_odd as u8))
    }

    /// Is the y-coordinate of `R` odd?
    pub const fn is_y_odd(self) -> bool {
        (self.0 & 1) != 0
    }

    /// Was the x-coordinate of `R` reduced modulo `n`?
    pub const fn is_x_reduced(self) -> bool {
        (self.0 & 0b10) != 0
    }

    /// Convert a `u8` into a [`RecoveryId`].
    pub const fn from_byte(byte: u8) -> Option<Self> {
        if byte <= Self::MAX { Some(Self(byte)) } else { None }
    }

    /// Convert this [`RecoveryId`] into a `u8`.
    pub const fn to_byte(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RecoveryId {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self> {
        Self::from_byte(byte).ok_or(Error::MalformedSignature)
    }
}

impl From<RecoveryId> for u8 {
    fn from(id: RecoveryId) -> u8 {
        id.0
    }
}

impl VerifyingKey {
    /// Recover every public key for which `signature` is valid over the hash
    /// of `msg` computed with `D`.
    ///
    /// Digests longer than the curve's byte length are truncated.
    pub fn from_public_key_recovery<D: Digest>(
        signature: &[u8],
        msg: &[u8],
        curve: &'static Curve,
        format: SignatureFormat,
    ) -> Result<Vec<Self>> {
        let e = digest_to_number(&D::digest(msg), curve, true)?;
        recover_all(signature, &e, curve, format)
    }

    /// Recover every public key for which `signature` is valid over
    /// `digest`.
    ///
    /// Returns [`Error::BadDigest`] if the digest is longer than the curve's
    /// byte length. Otherwise returns between zero and four keys.
    pub fn from_public_key_recovery_with_digest(
        signature: &[u8],
        digest: &[u8],
        curve: &'static Curve,
        format: SignatureFormat,
    ) -> Result<Vec<Self>> {
        let e = digest_to_number(digest, curve, false)?;
        recover_all(signature, &e, curve, format)
    }

    /// Recover the public key that produced `signature` over `digest`, using
    /// the signature's [`RecoveryId`].
    ///
    /// Returns [`Error::BadDigest`] if the digest is longer than the curve's
    /// byte length.
    pub fn recover_from_digest(
        digest: &[u8],
        signature: &Signature,
        curve: &'static Curve,
    ) -> Result<Self> {
        let id = signature.recovery_id().ok_or(Error::MalformedSignature)?;
        let e = digest_to_number(digest, curve, false)?;
        check_range(signature, curve)?;

        let mut x = signature.r().clone();
        if id.is_x_reduced() {
            x += curve.order();
        }
        if x >= *curve.curve().p() {
            return Err(Error::BadSignature);
        }

        recover(signature, &e, curve, &x, id.is_y_odd()).ok_or(Error::BadSignature)
    }
}

fn recover_all(
    signature: &[u8],
    e: &BigUint,
    curve: &'static Curve,
    format: SignatureFormat,
) -> Result<Vec<VerifyingKey>> {
    let signature = Signature::decode(signature, format, curve)?;
    check_range(&signature, curve)?;

    let p = curve.curve().p();
    let mut keys = Vec::new();
    let mut x = signature.r().clone();
    while x < *p {
        for is_y_odd in [false, true] {
            if let Some(key) = recover(&signature, e, curve, &x, is_y_odd) {
                keys.push(key);
            }
        }
        x += curve.order();
    }

    Ok(keys)
}

fn check_range(signature: &Signature, curve: &Curve) -> Result<()> {
    let n = curve.order();
    let (r, s) = (signature.r(), signature.s());
    if r.is_zero() || r >= n || s.is_zero() || s >= n {
        return Err(Error::BadSignature);
    }
    Ok(())
}

/// Compute `r⁻¹(sR − eG)` for the nonce point with x-coordinate `x` and the
/// given y parity, keeping the result only if the signature verifies.
fn recover(
    signature: &Signature,
    e: &BigUint,
    curve: &'static Curve,
    x: &BigUint,
    is_y_odd: bool,
) -> Option<VerifyingKey> {
    let field = curve.curve();
    let p = field.p();
    let beta = numbertheory::square_root_mod_prime(&field.y_squared(x), p)?;
    let y = if beta.bit(0) == is_y_odd {
        beta
    } else if beta.is_zero() {
        return None;
    } else {
        p - beta
    };

    let big_r = Point::new_unchecked(field, x.clone(), y);
    let r_inv = numbertheory::inverse_mod(signature.r(), curve.order())?;
    let neg_eg = -(curve.generator() * e);
    let point = (&big_r * signature.s() + &neg_eg) * &r_inv;

    let key = VerifyingKey::from_public_point(point, curve).ok()?;
    key.verify_prehashed_number(e, signature).ok()?;
    Some(key)
}
