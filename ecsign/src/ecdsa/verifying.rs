//! Support for verifying ECDSA signatures.
//!
//! ## Algorithm
//!
//! ```text
//! V1: verify whether r in [1,n-1], verification failed if not
//! V2: verify whether s in [1,n-1], verification failed if not
//! V3: convert the digest to an integer e (leftmost bitlen(n) bits)
//! V4: calculate w = s⁻¹ mod n
//! V5: calculate the point (x1, y1) = [e·w]G + [r·w]Q
//! V6: verification pass if (x1, y1) is not the identity and x1 mod n = r
//! ```

use super::{Signature, SignatureFormat, digest_to_number};
use crate::{Curve, Error, Result, curves, der, util::number_to_bytes};
use alloc::vec::Vec;
use digest::Digest;
use num_bigint::BigUint;
use num_traits::Zero;
use weierstrass::{Point, numbertheory};

#[cfg(feature = "pem")]
use {crate::pem, alloc::string::String};

/// Object identifier of `id-ecPublicKey` (RFC 5480).
pub(crate) const EC_PUBLIC_KEY_OID: &[u64] = &[1, 2, 840, 10045, 2, 1];

/// ECDSA public key used for verifying signatures.
///
/// Holds a non-identity point on a named curve. Keys compare equal when both
/// the curve and the point match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerifyingKey {
    curve: &'static Curve,
    point: Point<'static>,
}

impl VerifyingKey {
    /// Initialize [`VerifyingKey`] from a point on `curve`.
    ///
    /// Returns [`Error::MalformedPoint`] if the point is the identity or
    /// belongs to a different curve.
    pub fn from_public_point(point: Point<'static>, curve: &'static Curve) -> Result<Self> {
        match point.curve() {
            Some(c) if c == curve.curve() => Ok(Self { curve, point }),
            _ => Err(Error::MalformedPoint),
        }
    }

    /// Decode a public key in any of the supported point encodings:
    ///
    /// - raw `X || Y` (twice the curve's byte length)
    /// - uncompressed `04 || X || Y`
    /// - compressed `02 || X` or `03 || X`, the prefix giving the parity of `Y`
    ///
    /// Coordinates must be smaller than the field prime. With
    /// `validate_point` set, raw and uncompressed points must also satisfy
    /// the curve equation. Compressed points are always valid by
    /// construction.
    pub fn from_bytes(bytes: &[u8], curve: &'static Curve, validate_point: bool) -> Result<Self> {
        let len = curve.baselen();
        let point = match bytes {
            raw if raw.len() == 2 * len => decode_raw(raw, curve, validate_point)?,
            [0x04, raw @ ..] if raw.len() == 2 * len => decode_raw(raw, curve, validate_point)?,
            [prefix @ (0x02 | 0x03), x @ ..] if x.len() == len => {
                decode_compressed(x, *prefix == 0x03, curve)?
            }
            _ => return Err(Error::MalformedPoint),
        };

        Self::from_public_point(point, curve)
    }

    /// Parse a DER `SubjectPublicKeyInfo` with `id-ecPublicKey` and a named
    /// curve.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let (spki, rest) = der::remove_sequence(bytes)?;
        if !rest.is_empty() {
            return Err(Error::UnexpectedDer("trailing junk after DER pubkey"));
        }

        let (algorithm, point_bitstring) = der::remove_sequence(spki)?;
        let (oid_pk, rest) = der::remove_object(algorithm)?;
        if oid_pk != EC_PUBLIC_KEY_OID {
            return Err(Error::UnexpectedDer("unexpected public key algorithm"));
        }

        let (oid_curve, rest) = der::remove_object(rest)?;
        if !rest.is_empty() {
            return Err(Error::UnexpectedDer("trailing junk after DER pubkey objects"));
        }
        let curve = curves::find_curve(&oid_curve)?;

        let (point, rest) = der::remove_bitstring(point_bitstring, 0)?;
        if !rest.is_empty() {
            return Err(Error::UnexpectedDer("trailing junk after pubkey pointstring"));
        }
        if point.len() == curve.verifying_key_length() {
            return Err(Error::UnexpectedDer("raw point encoding is not allowed in DER"));
        }

        Self::from_bytes(point, curve, true)
    }

    /// Parse a PEM `PUBLIC KEY` block.
    #[cfg(feature = "pem")]
    pub fn from_pem(pem: &str) -> Result<Self> {
        Self::from_der(&pem::decode(pem, pem::PUBLIC_KEY_LABEL)?)
    }

    /// Curve this key lives on.
    pub fn curve(&self) -> &'static Curve {
        self.curve
    }

    /// Borrow the public point.
    pub fn point(&self) -> &Point<'static> {
        &self.point
    }

    /// Serialize as raw `X || Y`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let (x, y) = self.coordinates();
        let mut out = number_to_bytes(x, self.curve.order());
        out.extend_from_slice(&number_to_bytes(y, self.curve.order()));
        out
    }

    /// Serialize with the SEC1 prefix, either `04 || X || Y` or, when
    /// `compress` is set, `02/03 || X`.
    pub fn to_encoded_point(&self, compress: bool) -> Vec<u8> {
        let (x, y) = self.coordinates();
        let order = self.curve.order();

        if compress {
            let mut out = alloc::vec![0x02 | y.bit(0) as u8];
            out.extend_from_slice(&number_to_bytes(x, order));
            out
        } else {
            let mut out = alloc::vec![0x04];
            out.extend_from_slice(&self.to_bytes());
            out
        }
    }

    /// Serialize as a DER `SubjectPublicKeyInfo` carrying the uncompressed
    /// point.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let algorithm = der::encode_sequence(&[
            &der::encode_oid(EC_PUBLIC_KEY_OID)?,
            self.curve.encoded_oid(),
        ])?;
        let point = der::encode_bitstring(&self.to_encoded_point(false), 0)?;
        der::encode_sequence(&[&algorithm, &point])
    }

    /// Serialize as a PEM `PUBLIC KEY` block.
    #[cfg(feature = "pem")]
    pub fn to_pem(&self) -> Result<String> {
        pem::encode(&self.to_der()?, pem::PUBLIC_KEY_LABEL)
    }

    /// Verify an encoded signature over the hash of `msg` computed with `D`.
    ///
    /// Digests longer than the curve's byte length are truncated.
    pub fn verify<D: Digest>(
        &self,
        signature: &[u8],
        msg: &[u8],
        format: SignatureFormat,
    ) -> Result<()> {
        let e = digest_to_number(&D::digest(msg), self.curve, true)?;
        self.verify_encoded(e, signature, format)
    }

    /// Verify an encoded signature over a precomputed digest.
    ///
    /// Returns [`Error::BadDigest`] if the digest is longer than the curve's
    /// byte length. Malformed signature encodings fail with
    /// [`Error::BadSignature`].
    pub fn verify_digest(
        &self,
        signature: &[u8],
        digest: &[u8],
        format: SignatureFormat,
    ) -> Result<()> {
        let e = digest_to_number(digest, self.curve, false)?;
        self.verify_encoded(e, signature, format)
    }

    /// Verify a decoded signature over a precomputed digest.
    pub fn verify_prehashed(&self, digest: &[u8], signature: &Signature) -> Result<()> {
        let e = digest_to_number(digest, self.curve, false)?;
        self.verify_prehashed_number(&e, signature)
    }

    fn verify_encoded(&self, e: BigUint, signature: &[u8], format: SignatureFormat) -> Result<()> {
        let signature =
            Signature::decode(signature, format, self.curve).map_err(|_| Error::BadSignature)?;
        self.verify_prehashed_number(&e, &signature)
    }

    pub(crate) fn verify_prehashed_number(&self, e: &BigUint, signature: &Signature) -> Result<()> {
        let n = self.curve.order();
        let (r, s) = (signature.r(), signature.s());

        // V1, V2
        if r.is_zero() || r >= n || s.is_zero() || s >= n {
            return Err(Error::BadSignature);
        }

        // V4
        let w = numbertheory::inverse_mod(s, n).ok_or(Error::BadSignature)?;

        // V5
        let u1 = (e * &w) % n;
        let u2 = (r * &w) % n;
        let point = self.curve.generator() * &u1 + &(&self.point * &u2);

        // V6
        match point.x() {
            Some(x1) if &(x1 % n) == r => Ok(()),
            _ => Err(Error::BadSignature),
        }
    }

    fn coordinates(&self) -> (&BigUint, &BigUint) {
        match self.point.as_affine() {
            Some(affine) => (affine.x(), affine.y()),
            None => unreachable!("verifying key is never the identity"),
        }
    }
}

fn decode_raw(raw: &[u8], curve: &'static Curve, validate_point: bool) -> Result<Point<'static>> {
    let (x, y) = raw.split_at(raw.len() / 2);
    let x = BigUint::from_bytes_be(x);
    let y = BigUint::from_bytes_be(y);

    let field = curve.curve();
    if x >= *field.p() || y >= *field.p() {
        return Err(Error::MalformedPoint);
    }

    if validate_point {
        Ok(Point::new(field, x, y)?)
    } else {
        Ok(Point::new_unchecked(field, x, y))
    }
}

fn decode_compressed(x: &[u8], is_y_odd: bool, curve: &'static Curve) -> Result<Point<'static>> {
    let field = curve.curve();
    let p = field.p();
    let x = BigUint::from_bytes_be(x);
    if x >= *p {
        return Err(Error::MalformedPoint);
    }

    let beta = numbertheory::square_root_mod_prime(&field.y_squared(&x), p)
        .ok_or(Error::MalformedPoint)?;
    let y = if beta.bit(0) == is_y_odd {
        beta
    } else if beta.is_zero() {
        return Err(Error::MalformedPoint);
    } else {
        p - beta
    };

    Ok(Point::new_unchecked(field, x, y))
}
