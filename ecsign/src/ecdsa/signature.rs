//! ECDSA signatures and their wire encodings.

use super::RecoveryId;
use crate::{
    Curve, Error, Result, der,
    util::{bytes_to_number, number_to_bytes},
};
use alloc::vec::Vec;
use num_bigint::BigUint;

/// Wire encoding of a signature.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SignatureFormat {
    /// `r || s`, each padded to the curve's byte length.
    Raw,

    /// [`SignatureFormat::Raw`] with `s` normalized to the lower half of the
    /// group order on encode.
    RawCanonical,

    /// ASN.1 DER `SEQUENCE { r INTEGER, s INTEGER }`.
    Der,

    /// [`SignatureFormat::Der`] with `s` normalized on encode.
    DerCanonical,
}

impl SignatureFormat {
    fn is_canonical(self) -> bool {
        matches!(self, SignatureFormat::RawCanonical | SignatureFormat::DerCanonical)
    }
}

/// ECDSA signature `(r, s)` with an optional [`RecoveryId`].
///
/// Signatures produced by [`SigningKey`][super::SigningKey] always carry a
/// recovery id; decoded signatures never do.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
    recovery_id: Option<RecoveryId>,
}

impl Signature {
    /// Create a signature from its components.
    ///
    /// Range checks happen at verification time.
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self {
            r,
            s,
            recovery_id: None,
        }
    }

    /// Attach a recovery id.
    pub fn with_recovery_id(mut self, recovery_id: RecoveryId) -> Self {
        self.recovery_id = Some(recovery_id);
        self
    }

    /// The `r` component.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Recovery id, when known.
    pub fn recovery_id(&self) -> Option<RecoveryId> {
        self.recovery_id
    }

    /// Is `s` in the upper half of the group order?
    pub fn is_high_s(&self, order: &BigUint) -> bool {
        self.s > order >> 1
    }

    /// Normalize signature into "low S" form as described in
    /// [BIP 0062: Dealing with Malleability][1].
    ///
    /// Replacing `s` with `n - s` negates the nonce point, so the y-parity bit
    /// of the recovery id flips with it.
    ///
    /// [1]: https://github.com/bitcoin/bips/blob/master/bip-0062.mediawiki
    pub fn normalize_s(&self, order: &BigUint) -> Self {
        if !self.is_high_s(order) {
            return self.clone();
        }

        Self {
            r: self.r.clone(),
            s: order - &self.s,
            recovery_id: self
                .recovery_id
                .map(|id| RecoveryId::new(!id.is_y_odd(), id.is_x_reduced())),
        }
    }

    /// `r` and `s` as big endian byte strings of the curve's byte length.
    pub fn to_components(&self, curve: &Curve) -> (Vec<u8>, Vec<u8>) {
        (
            number_to_bytes(&self.r, curve.order()),
            number_to_bytes(&self.s, curve.order()),
        )
    }

    /// Serialize as `r || s`.
    pub fn to_bytes(&self, curve: &Curve) -> Vec<u8> {
        let (mut r, s) = self.to_components(curve);
        r.extend_from_slice(&s);
        r
    }

    /// Parse `r || s`, which must be exactly twice the curve's byte length.
    pub fn from_bytes(bytes: &[u8], curve: &Curve) -> Result<Self> {
        let len = curve.baselen();
        if bytes.len() != 2 * len {
            return Err(Error::MalformedSignature);
        }

        let (r, s) = bytes.split_at(len);
        Ok(Self::new(
            bytes_to_number(r, curve.order())?,
            bytes_to_number(s, curve.order())?,
        ))
    }

    /// Serialize as a DER `SEQUENCE` of two `INTEGER`s.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        der::encode_sequence(&[&der::encode_integer(&self.r)?, &der::encode_integer(&self.s)?])
    }

    /// Parse a strict DER `SEQUENCE` of two `INTEGER`s.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let (seq, rest) = der::remove_sequence(bytes)?;
        if !rest.is_empty() {
            return Err(Error::UnexpectedDer("trailing junk after DER sig"));
        }

        let (r, seq) = der::remove_integer(seq)?;
        let (s, rest) = der::remove_integer(seq)?;
        if !rest.is_empty() {
            return Err(Error::UnexpectedDer("trailing junk after DER numbers"));
        }

        Ok(Self::new(r, s))
    }

    /// Encode in the given format, normalizing `s` for the canonical ones.
    pub fn encode(&self, format: SignatureFormat, curve: &Curve) -> Result<Vec<u8>> {
        let normalized;
        let sig = if format.is_canonical() {
            normalized = self.normalize_s(curve.order());
            &normalized
        } else {
            self
        };

        match format {
            SignatureFormat::Raw | SignatureFormat::RawCanonical => Ok(sig.to_bytes(curve)),
            SignatureFormat::Der | SignatureFormat::DerCanonical => sig.to_der(),
        }
    }

    /// Decode a signature in the given format.
    ///
    /// Canonical formats decode like their plain counterparts; high `s`
    /// values are accepted.
    pub fn decode(bytes: &[u8], format: SignatureFormat, curve: &Curve) -> Result<Self> {
        match format {
            SignatureFormat::Raw | SignatureFormat::RawCanonical => Self::from_bytes(bytes, curve),
            SignatureFormat::Der | SignatureFormat::DerCanonical => Self::from_der(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Signature, SignatureFormat};
    use crate::{Error, curves, ecdsa::RecoveryId};
    use hex_literal::hex;
    use num_bigint::BigUint;

    fn sample() -> Signature {
        Signature::new(
            BigUint::from_bytes_be(&hex!(
                "EFD48B2AACB6A8FD1140DD9CD45E81D69D2C877B56AAF991C34D0EA84EAF3716"
            )),
            BigUint::from_bytes_be(&hex!(
                "F7CB1C942D657C41D436C7A1B6E29F65F3E900DBB9AFF4064DC4AB2F843ACDA8"
            )),
        )
        .with_recovery_id(RecoveryId::new(false, false))
    }

    #[test]
    fn der_encoding() {
        let der = sample().to_der().unwrap();
        assert_eq!(&der[..4], hex!("30460221"));
        assert_eq!(der.len(), 0x48);

        let decoded = Signature::from_der(&der).unwrap();
        assert_eq!(decoded.r(), sample().r());
        assert_eq!(decoded.recovery_id(), None);
    }

    #[test]
    fn der_trailing_junk() {
        let mut der = sample().to_der().unwrap();
        der.push(0);
        assert!(matches!(Signature::from_der(&der), Err(Error::UnexpectedDer(_))));
    }

    #[test]
    fn raw_length() {
        let curve = curves::nist256p();
        let raw = sample().to_bytes(curve);
        assert_eq!(raw.len(), 64);
        assert_eq!(
            Signature::from_bytes(&raw[..63], curve),
            Err(Error::MalformedSignature)
        );
    }

    #[test]
    fn normalize_flips_parity() {
        let curve = curves::nist256p();
        let sig = sample();
        assert!(sig.is_high_s(curve.order()));

        let low = sig.normalize_s(curve.order());
        assert!(!low.is_high_s(curve.order()));
        assert_eq!(low.s(), &(curve.order() - sig.s()));
        assert_eq!(low.recovery_id(), Some(RecoveryId::new(true, false)));
        assert_eq!(low.normalize_s(curve.order()), low);
    }

    #[test]
    fn canonical_formats_normalize() {
        let curve = curves::nist256p();
        let raw = sample().encode(SignatureFormat::RawCanonical, curve).unwrap();
        let decoded = Signature::decode(&raw, SignatureFormat::RawCanonical, curve).unwrap();
        assert_eq!(decoded.s(), &(curve.order() - sample().s()));

        let der = sample().encode(SignatureFormat::Der, curve).unwrap();
        let decoded = Signature::decode(&der, SignatureFormat::Der, curve).unwrap();
        assert_eq!(decoded.s(), sample().s());
    }
}
