//! Support for computing ECDSA signatures.
//!
//! ## Algorithm
//!
//! ```text
//! S1: convert the digest to an integer e (leftmost bitlen(n) bits)
//! S2: pick a nonce k in [1,n-1], at random or per RFC 6979
//! S3: calculate the point (x1, y1) = [k]G
//! S4: set r = x1 mod n, degenerate if r = 0
//! S5: set s = k⁻¹(e + r·d) mod n, degenerate if s = 0
//! S6: return (r, s) with recovery id (y1 & 1) | (x1 >= n) << 1
//! ```

use super::{RecoveryId, Signature, VerifyingKey, digest_to_number};
use crate::{
    Curve, Error, Result, curves, der, rfc6979,
    util::{EntropySource, bytes_to_number, number_to_bytes, randrange},
};
use alloc::vec::Vec;
use core::fmt::{self, Debug};
use digest::{Digest, FixedOutputReset, core_api::BlockSizeUser};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use weierstrass::numbertheory;
use zeroize::{Zeroize, Zeroizing};

#[cfg(feature = "pem")]
use {crate::pem, alloc::string::String};

/// ECDSA secret key used for signing messages and producing signatures.
///
/// The secret exponent is wiped from memory when the key is dropped.
#[derive(Clone)]
pub struct SigningKey {
    /// Secret exponent `d` in `[1, n)`.
    secret_exponent: BigUint,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Generate a new key on `curve` with the given entropy source.
    pub fn generate<E>(curve: &'static Curve, entropy: &mut E) -> Result<Self>
    where
        E: EntropySource + ?Sized,
    {
        Self::from_secret_exponent(randrange(curve.order(), entropy)?, curve)
    }

    /// Generate a new key on `curve` using the operating system's random
    /// number generator.
    #[cfg(feature = "getrandom")]
    pub fn random(curve: &'static Curve) -> Result<Self> {
        Self::generate(curve, &mut rand_core::OsRng)
    }

    /// Create a signing key from its secret exponent, which must lie in
    /// `[1, n)`.
    pub fn from_secret_exponent(secret_exponent: BigUint, curve: &'static Curve) -> Result<Self> {
        if secret_exponent.is_zero() || secret_exponent >= *curve.order() {
            return Err(Error::InvalidSecretExponent);
        }

        let point = curve.generator() * &secret_exponent;
        let verifying_key = VerifyingKey::from_public_point(point, curve)?;

        Ok(Self {
            secret_exponent,
            verifying_key,
        })
    }

    /// Parse a big endian secret exponent of exactly the curve's byte length.
    pub fn from_bytes(bytes: &[u8], curve: &'static Curve) -> Result<Self> {
        Self::from_secret_exponent(bytes_to_number(bytes, curve.order())?, curve)
    }

    /// Parse a DER `ECPrivateKey` (RFC 5915).
    ///
    /// The curve parameters must be a named curve. An embedded public key is
    /// checked for structure only; the verifying key is always recomputed
    /// from the secret exponent.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let (seq, rest) = der::remove_sequence(bytes)?;
        if !rest.is_empty() {
            return Err(Error::UnexpectedDer("trailing junk after DER privkey"));
        }

        let (version, seq) = der::remove_integer(seq)?;
        if !version.is_one() {
            return Err(Error::UnexpectedDer("expected '1' at start of DER privkey"));
        }

        let (secret, seq) = der::remove_octet_string(seq)?;

        let (tag, params, seq) = der::remove_constructed(seq)?;
        if tag != 0 {
            return Err(Error::UnexpectedDer("expected tag 0 in DER privkey"));
        }
        let (oid, rest) = der::remove_object(params)?;
        if !rest.is_empty() {
            return Err(Error::UnexpectedDer("trailing junk after DER privkey curve_oid"));
        }
        let curve = curves::find_curve(&oid)?;

        if !seq.is_empty() {
            let (tag, public_key, rest) = der::remove_constructed(seq)?;
            if tag != 1 {
                return Err(Error::UnexpectedDer("expected tag 1 in DER privkey"));
            }
            if !rest.is_empty() {
                return Err(Error::UnexpectedDer("trailing junk after DER privkey public key"));
            }
            let (_point, rest) = der::remove_bitstring(public_key, 0)?;
            if !rest.is_empty() {
                return Err(Error::UnexpectedDer("trailing junk after DER privkey public key"));
            }
        }

        // some encoders strip leading zero bytes of the secret
        let len = curve.baselen();
        if secret.len() > len {
            return Err(Error::InvalidLength {
                expected: len,
                actual: secret.len(),
            });
        }
        let mut padded = alloc::vec![0u8; len - secret.len()];
        padded.extend_from_slice(secret);
        let key = Self::from_bytes(&padded, curve);
        padded.zeroize();
        key
    }

    /// Parse a PEM `EC PRIVATE KEY` block, skipping any preceding
    /// `EC PARAMETERS` block.
    #[cfg(feature = "pem")]
    pub fn from_pem(pem: &str) -> Result<Self> {
        let mut der = pem::decode(pem, pem::EC_PRIVATE_KEY_LABEL)?;
        let key = Self::from_der(&der);
        der.zeroize();
        key
    }

    /// Curve this key lives on.
    pub fn curve(&self) -> &'static Curve {
        self.verifying_key.curve()
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Borrow the secret exponent.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material. Please treat it with the care it deserves!
    pub fn secret_exponent(&self) -> &BigUint {
        &self.secret_exponent
    }

    /// Serialize the secret exponent as big endian bytes of the curve's byte
    /// length.
    pub fn to_bytes(&self) -> Vec<u8> {
        number_to_bytes(&self.secret_exponent, self.curve().order())
    }

    /// Serialize as a DER `ECPrivateKey` with named curve parameters and the
    /// uncompressed public key.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let secret = Zeroizing::new(self.to_bytes());
        let secret = Zeroizing::new(der::encode_octet_string(&secret)?);
        let public_key = der::encode_bitstring(&self.verifying_key.to_encoded_point(false), 0)?;

        der::encode_sequence(&[
            &der::encode_integer(&BigUint::one())?,
            &secret,
            &der::encode_constructed(0, self.curve().encoded_oid())?,
            &der::encode_constructed(1, &public_key)?,
        ])
    }

    /// Serialize as a PEM `EC PRIVATE KEY` block.
    #[cfg(feature = "pem")]
    pub fn to_pem(&self) -> Result<String> {
        let der = Zeroizing::new(self.to_der()?);
        pem::encode(&der, pem::EC_PRIVATE_KEY_LABEL)
    }

    /// Hash `msg` with `D` and sign it with a random nonce.
    ///
    /// Digests longer than the curve's byte length are truncated. A nonce
    /// yielding `r = 0` or `s = 0` is reported as
    /// [`Error::DegenerateSignature`]; callers may simply sign again.
    pub fn sign<D, E>(&self, msg: &[u8], entropy: &mut E) -> Result<Signature>
    where
        D: Digest,
        E: EntropySource + ?Sized,
    {
        let e = digest_to_number(&D::digest(msg), self.curve(), true)?;
        self.sign_with_random_k(&e, entropy)
    }

    /// Sign a precomputed digest with a random nonce.
    ///
    /// Returns [`Error::BadDigest`] if the digest is longer than the curve's
    /// byte length.
    pub fn sign_digest<E>(&self, digest: &[u8], entropy: &mut E) -> Result<Signature>
    where
        E: EntropySource + ?Sized,
    {
        let e = digest_to_number(digest, self.curve(), false)?;
        self.sign_with_random_k(&e, entropy)
    }

    /// Sign a precomputed digest with a caller-supplied nonce.
    ///
    /// # ⚠️ Warning
    ///
    /// Reusing a nonce for two different digests reveals the secret key.
    /// Returns [`Error::DegenerateSignature`] if `k` is a multiple of `n` or
    /// produces `r = 0` or `s = 0`.
    pub fn sign_digest_with_k(&self, digest: &[u8], k: &BigUint) -> Result<Signature> {
        let e = digest_to_number(digest, self.curve(), false)?;
        self.sign_number(&e, &(k % self.curve().order()))
    }

    /// Hash `msg` with `D` and sign it with an RFC 6979 nonce derived with
    /// the same hash.
    ///
    /// Digests longer than the curve's byte length are truncated.
    pub fn sign_deterministic<D>(&self, msg: &[u8], extra_entropy: &[u8]) -> Result<Signature>
    where
        D: Digest + BlockSizeUser + FixedOutputReset,
    {
        self.sign_digest_deterministic_inner::<D>(&D::digest(msg), extra_entropy, true)
    }

    /// Sign a precomputed digest with an RFC 6979 nonce derived with `D`.
    ///
    /// Returns [`Error::BadDigest`] if the digest is longer than the curve's
    /// byte length.
    pub fn sign_digest_deterministic<D>(
        &self,
        digest: &[u8],
        extra_entropy: &[u8],
    ) -> Result<Signature>
    where
        D: Digest + BlockSizeUser + FixedOutputReset,
    {
        self.sign_digest_deterministic_inner::<D>(digest, extra_entropy, false)
    }

    fn sign_digest_deterministic_inner<D>(
        &self,
        digest: &[u8],
        extra_entropy: &[u8],
        allow_truncate: bool,
    ) -> Result<Signature>
    where
        D: Digest + BlockSizeUser + FixedOutputReset,
    {
        let e = digest_to_number(digest, self.curve(), allow_truncate)?;
        let order = self.curve().order();

        let mut retry_gen = 0;
        loop {
            let k = rfc6979::generate_k::<D>(
                order,
                &self.secret_exponent,
                digest,
                retry_gen,
                extra_entropy,
            );
            match self.sign_number(&e, &k) {
                Err(Error::DegenerateSignature) => retry_gen += 1,
                result => return result,
            }
        }
    }

    fn sign_with_random_k<E>(&self, e: &BigUint, entropy: &mut E) -> Result<Signature>
    where
        E: EntropySource + ?Sized,
    {
        let k = randrange(self.curve().order(), entropy)?;
        self.sign_number(e, &k)
    }

    fn sign_number(&self, e: &BigUint, k: &BigUint) -> Result<Signature> {
        let curve = self.curve();
        let n = curve.order();

        if k.is_zero() {
            return Err(Error::DegenerateSignature);
        }

        // S3
        let point = curve.generator() * k;
        let affine = point.as_affine().ok_or(Error::DegenerateSignature)?;
        let (x1, y1) = (affine.x(), affine.y());

        // S4
        let r = x1 % n;
        if r.is_zero() {
            return Err(Error::DegenerateSignature);
        }

        // S5
        let k_inv = numbertheory::inverse_mod(k, n).ok_or(Error::DegenerateSignature)?;
        let s = (k_inv * (e + &self.secret_exponent * &r)) % n;
        if s.is_zero() {
            return Err(Error::DegenerateSignature);
        }

        // S6
        let recovery_id = RecoveryId::new(y1.bit(0), x1 >= n);
        Ok(Signature::new(r, s).with_recovery_id(recovery_id))
    }
}

//
// Other trait impls
//

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        // clear bits in place so the digit buffer is overwritten before release
        for bit in 0..self.secret_exponent.bits() {
            self.secret_exponent.set_bit(bit, false);
        }
    }
}

impl Eq for SigningKey {}

impl PartialEq for SigningKey {
    fn eq(&self, other: &SigningKey) -> bool {
        self.verifying_key == other.verifying_key && self.secret_exponent == other.secret_exponent
    }
}

#[cfg(test)]
mod tests {
    use super::SigningKey;
    use crate::{Error, curves};
    use alloc::{format, string::ToString};
    use hex_literal::hex;
    use num_bigint::BigUint;

    const SECRET: [u8; 32] =
        hex!("C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721");

    #[test]
    fn secret_exponent_range() {
        let curve = curves::nist256p();
        assert_eq!(
            SigningKey::from_secret_exponent(BigUint::default(), curve).map(|_| ()),
            Err(Error::InvalidSecretExponent)
        );
        assert_eq!(
            SigningKey::from_secret_exponent(curve.order().clone(), curve).map(|_| ()),
            Err(Error::InvalidSecretExponent)
        );
        assert!(SigningKey::from_secret_exponent(curve.order() - 1u8, curve).is_ok());
    }

    #[test]
    fn from_bytes_checks_length() {
        assert_eq!(
            SigningKey::from_bytes(&SECRET[1..], curves::nist256p()).map(|_| ()),
            Err(Error::InvalidLength {
                expected: 32,
                actual: 31
            })
        );
    }

    #[test]
    fn public_key_derivation() {
        let key = SigningKey::from_bytes(&SECRET, curves::nist256p()).unwrap();
        assert_eq!(
            key.verifying_key().to_bytes(),
            hex!(
                "60FED4BA255A9D31C961EB74C6356D68C049B8923B61FA6CE669622E60F29FB6"
                "7903FE1008B8BC99A41AE9E95628BC64F2F1B20C2D7E9F5177A3C294D4462299"
            )
        );
        assert_eq!(key.to_bytes(), SECRET);
    }

    #[test]
    fn debug_redacts_secret() {
        let key = SigningKey::from_bytes(&SECRET, curves::nist256p()).unwrap();
        let debug = format!("{key:?}");
        assert!(debug.starts_with("SigningKey { verifying_key: "));
        assert!(!debug.to_lowercase().contains("c9afa9d8"));
        assert!(!debug.contains(&key.secret_exponent().to_string()));
    }

    #[test]
    fn der_structure() {
        let key = SigningKey::from_bytes(&SECRET, curves::nist256p()).unwrap();
        let der = key.to_der().unwrap();
        assert_eq!(&der[..7], hex!("30770201010420"));
        assert_eq!(&der[7..39], SECRET);
        assert_eq!(SigningKey::from_der(&der).unwrap(), key);
    }

    #[test]
    fn explicit_zero_nonce() {
        let key = SigningKey::from_bytes(&SECRET, curves::nist256p()).unwrap();
        let n = key.curve().order().clone();
        assert_eq!(
            key.sign_digest_with_k(&[1u8; 32], &n).map(|_| ()),
            Err(Error::DegenerateSignature)
        );
    }
}
