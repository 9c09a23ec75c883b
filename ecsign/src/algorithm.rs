//! Named signing algorithms with a fixed curve and hash.
//!
//! Used by callers which select ECDSA parameters by name (`"p256"`,
//! `"secp256k1"`, ...) and always want canonical low-S signatures.

use crate::{
    Curve, Error, Result, curves,
    ecdsa::{Signature, SigningKey},
};
use core::{fmt, str::FromStr};
use digest::{Digest, FixedOutputReset, core_api::BlockSizeUser};
use num_bigint::BigUint;
use sha2::{Sha256, Sha384, Sha512};

/// Curve and RFC 6979 hash pairing selected by name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Algorithm {
    /// NIST P-192 with SHA-256.
    P192,
    /// NIST P-224 with SHA-256.
    P224,
    /// NIST P-256 with SHA-256.
    P256,
    /// NIST P-384 with SHA-384.
    P384,
    /// NIST P-521 with SHA-512.
    P521,
    /// secp256k1 with SHA-256.
    Secp256k1,
}

impl Algorithm {
    /// Name accepted by [`Algorithm::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::P192 => "p192",
            Algorithm::P224 => "p224",
            Algorithm::P256 => "p256",
            Algorithm::P384 => "p384",
            Algorithm::P521 => "p521",
            Algorithm::Secp256k1 => "secp256k1",
        }
    }

    /// Curve used by this algorithm.
    pub fn curve(self) -> &'static Curve {
        match self {
            Algorithm::P192 => curves::nist192p(),
            Algorithm::P224 => curves::nist224p(),
            Algorithm::P256 => curves::nist256p(),
            Algorithm::P384 => curves::nist384p(),
            Algorithm::P521 => curves::nist521p(),
            Algorithm::Secp256k1 => curves::secp256k1(),
        }
    }

    /// Deterministically sign `digest` with the raw big endian `secret` and
    /// return the low-S signature with its recovery id.
    ///
    /// With `fixed_length` set, signing is repeated with a counter as extra
    /// entropy until `r` lies in the lower half of the group order and both
    /// `r` and `s` encode as DER `INTEGER`s of exactly the curve's byte
    /// length, so that DER signatures have a predictable length.
    ///
    /// Digests longer than the curve's byte length are truncated.
    pub fn sign_digest(
        self,
        digest: &[u8],
        secret: &[u8],
        fixed_length: bool,
    ) -> Result<Signature> {
        let key = SigningKey::from_bytes(secret, self.curve())?;
        let digest = &digest[..digest.len().min(key.curve().baselen())];

        match self {
            Algorithm::P384 => sign::<Sha384>(&key, digest, fixed_length),
            Algorithm::P521 => sign::<Sha512>(&key, digest, fixed_length),
            _ => sign::<Sha256>(&key, digest, fixed_length),
        }
    }
}

fn sign<D>(key: &SigningKey, digest: &[u8], fixed_length: bool) -> Result<Signature>
where
    D: Digest + BlockSizeUser + FixedOutputReset,
{
    let order = key.curve().order();
    let mut signature = key.sign_digest_deterministic::<D>(digest, &[])?.normalize_s(order);
    if !fixed_length {
        return Ok(signature);
    }

    let half = order >> 1;
    let width = key.curve().baselen();
    let mut counter = 0u64;
    while *signature.r() > half
        || integer_len(signature.r()) != width
        || integer_len(signature.s()) != width
    {
        let mut extra_entropy = [0u8; 32];
        extra_entropy[..8].copy_from_slice(&counter.to_le_bytes());
        signature = key
            .sign_digest_deterministic::<D>(digest, &extra_entropy)?
            .normalize_s(order);
        counter += 1;
    }

    Ok(signature)
}

/// Length of the contents of the DER `INTEGER` encoding `n`, including the
/// zero byte which keeps a set top bit from reading as a sign.
///
/// With `r <= n / 2` this equals the curve's byte length for roughly half of
/// all values on every supported curve: for P-521 the top bit of a 65 byte
/// magnitude is set, elsewhere it is clear in a full width magnitude.
fn integer_len(n: &BigUint) -> usize {
    n.bits() as usize / 8 + 1
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "p192" => Ok(Algorithm::P192),
            "p224" => Ok(Algorithm::P224),
            "p256" => Ok(Algorithm::P256),
            "p384" => Ok(Algorithm::P384),
            "p521" => Ok(Algorithm::P521),
            "secp256k1" => Ok(Algorithm::Secp256k1),
            _ => Err(Error::UnknownCurve),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
