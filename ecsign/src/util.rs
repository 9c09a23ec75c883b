//! Integer/byte-string conversions and random sampling.

use crate::{Error, Result};
use alloc::vec::Vec;
use num_bigint::BigUint;
use rand_core::CryptoRngCore;

/// Maximum number of draws [`randrange`] makes before giving up.
const MAX_SAMPLING_ATTEMPTS: usize = 10_000;

/// Number of bytes needed to serialize integers modulo `order`.
///
/// Counts whole bytes of the hexadecimal representation, so e.g. the 521-bit
/// P-521 order needs 66 bytes.
pub fn orderlen(order: &BigUint) -> usize {
    let bits = order.bits() as usize;
    let hex_digits = bits.div_ceil(4).max(1);
    (hex_digits + 1) / 2
}

/// Number of bits needed to represent `n` (zero for zero).
pub fn bit_length(n: &BigUint) -> usize {
    n.bits() as usize
}

/// Serialize `n` as a big endian byte string of exactly `orderlen(order)`
/// bytes.
///
/// `n` must be smaller than `256^orderlen(order)`.
pub fn number_to_bytes(n: &BigUint, order: &BigUint) -> Vec<u8> {
    let bytes = n.to_bytes_be();
    let mut out = alloc::vec![0u8; orderlen(order).saturating_sub(bytes.len())];
    out.extend_from_slice(&bytes);
    out
}

/// Parse a fixed-width big endian byte string of `orderlen(order)` bytes.
pub fn bytes_to_number(bytes: &[u8], order: &BigUint) -> Result<BigUint> {
    let expected = orderlen(order);
    if bytes.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }

    Ok(BigUint::from_bytes_be(bytes))
}

/// Source of random bytes for key and nonce generation.
///
/// Implemented for every cryptographically secure [`rand_core`] generator
/// (e.g. `OsRng` with the `getrandom` feature).
pub trait EntropySource {
    /// Fill `dest` with random bytes.
    fn fill_entropy(&mut self, dest: &mut [u8]) -> Result<()>;
}

impl<R: CryptoRngCore + ?Sized> EntropySource for R {
    fn fill_entropy(&mut self, dest: &mut [u8]) -> Result<()> {
        self.try_fill_bytes(dest).map_err(|_| Error::Entropy)
    }
}

/// Draw an integer uniformly from `[1, order)` by rejection sampling.
///
/// Each draw takes just enough random bits to cover `order - 2`, so fewer than
/// half of the draws are rejected. Fails with [`Error::EntropyExhausted`] after
/// a bounded number of rejected draws.
pub fn randrange<E>(order: &BigUint, entropy: &mut E) -> Result<BigUint>
where
    E: EntropySource + ?Sized,
{
    debug_assert!(*order > BigUint::from(1u8));

    let bits = bit_length(&(order - 2u8)).max(1);
    let mut buf = alloc::vec![0u8; bits.div_ceil(8)];
    let excess = buf.len() * 8 - bits;

    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        entropy.fill_entropy(&mut buf)?;
        buf[0] &= 0xff >> excess;

        let candidate = BigUint::from_bytes_be(&buf) + 1u8;
        if candidate < *order {
            return Ok(candidate);
        }
    }

    Err(Error::EntropyExhausted)
}
