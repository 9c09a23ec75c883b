//! Number theory helpers for arithmetic modulo a prime.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Compute the multiplicative inverse of `a` modulo `m` using the extended
/// Euclidean algorithm.
///
/// Returns `None` when `gcd(a, m) != 1`, which includes `a ≡ 0 (mod m)`.
pub fn inverse_mod(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }

    let modulus = BigInt::from(m.clone());
    let (mut low, mut high) = (BigInt::from(a % m), modulus.clone());
    let (mut lm, mut hm) = (BigInt::one(), BigInt::zero());

    while low > BigInt::one() {
        let ratio = &high / &low;
        let nm = &hm - &lm * &ratio;
        let new = &high - &low * &ratio;
        hm = core::mem::replace(&mut lm, nm);
        high = core::mem::replace(&mut low, new);
    }

    if !low.is_one() {
        return None;
    }

    lm.mod_floor(&modulus).to_biguint()
}

/// Is `a` a quadratic residue modulo the odd prime `p`? (Euler's criterion)
///
/// Zero is treated as a residue.
pub fn is_quadratic_residue(a: &BigUint, p: &BigUint) -> bool {
    let a = a % p;
    if a.is_zero() {
        return true;
    }

    let exp = (p - 1u8) >> 1;
    a.modpow(&exp, p).is_one()
}

/// Compute a square root of `a` modulo the prime `p`.
///
/// Returns `None` when `a` is a quadratic non-residue. When a root `r` exists,
/// `p - r` is the other one; which of the two is returned is unspecified.
pub fn square_root_mod_prime(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    let a = a % p;
    if a.is_zero() {
        return Some(BigUint::zero());
    }

    if *p == BigUint::from(2u8) {
        return Some(a);
    }

    if !is_quadratic_residue(&a, p) {
        return None;
    }

    // p ≡ 3 (mod 4)
    if p.bit(1) {
        let exp = (p + 1u8) >> 2;
        return Some(a.modpow(&exp, p));
    }

    tonelli_shanks(&a, p)
}

/// Tonelli-Shanks for the general `p ≡ 1 (mod 4)` case. `a` must be a
/// non-zero quadratic residue.
fn tonelli_shanks(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    let p_minus_one = p - 1u8;
    let s = p_minus_one.trailing_zeros()?;
    let q = &p_minus_one >> s;

    let mut z = BigUint::from(2u8);
    while is_quadratic_residue(&z, p) {
        z += 1u8;
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut r = a.modpow(&((&q + 1u8) >> 1), p);

    while !t.is_one() {
        // least i in (0, m) with t^(2^i) == 1
        let mut i = 0u64;
        let mut t2i = t.clone();
        while !t2i.is_one() {
            t2i = (&t2i * &t2i) % p;
            i += 1;
            if i == m {
                return None;
            }
        }

        let b = c.modpow(&(BigUint::one() << (m - i - 1)), p);
        m = i;
        c = (&b * &b) % p;
        t = (t * &c) % p;
        r = (r * b) % p;
    }

    Some(r)
}
