//! Curve equation parameters.

use crate::numbertheory::inverse_mod;
use num_bigint::BigUint;
use num_traits::Zero;

/// Elliptic curve in short Weierstrass form over the prime field `GF(p)`:
///
/// ```text
/// y² = x³ + ax + b (mod p)
/// ```
///
/// The modulus `p` must be an odd prime: the point arithmetic relies on
/// every non-zero field element being invertible.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CurveFp {
    p: BigUint,
    a: BigUint,
    b: BigUint,
}

impl CurveFp {
    /// Create curve parameters. `a` and `b` are reduced modulo `p`, so a
    /// negative coefficient such as `a = -3` is passed as `p - 3`.
    pub fn new(p: BigUint, a: BigUint, b: BigUint) -> Self {
        let a = a % &p;
        let b = b % &p;
        Self { p, a, b }
    }

    /// Field modulus `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Coefficient `a` of the curve equation.
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Coefficient `b` of the curve equation.
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Right-hand side of the curve equation: `x³ + ax + b mod p`.
    pub fn y_squared(&self, x: &BigUint) -> BigUint {
        let x = x % &self.p;
        (&x * &x * &x + &self.a * &x + &self.b) % &self.p
    }

    /// Does `(x, y)` satisfy the curve equation with both coordinates
    /// reduced modulo `p`?
    pub fn contains_point(&self, x: &BigUint, y: &BigUint) -> bool {
        if x >= &self.p || y >= &self.p {
            return false;
        }

        (y * y) % &self.p == self.y_squared(x)
    }

    /// `(a - b) mod p` for reduced inputs.
    pub(crate) fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + &self.p - b) % &self.p
    }

    /// `a⁻¹ mod p` for a non-zero reduced input.
    pub(crate) fn invert(&self, a: &BigUint) -> BigUint {
        debug_assert!(!a.is_zero());
        inverse_mod(a, &self.p).expect("curve modulus must be prime")
    }
}
