//! Affine points and the point at infinity.

use crate::{CurveFp, Error, Result};
use core::ops::{Add, Mul, Neg};
use num_bigint::BigUint;
use num_traits::Zero;

/// Point on a [`CurveFp`] in affine coordinates.
///
/// Borrows the curve it lives on and optionally carries the order of the
/// subgroup it generates, which [`Point`] multiplication uses to reduce
/// scalars.
#[derive(Clone, Debug)]
pub struct AffinePoint<'c> {
    curve: &'c CurveFp,
    x: BigUint,
    y: BigUint,
    order: Option<BigUint>,
}

impl<'c> AffinePoint<'c> {
    /// Curve this point lies on.
    pub fn curve(&self) -> &'c CurveFp {
        self.curve
    }

    /// Affine x-coordinate.
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// Affine y-coordinate.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// Order of this point, if known.
    pub fn order(&self) -> Option<&BigUint> {
        self.order.as_ref()
    }

    fn neg(&self) -> Self {
        let y = if self.y.is_zero() {
            BigUint::zero()
        } else {
            self.curve.p() - &self.y
        };

        Self {
            curve: self.curve,
            x: self.x.clone(),
            y,
            order: self.order.clone(),
        }
    }

    fn double(&self) -> Point<'c> {
        // points of order two double to infinity
        if self.y.is_zero() {
            return Point::Infinity;
        }

        let curve = self.curve;
        let p = curve.p();
        let numerator = (&self.x * &self.x * 3u8 + curve.a()) % p;
        let denominator = curve.invert(&((&self.y << 1u8) % p));
        let lambda = (numerator * denominator) % p;

        self.chord(&lambda, &self.x)
    }

    fn add(&self, other: &Self) -> Point<'c> {
        debug_assert_eq!(self.curve, other.curve, "points lie on different curves");

        let curve = self.curve;
        let p = curve.p();

        if self.x == other.x {
            return if (&self.y + &other.y) % p == BigUint::zero() {
                Point::Infinity
            } else {
                self.double()
            };
        }

        let numerator = curve.sub(&other.y, &self.y);
        let denominator = curve.invert(&curve.sub(&other.x, &self.x));
        let lambda = (numerator * denominator) % p;

        self.chord(&lambda, &other.x)
    }

    /// Third intersection of the line with slope `lambda` through `self` and
    /// the point with x-coordinate `x2`, reflected over the x-axis.
    fn chord(&self, lambda: &BigUint, x2: &BigUint) -> Point<'c> {
        let curve = self.curve;
        let p = curve.p();

        let x3 = curve.sub(&curve.sub(&((lambda * lambda) % p), &self.x), x2);
        let y3 = curve.sub(&((lambda * curve.sub(&self.x, &x3)) % p), &self.y);

        Point::Affine(Self {
            curve,
            x: x3,
            y: y3,
            order: None,
        })
    }
}

impl PartialEq for AffinePoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.curve == other.curve
    }
}

impl Eq for AffinePoint<'_> {}

/// Point on a short Weierstrass curve: either an affine point or the
/// point at infinity (the group identity).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Point<'c> {
    /// Point at infinity.
    Infinity,

    /// Affine point `(x, y)`.
    Affine(AffinePoint<'c>),
}

impl<'c> Point<'c> {
    /// Create a point from affine coordinates, checking that they satisfy
    /// the curve equation.
    pub fn new(curve: &'c CurveFp, x: BigUint, y: BigUint) -> Result<Self> {
        if !curve.contains_point(&x, &y) {
            return Err(Error::PointNotOnCurve);
        }

        Ok(Self::new_unchecked(curve, x, y))
    }

    /// Create a point from affine coordinates without checking the curve
    /// equation. Coordinates are reduced modulo `p`.
    ///
    /// Arithmetic on a point which is not on the curve produces meaningless
    /// (but well-defined) results.
    pub fn new_unchecked(curve: &'c CurveFp, x: BigUint, y: BigUint) -> Self {
        let p = curve.p();
        Point::Affine(AffinePoint {
            curve,
            x: x % p,
            y: y % p,
            order: None,
        })
    }

    /// Attach the known order of this point, which is used to reduce scalars
    /// during multiplication.
    pub fn with_order(self, order: BigUint) -> Self {
        match self {
            Point::Affine(mut point) => {
                point.order = Some(order);
                Point::Affine(point)
            }
            Point::Infinity => Point::Infinity,
        }
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// Borrow the affine representation, if this is not the point at infinity.
    pub fn as_affine(&self) -> Option<&AffinePoint<'c>> {
        match self {
            Point::Affine(point) => Some(point),
            Point::Infinity => None,
        }
    }

    /// Affine x-coordinate, if this is not the point at infinity.
    pub fn x(&self) -> Option<&BigUint> {
        self.as_affine().map(AffinePoint::x)
    }

    /// Affine y-coordinate, if this is not the point at infinity.
    pub fn y(&self) -> Option<&BigUint> {
        self.as_affine().map(AffinePoint::y)
    }

    /// Curve this point lies on, if this is not the point at infinity.
    pub fn curve(&self) -> Option<&'c CurveFp> {
        self.as_affine().map(AffinePoint::curve)
    }

    /// Order of this point, if known.
    pub fn order(&self) -> Option<&BigUint> {
        self.as_affine().and_then(AffinePoint::order)
    }

    /// Double this point.
    pub fn double(&self) -> Self {
        match self {
            Point::Affine(point) => point.double(),
            Point::Infinity => Point::Infinity,
        }
    }

    /// Multiply this point by the scalar `k`.
    ///
    /// Uses the addition-subtraction method: the non-adjacent form of `k` is
    /// read off `3k` and `k`, giving the same number of doublings as plain
    /// double-and-add but fewer additions.
    fn mul_scalar(&self, k: &BigUint) -> Self {
        let point = match self {
            Point::Affine(point) => point,
            Point::Infinity => return Point::Infinity,
        };

        let k = match &point.order {
            Some(order) => k % order,
            None => k.clone(),
        };

        if k.is_zero() {
            return Point::Infinity;
        }

        let e3 = &k * 3u8;
        let negative = Point::Affine(point.neg());
        let mut result = self.clone();

        // the top bit of `e3` is accounted for by starting from `self`
        for i in (1..e3.bits() - 1).rev() {
            result = result.double();

            match (e3.bit(i), k.bit(i)) {
                (true, false) => result = &result + self,
                (false, true) => result = &result + &negative,
                _ => (),
            }
        }

        result
    }
}

impl<'c> Add<&Point<'c>> for &Point<'c> {
    type Output = Point<'c>;

    fn add(self, other: &Point<'c>) -> Point<'c> {
        match (self, other) {
            (Point::Infinity, _) => other.clone(),
            (_, Point::Infinity) => self.clone(),
            (Point::Affine(a), Point::Affine(b)) => a.add(b),
        }
    }
}

impl<'c> Add<&Point<'c>> for Point<'c> {
    type Output = Point<'c>;

    fn add(self, other: &Point<'c>) -> Point<'c> {
        &self + other
    }
}

impl<'c> Add for Point<'c> {
    type Output = Point<'c>;

    fn add(self, other: Point<'c>) -> Point<'c> {
        &self + &other
    }
}

impl<'c> Neg for &Point<'c> {
    type Output = Point<'c>;

    fn neg(self) -> Point<'c> {
        match self {
            Point::Affine(point) => Point::Affine(point.neg()),
            Point::Infinity => Point::Infinity,
        }
    }
}

impl<'c> Neg for Point<'c> {
    type Output = Point<'c>;

    fn neg(self) -> Point<'c> {
        -&self
    }
}

impl<'c> Mul<&BigUint> for &Point<'c> {
    type Output = Point<'c>;

    fn mul(self, k: &BigUint) -> Point<'c> {
        self.mul_scalar(k)
    }
}

impl<'c> Mul<&BigUint> for Point<'c> {
    type Output = Point<'c>;

    fn mul(self, k: &BigUint) -> Point<'c> {
        self.mul_scalar(k)
    }
}
