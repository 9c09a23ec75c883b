//! Registry of named curves.
//!
//! Each [`Curve`] bundles the curve equation, generator, group order and the
//! ASN.1 object identifier used to name the curve in DER-encoded keys.
//! Descriptors are built once on first use and are immutable afterwards.

use crate::{Error, Result, der, util::orderlen};
use alloc::{boxed::Box, vec::Vec};
use core::fmt::{self, Debug};
use hex_literal::hex;
use num_bigint::BigUint;
use once_cell::race::OnceBox;
use weierstrass::{CurveFp, Point};

/// Compile-time curve constants.
struct CurveParams {
    name: &'static str,
    openssl_name: &'static str,
    oid: &'static [u64],
    p: &'static [u8],
    /// Coefficient `a` as a small signed integer (`-3` for the NIST curves).
    a: i8,
    b: &'static [u8],
    gx: &'static [u8],
    gy: &'static [u8],
    n: &'static [u8],
}

impl CurveParams {
    fn curve_fp(&self) -> CurveFp {
        let p = BigUint::from_bytes_be(self.p);
        let a = if self.a < 0 {
            &p - self.a.unsigned_abs()
        } else {
            BigUint::from(self.a.unsigned_abs())
        };

        CurveFp::new(p, a, BigUint::from_bytes_be(self.b))
    }
}

static PARAMS: [CurveParams; 6] = [
    CurveParams {
        name: "NIST192p",
        openssl_name: "prime192v1",
        oid: &[1, 2, 840, 10045, 3, 1, 1],
        p: &hex!("fffffffffffffffffffffffffffffffeffffffffffffffff"),
        a: -3,
        b: &hex!("64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1"),
        gx: &hex!("188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012"),
        gy: &hex!("07192b95ffc8da78631011ed6b24cdd573f977a11e794811"),
        n: &hex!("ffffffffffffffffffffffff99def836146bc9b1b4d22831"),
    },
    CurveParams {
        name: "NIST224p",
        openssl_name: "secp224r1",
        oid: &[1, 3, 132, 0, 33],
        p: &hex!("ffffffffffffffffffffffffffffffff000000000000000000000001"),
        a: -3,
        b: &hex!("b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4"),
        gx: &hex!("b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21"),
        gy: &hex!("bd376388b5f723fb4c22dfe6cd4375a05a07476444d5819985007e34"),
        n: &hex!("ffffffffffffffffffffffffffff16a2e0b8f03e13dd29455c5c2a3d"),
    },
    CurveParams {
        name: "NIST256p",
        openssl_name: "prime256v1",
        oid: &[1, 2, 840, 10045, 3, 1, 7],
        p: &hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
        a: -3,
        b: &hex!("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
        gx: &hex!("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
        gy: &hex!("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
        n: &hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"),
    },
    CurveParams {
        name: "NIST384p",
        openssl_name: "secp384r1",
        oid: &[1, 3, 132, 0, 34],
        p: &hex!(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe"
            "ffffffff0000000000000000ffffffff"
        ),
        a: -3,
        b: &hex!(
            "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875a"
            "c656398d8a2ed19d2a85c8edd3ec2aef"
        ),
        gx: &hex!(
            "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a38"
            "5502f25dbf55296c3a545e3872760ab7"
        ),
        gy: &hex!(
            "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c0"
            "0a60b1ce1d7e819d7a431d7c90ea0e5f"
        ),
        n: &hex!(
            "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf"
            "581a0db248b0a77aecec196accc52973"
        ),
    },
    CurveParams {
        name: "NIST521p",
        openssl_name: "secp521r1",
        oid: &[1, 3, 132, 0, 35],
        p: &hex!(
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "ffff"
        ),
        a: -3,
        b: &hex!(
            "0051953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef1"
            "09e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b50"
            "3f00"
        ),
        gx: &hex!(
            "00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d"
            "3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5"
            "bd66"
        ),
        gy: &hex!(
            "011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e"
            "662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd1"
            "6650"
        ),
        n: &hex!(
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "fffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e9138"
            "6409"
        ),
    },
    CurveParams {
        name: "SECP256k1",
        openssl_name: "secp256k1",
        oid: &[1, 3, 132, 0, 10],
        p: &hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
        a: 0,
        b: &hex!("0000000000000000000000000000000000000000000000000000000000000007"),
        gx: &hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
        gy: &hex!("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
        n: &hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
    },
];

static FIELDS: OnceBox<Vec<CurveFp>> = OnceBox::new();
static CURVES: OnceBox<Vec<Curve>> = OnceBox::new();

fn fields() -> &'static [CurveFp] {
    FIELDS.get_or_init(|| Box::new(PARAMS.iter().map(CurveParams::curve_fp).collect()))
}

/// Named elliptic curve: equation, generator, order and object identifier.
pub struct Curve {
    name: &'static str,
    openssl_name: &'static str,
    oid: &'static [u64],
    encoded_oid: Vec<u8>,
    curve: &'static CurveFp,
    generator: Point<'static>,
    order: BigUint,
    baselen: usize,
}

impl Curve {
    fn new(params: &'static CurveParams, curve: &'static CurveFp) -> Self {
        let order = BigUint::from_bytes_be(params.n);
        let generator = Point::new_unchecked(
            curve,
            BigUint::from_bytes_be(params.gx),
            BigUint::from_bytes_be(params.gy),
        )
        .with_order(order.clone());

        debug_assert!(!generator.is_identity());

        Self {
            name: params.name,
            openssl_name: params.openssl_name,
            oid: params.oid,
            encoded_oid: der::encode_oid(params.oid)
                .expect("registry object identifiers are valid"),
            curve,
            generator,
            baselen: orderlen(&order),
            order,
        }
    }

    /// Registry name of this curve, e.g. `NIST256p`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// OpenSSL name of this curve, e.g. `prime256v1`.
    pub fn openssl_name(&self) -> &'static str {
        self.openssl_name
    }

    /// Arcs of the ASN.1 object identifier naming this curve.
    pub fn oid(&self) -> &'static [u64] {
        self.oid
    }

    /// DER encoding of [`Curve::oid`], including tag and length.
    pub fn encoded_oid(&self) -> &[u8] {
        &self.encoded_oid
    }

    /// Curve equation parameters.
    pub fn curve(&self) -> &'static CurveFp {
        self.curve
    }

    /// Generator point, carrying the group order.
    pub fn generator(&self) -> &Point<'static> {
        &self.generator
    }

    /// Order `n` of the generator.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Width in bytes of serialized scalars and coordinates.
    pub fn baselen(&self) -> usize {
        self.baselen
    }

    /// Width in bytes of a raw `X || Y` public key.
    pub fn verifying_key_length(&self) -> usize {
        2 * self.baselen
    }
}

impl Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Curve({})", self.name)
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.oid == other.oid
    }
}

impl Eq for Curve {}

/// All supported curves.
pub fn curves() -> &'static [Curve] {
    CURVES.get_or_init(|| {
        Box::new(
            PARAMS
                .iter()
                .zip(fields())
                .map(|(params, fp)| Curve::new(params, fp))
                .collect(),
        )
    })
}

/// Look up a curve by the arcs of its object identifier.
pub fn find_curve(oid: &[u64]) -> Result<&'static Curve> {
    curves()
        .iter()
        .find(|curve| curve.oid == oid)
        .ok_or(Error::UnknownCurve)
}

/// Look up a curve by its registry name (`NIST256p`) or OpenSSL name
/// (`prime256v1`).
pub fn curve_by_name(name: &str) -> Result<&'static Curve> {
    curves()
        .iter()
        .find(|curve| curve.name == name || curve.openssl_name == name)
        .ok_or(Error::UnknownCurve)
}

/// NIST P-192 (`prime192v1`).
pub fn nist192p() -> &'static Curve {
    &curves()[0]
}

/// NIST P-224 (`secp224r1`).
pub fn nist224p() -> &'static Curve {
    &curves()[1]
}

/// NIST P-256 (`prime256v1`).
pub fn nist256p() -> &'static Curve {
    &curves()[2]
}

/// NIST P-384 (`secp384r1`).
pub fn nist384p() -> &'static Curve {
    &curves()[3]
}

/// NIST P-521 (`secp521r1`).
pub fn nist521p() -> &'static Curve {
    &curves()[4]
}

/// secp256k1, as used by Bitcoin and Ethereum.
pub fn secp256k1() -> &'static Curve {
    &curves()[5]
}

#[cfg(test)]
mod tests {
    use super::{curve_by_name, curves, find_curve, nist521p, secp256k1};
    use crate::{Error, der};
    use alloc::vec::Vec;
    use hex_literal::hex;
    use weierstrass::Point;

    #[test]
    fn generators_on_curve() {
        for curve in curves() {
            let g = curve.generator();
            let (x, y) = (g.x().unwrap(), g.y().unwrap());
            assert!(curve.curve().contains_point(x, y), "{}", curve.name());
        }
    }

    #[test]
    fn generators_have_curve_order() {
        for curve in curves() {
            let g = curve.generator();
            let plain = Point::new(curve.curve(), g.x().unwrap().clone(), g.y().unwrap().clone())
                .unwrap();
            assert_eq!(&plain * curve.order(), Point::Infinity, "{}", curve.name());
        }
    }

    #[test]
    fn baselen() {
        let lengths: Vec<_> = curves().iter().map(|c| c.baselen()).collect();
        assert_eq!(lengths, [24, 28, 32, 48, 66, 32]);
        assert_eq!(nist521p().verifying_key_length(), 132);
    }

    #[test]
    fn secp256k1_oid() {
        assert_eq!(secp256k1().encoded_oid(), hex!("06052b8104000a"));

        let (oid, rest) = der::remove_object(&hex!("06052b8104000a")).unwrap();
        assert!(rest.is_empty());
        assert_eq!(find_curve(&oid).unwrap(), secp256k1());
    }

    #[test]
    fn unknown_curve() {
        assert_eq!(find_curve(&[1, 2, 3]), Err(Error::UnknownCurve));
        assert_eq!(curve_by_name("brainpoolP256r1").map(|c| c.name()), Err(Error::UnknownCurve));
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(curve_by_name("prime256v1").unwrap().name(), "NIST256p");
        assert_eq!(curve_by_name("SECP256k1").unwrap(), secp256k1());
    }
}
