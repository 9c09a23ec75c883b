//! Point arithmetic tests over the secp256k1 curve parameters.

use hex_literal::hex;
use proptest::prelude::*;
use weierstrass::{BigUint, CurveFp, Point};

const P: [u8; 32] = hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f");
const N: [u8; 32] = hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");
const GX: [u8; 32] = hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
const GY: [u8; 32] = hex!("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8");

fn secp256k1() -> CurveFp {
    CurveFp::new(BigUint::from_bytes_be(&P), 0u8.into(), 7u8.into())
}

fn order() -> BigUint {
    BigUint::from_bytes_be(&N)
}

fn generator(curve: &CurveFp) -> Point<'_> {
    Point::new(curve, BigUint::from_bytes_be(&GX), BigUint::from_bytes_be(&GY))
        .unwrap()
        .with_order(order())
}

fn affine(curve: &CurveFp, x: [u8; 32], y: [u8; 32]) -> Point<'_> {
    Point::new(curve, BigUint::from_bytes_be(&x), BigUint::from_bytes_be(&y)).unwrap()
}

#[test]
fn generator_has_curve_order() {
    let curve = secp256k1();
    let g = generator(&curve);
    // bypass the order-based reduction so the full multiplication runs
    let g_plain = affine(&curve, GX, GY);
    assert_eq!(&g_plain * &order(), Point::Infinity);
    assert_eq!(&g * &order(), Point::Infinity);
}

#[test]
fn small_multiples_of_generator() {
    let curve = secp256k1();
    let g = generator(&curve);

    let two_g = affine(
        &curve,
        hex!("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"),
        hex!("1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"),
    );
    let three_g = affine(
        &curve,
        hex!("f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9"),
        hex!("388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672"),
    );

    assert_eq!(g.double(), two_g);
    assert_eq!(&g * &BigUint::from(2u8), two_g);
    assert_eq!(&two_g + &g, three_g);
    assert_eq!(&g * &BigUint::from(3u8), three_g);
}

#[test]
fn order_minus_one_is_negation() {
    let curve = secp256k1();
    let g = generator(&curve);
    let neg_g = affine(
        &curve,
        GX,
        hex!("b7c52588d95c3b9aa25b0403f1eef75702e84bb7597aabe663b82f6f04ef2777"),
    );

    assert_eq!(&g * &(order() - 1u8), neg_g);
    assert_eq!(-&g, neg_g);
}

prop_compose! {
    fn scalar()(bytes in any::<[u8; 32]>()) -> BigUint {
        BigUint::from_bytes_be(&bytes) % order()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn identity_and_negation(k in scalar()) {
        let curve = secp256k1();
        let p = &generator(&curve) * &k;

        prop_assert_eq!(&p + &Point::Infinity, p.clone());
        prop_assert_eq!(&p + &(-&p), Point::Infinity);
    }

    #[test]
    fn double_is_self_addition(k in scalar()) {
        let curve = secp256k1();
        let p = &generator(&curve) * &k;

        prop_assert_eq!(p.double(), &p + &p);
    }

    #[test]
    fn scalar_multiplication_distributes(k1 in scalar(), k2 in scalar()) {
        let curve = secp256k1();
        let g = generator(&curve);
        let sum = (&k1 + &k2) % order();

        prop_assert_eq!(&g * &sum, &(&g * &k1) + &(&g * &k2));
    }

    #[test]
    fn multiplication_lands_on_curve(k in scalar()) {
        let curve = secp256k1();
        if let Point::Affine(p) = &generator(&curve) * &k {
            prop_assert!(curve.contains_point(p.x(), p.y()));
        }
    }
}
