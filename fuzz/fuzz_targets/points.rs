#![no_main]
// Targets: point decoding and group law on every curve
use ecsign::{BigUint, VerifyingKey, curves, weierstrass::Point};
use libfuzzer_sys::fuzz_target;

fn test_group(p1: &Point<'static>, p2: &Point<'static>, s: &BigUint) {
    // Test that addition and doubling are consistent
    assert!(p1.double() == p1 + p1);

    // Test that negation works correctly
    let sum = p1 + p2;
    assert!(&sum + &(-&sum) == Point::Infinity);

    // Test scalar multiplication distributive property
    let scalar_mul = p1 * s;
    assert!(&scalar_mul + &scalar_mul == p1 * &(s + s));
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let (head, rest) = data.split_at(1);
    let curve = &curves::curves()[usize::from(head[0]) % curves::curves().len()];
    let len = 1 + curve.baselen();
    if rest.len() < 2 * len {
        return;
    }

    let decode = |bytes: &[u8]| {
        let mut encoded = bytes.to_vec();
        encoded[0] = 0x02 | (encoded[0] & 1);
        VerifyingKey::from_bytes(&encoded, curve, true)
            .map(|vk| vk.point().clone())
            .unwrap_or_else(|_| curve.generator().clone())
    };

    let p1 = decode(&rest[..len]);
    let p2 = decode(&rest[len..2 * len]);
    let s = BigUint::from_bytes_be(&rest[2 * len..]);

    test_group(&p1, &p2, &s);
});
