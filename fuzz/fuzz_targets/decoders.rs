#![no_main]
// Targets: DER/PEM key decoders and signature decoders for every curve
use ecsign::{Signature, SignatureFormat, SigningKey, VerifyingKey, curves};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Accepted DER is canonical, so re-encoding reproduces the input
    if let Ok(sig) = Signature::from_der(data) {
        assert_eq!(sig.to_der().unwrap(), data);
    }

    if let Ok(vk) = VerifyingKey::from_der(data) {
        assert_eq!(VerifyingKey::from_der(&vk.to_der().unwrap()).unwrap(), vk);
    }

    if let Ok(sk) = SigningKey::from_der(data) {
        assert_eq!(SigningKey::from_der(&sk.to_der().unwrap()).unwrap(), sk);
    }

    if let Ok(text) = core::str::from_utf8(data) {
        let _ = SigningKey::from_pem(text);
        let _ = VerifyingKey::from_pem(text);
    }

    for curve in curves::curves() {
        if let Ok(sig) = Signature::from_bytes(data, curve) {
            assert_eq!(sig.encode(SignatureFormat::Raw, curve).unwrap(), data);
        }

        if let Ok(vk) = VerifyingKey::from_bytes(data, curve, true) {
            let point = vk.point();
            let (x, y) = (point.x().unwrap(), point.y().unwrap());
            assert!(curve.curve().contains_point(x, y));
        }

        if let Ok(sk) = SigningKey::from_bytes(data, curve) {
            assert_eq!(sk.to_bytes(), data);
        }
    }
});
