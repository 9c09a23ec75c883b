//! ECDSA signing and verification benchmarks

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ecsign::{SignatureFormat, SigningKey, curves};
use sha2::{Digest, Sha256};

const SECRET: [u8; 32] = [
    0xbb, 0x48, 0x8a, 0xef, 0x41, 0x6a, 0x41, 0xd7, 0x68, 0x0d, 0x1c, 0xf0, 0x1d, 0x70, 0xf5, 0x9b,
    0x60, 0xd7, 0xf5, 0xf7, 0x7e, 0x30, 0xe7, 0x8b, 0x8b, 0xf9, 0xd2, 0xd8, 0x82, 0xf1, 0x56, 0xa6,
];

fn bench_ecdsa(c: &mut Criterion) {
    let mut group = c.benchmark_group("ecdsa");
    let z = Sha256::digest(b"benchmark message");

    for curve in [curves::nist256p(), curves::secp256k1()] {
        let d = SigningKey::from_bytes(&SECRET, curve).unwrap();

        group.bench_with_input(BenchmarkId::new("sign_deterministic", curve.name()), &d, |b, d| {
            b.iter(|| black_box(d).sign_digest_deterministic::<Sha256>(&black_box(z), &[]).unwrap())
        });

        let q = d.verifying_key();
        let s = d
            .sign_digest_deterministic::<Sha256>(&z, &[])
            .unwrap()
            .encode(SignatureFormat::Raw, curve)
            .unwrap();

        group.bench_with_input(BenchmarkId::new("verify_digest", curve.name()), q, |b, q| {
            b.iter(|| {
                black_box(q)
                    .verify_digest(black_box(&s[..]), &black_box(z), SignatureFormat::Raw)
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("keys");
    let curve = curves::nist256p();

    group.bench_function("from_bytes", |b| {
        b.iter(|| SigningKey::from_bytes(&black_box(SECRET), curve).unwrap())
    });

    let der = SigningKey::from_bytes(&SECRET, curve)
        .unwrap()
        .to_der()
        .unwrap();
    group.bench_function("from_der", |b| {
        b.iter(|| SigningKey::from_der(black_box(&der)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_ecdsa, bench_keys);
criterion_main!(benches);
