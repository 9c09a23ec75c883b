//! Deterministic nonce generation per [RFC 6979].
//!
//! [RFC 6979]: https://www.rfc-editor.org/rfc/rfc6979

use crate::util::{bit_length, number_to_bytes};
use alloc::vec::Vec;
use digest::{Digest, FixedOutputReset, core_api::BlockSizeUser};
use num_bigint::BigUint;
use num_traits::Zero;
use ::rfc6979::HmacDrbg;
use zeroize::Zeroizing;

/// Interpret `data` as a big endian integer, keeping its leftmost `qlen`
/// bits (section 2.3.2).
pub fn bits2int(data: &[u8], qlen: usize) -> BigUint {
    let x = BigUint::from_bytes_be(data);
    let len = data.len() * 8;
    if len > qlen { x >> (len - qlen) } else { x }
}

/// Convert a hash to an octet string reduced modulo `order` (section 2.3.4).
pub fn bits2octets(data: &[u8], order: &BigUint) -> Vec<u8> {
    let z1 = bits2int(data, bit_length(order));
    let z2 = if z1 >= *order { z1 - order } else { z1 };
    number_to_bytes(&z2, order)
}

/// Derive the nonce for signing `digest` with `secexp`.
///
/// `retry_gen` skips that many valid candidates before returning one, which
/// lets a signer draw a fresh nonce when the first one yields a degenerate
/// signature. `extra_entropy` is appended to the HMAC_DRBG seed as described
/// in section 3.6; pass an empty slice for the plain construction.
pub fn generate_k<D>(
    order: &BigUint,
    secexp: &BigUint,
    digest: &[u8],
    mut retry_gen: u32,
    extra_entropy: &[u8],
) -> BigUint
where
    D: Digest + BlockSizeUser + FixedOutputReset,
{
    let qlen = bit_length(order);
    let x = Zeroizing::new(number_to_bytes(secexp, order));
    let h1 = bits2octets(digest, order);

    let mut hmac_drbg = HmacDrbg::<D>::new(&x, &h1, extra_entropy);

    let mut t = Zeroizing::new(alloc::vec![0u8; qlen.div_ceil(8)]);
    loop {
        hmac_drbg.fill_bytes(&mut t);

        let candidate = bits2int(&t, qlen);
        if !candidate.is_zero() && candidate < *order {
            if retry_gen == 0 {
                return candidate;
            }
            retry_gen -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HmacDrbg, bits2int, bits2octets, generate_k};
    use crate::util::number_to_bytes;
    use alloc::vec::Vec;
    use hex_literal::hex;
    use num_bigint::BigUint;
    use sha2::{Digest, Sha256, Sha512};

    /// Order of the 163-bit curve from RFC 6979 appendix A.1.
    const A1_ORDER: [u8; 21] = hex!("04000000000000000000020108A2E0CC0D99F8A5EF");
    const A1_SECRET: [u8; 21] = hex!("009A4D6792295A7F730FC3F2B49CBC0F62E862272F");

    #[test]
    fn bits2int_truncates() {
        assert_eq!(bits2int(&[0xff, 0x00], 16), BigUint::from(0xff00u16));
        assert_eq!(bits2int(&[0xff, 0x00], 12), BigUint::from(0xff0u16));
        assert_eq!(bits2int(&[0x01], 163), BigUint::from(1u8));
    }

    #[test]
    fn bits2octets_reduces() {
        let order = BigUint::from_bytes_be(&A1_ORDER);
        let h1 = bits2octets(&Sha256::digest(b"sample"), &order);
        assert_eq!(h1, hex!("01795EDF0D54DB760F156D0DAC04C0322B3A204224"));
    }

    #[test]
    fn appendix_a1() {
        let order = BigUint::from_bytes_be(&A1_ORDER);
        let secexp = BigUint::from_bytes_be(&A1_SECRET);
        let k = generate_k::<Sha256>(&order, &secexp, &Sha256::digest(b"sample"), 0, &[]);
        assert_eq!(
            k,
            BigUint::from_bytes_be(&hex!("023AF4074C90A02B3FE61D286D5C87F425E6BDD81B"))
        );
    }

    #[test]
    fn p256_sample() {
        let order = BigUint::from_bytes_be(&hex!(
            "FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551"
        ));
        let secexp = BigUint::from_bytes_be(&hex!(
            "C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721"
        ));

        let k = generate_k::<Sha256>(&order, &secexp, &Sha256::digest(b"sample"), 0, &[]);
        assert_eq!(
            k,
            BigUint::from_bytes_be(&hex!(
                "A6E3C57DD01ABE90086538398355DD4C3B17AA873382B0F24D6129493D8AAD60"
            ))
        );

        let k = generate_k::<Sha256>(&order, &secexp, &Sha256::digest(b"test"), 0, &[]);
        assert_eq!(
            k,
            BigUint::from_bytes_be(&hex!(
                "D16B6AE827F17175E040871A1C7EC3500192C4C92677336EC2537ACAEE0008E0"
            ))
        );
    }

    #[test]
    fn secp256k1_satoshi() {
        let order = BigUint::from_bytes_be(&hex!(
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141"
        ));
        let k = generate_k::<Sha256>(
            &order,
            &BigUint::from(1u8),
            &Sha256::digest(b"Satoshi Nakamoto"),
            0,
            &[],
        );
        assert_eq!(
            k,
            BigUint::from_bytes_be(&hex!(
                "8F8A276C19F4149656B280621E358CCE24F5F52542772691EE69063B74F15D15"
            ))
        );
    }

    #[test]
    fn retries_and_extra_entropy_change_nonce() {
        let order = BigUint::from_bytes_be(&A1_ORDER);
        let secexp = BigUint::from_bytes_be(&A1_SECRET);
        let digest = Sha512::digest(b"sample");

        let k0 = generate_k::<Sha512>(&order, &secexp, &digest, 0, &[]);
        let k1 = generate_k::<Sha512>(&order, &secexp, &digest, 1, &[]);
        let k2 = generate_k::<Sha512>(&order, &secexp, &digest, 0, &[0u8; 32]);

        assert_ne!(k0, k1);
        assert_ne!(k0, k2);
        assert_eq!(k0, generate_k::<Sha512>(&order, &secexp, &digest, 0, &[]));
        for k in [k0, k1, k2] {
            assert!(k < order);
        }
    }

    #[test]
    fn retry_draws_next_drbg_candidate() {
        let order = BigUint::from_bytes_be(&A1_ORDER);
        let secexp = BigUint::from_bytes_be(&A1_SECRET);
        let digest = Sha256::digest(b"test");

        let mut drbg = HmacDrbg::<Sha256>::new(
            &number_to_bytes(&secexp, &order),
            &bits2octets(&digest, &order),
            &[],
        );
        let candidates = (0..4)
            .map(|_| {
                let mut t = [0u8; 21];
                drbg.fill_bytes(&mut t);
                bits2int(&t, 163)
            })
            .filter(|k| *k < order)
            .collect::<Vec<_>>();

        // RFC 6979 appendix A.1.2, SHA-256 over "test"
        assert_eq!(
            candidates[0],
            BigUint::from_bytes_be(&hex!("0193649CE51F0CFF0784CFC47628F4FA854A93F7A2"))
        );
        for (retry_gen, expected) in candidates.iter().enumerate() {
            let k = generate_k::<Sha256>(&order, &secexp, &digest, retry_gen as u32, &[]);
            assert_eq!(&k, expected);
        }
    }
}
