#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod curves;
pub mod der;
pub mod ecdsa;
pub mod rfc6979;
pub mod util;

#[cfg(feature = "pem")]
pub mod pem;

#[cfg(feature = "sha2")]
mod algorithm;
mod error;

pub use crate::{
    curves::{Curve, curve_by_name, curves, find_curve},
    ecdsa::{RecoveryId, Signature, SignatureFormat, SigningKey, VerifyingKey},
    error::{Error, Result},
    util::EntropySource,
};
pub use {digest, num_bigint::BigUint, weierstrass};

#[cfg(feature = "sha2")]
pub use {crate::algorithm::Algorithm, sha2};
