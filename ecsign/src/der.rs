//! ASN.1 DER building blocks for keys and signatures.
//!
//! Encoders produce a complete TLV (tag, length, value) for one element.
//! Decoders strip one element from the front of the input and return its
//! contents together with the unparsed remainder. Both sides are thin
//! wrappers around the [`der`] crate, which rejects anything that is not in
//! canonical DER form (long-form lengths that fit in short form, padded
//! integers, indefinite lengths).

use crate::{Error, Result};
use ::der::{
    Decode, Encode, Length, Reader, SliceReader, Tag, TagNumber, Tagged,
    asn1::{AnyRef, BitStringRef, ObjectIdentifier, OctetStringRef, UintRef},
};
use alloc::vec::Vec;
use num_bigint::BigUint;

/// Encode a length in the shortest DER form.
pub fn encode_length(len: usize) -> Result<Vec<u8>> {
    Ok(Length::try_from(len)?.to_der()?)
}

/// Encode a non-negative INTEGER.
pub fn encode_integer(n: &BigUint) -> Result<Vec<u8>> {
    let bytes = n.to_bytes_be();
    Ok(UintRef::new(&bytes)?.to_der()?)
}

/// Encode an OCTET STRING.
pub fn encode_octet_string(s: &[u8]) -> Result<Vec<u8>> {
    Ok(OctetStringRef::new(s)?.to_der()?)
}

/// Encode a BIT STRING whose last `unused` bits are padding.
pub fn encode_bitstring(s: &[u8], unused: u8) -> Result<Vec<u8>> {
    Ok(BitStringRef::new(unused, s)?.to_der()?)
}

/// Encode an OBJECT IDENTIFIER from its arcs.
pub fn encode_oid(arcs: &[u64]) -> Result<Vec<u8>> {
    let arcs = arcs
        .iter()
        .map(|&arc| u32::try_from(arc))
        .collect::<core::result::Result<Vec<_>, _>>()
        .map_err(|_| Error::UnexpectedDer("object identifier arc too large"))?;
    let oid = ObjectIdentifier::from_arcs(arcs)
        .map_err(|_| Error::UnexpectedDer("invalid object identifier"))?;
    Ok(oid.to_der()?)
}

/// Encode a SEQUENCE from already-encoded elements.
pub fn encode_sequence(elements: &[&[u8]]) -> Result<Vec<u8>> {
    Ok(AnyRef::new(Tag::Sequence, &elements.concat())?.to_der()?)
}

/// Encode a context-specific constructed element `[tag]`.
pub fn encode_constructed(tag: u8, value: &[u8]) -> Result<Vec<u8>> {
    // Highest low-tag-number form (`TagNumber::MAX` is private in `der`).
    if tag > 30 {
        return Err(Error::UnexpectedDer("context-specific tag number too large"));
    }

    let tag = Tag::ContextSpecific {
        constructed: true,
        number: TagNumber::new(tag),
    };
    Ok(AnyRef::new(tag, value)?.to_der()?)
}

/// Decode a DER length, returning the length and the number of bytes it
/// occupied.
pub fn read_length(data: &[u8]) -> Result<(usize, usize)> {
    if data.is_empty() {
        return Err(Error::UnexpectedDer("empty string can't encode a length"));
    }

    let mut reader = SliceReader::new(data)?;
    let len = Length::decode(&mut reader)?;
    Ok((usize::try_from(len)?, usize::try_from(reader.position())?))
}

/// Decode one `T` from the front of `data`, returning it with the rest.
fn decode_prefix<'a, T: Decode<'a>>(data: &'a [u8]) -> Result<(T, &'a [u8])> {
    let mut reader = SliceReader::new(data)?;
    let value = T::decode(&mut reader)?;
    let consumed = usize::try_from(reader.position())?;
    Ok((value, &data[consumed..]))
}

fn expect_tag(data: &[u8], tag: Tag, what: &'static str) -> Result<()> {
    match data.first() {
        Some(&t) if t == u8::from(tag) => Ok(()),
        _ => Err(Error::UnexpectedDer(what)),
    }
}

/// Strip a SEQUENCE, returning its contents and the remaining input.
pub fn remove_sequence(data: &[u8]) -> Result<(&[u8], &[u8])> {
    expect_tag(data, Tag::Sequence, "wanted type 'sequence'")?;
    let (any, rest) = decode_prefix::<AnyRef<'_>>(data)?;
    Ok((any.value(), rest))
}

/// Strip an OCTET STRING, returning its contents and the remaining input.
pub fn remove_octet_string(data: &[u8]) -> Result<(&[u8], &[u8])> {
    expect_tag(data, Tag::OctetString, "wanted type 'octetstring'")?;
    let (octets, rest) = decode_prefix::<OctetStringRef<'_>>(data)?;
    Ok((octets.as_bytes(), rest))
}

/// Strip a non-negative INTEGER.
pub fn remove_integer(data: &[u8]) -> Result<(BigUint, &[u8])> {
    expect_tag(data, Tag::Integer, "wanted type 'integer'")?;
    let (uint, rest) = decode_prefix::<UintRef<'_>>(data)?;
    Ok((BigUint::from_bytes_be(uint.as_bytes()), rest))
}

/// Strip an OBJECT IDENTIFIER, returning its arcs.
pub fn remove_object(data: &[u8]) -> Result<(Vec<u64>, &[u8])> {
    expect_tag(data, Tag::ObjectIdentifier, "wanted type 'object'")?;
    let (oid, rest) = decode_prefix::<ObjectIdentifier>(data)?;

    // a subidentifier may not start with a 0x80 continuation byte
    let mut at_start = true;
    for &byte in oid.as_bytes() {
        if at_start && byte == 0x80 {
            return Err(Error::UnexpectedDer("non-minimal encoding of OID subidentifier"));
        }
        at_start = byte & 0x80 == 0;
    }

    Ok((oid.arcs().map(u64::from).collect(), rest))
}

/// Strip a context-specific constructed element, returning its tag number,
/// contents and the remaining input.
pub fn remove_constructed(data: &[u8]) -> Result<(u8, &[u8], &[u8])> {
    let what = "wanted type 'constructed tag' (0xa0-0xbf)";
    if data.first().is_none_or(|t| t & 0xe0 != 0xa0) {
        return Err(Error::UnexpectedDer(what));
    }

    let (any, rest) = decode_prefix::<AnyRef<'_>>(data)?;
    match any.tag() {
        Tag::ContextSpecific {
            constructed: true,
            number,
        } => Ok((number.value(), any.value(), rest)),
        _ => Err(Error::UnexpectedDer(what)),
    }
}

/// Strip a BIT STRING with exactly `expected_unused` padding bits.
///
/// Returns the string without the unused-bits prefix.
pub fn remove_bitstring(data: &[u8], expected_unused: u8) -> Result<(&[u8], &[u8])> {
    expect_tag(data, Tag::BitString, "wanted type 'bitstring'")?;
    let (bits, rest) = decode_prefix::<BitStringRef<'_>>(data)?;

    let unused = bits.unused_bits();
    if unused != expected_unused {
        return Err(Error::UnexpectedDer("unexpected number of unused bits"));
    }

    let bytes = bits.raw_bytes();
    if let Some(last) = bytes.last() {
        if last & ((1u8 << unused) - 1) != 0 {
            return Err(Error::UnexpectedDer("non zero padding bits in bit string"));
        }
    }

    Ok((bytes, rest))
}
