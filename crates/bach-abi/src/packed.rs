//! Packed (non-standard) encoding
//!
//! Each leaf is written at its natural width with no padding and no length
//! prefix, and values are simply concatenated. The output is only meant to
//! be hashed; there is no packed decoder because the layout is ambiguous.

use bytes::{BufMut, BytesMut};
use primitive_types::U256;

use crate::error::{AbiError, Result};
use crate::leaf::{check_leaf, encode_leaf, WORD};
use crate::token::Token;
use crate::types::ParamType;

/// Packed encoding of a flat value sequence
///
/// Tuples and dynamic-length arrays are rejected with
/// `UnsupportedOperation`. Fixed-length arrays of static leaves are allowed;
/// their elements keep standard 32-byte padding, as Solidity does.
pub fn encode_packed(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>> {
    if types.len() != tokens.len() {
        return Err(AbiError::TypeMismatch(format!(
            "expected {} values, got {}",
            types.len(),
            tokens.len()
        )));
    }

    let mut out = BytesMut::new();
    for (position, (kind, token)) in types.iter().zip(tokens).enumerate() {
        pack_value(kind, token, &mut out).map_err(|e| e.in_param(position, ""))?;
    }
    Ok(out.to_vec())
}

fn pack_value(kind: &ParamType, token: &Token, out: &mut BytesMut) -> Result<()> {
    match (kind, token) {
        (ParamType::FixedArray(inner, len), Token::FixedArray(items) | Token::Array(items)) => {
            if inner.is_dynamic() || inner.contains_tuple() || inner_is_array(inner) {
                return Err(AbiError::UnsupportedOperation(format!(
                    "packed encoding of {} is not supported",
                    kind
                )));
            }
            if items.len() != *len {
                return Err(AbiError::OutOfRange(format!(
                    "{} expects {} elements, got {}",
                    kind,
                    len,
                    items.len()
                )));
            }
            for item in items {
                encode_leaf(inner, item, out)?;
            }
            Ok(())
        }
        (ParamType::Array(_) | ParamType::FixedArray(..) | ParamType::Tuple(_), _) => Err(
            AbiError::UnsupportedOperation(format!("packed encoding of {} is not supported", kind)),
        ),
        _ => pack_leaf(kind, token, out),
    }
}

fn inner_is_array(kind: &ParamType) -> bool {
    matches!(kind, ParamType::Array(_) | ParamType::FixedArray(..))
}

/// Natural-width encoding of a single leaf
pub fn pack_leaf(kind: &ParamType, token: &Token, out: &mut BytesMut) -> Result<()> {
    check_leaf(kind)?;
    match (kind, token) {
        (ParamType::Address, Token::Address(addr)) => out.put_slice(addr.as_bytes()),
        (ParamType::Uint(bits), Token::Uint(value)) => {
            if value.bits() > *bits {
                return Err(AbiError::OutOfRange(format!(
                    "{} does not fit in uint{}",
                    value, bits
                )));
            }
            put_low_bytes(out, value, bits / 8);
        }
        (ParamType::Int(bits), Token::Int(value)) => {
            if !value.fits_in(*bits) {
                return Err(AbiError::OutOfRange(format!(
                    "{} does not fit in int{}",
                    value, bits
                )));
            }
            put_low_bytes(out, &value.to_twos_complement(), bits / 8);
        }
        (ParamType::Bool, Token::Bool(b)) => out.put_u8(u8::from(*b)),
        (ParamType::FixedBytes(size), Token::FixedBytes(data)) => {
            if data.len() > *size {
                return Err(AbiError::OutOfRange(format!(
                    "{} bytes do not fit in bytes{}",
                    data.len(),
                    size
                )));
            }
            out.put_slice(data);
            out.put_bytes(0, size - data.len());
        }
        (ParamType::Bytes, Token::Bytes(data)) => out.put_slice(data),
        (ParamType::String, Token::String(s)) => out.put_slice(s.as_bytes()),
        (ParamType::Array(_) | ParamType::FixedArray(..) | ParamType::Tuple(_), _) => {
            return Err(AbiError::UnsupportedOperation(format!(
                "{} is not a leaf type",
                kind
            )));
        }
        _ => {
            return Err(AbiError::TypeMismatch(format!(
                "expected {}, got {} value",
                kind,
                token.kind_name()
            )));
        }
    }
    Ok(())
}

/// Last `width` bytes of the big-endian word
fn put_low_bytes(out: &mut BytesMut, value: &U256, width: usize) {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    out.put_slice(&word[WORD - width.min(WORD)..]);
}
