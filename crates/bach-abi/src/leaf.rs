//! Standard-mode codec for leaf types
//!
//! Every static leaf occupies exactly one 32-byte word. `bytes` and
//! `string` are a length word followed by the payload, right-padded to a
//! multiple of 32.

use bytes::{BufMut, BytesMut};
use primitive_types::U256;

use crate::address::Address;
use crate::error::{AbiError, Result};
use crate::int::I256;
use crate::token::Token;
use crate::types::ParamType;

/// ABI word size in bytes
pub const WORD: usize = 32;

/// Number of bytes needed to pad `len` to a word boundary
pub(crate) fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

/// Append a U256 as a big-endian word
pub(crate) fn put_u256(out: &mut BytesMut, value: &U256) {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    out.put_slice(&word);
}

/// Append a usize (length or offset) as a word
pub(crate) fn put_usize(out: &mut BytesMut, value: usize) {
    put_u256(out, &U256::from(value));
}

/// Borrow the word at `offset`
pub(crate) fn read_word(data: &[u8], offset: usize) -> Result<&[u8; WORD]> {
    offset
        .checked_add(WORD)
        .and_then(|end| data.get(offset..end))
        .and_then(|slice| <&[u8; WORD]>::try_from(slice).ok())
        .ok_or_else(|| {
            AbiError::MalformedInput(format!(
                "need 32 bytes at offset {}, have {}",
                offset,
                data.len()
            ))
        })
}

/// Read a word holding a length or offset
pub(crate) fn read_usize(data: &[u8], offset: usize) -> Result<usize> {
    let value = U256::from_big_endian(read_word(data, offset)?);
    if value > U256::from(u32::MAX) {
        return Err(AbiError::MalformedInput(format!(
            "length/offset {} at {} is out of bounds",
            value, offset
        )));
    }
    Ok(value.as_usize())
}

/// Reject leaf descriptors outside the ABI's width rules
///
/// The parser never produces these, but `ParamType` can be built by hand.
pub(crate) fn check_leaf(kind: &ParamType) -> Result<()> {
    match kind {
        ParamType::Uint(bits) | ParamType::Int(bits)
            if *bits == 0 || *bits > 256 || bits % 8 != 0 =>
        {
            Err(AbiError::Parse(format!("invalid integer width {}", bits)))
        }
        ParamType::FixedBytes(size) if !(1..=WORD).contains(size) => {
            Err(AbiError::Parse(format!("invalid fixed bytes size {}", size)))
        }
        _ => Ok(()),
    }
}

fn mismatch(kind: &ParamType, token: &Token) -> AbiError {
    AbiError::TypeMismatch(format!("expected {}, got {} value", kind, token.kind_name()))
}

// ==================== Encoding ====================

/// Encode a leaf value into `out`
///
/// Composite kinds are rejected with `UnsupportedOperation`; they are
/// handled by the composite codec.
pub fn encode_leaf(kind: &ParamType, token: &Token, out: &mut BytesMut) -> Result<()> {
    check_leaf(kind)?;
    match (kind, token) {
        (ParamType::Address, Token::Address(addr)) => out.put_slice(&addr.to_word()),
        (ParamType::Uint(bits), Token::Uint(value)) => {
            if value.bits() > *bits {
                return Err(AbiError::OutOfRange(format!(
                    "{} does not fit in uint{}",
                    value, bits
                )));
            }
            put_u256(out, value);
        }
        (ParamType::Int(bits), Token::Int(value)) => {
            if !value.fits_in(*bits) {
                return Err(AbiError::OutOfRange(format!(
                    "{} does not fit in int{}",
                    value, bits
                )));
            }
            put_u256(out, &value.to_twos_complement());
        }
        (ParamType::Bool, Token::Bool(b)) => put_usize(out, usize::from(*b)),
        (ParamType::FixedBytes(size), Token::FixedBytes(data)) => {
            if data.len() > *size {
                return Err(AbiError::OutOfRange(format!(
                    "{} bytes do not fit in bytes{}",
                    data.len(),
                    size
                )));
            }
            let mut word = [0u8; WORD];
            word[..data.len()].copy_from_slice(data);
            out.put_slice(&word);
        }
        (ParamType::Bytes, Token::Bytes(data)) => encode_bytes(data, out),
        (ParamType::String, Token::String(s)) => encode_bytes(s.as_bytes(), out),
        (ParamType::Array(_) | ParamType::FixedArray(..) | ParamType::Tuple(_), _) => {
            return Err(AbiError::UnsupportedOperation(format!(
                "{} is not a leaf type",
                kind
            )));
        }
        _ => return Err(mismatch(kind, token)),
    }
    Ok(())
}

/// Length word followed by the zero-padded payload
fn encode_bytes(data: &[u8], out: &mut BytesMut) {
    put_usize(out, data.len());
    out.put_slice(data);
    out.put_bytes(0, padded_len(data.len()) - data.len());
}

// ==================== Decoding ====================

/// Decode a leaf value starting at the beginning of `data`
///
/// For static leaves only the first word is read. For `bytes`/`string`
/// `data` must start at the length word.
pub fn decode_leaf(kind: &ParamType, data: &[u8]) -> Result<Token> {
    check_leaf(kind)?;
    match kind {
        ParamType::Address => Ok(Token::Address(Address::from_word(read_word(data, 0)?)?)),
        ParamType::Uint(bits) => {
            let value = U256::from_big_endian(read_word(data, 0)?);
            if value.bits() > *bits {
                return Err(AbiError::OutOfRange(format!(
                    "{} does not fit in uint{}",
                    value, bits
                )));
            }
            Ok(Token::Uint(value))
        }
        ParamType::Int(bits) => {
            let value = I256::from_twos_complement(U256::from_big_endian(read_word(data, 0)?));
            if !value.fits_in(*bits) {
                return Err(AbiError::OutOfRange(format!(
                    "{} does not fit in int{}",
                    value, bits
                )));
            }
            Ok(Token::Int(value))
        }
        ParamType::Bool => Ok(Token::Bool(read_word(data, 0)?.iter().any(|b| *b != 0))),
        ParamType::FixedBytes(size) => Ok(Token::FixedBytes(read_word(data, 0)?[..*size].to_vec())),
        ParamType::Bytes => Ok(Token::Bytes(decode_bytes(data)?.to_vec())),
        ParamType::String => {
            let bytes = decode_bytes(data)?;
            let s = String::from_utf8(bytes.to_vec())
                .map_err(|e| AbiError::MalformedInput(format!("invalid UTF-8: {}", e)))?;
            Ok(Token::String(s))
        }
        ParamType::Array(_) | ParamType::FixedArray(..) | ParamType::Tuple(_) => Err(
            AbiError::UnsupportedOperation(format!("{} is not a leaf type", kind)),
        ),
    }
}

/// Payload of a length-prefixed byte string, padding discarded
fn decode_bytes(data: &[u8]) -> Result<&[u8]> {
    let len = read_usize(data, 0)?;
    data.get(WORD..WORD + len).ok_or_else(|| {
        AbiError::MalformedInput(format!(
            "byte string of length {} overruns buffer of {} bytes",
            len,
            data.len()
        ))
    })
}
