//! ABI decoding
//!
//! Mirrors the encoder: a head pass decodes static members in place and
//! records the offsets of dynamic ones, then each dynamic member is decoded
//! from the slice between its offset and the next recorded offset (or the
//! end of the block for the last one).

use crate::error::{AbiError, Result};
use crate::leaf::{decode_leaf, read_usize, WORD};
use crate::token::Token;
use crate::types::{Param, ParamType};

/// Decode a single value from its standalone encoding
pub fn decode(kind: &ParamType, data: &[u8]) -> Result<Token> {
    decode_value(kind, data)
}

/// Decode a parameter list block
pub fn decode_parameters(params: &[Param], data: &[u8]) -> Result<Vec<Token>> {
    tracing::trace!(params = params.len(), len = data.len(), "decoding parameter list");

    let members: Vec<Member<'_>> = params
        .iter()
        .map(|p| Member {
            kind: &p.kind,
            position: p.position,
            name: &p.name,
        })
        .collect();

    decode_list(&members, data).map_err(|e| {
        tracing::debug!(error = %e, "parameter list rejected");
        e
    })
}

/// Decode bare types as an unnamed parameter list
pub fn decode_types(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>> {
    decode_parameters(&Param::list(types.iter().cloned()), data)
}

/// Decode function return data
pub fn decode_output(outputs: &[Param], data: &[u8]) -> Result<Vec<Token>> {
    decode_parameters(outputs, data)
}

struct Member<'a> {
    kind: &'a ParamType,
    position: usize,
    name: &'a str,
}

fn decode_list(members: &[Member<'_>], data: &[u8]) -> Result<Vec<Token>> {
    let mut tokens: Vec<Option<Token>> = Vec::with_capacity(members.len());
    let mut pending: Vec<(usize, usize)> = Vec::new();
    let mut cursor = 0usize;

    // Head pass
    for (index, m) in members.iter().enumerate() {
        match m.kind.fixed_size() {
            Some(size) => {
                let slice = data.get(cursor..cursor + size).ok_or_else(|| {
                    AbiError::MalformedInput(format!(
                        "need {} bytes at offset {}, have {}",
                        size,
                        cursor,
                        data.len()
                    ))
                    .in_param(m.position, m.name)
                })?;
                let token = decode_value(m.kind, slice).map_err(|e| e.in_param(m.position, m.name))?;
                tokens.push(Some(token));
                cursor += size;
            }
            None => {
                let offset = read_usize(data, cursor).map_err(|e| e.in_param(m.position, m.name))?;
                if offset > data.len() {
                    return Err(AbiError::MalformedInput(format!(
                        "offset {} points past end of {}-byte block",
                        offset,
                        data.len()
                    ))
                    .in_param(m.position, m.name));
                }
                tokens.push(None);
                pending.push((index, offset));
                cursor += WORD;
            }
        }
    }

    // Tail pass
    for (i, &(index, offset)) in pending.iter().enumerate() {
        let m = &members[index];
        let end = pending.get(i + 1).map_or(data.len(), |&(_, next)| next);
        if end < offset {
            return Err(AbiError::MalformedInput(format!(
                "offset {} is greater than the following offset {}",
                offset, end
            ))
            .in_param(m.position, m.name));
        }
        let token =
            decode_value(m.kind, &data[offset..end]).map_err(|e| e.in_param(m.position, m.name))?;
        tokens[index] = Some(token);
    }

    tokens
        .into_iter()
        .map(|t| {
            t.ok_or_else(|| AbiError::MalformedInput("unresolved dynamic member".into()))
        })
        .collect()
}

fn decode_value(kind: &ParamType, data: &[u8]) -> Result<Token> {
    match kind {
        ParamType::Array(inner) => {
            let len = read_usize(data, 0)?;
            let body = &data[WORD..];
            check_element_count(len, inner, body.len())?;
            Ok(Token::Array(decode_list(&element_members(inner, len), body)?))
        }
        ParamType::FixedArray(inner, len) => {
            check_element_count(*len, inner, data.len())?;
            Ok(Token::FixedArray(decode_list(&element_members(inner, *len), data)?))
        }
        ParamType::Tuple(params) if params.is_empty() => {
            Err(AbiError::Parse("empty tuple has no encoding".into()))
        }
        ParamType::Tuple(params) => {
            let members: Vec<Member<'_>> = params
                .iter()
                .map(|p| Member {
                    kind: &p.kind,
                    position: p.position,
                    name: &p.name,
                })
                .collect();
            Ok(Token::Tuple(decode_list(&members, data)?))
        }
        _ => decode_leaf(kind, data),
    }
}

/// Every element needs at least its head slot in the remaining bytes
fn check_element_count(len: usize, inner: &ParamType, available: usize) -> Result<()> {
    let min_size = len.checked_mul(inner.head_size().max(1));
    if min_size.map_or(true, |size| size > available) {
        return Err(AbiError::MalformedInput(format!(
            "array length {} exceeds remaining {} bytes",
            len, available
        )));
    }
    Ok(())
}

fn element_members(inner: &ParamType, len: usize) -> Vec<Member<'_>> {
    (0..len)
        .map(|position| Member {
            kind: inner,
            position,
            name: "",
        })
        .collect()
}
