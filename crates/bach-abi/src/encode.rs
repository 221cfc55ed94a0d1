//! ABI encoding
//!
//! Parameter lists, tuples and arrays share one head/tail layout: static
//! members are written inline in the head, dynamic members get a 32-byte
//! offset slot in the head and their encoding appended to the tail. Offsets
//! are relative to the start of the list's own block.

use bytes::{BufMut, BytesMut};

use crate::error::{AbiError, Result};
use crate::leaf::{encode_leaf, put_usize};
use crate::token::Token;
use crate::types::{Param, ParamType};

/// Encode a single value in its standalone form
///
/// Dynamic values are not wrapped in an offset: `string` yields the length
/// word and payload, `uint256[]` the length word and elements.
pub fn encode(kind: &ParamType, token: &Token) -> Result<Vec<u8>> {
    let mut out = BytesMut::new();
    encode_value(kind, token, &mut out)?;
    Ok(out.to_vec())
}

/// Encode values against a parameter list using the head/tail layout
pub fn encode_parameters(params: &[Param], tokens: &[Token]) -> Result<Vec<u8>> {
    if params.len() != tokens.len() {
        return Err(AbiError::TypeMismatch(format!(
            "expected {} values, got {}",
            params.len(),
            tokens.len()
        )));
    }

    tracing::trace!(
        params = params.len(),
        static_size = params
            .iter()
            .fold(0usize, |acc, p| acc.saturating_add(p.kind.head_size())),
        "encoding parameter list"
    );

    let entries: Vec<Entry<'_>> = params
        .iter()
        .zip(tokens)
        .map(|(p, t)| Entry {
            kind: &p.kind,
            token: t,
            position: p.position,
            name: &p.name,
        })
        .collect();

    let mut out = BytesMut::new();
    encode_list(&entries, &mut out)?;
    Ok(out.to_vec())
}

/// Encode bare types and values as an unnamed parameter list
pub fn encode_types(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>> {
    encode_parameters(&Param::list(types.iter().cloned()), tokens)
}

/// A list member awaiting encoding
struct Entry<'a> {
    kind: &'a ParamType,
    token: &'a Token,
    position: usize,
    name: &'a str,
}

/// Head/tail layout over an ordered list
///
/// An all-static list is a plain concatenation and never touches a tail
/// buffer.
fn encode_list(entries: &[Entry<'_>], out: &mut BytesMut) -> Result<()> {
    let static_size = entries
        .iter()
        .try_fold(0usize, |acc, e| acc.checked_add(e.kind.head_size()))
        .ok_or_else(|| AbiError::OutOfRange("head region exceeds addressable size".into()))?;
    let has_dynamic = entries.iter().any(|e| e.kind.is_dynamic());

    if !has_dynamic {
        out.reserve(static_size);
        for e in entries {
            encode_value(e.kind, e.token, out).map_err(|err| err.in_param(e.position, e.name))?;
        }
        return Ok(());
    }

    out.reserve(static_size);
    let mut tail = BytesMut::new();
    for e in entries {
        let res = if e.kind.is_dynamic() {
            // Tails are appended in list order, so the pointer is the head
            // size plus everything already in the tail.
            put_usize(out, static_size + tail.len());
            encode_value(e.kind, e.token, &mut tail)
        } else {
            encode_value(e.kind, e.token, out)
        };
        res.map_err(|err| err.in_param(e.position, e.name))?;
    }
    out.put_slice(&tail);
    Ok(())
}

fn encode_value(kind: &ParamType, token: &Token, out: &mut BytesMut) -> Result<()> {
    match kind {
        ParamType::Array(inner) => {
            let items = array_items(kind, token)?;
            put_usize(out, items.len());
            encode_list(&element_entries(inner, items), out)
        }
        ParamType::FixedArray(inner, len) => {
            let items = array_items(kind, token)?;
            if items.len() != *len {
                return Err(AbiError::OutOfRange(format!(
                    "{} expects {} elements, got {}",
                    kind,
                    len,
                    items.len()
                )));
            }
            encode_list(&element_entries(inner, items), out)
        }
        ParamType::Tuple(params) if params.is_empty() => {
            Err(AbiError::Parse("empty tuple has no encoding".into()))
        }
        ParamType::Tuple(params) => {
            let Token::Tuple(items) = token else {
                return Err(AbiError::TypeMismatch(format!(
                    "expected {}, got {} value",
                    kind,
                    token.kind_name()
                )));
            };
            if items.len() != params.len() {
                return Err(AbiError::TypeMismatch(format!(
                    "{} has {} components, got {} values",
                    kind,
                    params.len(),
                    items.len()
                )));
            }
            let entries: Vec<Entry<'_>> = params
                .iter()
                .zip(items)
                .map(|(p, t)| Entry {
                    kind: &p.kind,
                    token: t,
                    position: p.position,
                    name: &p.name,
                })
                .collect();
            encode_list(&entries, out)
        }
        _ => encode_leaf(kind, token, out),
    }
}

fn array_items<'a>(kind: &ParamType, token: &'a Token) -> Result<&'a [Token]> {
    match token {
        Token::Array(items) | Token::FixedArray(items) => Ok(items),
        _ => Err(AbiError::TypeMismatch(format!(
            "expected {}, got {} value",
            kind,
            token.kind_name()
        ))),
    }
}

fn element_entries<'a>(inner: &'a ParamType, items: &'a [Token]) -> Vec<Entry<'a>> {
    items
        .iter()
        .enumerate()
        .map(|(position, token)| Entry {
            kind: inner,
            token,
            position,
            name: "",
        })
        .collect()
}
