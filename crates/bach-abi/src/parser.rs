//! Type string parsing
//!
//! Turns canonical Solidity type strings into [`ParamType`] trees. Tuples
//! are accepted either as the `tuple` keyword with an out-of-band
//! component list (the ABI-JSON form) or inline as `(T1,T2)` /
//! `tuple(T1,T2)`.

use crate::error::{AbiError, Result};
use crate::types::{Param, ParamType};

/// Parse a type string, binding `components` to the `tuple` keyword
///
/// Components are ignored for non-tuple types. Array suffixes apply
/// outermost-last: `uint256[2][]` is a dynamic array of `uint256[2]`.
pub fn parse(type_str: &str, components: Option<&[Param]>) -> Result<ParamType> {
    let s = type_str.trim();
    if s.is_empty() {
        return Err(AbiError::Parse("empty type string".into()));
    }

    // Array suffix
    if let Some(stripped) = s.strip_suffix(']') {
        let open = stripped
            .rfind('[')
            .ok_or_else(|| AbiError::Parse(format!("unbalanced brackets in `{}`", s)))?;
        let element = parse(&stripped[..open], components)?;
        let size = &stripped[open + 1..];
        if size.is_empty() {
            return Ok(ParamType::Array(Box::new(element)));
        }
        let len = parse_array_size(size, s)?;
        check_array_extent(&element, len, s)?;
        return Ok(ParamType::FixedArray(Box::new(element), len));
    }

    if s == "tuple" {
        let components = components
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AbiError::Parse("`tuple` requires a component list".into()))?;
        return Ok(ParamType::Tuple(reposition(components)));
    }

    if let Some(inline) = s.strip_prefix("tuple") {
        if inline.starts_with('(') {
            return parse_inline_tuple(inline);
        }
    }
    if s.starts_with('(') {
        return parse_inline_tuple(s);
    }

    parse_leaf(s)
}

/// Parse a type string without out-of-band components
pub fn parse_type(type_str: &str) -> Result<ParamType> {
    parse(type_str, None)
}

/// Parse a comma-separated list of types into an unnamed parameter list
///
/// Commas nested inside tuple parentheses do not split.
pub fn parse_type_list(list: &str) -> Result<Vec<Param>> {
    let list = list.trim();
    if list.is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(list)?
        .into_iter()
        .map(parse_type)
        .collect::<Result<Vec<_>>>()
        .map(Param::list)
}

fn parse_array_size(size: &str, full: &str) -> Result<usize> {
    let len: usize = size
        .parse()
        .map_err(|_| AbiError::Parse(format!("invalid array size `{}` in `{}`", size, full)))?;
    if len == 0 {
        return Err(AbiError::Parse(format!("zero array size in `{}`", full)));
    }
    Ok(len)
}

/// The array's head region must stay addressable by a 32-bit offset
fn check_array_extent(element: &ParamType, len: usize, full: &str) -> Result<()> {
    let extent = len
        .checked_mul(element.head_size())
        .filter(|size| *size <= u32::MAX as usize);
    if extent.is_none() {
        return Err(AbiError::Parse(format!("array size too large in `{}`", full)));
    }
    Ok(())
}

/// `s` starts with `(` and must end with the matching `)`
fn parse_inline_tuple(s: &str) -> Result<ParamType> {
    let inner = s
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| AbiError::Parse(format!("malformed tuple `{}`", s)))?;
    let components = parse_type_list(inner)?;
    if components.is_empty() {
        return Err(AbiError::Parse(format!("empty tuple `{}`", s)));
    }
    Ok(ParamType::Tuple(components))
}

/// Split at commas that are not inside parentheses
fn split_top_level(s: &str) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| AbiError::Parse(format!("unbalanced parentheses in `{}`", s)))?;
            }
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(AbiError::Parse(format!("unbalanced parentheses in `{}`", s)));
    }
    parts.push(&s[start..]);
    Ok(parts)
}

/// Components keep their names; positions follow list order.
fn reposition(components: &[Param]) -> Vec<Param> {
    components
        .iter()
        .enumerate()
        .map(|(position, p)| Param::new(p.name.clone(), p.kind.clone(), position))
        .collect()
}

fn parse_leaf(s: &str) -> Result<ParamType> {
    match s {
        "address" => return Ok(ParamType::Address),
        "bool" => return Ok(ParamType::Bool),
        "string" => return Ok(ParamType::String),
        "bytes" => return Ok(ParamType::Bytes),
        "uint" => return Ok(ParamType::Uint(256)),
        "int" => return Ok(ParamType::Int(256)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("uint") {
        return Ok(ParamType::Uint(parse_int_bits(rest, s)?));
    }
    if let Some(rest) = s.strip_prefix("int") {
        return Ok(ParamType::Int(parse_int_bits(rest, s)?));
    }
    if let Some(rest) = s.strip_prefix("bytes") {
        let len: usize = parse_digits(rest, s)?;
        if !(1..=32).contains(&len) {
            return Err(AbiError::Parse(format!("bytesN size must be 1..=32, got `{}`", s)));
        }
        return Ok(ParamType::FixedBytes(len));
    }

    Err(AbiError::Parse(format!("unknown type `{}`", s)))
}

fn parse_int_bits(rest: &str, full: &str) -> Result<usize> {
    let bits = parse_digits(rest, full)?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::Parse(format!(
            "integer width must be a multiple of 8 in 8..=256, got `{}`",
            full
        )));
    }
    Ok(bits)
}

fn parse_digits(digits: &str, full: &str) -> Result<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AbiError::Parse(format!("unknown type `{}`", full)));
    }
    digits
        .parse()
        .map_err(|_| AbiError::Parse(format!("size out of range in `{}`", full)))
}
