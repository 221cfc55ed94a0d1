//! JSON value conversion
//!
//! Values on the command line are a JSON array with one element per
//! parameter. Integers are JSON numbers or decimal/`0x` hex strings,
//! byte strings and addresses are hex strings, arrays and tuples are
//! nested JSON arrays. A tuple may also be a JSON object keyed by its
//! component names.

use bach_abi::{Address, Param, ParamType, Token, I256, U256};
use serde_json::{Map, Value};

use crate::output::to_hex;
use crate::CliError;

/// Convert a JSON array of values into tokens for `params`
pub fn tokens_from_json(params: &[Param], values: &Value) -> Result<Vec<Token>, CliError> {
    let items = values
        .as_array()
        .ok_or_else(|| CliError::InvalidValue("expected a JSON array of values".to_string()))?;
    if items.len() != params.len() {
        return Err(CliError::InvalidValue(format!(
            "expected {} values, got {}",
            params.len(),
            items.len()
        )));
    }
    params
        .iter()
        .zip(items)
        .map(|(param, value)| {
            token_from_json(&param.kind, value)
                .map_err(|e| CliError::InvalidValue(format!("parameter {}: {}", param.position, e)))
        })
        .collect()
}

/// Convert one JSON value into a token of type `kind`
pub fn token_from_json(kind: &ParamType, value: &Value) -> Result<Token, String> {
    match kind {
        ParamType::Address => {
            let s = expect_str(value, kind)?;
            Address::from_hex(s).map(Token::Address).map_err(|e| e.to_string())
        }
        ParamType::Uint(_) => {
            let (magnitude, negative) = parse_integer(value)?;
            if negative && !magnitude.is_zero() {
                return Err(format!("negative value for {}", kind));
            }
            Ok(Token::Uint(magnitude))
        }
        ParamType::Int(_) => {
            let (magnitude, negative) = parse_integer(value)?;
            Ok(Token::Int(I256::new(magnitude, negative)))
        }
        ParamType::Bool => match value {
            Value::Bool(b) => Ok(Token::Bool(*b)),
            Value::String(s) if s == "true" => Ok(Token::Bool(true)),
            Value::String(s) if s == "false" => Ok(Token::Bool(false)),
            other => Err(format!("expected bool, got {}", other)),
        },
        ParamType::Bytes => parse_hex(expect_str(value, kind)?).map(Token::Bytes),
        ParamType::FixedBytes(_) => parse_hex(expect_str(value, kind)?).map(Token::FixedBytes),
        ParamType::String => expect_str(value, kind).map(Token::string),
        ParamType::Array(inner) => elements(inner, value).map(Token::Array),
        ParamType::FixedArray(inner, _) => elements(inner, value).map(Token::FixedArray),
        ParamType::Tuple(components) => match value {
            Value::Array(items) => {
                if items.len() != components.len() {
                    return Err(format!(
                        "tuple {} expects {} members, got {}",
                        kind,
                        components.len(),
                        items.len()
                    ));
                }
                components
                    .iter()
                    .zip(items)
                    .map(|(c, v)| token_from_json(&c.kind, v))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Token::Tuple)
            }
            Value::Object(fields) => tuple_from_object(components, fields).map(Token::Tuple),
            other => Err(format!("expected array or object for {}, got {}", kind, other)),
        },
    }
}

fn expect_str<'a>(value: &'a Value, kind: &ParamType) -> Result<&'a str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("expected string for {}, got {}", kind, value))
}

fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s)).map_err(|e| format!("`{}`: {}", s, e))
}

fn elements(inner: &ParamType, value: &Value) -> Result<Vec<Token>, String> {
    value
        .as_array()
        .ok_or_else(|| format!("expected array of {}, got {}", inner, value))?
        .iter()
        .map(|v| token_from_json(inner, v))
        .collect()
}

fn tuple_from_object(components: &[Param], fields: &Map<String, Value>) -> Result<Vec<Token>, String> {
    components
        .iter()
        .map(|c| {
            let value = fields
                .get(&c.name)
                .ok_or_else(|| format!("missing tuple member `{}`", c.name))?;
            token_from_json(&c.kind, value)
        })
        .collect()
}

/// Split a JSON integer into magnitude and sign
fn parse_integer(value: &Value) -> Result<(U256, bool), String> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok((U256::from(v), false))
            } else if let Some(v) = n.as_i64() {
                Ok((U256::from(v.unsigned_abs()), v < 0))
            } else {
                Err(format!("`{}` is not an integer; pass large values as strings", n))
            }
        }
        Value::String(s) => {
            let (digits, negative) = match s.trim().strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (s.trim(), false),
            };
            let magnitude = match digits.strip_prefix("0x") {
                Some(hex_digits) => U256::from_str_radix(hex_digits, 16)
                    .map_err(|e| format!("`{}`: {:?}", s, e))?,
                None => U256::from_dec_str(digits).map_err(|e| format!("`{}`: {:?}", s, e))?,
            };
            Ok((magnitude, negative))
        }
        other => Err(format!("expected integer, got {}", other)),
    }
}

/// Render a decoded token as JSON
///
/// Integers that fit 64 bits become JSON numbers, larger ones decimal
/// strings.
pub fn token_to_json(token: &Token, hex_prefix: bool) -> Value {
    match token {
        Token::Address(addr) => Value::String(addr.to_hex()),
        Token::Uint(v) => {
            if v.bits() <= 64 {
                Value::from(v.low_u64())
            } else {
                Value::String(v.to_string())
            }
        }
        Token::Int(v) => match i128::try_from(*v).ok().and_then(|n| i64::try_from(n).ok()) {
            Some(small) => Value::from(small),
            None => Value::String(v.to_string()),
        },
        Token::Bool(b) => Value::Bool(*b),
        Token::Bytes(data) | Token::FixedBytes(data) => Value::String(to_hex(data, hex_prefix)),
        Token::String(s) => Value::String(s.clone()),
        Token::Array(items) | Token::FixedArray(items) | Token::Tuple(items) => {
            Value::Array(items.iter().map(|t| token_to_json(t, hex_prefix)).collect())
        }
    }
}
