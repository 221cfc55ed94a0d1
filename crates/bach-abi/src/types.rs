//! ABI type descriptors

use std::fmt;
use std::str::FromStr;

use crate::error::AbiError;

/// Solidity parameter types
///
/// Descriptors are built bottom-up by the parser and never mutated
/// afterwards, so a single tree can be shared by any number of concurrent
/// encode/decode calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Address
    Address,
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Signed integer with bit size
    Int(usize),
    /// Boolean
    Bool,
    /// Dynamic bytes
    Bytes,
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// UTF-8 string
    String,
    /// Dynamic-length array
    Array(Box<ParamType>),
    /// Fixed-length array
    FixedArray(Box<ParamType>, usize),
    /// Tuple (struct) with ordered, optionally named components
    Tuple(Vec<Param>),
}

/// A named, positioned entry of a parameter list
///
/// Function inputs and outputs, event data and tuple components are all
/// lists of `Param`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    /// Parameter name, empty when unnamed
    pub name: String,
    /// Type descriptor
    pub kind: ParamType,
    /// Declared position within the enclosing list
    pub position: usize,
}

impl Param {
    /// Create a parameter
    pub fn new(name: impl Into<String>, kind: ParamType, position: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
        }
    }

    /// Build an unnamed parameter list from bare types
    pub fn list(kinds: impl IntoIterator<Item = ParamType>) -> Vec<Param> {
        kinds
            .into_iter()
            .enumerate()
            .map(|(position, kind)| Param::new("", kind, position))
            .collect()
    }
}

impl ParamType {
    /// Build a tuple from bare component types
    pub fn tuple(components: impl IntoIterator<Item = ParamType>) -> Self {
        ParamType::Tuple(Param::list(components))
    }

    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            ParamType::Tuple(params) => params.iter().any(|p| p.kind.is_dynamic()),
            _ => false,
        }
    }

    /// Encoded byte width for static types
    ///
    /// `None` for dynamic types, and for hand-built descriptors whose width
    /// overflows `usize`.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            ParamType::Address
            | ParamType::Uint(_)
            | ParamType::Int(_)
            | ParamType::Bool
            | ParamType::FixedBytes(_) => Some(32),
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => None,
            ParamType::FixedArray(inner, len) => {
                inner.fixed_size().and_then(|size| size.checked_mul(*len))
            }
            ParamType::Tuple(params) => params.iter().try_fold(0usize, |acc, p| {
                p.kind.fixed_size().and_then(|size| acc.checked_add(size))
            }),
        }
    }

    /// Bytes this type occupies in the head region of a parameter list
    ///
    /// A dynamic type takes one 32-byte offset slot.
    pub fn head_size(&self) -> usize {
        self.fixed_size().unwrap_or(32)
    }

    /// Whether this is a tuple, or an array whose element is (transitively) a tuple
    pub fn contains_tuple(&self) -> bool {
        match self {
            ParamType::Tuple(_) => true,
            ParamType::Array(inner) | ParamType::FixedArray(inner, _) => inner.contains_tuple(),
            _ => false,
        }
    }
}

impl fmt::Display for ParamType {
    /// Canonical type name as used in signatures
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => f.write_str("address"),
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::Int(bits) => write!(f, "int{}", bits),
            ParamType::Bool => f.write_str("bool"),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::FixedBytes(len) => write!(f, "bytes{}", len),
            ParamType::String => f.write_str("string"),
            ParamType::Array(inner) => write!(f, "{}[]", inner),
            ParamType::FixedArray(inner, len) => write!(f, "{}[{}]", inner, len),
            ParamType::Tuple(params) => {
                f.write_str("(")?;
                write_type_list(f, params)?;
                f.write_str(")")
            }
        }
    }
}

fn write_type_list(f: &mut fmt::Formatter<'_>, params: &[Param]) -> fmt::Result {
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", param.kind)?;
    }
    Ok(())
}

impl FromStr for ParamType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, AbiError> {
        crate::parser::parse(s, None)
    }
}

/// Canonical signature `name(type1,type2,...)` for a function, event or error
///
/// This is the text callers hash to obtain selectors and topics.
pub fn signature(name: &str, params: &[Param]) -> String {
    let types: Vec<String> = params.iter().map(|p| p.kind.to_string()).collect();
    format!("{}({})", name, types.join(","))
}
