//! Runtime ABI values

use primitive_types::U256;

use crate::address::Address;
use crate::int::I256;
use crate::types::ParamType;

/// Solidity ABI token types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Address (20 bytes)
    Address(Address),
    /// Unsigned integer (8-256 bits)
    Uint(U256),
    /// Signed integer (8-256 bits)
    Int(I256),
    /// Boolean
    Bool(bool),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// Fixed-size bytes (1-32)
    FixedBytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Dynamic array
    Array(Vec<Token>),
    /// Fixed-size array
    FixedArray(Vec<Token>),
    /// Tuple (struct)
    Tuple(Vec<Token>),
}

impl Token {
    /// Create an address token
    pub fn address(addr: Address) -> Self {
        Token::Address(addr)
    }

    /// Create an unsigned integer token
    pub fn uint(value: impl Into<U256>) -> Self {
        Token::Uint(value.into())
    }

    /// Create a signed integer token
    pub fn int(value: impl Into<I256>) -> Self {
        Token::Int(value.into())
    }

    /// Create a bool token
    pub fn bool(value: bool) -> Self {
        Token::Bool(value)
    }

    /// Create a bytes token
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Token::Bytes(data.into())
    }

    /// Create a fixed bytes token
    pub fn fixed_bytes(data: impl Into<Vec<u8>>) -> Self {
        Token::FixedBytes(data.into())
    }

    /// Create a string token
    pub fn string(s: impl Into<String>) -> Self {
        Token::String(s.into())
    }

    /// Create a bytes32 token
    pub fn bytes32(data: [u8; 32]) -> Self {
        Token::FixedBytes(data.to_vec())
    }

    /// Short name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Address(_) => "address",
            Token::Uint(_) => "uint",
            Token::Int(_) => "int",
            Token::Bool(_) => "bool",
            Token::Bytes(_) => "bytes",
            Token::FixedBytes(_) => "fixed bytes",
            Token::String(_) => "string",
            Token::Array(_) => "array",
            Token::FixedArray(_) => "fixed array",
            Token::Tuple(_) => "tuple",
        }
    }

    /// Check the value's shape against a descriptor
    ///
    /// Only shape is checked: variant tags, array lengths, tuple arity.
    /// Integer ranges are enforced by the encoder.
    pub fn matches(&self, kind: &ParamType) -> bool {
        match (kind, self) {
            (ParamType::Address, Token::Address(_))
            | (ParamType::Uint(_), Token::Uint(_))
            | (ParamType::Int(_), Token::Int(_))
            | (ParamType::Bool, Token::Bool(_))
            | (ParamType::Bytes, Token::Bytes(_))
            | (ParamType::String, Token::String(_)) => true,
            (ParamType::FixedBytes(len), Token::FixedBytes(data)) => data.len() <= *len,
            (ParamType::Array(inner), Token::Array(items) | Token::FixedArray(items)) => {
                items.iter().all(|t| t.matches(inner))
            }
            (
                ParamType::FixedArray(inner, len),
                Token::Array(items) | Token::FixedArray(items),
            ) => items.len() == *len && items.iter().all(|t| t.matches(inner)),
            (ParamType::Tuple(params), Token::Tuple(items)) => {
                items.len() == params.len()
                    && items.iter().zip(params).all(|(t, p)| t.matches(&p.kind))
            }
            _ => false,
        }
    }

    /// Unwrap an unsigned integer
    pub fn into_uint(self) -> Option<U256> {
        match self {
            Token::Uint(v) => Some(v),
            _ => None,
        }
    }

    /// Unwrap a signed integer
    pub fn into_int(self) -> Option<I256> {
        match self {
            Token::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Unwrap an address
    pub fn into_address(self) -> Option<Address> {
        match self {
            Token::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Unwrap a bool
    pub fn into_bool(self) -> Option<bool> {
        match self {
            Token::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Unwrap a string
    pub fn into_string(self) -> Option<String> {
        match self {
            Token::String(s) => Some(s),
            _ => None,
        }
    }

    /// Unwrap dynamic or fixed bytes
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Token::Bytes(b) | Token::FixedBytes(b) => Some(b),
            _ => None,
        }
    }

    /// Elements of an array (dynamic or fixed)
    pub fn into_array(self) -> Option<Vec<Token>> {
        match self {
            Token::Array(items) | Token::FixedArray(items) => Some(items),
            _ => None,
        }
    }

    /// Components of a tuple
    pub fn as_tuple(&self) -> Option<&[Token]> {
        match self {
            Token::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_leaves() {
        assert!(Token::uint(1u64).matches(&ParamType::Uint(8)));
        assert!(Token::int(-1i64).matches(&ParamType::Int(8)));
        assert!(!Token::uint(1u64).matches(&ParamType::Int(8)));
        assert!(Token::fixed_bytes(vec![1, 2]).matches(&ParamType::FixedBytes(4)));
        assert!(!Token::fixed_bytes(vec![0; 5]).matches(&ParamType::FixedBytes(4)));
    }

    #[test]
    fn test_matches_fixed_array_length() {
        let ty = ParamType::FixedArray(Box::new(ParamType::Bool), 2);
        assert!(Token::FixedArray(vec![Token::Bool(true), Token::Bool(false)]).matches(&ty));
        assert!(!Token::FixedArray(vec![Token::Bool(true)]).matches(&ty));
    }

    #[test]
    fn test_matches_tuple() {
        let ty = ParamType::tuple([ParamType::Uint(256), ParamType::String]);
        assert!(Token::Tuple(vec![Token::uint(1u64), Token::string("a")]).matches(&ty));
        assert!(!Token::Tuple(vec![Token::string("a"), Token::uint(1u64)]).matches(&ty));
        assert!(!Token::Tuple(vec![Token::uint(1u64)]).matches(&ty));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Token::uint(7u64).into_uint(), Some(U256::from(7)));
        assert_eq!(Token::string("x").into_uint(), None);
        assert_eq!(
            Token::Array(vec![Token::Bool(true)]).into_array(),
            Some(vec![Token::Bool(true)])
        );
    }
}
