//! # bach-abi
//!
//! Solidity contract ABI encoding and decoding for BachLedger.
//!
//! Converts typed values to and from the byte layout contracts use for
//! function arguments, return values and event data. Output is
//! byte-for-byte compatible with the Solidity ABI specification.
//!
//! ## Layers
//!
//! - **Type parser**: canonical type strings (`uint256[2][]`,
//!   `(address,bytes)[]`, `tuple` + components) into [`ParamType`] trees
//! - **Leaf codec**: 32-byte word rules for bool, integers, address,
//!   fixed bytes, and length-prefixed bytes/string
//! - **Composite codec**: arrays and tuples
//! - **Parameter list codec**: the head/tail offset layout shared by
//!   function inputs/outputs, event data and tuple internals
//! - **Packed mode**: natural-width concatenation used only as hash input
//!
//! The crate performs no hashing; selectors and topics are computed by
//! callers from [`signature`] text and the encoded bytes.
//!
//! ## Example
//!
//! ```rust
//! use bach_abi::{decode_parameters, encode_parameters, parse_type_list, Token};
//!
//! let params = parse_type_list("uint256,string").unwrap();
//! let values = vec![Token::uint(69u64), Token::string("dave")];
//!
//! let encoded = encode_parameters(&params, &values).unwrap();
//! assert_eq!(encoded.len(), 32 * 4);
//!
//! let decoded = decode_parameters(&params, &encoded).unwrap();
//! assert_eq!(decoded, values);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod decode;
mod encode;
mod error;
mod int;
pub mod json;
mod leaf;
mod packed;
mod parser;
mod token;
mod types;

pub use address::Address;
pub use decode::{decode, decode_output, decode_parameters, decode_types};
pub use encode::{encode, encode_parameters, encode_types};
pub use error::{AbiError, Result};
pub use int::I256;
pub use leaf::WORD;
pub use packed::encode_packed;
pub use parser::{parse, parse_type, parse_type_list};
pub use token::Token;
pub use types::{signature, Param, ParamType};

// Re-export for callers building integer tokens
pub use primitive_types::U256;
