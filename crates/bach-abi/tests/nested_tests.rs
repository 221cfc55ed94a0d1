//! Nested dynamism tests for bach-abi
//!
//! Arrays of tuples, tuples of arrays, and deeper combinations.

use std::sync::Arc;
use std::thread;

use bach_abi::{
    decode, decode_parameters, encode, encode_parameters, json::params_from_json, parse_type,
    parse_type_list, AbiError, ParamType, Token, U256,
};

fn pair(n: u64, s: &str) -> Token {
    Token::Tuple(vec![Token::uint(n), Token::string(s)])
}

fn word_at(data: &[u8], index: usize) -> U256 {
    U256::from_big_endian(&data[index * 32..(index + 1) * 32])
}

// ==================== Arrays of tuples ====================

#[test]
fn test_dynamic_array_of_dynamic_tuples() {
    let ty = parse_type("(uint256,string)[]").unwrap();
    assert!(ty.is_dynamic());

    let value = Token::Array(vec![pair(1, "alpha"), pair(2, ""), pair(u64::MAX, "gamma")]);
    let encoded = encode(&ty, &value).unwrap();

    assert_eq!(word_at(&encoded, 0), U256::from(3));
    // First element offset points just past the three head slots
    assert_eq!(word_at(&encoded, 1), U256::from(96));
    assert_eq!(decode(&ty, &encoded).unwrap(), value);
}

#[test]
fn test_array_of_arrays_of_tuples() {
    let ty = parse_type("(uint256,string)[][]").unwrap();
    let value = Token::Array(vec![
        Token::Array(vec![pair(1, "a"), pair(2, "bb")]),
        Token::Array(vec![]),
        Token::Array(vec![pair(3, "a much longer string that spans more than one word")]),
    ]);
    let encoded = encode(&ty, &value).unwrap();
    assert_eq!(decode(&ty, &encoded).unwrap(), value);
}

#[test]
fn test_static_tuples_inline() {
    let ty = parse_type("(address,uint64)[2]").unwrap();
    assert_eq!(ty.fixed_size(), Some(128));

    let params = parse_type_list("bool,(address,uint64)[2],uint8").unwrap();
    let tokens = vec![
        Token::Bool(true),
        Token::FixedArray(vec![
            Token::Tuple(vec![Token::Address(Default::default()), Token::uint(7u64)]),
            Token::Tuple(vec![Token::Address(Default::default()), Token::uint(8u64)]),
        ]),
        Token::uint(9u64),
    ];
    let encoded = encode_parameters(&params, &tokens).unwrap();
    // No offsets: pure concatenation
    assert_eq!(encoded.len(), 32 + 128 + 32);
    assert_eq!(word_at(&encoded, 2), U256::from(7));
    assert_eq!(decode_parameters(&params, &encoded).unwrap(), tokens);
}

#[test]
fn test_tuple_containing_dynamic_array_of_tuples() {
    let ty = parse_type("(uint8,(bool,bytes)[],string)").unwrap();
    let value = Token::Tuple(vec![
        Token::uint(5u64),
        Token::Array(vec![
            Token::Tuple(vec![Token::Bool(true), Token::bytes(vec![1, 2, 3])]),
            Token::Tuple(vec![Token::Bool(false), Token::bytes(vec![0xff; 40])]),
        ]),
        Token::string("end"),
    ]);
    let encoded = encode(&ty, &value).unwrap();
    assert_eq!(decode(&ty, &encoded).unwrap(), value);
}

#[test]
fn test_fixed_array_of_dynamic_arrays() {
    let ty = parse_type("uint16[][2]").unwrap();
    assert!(ty.is_dynamic());
    let value = Token::FixedArray(vec![
        Token::Array(vec![Token::uint(1u64)]),
        Token::Array(vec![Token::uint(2u64), Token::uint(3u64)]),
    ]);
    let encoded = encode(&ty, &value).unwrap();
    assert_eq!(word_at(&encoded, 0), U256::from(64));
    assert_eq!(decode(&ty, &encoded).unwrap(), value);
}

// ==================== ABI-JSON parameters ====================

#[test]
fn test_json_params_round_trip() {
    let params = params_from_json(
        r#"[
            {"name": "id", "type": "uint256"},
            {"name": "items", "type": "tuple[]", "components": [
                {"name": "label", "type": "string"},
                {"name": "weights", "type": "int32[3]"}
            ]}
        ]"#,
    )
    .unwrap();

    let item = |label: &str, w: [i64; 3]| {
        Token::Tuple(vec![
            Token::string(label),
            Token::FixedArray(w.iter().map(|v| Token::int(*v)).collect()),
        ])
    };
    let tokens = vec![
        Token::uint(42u64),
        Token::Array(vec![item("x", [-1, 0, 1]), item("y", [i32::MIN as i64, 7, i32::MAX as i64])]),
    ];
    let encoded = encode_parameters(&params, &tokens).unwrap();
    assert_eq!(word_at(&encoded, 1), U256::from(64));
    assert_eq!(decode_parameters(&params, &encoded).unwrap(), tokens);
}

// ==================== Failures ====================

#[test]
fn test_tuple_arity_mismatch() {
    let ty = parse_type("(uint256,string)").unwrap();
    assert!(matches!(
        encode(&ty, &Token::Tuple(vec![Token::uint(1u64)])),
        Err(AbiError::TypeMismatch(_))
    ));
}

#[test]
fn test_truncated_nested_payload() {
    let ty = parse_type("(uint256,string)[]").unwrap();
    let encoded = encode(&ty, &Token::Array(vec![pair(1, "hello")])).unwrap();
    let truncated = &encoded[..encoded.len() - 32];
    assert!(matches!(
        decode(&ty, truncated),
        Err(AbiError::MalformedInput(_))
    ));
}

#[test]
fn test_nested_error_reports_path() {
    let params = parse_type_list("(uint8,string)[]").unwrap();
    let tokens = vec![Token::Array(vec![Token::Tuple(vec![
        Token::uint(1000u64),
        Token::string("x"),
    ])])];
    let err = encode_parameters(&params, &tokens).unwrap_err();
    assert!(matches!(err, AbiError::OutOfRange(_)));
    assert!(err.to_string().contains("parameter 0"));
}

// ==================== Sharing ====================

#[test]
fn test_descriptor_shared_across_threads() {
    let ty: Arc<ParamType> = Arc::new(parse_type("(uint256,string)[]").unwrap());

    let handles: Vec<_> = (0..8u64)
        .map(|i| {
            let ty = Arc::clone(&ty);
            thread::spawn(move || {
                let value = Token::Array(vec![pair(i, &format!("thread-{}", i))]);
                let encoded = encode(&ty, &value).unwrap();
                assert_eq!(decode(&ty, &encoded).unwrap(), value);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
