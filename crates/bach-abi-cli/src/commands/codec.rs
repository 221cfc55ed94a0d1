//! Encode, decode and packed commands

use bach_abi::{decode_parameters, encode_packed, encode_parameters, Param, ParamType};
use clap::Args;
use serde_json::Value;

use super::TypeSource;
use crate::output::{to_hex, Output};
use crate::values::{token_to_json, tokens_from_json};
use crate::{config::Config, CliError};

/// Encode values as a parameter list
#[derive(Debug, Args)]
pub struct EncodeCommand {
    #[command(flatten)]
    source: TypeSource,

    /// JSON array of values, one per parameter
    values: String,
}

impl EncodeCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let params = self.source.params()?;
        let values: Value = serde_json::from_str(&self.values)?;
        let tokens = tokens_from_json(&params, &values)?;

        let encoded = encode_parameters(&params, &tokens)?;
        let hex = to_hex(&encoded, config.hex_prefix);
        tracing::debug!(params = params.len(), bytes = encoded.len(), "encoded");

        Output::new(json)
            .field("encoded", &hex)
            .field_usize("length", encoded.len())
            .message(&hex)
            .print();
        Ok(())
    }
}

/// Decode hex data against a parameter list
#[derive(Debug, Args)]
pub struct DecodeCommand {
    #[command(flatten)]
    source: TypeSource,

    /// Hex-encoded data, `0x` optional
    data: String,
}

impl DecodeCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let params = self.source.params()?;
        let trimmed = self.data.trim();
        let data = hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed))?;

        let tokens = decode_parameters(&params, &data)?;
        let values: Vec<Value> = tokens
            .iter()
            .map(|t| token_to_json(t, config.hex_prefix))
            .collect();

        let text = render_lines(&params, &values);
        Output::new(json)
            .field_value("types", Value::from(type_names(&params)))
            .field_value("values", Value::from(values))
            .message(&text)
            .print();
        Ok(())
    }
}

/// Packed (non-standard) encoding of values
#[derive(Debug, Args)]
pub struct PackedCommand {
    #[command(flatten)]
    source: TypeSource,

    /// JSON array of values, one per type
    values: String,
}

impl PackedCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let params = self.source.params()?;
        let values: Value = serde_json::from_str(&self.values)?;
        let tokens = tokens_from_json(&params, &values)?;

        let types: Vec<ParamType> = params.into_iter().map(|p| p.kind).collect();
        let packed = encode_packed(&types, &tokens)?;
        let hex = to_hex(&packed, config.hex_prefix);

        Output::new(json)
            .field("packed", &hex)
            .field_usize("length", packed.len())
            .message(&hex)
            .print();
        Ok(())
    }
}

fn type_names(params: &[Param]) -> Vec<String> {
    params.iter().map(|p| p.kind.to_string()).collect()
}

/// One `[i] name type = value` line per decoded parameter
fn render_lines(params: &[Param], values: &[Value]) -> String {
    params
        .iter()
        .zip(values)
        .map(|(p, v)| {
            if p.name.is_empty() {
                format!("[{}] {} = {}", p.position, p.kind, v)
            } else {
                format!("[{}] {} {} = {}", p.position, p.kind, p.name, v)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bach_abi::parse_type_list;
    use serde_json::json;

    #[test]
    fn test_render_lines() {
        let mut params = parse_type_list("uint8,string").unwrap();
        params[1].name = "label".to_string();
        let text = render_lines(&params, &[json!(1), json!("x")]);
        assert_eq!(text, "[0] uint8 = 1\n[1] string label = \"x\"");
    }
}
