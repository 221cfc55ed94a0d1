//! ABI-JSON parameter reader
//!
//! Reads the `{"name", "type", "components"}` objects found in compiler ABI
//! output and turns them into [`Param`] lists.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::parse;
use crate::types::{Param, ParamType};

/// A parameter entry of a JSON ABI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiParam {
    /// Parameter name, may be empty
    #[serde(default)]
    pub name: String,
    /// Canonical type string, e.g. `uint256` or `tuple[]`
    #[serde(rename = "type")]
    pub ty: String,
    /// Tuple components
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AbiParam>,
    /// Event topic flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    /// Compiler-specific type name (e.g. `struct Order`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
}

impl AbiParam {
    /// Parse the type, recursively binding tuple components
    pub fn to_param_type(&self) -> Result<ParamType> {
        let components = self
            .components
            .iter()
            .enumerate()
            .map(|(position, c)| c.to_param(position))
            .collect::<Result<Vec<_>>>()?;
        parse(&self.ty, Some(components.as_slice()))
    }

    /// Convert into a [`Param`] at the given position
    pub fn to_param(&self, position: usize) -> Result<Param> {
        Ok(Param::new(self.name.clone(), self.to_param_type()?, position))
    }
}

impl From<&Param> for AbiParam {
    fn from(param: &Param) -> Self {
        let (ty, components) = json_type(&param.kind);
        AbiParam {
            name: param.name.clone(),
            ty,
            components,
            indexed: None,
            internal_type: None,
        }
    }
}

/// Type string in ABI-JSON form: tuples become `tuple` plus components
fn json_type(kind: &ParamType) -> (String, Vec<AbiParam>) {
    match kind {
        ParamType::Tuple(params) => ("tuple".to_string(), params.iter().map(AbiParam::from).collect()),
        ParamType::Array(inner) => {
            let (ty, components) = json_type(inner);
            (format!("{}[]", ty), components)
        }
        ParamType::FixedArray(inner, len) => {
            let (ty, components) = json_type(inner);
            (format!("{}[{}]", ty, len), components)
        }
        other => (other.to_string(), Vec::new()),
    }
}

/// Convert a list of JSON parameters, positions following list order
pub fn params_from_abi(entries: &[AbiParam]) -> Result<Vec<Param>> {
    entries
        .iter()
        .enumerate()
        .map(|(position, p)| p.to_param(position))
        .collect()
}

/// Parse a JSON array of ABI parameter objects
pub fn params_from_json(json: &str) -> Result<Vec<Param>> {
    let entries: Vec<AbiParam> = serde_json::from_str(json)?;
    params_from_abi(&entries)
}
