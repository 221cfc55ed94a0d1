//! Subcommand implementations

pub mod codec;
pub mod signature;

use std::path::PathBuf;

use bach_abi::{json::params_from_json, parse_type_list, Param};
use clap::Args;

use crate::CliError;

/// Where a command takes its parameter types from
#[derive(Debug, Args)]
pub struct TypeSource {
    /// Comma-separated canonical types, e.g. `uint256,(address,bytes)[]`
    #[arg(long, conflicts_with = "abi_json", required_unless_present = "abi_json")]
    pub types: Option<String>,

    /// JSON file holding an array of ABI parameter objects
    #[arg(long, value_name = "FILE")]
    pub abi_json: Option<PathBuf>,
}

impl TypeSource {
    /// Resolve the parameter list
    pub fn params(&self) -> Result<Vec<Param>, CliError> {
        match (&self.types, &self.abi_json) {
            (Some(types), _) => Ok(parse_type_list(types)?),
            (None, Some(path)) => {
                let content = std::fs::read_to_string(path)?;
                Ok(params_from_json(&content)?)
            }
            (None, None) => Err(CliError::InvalidInput(
                "either --types or --abi-json is required".to_string(),
            )),
        }
    }
}
