//! Canonical signature command

use bach_abi::signature;
use clap::Args;

use super::TypeSource;
use crate::{output::Output, CliError};

/// Print the canonical `name(type,...)` signature
#[derive(Debug, Args)]
pub struct SignatureCommand {
    /// Function or event name
    name: String,

    #[command(flatten)]
    source: TypeSource,
}

impl SignatureCommand {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let params = self.source.params()?;
        let text = signature(&self.name, &params);

        Output::new(json)
            .field("signature", &text)
            .message(&text)
            .print();
        Ok(())
    }
}
