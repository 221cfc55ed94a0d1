//! # bach-abi-cli
//!
//! Command-line front end for the BachLedger ABI codec.
//!
//! ## Usage
//!
//! ```bash
//! # Standard encoding
//! bach-abi encode --types 'uint256,string' '[69, "dave"]'
//! bach-abi decode --types 'uint256,string' 0x0000...
//!
//! # Parameter types from compiler ABI output
//! bach-abi encode --abi-json inputs.json '[[1, "a"]]'
//!
//! # Packed encoding and signatures
//! bach-abi packed --types 'uint8,string' '[1, "ab"]'
//! bach-abi signature transfer --types 'address,uint256'
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;
mod values;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// BachLedger ABI codec CLI
#[derive(Parser, Debug)]
#[command(name = "bach-abi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path (default: ~/.bachledger/abi.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Encode values with the standard head/tail layout
    Encode(commands::codec::EncodeCommand),
    /// Decode hex data into values
    Decode(commands::codec::DecodeCommand),
    /// Packed encoding of values
    Packed(commands::codec::PackedCommand),
    /// Print a canonical signature
    Signature(commands::signature::SignatureCommand),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set the default log filter
        #[arg(long)]
        set_log_filter: Option<String>,
        /// Set whether output defaults to JSON
        #[arg(long)]
        set_json: Option<bool>,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    init_tracing(&config);

    let json = cli.json || config.json_output;

    let result = match cli.command {
        Commands::Encode(cmd) => cmd.execute(&config, json),
        Commands::Decode(cmd) => cmd.execute(&config, json),
        Commands::Packed(cmd) => cmd.execute(&config, json),
        Commands::Signature(cmd) => cmd.execute(json),
        Commands::Config {
            show,
            set_log_filter,
            set_json,
        } => handle_config(
            &mut config,
            cli.config.as_deref(),
            show,
            set_log_filter,
            set_json,
            json,
        ),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays parseable
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn handle_config(
    config: &mut Config,
    path: Option<&Path>,
    show: bool,
    set_log_filter: Option<String>,
    set_json: Option<bool>,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(filter) = set_log_filter {
        EnvFilter::try_new(&filter).map_err(|e| CliError::Config(e.to_string()))?;
        config.log_filter = filter;
        modified = true;
    }

    if let Some(json_output) = set_json {
        config.json_output = json_output;
        modified = true;
    }

    if modified {
        match path {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        Output::new(json)
            .field("status", "saved")
            .message("Configuration saved")
            .print();
    } else if show {
        Output::new(json)
            .field_bool("json_output", config.json_output)
            .field("log_filter", &config.log_filter)
            .field_bool("hex_prefix", config.hex_prefix)
            .message(&format!(
                "JSON output: {}\nLog filter: {}\nHex prefix: {}",
                config.json_output, config.log_filter, config.hex_prefix
            ))
            .print();
    } else {
        Output::new(json)
            .message("Use --show to display config, or --set-log-filter/--set-json to modify")
            .print();
    }

    Ok(())
}
