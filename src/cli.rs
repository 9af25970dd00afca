//! Command-line arguments

use crate::command::COMMAND_NAMES;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "home-copilot")]
#[command(version = env!("APP_VERSION"))]
#[command(about = "EV-aware home energy copilot driving devices through IFTTT webhooks")]
pub struct Cli {
    /// Configuration file (JSON or YAML); defaults to ./config.json
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Evaluate the tariff window at this hour instead of the current one
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(0..24))]
    pub hour: Option<u8>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Interactive prompt (default)
    Repl,

    /// Run a single command and exit
    Exec {
        /// One of: optimize_energy, charge_ev, turn_on_device, turn_off_device
        #[arg(value_parser = clap::builder::PossibleValuesParser::new(COMMAND_NAMES))]
        command: String,

        /// Command argument as key=value (e.g. mode=force_on, device=ac)
        #[arg(short = 'a', long = "arg", value_parser = parse_key_val)]
        args: Vec<(String, String)>,
    },

    /// Write a template configuration file
    InitConfig {
        #[arg(default_value = "config.json")]
        path: PathBuf,
    },

    /// Show the current hour, tariff window and configured devices
    Status,
}

/// Parse a `key=value` argument
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
