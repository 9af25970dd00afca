//! # Home Copilot - EV-aware home energy command dispatcher
//!
//! Forwards high-level intents ("turn on lamp", "optimize energy",
//! "charge EV") to the IFTTT Webhooks service, using a single time-of-day
//! tariff rule to decide whether to act.
//!
//! ## Architecture
//!
//! - `config`: Configuration loading and validation
//! - `logging`: Structured logging and tracing
//! - `tariff`: Low-tariff window rule and clocks
//! - `notifier`: Webhook delivery
//! - `controller`: Device switching and energy policies
//! - `command`: Command parsing and dispatch
//! - `repl`: Interactive front end
//! - `cli`: Command-line arguments

pub mod cli;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod notifier;
pub mod repl;
pub mod tariff;

// Re-export commonly used types
pub use command::{Command, CommandArgs, handle_command};
pub use config::{Config, load_config};
pub use controller::{ChargeMode, DeviceAction, DeviceController, EnergyMode, Switch};
pub use error::{CopilotError, Result};
pub use notifier::{IftttNotifier, Notifier};
pub use tariff::{Clock, FixedClock, SystemClock, TariffWindow, is_low_tariff};
