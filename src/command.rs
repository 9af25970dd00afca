//! Command dispatch
//!
//! Both the interactive prompt and automated callers (`exec`) come through
//! [`handle_command`]. Names and argument keys form a small closed set; the
//! dispatcher never fails, unknown input is logged and ignored.

use crate::controller::{ChargeMode, DeviceAction, DeviceController, EnergyMode};
use crate::error::Result;
use std::collections::HashMap;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// Argument mapping accepted by [`handle_command`]
pub type CommandArgs = HashMap<String, String>;

/// Recognized command names, in help order
pub const COMMAND_NAMES: [&str; 4] = [
    "optimize_energy",
    "charge_ev",
    "turn_on_device",
    "turn_off_device",
];

/// Device used by the device commands when no `device` argument is given
pub const DEFAULT_DEVICE: &str = "lamp";

/// A parsed command with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OptimizeEnergy { mode: EnergyMode },
    ChargeEv { mode: ChargeMode },
    TurnOnDevice { device: String },
    TurnOffDevice { device: String },
}

impl Command {
    /// Build a command from its name and arguments; `None` for unknown names.
    ///
    /// Missing arguments take their defaults (`mode=eco`, `mode=auto`,
    /// `device=lamp`). Unrelated argument keys are ignored.
    pub fn parse(name: &str, args: &CommandArgs) -> Option<Self> {
        let command = match name {
            "optimize_energy" => Self::OptimizeEnergy {
                mode: arg(args, "mode").map(EnergyMode::from_label).unwrap_or_default(),
            },
            "charge_ev" => Self::ChargeEv {
                mode: arg(args, "mode").map(ChargeMode::from_label).unwrap_or_default(),
            },
            "turn_on_device" => Self::TurnOnDevice {
                device: arg(args, "device").unwrap_or(DEFAULT_DEVICE).to_string(),
            },
            "turn_off_device" => Self::TurnOffDevice {
                device: arg(args, "device").unwrap_or(DEFAULT_DEVICE).to_string(),
            },
            _ => return None,
        };
        Some(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OptimizeEnergy { .. } => "optimize_energy",
            Self::ChargeEv { .. } => "charge_ev",
            Self::TurnOnDevice { .. } => "turn_on_device",
            Self::TurnOffDevice { .. } => "turn_off_device",
        }
    }

    /// Run the command against `controller`, returning the actions issued
    pub async fn execute(&self, controller: &DeviceController) -> Vec<DeviceAction> {
        match self {
            Self::OptimizeEnergy { mode } => controller.optimize_home_energy(mode).await,
            Self::ChargeEv { mode } => controller.optimize_ev_charging(mode).await,
            Self::TurnOnDevice { device } => vec![controller.turn_on(device).await],
            Self::TurnOffDevice { device } => vec![controller.turn_off(device).await],
        }
    }
}

fn arg<'a>(args: &'a CommandArgs, key: &str) -> Option<&'a str> {
    args.get(key).map(String::as_str)
}

/// Route a named command to the controller.
///
/// Returns the device actions issued; an unknown command yields none.
pub async fn handle_command(
    controller: &DeviceController,
    command_name: &str,
    args: &CommandArgs,
) -> Vec<DeviceAction> {
    debug!("handle_command command='{}' args={:?}", command_name, args);

    match Command::parse(command_name, args) {
        Some(command) => command.execute(controller).await,
        None => {
            warn!("Unknown command: {}", command_name);
            Vec::new()
        }
    }
}

/// One-shot dispatch for `exec`: run the command and write each action to
/// `output` on its own line, e.g. `charger -> ON`
pub async fn exec_command<W: AsyncWrite + Unpin>(
    controller: &DeviceController,
    command_name: &str,
    args: &CommandArgs,
    mut output: W,
) -> Result<Vec<DeviceAction>> {
    let actions = handle_command(controller, command_name, args).await;
    for action in &actions {
        output.write_all(format!("{}\n", action).as_bytes()).await?;
    }
    output.flush().await?;
    Ok(actions)
}
