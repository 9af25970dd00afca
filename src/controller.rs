//! Device control and energy policies
//!
//! `DeviceController` turns logical device names into webhook events and
//! implements the two tariff-driven policies: home energy optimization and EV
//! charging.

use crate::config::Config;
use crate::error::CopilotError;
use crate::logging::{LogContext, StructuredLogger, get_logger, get_logger_with_context};
use crate::notifier::{EVENT_TURN_OFF, EVENT_TURN_ON, Notifier};
use crate::tariff::{Clock, TariffWindow};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Devices switched off in eco mode during peak hours, in this order
pub const NON_CRITICAL_DEVICES: [&str; 2] = ["lamp", "ac"];

/// Logical name of the EV charger
pub const CHARGER_DEVICE: &str = "charger";

/// Requested device state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    /// Webhook event carrying this switch request
    pub fn event_name(self) -> &'static str {
        match self {
            Self::On => EVENT_TURN_ON,
            Self::Off => EVENT_TURN_OFF,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

/// A switch request sent (or attempted) for one device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAction {
    pub device: String,
    pub switch: Switch,
}

impl DeviceAction {
    pub fn on(device: &str) -> Self {
        Self {
            device: device.to_string(),
            switch: Switch::On,
        }
    }

    pub fn off(device: &str) -> Self {
        Self {
            device: device.to_string(),
            switch: Switch::Off,
        }
    }
}

impl fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.device, self.switch.as_str())
    }
}

/// Home energy optimization mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnergyMode {
    /// Switch off non-critical devices outside the low-tariff window
    #[default]
    Eco,
    /// Take no action
    Comfort,
    /// Anything else; logged and ignored
    Unrecognized(String),
}

impl EnergyMode {
    pub fn from_label(s: &str) -> Self {
        match s {
            "eco" => Self::Eco,
            "comfort" => Self::Comfort,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Eco => "eco",
            Self::Comfort => "comfort",
            Self::Unrecognized(s) => s,
        }
    }
}

/// EV charging mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChargeMode {
    /// Charge inside the low-tariff window, stop outside it
    #[default]
    Auto,
    /// Charge now regardless of tariff
    ForceOn,
    /// Stop now regardless of tariff
    ForceOff,
    /// Anything else; handled like `Auto`
    Unrecognized(String),
}

impl ChargeMode {
    pub fn from_label(s: &str) -> Self {
        match s {
            "auto" => Self::Auto,
            "force_on" => Self::ForceOn,
            "force_off" => Self::ForceOff,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "auto",
            Self::ForceOn => "force_on",
            Self::ForceOff => "force_off",
            Self::Unrecognized(s) => s,
        }
    }
}

/// High-level controller for home devices, including the EV charger
pub struct DeviceController {
    device_topics: BTreeMap<String, String>,
    tariff: TariffWindow,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    logger: StructuredLogger,
}

impl DeviceController {
    pub fn new(
        device_topics: BTreeMap<String, String>,
        tariff: TariffWindow,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            device_topics,
            tariff,
            notifier,
            clock,
            logger: get_logger("controller"),
        }
    }

    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            config.device_topics.clone(),
            config.tariff_config.window(),
            notifier,
            clock,
        )
    }

    pub fn device_topics(&self) -> &BTreeMap<String, String> {
        &self.device_topics
    }

    pub fn tariff(&self) -> TariffWindow {
        self.tariff
    }

    /// Current hour and whether it is inside the low-tariff window
    pub fn tariff_now(&self) -> (u8, bool) {
        let hour = self.clock.current_hour();
        (hour, self.tariff.contains(hour))
    }

    /// Turn on a device; any name is forwarded, known or not
    pub async fn turn_on(&self, device_name: &str) -> DeviceAction {
        self.switch(device_name, Switch::On).await
    }

    /// Turn off a device; any name is forwarded, known or not
    pub async fn turn_off(&self, device_name: &str) -> DeviceAction {
        self.switch(device_name, Switch::Off).await
    }

    async fn switch(&self, device_name: &str, switch: Switch) -> DeviceAction {
        let logger = action_logger(device_name, switch);
        logger.info(&format!(
            "Turning {} device='{}'",
            switch.as_str(),
            device_name
        ));

        let event = switch.event_name();
        match self.notifier.notify(event, Some(device_name), None).await {
            Ok(delivery) if delivery.is_success() => logger.info(&format!(
                "Sent IFTTT event='{}' value1='{}' status={}",
                event, device_name, delivery.status
            )),
            Ok(delivery) => logger.warn(&format!(
                "IFTTT event='{}' value1='{}' rejected with status={}",
                event, device_name, delivery.status
            )),
            Err(CopilotError::Auth { message }) => {
                logger.error(&format!("{}; skipped event '{}'", message, event))
            }
            Err(e) => logger.error(&format!("Failed to send IFTTT event '{}': {}", event, e)),
        }

        DeviceAction {
            device: device_name.to_string(),
            switch,
        }
    }

    /// Home energy optimization.
    ///
    /// `Eco` switches off the non-critical devices present in the device map
    /// when outside the low-tariff window; every other mode leaves devices alone.
    pub async fn optimize_home_energy(&self, mode: &EnergyMode) -> Vec<DeviceAction> {
        let (hour, in_low_tariff) = self.tariff_now();
        self.logger.info(&format!(
            "Running home energy optimization at {:02}:00, mode={}",
            hour,
            mode.as_str()
        ));

        let mut actions = Vec::new();
        match mode {
            EnergyMode::Eco if in_low_tariff => {
                self.logger
                    .info("Eco mode: low-tariff period, keeping devices as-is.");
            }
            EnergyMode::Eco => {
                for device in NON_CRITICAL_DEVICES {
                    if self.device_topics.contains_key(device) {
                        actions.push(self.turn_off(device).await);
                    }
                }
                self.logger
                    .info("Eco mode: turned off non-critical devices during peak hours.");
            }
            EnergyMode::Comfort => {
                self.logger.info("Comfort mode: no aggressive actions taken.");
            }
            EnergyMode::Unrecognized(other) => {
                self.logger
                    .warn(&format!("Unknown home energy mode='{}'", other));
            }
        }
        actions
    }

    /// EV charging policy for the `charger` device.
    ///
    /// Forced modes bypass the tariff check; `Auto` and unrecognized modes
    /// charge only inside the low-tariff window.
    pub async fn optimize_ev_charging(&self, mode: &ChargeMode) -> Vec<DeviceAction> {
        let (hour, in_low_tariff) = self.tariff_now();
        self.logger.info(&format!(
            "EV charging request at {:02}:00, mode={}, low-tariff window={}",
            hour,
            mode.as_str(),
            self.tariff
        ));

        match mode {
            ChargeMode::ForceOn => {
                let action = self.turn_on(CHARGER_DEVICE).await;
                self.logger
                    .info("EV charging: force_on -> charger turned ON.");
                return vec![action];
            }
            ChargeMode::ForceOff => {
                let action = self.turn_off(CHARGER_DEVICE).await;
                self.logger
                    .info("EV charging: force_off -> charger turned OFF.");
                return vec![action];
            }
            ChargeMode::Unrecognized(other) => {
                self.logger.warn(&format!(
                    "Unknown EV charging mode='{}', falling back to auto",
                    other
                ));
            }
            ChargeMode::Auto => {}
        }

        if in_low_tariff {
            self.logger
                .info("EV charging: inside low-tariff window -> starting charge.");
            vec![self.turn_on(CHARGER_DEVICE).await]
        } else {
            self.logger
                .info("EV charging: peak hours -> delaying charge.");
            vec![self.turn_off(CHARGER_DEVICE).await]
        }
    }
}

/// Logger for one switch request, carrying `action` and `device` fields
fn action_logger(device_name: &str, switch: Switch) -> StructuredLogger {
    get_logger_with_context(
        LogContext::new("controller")
            .with_field("action", switch.as_str().to_string())
            .with_field("device", device_name.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_labels_roundtrip() {
        for label in ["eco", "comfort"] {
            assert_eq!(EnergyMode::from_label(label).as_str(), label);
        }
        for label in ["auto", "force_on", "force_off"] {
            assert_eq!(ChargeMode::from_label(label).as_str(), label);
        }
        assert_eq!(
            ChargeMode::from_label("turbo"),
            ChargeMode::Unrecognized("turbo".to_string())
        );
    }

    #[test]
    fn modes_are_case_sensitive() {
        assert_eq!(
            EnergyMode::from_label("ECO"),
            EnergyMode::Unrecognized("ECO".to_string())
        );
    }

    #[test]
    fn action_display() {
        assert_eq!(DeviceAction::off("lamp").to_string(), "lamp -> OFF");
        assert_eq!(Switch::On.event_name(), "turn_on_device");
    }

    #[test]
    fn switch_logs_carry_action_field() {
        let logger = action_logger("charger", Switch::On);
        assert_eq!(logger.component(), "controller");
        assert_eq!(
            logger.context.extra_fields,
            vec![
                ("action".to_string(), "ON".to_string()),
                ("device".to_string(), "charger".to_string()),
            ]
        );
    }
}
