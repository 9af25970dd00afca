#![allow(dead_code)]

use async_trait::async_trait;
use home_copilot::error::{CopilotError, Result};
use home_copilot::notifier::{Delivery, Notifier};
use home_copilot::{DeviceController, FixedClock, TariffWindow};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// One recorded notify call: (event, value1, value2)
pub type Call = (String, Option<String>, Option<String>);

/// Notifier double that records every call instead of sending it
#[derive(Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<Call>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// (event, device) pairs in call order
    pub fn events(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .map(|(e, v1, _)| (e, v1.unwrap_or_default()))
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        event_name: &str,
        value1: Option<&str>,
        value2: Option<&str>,
    ) -> Result<Delivery> {
        self.calls.lock().unwrap().push((
            event_name.to_string(),
            value1.map(str::to_string),
            value2.map(str::to_string),
        ));
        if self.fail {
            return Err(CopilotError::network("connection refused"));
        }
        Ok(Delivery { status: 200 })
    }
}

pub fn topics(names: &[&str]) -> BTreeMap<String, String> {
    names
        .iter()
        .map(|n| (n.to_string(), format!("topic/{}", n)))
        .collect()
}

/// Controller with a 22..7 window pinned to `hour`
pub fn controller_at(hour: u8, devices: &[&str]) -> (DeviceController, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = DeviceController::new(
        topics(devices),
        TariffWindow::new(22, 7),
        notifier.clone(),
        Arc::new(FixedClock(hour)),
    );
    (controller, notifier)
}

pub fn off(device: &str) -> (String, String) {
    ("turn_off_device".to_string(), device.to_string())
}

pub fn on(device: &str) -> (String, String) {
    ("turn_on_device".to_string(), device.to_string())
}
