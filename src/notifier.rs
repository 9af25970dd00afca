//! IFTTT Webhooks notifier
//!
//! Sends one `POST {base}/trigger/{event}/with/key/{key}` per call with a JSON
//! body `{"value1": .., "value2": ..}`. The outcome is returned to the caller,
//! which decides how to log it; nothing is retried.

use crate::config::{Config, WebhookConfig};
use crate::error::{CopilotError, Result};
use crate::logging::{LogContext, StructuredLogger, get_logger_with_context};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Event name for switching a device on
pub const EVENT_TURN_ON: &str = "turn_on_device";

/// Event name for switching a device off
pub const EVENT_TURN_OFF: &str = "turn_off_device";

/// JSON body of a webhook trigger; absent values are sent as `null`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    pub value1: Option<String>,
    pub value2: Option<String>,
}

/// A request that reached the service; `status` may still be an error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub status: u16,
}

impl Delivery {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound event sink
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Trigger `event_name` with up to two opaque values.
    ///
    /// Errors mean no response was received (or the request was never sent,
    /// e.g. without a key); they are for the caller to log, not to abort on.
    async fn notify(
        &self,
        event_name: &str,
        value1: Option<&str>,
        value2: Option<&str>,
    ) -> Result<Delivery>;
}

/// Notifier backed by the IFTTT Maker Webhooks service
pub struct IftttNotifier {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
    logger: StructuredLogger,
}

impl IftttNotifier {
    /// Create a notifier; a `None` or blank key makes every call a no-op error
    pub fn new(api_key: Option<String>, webhook: &WebhookConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(webhook.timeout_secs))
            .user_agent(concat!("home-copilot/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let logger = get_logger_with_context(
            LogContext::new("notifier").with_field("service", webhook.base_url.clone()),
        );
        Ok(Self {
            api_key,
            base_url: webhook.base_url.trim_end_matches('/').to_string(),
            client,
            logger,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_key().map(str::to_string), &config.webhook)
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Trigger URL for `event_name`, if a key is configured
    pub fn trigger_url(&self, event_name: &str) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            format!(
                "{}/trigger/{}/with/key/{}",
                self.base_url, event_name, key
            )
        })
    }
}

#[async_trait]
impl Notifier for IftttNotifier {
    async fn notify(
        &self,
        event_name: &str,
        value1: Option<&str>,
        value2: Option<&str>,
    ) -> Result<Delivery> {
        let Some(url) = self.trigger_url(event_name) else {
            return Err(CopilotError::auth("IFTTT_KEY is not set in the configuration"));
        };

        let payload = WebhookPayload {
            value1: value1.map(str::to_string),
            value2: value2.map(str::to_string),
        };
        self.logger
            .debug(&format!("POST trigger event='{}' payload={:?}", event_name, payload));

        let resp = self.client.post(&url).json(&payload).send().await?;
        Ok(Delivery {
            status: resp.status().as_u16(),
        })
    }
}
