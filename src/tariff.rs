//! Time-of-day tariff rule
//!
//! A single recurring daily window `[low_start, low_end)` decides whether
//! electricity is currently cheap. The window wraps past midnight when
//! `low_start > low_end` (e.g. 22..7).

use chrono::{Local, Timelike, Utc};
use chrono_tz::Tz;
use std::fmt;

/// Whether `hour` falls inside the low-tariff window.
///
/// Left-inclusive and right-exclusive. Equal bounds mean the whole day is low
/// tariff, not an empty window.
pub fn is_low_tariff(hour: u8, low_start: u8, low_end: u8) -> bool {
    hour >= low_start || hour < low_end
}

/// Recurring daily low-tariff window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TariffWindow {
    pub low_start: u8,
    pub low_end: u8,
}

impl TariffWindow {
    pub fn new(low_start: u8, low_end: u8) -> Self {
        Self { low_start, low_end }
    }

    /// See [`is_low_tariff`]
    pub fn contains(&self, hour: u8) -> bool {
        is_low_tariff(hour, self.low_start, self.low_end)
    }
}

impl fmt::Display for TariffWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:00-{}:00)", self.low_start, self.low_end)
    }
}

/// Source of the current hour of day
pub trait Clock: Send + Sync {
    /// Current hour in `0..24`
    fn current_hour(&self) -> u8;
}

/// Wall clock, in the configured timezone or host local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    tz: Option<Tz>,
}

impl SystemClock {
    pub fn new(tz: Option<Tz>) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn current_hour(&self) -> u8 {
        let hour = match self.tz {
            Some(tz) => Utc::now().with_timezone(&tz).hour(),
            None => Local::now().hour(),
        };
        // chrono guarantees 0..=23
        hour as u8
    }
}

/// Clock pinned to one hour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u8);

impl Clock for FixedClock {
    fn current_hour(&self) -> u8 {
        self.0
    }
}
