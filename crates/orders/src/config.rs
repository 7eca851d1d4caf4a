//! Lifecycle configuration knobs.

use serde::{Deserialize, Serialize};

/// Accepted delivery-time formats for parcels.
///
/// The time string is stored verbatim (no timezone arithmetic); only the shape
/// is validated. Which format is accepted is a deployment option, not a
/// hardcoded constant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `HH:MM`, e.g. `14:00`.
    HourColonMinute,
    /// `HHhMM`, e.g. `14h00`.
    HourHMinute,
}

impl TimeFormat {
    fn separator(self) -> u8 {
        match self {
            TimeFormat::HourColonMinute => b':',
            TimeFormat::HourHMinute => b'h',
        }
    }

    /// Display pattern, also the accepted spelling in configuration.
    pub fn pattern(self) -> &'static str {
        match self {
            TimeFormat::HourColonMinute => "HH:MM",
            TimeFormat::HourHMinute => "HHhMM",
        }
    }

    pub fn from_pattern(s: &str) -> Option<Self> {
        match s {
            "HH:MM" => Some(TimeFormat::HourColonMinute),
            "HHhMM" => Some(TimeFormat::HourHMinute),
            _ => None,
        }
    }

    /// Exact match against the configured pattern: two digits, the separator,
    /// two digits, with hour 00-23 and minute 00-59.
    pub fn matches(self, s: &str) -> bool {
        let b = s.as_bytes();
        if b.len() != 5 || b[2] != self.separator() {
            return false;
        }
        if ![b[0], b[1], b[3], b[4]].iter().all(|d| d.is_ascii_digit()) {
            return false;
        }
        let hour = (b[0] - b'0') * 10 + (b[1] - b'0');
        let minute = (b[3] - b'0') * 10 + (b[4] - b'0');
        hour < 24 && minute < 60
    }
}

/// Configuration consumed by the lifecycle engine and draft validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Minimum price (in currency units) accepted by the confirm transition.
    pub min_price: u64,
    /// Accepted delivery-time format for parcel records.
    pub delivery_time_format: TimeFormat,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            min_price: 500,
            delivery_time_format: TimeFormat::HourColonMinute,
        }
    }
}
