//! Time-code parsing and formatting.
//!
//! Durations are whole seconds. User input is accepted as `MM:SS` or
//! `HH:MM:SS` and always normalized to the canonical `HH:MM:SS` form before
//! it reaches an external tool.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ReelcutError, Result};

/// A non-negative number of whole seconds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Duration(u64);

impl Duration {
    /// Zero seconds.
    pub const ZERO: Self = Self(0);

    /// Create a duration from whole seconds.
    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Whole seconds in this duration.
    #[inline]
    pub const fn as_secs(self) -> u64 {
        self.0
    }

    /// Round a fractional second count up to the next whole second.
    ///
    /// Returns `None` for negative, NaN or infinite input.
    pub fn from_seconds_ceil(seconds: f64) -> Option<Self> {
        if !seconds.is_finite() || seconds < 0.0 || seconds > u64::MAX as f64 {
            return None;
        }
        Some(Self(seconds.ceil() as u64))
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0;
        write!(
            f,
            "{:02}:{:02}:{:02}",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    }
}

impl FromStr for Duration {
    type Err = ReelcutError;

    fn from_str(s: &str) -> Result<Self> {
        parse_duration(s)
    }
}

/// Parse `MM:SS` or `HH:MM:SS` into a [`Duration`].
///
/// Fields are not range checked: `"00:90"` is 90 seconds. The arithmetic is
/// literal, never calendar-normalized.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let fields: Vec<&str> = input.split(':').collect();

    let (hours, minutes, seconds) = match fields.as_slice() {
        [m, s] => (0, parse_field(input, m)?, parse_field(input, s)?),
        [h, m, s] => (
            parse_field(input, h)?,
            parse_field(input, m)?,
            parse_field(input, s)?,
        ),
        _ => {
            return Err(ReelcutError::invalid_format(
                input,
                format!("expected 2 or 3 fields, found {}", fields.len()),
            ))
        }
    };

    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .map(Duration)
        .ok_or_else(|| ReelcutError::invalid_format(input, "value out of range"))
}

/// Render a duration in canonical `HH:MM:SS` form.
///
/// The hour field grows past two digits for very long durations.
pub fn format_duration(duration: Duration) -> String {
    duration.to_string()
}

fn parse_field(input: &str, field: &str) -> Result<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReelcutError::invalid_format(
            input,
            format!("'{field}' is not a non-negative integer"),
        ));
    }
    field
        .parse()
        .map_err(|_| ReelcutError::invalid_format(input, "value out of range"))
}
