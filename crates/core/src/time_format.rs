//! `HH:MM` clock strings: strict parsing for preference input and lenient
//! 12-hour formatting for schedule display.

use std::fmt;

use crate::error::CoreError;

/// A validated 24-hour wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Parse a strict `HH:MM` 24-hour time (`H:MM` is also accepted).
///
/// Hours must be `0..=23` and minutes exactly two digits in `0..=59`.
pub fn parse_clock(value: &str) -> Result<ClockTime, CoreError> {
    let invalid = || {
        CoreError::Validation(format!(
            "Invalid time '{value}'. Expected 24-hour HH:MM"
        ))
    };

    let (h, m) = value.trim().split_once(':').ok_or_else(invalid)?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return Err(invalid());
    }
    if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hour: u8 = h.parse().map_err(|_| invalid())?;
    let minute: u8 = m.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    Ok(ClockTime { hour, minute })
}

/// Format a 24-hour `HH:MM` string for display as `h:MM AM|PM`.
///
/// Hour 0 becomes `12 AM` and hour 12 becomes `12 PM`. The minute part is
/// copied as received. Input whose hour part is not a number in `0..=23`
/// is returned unchanged so a malformed time still shows up in the row.
pub fn format_12h(value: &str) -> String {
    let Some((h, m)) = value.split_once(':') else {
        return value.to_string();
    };

    let hour = match h.trim().parse::<u8>() {
        Ok(hour) if hour <= 23 => hour,
        _ => return value.to_string(),
    };

    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let h12 = match hour % 12 {
        0 => 12,
        other => other,
    };

    format!("{h12}:{m} {suffix}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
