// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

extern crate alloc;

use alloc::string::{String, ToString};

use chrono::TimeZone;

use crate::intervals::decimals;
use crate::time::{TimeTick, TimeUnit};

/// Formats `value` with the number of decimals implied by the tick `step`.
///
/// `step == 0` falls back to [`format_float`].
pub fn format_tick_with_step(value: f64, step: f64) -> String {
    if step == 0.0 || !step.is_finite() {
        return format_float(value);
    }
    let d = usize::try_from(decimals(step)).unwrap_or(0);
    clean_zero(alloc::format!("{value:.d$}"))
}

/// Formats `value` with as few decimals as print it exactly (up to 15).
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return alloc::format!("{value}");
    }
    let d = usize::try_from(decimals(value)).unwrap_or(0);
    clean_zero(alloc::format!("{value:.d$}"))
}

fn clean_zero(s: String) -> String {
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

/// Formats a time tick in `zone`.
///
/// The format follows the tick's unit, or the coarser unit that rolled over at this tick.
pub fn format_time<Tz>(tick: &TimeTick, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: core::fmt::Display,
{
    #[allow(clippy::cast_possible_truncation, reason = "tick timestamps are whole milliseconds")]
    let millis = tick.timestamp as i64;
    let Some(dt) = zone.timestamp_millis_opt(millis).single() else {
        return format_float(tick.timestamp);
    };
    let unit = match tick.change {
        Some(change) if change > tick.unit => change,
        _ => tick.unit,
    };
    let pattern = match unit {
        TimeUnit::Millisecond => "%H:%M:%S%.3f",
        TimeUnit::Second => "%H:%M:%S",
        TimeUnit::Minute | TimeUnit::Hour => "%H:%M",
        TimeUnit::Day => "%-d %b",
        TimeUnit::Month => "%b",
        TimeUnit::Year => "%Y",
    };
    dt.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use chrono::Utc;

    use super::*;

    #[test]
    fn step_controls_decimals() {
        assert_eq!(format_tick_with_step(20.0, 20.0), "20");
        assert_eq!(format_tick_with_step(0.25, 0.05), "0.25");
        assert_eq!(format_tick_with_step(0.3, 0.1), "0.3");
        assert_eq!(format_tick_with_step(-0.0, 0.5), "0.0");
    }

    #[test]
    fn floats_print_minimal_decimals() {
        assert_eq!(format_float(3.0), "3");
        assert_eq!(format_float(2.5), "2.5");
        assert_eq!(format_float(-0.0), "0");
    }

    #[test]
    fn time_format_upgrades_on_change() {
        let ts = Utc
            .with_ymd_and_hms(2024, 5, 2, 0, 0, 0)
            .single()
            .map(|dt| dt.timestamp_millis() as f64)
            .unwrap_or_default();
        let hour = TimeTick {
            timestamp: ts,
            unit: TimeUnit::Hour,
            multiple: 3,
            change: None,
        };
        assert_eq!(format_time(&hour, &Utc), "00:00");
        let day = TimeTick {
            change: Some(TimeUnit::Day),
            ..hour
        };
        assert_eq!(format_time(&day, &Utc), "2 May");
    }
}
