// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar-aware time ticks.
//!
//! Time values are milliseconds since the Unix epoch, stored as `f64` like every other axis
//! value. Tick intervals are picked from a fixed table (milliseconds through years), and
//! boundaries are generated on the local calendar of a [`chrono::TimeZone`]: a monthly tick is
//! always on the first of the month, whatever the month's length.

extern crate alloc;

use alloc::vec::Vec;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Timelike};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::intervals::{MAX_TICKS, nice_step};

/// A calendar unit, ordered from finest to coarsest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeUnit {
    /// Milliseconds.
    Millisecond,
    /// Seconds.
    Second,
    /// Minutes.
    Minute,
    /// Hours.
    Hour,
    /// Calendar days (midnight to midnight in the zone).
    Day,
    /// Calendar months.
    Month,
    /// Calendar years.
    Year,
}

impl TimeUnit {
    /// Approximate duration of one unit in milliseconds, used only to pick an interval.
    pub fn approx_millis(self) -> f64 {
        match self {
            Self::Millisecond => 1.0,
            Self::Second => 1_000.0,
            Self::Minute => 60_000.0,
            Self::Hour => 3_600_000.0,
            Self::Day => 86_400_000.0,
            Self::Month => 2_629_746_000.0,
            Self::Year => 31_556_952_000.0,
        }
    }

    fn multiples(self) -> &'static [u32] {
        match self {
            Self::Millisecond => &[1, 2, 5, 10, 20, 25, 50, 100, 200, 500],
            Self::Second | Self::Minute => &[1, 2, 5, 10, 15, 30],
            Self::Hour => &[1, 2, 3, 4, 6, 12],
            Self::Day => &[1, 2, 3, 7, 14],
            Self::Month => &[1, 2, 3, 4, 6],
            Self::Year => &[1, 2, 5, 10, 20, 25, 50, 100, 200, 500, 1000],
        }
    }
}

const UNITS: [TimeUnit; 7] = [
    TimeUnit::Millisecond,
    TimeUnit::Second,
    TimeUnit::Minute,
    TimeUnit::Hour,
    TimeUnit::Day,
    TimeUnit::Month,
    TimeUnit::Year,
];

/// One generated time tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeTick {
    /// Milliseconds since the Unix epoch.
    pub timestamp: f64,
    /// Unit of the chosen interval.
    pub unit: TimeUnit,
    /// How many `unit`s lie between ticks.
    pub multiple: u32,
    /// The coarsest unit above `unit` that rolled over since the previous tick, if any.
    pub change: Option<TimeUnit>,
}

/// Picks the interval used for about `amount` ticks over a span of `span_ms` milliseconds.
pub fn interval(amount: usize, span_ms: f64) -> (TimeUnit, u32) {
    let amount = amount.max(1) as f64;
    for unit in UNITS {
        for &m in unit.multiples() {
            if span_ms / (unit.approx_millis() * f64::from(m)) <= amount {
                return (unit, m);
            }
        }
    }
    let years = span_ms / TimeUnit::Year.approx_millis() / amount;
    let m = nice_step(years, true).min(f64::from(u32::MAX));
    #[allow(clippy::cast_possible_truncation, reason = "bounded by u32::MAX above")]
    (TimeUnit::Year, m as u32)
}

/// Calendar-aligned ticks covering `[min, max]` (milliseconds since the epoch) in `zone`.
///
/// Returns an empty vector for `amount == 0` or non-finite bounds.
pub fn times<Tz: TimeZone>(zone: &Tz, amount: usize, mut min: f64, mut max: f64) -> Vec<TimeTick> {
    if amount == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let (unit, multiple) = interval(amount, max - min);
    let Some(start) = zone.timestamp_millis_opt(to_millis(min)).single() else {
        return Vec::new();
    };

    let mut local = ceil_local(start.naive_local(), to_millis(min), zone, unit, multiple);
    let mut out: Vec<TimeTick> = Vec::new();
    let mut previous: Option<NaiveDateTime> = None;
    while let Some(current) = local {
        if out.len() >= MAX_TICKS {
            break;
        }
        if let Some(ts) = to_timestamp(zone, &current) {
            if ts as f64 > max {
                break;
            }
            // `ceil_local` compares against the rounded minimum.
            let is_new = ts as f64 >= min && out.last().is_none_or(|t| t.timestamp < ts as f64);
            if is_new {
                out.push(TimeTick {
                    timestamp: ts as f64,
                    unit,
                    multiple,
                    change: previous.and_then(|p| change(&p, &current, unit)),
                });
                previous = Some(current);
            }
        }
        local = add(current, unit, multiple);
    }
    tracing::trace!(?unit, multiple, count = out.len(), "generated time ticks");
    out
}

fn to_millis(v: f64) -> i64 {
    let v = v.round().clamp(i64::MIN as f64, i64::MAX as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
    {
        v as i64
    }
}

fn to_timestamp<Tz: TimeZone>(zone: &Tz, local: &NaiveDateTime) -> Option<i64> {
    zone.from_local_datetime(local)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

fn floor_local(t: NaiveDateTime, unit: TimeUnit, multiple: u32) -> Option<NaiveDateTime> {
    let m = multiple.max(1);
    let date = t.date();
    match unit {
        TimeUnit::Year => {
            let year = date.year() - date.year().rem_euclid(m.min(i32::MAX as u32) as i32);
            NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)
        }
        TimeUnit::Month => {
            let month0 = date.month0() - date.month0() % m;
            NaiveDate::from_ymd_opt(date.year(), month0 + 1, 1)?.and_hms_opt(0, 0, 0)
        }
        TimeUnit::Day => {
            let day0 = date.day0() - date.day0() % m;
            NaiveDate::from_ymd_opt(date.year(), date.month(), day0 + 1)?.and_hms_opt(0, 0, 0)
        }
        TimeUnit::Hour => date.and_hms_opt(t.hour() - t.hour() % m, 0, 0),
        TimeUnit::Minute => date.and_hms_opt(t.hour(), t.minute() - t.minute() % m, 0),
        TimeUnit::Second => date.and_hms_opt(t.hour(), t.minute(), t.second() - t.second() % m),
        TimeUnit::Millisecond => {
            let ms = (t.nanosecond() / 1_000_000) % 1_000;
            date.and_hms_milli_opt(t.hour(), t.minute(), t.second(), ms - ms % m)
        }
    }
}

fn ceil_local<Tz: TimeZone>(
    t: NaiveDateTime,
    min_ms: i64,
    zone: &Tz,
    unit: TimeUnit,
    multiple: u32,
) -> Option<NaiveDateTime> {
    let floored = floor_local(t, unit, multiple)?;
    match to_timestamp(zone, &floored) {
        Some(ts) if ts >= min_ms => Some(floored),
        _ => add(floored, unit, multiple),
    }
}

fn add(t: NaiveDateTime, unit: TimeUnit, multiple: u32) -> Option<NaiveDateTime> {
    let m = i64::from(multiple.max(1));
    match unit {
        TimeUnit::Year => t.checked_add_months(Months::new(multiple.max(1).checked_mul(12)?)),
        TimeUnit::Month => t.checked_add_months(Months::new(multiple.max(1))),
        TimeUnit::Day => t.checked_add_signed(TimeDelta::try_days(m)?),
        TimeUnit::Hour => t.checked_add_signed(TimeDelta::try_hours(m)?),
        TimeUnit::Minute => t.checked_add_signed(TimeDelta::try_minutes(m)?),
        TimeUnit::Second => t.checked_add_signed(TimeDelta::try_seconds(m)?),
        TimeUnit::Millisecond => t.checked_add_signed(TimeDelta::try_milliseconds(m)?),
    }
}

fn change(previous: &NaiveDateTime, current: &NaiveDateTime, unit: TimeUnit) -> Option<TimeUnit> {
    let rolled = [
        (TimeUnit::Year, previous.year() != current.year()),
        (TimeUnit::Month, previous.month() != current.month()),
        (TimeUnit::Day, previous.date() != current.date()),
        (TimeUnit::Hour, previous.hour() != current.hour()),
        (TimeUnit::Minute, previous.minute() != current.minute()),
        (TimeUnit::Second, previous.second() != current.second()),
    ];
    rolled
        .into_iter()
        .find(|(u, changed)| *u > unit && *changed)
        .map(|(u, _)| u)
}
