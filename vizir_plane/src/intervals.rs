// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! "Nice" tick values.
//!
//! Ticks are multiples of a step chosen from a small set of round numbers scaled by a power of
//! ten. The step is the smallest member of the set that is at least `(max - min) / amount`, so
//! the number of ticks stays close to (and never much above) the requested amount.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Upper bound on the number of values any generator returns.
pub(crate) const MAX_TICKS: usize = 10_000;

const FLOAT_MULTIPLES: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];
const INT_MULTIPLES: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

/// Nice floating point tick values covering `[min, max]`.
///
/// Returns an empty vector for `amount == 0` or non-finite bounds, and the single value when
/// `min == max`.
pub fn floats(amount: usize, min: f64, max: f64) -> Vec<f64> {
    let Some((min, max)) = normalize(amount, min, max) else {
        return Vec::new();
    };
    if min == max {
        return alloc::vec![min];
    }
    let step = nice_step((max - min) / amount as f64, false);
    multiples(step, min, max)
}

/// Nice integer tick values covering `[min, max]`.
///
/// The step is always a whole number of at least one.
pub fn ints(amount: usize, min: f64, max: f64) -> Vec<i64> {
    ints_f64(amount, min, max)
        .into_iter()
        .map(|v| {
            #[allow(clippy::cast_possible_truncation, reason = "values are whole and bounded")]
            {
                v as i64
            }
        })
        .collect()
}

/// Like [`ints`], but returns the values as `f64` for use as axis positions.
pub fn ints_f64(amount: usize, min: f64, max: f64) -> Vec<f64> {
    let Some((min, max)) = normalize(amount, min, max) else {
        return Vec::new();
    };
    let min = min.ceil();
    let max = max.floor();
    if min > max {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    let step = nice_step((max - min) / amount as f64, true);
    multiples(step, min, max)
}

/// Returns the step [`floats`] would use for `amount` ticks over `[min, max]`.
///
/// Useful for formatting labels with a consistent number of decimals.
pub fn float_step(amount: usize, min: f64, max: f64) -> f64 {
    match normalize(amount, min, max) {
        Some((min, max)) if min < max => nice_step((max - min) / amount as f64, false),
        _ => 0.0,
    }
}

fn normalize(amount: usize, mut min: f64, mut max: f64) -> Option<(f64, f64)> {
    if amount == 0 || !min.is_finite() || !max.is_finite() {
        return None;
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    Some((min, max))
}

/// Rounds `raw` up to the nearest allowed nice step.
pub(crate) fn nice_step(raw: f64, integral: bool) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return if integral { 1.0 } else { 0.0 };
    }
    if integral && raw <= 1.0 {
        return 1.0;
    }
    let magnitude = 10_f64.powi(exponent(raw));
    let set: &[f64] = if integral && magnitude <= 1.0 {
        &INT_MULTIPLES
    } else {
        &FLOAT_MULTIPLES
    };
    let precision = decimals(magnitude) + 1;
    for &m in set {
        let step = correct_float(m * magnitude, precision);
        if step >= raw {
            return step;
        }
    }
    correct_float(10.0 * magnitude, precision)
}

fn exponent(v: f64) -> i32 {
    let e = v.log10().floor().clamp(-300.0, 300.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
    {
        e as i32
    }
}

/// Number of decimals needed to print `step` without drift, capped at 15.
pub(crate) fn decimals(step: f64) -> i32 {
    let step = step.abs();
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    let mut scaled = step;
    let mut d = 0;
    while d < 15 && (scaled - scaled.round()).abs() > 1e-9 * scaled.max(1.0) {
        scaled *= 10.0;
        d += 1;
    }
    d
}

fn correct_float(v: f64, precision: i32) -> f64 {
    if precision <= 0 {
        return v.round();
    }
    let p = 10_f64.powi(precision.min(15));
    (v * p).round() / p
}

fn multiples(step: f64, min: f64, max: f64) -> Vec<f64> {
    if step <= 0.0 || !step.is_finite() {
        return alloc::vec![min, max];
    }
    let precision = decimals(step);
    let tolerance = step * 1e-9;
    let first = {
        let m = min / step;
        if (m - m.round()).abs() < 1e-9 {
            m.round()
        } else {
            m.ceil()
        }
    };
    let mut out = Vec::new();
    let mut i = 0.0;
    loop {
        let v = correct_float((first + i) * step, precision);
        if v > max + tolerance || out.len() >= MAX_TICKS {
            break;
        }
        // `-0.0` prints as "-0".
        out.push(if v == 0.0 { 0.0 } else { v });
        i += 1.0;
    }
    tracing::trace!(step, count = out.len(), "generated nice ticks");
    out
}
