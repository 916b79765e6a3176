// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plane inference: the data envelope, user adjustments, then padding.

extern crate alloc;

use alloc::sync::Arc;
use core::fmt;

use crate::config::Config;
use crate::coords::{Axis, Plane, Position, scale_data_x, scale_data_y};

/// Width given to an axis whose data has no extent.
pub const DEGENERATE_WIDENING: f64 = 10.0;

/// How a bound is combined with the value named in an [`Adjust`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edit {
    /// The smaller of the value and the current bound.
    OrLower,
    /// The larger of the value and the current bound.
    OrHigher,
    /// The value, whatever the current bound.
    Exactly,
    /// The current bound plus the value.
    More,
    /// The current bound minus the value.
    Less,
}

impl Edit {
    fn apply(self, value: f64, current: f64) -> f64 {
        match self {
            Self::OrLower => value.min(current),
            Self::OrHigher => value.max(current),
            Self::Exactly => value,
            Self::More => current + value,
            Self::Less => current - value,
        }
    }
}

/// One step of a range (x) or domain (y) adjustment pipeline.
pub enum Adjust {
    /// Edits the lower bound.
    Lowest(f64, Edit),
    /// Edits the upper bound.
    Highest(f64, Edit),
    /// Sets both bounds.
    Window(f64, f64),
    /// Resets both bounds to the data envelope.
    LikeData,
    /// Widens the interval symmetrically around a value.
    CenterAt(f64),
    /// Any other edit.
    Custom(Arc<dyn Fn(Axis) -> Axis>),
}

impl Adjust {
    /// A custom adjustment.
    pub fn custom(f: impl Fn(Axis) -> Axis + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Applies this step to `axis`.
    pub fn apply(&self, axis: Axis) -> Axis {
        match self {
            Self::Lowest(v, edit) => Axis {
                min: edit.apply(*v, axis.min),
                ..axis
            },
            Self::Highest(v, edit) => Axis {
                max: edit.apply(*v, axis.max),
                ..axis
            },
            Self::Window(a, b) => Axis {
                min: *a,
                max: *b,
                ..axis
            },
            Self::LikeData => Axis {
                min: axis.data_min,
                max: axis.data_max,
                ..axis
            },
            Self::CenterAt(c) => {
                let half = (c - axis.min).abs().max((c - axis.max).abs());
                Axis {
                    min: c - half,
                    max: c + half,
                    ..axis
                }
            }
            Self::Custom(f) => f(axis),
        }
    }
}

impl Clone for Adjust {
    fn clone(&self) -> Self {
        match self {
            Self::Lowest(v, e) => Self::Lowest(*v, *e),
            Self::Highest(v, e) => Self::Highest(*v, *e),
            Self::Window(a, b) => Self::Window(*a, *b),
            Self::LikeData => Self::LikeData,
            Self::CenterAt(c) => Self::CenterAt(*c),
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl fmt::Debug for Adjust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lowest(v, e) => f.debug_tuple("Lowest").field(v).field(e).finish(),
            Self::Highest(v, e) => f.debug_tuple("Highest").field(v).field(e).finish(),
            Self::Window(a, b) => f.debug_tuple("Window").field(a).field(b).finish(),
            Self::LikeData => f.write_str("LikeData"),
            Self::CenterAt(c) => f.debug_tuple("CenterAt").field(c).finish(),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

/// The domain used when none is declared: start at zero unless the data goes lower.
pub fn default_domain() -> [Adjust; 1] {
    [Adjust::Lowest(0.0, Edit::OrLower)]
}

fn widen(axis: Axis) -> Axis {
    let (min, max) = if axis.min > axis.max {
        (axis.max, axis.min)
    } else {
        (axis.min, axis.max)
    };
    let max = if max == min { max + DEGENERATE_WIDENING } else { max };
    Axis { min, max, ..axis }
}

/// Computes the plane for `config` from the data envelopes of everything drawn.
///
/// The envelopes are folded (no envelopes means the origin), degenerate axes are widened, the
/// range pipeline runs over x and the domain pipeline over y, left to right. Padding, given in
/// draw units, is then converted to data units with the scale of the unpadded plane.
pub fn infer_plane<D, M>(config: &Config<D, M>, limits: &[Position]) -> Plane {
    let envelope = Position::fold(limits).unwrap_or_default();
    let x = widen(Axis::new(config.width, envelope.x1, envelope.x2));
    let y = widen(Axis::new(config.height, envelope.y1, envelope.y2));
    let margin = config.margin;

    let x = config.range.iter().fold(x, |axis, step| step.apply(axis));
    let y = if config.domain.is_empty() {
        default_domain().iter().fold(y, |axis, step| step.apply(axis))
    } else {
        config.domain.iter().fold(y, |axis, step| step.apply(axis))
    };

    let unpadded = Plane {
        width: config.width,
        height: config.height,
        margin,
        x: widen(x).with_margins(margin.left, margin.right),
        y: widen(y).with_margins(margin.top, margin.bottom),
    };
    let padding = config.padding;
    let x = Axis {
        min: unpadded.x.min - scale_data_x(&unpadded, padding.left),
        max: unpadded.x.max + scale_data_x(&unpadded, padding.right),
        ..unpadded.x
    };
    let y = Axis {
        min: unpadded.y.min - scale_data_y(&unpadded, padding.bottom),
        max: unpadded.y.max + scale_data_y(&unpadded, padding.top),
        ..unpadded.y
    };
    let plane = Plane {
        x: widen(x),
        y: widen(y),
        ..unpadded
    };
    tracing::debug!(
        x_min = plane.x.min,
        x_max = plane.x.max,
        y_min = plane.y.min,
        y_max = plane.y.max,
        envelopes = limits.len(),
        "inferred plane"
    );
    plane
}
