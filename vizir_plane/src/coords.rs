// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coordinate plane.
//!
//! A [`Plane`] pairs a drawing surface (width, height, margins) with a data interval per axis.
//! The free functions in this module are the only place scaling between data space and draw
//! space is computed; everything else in the crate goes through them.
//!
//! Draw-space y grows downward while data-space y grows upward, so the y mapping is inverted.

use kurbo::{Affine, Point, Rect};

/// Outer offsets reserved around the drawing area, in draw units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    /// Space above the drawing area.
    pub top: f64,
    /// Space below the drawing area.
    pub bottom: f64,
    /// Space left of the drawing area.
    pub left: f64,
    /// Space right of the drawing area.
    pub right: f64,
}

impl Margin {
    /// The same offset on every side.
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }

    /// Creates a margin from explicit sides.
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }
}

/// One dimension of a [`Plane`].
///
/// `min`/`max` is the visible interval; `data_min`/`data_max` is the interval derived from the
/// data before any adjustments, kept so adjustments can refer back to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axis {
    /// Total length of the axis in draw units (surface width or height).
    pub length: f64,
    /// Margin at the low end of the axis in draw units (left for x, top for y).
    pub margin_min: f64,
    /// Margin at the high end of the axis in draw units (right for x, bottom for y).
    pub margin_max: f64,
    /// Lowest data value found in the chart's series.
    pub data_min: f64,
    /// Highest data value found in the chart's series.
    pub data_max: f64,
    /// Lowest visible value.
    pub min: f64,
    /// Highest visible value.
    pub max: f64,
}

impl Axis {
    /// Creates an axis over `[min, max]` with no margins, recording the interval as data bounds.
    pub fn new(length: f64, min: f64, max: f64) -> Self {
        Self {
            length,
            margin_min: 0.0,
            margin_max: 0.0,
            data_min: min,
            data_max: max,
            min,
            max,
        }
    }

    /// Sets the margins at either end of the axis.
    pub fn with_margins(mut self, margin_min: f64, margin_max: f64) -> Self {
        self.margin_min = margin_min;
        self.margin_max = margin_max;
        self
    }

    /// Length of the visible interval, or `1.0` when it is empty or inverted.
    pub fn range(&self) -> f64 {
        let diff = self.max - self.min;
        if diff > 0.0 { diff } else { 1.0 }
    }

    /// Length available for data, never below one draw unit.
    pub fn inner_length(&self) -> f64 {
        (self.length - self.margin_min - self.margin_max).max(1.0)
    }

    /// Clamps `value` into the visible interval.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Returns `true` if `value` lies in the visible interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// The middle of the visible interval.
    pub fn middle(&self) -> f64 {
        self.min + (self.max - self.min) / 2.0
    }
}

/// The data-space to draw-space mapping of one chart render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Surface width in draw units.
    pub width: f64,
    /// Surface height in draw units.
    pub height: f64,
    /// Outer margins.
    pub margin: Margin,
    /// Horizontal axis.
    pub x: Axis,
    /// Vertical axis.
    pub y: Axis,
}

impl Plane {
    /// Creates a plane over the given data intervals, taking axis lengths and margins from the
    /// surface size and `margin`.
    pub fn new(width: f64, height: f64, margin: Margin, x: (f64, f64), y: (f64, f64)) -> Self {
        Self {
            width,
            height,
            margin,
            x: Axis::new(width, x.0, x.1).with_margins(margin.left, margin.right),
            y: Axis::new(height, y.0, y.1).with_margins(margin.top, margin.bottom),
        }
    }

    /// The drawing area inside the margins.
    pub fn inner_rect(&self) -> Rect {
        Rect::new(
            self.x.margin_min,
            self.y.margin_min,
            self.x.margin_min + self.x.inner_length(),
            self.y.margin_min + self.y.inner_length(),
        )
    }

    /// The whole surface, margins included.
    pub fn surface_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Maps a data-space point to draw space.
    pub fn draw_point(&self, x: f64, y: f64) -> Point {
        Point::new(to_draw_x(self, x), to_draw_y(self, y))
    }

    /// Maps a draw-space point to data space.
    pub fn data_point(&self, point: Point) -> Point {
        Point::new(to_data_x(self, point.x), to_data_y(self, point.y))
    }

    /// Maps a data-space envelope to a draw-space rectangle.
    pub fn draw_rect(&self, position: &Position) -> Rect {
        Rect::new(
            to_draw_x(self, position.x1),
            to_draw_y(self, position.y2),
            to_draw_x(self, position.x2),
            to_draw_y(self, position.y1),
        )
        .abs()
    }

    /// Returns `true` if the data-space point is inside the visible intervals.
    pub fn contains_data_point(&self, x: f64, y: f64) -> bool {
        self.x.contains(x) && self.y.contains(y)
    }
}

/// A data-space envelope.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    /// Low x edge.
    pub x1: f64,
    /// High x edge.
    pub x2: f64,
    /// Low y edge.
    pub y1: f64,
    /// High y edge.
    pub y2: f64,
}

impl Position {
    /// Creates an envelope from its edges.
    pub fn new(x1: f64, x2: f64, y1: f64, y2: f64) -> Self {
        Self { x1, x2, y1, y2 }
    }

    /// A zero-area envelope at a single point.
    pub fn from_point(x: f64, y: f64) -> Self {
        Self::new(x, x, y, y)
    }

    /// The smallest envelope covering both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x1: self.x1.min(self.x2).min(other.x1.min(other.x2)),
            x2: self.x1.max(self.x2).max(other.x1.max(other.x2)),
            y1: self.y1.min(self.y2).min(other.y1.min(other.y2)),
            y2: self.y1.max(self.y2).max(other.y1.max(other.y2)),
        }
    }

    /// Folds envelopes into one covering all of them, or `None` for an empty input.
    pub fn fold<'a>(positions: impl IntoIterator<Item = &'a Self>) -> Option<Self> {
        positions
            .into_iter()
            .fold(None, |acc: Option<Self>, p| match acc {
                None => Some(p.union(p)),
                Some(acc) => Some(acc.union(p)),
            })
    }

    /// The centre of the envelope.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x1 + (self.x2 - self.x1) / 2.0,
            self.y1 + (self.y2 - self.y1) / 2.0,
        )
    }

    /// The middle of the top edge, where labels and tooltips usually anchor.
    pub fn top_center(&self) -> (f64, f64) {
        (self.x1 + (self.x2 - self.x1) / 2.0, self.y1.max(self.y2))
    }
}

/// Converts a data-space x length into draw units.
pub fn scale_draw_x(plane: &Plane, value: f64) -> f64 {
    value * plane.x.inner_length() / plane.x.range()
}

/// Converts a data-space y length into draw units.
pub fn scale_draw_y(plane: &Plane, value: f64) -> f64 {
    value * plane.y.inner_length() / plane.y.range()
}

/// Maps a data-space x value to draw space.
pub fn to_draw_x(plane: &Plane, x: f64) -> f64 {
    scale_draw_x(plane, x - plane.x.min) + plane.x.margin_min
}

/// Maps a data-space y value to draw space.
pub fn to_draw_y(plane: &Plane, y: f64) -> f64 {
    scale_draw_y(plane, plane.y.max - y) + plane.y.margin_min
}

/// Converts a draw-space x length into data units.
pub fn scale_data_x(plane: &Plane, value: f64) -> f64 {
    value * plane.x.range() / plane.x.inner_length()
}

/// Converts a draw-space y length into data units.
pub fn scale_data_y(plane: &Plane, value: f64) -> f64 {
    value * plane.y.range() / plane.y.inner_length()
}

/// Maps a draw-space x value to data space.
pub fn to_data_x(plane: &Plane, x: f64) -> f64 {
    scale_data_x(plane, x - plane.x.margin_min) + plane.x.min
}

/// Maps a draw-space y value to data space.
pub fn to_data_y(plane: &Plane, y: f64) -> f64 {
    plane.y.max - scale_data_y(plane, y - plane.y.margin_min)
}

/// A draw-space translation placing a decoration at data point `(x, y)`, shifted by
/// `(offset_x, offset_y)` draw units.
pub fn place(plane: &Plane, x: f64, y: f64, offset_x: f64, offset_y: f64) -> Affine {
    Affine::translate((
        to_draw_x(plane, x) + offset_x,
        to_draw_y(plane, y) + offset_y,
    ))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn plane() -> Plane {
        Plane::new(
            300.0,
            200.0,
            Margin::new(10.0, 20.0, 30.0, 5.0),
            (-4.0, 16.0),
            (2.0, 7.5),
        )
    }

    #[test]
    fn draw_x_is_linear_over_the_inner_length() {
        let p = Plane {
            x: Axis::new(300.0, 0.0, 10.0),
            ..plane()
        };
        assert!((to_draw_x(&p, 5.0) - 150.0).abs() < 1e-9);
        assert!((to_draw_x(&p, 0.0)).abs() < 1e-9);
        assert!((to_draw_x(&p, 10.0) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn draw_y_is_inverted() {
        let p = plane();
        let top = to_draw_y(&p, p.y.max);
        let bottom = to_draw_y(&p, p.y.min);
        assert!((top - 10.0).abs() < 1e-9, "top {top}");
        assert!((bottom - 180.0).abs() < 1e-9, "bottom {bottom}");
    }

    #[test]
    fn scaling_round_trips() {
        let p = plane();
        for v in [-4.0, -1.25, 0.0, 3.3, 16.0, 120.0] {
            let back = to_data_x(&p, to_draw_x(&p, v));
            assert!((back - v).abs() < 1e-9, "x {v} -> {back}");
        }
        for v in [2.0, 4.4, 7.5, -10.0] {
            let back = to_data_y(&p, to_draw_y(&p, v));
            assert!((back - v).abs() < 1e-9, "y {v} -> {back}");
        }
    }

    #[test]
    fn degenerate_axes_do_not_divide_by_zero() {
        let p = Plane::new(
            20.0,
            20.0,
            Margin::uniform(15.0),
            (3.0, 3.0),
            (1.0, 1.0),
        );
        assert_eq!(p.x.range(), 1.0);
        assert_eq!(p.x.inner_length(), 1.0);
        assert!(to_draw_x(&p, 4.0).is_finite());
        assert!(to_data_y(&p, 7.0).is_finite());
    }

    #[test]
    fn place_translates_to_the_draw_point() {
        let p = plane();
        let t = place(&p, 6.0, 5.0, 2.0, -3.0).translation();
        let pt = p.draw_point(6.0, 5.0);
        assert!((t.x - (pt.x + 2.0)).abs() < 1e-9);
        assert!((t.y - (pt.y - 3.0)).abs() < 1e-9);
    }

    #[test]
    fn position_union_normalizes_edges() {
        let a = Position::new(3.0, 1.0, 0.0, 2.0);
        let b = Position::from_point(-1.0, 5.0);
        let u = a.union(&b);
        assert_eq!(u, Position::new(-1.0, 3.0, 0.0, 5.0));
        assert_eq!(Position::fold([&a, &b]), Some(u));
        assert_eq!(Position::fold(core::iter::empty()), None);
    }
}
