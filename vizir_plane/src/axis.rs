// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis decorations: axis lines, tick marks, tick labels, and grid lines.
//!
//! Every decoration runs along one [`Dimension`] and is pinned at a value of the other one, so
//! an x axis line is a horizontal rule at some y. Tick values come from the nice-number
//! generators in [`crate::intervals`] and [`crate::time`], or from the caller.
//!
//! Grid lines are drawn at the values that ticks and labels register in a [`TickValues`]
//! accumulator, skipping any value where an axis line is pinned.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use chrono::{FixedOffset, Offset, Utc};
use kurbo::{Point, Vec2};
use peniko::Brush;
use peniko::Color;

use crate::coords::{Axis, Plane};
use crate::format::{format_float, format_tick_with_step, format_time};
use crate::intervals::{float_step, floats, ints_f64};
use crate::mark::{Mark, PathMark, StrokeStyle, TextAnchor, TextBaseline, TextMark};
use crate::measure::TextMeasurer;
use crate::time::times;

/// Colour of axis lines and tick marks.
const RULE_COLOR: Color = Color::from_rgb8(0xd5, 0xd5, 0xd5);
/// Colour of tick labels.
const LABEL_COLOR: Color = Color::from_rgb8(0x80, 0x8b, 0xab);
/// Colour of grid lines.
const GRID_COLOR: Color = Color::from_rgb8(0xef, 0xf2, 0xfa);

/// Minimum gap kept between thinned labels, in draw units.
const LABEL_GAP: f64 = 4.0;

/// The axis a decoration runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Horizontal: values are x positions.
    X,
    /// Vertical: values are y positions.
    Y,
}

impl Dimension {
    fn along(self, plane: &Plane) -> &Axis {
        match self {
            Self::X => &plane.x,
            Self::Y => &plane.y,
        }
    }

    fn across(self, plane: &Plane) -> &Axis {
        match self {
            Self::X => &plane.y,
            Self::Y => &plane.x,
        }
    }

    /// The draw-space point at `value` along this dimension and `pin` across it.
    fn point(self, plane: &Plane, value: f64, pin: f64) -> Point {
        match self {
            Self::X => plane.draw_point(value, pin),
            Self::Y => plane.draw_point(pin, value),
        }
    }
}

/// Where a decoration sits on the cross axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Pinned {
    /// At zero, or the nearest visible value when zero is out of view.
    #[default]
    Zero,
    /// At the lowest visible value.
    Min,
    /// At the highest visible value.
    Max,
    /// Halfway.
    Middle,
    /// At an exact data value.
    At(f64),
}

impl Pinned {
    /// The data value this pin resolves to on `axis`.
    pub fn resolve(self, axis: &Axis) -> f64 {
        match self {
            Self::Zero => axis.clamp(0.0),
            Self::Min => axis.min,
            Self::Max => axis.max,
            Self::Middle => axis.middle(),
            Self::At(v) => v,
        }
    }
}

/// One generated tick: its value and default label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Data value.
    pub value: f64,
    /// Label text produced by the generator's formatter.
    pub label: String,
}

/// Where tick values come from.
pub enum Values {
    /// About this many nice floating point values.
    Floats(usize),
    /// About this many nice whole values.
    Ints(usize),
    /// About this many calendar-aligned times (milliseconds since the epoch) in a zone.
    Times(usize, FixedOffset),
    /// Exactly these values, where visible.
    Exactly(Vec<f64>),
    /// Values computed from the axis, where visible.
    Custom(Arc<dyn Fn(&Axis) -> Vec<f64>>),
}

impl Values {
    /// About `amount` calendar-aligned times in UTC.
    pub fn utc_times(amount: usize) -> Self {
        Self::Times(amount, Utc.fix())
    }

    /// Values computed by `f`.
    pub fn custom(f: impl Fn(&Axis) -> Vec<f64> + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// The ticks over the visible interval of `axis`, in ascending order.
    pub fn ticks(&self, axis: &Axis) -> Vec<Tick> {
        let plain = |value: f64| Tick {
            value,
            label: format_float(value),
        };
        let ticks: Vec<Tick> = match self {
            Self::Floats(amount) => {
                let step = float_step(*amount, axis.min, axis.max);
                floats(*amount, axis.min, axis.max)
                    .into_iter()
                    .map(|value| Tick {
                        value,
                        label: format_tick_with_step(value, step),
                    })
                    .collect()
            }
            Self::Ints(amount) => ints_f64(*amount, axis.min, axis.max)
                .into_iter()
                .map(plain)
                .collect(),
            Self::Times(amount, zone) => times(zone, *amount, axis.min, axis.max)
                .iter()
                .map(|tick| Tick {
                    value: tick.timestamp,
                    label: format_time(tick, zone),
                })
                .collect(),
            Self::Exactly(values) => visible(axis, values.iter().copied())
                .map(plain)
                .collect(),
            Self::Custom(f) => visible(axis, f(axis).into_iter()).map(plain).collect(),
        };
        tracing::trace!(count = ticks.len(), min = axis.min, max = axis.max, "ticks");
        ticks
    }
}

fn visible(axis: &Axis, values: impl Iterator<Item = f64>) -> impl Iterator<Item = f64> {
    values.filter(move |v| v.is_finite() && axis.contains(*v))
}

impl Default for Values {
    fn default() -> Self {
        Self::Floats(5)
    }
}

impl Clone for Values {
    fn clone(&self) -> Self {
        match self {
            Self::Floats(n) => Self::Floats(*n),
            Self::Ints(n) => Self::Ints(*n),
            Self::Times(n, zone) => Self::Times(*n, *zone),
            Self::Exactly(v) => Self::Exactly(v.clone()),
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl fmt::Debug for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Floats(n) => f.debug_tuple("Floats").field(n).finish(),
            Self::Ints(n) => f.debug_tuple("Ints").field(n).finish(),
            Self::Times(n, zone) => f.debug_tuple("Times").field(n).field(zone).finish(),
            Self::Exactly(v) => f.debug_tuple("Exactly").field(v).finish(),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

/// Positions collected from every element before anything is drawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickValues {
    /// x values where a vertical axis line is pinned.
    pub x_axis: Vec<f64>,
    /// y values where a horizontal axis line is pinned.
    pub y_axis: Vec<f64>,
    /// x values of vertical grid lines.
    pub xs: Vec<f64>,
    /// y values of horizontal grid lines.
    pub ys: Vec<f64>,
}

impl TickValues {
    fn pin(&mut self, dimension: Dimension, value: f64) {
        match dimension {
            Dimension::X => self.y_axis.push(value),
            Dimension::Y => self.x_axis.push(value),
        }
    }

    fn grid(&mut self, dimension: Dimension, ticks: &[Tick]) {
        let target = match dimension {
            Dimension::X => &mut self.xs,
            Dimension::Y => &mut self.ys,
        };
        for tick in ticks {
            push_if_missing(target, tick.value);
        }
    }
}

fn push_if_missing(values: &mut Vec<f64>, v: f64) {
    if v.is_finite() && !values.contains(&v) {
        values.push(v);
    }
}

/// An axis line spanning the visible interval.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLineSpec {
    /// The axis the line runs along.
    pub dimension: Dimension,
    /// Where the line sits on the other axis.
    pub pinned: Pinned,
    /// Line stroke.
    pub stroke: StrokeStyle,
}

impl AxisLineSpec {
    /// A line along `dimension`, pinned at zero.
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            pinned: Pinned::Zero,
            stroke: StrokeStyle::solid(RULE_COLOR, 1.0),
        }
    }

    /// A horizontal axis line.
    pub fn x() -> Self {
        Self::new(Dimension::X)
    }

    /// A vertical axis line.
    pub fn y() -> Self {
        Self::new(Dimension::Y)
    }

    /// Moves the line.
    pub fn with_pinned(mut self, pinned: Pinned) -> Self {
        self.pinned = pinned;
        self
    }

    /// Sets the stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Registers where this line is pinned.
    pub fn collect(&self, plane: &Plane, acc: &mut TickValues) {
        let pin = self.pinned.resolve(self.dimension.across(plane));
        acc.pin(self.dimension, pin);
    }

    /// The line.
    pub fn marks(&self, plane: &Plane) -> Vec<Mark> {
        let axis = self.dimension.along(plane);
        let pin = self.pinned.resolve(self.dimension.across(plane));
        let from = self.dimension.point(plane, axis.min, pin);
        let to = self.dimension.point(plane, axis.max, pin);
        alloc::vec![PathMark::rule(from, to, self.stroke.clone()).into()]
    }
}

/// Short tick marks at generated values.
#[derive(Clone, Debug)]
pub struct TicksSpec {
    /// The axis the ticks are spread along.
    pub dimension: Dimension,
    /// Tick values.
    pub values: Values,
    /// Where the ticks start on the other axis.
    pub pinned: Pinned,
    /// Tick length in draw units, pointing away from the drawing area.
    pub length: f64,
    /// Tick stroke.
    pub stroke: StrokeStyle,
    /// Also draw grid lines at these values.
    pub grid: bool,
}

impl TicksSpec {
    /// About five ticks along `dimension`, pinned at zero.
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            values: Values::default(),
            pinned: Pinned::Zero,
            length: 5.0,
            stroke: StrokeStyle::solid(RULE_COLOR, 1.0),
            grid: false,
        }
    }

    /// Ticks along the x axis.
    pub fn x() -> Self {
        Self::new(Dimension::X)
    }

    /// Ticks along the y axis.
    pub fn y() -> Self {
        Self::new(Dimension::Y)
    }

    /// Sets where values come from.
    pub fn with_values(mut self, values: Values) -> Self {
        self.values = values;
        self
    }

    /// Moves the ticks.
    pub fn with_pinned(mut self, pinned: Pinned) -> Self {
        self.pinned = pinned;
        self
    }

    /// Sets the tick length.
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Sets the stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Draws grid lines at the tick values.
    pub fn with_grid(mut self) -> Self {
        self.grid = true;
        self
    }

    /// Registers grid values, if enabled.
    pub fn collect(&self, plane: &Plane, acc: &mut TickValues) {
        if self.grid {
            acc.grid(self.dimension, &self.values.ticks(self.dimension.along(plane)));
        }
    }

    /// One rule per tick.
    pub fn marks(&self, plane: &Plane) -> Vec<Mark> {
        let pin = self.pinned.resolve(self.dimension.across(plane));
        let outward = match self.dimension {
            Dimension::X => Vec2::new(0.0, self.length),
            Dimension::Y => Vec2::new(-self.length, 0.0),
        };
        self.values
            .ticks(self.dimension.along(plane))
            .iter()
            .map(|tick| {
                let from = self.dimension.point(plane, tick.value, pin);
                PathMark::rule(from, from + outward, self.stroke.clone()).into()
            })
            .collect()
    }
}

/// Tick labels.
#[derive(Clone)]
pub struct LabelsSpec {
    /// The axis the labels are spread along.
    pub dimension: Dimension,
    /// Label values.
    pub values: Values,
    /// Where the labels sit on the other axis.
    pub pinned: Pinned,
    /// Offset from the pinned position, in draw units.
    pub offset: Vec2,
    /// Font size.
    pub font_size: f64,
    /// Text paint.
    pub fill: Brush,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Rotation in degrees.
    pub angle: f64,
    /// Replaces the generator's label text.
    pub format: Option<Arc<dyn Fn(f64) -> String>>,
    /// Also draw grid lines at these values.
    pub grid: bool,
    /// Drops labels that would overlap the previous one, using this measurer.
    pub thinning: Option<Arc<dyn TextMeasurer>>,
}

impl fmt::Debug for LabelsSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelsSpec")
            .field("dimension", &self.dimension)
            .field("values", &self.values)
            .field("pinned", &self.pinned)
            .field("offset", &self.offset)
            .field("font_size", &self.font_size)
            .field("fill", &self.fill)
            .field("anchor", &self.anchor)
            .field("baseline", &self.baseline)
            .field("angle", &self.angle)
            .field("format", &self.format.is_some())
            .field("grid", &self.grid)
            .field("thinning", &self.thinning.is_some())
            .finish()
    }
}

impl LabelsSpec {
    /// About five labels along `dimension`, pinned at zero.
    ///
    /// x labels hang centred below the pin; y labels end left of it.
    pub fn new(dimension: Dimension) -> Self {
        let (offset, anchor, baseline) = match dimension {
            Dimension::X => (
                Vec2::new(0.0, 8.0),
                TextAnchor::Middle,
                TextBaseline::Hanging,
            ),
            Dimension::Y => (Vec2::new(-8.0, 0.0), TextAnchor::End, TextBaseline::Middle),
        };
        Self {
            dimension,
            values: Values::default(),
            pinned: Pinned::Zero,
            offset,
            font_size: 11.0,
            fill: LABEL_COLOR.into(),
            anchor,
            baseline,
            angle: 0.0,
            format: None,
            grid: false,
            thinning: None,
        }
    }

    /// Labels along the x axis.
    pub fn x() -> Self {
        Self::new(Dimension::X)
    }

    /// Labels along the y axis.
    pub fn y() -> Self {
        Self::new(Dimension::Y)
    }

    /// Sets where values come from.
    pub fn with_values(mut self, values: Values) -> Self {
        self.values = values;
        self
    }

    /// Moves the labels.
    pub fn with_pinned(mut self, pinned: Pinned) -> Self {
        self.pinned = pinned;
        self
    }

    /// Sets the offset from the pinned position.
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the text paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the text anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Rotates the labels.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Formats values with `format` instead of the generator's formatter.
    pub fn with_format(mut self, format: impl Fn(f64) -> String + 'static) -> Self {
        self.format = Some(Arc::new(format));
        self
    }

    /// Draws grid lines at the label values.
    pub fn with_grid(mut self) -> Self {
        self.grid = true;
        self
    }

    /// Drops labels that would overlap their predecessor.
    pub fn with_thinning(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.thinning = Some(Arc::new(measurer));
        self
    }

    /// Registers grid values, if enabled.
    pub fn collect(&self, plane: &Plane, acc: &mut TickValues) {
        if self.grid {
            acc.grid(self.dimension, &self.values.ticks(self.dimension.along(plane)));
        }
    }

    /// One text mark per label.
    pub fn marks(&self, plane: &Plane) -> Vec<Mark> {
        let pin = self.pinned.resolve(self.dimension.across(plane));
        let mut kept: Vec<TextMark> = Vec::new();
        let mut last_edge = f64::NEG_INFINITY;
        for tick in self.values.ticks(self.dimension.along(plane)) {
            let text = match &self.format {
                Some(format) => format(tick.value),
                None => tick.label,
            };
            let pos = self.dimension.point(plane, tick.value, pin) + self.offset;
            if let Some(measurer) = &self.thinning {
                let (w, h) = measurer.measure(&text, self.font_size);
                let (start, end) = self.extent(pos, w, h);
                if start < last_edge + LABEL_GAP {
                    continue;
                }
                last_edge = end;
            }
            kept.push(
                TextMark::new(pos, text)
                    .with_font_size(self.font_size)
                    .with_fill(self.fill.clone())
                    .with_anchor(self.anchor)
                    .with_baseline(self.baseline)
                    .with_angle(self.angle),
            );
        }
        kept.into_iter().map(Mark::Text).collect()
    }

    /// The label's extent along the direction labels are laid out in, ascending.
    fn extent(&self, pos: Point, w: f64, h: f64) -> (f64, f64) {
        match self.dimension {
            Dimension::X => {
                let start = match self.anchor {
                    TextAnchor::Start => pos.x,
                    TextAnchor::Middle => pos.x - 0.5 * w,
                    TextAnchor::End => pos.x - w,
                };
                (start, start + w)
            }
            // Draw-space y grows downward while values grow upward, so order by -y.
            Dimension::Y => (-pos.y - 0.5 * h, -pos.y + 0.5 * h),
        }
    }
}

/// Grid lines at the values registered by ticks and labels.
///
/// A dimension with no registered values falls back to about five nice values.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSpec {
    /// Line stroke.
    pub stroke: StrokeStyle,
    /// Draw vertical lines (at x values).
    pub x: bool,
    /// Draw horizontal lines (at y values).
    pub y: bool,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle::solid(GRID_COLOR, 1.0),
            x: true,
            y: true,
        }
    }
}

impl GridSpec {
    /// Sets the stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Only vertical lines.
    pub fn only_x(mut self) -> Self {
        self.x = true;
        self.y = false;
        self
    }

    /// Only horizontal lines.
    pub fn only_y(mut self) -> Self {
        self.x = false;
        self.y = true;
        self
    }

    /// The grid lines, skipping values where an axis line is pinned.
    pub fn marks(&self, plane: &Plane, acc: &TickValues) -> Vec<Mark> {
        let mut out = Vec::new();
        if self.x {
            self.lines(plane, Dimension::X, &acc.xs, &acc.x_axis, &mut out);
        }
        if self.y {
            self.lines(plane, Dimension::Y, &acc.ys, &acc.y_axis, &mut out);
        }
        out
    }

    /// Lines across `dimension` at `values`, except those in `pinned`.
    fn lines(
        &self,
        plane: &Plane,
        dimension: Dimension,
        values: &[f64],
        pinned: &[f64],
        out: &mut Vec<Mark>,
    ) {
        let along = dimension.along(plane);
        let across = dimension.across(plane);
        let fallback;
        let values: &[f64] = if values.is_empty() {
            fallback = floats(5, along.min, along.max);
            &fallback
        } else {
            values
        };
        for &v in values {
            if pinned.contains(&v) || !along.contains(v) {
                continue;
            }
            // Grid lines run across the drawing area, perpendicular to their dimension.
            let from = dimension.point(plane, v, across.min);
            let to = dimension.point(plane, v, across.max);
            out.push(PathMark::rule(from, to, self.stroke.clone()).into());
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;
    use crate::coords::Margin;
    use crate::measure::HeuristicTextMeasurer;

    fn plane() -> Plane {
        Plane::new(110.0, 110.0, Margin::uniform(5.0), (0.0, 10.0), (-5.0, 5.0))
    }

    fn rule_ends(mark: &Mark) -> (Point, Point) {
        let Mark::Path(p) = mark else {
            panic!("expected a path, got {mark:?}");
        };
        let pts: Vec<Point> = p
            .path
            .elements()
            .iter()
            .filter_map(|el| match el {
                kurbo::PathEl::MoveTo(p) | kurbo::PathEl::LineTo(p) => Some(*p),
                _ => None,
            })
            .collect();
        (pts[0], pts[1])
    }

    #[test]
    fn zero_pin_is_clamped_into_view() {
        let axis = Axis::new(100.0, 2.0, 8.0);
        assert_eq!(Pinned::Zero.resolve(&axis), 2.0);
        assert_eq!(Pinned::Zero.resolve(&Axis::new(100.0, -2.0, 8.0)), 0.0);
        assert_eq!(Pinned::Middle.resolve(&axis), 5.0);
        assert_eq!(Pinned::At(42.0).resolve(&axis), 42.0);
    }

    #[test]
    fn x_axis_line_spans_the_drawing_area_at_zero() {
        let plane = plane();
        let marks = AxisLineSpec::x().marks(&plane);
        let (from, to) = rule_ends(&marks[0]);
        assert_eq!(from, Point::new(5.0, 55.0));
        assert_eq!(to, Point::new(105.0, 55.0));
    }

    #[test]
    fn axis_lines_register_their_pins() {
        let plane = plane();
        let mut acc = TickValues::default();
        AxisLineSpec::x().collect(&plane, &mut acc);
        AxisLineSpec::y().with_pinned(Pinned::Max).collect(&plane, &mut acc);
        assert_eq!(acc.y_axis, vec![0.0]);
        assert_eq!(acc.x_axis, vec![10.0]);
    }

    #[test]
    fn y_ticks_point_left() {
        let plane = plane();
        let marks = TicksSpec::y()
            .with_values(Values::Exactly(vec![0.0, 99.0]))
            .with_pinned(Pinned::Min)
            .marks(&plane);
        assert_eq!(marks.len(), 1, "out of view values are dropped");
        let (from, to) = rule_ends(&marks[0]);
        assert_eq!(from, Point::new(5.0, 55.0));
        assert_eq!(to, Point::new(0.0, 55.0));
    }

    #[test]
    fn float_labels_share_decimals() {
        let axis = Axis::new(100.0, 0.0, 1.0);
        let labels: Vec<String> = Values::Floats(2)
            .ticks(&axis)
            .into_iter()
            .map(|t| t.label)
            .collect();
        assert_eq!(labels, ["0.0", "0.5", "1.0"].map(|s| s.to_string()));
    }

    #[test]
    fn custom_formatting_replaces_labels() {
        let plane = plane();
        let marks = LabelsSpec::x()
            .with_values(Values::Ints(2))
            .with_format(|v| alloc::format!("{v}%"))
            .marks(&plane);
        let texts: Vec<&str> = marks
            .iter()
            .filter_map(|m| match m {
                Mark::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["0%", "5%", "10%"]);
    }

    #[test]
    fn thinning_drops_crowded_labels() {
        let plane = Plane::new(60.0, 60.0, Margin::default(), (0.0, 10.0), (0.0, 10.0));
        let spec = LabelsSpec::x().with_values(Values::Ints(10));
        let all = spec.marks(&plane).len();
        let thinned = spec.with_thinning(HeuristicTextMeasurer).marks(&plane).len();
        assert_eq!(all, 11);
        assert!(thinned < all, "expected fewer than {all} labels, got {thinned}");
        assert!(thinned > 1, "the first label always stays");
    }

    #[test]
    fn grid_skips_pinned_axis_values() {
        let plane = plane();
        let mut acc = TickValues::default();
        AxisLineSpec::x().collect(&plane, &mut acc);
        LabelsSpec::y()
            .with_values(Values::Exactly(vec![-5.0, 0.0, 5.0]))
            .with_grid()
            .collect(&plane, &mut acc);
        assert_eq!(acc.ys, vec![-5.0, 0.0, 5.0]);
        let marks = GridSpec::default().only_y().marks(&plane, &acc);
        assert_eq!(marks.len(), 2);
        let ys: Vec<f64> = marks.iter().map(|m| rule_ends(m).0.y).collect();
        assert_eq!(ys, [105.0, 5.0]);
    }

    #[test]
    fn grid_falls_back_to_nice_values() {
        let plane = plane();
        let marks = GridSpec::default().only_x().marks(&plane, &TickValues::default());
        // 0, 2, 4, 6, 8, 10
        assert_eq!(marks.len(), 6);
    }
}
