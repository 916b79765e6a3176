// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltips: a markup box placed next to one or more items.
//!
//! The box is measured with a [`TextMeasurer`] so that, when no direction is given, a tooltip
//! that would leave the surface flips to the opposite side.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Size};

use crate::coords::{Plane, Position, place};
use crate::format::format_float;
use crate::group::Group;
use crate::item::{Item, Located};
use crate::markup::{Markup, Node, css_color};
use crate::measure::{HeuristicTextMeasurer, TextMeasurer};

const PADDING: f64 = 8.0;
const SWATCH: f64 = 12.0;
const LINE_HEIGHT: f64 = 1.4;

/// Which side of its target a tooltip sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Above.
    Top,
    /// Below.
    Bottom,
    /// To the left.
    Left,
    /// To the right.
    Right,
}

impl Direction {
    fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Where a tooltip box ends up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// The side actually used.
    pub direction: Direction,
    /// Top-left corner in draw space.
    pub origin: Point,
    /// Box size in draw units.
    pub size: Size,
}

/// A tooltip over some items.
pub struct TooltipSpec<D> {
    /// The items described.
    pub items: Vec<Item<D>>,
    /// Fixed side; `None` prefers the top and flips when the box does not fit.
    pub direction: Option<Direction>,
    /// Gap between the target and the box.
    pub offset: f64,
    /// Font size.
    pub font_size: f64,
    /// One line per item.
    pub format: Arc<dyn Fn(&Item<D>) -> String>,
    /// Used to size the box.
    pub measurer: Arc<dyn TextMeasurer>,
}

impl<D> TooltipSpec<D> {
    /// A tooltip listing `items` as `name: value`.
    pub fn new(items: impl IntoIterator<Item = Item<D>>) -> Self
    where
        D: 'static,
    {
        Self {
            items: items.into_iter().collect(),
            direction: None,
            offset: 8.0,
            font_size: 12.0,
            format: Arc::new(default_line),
            measurer: Arc::new(HeuristicTextMeasurer),
        }
    }

    /// A tooltip for every item of `group`.
    pub fn for_group(group: &Group<D>) -> Self
    where
        D: 'static,
    {
        Self::new(group.items.iter().cloned())
    }

    /// Fixes the side.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Sets the gap to the target.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Formats each item's line.
    pub fn with_format(mut self, format: impl Fn(&Item<D>) -> String + 'static) -> Self {
        self.format = Arc::new(format);
        self
    }

    /// Measures text with `measurer`.
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Arc::new(measurer);
        self
    }

    fn lines(&self) -> Vec<String> {
        self.items.iter().map(|item| (self.format)(item)).collect()
    }

    fn size(&self, lines: &[String]) -> Size {
        let widest = lines
            .iter()
            .map(|line| self.measurer.measure(line, self.font_size).0)
            .fold(0.0_f64, f64::max);
        Size::new(
            widest + SWATCH + 2.0 * PADDING,
            lines.len() as f64 * self.font_size * LINE_HEIGHT + 2.0 * PADDING,
        )
    }

    /// Where the box goes, or `None` without items.
    pub fn placement(&self, plane: &Plane) -> Option<Placement> {
        let limits: Vec<Position> = self.items.iter().map(Located::limits).collect();
        let target = Position::fold(&limits)?;
        let size = self.size(&self.lines());
        let origin_for = |direction| origin(plane, &target, direction, size, self.offset);
        let direction = match self.direction {
            Some(direction) => direction,
            None => {
                let preferred = Direction::Top;
                if fits(plane, origin_for(preferred), size) {
                    preferred
                } else {
                    preferred.opposite()
                }
            }
        };
        Some(Placement {
            direction,
            origin: origin_for(direction),
            size,
        })
    }

    /// The tooltip markup, or `None` without items.
    pub fn markup(&self, plane: &Plane) -> Option<Markup> {
        let placement = self.placement(plane)?;
        let rows = self.items.iter().zip(self.lines()).map(|(item, line)| {
            Node::new("div")
                .with_child(
                    Node::new("span")
                        .with_style("display", "inline-block")
                        .with_style("width", "8px")
                        .with_style("height", "8px")
                        .with_style("margin-right", "4px")
                        .with_style("background", css_color(item.color())),
                )
                .with_child(Markup::text(line))
                .into()
        });
        Some(
            Node::new("div")
                .with_attr("class", "vizir-tooltip")
                .at(plane, placement.origin.x, placement.origin.y)
                .with_style("pointer-events", "none")
                .with_style("background", "white")
                .with_style("border", "1px solid #d8d8d8")
                .with_style("border-radius", "3px")
                .with_style("padding", alloc::format!("{PADDING}px"))
                .with_style("font-size", alloc::format!("{}px", self.font_size))
                .with_style("white-space", "nowrap")
                .with_children(rows)
                .into(),
        )
    }
}

fn default_line<D>(item: &Item<D>) -> String {
    let value = format_float(item.value);
    match &item.name {
        Some(name) => alloc::format!("{name}: {value}"),
        None => value,
    }
}

fn origin(plane: &Plane, target: &Position, direction: Direction, size: Size, gap: f64) -> Point {
    let (cx, cy) = target.center();
    let top = target.y1.max(target.y2);
    let bottom = target.y1.min(target.y2);
    let left = target.x1.min(target.x2);
    let right = target.x1.max(target.x2);
    let (w, h) = (size.width, size.height);
    let t = match direction {
        Direction::Top => place(plane, cx, top, -0.5 * w, -(h + gap)),
        Direction::Bottom => place(plane, cx, bottom, -0.5 * w, gap),
        Direction::Left => place(plane, left, cy, -(w + gap), -0.5 * h),
        Direction::Right => place(plane, right, cy, gap, -0.5 * h),
    };
    t.translation().to_point()
}

fn fits(plane: &Plane, origin: Point, size: Size) -> bool {
    origin.x >= 0.0
        && origin.y >= 0.0
        && origin.x + size.width <= plane.width
        && origin.y + size.height <= plane.height
}

impl<D> Clone for TooltipSpec<D> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            direction: self.direction,
            offset: self.offset,
            font_size: self.font_size,
            format: Arc::clone(&self.format),
            measurer: Arc::clone(&self.measurer),
        }
    }
}

impl<D: fmt::Debug> fmt::Debug for TooltipSpec<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TooltipSpec")
            .field("items", &self.items)
            .field("direction", &self.direction)
            .field("offset", &self.offset)
            .field("font_size", &self.font_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::coords::Margin;
    use crate::item::{BarStyle, ItemKind};

    fn plane() -> Plane {
        Plane::new(200.0, 200.0, Margin::default(), (0.0, 10.0), (0.0, 10.0))
    }

    fn bar(top: f64) -> Item<()> {
        Item::new(
            Arc::new(()),
            0,
            0,
            0,
            Position::new(4.0, 6.0, 0.0, top),
            ItemKind::Bar(BarStyle::default()),
        )
        .with_name(Some(Arc::from("Sales")))
    }

    #[test]
    fn sits_above_the_target_by_default() {
        let spec = TooltipSpec::new([bar(5.0)]);
        let p = spec.placement(&plane()).unwrap();
        assert_eq!(p.direction, Direction::Top);
        // Centred over x = 5 (draw 100), ending `offset` above y = 5 (draw 100).
        assert!((p.origin.x + 0.5 * p.size.width - 100.0).abs() < 1e-9, "{p:?}");
        assert!((p.origin.y + p.size.height + 8.0 - 100.0).abs() < 1e-9, "{p:?}");
    }

    #[test]
    fn flips_below_near_the_top_edge() {
        let spec = TooltipSpec::new([bar(9.8)]);
        assert_eq!(spec.placement(&plane()).unwrap().direction, Direction::Bottom);
        let fixed = TooltipSpec::new([bar(9.8)]).with_direction(Direction::Top);
        assert_eq!(fixed.placement(&plane()).unwrap().direction, Direction::Top);
    }

    #[test]
    fn lines_name_their_values() {
        let spec = TooltipSpec::new([bar(5.0)]);
        let markup = spec.markup(&plane()).unwrap();
        assert_eq!(markup.text_content(), "Sales: 5");
        assert!(TooltipSpec::<()>::new([]).markup(&plane()).is_none());
    }
}
