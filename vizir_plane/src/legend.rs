// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legends.
//!
//! A legend is a row (or column) of swatches with labels, one per named property, built from
//! the [`LegendEntry`] metadata the producers return. It is markup, not part of the surface.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Rect, Vec2};
use peniko::Color;

use crate::axis::Pinned;
use crate::coords::Plane;
use crate::mark::{Mark, PathMark, RectMark};
use crate::markup::{Markup, Node};
use crate::produce::{LegendEntry, LegendKind};

/// Legend layout.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendsSpec {
    /// Data-space position of the legend's top-left corner; `None` leaves it in the flow
    /// around the surface.
    pub at: Option<(Pinned, Pinned)>,
    /// Draw-space offset from `at`.
    pub offset: Vec2,
    /// Stack entries vertically instead of in a row.
    pub column: bool,
    /// Gap between entries.
    pub spacing: f64,
    /// Label font size.
    pub font_size: f64,
    /// Swatch width.
    pub width: f64,
    /// Swatch height.
    pub height: f64,
    /// Label colour.
    pub color: Color,
}

impl Default for LegendsSpec {
    fn default() -> Self {
        Self {
            at: None,
            offset: Vec2::ZERO,
            column: false,
            spacing: 10.0,
            font_size: 12.0,
            width: 10.0,
            height: 10.0,
            color: Color::from_rgb8(0x80, 0x8b, 0xab),
        }
    }
}

impl LegendsSpec {
    /// Places the legend over the surface at a data-space position.
    pub fn at(mut self, x: Pinned, y: Pinned) -> Self {
        self.at = Some((x, y));
        self
    }

    /// Shifts a placed legend.
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Lays entries out top to bottom.
    pub fn column(mut self) -> Self {
        self.column = true;
        self
    }

    /// Sets the gap between entries.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the swatch size.
    pub fn with_swatch(mut self, width: f64, height: f64) -> Self {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self
    }

    /// Legend markup for the named entries, in property order.
    pub fn markup(&self, plane: &Plane, entries: &[LegendEntry]) -> Markup {
        let direction = if self.column { "column" } else { "row" };
        let mut node = Node::new("div")
            .with_attr("class", "vizir-legends")
            .with_style("display", "flex")
            .with_style("flex-direction", direction)
            .with_style("gap", px(self.spacing))
            .with_style("font-size", px(self.font_size))
            .with_style("color", crate::markup::css_color(self.color));
        if let Some((x, y)) = self.at {
            let origin = plane.draw_point(x.resolve(&plane.x), y.resolve(&plane.y)) + self.offset;
            node = node.at(plane, origin.x, origin.y);
        }
        // A stack named as a whole repeats its name on every part; show it once.
        let mut previous: Option<&str> = None;
        let named = entries.iter().filter_map(|entry| {
            let name = entry.name.as_deref()?;
            if previous.replace(name) == Some(name) {
                return None;
            }
            Some(self.entry(name, entry))
        });
        node.with_children(named).into()
    }

    fn entry(&self, name: &str, entry: &LegendEntry) -> Markup {
        let (width, marks) = match &entry.kind {
            LegendKind::Bar(style) => {
                let rect = Rect::new(0.0, 0.0, self.width, self.height);
                let mut mark = RectMark::new(rect)
                    .with_fill(entry.color)
                    .with_opacity(style.opacity)
                    .with_rounding(style.round_top * self.width, style.round_bottom * self.width);
                if let Some(border) = &style.border {
                    mark = mark.with_stroke(border.clone());
                }
                (self.width, alloc::vec![Mark::Rect(mark)])
            }
            LegendKind::Line { line, dot } => {
                // Lines get a wider sample so the stroke reads as a line.
                let width = if line.is_some() {
                    2.0 * self.width
                } else {
                    self.width
                };
                let mid = 0.5 * self.height;
                let mut marks = Vec::new();
                if let Some(line) = line {
                    if line.area > 0.0 {
                        let area = Rect::new(0.0, mid, width, self.height);
                        marks.push(
                            RectMark::new(area)
                                .with_fill(line.color.unwrap_or(entry.color))
                                .with_opacity(line.area)
                                .into(),
                        );
                    }
                    marks.push(
                        PathMark::rule((0.0, mid), (width, mid), line.stroke(entry.color)).into(),
                    );
                }
                if let Some(shape) = dot.shape {
                    let mut mark = PathMark::new(shape.path(0.5 * width, mid, dot.size))
                        .with_fill(entry.color)
                        .with_opacity(dot.opacity);
                    if let Some(border) = &dot.border {
                        mark = mark.with_stroke(border.clone());
                    }
                    marks.push(mark.into());
                }
                (width, marks)
            }
        };
        Node::new("div")
            .with_style("display", "flex")
            .with_style("align-items", "center")
            .with_style("gap", "5px")
            .with_child(Markup::graphic(width, self.height, marks))
            .with_child(Node::new("span").with_child(Markup::text(name)))
            .into()
    }
}

fn px(v: f64) -> String {
    alloc::format!("{v}px")
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::sync::Arc;

    use super::*;
    use crate::coords::Margin;
    use crate::item::{BarStyle, DotStyle};
    use crate::property::LineStyle;

    fn plane() -> Plane {
        Plane::new(100.0, 100.0, Margin::default(), (0.0, 10.0), (0.0, 10.0))
    }

    fn entry(index: usize, name: Option<&str>, kind: LegendKind) -> LegendEntry {
        LegendEntry {
            property_index: index,
            name: name.map(Arc::from),
            color: crate::item::default_color(index),
            kind,
        }
    }

    fn children(markup: &Markup) -> &[Markup] {
        match markup {
            Markup::Node(node) => &node.children,
            _ => &[],
        }
    }

    #[test]
    fn unnamed_properties_are_left_out() {
        let entries = [
            entry(0, Some("Sales"), LegendKind::Bar(BarStyle::default())),
            entry(1, None, LegendKind::Bar(BarStyle::default())),
            entry(
                2,
                Some("Trend"),
                LegendKind::Line {
                    line: Some(LineStyle::default()),
                    dot: DotStyle::default(),
                },
            ),
        ];
        let markup = LegendsSpec::default().markup(&plane(), &entries);
        assert_eq!(children(&markup).len(), 2);
        assert_eq!(markup.text_content(), "SalesTrend");
    }

    #[test]
    fn a_named_stack_is_listed_once() {
        let bar = || LegendKind::Bar(BarStyle::default());
        let entries = [
            entry(0, Some("sales"), bar()),
            entry(1, Some("sales"), bar()),
            entry(2, Some("returns"), bar()),
        ];
        let markup = LegendsSpec::default().markup(&plane(), &entries);
        assert_eq!(children(&markup).len(), 2);
        assert_eq!(markup.text_content(), "salesreturns");
    }

    #[test]
    fn line_samples_are_wider() {
        let entries = [entry(
            0,
            Some("a"),
            LegendKind::Line {
                line: Some(LineStyle::default().with_area(0.2)),
                dot: DotStyle::default().with_shape(None),
            },
        )];
        let markup = LegendsSpec::default().markup(&plane(), &entries);
        let Markup::Graphic { width, marks, .. } = &children(&children(&markup)[0])[0] else {
            panic!("expected a swatch graphic");
        };
        assert_eq!(*width, 20.0);
        // Area and line, no dot.
        assert_eq!(marks.len(), 2);
    }

    #[test]
    fn placed_legends_are_absolute() {
        let markup = LegendsSpec::default()
            .at(Pinned::Max, Pinned::Max)
            .with_offset(-30.0, 0.0)
            .markup(&plane(), &[]);
        let Markup::Node(node) = markup else {
            panic!("expected a node");
        };
        assert_eq!(node.style_value("left"), Some("70.000%"));
        assert_eq!(node.style_value("top"), Some("0.000%"));
    }
}
