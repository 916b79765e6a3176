// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendered data points.
//!
//! An [`Item`] is one bar segment or one dot, carrying the datum it came from, its data-space
//! envelope, and the indices that say where it came from: which element, which top-level
//! declaration (stack), which flattened property, and which input row.

extern crate alloc;

use alloc::sync::Arc;

use kurbo::Rect;
use peniko::Color;

use crate::coords::{Plane, Position};
use crate::mark::StrokeStyle;
use crate::symbol::Symbol;

/// The default series colours, indexed by property index.
pub const PALETTE: [Color; 8] = [
    Color::from_rgb8(0x7b, 0x4d, 0xff),
    Color::from_rgb8(0xea, 0x60, 0xdf),
    Color::from_rgb8(0x12, 0xa5, 0xed),
    Color::from_rgb8(0x71, 0xc6, 0x14),
    Color::from_rgb8(0xff, 0x84, 0x00),
    Color::from_rgb8(0x22, 0xd2, 0xba),
    Color::from_rgb8(0xf5, 0x32, 0x5b),
    Color::from_rgb8(0xea, 0xbd, 0x39),
];

/// The default colour for the property at `property_index`.
pub fn default_color(property_index: usize) -> Color {
    PALETTE[property_index % PALETTE.len()]
}

/// Decoration of one bar.
#[derive(Clone, Debug, PartialEq)]
pub struct BarStyle {
    /// Fill colour.
    pub color: Color,
    /// Optional outline.
    pub border: Option<StrokeStyle>,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
    /// Corner radius of the top corners, as a fraction of the bar width.
    pub round_top: f64,
    /// Corner radius of the bottom corners, as a fraction of the bar width.
    pub round_bottom: f64,
    /// Opacity of the highlight halo; `0` disables it.
    pub highlight: f64,
    /// Width of the highlight halo in draw units.
    pub highlight_width: f64,
}

impl BarStyle {
    /// A plain bar in `color`.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            border: None,
            opacity: 1.0,
            round_top: 0.0,
            round_bottom: 0.0,
            highlight: 0.0,
            highlight_width: 5.0,
        }
    }

    /// Sets the fill colour.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the outline.
    pub fn with_border(mut self, border: StrokeStyle) -> Self {
        self.border = Some(border);
        self
    }

    /// Sets the fill opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Rounds the top and bottom corners by a fraction of the bar width.
    pub fn with_rounding(mut self, top: f64, bottom: f64) -> Self {
        self.round_top = top.clamp(0.0, 0.5);
        self.round_bottom = bottom.clamp(0.0, 0.5);
        self
    }

    /// Enables a highlight halo.
    pub fn with_highlight(mut self, opacity: f64, width: f64) -> Self {
        self.highlight = opacity.clamp(0.0, 1.0);
        self.highlight_width = width.max(0.0);
        self
    }
}

impl Default for BarStyle {
    fn default() -> Self {
        Self::new(PALETTE[0])
    }
}

/// Decoration of one dot.
#[derive(Clone, Debug, PartialEq)]
pub struct DotStyle {
    /// Fill colour.
    pub color: Color,
    /// Optional outline.
    pub border: Option<StrokeStyle>,
    /// Symbol area in square draw units.
    pub size: f64,
    /// Shape; `None` draws nothing (a line without dots).
    pub shape: Option<Symbol>,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
    /// Opacity of the highlight halo; `0` disables it.
    pub highlight: f64,
    /// Width of the highlight halo in draw units.
    pub highlight_width: f64,
}

impl DotStyle {
    /// A dot of `shape` in `color` with the default size.
    pub fn new(color: Color, shape: Option<Symbol>) -> Self {
        Self {
            color,
            border: None,
            size: 36.0,
            shape,
            opacity: 1.0,
            highlight: 0.0,
            highlight_width: 5.0,
        }
    }

    /// Sets the fill colour.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the outline.
    pub fn with_border(mut self, border: StrokeStyle) -> Self {
        self.border = Some(border);
        self
    }

    /// Sets the symbol area.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size.max(0.0);
        self
    }

    /// Sets the shape.
    pub fn with_shape(mut self, shape: Option<Symbol>) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the fill opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Enables a highlight halo.
    pub fn with_highlight(mut self, opacity: f64, width: f64) -> Self {
        self.highlight = opacity.clamp(0.0, 1.0);
        self.highlight_width = width.max(0.0);
        self
    }
}

impl Default for DotStyle {
    fn default() -> Self {
        Self::new(PALETTE[0], Some(Symbol::Circle))
    }
}

/// What an item draws as.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemKind {
    /// A bar segment.
    Bar(BarStyle),
    /// A dot on a scatter or line series.
    Dot(DotStyle),
}

impl ItemKind {
    /// The item's fill colour.
    pub fn color(&self) -> Color {
        match self {
            Self::Bar(s) => s.color,
            Self::Dot(s) => s.color,
        }
    }
}

/// One rendered data point.
#[derive(Debug)]
pub struct Item<D> {
    /// The row this item was produced from.
    pub datum: Arc<D>,
    /// Data-space envelope. Dots have zero width and height.
    pub position: Position,
    /// Index of the producing element in the chart's element list.
    pub element_index: usize,
    /// Index of the top-level declaration (a stack counts once) within its element.
    pub stack_index: usize,
    /// Global index of the property, flattened across stacks and elements.
    pub property_index: usize,
    /// Index of the row in the element's data.
    pub data_index: usize,
    /// The raw dependent value.
    pub value: f64,
    /// The running stack sum below this item; `0` when unstacked.
    pub stack_base: f64,
    /// The property's display name, if it has one.
    pub name: Option<Arc<str>>,
    /// Decoration resolved at production time.
    pub kind: ItemKind,
}

impl<D> Clone for Item<D> {
    fn clone(&self) -> Self {
        Self {
            datum: Arc::clone(&self.datum),
            position: self.position,
            element_index: self.element_index,
            stack_index: self.stack_index,
            property_index: self.property_index,
            data_index: self.data_index,
            value: self.value,
            stack_base: self.stack_base,
            name: self.name.clone(),
            kind: self.kind.clone(),
        }
    }
}

impl<D> Item<D> {
    /// Creates an item. The dependent value defaults to the envelope's height.
    pub fn new(
        datum: Arc<D>,
        property_index: usize,
        stack_index: usize,
        data_index: usize,
        position: Position,
        kind: ItemKind,
    ) -> Self {
        Self {
            datum,
            position,
            element_index: 0,
            stack_index,
            property_index,
            data_index,
            value: position.y2 - position.y1,
            stack_base: position.y1,
            name: None,
            kind,
        }
    }

    /// Sets the producing element's index.
    pub fn with_element_index(mut self, element_index: usize) -> Self {
        self.element_index = element_index;
        self
    }

    /// Sets the raw dependent value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Sets the running stack sum below the item.
    pub fn with_stack_base(mut self, stack_base: f64) -> Self {
        self.stack_base = stack_base;
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: Option<Arc<str>>) -> Self {
        self.name = name;
        self
    }

    /// Returns `true` for bar items.
    pub fn is_bar(&self) -> bool {
        matches!(self.kind, ItemKind::Bar(_))
    }

    /// Returns `true` for dot items.
    pub fn is_dot(&self) -> bool {
        matches!(self.kind, ItemKind::Dot(_))
    }

    /// The item's fill colour.
    pub fn color(&self) -> Color {
        self.kind.color()
    }
}

/// Things with a data-space extent that searches can run over.
pub trait Located {
    /// Data-space envelope.
    fn limits(&self) -> Position;

    /// Returns `true` if this carries a drawable value.
    ///
    /// Zero-height bars (a stack member whose value is `0`) are not real.
    fn is_real(&self) -> bool;

    /// Draw-space envelope.
    fn draw_limits(&self, plane: &Plane) -> Rect {
        plane.draw_rect(&self.limits())
    }
}

impl<D> Located for Item<D> {
    fn limits(&self) -> Position {
        self.position
    }

    fn is_real(&self) -> bool {
        match self.kind {
            ItemKind::Dot(_) => self.value.is_finite(),
            ItemKind::Bar(_) => self.value.is_finite() && self.value != 0.0,
        }
    }
}
