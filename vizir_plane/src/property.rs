// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property declarations: which value of a row becomes a bar or a dot, and how it looks.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use peniko::Color;

use crate::interpolation::Method;
use crate::item::{BarStyle, DotStyle, ItemKind};
use crate::mark::StrokeStyle;
use crate::symbol::Symbol;

/// Per-row context handed to a variation callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Variation {
    /// Index of the producing element.
    pub element_index: usize,
    /// Index of the top-level declaration within the element.
    pub stack_index: usize,
    /// Global flattened property index.
    pub property_index: usize,
    /// Row index in the element's data.
    pub data_index: usize,
    /// The row's dependent value.
    pub value: f64,
}

/// Per-datum restyling: receives the resolved decoration and returns the one to use.
pub type VariationFn<D> = Arc<dyn Fn(&Variation, &D, ItemKind) -> ItemKind>;

/// Stroke and fill of an interpolated series.
#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    /// Line colour; `None` uses the property's colour.
    pub color: Option<Color>,
    /// Line width in draw units.
    pub width: f64,
    /// Dash pattern; empty for solid.
    pub dash: smallvec::SmallVec<[f64; 4]>,
    /// Opacity of the area below the line; `0` draws no area.
    pub area: f64,
    /// How points are connected.
    pub method: Method,
}

impl LineStyle {
    /// A solid line connected by `method`.
    pub fn new(method: Method) -> Self {
        Self {
            color: None,
            width: 1.0,
            dash: smallvec::SmallVec::new(),
            area: 0.0,
            method,
        }
    }

    /// Sets the line colour.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the line width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width.max(0.0);
        self
    }

    /// Sets a dash pattern.
    pub fn with_dash(mut self, dash: &[f64]) -> Self {
        self.dash = dash.iter().copied().collect();
        self
    }

    /// Fills the area below the line at the given opacity.
    pub fn with_area(mut self, opacity: f64) -> Self {
        self.area = opacity.clamp(0.0, 1.0);
        self
    }

    /// The stroke for this line in `fallback` colour when none is set.
    pub fn stroke(&self, fallback: Color) -> StrokeStyle {
        StrokeStyle {
            brush: self.color.unwrap_or(fallback).into(),
            stroke_width: self.width,
            dash: self.dash.clone(),
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::new(Method::Linear)
    }
}

/// One flattened declaration: a value accessor plus its decoration.
pub struct Part<D> {
    /// The dependent value of a row; `None` (or a non-finite value) is a gap.
    pub value: Arc<dyn Fn(&D) -> Option<f64>>,
    /// Display name used by legends and tooltips.
    pub name: Option<Arc<str>>,
    /// Colour override; `None` picks from the palette by property index.
    pub color: Option<Color>,
    /// Decoration used when produced as a bar. Its colour is replaced by the resolved colour.
    pub bar: BarStyle,
    /// Decoration used when produced as a dot. Its colour is replaced by the resolved colour.
    pub dot: DotStyle,
    /// Line drawn through the dots, if any.
    pub line: Option<LineStyle>,
    /// Optional per-datum restyling.
    pub variation: Option<VariationFn<D>>,
}

impl<D> Clone for Part<D> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            name: self.name.clone(),
            color: self.color,
            bar: self.bar.clone(),
            dot: self.dot.clone(),
            line: self.line.clone(),
            variation: self.variation.clone(),
        }
    }
}

impl<D> fmt::Debug for Part<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Part")
            .field("value", &"<fn>")
            .field("name", &self.name)
            .field("color", &self.color)
            .field("bar", &self.bar)
            .field("dot", &self.dot)
            .field("line", &self.line)
            .field("variation", &self.variation.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl<D> Part<D> {
    fn new(value: impl Fn(&D) -> Option<f64> + 'static) -> Self {
        Self {
            value: Arc::new(value),
            name: None,
            color: None,
            bar: BarStyle::default(),
            dot: DotStyle::default(),
            line: None,
            variation: None,
        }
    }

    /// Reads the dependent value of `datum`, treating non-finite values as missing.
    pub fn read(&self, datum: &D) -> Option<f64> {
        let value = (self.value)(datum)?;
        if !value.is_finite() {
            tracing::debug!(value, name = ?self.name, "non-finite value treated as missing");
            return None;
        }
        Some(value)
    }

    /// The colour used at `property_index`.
    pub fn resolved_color(&self, property_index: usize) -> Color {
        self.color
            .unwrap_or_else(|| crate::item::default_color(property_index))
    }
}

/// A declared series: one part, or several stacked on top of each other.
pub struct Property<D> {
    parts: Vec<Part<D>>,
}

impl<D> Clone for Property<D> {
    fn clone(&self) -> Self {
        Self {
            parts: self.parts.clone(),
        }
    }
}

impl<D> fmt::Debug for Property<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("parts", &self.parts)
            .finish()
    }
}

impl<D> Property<D> {
    /// A bar series.
    pub fn bar(value: impl Fn(&D) -> Option<f64> + 'static) -> Self {
        Self {
            parts: alloc::vec![Part::new(value)],
        }
    }

    /// A scatter series: circles, no line.
    pub fn dot(value: impl Fn(&D) -> Option<f64> + 'static) -> Self {
        Self::bar(value)
    }

    /// A line series connected by `method`, without dots.
    pub fn interpolated(value: impl Fn(&D) -> Option<f64> + 'static, method: Method) -> Self {
        let mut part = Part::new(value);
        part.dot.shape = None;
        part.line = Some(LineStyle::new(method));
        Self {
            parts: alloc::vec![part],
        }
    }

    /// Stacks properties: each part sits on the running sum of the ones before it.
    pub fn stacked(properties: impl IntoIterator<Item = Self>) -> Self {
        Self {
            parts: properties.into_iter().flat_map(|p| p.parts).collect(),
        }
    }

    /// The flattened parts, bottom of the stack first.
    pub fn parts(&self) -> &[Part<D>] {
        &self.parts
    }

    /// Returns `true` when this is a stack of more than one part.
    pub fn is_stacked(&self) -> bool {
        self.parts.len() > 1
    }

    fn map_parts(mut self, f: impl Fn(&mut Part<D>)) -> Self {
        self.parts.iter_mut().for_each(f);
        self
    }

    /// Sets the display name (on every part).
    pub fn with_name(self, name: &str) -> Self {
        let name: Arc<str> = Arc::from(name);
        self.map_parts(|p| p.name = Some(Arc::clone(&name)))
    }

    /// Overrides the palette colour (on every part).
    pub fn with_color(self, color: Color) -> Self {
        self.map_parts(|p| p.color = Some(color))
    }

    /// Sets the bar decoration (on every part).
    pub fn with_bar(self, style: BarStyle) -> Self {
        self.map_parts(|p| p.bar = style.clone())
    }

    /// Sets the dot decoration (on every part).
    pub fn with_dot(self, style: DotStyle) -> Self {
        self.map_parts(|p| p.dot = style.clone())
    }

    /// Sets the dot shape (on every part).
    pub fn with_shape(self, shape: Symbol) -> Self {
        self.map_parts(|p| p.dot.shape = Some(shape))
    }

    /// Sets the line decoration (on every part).
    pub fn with_line(self, style: LineStyle) -> Self {
        self.map_parts(|p| p.line = Some(style.clone()))
    }

    /// Restyles individual rows (on every part).
    pub fn with_variation(
        self,
        variation: impl Fn(&Variation, &D, ItemKind) -> ItemKind + 'static,
    ) -> Self {
        let variation: VariationFn<D> = Arc::new(variation);
        self.map_parts(|p| p.variation = Some(Arc::clone(&variation)))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn stacks_flatten_in_declaration_order() {
        let p: Property<(f64, f64)> = Property::stacked([
            Property::bar(|d: &(f64, f64)| Some(d.0)).with_name("a"),
            Property::bar(|d: &(f64, f64)| Some(d.1)).with_name("b"),
        ]);
        assert!(p.is_stacked());
        let names: Vec<_> = p.parts().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, [Some(Arc::<str>::from("a")), Some(Arc::<str>::from("b"))]);
    }

    #[test]
    fn non_finite_values_read_as_missing() {
        let p: Property<f64> = Property::dot(|d: &f64| Some(*d));
        let part = &p.parts()[0];
        assert_eq!(part.read(&2.0), Some(2.0));
        assert_eq!(part.read(&f64::NAN), None);
        assert_eq!(part.read(&f64::INFINITY), None);
    }

    #[test]
    fn interpolated_series_draw_no_dots_by_default() {
        let p: Property<f64> = Property::interpolated(|d: &f64| Some(*d), Method::Monotone);
        let part = &p.parts()[0];
        assert_eq!(part.dot.shape, None);
        assert_eq!(part.line.as_ref().map(|l| l.method), Some(Method::Monotone));
        let shaped = p.with_shape(Symbol::Diamond);
        assert_eq!(shaped.parts()[0].dot.shape, Some(Symbol::Diamond));
    }

    #[test]
    fn colours_fall_back_to_the_palette() {
        let p: Property<f64> = Property::bar(|d: &f64| Some(*d));
        assert_eq!(p.parts()[0].resolved_color(2), crate::item::default_color(2));
        let red = Color::from_rgb8(255, 0, 0);
        assert_eq!(p.with_color(red).parts()[0].resolved_color(2), red);
    }
}
