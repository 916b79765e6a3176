// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series producers: rows plus property declarations in, positioned items out.
//!
//! Both producers stack the same way. Within one top-level declaration the parts are laid end
//! to end: a part's base is the running sum of the values below it, and its top is that sum plus
//! its own value. A missing value adds nothing to the sum and produces no item, but the row keeps
//! its index so later rows and grouping are unaffected.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use peniko::Color;

use crate::coords::Position;
use crate::item::{BarStyle, DotStyle, Item, ItemKind};
use crate::property::{LineStyle, Part, Property, Variation};

/// Row accessor for an x position.
pub type XFn<D> = Arc<dyn Fn(&D) -> f64>;

/// Layout options of a bar element.
pub struct BarsConfig<D> {
    /// Gap between neighbouring bars of one bin, as a fraction of the bin length.
    pub spacing: f64,
    /// Gap between the bin edges and its bars, as a fraction of the bin length.
    pub margin: f64,
    /// Place top-level declarations side by side; when `false` they overlap.
    pub grouped: bool,
    /// Corner rounding of the top of each stack, as a fraction of the bar width.
    pub round_top: f64,
    /// Corner rounding of the bottom of each stack, as a fraction of the bar width.
    pub round_bottom: f64,
    /// Explicit bin start.
    pub x1: Option<XFn<D>>,
    /// Explicit bin end.
    pub x2: Option<XFn<D>>,
}

impl<D> BarsConfig<D> {
    /// Default layout: grouped, `spacing = 0.05`, `margin = 0.1`, bins at successive integers.
    pub fn new() -> Self {
        Self {
            spacing: 0.05,
            margin: 0.1,
            grouped: true,
            round_top: 0.0,
            round_bottom: 0.0,
            x1: None,
            x2: None,
        }
    }

    /// Sets the gap between bars of one bin.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    /// Sets the gap around the bars of one bin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    /// Lets top-level declarations overlap instead of sitting side by side.
    pub fn ungrouped(mut self) -> Self {
        self.grouped = false;
        self
    }

    /// Rounds the top and bottom of each stack.
    pub fn with_rounding(mut self, top: f64, bottom: f64) -> Self {
        self.round_top = top.clamp(0.0, 0.5);
        self.round_bottom = bottom.clamp(0.0, 0.5);
        self
    }

    /// Reads bin starts from the rows.
    pub fn with_x1(mut self, x1: impl Fn(&D) -> f64 + 'static) -> Self {
        self.x1 = Some(Arc::new(x1));
        self
    }

    /// Reads bin ends from the rows.
    pub fn with_x2(mut self, x2: impl Fn(&D) -> f64 + 'static) -> Self {
        self.x2 = Some(Arc::new(x2));
        self
    }
}

impl<D> Default for BarsConfig<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for BarsConfig<D> {
    fn clone(&self) -> Self {
        Self {
            spacing: self.spacing,
            margin: self.margin,
            grouped: self.grouped,
            round_top: self.round_top,
            round_bottom: self.round_bottom,
            x1: self.x1.clone(),
            x2: self.x2.clone(),
        }
    }
}

impl<D> fmt::Debug for BarsConfig<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarsConfig")
            .field("spacing", &self.spacing)
            .field("margin", &self.margin)
            .field("grouped", &self.grouped)
            .field("round_top", &self.round_top)
            .field("round_bottom", &self.round_bottom)
            .field("x1", &self.x1.as_ref().map(|_| "<fn>"))
            .field("x2", &self.x2.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// How a legend entry is drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum LegendKind {
    /// A bar swatch.
    Bar(BarStyle),
    /// A line sample and/or a dot.
    Line {
        /// The line, if the series draws one.
        line: Option<LineStyle>,
        /// The dot decoration.
        dot: DotStyle,
    },
}

/// Legend metadata of one property.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    /// Global property index.
    pub property_index: usize,
    /// Display name.
    pub name: Option<Arc<str>>,
    /// Resolved colour.
    pub color: Color,
    /// Swatch.
    pub kind: LegendKind,
}

/// The output of a producer.
#[derive(Debug)]
pub struct Series<D> {
    /// Items in row-major order (row, then declaration, then stack part).
    pub items: Vec<Item<D>>,
    /// One entry per flattened property, in declaration order.
    pub legends: Vec<LegendEntry>,
    /// Envelopes reported to plane inference, one per item. A bar reports its whole bin so
    /// the outer bars keep their margin to the plane's edge.
    pub limits: Vec<Position>,
    /// The property index following the last one used here.
    pub next_property_index: usize,
}

impl<D> Clone for Series<D> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            legends: self.legends.clone(),
            limits: self.limits.clone(),
            next_property_index: self.next_property_index,
        }
    }
}

/// Data-space x extent of every row's bin.
///
/// Explicit bounds are used as given. With only starts, a bin ends where the next one starts and
/// the last bin repeats the width of the one before it; only ends mirror that. A lone row with a
/// single bound is one unit wide. Without accessors, row `i` spans `[i + 0.5, i + 1.5]`.
pub fn bins<D>(config: &BarsConfig<D>, data: &[Arc<D>]) -> Vec<(f64, f64)> {
    let n = data.len();
    match (&config.x1, &config.x2) {
        (Some(x1), Some(x2)) => data.iter().map(|d| (x1(d.as_ref()), x2(d.as_ref()))).collect(),
        (Some(x1), None) => {
            let starts: Vec<f64> = data.iter().map(|d| x1(d.as_ref())).collect();
            (0..n)
                .map(|i| {
                    let end = match (starts.get(i + 1), i.checked_sub(1)) {
                        (Some(next), _) => *next,
                        (None, Some(prev)) => starts[i] + (starts[i] - starts[prev]),
                        (None, None) => starts[i] + 1.0,
                    };
                    (starts[i], end)
                })
                .collect()
        }
        (None, Some(x2)) => {
            let ends: Vec<f64> = data.iter().map(|d| x2(d.as_ref())).collect();
            (0..n)
                .map(|i| {
                    let start = match (i.checked_sub(1), ends.get(i + 1)) {
                        (Some(prev), _) => ends[prev],
                        (None, Some(next)) => ends[i] - (next - ends[i]),
                        (None, None) => ends[i] - 1.0,
                    };
                    (start, ends[i])
                })
                .collect()
        }
        (None, None) => (0..n)
            .map(|i| {
                let center = i as f64 + 1.0;
                (center - 0.5, center + 0.5)
            })
            .collect(),
    }
}

fn restyle<D>(part: &Part<D>, context: &Variation, datum: &D, kind: ItemKind) -> ItemKind {
    match &part.variation {
        Some(variation) => variation(context, datum, kind),
        None => kind,
    }
}

/// Produces bar items for `properties` over `data`.
///
/// `first_property_index` is the global index given to the first flattened part.
pub fn produce_bars<D>(
    element_index: usize,
    first_property_index: usize,
    config: &BarsConfig<D>,
    properties: &[Property<D>],
    data: &[Arc<D>],
) -> Series<D> {
    let bins = bins(config, data);
    let slots = if config.grouped {
        properties.len().max(1)
    } else {
        1
    };
    let slot_count = slots as f64;

    let mut items = Vec::new();
    let mut limits = Vec::new();
    for (data_index, (datum, &(a, b))) in data.iter().zip(&bins).enumerate() {
        let (start, end) = (a.min(b), a.max(b));
        let length = end - start;
        let margin = length * config.margin;
        let spacing = length * config.spacing;
        let width = ((length - 2.0 * margin - (slot_count - 1.0) * spacing) / slot_count).max(0.0);

        let mut property_index = first_property_index;
        for (stack_index, property) in properties.iter().enumerate() {
            let slot = if config.grouped { stack_index as f64 } else { 0.0 };
            let x1 = start + margin + slot * (width + spacing);
            let x2 = x1 + width;

            let first_item = items.len();
            let mut base = 0.0;
            for part in property.parts() {
                let index = property_index;
                property_index += 1;
                let Some(value) = part.read(datum) else {
                    continue;
                };
                let style = part
                    .bar
                    .clone()
                    .with_color(part.resolved_color(index));
                let context = Variation {
                    element_index,
                    stack_index,
                    property_index: index,
                    data_index,
                    value,
                };
                let kind = restyle(part, &context, datum, ItemKind::Bar(style));
                items.push(
                    Item::new(
                        Arc::clone(datum),
                        index,
                        stack_index,
                        data_index,
                        Position::new(x1, x2, base, base + value),
                        kind,
                    )
                    .with_element_index(element_index)
                    .with_value(value)
                    .with_stack_base(base)
                    .with_name(part.name.clone()),
                );
                limits.push(Position::new(start, end, base, base + value));
                base += value;
            }
            round_stack_ends(&mut items[first_item..], config);
        }
    }

    let legends = legends(first_property_index, properties, |part, color| {
        LegendKind::Bar(part.bar.clone().with_color(color))
    });
    tracing::trace!(
        element_index,
        rows = data.len(),
        items = items.len(),
        "produced bars"
    );
    Series {
        items,
        limits,
        next_property_index: first_property_index + legends.len(),
        legends,
    }
}

/// Applies the element's rounding to the outermost bars of one stack, unless a bar rounds
/// itself.
fn round_stack_ends<D>(stack: &mut [Item<D>], config: &BarsConfig<D>) {
    let last = stack.len().saturating_sub(1);
    for (i, item) in stack.iter_mut().enumerate() {
        if let ItemKind::Bar(style) = &mut item.kind {
            let top = if i == last && style.round_top == 0.0 {
                config.round_top
            } else {
                style.round_top
            };
            let bottom = if i == 0 && style.round_bottom == 0.0 {
                config.round_bottom
            } else {
                style.round_bottom
            };
            *style = style.clone().with_rounding(top, bottom);
        }
    }
}

/// Produces dot items for `properties` over `data`, placed at `x(row)`.
///
/// Rows with a non-finite x produce no items.
pub fn produce_dots<D>(
    element_index: usize,
    first_property_index: usize,
    x: &dyn Fn(&D) -> f64,
    properties: &[Property<D>],
    data: &[Arc<D>],
) -> Series<D> {
    let mut items = Vec::new();
    for (data_index, datum) in data.iter().enumerate() {
        let xv = x(datum.as_ref());
        let mut property_index = first_property_index;
        for (stack_index, property) in properties.iter().enumerate() {
            let mut base = 0.0;
            for part in property.parts() {
                let index = property_index;
                property_index += 1;
                let Some(value) = part.read(datum).filter(|_| xv.is_finite()) else {
                    continue;
                };
                let style = part
                    .dot
                    .clone()
                    .with_color(part.resolved_color(index));
                let context = Variation {
                    element_index,
                    stack_index,
                    property_index: index,
                    data_index,
                    value,
                };
                let kind = restyle(part, &context, datum, ItemKind::Dot(style));
                items.push(
                    Item::new(
                        Arc::clone(datum),
                        index,
                        stack_index,
                        data_index,
                        Position::from_point(xv, base + value),
                        kind,
                    )
                    .with_element_index(element_index)
                    .with_value(value)
                    .with_stack_base(base)
                    .with_name(part.name.clone()),
                );
                base += value;
            }
        }
    }

    let legends = legends(first_property_index, properties, |part, color| {
        LegendKind::Line {
            line: part.line.clone(),
            dot: part.dot.clone().with_color(color),
        }
    });
    tracing::trace!(
        element_index,
        rows = data.len(),
        items = items.len(),
        "produced dots"
    );
    let limits = items.iter().map(|item| item.position).collect();
    Series {
        items,
        limits,
        next_property_index: first_property_index + legends.len(),
        legends,
    }
}

fn legends<D>(
    first_property_index: usize,
    properties: &[Property<D>],
    kind: impl Fn(&Part<D>, Color) -> LegendKind,
) -> Vec<LegendEntry> {
    properties
        .iter()
        .flat_map(Property::parts)
        .enumerate()
        .map(|(offset, part)| {
            let property_index = first_property_index + offset;
            let color = part.resolved_color(property_index);
            LegendEntry {
                property_index,
                name: part.name.clone(),
                color,
                kind: kind(part, color),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn rows(v: &[(f64, Option<f64>, Option<f64>)]) -> Vec<Arc<(f64, Option<f64>, Option<f64>)>> {
        v.iter().copied().map(Arc::new).collect()
    }

    type Row = (f64, Option<f64>, Option<f64>);

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn default_bins_are_centred_on_successive_integers() {
        let data = rows(&[(0.0, None, None); 3]);
        let b = bins(&BarsConfig::<Row>::new(), &data);
        assert_eq!(b, vec![(0.5, 1.5), (1.5, 2.5), (2.5, 3.5)]);
    }

    #[test]
    fn starts_only_infer_ends_from_neighbours() {
        let data = rows(&[(0.0, None, None), (2.0, None, None), (5.0, None, None)]);
        let config = BarsConfig::<Row>::new().with_x1(|r| r.0);
        assert_eq!(bins(&config, &data), vec![(0.0, 2.0), (2.0, 5.0), (5.0, 8.0)]);
    }

    #[test]
    fn ends_only_infer_starts_from_neighbours() {
        let data = rows(&[(1.0, None, None), (2.0, None, None), (4.0, None, None)]);
        let config = BarsConfig::<Row>::new().with_x2(|r| r.0);
        assert_eq!(bins(&config, &data), vec![(0.0, 1.0), (1.0, 2.0), (2.0, 4.0)]);
    }

    #[test]
    fn a_lone_row_is_one_unit_wide() {
        let data = rows(&[(3.0, None, None)]);
        let starts = BarsConfig::<Row>::new().with_x1(|r| r.0);
        assert_eq!(bins(&starts, &data), vec![(3.0, 4.0)]);
        let ends = BarsConfig::<Row>::new().with_x2(|r| r.0);
        assert_eq!(bins(&ends, &data), vec![(2.0, 3.0)]);
    }

    #[test]
    fn grouped_bars_share_the_bin() {
        let data = rows(&[(0.0, Some(1.0), Some(2.0))]);
        let props = [Property::bar(|r: &Row| r.1), Property::bar(|r: &Row| r.2)];
        let series = produce_bars(0, 0, &BarsConfig::new(), &props, &data);
        assert_eq!(series.items.len(), 2);
        // Bin [0.5, 1.5]: margin 0.1, spacing 0.05, width (1 - 0.2 - 0.05) / 2 = 0.375.
        let a = series.items[0].position;
        let b = series.items[1].position;
        assert!(close(a.x1, 0.6) && close(a.x2, 0.975), "{a:?}");
        assert!(close(b.x1, 1.025) && close(b.x2, 1.4), "{b:?}");
        assert_eq!(series.items[1].stack_index, 1);
        assert_eq!(series.next_property_index, 2);
    }

    #[test]
    fn ungrouped_bars_overlap() {
        let data = rows(&[(0.0, Some(1.0), Some(2.0))]);
        let props = [Property::bar(|r: &Row| r.1), Property::bar(|r: &Row| r.2)];
        let series = produce_bars(0, 0, &BarsConfig::new().ungrouped(), &props, &data);
        assert_eq!(series.items[0].position.x1, series.items[1].position.x1);
        assert_eq!(series.items[0].position.x2, series.items[1].position.x2);
    }

    #[test]
    fn stacks_run_end_to_end() {
        let data = rows(&[(0.0, Some(3.0), Some(4.0))]);
        let props = [Property::stacked([
            Property::bar(|r: &Row| r.1),
            Property::bar(|r: &Row| r.2),
        ])];
        let series = produce_bars(0, 0, &BarsConfig::new(), &props, &data);
        let spans: Vec<(f64, f64)> = series
            .items
            .iter()
            .map(|i| (i.position.y1, i.position.y2))
            .collect();
        assert_eq!(spans, vec![(0.0, 3.0), (3.0, 7.0)]);
        assert_eq!(series.items[0].stack_index, series.items[1].stack_index);
        assert_eq!(series.items[1].property_index, 1);
    }

    #[test]
    fn missing_stack_values_add_nothing() {
        let data = rows(&[(0.0, None, Some(4.0))]);
        let props = [Property::stacked([
            Property::bar(|r: &Row| r.1),
            Property::bar(|r: &Row| r.2),
        ])];
        let series = produce_bars(0, 5, &BarsConfig::new(), &props, &data);
        assert_eq!(series.items.len(), 1);
        let item = &series.items[0];
        assert_eq!((item.position.y1, item.position.y2), (0.0, 4.0));
        assert_eq!(item.property_index, 6);
        assert_eq!(series.legends.len(), 2);
    }

    #[test]
    fn rounding_applies_to_the_ends_of_a_stack() {
        let data = rows(&[(0.0, Some(1.0), Some(1.0))]);
        let props = [Property::stacked([
            Property::bar(|r: &Row| r.1),
            Property::bar(|r: &Row| r.2),
        ])];
        let series = produce_bars(0, 0, &BarsConfig::new().with_rounding(0.5, 0.2), &props, &data);
        let style = |i: usize| match &series.items[i].kind {
            ItemKind::Bar(s) => (s.round_top, s.round_bottom),
            ItemKind::Dot(_) => unreachable!(),
        };
        assert_eq!(style(0), (0.0, 0.2));
        assert_eq!(style(1), (0.5, 0.0));
    }

    #[test]
    fn dots_skip_gaps_but_keep_row_indices() {
        let data = rows(&[(0.0, None, None), (1.0, Some(5.0), None), (2.0, None, None)]);
        let props = [Property::dot(|r: &Row| r.1)];
        let series = produce_dots(0, 0, &|r: &Row| r.0, &props, &data);
        assert_eq!(series.items.len(), 1);
        let item = &series.items[0];
        assert_eq!(item.data_index, 1);
        assert_eq!(item.position, Position::from_point(1.0, 5.0));
    }

    #[test]
    fn stacked_dots_record_their_base() {
        let data = rows(&[(0.0, Some(2.0), Some(3.0))]);
        let props = [Property::stacked([
            Property::dot(|r: &Row| r.1),
            Property::dot(|r: &Row| r.2),
        ])];
        let series = produce_dots(1, 0, &|r: &Row| r.0, &props, &data);
        let top = &series.items[1];
        assert_eq!(top.position.y1, 5.0);
        assert_eq!(top.stack_base, 2.0);
        assert_eq!(top.value, 3.0);
        assert_eq!(top.element_index, 1);
    }

    #[test]
    fn variations_restyle_single_rows() {
        let data = rows(&[(0.0, Some(1.0), None), (1.0, Some(2.0), None)]);
        let props = [Property::bar(|r: &Row| r.1).with_variation(|ctx, _, kind| {
            match (ctx.data_index, kind) {
                (1, ItemKind::Bar(s)) => ItemKind::Bar(s.with_opacity(0.5)),
                (_, kind) => kind,
            }
        })];
        let series = produce_bars(0, 0, &BarsConfig::new(), &props, &data);
        let opacity = |i: usize| match &series.items[i].kind {
            ItemKind::Bar(s) => s.opacity,
            ItemKind::Dot(s) => s.opacity,
        };
        assert_eq!(opacity(0), 1.0);
        assert_eq!(opacity(1), 0.5);
    }
}
