// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element tree.
//!
//! A chart is a list of [`Element`]s. Series and bar elements are declarations: before
//! anything is drawn they are resolved, left to right, into [`Produced`] items, threading an
//! explicit counter so every property across the chart gets its own index. [`Element::Indexed`]
//! lets callers hook into that pass.
//!
//! Elements that depend on the plane or on the items (sub-elements, markup, per-item marks)
//! hold closures that are called during rendering.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::axis::{AxisLineSpec, GridSpec, LabelsSpec, TickValues, TicksSpec};
use crate::coords::{Plane, Position};
use crate::group::{Group, Grouping, group};
use crate::interpolation::{area_path, line_path};
use crate::item::{Item, ItemKind};
use crate::legend::LegendsSpec;
use crate::mark::{Mark, PathMark, RectMark};
use crate::markup::Markup;
use crate::produce::{
    BarsConfig, LegendEntry, LegendKind, Series, XFn, produce_bars, produce_dots,
};
use crate::property::Property;
use crate::tooltip::TooltipSpec;

/// Draws from the plane alone.
pub type MarksFn = Arc<dyn Fn(&Plane) -> Vec<Mark>>;
/// Draws from the plane and the chart's items.
pub type ItemMarksFn<D> = Arc<dyn Fn(&Plane, &[Item<D>]) -> Vec<Mark>>;
/// Builds more elements from the plane and the chart's items.
pub type SubElementsFn<D> = Arc<dyn Fn(&Plane, &[Item<D>]) -> Vec<Element<D>>>;
/// Builds markup from the plane and the chart's items.
pub type HtmlFn<D> = Arc<dyn Fn(&Plane, &[Item<D>]) -> Vec<Markup>>;
/// Receives the next free property index; returns an element and the index after it.
pub type IndexedFn<D> = Arc<dyn Fn(usize) -> (Element<D>, usize)>;

/// A dot/line series declaration.
pub struct SeriesSpec<D> {
    /// The x position of a row.
    pub x: XFn<D>,
    /// Declared properties.
    pub properties: Vec<Property<D>>,
    /// Rows.
    pub data: Arc<[Arc<D>]>,
}

/// A bar series declaration.
pub struct BarsSpec<D> {
    /// Bin layout.
    pub config: BarsConfig<D>,
    /// Declared properties.
    pub properties: Vec<Property<D>>,
    /// Rows.
    pub data: Arc<[Arc<D>]>,
}

/// Items already produced, with the element index they were produced under.
pub struct Produced<D> {
    /// Index among the chart's item-producing elements.
    pub element_index: usize,
    /// Items and legend metadata.
    pub series: Series<D>,
}

/// One node of a chart's element tree.
pub enum Element<D> {
    /// Dots and/or lines.
    Series(SeriesSpec<D>),
    /// Bars.
    Bars(BarsSpec<D>),
    /// Resolved items.
    Produced(Produced<D>),
    /// An axis line.
    AxisLine(AxisLineSpec),
    /// Tick marks.
    Ticks(TicksSpec),
    /// Tick labels.
    Labels(LabelsSpec),
    /// Grid lines.
    Grid(GridSpec),
    /// Arbitrary marks.
    Primitive(MarksFn),
    /// Marks built from the items.
    WithItems(ItemMarksFn<D>),
    /// Elements built from the items.
    SubElements(SubElementsFn<D>),
    /// Markup placed around the surface.
    Html(HtmlFn<D>),
    /// Several elements in order.
    List(Vec<Element<D>>),
    /// An element built from the running property index.
    Indexed(IndexedFn<D>),
    /// A legend for every named property.
    Legends(LegendsSpec),
    /// A tooltip.
    Tooltip(TooltipSpec<D>),
}

impl<D> Element<D> {
    /// A dot/line series placed at `x(row)`.
    pub fn series(
        x: impl Fn(&D) -> f64 + 'static,
        properties: Vec<Property<D>>,
        data: impl IntoIterator<Item = D>,
    ) -> Self {
        Self::Series(SeriesSpec {
            x: Arc::new(x),
            properties,
            data: data.into_iter().map(Arc::new).collect(),
        })
    }

    /// A bar series.
    pub fn bars(
        config: BarsConfig<D>,
        properties: Vec<Property<D>>,
        data: impl IntoIterator<Item = D>,
    ) -> Self {
        Self::Bars(BarsSpec {
            config,
            properties,
            data: data.into_iter().map(Arc::new).collect(),
        })
    }

    /// Marks computed from the plane.
    pub fn primitive(f: impl Fn(&Plane) -> Vec<Mark> + 'static) -> Self {
        Self::Primitive(Arc::new(f))
    }

    /// Marks computed from the plane and items.
    pub fn with_items(f: impl Fn(&Plane, &[Item<D>]) -> Vec<Mark> + 'static) -> Self {
        Self::WithItems(Arc::new(f))
    }

    /// Elements computed from the plane and items.
    pub fn sub_elements(f: impl Fn(&Plane, &[Item<D>]) -> Vec<Self> + 'static) -> Self {
        Self::SubElements(Arc::new(f))
    }

    /// Markup computed from the plane and items.
    pub fn html(f: impl Fn(&Plane, &[Item<D>]) -> Vec<Markup> + 'static) -> Self {
        Self::Html(Arc::new(f))
    }

    /// An element built from the running property index.
    pub fn indexed(f: impl Fn(usize) -> (Self, usize) + 'static) -> Self {
        Self::Indexed(Arc::new(f))
    }

    /// Elements built from the plane alone.
    pub fn with_plane(f: impl Fn(&Plane) -> Vec<Self> + 'static) -> Self {
        Self::SubElements(Arc::new(move |plane, _| f(plane)))
    }

    /// Elements built for each group of the chart's items.
    pub fn each(
        grouping: Grouping<D>,
        f: impl Fn(&Plane, &Group<D>) -> Vec<Self> + 'static,
    ) -> Self
    where
        D: 'static,
    {
        Self::SubElements(Arc::new(move |plane, items| {
            group(&grouping, items)
                .iter()
                .flat_map(|g| f(plane, g))
                .collect()
        }))
    }

    /// Whether this element draws onto the surface (as opposed to markup around it).
    pub(crate) fn is_markup(&self) -> bool {
        matches!(self, Self::Html(_) | Self::Legends(_) | Self::Tooltip(_))
    }

    /// Replaces declarations by their items, left to right.
    pub(crate) fn resolve(self, counter: &mut Counter) -> Self {
        match self {
            Self::Series(spec) => {
                let element_index = counter.next_element();
                let series = produce_dots(
                    element_index,
                    counter.property,
                    &*spec.x,
                    &spec.properties,
                    &spec.data,
                );
                counter.property = series.next_property_index;
                Self::Produced(Produced {
                    element_index,
                    series,
                })
            }
            Self::Bars(spec) => {
                let element_index = counter.next_element();
                let series = produce_bars(
                    element_index,
                    counter.property,
                    &spec.config,
                    &spec.properties,
                    &spec.data,
                );
                counter.property = series.next_property_index;
                Self::Produced(Produced {
                    element_index,
                    series,
                })
            }
            Self::Indexed(f) => {
                let (element, next) = f(counter.property);
                // The nested element starts at the same index; the closure says where it ends.
                let mut inner = *counter;
                let element = element.resolve(&mut inner);
                counter.element = inner.element;
                counter.property = next;
                element
            }
            Self::List(elements) => {
                Self::List(elements.into_iter().map(|e| e.resolve(counter)).collect())
            }
            other => other,
        }
    }

    /// Calls sub-element closures now that the plane and items are known.
    pub(crate) fn expand(self, plane: &Plane, items: &[Item<D>], counter: &mut Counter) -> Self {
        match self {
            Self::SubElements(f) => Self::List(
                f(plane, items)
                    .into_iter()
                    .map(|e| e.resolve(counter).expand(plane, items, counter))
                    .collect(),
            ),
            Self::List(elements) => Self::List(
                elements
                    .into_iter()
                    .map(|e| e.expand(plane, items, counter))
                    .collect(),
            ),
            other => other,
        }
    }

    pub(crate) fn collect_items(&self, out: &mut Vec<Item<D>>) {
        match self {
            Self::Produced(p) => out.extend(p.series.items.iter().cloned()),
            Self::List(elements) => elements.iter().for_each(|e| e.collect_items(out)),
            _ => {}
        }
    }

    pub(crate) fn collect_limits(&self, out: &mut Vec<Position>) {
        match self {
            Self::Produced(p) => out.extend_from_slice(&p.series.limits),
            Self::List(elements) => elements.iter().for_each(|e| e.collect_limits(out)),
            _ => {}
        }
    }

    pub(crate) fn collect_legends(&self, out: &mut Vec<LegendEntry>) {
        match self {
            Self::Produced(p) => out.extend(p.series.legends.iter().cloned()),
            Self::List(elements) => elements.iter().for_each(|e| e.collect_legends(out)),
            _ => {}
        }
    }

    pub(crate) fn collect_ticks(&self, plane: &Plane, acc: &mut TickValues) {
        match self {
            Self::AxisLine(spec) => spec.collect(plane, acc),
            Self::Ticks(spec) => spec.collect(plane, acc),
            Self::Labels(spec) => spec.collect(plane, acc),
            Self::List(elements) => elements.iter().for_each(|e| e.collect_ticks(plane, acc)),
            _ => {}
        }
    }
}

/// Running indices of the resolution pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Counter {
    pub(crate) element: usize,
    pub(crate) property: usize,
}

impl Counter {
    fn next_element(&mut self) -> usize {
        let index = self.element;
        self.element += 1;
        index
    }
}

/// The marks of produced items: areas, then lines, then bars and dots.
///
/// Lines and areas connect the dots of one property in row order and break wherever a row
/// produced no item, so gaps are never bridged.
pub fn series_marks<D>(plane: &Plane, series: &Series<D>) -> Vec<Mark> {
    let mut areas = Vec::new();
    let mut lines = Vec::new();
    for entry in &series.legends {
        let LegendKind::Line {
            line: Some(line), ..
        } = &entry.kind
        else {
            continue;
        };
        let color = line.color.unwrap_or(entry.color);
        let stroke = line.stroke(entry.color);
        let dots: Vec<&Item<D>> = series
            .items
            .iter()
            .filter(|item| item.property_index == entry.property_index)
            .collect();
        for run in runs(&dots) {
            let top: Vec<_> = run
                .iter()
                .map(|item| plane.draw_point(item.position.x1, item.position.y2))
                .collect();
            if line.area > 0.0 {
                let bottom: Vec<_> = run
                    .iter()
                    .map(|item| {
                        plane.draw_point(item.position.x1, plane.y.clamp(item.stack_base))
                    })
                    .collect();
                areas.push(
                    PathMark::new(area_path(line.method, &top, &bottom))
                        .with_fill(color)
                        .with_opacity(line.area)
                        .into(),
                );
            }
            if top.len() > 1 {
                lines.push(
                    PathMark::new(line_path(line.method, &top))
                        .with_stroke(stroke.clone())
                        .into(),
                );
            }
        }
    }

    let mut out: Vec<Mark> = areas;
    out.append(&mut lines);
    for item in &series.items {
        match &item.kind {
            ItemKind::Bar(style) => {
                let rect = plane.draw_rect(&item.position);
                let w = rect.width();
                let (top, bottom) = if item.value < 0.0 {
                    (style.round_bottom, style.round_top)
                } else {
                    (style.round_top, style.round_bottom)
                };
                if style.highlight > 0.0 && style.highlight_width > 0.0 {
                    let hw = style.highlight_width;
                    out.push(
                        RectMark::new(rect.inflate(hw, hw))
                            .with_fill(style.color)
                            .with_opacity(style.highlight)
                            .with_rounding(top * w + hw, bottom * w + hw)
                            .into(),
                    );
                }
                let mut mark = RectMark::new(rect)
                    .with_fill(style.color)
                    .with_opacity(style.opacity)
                    .with_rounding(top * w, bottom * w);
                if let Some(border) = &style.border {
                    mark = mark.with_stroke(border.clone());
                }
                out.push(mark.into());
            }
            ItemKind::Dot(style) => {
                let Some(shape) = style.shape else {
                    continue;
                };
                let center = plane.draw_point(item.position.x1, item.position.y2);
                let r = shape.outer_radius(style.size);
                if style.highlight > 0.0 && style.highlight_width > 0.0 && r > 0.0 {
                    let grow = (r + style.highlight_width) / r;
                    out.push(
                        PathMark::new(shape.path(center.x, center.y, style.size * grow * grow))
                            .with_fill(style.color)
                            .with_opacity(style.highlight)
                            .into(),
                    );
                }
                let mut mark = PathMark::new(shape.path(center.x, center.y, style.size))
                    .with_fill(style.color)
                    .with_opacity(style.opacity);
                if let Some(border) = &style.border {
                    mark = mark.with_stroke(border.clone());
                }
                out.push(mark.into());
            }
        }
    }
    out
}

/// Splits items of one property into runs of consecutive rows.
fn runs<'a, D>(items: &[&'a Item<D>]) -> Vec<Vec<&'a Item<D>>> {
    let mut out: Vec<Vec<&'a Item<D>>> = Vec::new();
    for &item in items {
        match out.last_mut() {
            Some(run)
                if run
                    .last()
                    .is_some_and(|prev| prev.data_index + 1 == item.data_index) =>
            {
                run.push(item);
            }
            _ => out.push(alloc::vec![item]),
        }
    }
    out
}

impl<D> Clone for SeriesSpec<D> {
    fn clone(&self) -> Self {
        Self {
            x: Arc::clone(&self.x),
            properties: self.properties.clone(),
            data: Arc::clone(&self.data),
        }
    }
}

impl<D> Clone for BarsSpec<D> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            properties: self.properties.clone(),
            data: Arc::clone(&self.data),
        }
    }
}

impl<D> Clone for Produced<D> {
    fn clone(&self) -> Self {
        Self {
            element_index: self.element_index,
            series: self.series.clone(),
        }
    }
}

impl<D> Clone for Element<D> {
    fn clone(&self) -> Self {
        match self {
            Self::Series(s) => Self::Series(s.clone()),
            Self::Bars(b) => Self::Bars(b.clone()),
            Self::Produced(p) => Self::Produced(p.clone()),
            Self::AxisLine(s) => Self::AxisLine(s.clone()),
            Self::Ticks(s) => Self::Ticks(s.clone()),
            Self::Labels(s) => Self::Labels(s.clone()),
            Self::Grid(s) => Self::Grid(s.clone()),
            Self::Primitive(f) => Self::Primitive(Arc::clone(f)),
            Self::WithItems(f) => Self::WithItems(Arc::clone(f)),
            Self::SubElements(f) => Self::SubElements(Arc::clone(f)),
            Self::Html(f) => Self::Html(Arc::clone(f)),
            Self::List(elements) => Self::List(elements.clone()),
            Self::Indexed(f) => Self::Indexed(Arc::clone(f)),
            Self::Legends(s) => Self::Legends(s.clone()),
            Self::Tooltip(s) => Self::Tooltip(s.clone()),
        }
    }
}

impl<D> fmt::Debug for SeriesSpec<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesSpec")
            .field("properties", &self.properties)
            .field("rows", &self.data.len())
            .finish_non_exhaustive()
    }
}

impl<D> fmt::Debug for BarsSpec<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarsSpec")
            .field("config", &self.config)
            .field("properties", &self.properties)
            .field("rows", &self.data.len())
            .finish()
    }
}

impl<D> fmt::Debug for Produced<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Produced")
            .field("element_index", &self.element_index)
            .field("items", &self.series.items.len())
            .field("legends", &self.series.legends)
            .finish()
    }
}

impl<D> fmt::Debug for Element<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Series(s) => f.debug_tuple("Series").field(s).finish(),
            Self::Bars(b) => f.debug_tuple("Bars").field(b).finish(),
            Self::Produced(p) => f.debug_tuple("Produced").field(p).finish(),
            Self::AxisLine(s) => f.debug_tuple("AxisLine").field(s).finish(),
            Self::Ticks(s) => f.debug_tuple("Ticks").field(s).finish(),
            Self::Labels(s) => f.debug_tuple("Labels").field(s).finish(),
            Self::Grid(s) => f.debug_tuple("Grid").field(s).finish(),
            Self::Primitive(_) => f.write_str("Primitive(<fn>)"),
            Self::WithItems(_) => f.write_str("WithItems(<fn>)"),
            Self::SubElements(_) => f.write_str("SubElements(<fn>)"),
            Self::Html(_) => f.write_str("Html(<fn>)"),
            Self::List(elements) => f.debug_tuple("List").field(elements).finish(),
            Self::Indexed(_) => f.write_str("Indexed(<fn>)"),
            Self::Legends(s) => f.debug_tuple("Legends").field(s).finish(),
            Self::Tooltip(s) => f
                .debug_struct("Tooltip")
                .field("items", &s.items.len())
                .field("direction", &s.direction)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::coords::Margin;
    use crate::interpolation::Method;
    use crate::property::LineStyle;

    fn resolve_all(elements: Vec<Element<f64>>) -> (Vec<Element<f64>>, Counter) {
        let mut counter = Counter::default();
        let out = elements.into_iter().map(|e| e.resolve(&mut counter)).collect();
        (out, counter)
    }

    fn produced(element: &Element<f64>) -> &Produced<f64> {
        match element {
            Element::Produced(p) => p,
            other => panic!("expected produced items, got {other:?}"),
        }
    }

    #[test]
    fn property_indices_run_across_elements() {
        let bars = Element::bars(
            BarsConfig::new(),
            vec![
                Property::bar(|d: &f64| Some(*d)),
                Property::stacked([
                    Property::bar(|d: &f64| Some(*d)),
                    Property::bar(|d: &f64| Some(*d)),
                ]),
            ],
            [1.0],
        );
        let dots = Element::series(
            |d: &f64| *d,
            vec![Property::dot(|d: &f64| Some(*d))],
            [1.0],
        );
        let (out, counter) = resolve_all(vec![bars, Element::Grid(GridSpec::default()), dots]);
        assert_eq!(counter, Counter { element: 2, property: 4 });
        let indices: Vec<_> = produced(&out[0])
            .series
            .items
            .iter()
            .map(|i| i.property_index)
            .collect();
        assert_eq!(indices, [0, 1, 2]);
        let dot = &produced(&out[2]).series.items[0];
        assert_eq!((dot.property_index, dot.element_index), (3, 1));
    }

    #[test]
    fn indexed_elements_control_the_counter() {
        let reserve = Element::indexed(|start| {
            let dots = Element::series(
                |d: &f64| *d,
                vec![Property::dot(|d: &f64| Some(*d))],
                [2.0],
            );
            (dots, start + 5)
        });
        let after = Element::series(
            |d: &f64| *d,
            vec![Property::dot(|d: &f64| Some(*d))],
            [3.0],
        );
        let (out, counter) = resolve_all(vec![reserve, after]);
        assert_eq!(produced(&out[0]).series.items[0].property_index, 0);
        assert_eq!(produced(&out[1]).series.items[0].property_index, 5);
        assert_eq!(counter.property, 6);
    }

    #[test]
    fn lines_break_at_gaps() {
        let ys = [Some(1.0), Some(2.0), None, Some(3.0), Some(4.0), Some(5.0)];
        let data: Vec<Arc<(f64, Option<f64>)>> = ys
            .iter()
            .enumerate()
            .map(|(i, y)| Arc::new((i as f64, *y)))
            .collect();
        let series = produce_dots(
            0,
            0,
            &|d: &(f64, Option<f64>)| d.0,
            &[Property::interpolated(
                |d: &(f64, Option<f64>)| d.1,
                Method::Linear,
            )],
            &data,
        );
        assert_eq!(series.items.len(), 5);
        let plane = Plane::new(100.0, 100.0, Margin::default(), (0.0, 10.0), (0.0, 10.0));
        let marks = series_marks(&plane, &series);
        // Two lines, no areas, no dots (interpolated series hide dots by default).
        assert_eq!(marks.len(), 2);
        assert!(marks.iter().all(|m| matches!(m, Mark::Path(p) if p.stroke.is_some())));
    }

    #[test]
    fn areas_fill_down_to_the_stack_base() {
        let series = produce_dots(
            0,
            0,
            &|d: &f64| *d,
            &[Property::stacked([
                Property::dot(|_: &f64| Some(2.0)),
                Property::dot(|_: &f64| Some(3.0)).with_line(LineStyle::default().with_area(0.5)),
            ])],
            &[Arc::new(0.0), Arc::new(1.0)],
        );
        let plane = Plane::new(100.0, 100.0, Margin::default(), (0.0, 1.0), (0.0, 10.0));
        let marks = series_marks(&plane, &series);
        let Mark::Path(area) = &marks[0] else {
            panic!("expected the area first");
        };
        assert_eq!(area.opacity, 0.5);
        let bounds = kurbo::Shape::bounding_box(&area.path);
        // From y = 5 (top of the stack) down to y = 2 (its base).
        assert!(
            (bounds.y0 - 50.0).abs() < 1e-9 && (bounds.y1 - 80.0).abs() < 1e-9,
            "{bounds:?}"
        );
    }

    #[test]
    fn bar_rounding_is_a_fraction_of_the_width() {
        let series = produce_bars(
            0,
            0,
            &BarsConfig::new().with_margin(0.0).with_rounding(0.5, 0.0),
            &[Property::bar(|d: &f64| Some(*d))],
            &[Arc::new(4.0)],
        );
        let plane = Plane::new(100.0, 100.0, Margin::default(), (0.5, 1.5), (0.0, 10.0));
        let marks = series_marks(&plane, &series);
        let Mark::Rect(rect) = &marks[0] else {
            panic!("expected a bar");
        };
        assert!((rect.rect.width() - 100.0).abs() < 1e-9);
        assert!((rect.round_top - 50.0).abs() < 1e-9);
        assert_eq!(rect.round_bottom, 0.0);
    }

    #[test]
    fn each_expands_per_group() {
        let bars = Element::bars(
            BarsConfig::new(),
            vec![
                Property::bar(|d: &f64| Some(*d)),
                Property::bar(|d: &f64| Some(*d)),
            ],
            [1.0, 2.0, 3.0],
        );
        let (resolved, mut counter) = resolve_all(vec![bars]);
        let mut items = Vec::new();
        resolved[0].collect_items(&mut items);
        let plane = Plane::new(100.0, 100.0, Margin::default(), (0.0, 4.0), (0.0, 3.0));
        let each = Element::each(Grouping::Bin, |_, g| {
            assert_eq!(g.len(), 2, "one bar per declaration in every bin");
            vec![Element::primitive(|_| Vec::new())]
        });
        let Element::List(expanded) = each.expand(&plane, &items, &mut counter) else {
            panic!("sub-elements expand into a list");
        };
        assert_eq!(expanded.len(), 3);
    }
}
