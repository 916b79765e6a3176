// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composing a chart.
//!
//! [`Chart::render`] is a single synchronous pass:
//! 1. resolve series and bar declarations (and [`Element::Indexed`]) left to right,
//! 2. infer the plane from the envelopes of the produced items,
//! 3. collect the items (and legend metadata), then expand sub-elements,
//! 4. fold every element into a [`TickValues`] accumulator,
//! 5. render in declaration order.
//!
//! Markup elements declared before the first surface element go to [`Rendered::before`]; all
//! other markup goes to [`Rendered::after`].

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::axis::TickValues;
use crate::config::{Attribute, Config};
use crate::coords::Plane;
use crate::element::{Counter, Element, series_marks};
use crate::events::{PointerEvent, dispatch};
use crate::item::Item;
use crate::mark::Mark;
use crate::markup::Markup;
use crate::produce::LegendEntry;

/// The output of one render.
#[derive(Debug)]
pub struct Rendered<D> {
    /// The inferred plane.
    pub plane: Plane,
    /// Every item, in element order.
    pub items: Vec<Item<D>>,
    /// Legend metadata of every property, in property order.
    pub legends: Vec<LegendEntry>,
    /// Axis pins and grid values collected from the elements.
    pub ticks: TickValues,
    /// Markup above the surface.
    pub before: Vec<Markup>,
    /// The surface's marks in paint order.
    pub marks: Vec<Mark>,
    /// Markup below (or over) the surface.
    pub after: Vec<Markup>,
    /// The surface scales with its container.
    pub responsive: bool,
    /// Pass-through attributes for the surface's root.
    pub attrs: Vec<(String, String)>,
}

/// A chart: options plus an element list.
pub struct Chart<D, M> {
    config: Config<D, M>,
    elements: Vec<Element<D>>,
}

impl<D, M> Chart<D, M> {
    /// Creates a chart.
    pub fn new(config: Config<D, M>, elements: Vec<Element<D>>) -> Self {
        Self { config, elements }
    }

    /// Creates a chart from attributes folded over the default config.
    pub fn from_attrs(
        attrs: impl IntoIterator<Item = Attribute<D, M>>,
        elements: Vec<Element<D>>,
    ) -> Self {
        Self::new(Config::new().apply(attrs), elements)
    }

    /// The chart's options.
    pub fn config(&self) -> &Config<D, M> {
        &self.config
    }

    /// The declared elements.
    pub fn elements(&self) -> &[Element<D>] {
        &self.elements
    }

    /// Renders the chart.
    pub fn render(&self) -> Rendered<D> {
        let mut counter = Counter::default();
        let resolved: Vec<Element<D>> = self
            .elements
            .iter()
            .cloned()
            .map(|e| e.resolve(&mut counter))
            .collect();

        let mut items = Vec::new();
        resolved.iter().for_each(|e| e.collect_items(&mut items));
        let mut limits = Vec::new();
        resolved.iter().for_each(|e| e.collect_limits(&mut limits));
        let plane = crate::infer::infer_plane(&self.config, &limits);

        let expanded: Vec<Element<D>> = resolved
            .into_iter()
            .map(|e| e.expand(&plane, &items, &mut counter))
            .collect();

        let mut legends = Vec::new();
        expanded.iter().for_each(|e| e.collect_legends(&mut legends));
        let mut ticks = TickValues::default();
        expanded.iter().for_each(|e| e.collect_ticks(&plane, &mut ticks));

        let mut composer = Composer {
            plane: &plane,
            items: &items,
            legends: &legends,
            ticks: &ticks,
            surface_started: false,
            before: Vec::new(),
            marks: Vec::new(),
            after: Vec::new(),
        };
        expanded.iter().for_each(|e| composer.emit(e));
        let Composer {
            before,
            marks,
            after,
            ..
        } = composer;

        tracing::debug!(
            items = items.len(),
            marks = marks.len(),
            before = before.len(),
            after = after.len(),
            "rendered chart"
        );
        Rendered {
            plane,
            items,
            legends,
            ticks,
            before,
            marks,
            after,
            responsive: self.config.responsive,
            attrs: self.config.attrs.clone(),
        }
    }

    /// Runs the event bindings matching `event` against a render of this chart.
    pub fn dispatch(&self, rendered: &Rendered<D>, event: &PointerEvent) -> Vec<M> {
        dispatch(&self.config.events, &rendered.plane, &rendered.items, event)
    }
}

impl<D, M> fmt::Debug for Chart<D, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart")
            .field("config", &self.config)
            .field("elements", &self.elements)
            .finish()
    }
}

struct Composer<'a, D> {
    plane: &'a Plane,
    items: &'a [Item<D>],
    legends: &'a [LegendEntry],
    ticks: &'a TickValues,
    surface_started: bool,
    before: Vec<Markup>,
    marks: Vec<Mark>,
    after: Vec<Markup>,
}

impl<D> Composer<'_, D> {
    fn emit(&mut self, element: &Element<D>) {
        if element.is_markup() {
            let markup = match element {
                Element::Html(f) => f(self.plane, self.items),
                Element::Legends(spec) => alloc::vec![spec.markup(self.plane, self.legends)],
                Element::Tooltip(spec) => spec.markup(self.plane).into_iter().collect(),
                _ => Vec::new(),
            };
            if self.surface_started {
                self.after.extend(markup);
            } else {
                self.before.extend(markup);
            }
            return;
        }
        if let Element::List(elements) = element {
            elements.iter().for_each(|e| self.emit(e));
            return;
        }
        self.surface_started = true;
        let plane = self.plane;
        match element {
            Element::Produced(p) => self.marks.extend(series_marks(plane, &p.series)),
            Element::AxisLine(spec) => self.marks.extend(spec.marks(plane)),
            Element::Ticks(spec) => self.marks.extend(spec.marks(plane)),
            Element::Labels(spec) => self.marks.extend(spec.marks(plane)),
            Element::Grid(spec) => self.marks.extend(spec.marks(plane, self.ticks)),
            Element::Primitive(f) => self.marks.extend(f(plane)),
            Element::WithItems(f) => self.marks.extend(f(plane, self.items)),
            // Resolved and expanded before rendering.
            Element::Series(_)
            | Element::Bars(_)
            | Element::Indexed(_)
            | Element::SubElements(_)
            | Element::List(_)
            | Element::Html(_)
            | Element::Legends(_)
            | Element::Tooltip(_) => {}
        }
    }
}
