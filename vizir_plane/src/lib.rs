// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A declarative Cartesian chart engine.
//!
//! A chart is a [`Config`] plus a list of [`Element`]s. Rendering is one synchronous pass:
//! - series and bar declarations are turned into [`Item`]s, each carrying its datum, its
//!   data-space envelope, and its indices in the chart,
//! - a [`Plane`] is inferred from the item envelopes and the configured adjustments,
//! - every element is drawn against that plane into backend-neutral [`Mark`]s, with legends,
//!   tooltips, and custom markup returned separately as [`Markup`].
//!
//! Axes, ticks, and grids use "nice" values ([`floats`], [`ints`], [`times`]), and pointer
//! events are resolved against the rendered items with composable [`Query`]s.
//!
//! Serialization is out of scope here; see `vizir_plane_svg` for an SVG and HTML backend.
//!
//! ```
//! use vizir_plane::{BarsConfig, Chart, Config, Element, Property};
//!
//! let chart: Chart<(f64, f64), ()> = Chart::new(
//!     Config::new().with_size(400.0, 200.0),
//!     vec![Element::bars(
//!         BarsConfig::new(),
//!         vec![Property::stacked([
//!             Property::bar(|d: &(f64, f64)| Some(d.0)).with_name("a"),
//!             Property::bar(|d: &(f64, f64)| Some(d.1)).with_name("b"),
//!         ])],
//!         [(1.0, 2.0), (3.0, 4.0)],
//!     )],
//! );
//! let rendered = chart.render();
//! assert_eq!(rendered.items.len(), 4);
//! assert_eq!(rendered.plane.y.max, 7.0);
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
mod chart;
mod config;
mod coords;
mod element;
mod events;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod group;
mod infer;
mod interpolation;
mod intervals;
mod item;
mod legend;
mod mark;
mod markup;
mod measure;
mod produce;
mod property;
mod query;
#[cfg(test)]
mod series_tests;
mod symbol;
mod time;
mod tooltip;

pub use axis::{
    AxisLineSpec, Dimension, GridSpec, LabelsSpec, Pinned, Tick, TickValues, TicksSpec, Values,
};
pub use chart::{Chart, Rendered};
pub use config::{Attribute, Config, Padding};
pub use coords::{
    Axis, Margin, Plane, Position, place, scale_data_x, scale_data_y, scale_draw_x,
    scale_draw_y, to_data_x, to_data_y, to_draw_x, to_draw_y,
};
pub use element::{
    BarsSpec, Element, HtmlFn, IndexedFn, ItemMarksFn, MarksFn, Produced, SeriesSpec,
    SubElementsFn, series_marks,
};
pub use events::{Event, Hit, PointerEvent, PointerKind, dispatch};
pub use format::{format_float, format_tick_with_step, format_time};
pub use group::{Group, GroupKind, Grouping, group};
pub use infer::{Adjust, DEGENERATE_WIDENING, Edit, default_domain, infer_plane};
pub use interpolation::{Method, area_path, line_path};
pub use intervals::{float_step, floats, ints, ints_f64};
pub use item::{BarStyle, DotStyle, Item, ItemKind, Located, PALETTE, default_color};
pub use legend::LegendsSpec;
pub use mark::{Mark, PathMark, RectMark, StrokeStyle, TextAnchor, TextBaseline, TextMark};
pub use markup::{Markup, Node, css_color};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use produce::{
    BarsConfig, LegendEntry, LegendKind, Series, XFn, bins, produce_bars, produce_dots,
};
pub use property::{LineStyle, Part, Property, Variation, VariationFn};
pub use query::{AxisFilter, Query, Search, nearest, within, within_radius};
pub use symbol::Symbol;
pub use time::{TimeTick, TimeUnit, interval, times};
pub use tooltip::{Direction, Placement, TooltipSpec};

/// Chart options as [`Attribute`]s, to be folded onto a [`Config`] with [`Config::apply`].
pub mod attributes {
    pub use crate::config::{
        attr, domain, event, height, margin, padding, range, static_size, width,
    };
}
