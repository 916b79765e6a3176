// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart-level options.
//!
//! [`Config`] has documented defaults and consuming `with_*` builders. The same options are also
//! available as [`Attribute`]s, closures over a `Config`, so a caller can keep a list of options
//! and fold it onto the defaults with [`Config::apply`]; the last write to a field wins.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::coords::Margin;
use crate::events::Event;
use crate::infer::Adjust;

/// Padding is measured like a margin, in draw units, but is converted into data space.
pub type Padding = Margin;

/// One chart option as a function of the config.
pub type Attribute<D, M> = Box<dyn FnOnce(Config<D, M>) -> Config<D, M>>;

/// Chart-level options.
///
/// `D` is the row type of the chart's data and `M` the message type produced by event
/// handlers.
pub struct Config<D, M> {
    /// Surface width in draw units (default `300`).
    pub width: f64,
    /// Surface height in draw units (default `300`).
    pub height: f64,
    /// Space reserved around the drawing area for axes and labels (default none).
    pub margin: Margin,
    /// Space inside the drawing area around the data, in draw units (default none).
    pub padding: Padding,
    /// Let the surface scale to its container's width, keeping the aspect ratio.
    pub responsive: bool,
    /// Adjustments of the x interval, applied left to right.
    pub range: Vec<Adjust>,
    /// Adjustments of the y interval, applied left to right. Empty means "lowest 0 or lower".
    pub domain: Vec<Adjust>,
    /// Pointer event bindings.
    pub events: Vec<Event<D, M>>,
    /// Extra attributes copied onto the root of the rendered output.
    pub attrs: Vec<(String, String)>,
}

impl<D, M> Config<D, M> {
    /// A 300 by 300 chart with no margin, padding, adjustments, or events.
    pub fn new() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
            margin: Margin::default(),
            padding: Padding::default(),
            responsive: true,
            range: Vec::new(),
            domain: Vec::new(),
            events: Vec::new(),
            attrs: Vec::new(),
        }
    }

    /// Folds `attrs` onto this config in order.
    pub fn apply(self, attrs: impl IntoIterator<Item = Attribute<D, M>>) -> Self {
        attrs.into_iter().fold(self, |config, attr| attr(config))
    }

    /// Sets the surface size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self
    }

    /// Sets the outer margin.
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the inner padding.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Enables or disables responsive sizing.
    pub fn with_responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    /// Replaces the x adjustment pipeline.
    pub fn with_range(mut self, range: Vec<Adjust>) -> Self {
        self.range = range;
        self
    }

    /// Replaces the y adjustment pipeline.
    pub fn with_domain(mut self, domain: Vec<Adjust>) -> Self {
        self.domain = domain;
        self
    }

    /// Adds an event binding.
    pub fn with_event(mut self, event: Event<D, M>) -> Self {
        self.events.push(event);
        self
    }

    /// Adds a pass-through attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }
}

impl<D, M> Default for Config<D, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, M> fmt::Debug for Config<D, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("margin", &self.margin)
            .field("padding", &self.padding)
            .field("responsive", &self.responsive)
            .field("range", &self.range)
            .field("domain", &self.domain)
            .field("events", &self.events)
            .field("attrs", &self.attrs)
            .finish()
    }
}

/// Sets the surface width.
pub fn width<D: 'static, M: 'static>(width: f64) -> Attribute<D, M> {
    Box::new(move |c: Config<D, M>| Config {
        width: width.max(0.0),
        ..c
    })
}

/// Sets the surface height.
pub fn height<D: 'static, M: 'static>(height: f64) -> Attribute<D, M> {
    Box::new(move |c: Config<D, M>| Config {
        height: height.max(0.0),
        ..c
    })
}

/// Sets the outer margin.
pub fn margin<D: 'static, M: 'static>(margin: Margin) -> Attribute<D, M> {
    Box::new(move |c: Config<D, M>| c.with_margin(margin))
}

/// Sets the inner padding.
pub fn padding<D: 'static, M: 'static>(padding: Padding) -> Attribute<D, M> {
    Box::new(move |c: Config<D, M>| c.with_padding(padding))
}

/// Turns off responsive sizing.
pub fn static_size<D: 'static, M: 'static>() -> Attribute<D, M> {
    Box::new(|c: Config<D, M>| c.with_responsive(false))
}

/// Appends steps to the x adjustment pipeline.
pub fn range<D: 'static, M: 'static>(steps: Vec<Adjust>) -> Attribute<D, M> {
    Box::new(move |mut c: Config<D, M>| {
        c.range.extend(steps);
        c
    })
}

/// Appends steps to the y adjustment pipeline.
pub fn domain<D: 'static, M: 'static>(steps: Vec<Adjust>) -> Attribute<D, M> {
    Box::new(move |mut c: Config<D, M>| {
        c.domain.extend(steps);
        c
    })
}

/// Adds an event binding.
pub fn event<D: 'static, M: 'static>(event: Event<D, M>) -> Attribute<D, M> {
    Box::new(move |c: Config<D, M>| c.with_event(event))
}

/// Adds a pass-through attribute.
pub fn attr<D: 'static, M: 'static>(key: &str, value: &str) -> Attribute<D, M> {
    let (key, value) = (String::from(key), String::from(value));
    Box::new(move |c: Config<D, M>| c.with_attr(key, value))
}
