// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks.
//!
//! Shaping is left to the backend, so the engine only needs rough text extents: to thin out
//! overlapping tick labels and to keep tooltips inside the surface. Callers can plug in a real
//! shaper, or use [`HeuristicTextMeasurer`].

/// Rough text extents for label thinning and tooltip sizing.
pub trait TextMeasurer {
    /// Returns `(width, height)` in draw units.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// Counts characters: every glyph is 0.6em wide and a line is 1em tall.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let glyphs = text.chars().count() as f64;
        (glyphs * font_size * 0.6, font_size)
    }
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, f64) -> (f64, f64),
{
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        self(text, font_size)
    }
}
