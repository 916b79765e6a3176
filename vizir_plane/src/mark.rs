// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderable primitives.
//!
//! A render pass produces a flat, ordered list of [`Mark`]s in draw space. Backends (see
//! `vizir_plane_svg`) paint them in list order; there is no z-index.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, BezPath, Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use smallvec::SmallVec;

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The text starts at the anchor point.
    #[default]
    Start,
    /// The text is centred on the anchor point.
    Middle,
    /// The text ends at the anchor point.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The anchor point is the vertical middle of the text.
    #[default]
    Middle,
    /// The anchor point is on the alphabetic baseline.
    Alphabetic,
    /// The anchor point is at the top of the text.
    Hanging,
}

/// A paint + width pair for stroked paths (axis lines, ticks, gridlines, series lines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in draw units.
    pub stroke_width: f64,
    /// Dash pattern in draw units; empty for a solid stroke.
    pub dash: SmallVec<[f64; 4]>,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
            dash: SmallVec::new(),
        }
    }

    /// Sets a dash pattern.
    pub fn with_dash(mut self, dash: &[f64]) -> Self {
        self.dash = dash.iter().copied().collect();
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// A filled rectangle, optionally stroked, with independently rounded top and bottom corners.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Rectangle geometry in draw space.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Optional outline.
    pub stroke: Option<StrokeStyle>,
    /// Corner radius of the two top corners.
    pub round_top: f64,
    /// Corner radius of the two bottom corners.
    pub round_bottom: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl RectMark {
    /// Creates a rectangle with the default fill.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            fill: Brush::default(),
            stroke: None,
            round_top: 0.0,
            round_bottom: 0.0,
            opacity: 1.0,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the outline.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets corner radii for the top and bottom corners.
    pub fn with_rounding(mut self, top: f64, bottom: f64) -> Self {
        self.round_top = top.max(0.0);
        self.round_bottom = bottom.max(0.0);
        self
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// The outline as a path, honouring rounded corners.
    pub fn path(&self) -> BezPath {
        let r = self.rect.abs();
        let half = 0.5 * r.width().min(r.height());
        let top = self.round_top.min(half);
        let bottom = self.round_bottom.min(half);
        let mut p = BezPath::new();
        p.move_to((r.x0, r.y0 + top));
        if top > 0.0 {
            p.quad_to((r.x0, r.y0), (r.x0 + top, r.y0));
            p.line_to((r.x1 - top, r.y0));
            p.quad_to((r.x1, r.y0), (r.x1, r.y0 + top));
        } else {
            p.line_to((r.x1, r.y0));
        }
        p.line_to((r.x1, r.y1 - bottom));
        if bottom > 0.0 {
            p.quad_to((r.x1, r.y1), (r.x1 - bottom, r.y1));
            p.line_to((r.x0 + bottom, r.y1));
            p.quad_to((r.x0, r.y1), (r.x0, r.y1 - bottom));
        } else {
            p.line_to((r.x0, r.y1));
        }
        p.close_path();
        p
    }
}

/// A path, filled and/or stroked.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Geometry in draw space.
    pub path: BezPath,
    /// Fill paint; `None` leaves the path unfilled.
    pub fill: Option<Brush>,
    /// Stroke; `None` leaves the path unstroked.
    pub stroke: Option<StrokeStyle>,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl PathMark {
    /// Creates an unpainted path.
    pub fn new(path: BezPath) -> Self {
        Self {
            path,
            fill: None,
            stroke: None,
            opacity: 1.0,
        }
    }

    /// A straight line segment (a "rule").
    pub fn rule(from: impl Into<Point>, to: impl Into<Point>, stroke: StrokeStyle) -> Self {
        let mut p = BezPath::new();
        p.move_to(from.into());
        p.line_to(to.into());
        Self::new(p).with_stroke(stroke)
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Sets the stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

/// An unshaped text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position in draw space.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in draw units.
    pub font_size: f64,
    /// Rotation around `pos`, in degrees.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

impl TextMark {
    /// Creates a text mark with default styling.
    pub fn new(pos: impl Into<Point>, text: impl Into<String>) -> Self {
        Self {
            pos: pos.into(),
            text: text.into(),
            font_size: 12.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: css::BLACK.into(),
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the text anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the text baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the rotation angle (degrees).
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}

/// A primitive ready to paint.
#[derive(Clone, Debug, PartialEq)]
pub enum Mark {
    /// A rectangle.
    Rect(RectMark),
    /// A path.
    Path(PathMark),
    /// A text run.
    Text(TextMark),
    /// Child marks under a transform, optionally clipped (clip in the group's own space).
    Group {
        /// Transform applied to the children.
        transform: Affine,
        /// Optional clip rectangle.
        clip: Option<Rect>,
        /// Children in paint order.
        children: Vec<Mark>,
    },
}

impl Mark {
    /// Wraps `children` in a translated group.
    pub fn translated(transform: Affine, children: Vec<Self>) -> Self {
        Self::Group {
            transform,
            clip: None,
            children,
        }
    }

    /// Approximate draw-space bounds (text is not measured).
    pub fn bounds(&self) -> Option<Rect> {
        use kurbo::Shape;
        match self {
            Self::Rect(r) => Some(r.rect.abs()),
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Text(t) => Some(Rect::from_points(t.pos, t.pos)),
            Self::Group {
                transform,
                children,
                ..
            } => children
                .iter()
                .filter_map(Self::bounds)
                .map(|b| transform.transform_rect_bbox(b))
                .reduce(|a, b| a.union(b)),
        }
    }
}

impl From<RectMark> for Mark {
    fn from(value: RectMark) -> Self {
        Self::Rect(value)
    }
}

impl From<PathMark> for Mark {
    fn from(value: PathMark) -> Self {
        Self::Path(value)
    }
}

impl From<TextMark> for Mark {
    fn from(value: TextMark) -> Self {
        Self::Text(value)
    }
}
