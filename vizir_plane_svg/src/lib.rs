// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG and HTML output for rendered `vizir_plane` charts.
//!
//! [`to_svg`] serializes the drawing surface of a [`Rendered`] chart. [`to_html`] wraps it in a
//! relatively positioned container together with the markup (legends, tooltips, custom HTML)
//! rendered before and after it, so absolutely positioned markup lands on the surface.

use kurbo::{Affine, Rect};
use peniko::Brush;
use vizir_plane::{
    Mark, Markup, Node, PathMark, RectMark, Rendered, StrokeStyle, TextAnchor, TextBaseline,
    TextMark,
};

/// Serializes the drawing surface.
///
/// A responsive chart gets `width="100%"` and keeps its aspect ratio through the `viewBox`;
/// otherwise the surface has a fixed size. Pass-through attributes go on the root element.
pub fn to_svg<D>(rendered: &Rendered<D>) -> String {
    let plane = &rendered.plane;
    let mut writer = SvgWriter::default();
    writer.open_root(plane.width, plane.height, rendered.responsive, &rendered.attrs);
    for mark in &rendered.marks {
        writer.mark(mark);
    }
    writer.out.push_str("</svg>\n");
    tracing::debug!(
        marks = rendered.marks.len(),
        bytes = writer.out.len(),
        "serialized svg"
    );
    writer.out
}

/// Serializes the whole chart: markup before the surface, the surface, then markup after it.
pub fn to_html<D>(rendered: &Rendered<D>) -> String {
    let mut out = String::new();
    let style = if rendered.responsive {
        "position:relative;width:100%"
    } else {
        "position:relative"
    };
    out.push_str(&format!(r#"<div class="vizir-chart" style="{style}">"#));
    out.push('\n');
    for markup in &rendered.before {
        write_markup(&mut out, markup);
    }
    out.push_str(&to_svg(rendered));
    for markup in &rendered.after {
        write_markup(&mut out, markup);
    }
    out.push_str("</div>\n");
    out
}

/// Serializes a markup tree as HTML.
pub fn markup_to_html(markup: &Markup) -> String {
    let mut out = String::new();
    write_markup(&mut out, markup);
    out
}

fn write_markup(out: &mut String, markup: &Markup) {
    match markup {
        Markup::Node(node) => write_node(out, node),
        Markup::Text(text) => out.push_str(&escape_xml(text)),
        Markup::Graphic {
            width,
            height,
            marks,
        } => {
            let mut writer = SvgWriter::default();
            writer.open_root(*width, *height, false, &[]);
            for mark in marks {
                writer.mark(mark);
            }
            writer.out.push_str("</svg>");
            out.push_str(&writer.out);
        }
    }
}

fn write_node(out: &mut String, node: &Node) {
    out.push('<');
    out.push_str(&node.tag);
    for (key, value) in &node.attrs {
        write_attr(out, key, value);
    }
    if !node.style.is_empty() {
        let style: Vec<String> = node.style.iter().map(|(k, v)| format!("{k}:{v}")).collect();
        out.push_str(&format!(r#" style="{}""#, escape_xml(&style.join(";"))));
    }
    out.push('>');
    for child in &node.children {
        write_markup(out, child);
    }
    out.push_str(&format!("</{}>", node.tag));
}

#[derive(Debug, Default)]
struct SvgWriter {
    out: String,
    next_clip: usize,
}

impl SvgWriter {
    fn open_root(
        &mut self,
        width: f64,
        height: f64,
        responsive: bool,
        attrs: &[(String, String)],
    ) {
        self.out
            .push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        self.out
            .push_str(&format!(r#"viewBox="0 0 {width} {height}""#));
        if responsive {
            self.out.push_str(r#" width="100%" style="display:block""#);
        } else {
            self.out
                .push_str(&format!(r#" width="{width}" height="{height}""#));
        }
        for (key, value) in attrs {
            write_attr(&mut self.out, key, value);
        }
        self.out.push_str(">\n");
    }

    fn mark(&mut self, mark: &Mark) {
        match mark {
            Mark::Rect(r) => self.rect(r),
            Mark::Path(p) => self.path(p),
            Mark::Text(t) => self.text(t),
            Mark::Group {
                transform,
                clip,
                children,
            } => {
                let clip_id = clip.map(|rect| self.clip_path(rect));
                self.out.push_str("<g");
                if *transform != Affine::IDENTITY {
                    let [a, b, c, d, e, f] = transform.as_coeffs();
                    self.out
                        .push_str(&format!(r#" transform="matrix({a} {b} {c} {d} {e} {f})""#));
                }
                if let Some(id) = clip_id {
                    self.out.push_str(&format!(r#" clip-path="url(#{id})""#));
                }
                self.out.push_str(">\n");
                for child in children {
                    self.mark(child);
                }
                self.out.push_str("</g>\n");
            }
        }
    }

    fn clip_path(&mut self, rect: Rect) -> String {
        let id = format!("vizir-clip-{}", self.next_clip);
        self.next_clip += 1;
        let r = rect.abs();
        self.out.push_str(&format!(
            r#"<clipPath id="{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
            r.x0,
            r.y0,
            r.width(),
            r.height()
        ));
        self.out.push('\n');
        id
    }

    fn rect(&mut self, r: &RectMark) {
        if r.round_top > 0.0 || r.round_bottom > 0.0 {
            // Top and bottom corners differ, which `rx` cannot express.
            self.out
                .push_str(&format!(r#"<path d="{}""#, r.path().to_svg()));
        } else {
            let rect = r.rect.abs();
            self.out.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                rect.x0,
                rect.y0,
                rect.width(),
                rect.height(),
            ));
        }
        write_paint_attr(&mut self.out, "fill", &r.fill);
        if let Some(stroke) = &r.stroke {
            write_stroke(&mut self.out, stroke);
        }
        write_opacity(&mut self.out, r.opacity);
        self.out.push_str("/>\n");
    }

    fn path(&mut self, p: &PathMark) {
        self.out
            .push_str(&format!(r#"<path d="{}""#, p.path.to_svg()));
        match &p.fill {
            Some(fill) => write_paint_attr(&mut self.out, "fill", fill),
            None => self.out.push_str(r#" fill="none""#),
        }
        if let Some(stroke) = &p.stroke {
            write_stroke(&mut self.out, stroke);
        }
        write_opacity(&mut self.out, p.opacity);
        self.out.push_str("/>\n");
    }

    fn text(&mut self, t: &TextMark) {
        let baseline = match t.baseline {
            TextBaseline::Middle => "middle",
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Hanging => "hanging",
        };
        self.out.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
            t.pos.x, t.pos.y, t.font_size, baseline
        ));
        if t.angle != 0.0 {
            self.out.push_str(&format!(
                r#" transform="rotate({} {} {})""#,
                t.angle, t.pos.x, t.pos.y
            ));
        }
        self.out.push_str(match t.anchor {
            TextAnchor::Start => r#" text-anchor="start""#,
            TextAnchor::Middle => r#" text-anchor="middle""#,
            TextAnchor::End => r#" text-anchor="end""#,
        });
        write_paint_attr(&mut self.out, "fill", &t.fill);
        self.out.push('>');
        self.out.push_str(&escape_xml(&t.text));
        self.out.push_str("</text>\n");
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn write_stroke(out: &mut String, stroke: &StrokeStyle) {
    if stroke.stroke_width <= 0.0 {
        return;
    }
    write_paint_attr(out, "stroke", &stroke.brush);
    out.push_str(&format!(r#" stroke-width="{}""#, stroke.stroke_width));
    if !stroke.dash.is_empty() {
        let dash: Vec<String> = stroke.dash.iter().map(f64::to_string).collect();
        out.push_str(&format!(r#" stroke-dasharray="{}""#, dash.join(" ")));
    }
}

fn write_opacity(out: &mut String, opacity: f64) {
    if opacity < 1.0 {
        out.push_str(&format!(r#" opacity="{opacity}""#));
    }
}

/// Writes ` key="value"`, dropping keys that are not XML names.
fn write_attr(out: &mut String, key: &str, value: &str) {
    if !is_xml_name(key) {
        tracing::debug!(key, "skipped attribute with an invalid name");
        return;
    }
    out.push_str(&format!(r#" {key}="{}""#, escape_xml(value)));
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == ':')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | ':'))
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
