// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup placed around the drawing surface.
//!
//! Legends, tooltips, and custom HTML elements are not vector primitives: they become a small
//! tree of [`Markup`] nodes that a backend serializes next to the surface. Positions inside
//! markup are percentages of the surface size so they follow a responsive surface.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;

use crate::coords::Plane;
use crate::mark::Mark;

/// A markup tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Markup {
    /// An element node.
    Node(Node),
    /// Plain text (escaped by the backend).
    Text(String),
    /// An inline vector graphic.
    Graphic {
        /// Width in draw units.
        width: f64,
        /// Height in draw units.
        height: f64,
        /// Marks in the graphic's own coordinates.
        marks: Vec<Mark>,
    },
}

impl Markup {
    /// A text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// An inline graphic.
    pub fn graphic(width: f64, height: f64, marks: Vec<Mark>) -> Self {
        Self::Graphic {
            width,
            height,
            marks,
        }
    }

    /// The concatenated text of this tree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Self::Node(node) => node.children.iter().for_each(|c| c.push_text(out)),
            Self::Text(text) => out.push_str(text),
            Self::Graphic { .. } => {}
        }
    }
}

impl From<Node> for Markup {
    fn from(value: Node) -> Self {
        Self::Node(value)
    }
}

/// An element node: a tag with attributes, inline style, and children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    /// Tag name, like `div`.
    pub tag: String,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
    /// Inline style declarations in insertion order.
    pub style: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<Markup>,
}

impl Node {
    /// An empty node.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    /// Adds a style declaration.
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.push((key.into(), value.into()));
        self
    }

    /// Appends a child.
    pub fn with_child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        self.children.extend(children);
        self
    }

    /// Positions this node absolutely at a draw-space point of `plane`'s surface.
    pub fn at(self, plane: &Plane, x: f64, y: f64) -> Self {
        self.with_style("position", "absolute")
            .with_style("left", percent(x, plane.width))
            .with_style("top", percent(y, plane.height))
    }

    /// The value of a style declaration, if set (the last one wins).
    pub fn style_value(&self, key: &str) -> Option<&str> {
        self.style
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn percent(value: f64, total: f64) -> String {
    if total > 0.0 {
        alloc::format!("{:.3}%", 100.0 * value / total)
    } else {
        String::from("0%")
    }
}

/// A CSS colour: `#rrggbb`, or `rgba(...)` when translucent.
pub fn css_color(color: Color) -> String {
    let c = color.to_rgba8();
    if c.a == 255 {
        alloc::format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    } else {
        alloc::format!(
            "rgba({},{},{},{:.3})",
            c.r,
            c.g,
            c.b,
            f64::from(c.a) / 255.0
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::coords::Margin;

    #[test]
    fn text_content_skips_graphics() {
        let m: Markup = Node::new("div")
            .with_child(Markup::text("a"))
            .with_child(Markup::graphic(10.0, 10.0, Vec::new()))
            .with_child(Node::new("span").with_child(Markup::text("b")))
            .into();
        assert_eq!(m.text_content(), "ab");
    }

    #[test]
    fn positions_are_relative_to_the_surface() {
        let plane = Plane::new(200.0, 100.0, Margin::default(), (0.0, 1.0), (0.0, 1.0));
        let node = Node::new("div").at(&plane, 50.0, 25.0);
        assert_eq!(node.style_value("left"), Some("25.000%"));
        assert_eq!(node.style_value("top"), Some("25.000%"));
        assert_eq!(node.style_value("position"), Some("absolute"));
    }

    #[test]
    fn colours() {
        assert_eq!(css_color(Color::from_rgb8(0x7b, 0x4d, 0xff)), "#7b4dff");
        assert_eq!(
            css_color(Color::from_rgba8(0, 0, 0, 0)),
            "rgba(0,0,0,0.000)"
        );
    }
}
