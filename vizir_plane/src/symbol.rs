// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dot shapes.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Circle, Shape};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// The shape drawn for a dot item.
///
/// `size` is the symbol's area in square draw units, so different shapes at the same size carry
/// roughly the same visual weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A circle.
    #[default]
    Circle,
    /// An upward-pointing triangle.
    Triangle,
    /// An axis-aligned square.
    Square,
    /// A square rotated by 45 degrees.
    Diamond,
    /// A plus sign.
    Plus,
    /// A plus sign rotated by 45 degrees.
    Cross,
}

impl Symbol {
    /// Returns a path for this symbol centred at `cx, cy` with the given area.
    pub fn path(self, cx: f64, cy: f64, size: f64) -> BezPath {
        let size = size.max(0.0);
        match self {
            Self::Circle => circle_path(cx, cy, radius_for_area(size)),
            Self::Square => {
                let half = 0.5 * sqrt(size);
                polygon(&[
                    (cx - half, cy - half),
                    (cx + half, cy - half),
                    (cx + half, cy + half),
                    (cx - half, cy + half),
                ])
            }
            Self::Diamond => {
                let r = sqrt(size / 2.0);
                polygon(&[(cx, cy - r), (cx + r, cy), (cx, cy + r), (cx - r, cy)])
            }
            Self::Triangle => {
                // Equilateral: area = sqrt(3) / 4 * side^2.
                let side = sqrt(4.0 * size / SQRT_3);
                let h = side * SQRT_3 / 2.0;
                polygon(&[
                    (cx, cy - 2.0 * h / 3.0),
                    (cx + side / 2.0, cy + h / 3.0),
                    (cx - side / 2.0, cy + h / 3.0),
                ])
            }
            Self::Plus => plus_path(cx, cy, size, false),
            Self::Cross => plus_path(cx, cy, size, true),
        }
    }

    /// Radius of the circle enclosing the symbol at the given area.
    ///
    /// Used for hit-testing and highlight halos.
    pub fn outer_radius(self, size: f64) -> f64 {
        let size = size.max(0.0);
        match self {
            Self::Circle => radius_for_area(size),
            Self::Square | Self::Diamond => sqrt(size / 2.0),
            Self::Triangle => sqrt(4.0 * size / SQRT_3) / SQRT_3,
            Self::Plus | Self::Cross => sqrt(size / 2.0),
        }
    }
}

const SQRT_3: f64 = 1.732_050_807_568_877_2;

fn sqrt(v: f64) -> f64 {
    v.max(0.0).sqrt()
}

fn radius_for_area(area: f64) -> f64 {
    sqrt(area / core::f64::consts::PI)
}

fn circle_path(cx: f64, cy: f64, r: f64) -> BezPath {
    let circle = Circle::new((cx, cy), r);
    // Screen-space tolerance; a tenth of a draw unit is invisible at typical sizes.
    let tolerance = 0.1;
    circle.path_elements(tolerance).collect()
}

fn polygon(points: &[(f64, f64)]) -> BezPath {
    let mut p = BezPath::new();
    let mut iter = points.iter().copied();
    if let Some(first) = iter.next() {
        p.move_to(first);
        for pt in iter {
            p.line_to(pt);
        }
        p.close_path();
    }
    p
}

/// A plus made of five equal squares (area `size`), optionally rotated into an "x".
fn plus_path(cx: f64, cy: f64, size: f64, rotated: bool) -> BezPath {
    let a = sqrt(size / 5.0) / 2.0;
    let b = 3.0 * a;
    let outline = [
        (-a, -b),
        (a, -b),
        (a, -a),
        (b, -a),
        (b, a),
        (a, a),
        (a, b),
        (-a, b),
        (-a, a),
        (-b, a),
        (-b, -a),
        (-a, -a),
    ];
    let (sin, cos) = if rotated {
        (core::f64::consts::FRAC_1_SQRT_2, core::f64::consts::FRAC_1_SQRT_2)
    } else {
        (0.0, 1.0)
    };
    let points: Vec<(f64, f64)> = outline
        .iter()
        .map(|&(x, y)| (cx + x * cos - y * sin, cy + x * sin + y * cos))
        .collect();
    polygon(&points)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn symbols_are_centred() {
        for symbol in [
            Symbol::Circle,
            Symbol::Square,
            Symbol::Diamond,
            Symbol::Plus,
            Symbol::Cross,
        ] {
            let b = symbol.path(10.0, 20.0, 36.0).bounding_box();
            let c = b.center();
            assert!((c.x - 10.0).abs() < 1e-6, "{symbol:?} {b:?}");
            assert!((c.y - 20.0).abs() < 1e-6, "{symbol:?} {b:?}");
        }
    }

    #[test]
    fn square_area_matches_size() {
        let b = Symbol::Square.path(0.0, 0.0, 16.0).bounding_box();
        assert!((b.area() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn enclosing_radius_covers_the_shape() {
        for symbol in [Symbol::Triangle, Symbol::Square, Symbol::Diamond, Symbol::Plus] {
            let r = symbol.outer_radius(50.0);
            let b = symbol.path(0.0, 0.0, 50.0).bounding_box();
            for corner in [b.x0.abs(), b.x1.abs(), b.y0.abs(), b.y1.abs()] {
                assert!(corner <= r + 1e-9, "{symbol:?} {corner} > {r}");
            }
        }
    }
}
