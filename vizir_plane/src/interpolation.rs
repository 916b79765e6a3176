// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curves through draw-space points.
//!
//! Each function works on one contiguous run; callers split series at gaps first so a line is
//! never drawn across a missing value.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point};

/// How consecutive points are connected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Method {
    /// Straight segments.
    #[default]
    Linear,
    /// A monotone cubic: smooth, with no overshoot past the data between two points.
    Monotone,
    /// Horizontal steps changing halfway between points.
    Stepped,
}

/// The line through `points`. Fewer than two points give an empty path.
pub fn line_path(method: Method, points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if points.len() < 2 {
        return path;
    }
    trace(&mut path, method, points, true);
    path
}

/// The closed area between `top` (left to right) and `bottom` (same order).
///
/// Empty when `top` has fewer than two points. `bottom` usually holds the same x positions at
/// the stack base.
pub fn area_path(method: Method, top: &[Point], bottom: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if top.len() < 2 {
        return path;
    }
    trace(&mut path, method, top, true);
    let reversed: Vec<Point> = bottom.iter().rev().copied().collect();
    if !reversed.is_empty() {
        trace(&mut path, method, &reversed, false);
    }
    path.close_path();
    path
}

fn trace(path: &mut BezPath, method: Method, points: &[Point], start: bool) {
    let Some(&first) = points.first() else {
        return;
    };
    if start {
        path.move_to(first);
    } else {
        path.line_to(first);
    }
    // A monotone cubic needs two points to take a secant from.
    let method = if points.len() < 2 { Method::Linear } else { method };
    match method {
        Method::Linear => {
            for &p in &points[1..] {
                path.line_to(p);
            }
        }
        Method::Stepped => {
            for w in points.windows(2) {
                let mid = w[0].x + (w[1].x - w[0].x) / 2.0;
                path.line_to((mid, w[0].y));
                path.line_to((mid, w[1].y));
                path.line_to(w[1]);
            }
        }
        Method::Monotone => {
            let tangents = monotone_tangents(points);
            for (i, w) in points.windows(2).enumerate() {
                let dx = (w[1].x - w[0].x) / 3.0;
                path.curve_to(
                    Point::new(w[0].x + dx, w[0].y + tangents[i] * dx),
                    Point::new(w[1].x - dx, w[1].y - tangents[i + 1] * dx),
                    w[1],
                );
            }
        }
    }
}

/// Fritsch-Carlson tangents: zero at local extrema, limited elsewhere so the cubic between two
/// points stays between their y values.
fn monotone_tangents(points: &[Point]) -> Vec<f64> {
    let secants: Vec<f64> = points
        .windows(2)
        .map(|w| {
            let dx = w[1].x - w[0].x;
            if dx == 0.0 { 0.0 } else { (w[1].y - w[0].y) / dx }
        })
        .collect();
    let n = points.len();
    let mut tangents = alloc::vec![0.0; n];
    tangents[0] = secants[0];
    tangents[n - 1] = secants[n - 2];
    for i in 1..n - 1 {
        let (s0, s1) = (secants[i - 1], secants[i]);
        if s0 * s1 <= 0.0 {
            continue;
        }
        let h0 = points[i].x - points[i - 1].x;
        let h1 = points[i + 1].x - points[i].x;
        let p = if h0 + h1 == 0.0 {
            0.0
        } else {
            (s0 * h1 + s1 * h0) / (h0 + h1)
        };
        let limit = s0.abs().min(s1.abs()).min(0.5 * p.abs());
        tangents[i] = s0.signum() * 2.0 * limit;
    }
    tangents
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::{PathEl, Shape};

    use super::*;

    fn pts(v: &[(f64, f64)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn short_runs_draw_nothing() {
        assert!(line_path(Method::Linear, &pts(&[(1.0, 1.0)])).elements().is_empty());
        assert!(area_path(Method::Linear, &[], &[]).elements().is_empty());
    }

    #[test]
    fn linear_visits_every_point() {
        let p = line_path(Method::Linear, &pts(&[(0.0, 0.0), (1.0, 2.0), (2.0, 1.0)]));
        assert_eq!(p.elements().len(), 3);
        assert_eq!(p.elements()[2], PathEl::LineTo(Point::new(2.0, 1.0)));
    }

    #[test]
    fn monotone_does_not_overshoot() {
        let points = pts(&[(0.0, 0.0), (1.0, 10.0), (2.0, 10.0), (3.0, 0.0)]);
        let b = line_path(Method::Monotone, &points).bounding_box();
        assert!(b.y0 >= -1e-9 && b.y1 <= 10.0 + 1e-9, "{b:?}");
    }

    #[test]
    fn stepped_changes_at_midpoints() {
        let p = line_path(Method::Stepped, &pts(&[(0.0, 0.0), (2.0, 4.0)]));
        assert_eq!(
            p.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(1.0, 0.0)),
                PathEl::LineTo(Point::new(1.0, 4.0)),
                PathEl::LineTo(Point::new(2.0, 4.0)),
            ]
        );
    }

    #[test]
    fn area_encloses_top_and_bottom() {
        let top = pts(&[(0.0, 1.0), (4.0, 3.0)]);
        let bottom = pts(&[(0.0, 10.0), (4.0, 10.0)]);
        let area = area_path(Method::Linear, &top, &bottom);
        let b = area.bounding_box();
        assert_eq!((b.x0, b.y0, b.x1, b.y1), (0.0, 1.0, 4.0, 10.0));
        assert_eq!(area.elements().last(), Some(&PathEl::ClosePath));
    }

    #[test]
    fn monotone_area_over_a_single_base_point() {
        let top = pts(&[(0.0, 1.0), (4.0, 3.0)]);
        let bottom = pts(&[(2.0, 10.0)]);
        let area = area_path(Method::Monotone, &top, &bottom);
        assert_eq!(
            &area.elements()[2..],
            &[PathEl::LineTo(Point::new(2.0, 10.0)), PathEl::ClosePath]
        );
    }

    #[test]
    fn monotone_curves_end_on_the_points() {
        let points = pts(&[(0.0, 0.0), (1.0, 2.0), (3.0, 1.0)]);
        let p = line_path(Method::Monotone, &points);
        assert_eq!(p.elements().len(), 3);
        for (el, want) in p.elements()[1..].iter().zip(&points[1..]) {
            assert!(matches!(el, PathEl::CurveTo(_, _, end) if end == want), "{el:?}");
        }
    }
}
