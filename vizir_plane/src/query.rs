// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Searches over located things, and a small query language on top of them.
//!
//! Distances are measured in draw space so that "closest" matches what the user sees, whatever
//! the axis scales are.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, Vec2};

use crate::coords::Plane;
use crate::group::{Group, Grouping, group};
use crate::item::{Item, Located};

/// Distances closer than this are ties.
const TIE_EPSILON: f64 = 1e-9;

/// Which draw-space axes a distance is measured along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisFilter {
    /// Euclidean distance.
    #[default]
    Both,
    /// Horizontal distance only: "the column under the pointer".
    X,
    /// Vertical distance only.
    Y,
}

/// Draw-space distance from `pointer` to `rect`, zero inside it.
fn distance(rect: Rect, pointer: Point, axis: AxisFilter) -> f64 {
    let dx = (rect.x0 - pointer.x).max(pointer.x - rect.x1).max(0.0);
    let dy = (rect.y0 - pointer.y).max(pointer.y - rect.y1).max(0.0);
    match axis {
        AxisFilter::Both => Vec2::new(dx, dy).hypot(),
        AxisFilter::X => dx,
        AxisFilter::Y => dy,
    }
}

/// The things closest to `pointer` (draw space). Every thing at the minimum distance is
/// returned, in input order.
pub fn nearest<T: Located + Clone>(
    things: &[T],
    plane: &Plane,
    pointer: Point,
    axis: AxisFilter,
) -> Vec<T> {
    let mut best = f64::INFINITY;
    let mut out: Vec<T> = Vec::new();
    for thing in things {
        let d = distance(thing.draw_limits(plane), pointer, axis);
        if !d.is_finite() {
            continue;
        }
        if d < best - TIE_EPSILON {
            best = d;
            out.clear();
            out.push(thing.clone());
        } else if (d - best).abs() <= TIE_EPSILON {
            out.push(thing.clone());
        }
    }
    out
}

/// The things whose draw-space centre lies inside `region` (draw space, edges inclusive).
pub fn within<T: Located + Clone>(things: &[T], plane: &Plane, region: Rect) -> Vec<T> {
    let region = region.abs();
    things
        .iter()
        .filter(|t| {
            let c = t.draw_limits(plane).center();
            c.x >= region.x0 && c.x <= region.x1 && c.y >= region.y0 && c.y <= region.y1
        })
        .cloned()
        .collect()
}

/// The things no further than `radius` draw units from `pointer`.
pub fn within_radius<T: Located + Clone>(
    things: &[T],
    plane: &Plane,
    pointer: Point,
    radius: f64,
    axis: AxisFilter,
) -> Vec<T> {
    things
        .iter()
        .filter(|t| distance(t.draw_limits(plane), pointer, axis) <= radius)
        .cloned()
        .collect()
}

/// The final search step of a [`Query`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Search {
    /// Every group.
    #[default]
    All,
    /// The groups nearest to the pointer.
    Nearest(AxisFilter),
    /// The groups within a radius (draw units) of the pointer.
    Within(f64, AxisFilter),
}

/// A composable item query: filter, group, then search.
///
/// ```
/// use vizir_plane::{AxisFilter, Grouping, Query};
///
/// // The bar columns nearest to the pointer, horizontally.
/// let hover: Query<u32> = Query::items()
///     .filter(|item| item.is_bar())
///     .group_by(Grouping::Bin)
///     .nearest(AxisFilter::X);
/// # let _ = hover;
/// ```
pub struct Query<D> {
    filters: Vec<Arc<dyn Fn(&Item<D>) -> bool>>,
    real: bool,
    grouping: Option<Grouping<D>>,
    search: Search,
}

impl<D> Query<D> {
    /// All items, each in its own group.
    pub fn items() -> Self {
        Self {
            filters: Vec::new(),
            real: false,
            grouping: None,
            search: Search::All,
        }
    }

    /// Keeps only items satisfying `keep`. Filters compose.
    pub fn filter(mut self, keep: impl Fn(&Item<D>) -> bool + 'static) -> Self {
        self.filters.push(Arc::new(keep));
        self
    }

    /// Keeps only items that carry a drawable value.
    pub fn real(mut self) -> Self {
        self.real = true;
        self
    }

    /// Groups the remaining items.
    pub fn group_by(mut self, grouping: Grouping<D>) -> Self {
        self.grouping = Some(grouping);
        self
    }

    /// Keeps the groups nearest to the pointer.
    pub fn nearest(mut self, axis: AxisFilter) -> Self {
        self.search = Search::Nearest(axis);
        self
    }

    /// Keeps the groups within `radius` draw units of the pointer.
    pub fn within(mut self, radius: f64, axis: AxisFilter) -> Self {
        self.search = Search::Within(radius, axis);
        self
    }

    /// The search step.
    pub fn search(&self) -> Search {
        self.search
    }

    /// Evaluates the query. `pointer` is in draw space and ignored by [`Search::All`].
    pub fn run(&self, items: &[Item<D>], plane: &Plane, pointer: Point) -> Vec<Group<D>> {
        let kept: Vec<Item<D>> = items
            .iter()
            .filter(|i| !self.real || i.is_real())
            .filter(|i| self.filters.iter().all(|keep| keep(i)))
            .cloned()
            .collect();
        let groups = match &self.grouping {
            Some(grouping) => group(grouping, &kept),
            None => kept.into_iter().map(Group::single).collect(),
        };
        let out = match self.search {
            Search::All => groups,
            Search::Nearest(axis) => nearest(&groups, plane, pointer, axis),
            Search::Within(radius, axis) => within_radius(&groups, plane, pointer, radius, axis),
        };
        tracing::trace!(
            search = ?self.search,
            grouping = ?self.grouping,
            matched = out.len(),
            "evaluated item query"
        );
        out
    }
}

impl<D> Default for Query<D> {
    fn default() -> Self {
        Self::items()
    }
}

impl<D> Clone for Query<D> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            real: self.real,
            grouping: self.grouping.clone(),
            search: self.search,
        }
    }
}

impl<D> fmt::Debug for Query<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("filters", &self.filters.len())
            .field("real", &self.real)
            .field("grouping", &self.grouping)
            .field("search", &self.search)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::coords::{Margin, Position};
    use crate::group::GroupKind;
    use crate::item::{BarStyle, DotStyle, ItemKind};

    fn plane() -> Plane {
        // One data unit is ten draw units on both axes.
        Plane::new(100.0, 100.0, Margin::default(), (0.0, 10.0), (0.0, 10.0))
    }

    fn dot(x: f64, y: f64, row: usize) -> Item<usize> {
        Item::new(
            Arc::new(row),
            0,
            0,
            row,
            Position::from_point(x, y),
            ItemKind::Dot(DotStyle::default()),
        )
        .with_value(y)
    }

    fn bar(x1: f64, x2: f64, y: f64, row: usize) -> Item<usize> {
        Item::new(
            Arc::new(row),
            1,
            0,
            row,
            Position::new(x1, x2, 0.0, y),
            ItemKind::Bar(BarStyle::default()),
        )
    }

    #[test]
    fn nearest_returns_every_tie() {
        let things = vec![dot(4.0, 5.0, 0), dot(6.0, 5.0, 1), dot(9.0, 9.0, 2)];
        let hits = nearest(&things, &plane(), Point::new(50.0, 50.0), AxisFilter::Both);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].data_index, 0);
        assert_eq!(hits[1].data_index, 1);
    }

    #[test]
    fn nearest_measures_in_draw_space() {
        // Squash y so one data unit is one draw unit vertically.
        let plane = Plane::new(100.0, 10.0, Margin::default(), (0.0, 10.0), (0.0, 10.0));
        let things = vec![dot(5.0, 2.0, 0), dot(6.0, 5.0, 1)];
        // Pointer at data (5, 5): 3 data units away from row 0 vertically (3 draw units), one
        // data unit away from row 1 horizontally (10 draw units).
        let pointer = plane.draw_point(5.0, 5.0);
        let hits = nearest(&things, &plane, pointer, AxisFilter::Both);
        assert_eq!(hits[0].data_index, 0);
    }

    #[test]
    fn axis_filters_ignore_the_other_axis() {
        let things = vec![dot(5.0, 0.0, 0), dot(7.0, 5.0, 1)];
        let pointer = Point::new(50.0, 50.0);
        assert_eq!(nearest(&things, &plane(), pointer, AxisFilter::X)[0].data_index, 0);
        assert_eq!(nearest(&things, &plane(), pointer, AxisFilter::Y)[0].data_index, 1);
    }

    #[test]
    fn inside_a_bar_is_distance_zero() {
        let things = vec![bar(0.0, 2.0, 8.0, 0), dot(1.5, 3.0, 1)];
        let hits = nearest(&things, &plane(), Point::new(10.0, 50.0), AxisFilter::Both);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].is_bar());
    }

    #[test]
    fn within_tests_centres() {
        let things = vec![dot(1.0, 1.0, 0), dot(5.0, 5.0, 1), bar(4.0, 6.0, 2.0, 2)];
        let region = Rect::new(40.0, 40.0, 60.0, 100.0);
        let hits = within(&things, &plane(), region);
        let rows: Vec<usize> = hits.iter().map(|i| i.data_index).collect();
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn within_radius_is_inclusive() {
        let things = vec![dot(5.0, 5.0, 0), dot(7.0, 5.0, 1)];
        let hits = within_radius(&things, &plane(), Point::new(50.0, 50.0), 20.0, AxisFilter::Both);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn query_filters_groups_and_searches() {
        let items = vec![
            bar(0.5, 1.5, 3.0, 0),
            bar(0.5, 1.5, 0.0, 0),
            bar(1.5, 2.5, 4.0, 1),
            dot(2.0, 9.0, 1),
        ];
        let q = Query::items()
            .filter(|i: &Item<usize>| i.is_bar())
            .real()
            .group_by(Grouping::Bin)
            .nearest(AxisFilter::X);
        let hits = q.run(&items, &plane(), Point::new(9.0, 0.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, GroupKind::Bin);
        // The zero-height bar was dropped by `real`.
        assert_eq!(hits[0].len(), 1);

        let everything = Query::items().run(&items, &plane(), Point::ORIGIN);
        assert_eq!(everything.len(), 4);
        assert!(everything.iter().all(|g| g.kind == GroupKind::Single));
    }
}
