// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer event bindings.
//!
//! An [`Event`] pairs a pointer event kind with a [`Query`] and a handler turning the query's
//! result into a caller message. The engine does no debouncing; a host calls
//! [`dispatch`] (or `Chart::dispatch`) for every pointer event it wants handled.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};

use crate::coords::Plane;
use crate::group::Group;
use crate::item::Item;
use crate::query::Query;

/// Kinds of pointer input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// The pointer moved over the chart.
    Move,
    /// The pointer left the chart.
    Leave,
    /// A click.
    Click,
    /// A button was pressed.
    Down,
    /// A button was released.
    Up,
}

/// One pointer event as the host sees it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Pointer position in the host's coordinates (for example, page coordinates).
    pub position: Point,
    /// The chart container's bounds in the same coordinates, or `None` when it has not been
    /// measured yet.
    pub container: Option<Rect>,
}

impl PointerEvent {
    /// Creates an event over a measured container.
    pub fn new(kind: PointerKind, position: impl Into<Point>, container: Rect) -> Self {
        Self {
            kind,
            position: position.into(),
            container: Some(container),
        }
    }

    /// Converts the position into draw space, undoing the container's offset and any
    /// responsive scaling. `None` when the container is unmeasured or empty.
    pub fn draw_position(&self, plane: &Plane) -> Option<Point> {
        let container = self.container?;
        let (w, h) = (container.width(), container.height());
        if !(w > 0.0 && h > 0.0) {
            return None;
        }
        Some(Point::new(
            (self.position.x - container.x0) * plane.width / w,
            (self.position.y - container.y0) * plane.height / h,
        ))
    }
}

/// What a handler is told about a pointer event.
#[derive(Debug)]
pub struct Hit<D> {
    /// Groups matched by the binding's query; empty when nothing matched.
    pub groups: Vec<Group<D>>,
    /// Pointer position in draw space, if it could be resolved.
    pub pointer: Option<Point>,
    /// Pointer position in data space, if it could be resolved.
    pub coords: Option<Point>,
}

impl<D> Hit<D> {
    /// All matched items, flattened.
    pub fn items(&self) -> impl Iterator<Item = &Item<D>> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }
}

/// A pointer binding.
pub struct Event<D, M> {
    kind: PointerKind,
    query: Query<D>,
    handler: Arc<dyn Fn(Hit<D>) -> M>,
}

impl<D, M> Event<D, M> {
    /// Runs `query` on every pointer move and hands the result to `handler`.
    pub fn on_pointer_move(query: Query<D>, handler: impl Fn(Hit<D>) -> M + 'static) -> Self {
        Self::on(PointerKind::Move, query, handler)
    }

    /// Runs `query` on every click.
    pub fn on_click(query: Query<D>, handler: impl Fn(Hit<D>) -> M + 'static) -> Self {
        Self::on(PointerKind::Click, query, handler)
    }

    /// Runs `query` on every button press.
    pub fn on_pointer_down(query: Query<D>, handler: impl Fn(Hit<D>) -> M + 'static) -> Self {
        Self::on(PointerKind::Down, query, handler)
    }

    /// Runs `query` on every button release.
    pub fn on_pointer_up(query: Query<D>, handler: impl Fn(Hit<D>) -> M + 'static) -> Self {
        Self::on(PointerKind::Up, query, handler)
    }

    /// Emits `message` when the pointer leaves the chart.
    pub fn on_pointer_leave(message: M) -> Self
    where
        M: Clone + 'static,
    {
        Self::on(PointerKind::Leave, Query::items(), move |_| message.clone())
    }

    /// A binding for any pointer kind.
    pub fn on(
        kind: PointerKind,
        query: Query<D>,
        handler: impl Fn(Hit<D>) -> M + 'static,
    ) -> Self {
        Self {
            kind,
            query,
            handler: Arc::new(handler),
        }
    }

    /// The pointer kind this binding listens to.
    pub fn kind(&self) -> PointerKind {
        self.kind
    }
}

impl<D, M> Clone for Event<D, M> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            query: self.query.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<D, M> fmt::Debug for Event<D, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

/// Runs every binding matching `event.kind` and collects their messages in binding order.
///
/// Leave bindings run no query. When the pointer cannot be placed relative to the container,
/// handlers still run, with no matches.
pub fn dispatch<D, M>(
    events: &[Event<D, M>],
    plane: &Plane,
    items: &[Item<D>],
    event: &PointerEvent,
) -> Vec<M> {
    let pointer = event.draw_position(plane);
    if pointer.is_none() {
        tracing::debug!(kind = ?event.kind, "pointer not resolvable against the container");
    }
    events
        .iter()
        .filter(|binding| binding.kind == event.kind)
        .map(|binding| {
            let groups = match pointer {
                Some(p) if event.kind != PointerKind::Leave => binding.query.run(items, plane, p),
                _ => Vec::new(),
            };
            (binding.handler)(Hit {
                groups,
                pointer,
                coords: pointer.map(|p| plane.data_point(p)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::coords::{Margin, Position};
    use crate::item::{DotStyle, ItemKind};
    use crate::query::AxisFilter;

    #[derive(Clone, Debug, PartialEq)]
    enum Msg {
        Hover(Vec<usize>),
        Left,
    }

    fn setup() -> (Plane, Vec<Item<usize>>) {
        let plane = Plane::new(100.0, 100.0, Margin::default(), (0.0, 10.0), (0.0, 10.0));
        let items = (0..5)
            .map(|i| {
                Item::new(
                    Arc::new(i),
                    0,
                    0,
                    i,
                    Position::from_point(2.0 * i as f64, 5.0),
                    ItemKind::Dot(DotStyle::default()),
                )
            })
            .collect();
        (plane, items)
    }

    fn bindings() -> Vec<Event<usize, Msg>> {
        vec![
            Event::on_pointer_move(Query::items().nearest(AxisFilter::X), |hit| {
                Msg::Hover(hit.items().map(|i| *i.datum).collect())
            }),
            Event::on_pointer_leave(Msg::Left),
        ]
    }

    #[test]
    fn pointer_is_offset_by_the_container() {
        let (plane, items) = setup();
        let container = Rect::new(200.0, 50.0, 300.0, 150.0);
        let moved = PointerEvent::new(PointerKind::Move, (241.0, 90.0), container);
        let out = dispatch(&bindings(), &plane, &items, &moved);
        assert_eq!(out, vec![Msg::Hover(vec![2])]);
    }

    #[test]
    fn responsive_containers_scale_the_pointer() {
        let (plane, items) = setup();
        // Rendered at half size.
        let container = Rect::new(0.0, 0.0, 50.0, 50.0);
        let moved = PointerEvent::new(PointerKind::Move, (30.0, 10.0), container);
        let out = dispatch(&bindings(), &plane, &items, &moved);
        assert_eq!(out, vec![Msg::Hover(vec![3])]);
    }

    #[test]
    fn unmeasured_containers_match_nothing() {
        let (plane, items) = setup();
        let moved = PointerEvent {
            kind: PointerKind::Move,
            position: Point::new(10.0, 10.0),
            container: None,
        };
        let out = dispatch(&bindings(), &plane, &items, &moved);
        assert_eq!(out, vec![Msg::Hover(vec![])]);
    }

    #[test]
    fn leave_emits_its_message() {
        let (plane, items) = setup();
        let left = PointerEvent::new(PointerKind::Leave, (0.0, 0.0), plane.surface_rect());
        assert_eq!(dispatch(&bindings(), &plane, &items, &left), vec![Msg::Left]);
        let click = PointerEvent::new(PointerKind::Click, (0.0, 0.0), plane.surface_rect());
        assert!(dispatch(&bindings(), &plane, &items, &click).is_empty());
    }
}
