// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouping views over items.
//!
//! Bins and stacks are not stored anywhere: they are recomputed from an item list whenever a
//! query asks for them.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::coords::Position;
use crate::item::{Item, Located};

/// How items are partitioned into groups.
pub enum Grouping<D> {
    /// Items sharing an element and a data row: one column of a bar chart.
    Bin,
    /// Items sharing an element and a top-level declaration: one stacked series.
    Stack,
    /// Bar items only, each in its own group.
    Bars,
    /// Dot items only, each in its own group.
    Dots,
    /// Every item in its own group.
    Any,
    /// An item joins the first group whose first member satisfies `same(member, item)`.
    Custom(Arc<dyn Fn(&Item<D>, &Item<D>) -> bool>),
}

impl<D> Grouping<D> {
    /// A custom grouping from a predicate over `(first member, candidate)`.
    pub fn custom(same: impl Fn(&Item<D>, &Item<D>) -> bool + 'static) -> Self {
        Self::Custom(Arc::new(same))
    }
}

impl<D> Clone for Grouping<D> {
    fn clone(&self) -> Self {
        match self {
            Self::Bin => Self::Bin,
            Self::Stack => Self::Stack,
            Self::Bars => Self::Bars,
            Self::Dots => Self::Dots,
            Self::Any => Self::Any,
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl<D> fmt::Debug for Grouping<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bin => f.write_str("Bin"),
            Self::Stack => f.write_str("Stack"),
            Self::Bars => f.write_str("Bars"),
            Self::Dots => f.write_str("Dots"),
            Self::Any => f.write_str("Any"),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

/// Which grouping produced a [`Group`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// See [`Grouping::Bin`].
    Bin,
    /// See [`Grouping::Stack`].
    Stack,
    /// A singleton group.
    Single,
    /// See [`Grouping::Custom`].
    Custom,
}

/// A non-empty set of items.
#[derive(Debug)]
pub struct Group<D> {
    /// The grouping that produced this group.
    pub kind: GroupKind,
    /// Members in input order.
    pub items: Vec<Item<D>>,
}

impl<D> Clone for Group<D> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            items: self.items.clone(),
        }
    }
}

impl<D> Group<D> {
    /// A group holding one item.
    pub fn single(item: Item<D>) -> Self {
        Self {
            kind: GroupKind::Single,
            items: alloc::vec![item],
        }
    }

    /// The first member.
    pub fn first(&self) -> Option<&Item<D>> {
        self.items.first()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The source rows of the members, deduplicated by identity, in member order.
    pub fn data(&self) -> Vec<Arc<D>> {
        let mut out: Vec<Arc<D>> = Vec::new();
        for item in &self.items {
            if !out.iter().any(|d| Arc::ptr_eq(d, &item.datum)) {
                out.push(Arc::clone(&item.datum));
            }
        }
        out
    }
}

impl<D> Located for Group<D> {
    fn limits(&self) -> Position {
        Position::fold(self.items.iter().map(|i| &i.position)).unwrap_or_default()
    }

    fn is_real(&self) -> bool {
        self.items.iter().any(Located::is_real)
    }
}

/// Partitions `items` by `grouping`.
///
/// Groups appear in the order of their first member; members keep input order. For the hash
/// keyed groupings this is a single pass.
pub fn group<D>(grouping: &Grouping<D>, items: &[Item<D>]) -> Vec<Group<D>> {
    match grouping {
        Grouping::Bin => by_key(items, GroupKind::Bin, |i| (i.element_index, i.data_index)),
        Grouping::Stack => by_key(items, GroupKind::Stack, |i| {
            (i.element_index, i.stack_index)
        }),
        Grouping::Bars => singles(items.iter().filter(|i| i.is_bar())),
        Grouping::Dots => singles(items.iter().filter(|i| i.is_dot())),
        Grouping::Any => singles(items.iter()),
        Grouping::Custom(same) => {
            let mut groups: Vec<Group<D>> = Vec::new();
            for item in items {
                let home = groups
                    .iter_mut()
                    .find(|g| g.first().is_some_and(|first| same(first, item)));
                match home {
                    Some(g) => g.items.push(item.clone()),
                    None => groups.push(Group {
                        kind: GroupKind::Custom,
                        items: alloc::vec![item.clone()],
                    }),
                }
            }
            groups
        }
    }
}

fn by_key<D>(
    items: &[Item<D>],
    kind: GroupKind,
    key: impl Fn(&Item<D>) -> (usize, usize),
) -> Vec<Group<D>> {
    let mut slots: HashMap<(usize, usize), usize> = HashMap::new();
    let mut groups: Vec<Group<D>> = Vec::new();
    for item in items {
        let next = groups.len();
        let slot = *slots.entry(key(item)).or_insert(next);
        if slot == next {
            groups.push(Group {
                kind,
                items: Vec::new(),
            });
        }
        groups[slot].items.push(item.clone());
    }
    groups
}

fn singles<'a, D: 'a>(items: impl Iterator<Item = &'a Item<D>>) -> Vec<Group<D>> {
    items.cloned().map(Group::single).collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::item::{BarStyle, DotStyle, ItemKind};

    fn bar(element: usize, stack: usize, property: usize, row: usize) -> Item<usize> {
        Item::new(
            Arc::new(row),
            property,
            stack,
            row,
            Position::new(0.0, 1.0, 0.0, 1.0),
            ItemKind::Bar(BarStyle::default()),
        )
        .with_element_index(element)
    }

    fn dot(row: usize) -> Item<usize> {
        Item::new(
            Arc::new(row),
            9,
            0,
            row,
            Position::from_point(row as f64, 2.0),
            ItemKind::Dot(DotStyle::default()),
        )
        .with_element_index(1)
    }

    fn items() -> Vec<Item<usize>> {
        vec![
            bar(0, 0, 0, 0),
            bar(0, 0, 1, 0),
            bar(0, 1, 2, 0),
            bar(0, 0, 0, 1),
            bar(0, 0, 1, 1),
            bar(0, 1, 2, 1),
            dot(0),
            dot(1),
        ]
    }

    #[test]
    fn bins_partition_by_element_and_row() {
        let items = items();
        let bins = group(&Grouping::Bin, &items);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(Group::len).sum::<usize>(), items.len());
        for g in &bins {
            let first = g.first().unwrap();
            assert!(g.items.iter().all(|i| i.data_index == first.data_index
                && i.element_index == first.element_index));
        }
        assert_eq!(bins[0].len(), 3);
        assert_eq!(bins[2].kind, GroupKind::Bin);
    }

    #[test]
    fn stacks_keep_input_order() {
        let stacks = group(&Grouping::Stack, &items());
        assert_eq!(stacks.len(), 3);
        let rows: Vec<usize> = stacks[0].items.iter().map(|i| i.data_index).collect();
        assert_eq!(rows, vec![0, 0, 1, 1]);
    }

    #[test]
    fn kind_filters_make_singletons() {
        assert_eq!(group(&Grouping::Bars, &items()).len(), 6);
        assert_eq!(group(&Grouping::Dots, &items()).len(), 2);
        assert_eq!(group(&Grouping::Any, &items()).len(), 8);
        assert!(
            group(&Grouping::Any, &items())
                .iter()
                .all(|g| g.kind == GroupKind::Single)
        );
    }

    #[test]
    fn custom_groups_compare_against_the_first_member() {
        let by_property = Grouping::custom(|a: &Item<usize>, b: &Item<usize>| {
            a.property_index == b.property_index
        });
        let groups = group(&by_property, &items());
        assert_eq!(groups.len(), 4);
        assert!(groups.iter().all(|g| g.kind == GroupKind::Custom));
    }

    #[test]
    fn group_limits_and_data() {
        let items = items();
        let bins = group(&Grouping::Bin, &items);
        assert_eq!(bins[0].limits(), Position::new(0.0, 1.0, 0.0, 1.0));
        assert!(group(&Grouping::<usize>::Bin, &[]).is_empty());
    }

    #[test]
    fn data_is_deduplicated_by_identity() {
        let row = Arc::new(7_usize);
        let a = Item::new(
            Arc::clone(&row),
            0,
            0,
            0,
            Position::default(),
            ItemKind::Bar(BarStyle::default()),
        );
        let b = a.clone().with_value(2.0);
        let g = Group {
            kind: GroupKind::Bin,
            items: vec![a, b, bar(0, 0, 0, 7)],
        };
        assert_eq!(g.data().len(), 2);
    }
}
