// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::attributes::{domain, event, height, margin, width};
use crate::{
    Adjust, AxisFilter, AxisLineSpec, BarsConfig, Chart, Config, Direction, Edit, Element, Event,
    GridSpec, Group, Grouping, LabelsSpec, LegendsSpec, Margin, Mark, Markup, Method, Plane,
    PointerEvent, PointerKind, Property, Query, TooltipSpec, Values, floats, to_draw_x,
};

#[derive(Clone, Debug, PartialEq)]
struct Sale {
    month: f64,
    online: Option<f64>,
    store: Option<f64>,
}

fn sale(month: f64, online: Option<f64>, store: Option<f64>) -> Sale {
    Sale {
        month,
        online,
        store,
    }
}

fn sales() -> Vec<Sale> {
    vec![
        sale(1.0, Some(3.0), Some(4.0)),
        sale(2.0, Some(5.0), Some(1.0)),
        sale(3.0, None, Some(2.0)),
        sale(4.0, Some(2.0), Some(6.0)),
    ]
}

fn stacked_bars() -> Element<Sale> {
    Element::bars(
        BarsConfig::new(),
        vec![Property::stacked([
            Property::bar(|s: &Sale| s.online).with_name("Online"),
            Property::bar(|s: &Sale| s.store).with_name("Store"),
        ])],
        sales(),
    )
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn draw_coordinates_are_linear_in_the_data() {
    let plane = Plane::new(300.0, 300.0, Margin::default(), (0.0, 10.0), (0.0, 10.0));
    assert_eq!(to_draw_x(&plane, 5.0), 150.0);
}

#[test]
fn stacked_bars_sit_on_each_other() {
    let chart: Chart<Sale, ()> = Chart::new(Config::new(), vec![stacked_bars()]);
    let rendered = chart.render();
    let first: Vec<_> = rendered
        .items
        .iter()
        .filter(|i| i.data_index == 0)
        .map(|i| (i.position.y1, i.position.y2))
        .collect();
    assert_eq!(first, [(0.0, 3.0), (3.0, 7.0)]);
    // The missing online value leaves the store bar on the ground.
    let third: Vec<_> = rendered
        .items
        .iter()
        .filter(|i| i.data_index == 2)
        .map(|i| (i.property_index, i.position.y1, i.position.y2))
        .collect();
    assert_eq!(third, [(1, 0.0, 2.0)]);
    assert_eq!(rendered.plane.y.max, 8.0);
}

#[test]
fn nice_ticks_over_a_ragged_interval() {
    let ticks = floats(5, 0.0, 97.0);
    assert!(ticks.iter().all(|t| t % 20.0 == 0.0), "{ticks:?}");
    assert_eq!(ticks.first(), Some(&0.0));
    assert!(ticks.last().is_some_and(|t| *t <= 100.0));
    assert!((4..=6).contains(&ticks.len()));
}

#[test]
fn missing_values_keep_their_row_index() {
    let rows = [(0.0, None), (1.0, Some(5.0)), (2.0, None)];
    let chart: Chart<(f64, Option<f64>), ()> = Chart::new(
        Config::new(),
        vec![Element::series(
            |r: &(f64, Option<f64>)| r.0,
            vec![Property::interpolated(
                |r: &(f64, Option<f64>)| r.1,
                Method::Monotone,
            )],
            rows,
        )],
    );
    let rendered = chart.render();
    assert_eq!(rendered.items.len(), 1);
    assert_eq!(rendered.items[0].data_index, 1);
    assert_eq!(rendered.items[0].position.x1, 1.0);
    // A single point draws no line.
    assert!(rendered.marks.is_empty());
}

#[test]
fn bins_partition_the_items() {
    let chart: Chart<Sale, ()> = Chart::new(Config::new(), vec![stacked_bars()]);
    let rendered = chart.render();
    let bins = crate::group(&Grouping::Bin, &rendered.items);
    assert_eq!(bins.len(), 4);
    let total: usize = bins.iter().map(Group::len).sum();
    assert_eq!(total, rendered.items.len());
    let stacks = crate::group(&Grouping::Stack, &rendered.items);
    assert_eq!(stacks.len(), 1);
}

#[test]
fn hovering_a_column_builds_a_tooltip() {
    let attrs = || {
        vec![
            width(400.0),
            height(200.0),
            margin(Margin::new(10.0, 30.0, 40.0, 10.0)),
            domain(vec![Adjust::Highest(10.0, Edit::OrHigher)]),
            event(Event::on_pointer_move(
                Query::items().group_by(Grouping::Bin).nearest(AxisFilter::X),
                |hit| hit.groups,
            )),
        ]
    };
    let chart: Chart<Sale, Vec<Group<Sale>>> =
        Chart::from_attrs(attrs(), vec![stacked_bars()]);
    let rendered = chart.render();
    let page = Rect::new(100.0, 100.0, 500.0, 300.0);
    let x = 100.0 + to_draw_x(&rendered.plane, 2.0);
    let hovered = chart
        .dispatch(&rendered, &PointerEvent::new(PointerKind::Move, (x, 150.0), page))
        .pop()
        .unwrap_or_default();
    assert_eq!(hovered.len(), 1);
    assert_eq!(hovered[0].data()[0].month, 2.0);

    let with_tooltip: Chart<Sale, Vec<Group<Sale>>> = Chart::from_attrs(
        attrs(),
        vec![
            stacked_bars(),
            Element::Tooltip(
                TooltipSpec::for_group(&hovered[0]).with_direction(Direction::Top),
            ),
        ],
    );
    let rendered = with_tooltip.render();
    assert!(rendered.before.is_empty());
    assert_eq!(rendered.after.len(), 1);
    assert_eq!(rendered.after[0].text_content(), "Online: 5Store: 1");
}

#[test]
fn a_full_chart_renders_in_declaration_order() {
    let chart: Chart<Sale, ()> = Chart::new(
        Config::new()
            .with_size(400.0, 200.0)
            .with_margin(Margin::new(10.0, 30.0, 40.0, 10.0)),
        vec![
            Element::Legends(LegendsSpec::default()),
            Element::Grid(GridSpec::default()),
            Element::AxisLine(AxisLineSpec::x()),
            Element::AxisLine(AxisLineSpec::y()),
            Element::Labels(LabelsSpec::x().with_values(Values::Ints(4))),
            Element::Labels(LabelsSpec::y().with_grid()),
            stacked_bars(),
            Element::series(
                |s: &Sale| s.month,
                vec![Property::dot(|s: &Sale| s.store.map(|v| v + 1.0)).with_name("Target")],
                sales(),
            ),
        ],
    );
    let rendered = chart.render();

    // Legends come first and list every named property.
    assert_eq!(rendered.before.len(), 1);
    assert_eq!(rendered.before[0].text_content(), "OnlineStoreTarget");
    assert!(matches!(rendered.before[0], Markup::Node(_)));
    assert_eq!(rendered.legends.len(), 3);

    // Grid lines come before everything else on the surface, then the axis lines.
    let first_text = rendered
        .marks
        .iter()
        .position(|m| matches!(m, Mark::Text(_)));
    assert!(first_text.is_some_and(|i| i > 2));
    assert!(matches!(rendered.marks.last(), Some(Mark::Path(_))));

    // Item and property indices follow the declarations.
    let dots: Vec<_> = rendered.items.iter().filter(|i| i.is_dot()).collect();
    assert_eq!(dots.len(), 4);
    assert!(dots.iter().all(|d| d.element_index == 1 && d.property_index == 2));

    // Everything is inside the surface.
    let surface = rendered.plane.surface_rect();
    for mark in &rendered.marks {
        let Some(b) = mark.bounds() else {
            continue;
        };
        assert!(
            b.x0 >= surface.x0 - 1e-9 && b.y0 >= surface.y0 - 1e-9,
            "{mark:?} starts outside {surface:?}"
        );
    }
    assert!(close(rendered.plane.y.min, 0.0));
}

