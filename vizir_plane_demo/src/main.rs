// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart gallery for `vizir_plane`.
//!
//! Writes `vizir_plane_demo.html` with one section per chart, and each chart's bare surface as
//! `vizir_plane_demo_<name>.svg`. Interactive charts are shown in the state a scripted pointer
//! event leaves them in. Set `RUST_LOG=vizir_plane=debug` to see the render passes.

use chrono::{NaiveDate, Utc};
use kurbo::Rect;
use peniko::Color;
use tracing_subscriber::EnvFilter;
use vizir_plane::attributes::{domain, event, height, margin, padding, range, width};
use vizir_plane::{
    Adjust, AxisFilter, AxisLineSpec, BarsConfig, Chart, Config, Dimension, DotStyle, Edit,
    Element, Event, GridSpec, Group, Grouping, HeuristicTextMeasurer, Item, ItemKind, LabelsSpec,
    LegendsSpec, LineStyle, Margin, Markup, Method, Node, PathMark, Pinned, PointerEvent,
    PointerKind, Property, Query, Rendered, StrokeStyle, Symbol, TextAnchor, TextMark, TicksSpec,
    TooltipSpec, Values, format_float, to_draw_x,
};
use vizir_plane_svg::{to_html, to_svg};

#[derive(Clone, Debug)]
struct Month {
    month: f64,
    online: Option<f64>,
    store: Option<f64>,
}

#[derive(Clone, Debug)]
struct Reading {
    at: f64,
    celsius: Option<f64>,
}

#[derive(Clone, Debug)]
struct Sample {
    x: f64,
    y: f64,
    weight: f64,
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let sections = vec![
        ("stacked", "Stacked bars with a hover tooltip", stacked_bars()),
        ("temperatures", "Temperatures over a week", temperatures()),
        ("scatter", "Weighted scatter", scatter()),
        ("labelled", "Value labels from sub-elements", labelled_bars()),
    ];

    let mut html = String::from(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>vizir_plane</title></head>\n\
         <body style=\"font-family:sans-serif;max-width:720px;margin:2em auto\">\n",
    );
    for (slug, title, (chart, svg)) in &sections {
        html.push_str(&format!("<h2>{title}</h2>\n"));
        html.push_str(chart);
        let path = format!("vizir_plane_demo_{slug}.svg");
        std::fs::write(&path, svg)?;
        tracing::debug!(path = %path, "wrote surface");
    }
    html.push_str(&format!(
        "<p><small>Generated {}</small></p>\n</body></html>\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));
    std::fs::write("vizir_plane_demo.html", html)?;
    tracing::info!(charts = sections.len(), "wrote vizir_plane_demo.html");
    Ok(())
}

fn months() -> Vec<Month> {
    [
        (Some(3.0), Some(4.0)),
        (Some(5.0), Some(1.5)),
        (None, Some(2.0)),
        (Some(2.5), Some(6.0)),
        (Some(4.0), Some(3.0)),
        (Some(6.5), None),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (online, store))| Month {
        month: i as f64 + 1.0,
        online,
        store,
    })
    .collect()
}

fn sales_bars() -> Element<Month> {
    Element::bars(
        BarsConfig::new().with_rounding(0.2, 0.0),
        vec![Property::stacked([
            Property::bar(|m: &Month| m.online).with_name("Online"),
            Property::bar(|m: &Month| m.store).with_name("Store"),
        ])],
        months(),
    )
}

fn axes<D>() -> Vec<Element<D>> {
    vec![
        Element::Grid(GridSpec::default()),
        Element::AxisLine(AxisLineSpec::x()),
        Element::AxisLine(AxisLineSpec::y()),
        Element::Ticks(TicksSpec::x().with_values(Values::Ints(8))),
        Element::Labels(LabelsSpec::x().with_values(Values::Ints(8))),
        Element::Labels(
            LabelsSpec::y()
                .with_grid()
                .with_thinning(HeuristicTextMeasurer),
        ),
    ]
}

fn stacked_bars() -> (String, String) {
    let attrs = || {
        vec![
            width(480.0),
            height(260.0),
            margin(Margin::new(20.0, 30.0, 40.0, 20.0)),
            domain(vec![Adjust::Highest(1.0, Edit::More)]),
            event(Event::on_pointer_move(
                Query::items().group_by(Grouping::Bin).nearest(AxisFilter::X),
                |hit| hit.groups,
            )),
        ]
    };
    let elements = |hovered: Option<&Group<Month>>| {
        let mut elements = vec![Element::Legends(LegendsSpec::default())];
        elements.extend(axes());
        elements.push(sales_bars());
        if let Some(group) = hovered {
            let tooltip = TooltipSpec::for_group(group).with_format(|item: &Item<Month>| {
                let name = item.name.as_deref().unwrap_or("Sales");
                format!("{name} in month {}: {}", item.datum.month, format_float(item.value))
            });
            elements.push(Element::Tooltip(tooltip));
        }
        elements
    };

    let chart: Chart<Month, Vec<Group<Month>>> = Chart::from_attrs(attrs(), elements(None));
    let rendered = chart.render();

    // Pretend the chart sits at (100, 400) on a page and the pointer hovers over April.
    let page = Rect::new(100.0, 400.0, 580.0, 660.0);
    let pointer = (100.0 + to_draw_x(&rendered.plane, 4.1), 500.0);
    let hovered = chart
        .dispatch(&rendered, &PointerEvent::new(PointerKind::Move, pointer, page))
        .pop()
        .unwrap_or_default();
    tracing::info!(groups = hovered.len(), "hovered bars");

    let chart: Chart<Month, Vec<Group<Month>>> =
        Chart::from_attrs(attrs(), elements(hovered.first()));
    outputs(&chart.render())
}

fn temperatures() -> (String, String) {
    let start = NaiveDate::from_ymd_opt(2025, 3, 3)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc().timestamp_millis() as f64)
        .unwrap_or_default();
    let hour = 3_600_000.0;
    let readings: Vec<Reading> = (0..7 * 4)
        .map(|i| {
            let t = f64::from(i);
            // A sensor outage on the third day.
            let celsius = if (9..12).contains(&i) {
                None
            } else {
                Some(12.0 + 6.0 * (t * core::f64::consts::PI / 2.0).sin() + 0.2 * t)
            };
            Reading {
                at: start + t * 6.0 * hour,
                celsius,
            }
        })
        .collect();

    let chart: Chart<Reading, ()> = Chart::new(
        Config::new()
            .with_size(480.0, 220.0)
            .with_margin(Margin::new(20.0, 30.0, 40.0, 20.0))
            .with_domain(vec![Adjust::LikeData, Adjust::Lowest(0.0, Edit::OrLower)]),
        vec![
            Element::Grid(GridSpec::default().only_y()),
            Element::AxisLine(AxisLineSpec::x()),
            Element::Labels(LabelsSpec::x().with_values(Values::utc_times(7))),
            Element::Labels(
                LabelsSpec::y()
                    .with_grid()
                    .with_format(|v| format!("{}°", format_float(v))),
            ),
            Element::series(
                |r: &Reading| r.at,
                vec![
                    Property::interpolated(|r: &Reading| r.celsius, Method::Monotone)
                        .with_name("Celsius")
                        .with_line(
                            LineStyle::new(Method::Monotone)
                                .with_width(2.0)
                                .with_area(0.15),
                        ),
                ],
                readings,
            ),
        ],
    );
    outputs(&chart.render())
}

fn scatter() -> (String, String) {
    let samples: Vec<Sample> = (0..40)
        .map(|i| {
            let t = f64::from(i);
            Sample {
                x: (t * 7.3) % 23.0,
                y: (t * 3.1) % 11.0 - 3.0,
                weight: 1.0 + (t * 1.7) % 5.0,
            }
        })
        .collect();

    let chart: Chart<Sample, ()> = Chart::from_attrs(
        [
            width(480.0),
            height(260.0),
            margin(Margin::new(20.0, 30.0, 40.0, 20.0)),
            padding(Margin::uniform(10.0)),
            range(vec![Adjust::Lowest(0.0, Edit::Exactly)]),
        ],
        vec![
            Element::Grid(GridSpec::default()),
            Element::AxisLine(AxisLineSpec::x().with_pinned(Pinned::Zero)),
            Element::AxisLine(AxisLineSpec::y()),
            Element::Labels(LabelsSpec::x()),
            Element::Labels(LabelsSpec::y()),
            Element::series(
                |s: &Sample| s.x,
                vec![
                    Property::dot(|s: &Sample| Some(s.y))
                        .with_name("Samples")
                        .with_dot(DotStyle::default().with_opacity(0.7))
                        .with_shape(Symbol::Diamond)
                        .with_variation(|_, s: &Sample, kind| match kind {
                            ItemKind::Dot(style) => {
                                let style = style.with_size(12.0 * s.weight * s.weight);
                                if s.y < 0.0 {
                                    ItemKind::Dot(style.with_highlight(0.3, 4.0))
                                } else {
                                    ItemKind::Dot(style)
                                }
                            }
                            other => other,
                        }),
                ],
                samples,
            ),
            Element::Legends(
                LegendsSpec::default()
                    .at(Pinned::Max, Pinned::Max)
                    .with_offset(-90.0, 0.0),
            ),
        ],
    );
    outputs(&chart.render())
}

fn labelled_bars() -> (String, String) {
    let chart: Chart<Month, ()> = Chart::new(
        Config::new()
            .with_size(480.0, 220.0)
            .with_margin(Margin::new(20.0, 30.0, 20.0, 20.0)),
        vec![
            Element::AxisLine(AxisLineSpec::x()),
            Element::Labels(LabelsSpec::x().with_values(Values::Ints(8))),
            Element::bars(
                BarsConfig::new(),
                vec![
                    Property::bar(|m: &Month| m.online)
                        .with_name("Online")
                        .with_color(Color::from_rgb8(0x2c, 0x7f, 0xb8)),
                ],
                months(),
            ),
            Element::each(Grouping::Bars, |plane, group| {
                let Some(item) = group.first() else {
                    return Vec::new();
                };
                let (x, y) = item.position.top_center();
                let top = plane.draw_point(x, y);
                let label = TextMark::new((top.x, top.y - 6.0), format_float(item.value))
                    .with_anchor(TextAnchor::Middle)
                    .with_font_size(11.0);
                vec![Element::primitive(move |_| vec![label.clone().into()])]
            }),
            Element::primitive(|plane| {
                // A dashed target line at 4.
                let y = plane.y.clamp(4.0);
                let from = plane.draw_point(plane.x.min, y);
                let to = plane.draw_point(plane.x.max, y);
                let stroke = StrokeStyle::solid(Color::from_rgb8(0xe0, 0x5a, 0x47), 1.0)
                    .with_dash(&[4.0, 3.0]);
                vec![PathMark::rule(from, to, stroke).into()]
            }),
            Element::html(|plane, items| {
                let total: f64 = items.iter().map(|i| i.value).sum();
                vec![
                    Node::new("div")
                        .at(plane, plane.width - 120.0, 0.0)
                        .with_style("font-size", "12px")
                        .with_child(Markup::text(format!("Total {}", format_float(total))))
                        .into(),
                ]
            }),
            Element::with_plane(|plane| {
                // Ticks only where the axis is long enough to need them.
                if plane.x.inner_length() > 200.0 {
                    vec![Element::Ticks(TicksSpec::new(Dimension::X))]
                } else {
                    Vec::new()
                }
            }),
        ],
    );
    outputs(&chart.render())
}

/// The chart as an HTML fragment and its bare surface as SVG.
fn outputs<D>(rendered: &Rendered<D>) -> (String, String) {
    (to_html(rendered), to_svg(rendered))
}
