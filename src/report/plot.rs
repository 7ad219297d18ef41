// MINUET: Offline Analysis of Vehicular Clustering and Relay-Election Simulation Logs
// Copyright (C) 2024-2025 The MINUET authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Interactive HTML charts.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
};

use itertools::Itertools;
use plotly::{
    common::{DashType, Line, Marker, MarkerSymbol, Mode},
    layout::{Axis, AxisType, BarMode},
    sankey::{Link, Node},
    Bar, BoxPlot, Layout, Plot, Sankey, Scatter,
};

use super::{method_color, ReportError};
use crate::{
    cluster::{Metric, MetricsTable},
    NodeId,
};

/// Colors of the algorithms in the comparative charts, cycled.
const PALETTE: [&str; 4] = ["#1b9e77", "#d95f02", "#7570b3", "#e7298a"];
const DASHES: [DashType; 4] = [
    DashType::Solid,
    DashType::Dash,
    DashType::Dot,
    DashType::DashDot,
];
const SYMBOLS: [MarkerSymbol; 4] = [
    MarkerSymbol::Circle,
    MarkerSymbol::Square,
    MarkerSymbol::Diamond,
    MarkerSymbol::TriangleUp,
];

fn write_plot(plot: &Plot, path: &Path) -> Result<(), ReportError> {
    log::debug!("Plotting {}", path.to_string_lossy());
    fs::write(path, plot.to_html())?;
    Ok(())
}

fn layout(title: &str, x_label: &str, y_label: &str) -> Layout {
    Layout::new()
        .title(format!("<b>{title}</b>"))
        .x_axis(Axis::new().title(x_label).type_(AxisType::Category))
        .y_axis(Axis::new().title(y_label))
}

/// One line per algorithm showing `metric` over all scenarios.
pub fn metric_chart(table: &MetricsTable, metric: Metric, path: &Path) -> Result<(), ReportError> {
    let mut plot = Plot::new();
    plot.set_layout(layout(
        metric.caption(),
        "Number of Vehicles",
        metric.axis_label(),
    ));

    for (i, algorithm) in table.algorithms().iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let trace = Scatter::new(table.scenarios().to_vec(), table.series(algorithm, metric))
            .name(algorithm)
            .mode(Mode::LinesMarkers)
            .line(Line::new().color(color).dash(DASHES[i % DASHES.len()].clone()))
            .marker(
                Marker::new()
                    .color(color)
                    .symbol(SYMBOLS[i % SYMBOLS.len()].clone())
                    .size(8),
            );
        plot.add_trace(trace);
    }

    write_plot(&plot, path)
}

/// One bar per decision method.
pub fn method_bars(
    values: &[(String, f64)],
    title: &str,
    y_label: &str,
    path: &Path,
) -> Result<(), ReportError> {
    let mut plot = Plot::new();
    plot.set_layout(layout(title, "Decision Method", y_label));

    for (method, value) in values {
        let trace = Bar::new(vec![method.clone()], vec![*value])
            .name(method)
            .marker(Marker::new().color(method_color(method)));
        plot.add_trace(trace);
    }

    write_plot(&plot, path)
}

/// Wins of the given vehicles, one group per vehicle and one bar per method.
pub fn election_chart(
    counts: &[(String, BTreeMap<NodeId, usize>)],
    vehicles: &[NodeId],
    path: &Path,
) -> Result<(), ReportError> {
    let mut plot = Plot::new();
    plot.set_layout(
        layout(
            &format!("Top {} Elected Vehicles", vehicles.len()),
            "Vehicle ID",
            "Number of Elections",
        )
        .bar_mode(BarMode::Group),
    );

    let x = vehicles.iter().map(|v| v.to_string()).collect_vec();
    for (method, count) in counts {
        let y = vehicles
            .iter()
            .map(|v| count.get(v).copied().unwrap_or_default())
            .collect_vec();
        let trace = Bar::new(x.clone(), y)
            .name(method)
            .marker(Marker::new().color(method_color(method)));
        plot.add_trace(trace);
    }

    write_plot(&plot, path)
}

/// Retransmitters ordered by their deliveries over all methods (most first, ties by id).
pub fn retransmitter_order(per_method: &[(String, BTreeMap<NodeId, usize>)]) -> Vec<NodeId> {
    let mut totals: BTreeMap<NodeId, usize> = BTreeMap::new();
    for (node, count) in per_method.iter().flat_map(|(_, c)| c) {
        *totals.entry(*node).or_default() += count;
    }
    totals
        .into_iter()
        .sorted_by(|(n1, t1), (n2, t2)| t2.cmp(t1).then(n1.cmp(n2)))
        .map(|(node, _)| node)
        .collect()
}

/// Deliveries per retransmitter, stacked over all methods.
pub fn retransmitter_chart(
    per_method: &[(String, BTreeMap<NodeId, usize>)],
    path: &Path,
) -> Result<(), ReportError> {
    let mut plot = Plot::new();
    plot.set_layout(
        layout(
            "Messages Delivered per Retransmitter",
            "Retransmitter ID",
            "Number of Messages",
        )
        .bar_mode(BarMode::Stack),
    );

    let order = retransmitter_order(per_method);
    let x = order.iter().map(|v| v.to_string()).collect_vec();
    for (method, count) in per_method {
        let y = order
            .iter()
            .map(|v| count.get(v).copied().unwrap_or_default())
            .collect_vec();
        let trace = Bar::new(x.clone(), y)
            .name(method)
            .marker(Marker::new().color(method_color(method)));
        plot.add_trace(trace);
    }

    write_plot(&plot, path)
}

fn latency_plot(samples: &[(String, Vec<f64>)]) -> Plot {
    let mut plot = Plot::new();
    plot.set_layout(
        Layout::new()
            .title("<b>End-to-End Latency</b>")
            .x_axis(Axis::new().title("Decision Method"))
            .y_axis(Axis::new().title("Latency (ms)")),
    );

    // methods without samples get no box
    for (method, latencies) in samples.iter().filter(|(_, l)| !l.is_empty()) {
        let trace = BoxPlot::<f64, f64>::new(latencies.clone())
            .name(method)
            .marker(Marker::new().color(method_color(method)));
        plot.add_trace(trace);
    }
    plot
}

/// Distribution of the latency samples of every method.
pub fn latency_chart(samples: &[(String, Vec<f64>)], path: &Path) -> Result<(), ReportError> {
    write_plot(&latency_plot(samples), path)
}

/// Nodes and links of a detector -> retransmitter -> base station diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SankeyGraph {
    pub labels: Vec<String>,
    pub source: Vec<usize>,
    pub target: Vec<usize>,
    pub value: Vec<usize>,
}

impl SankeyGraph {
    pub fn from_flows(flows: &BTreeMap<(NodeId, NodeId), usize>, bs_id: NodeId) -> Self {
        let mut graph = Self::default();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut node = |graph: &mut Self, label: String| -> usize {
            *index.entry(label.clone()).or_insert_with(|| {
                graph.labels.push(label);
                graph.labels.len() - 1
            })
        };

        let rsu = node(&mut graph, format!("RSU {bs_id}"));
        let mut to_rsu: BTreeMap<usize, usize> = BTreeMap::new();
        for ((monitor, from), count) in flows {
            let detector = node(&mut graph, format!("Detector {monitor}"));
            let retransmitter = node(&mut graph, format!("Retransmitter {from}"));
            graph.link(detector, retransmitter, *count);
            *to_rsu.entry(retransmitter).or_default() += count;
        }
        for (retransmitter, count) in to_rsu {
            graph.link(retransmitter, rsu, count);
        }
        graph
    }

    fn link(&mut self, source: usize, target: usize, value: usize) {
        self.source.push(source);
        self.target.push(target);
        self.value.push(value);
    }
}

/// Sankey diagram of all flows towards base station `bs_id`.
pub fn flow_sankey(
    flows: &BTreeMap<(NodeId, NodeId), usize>,
    bs_id: NodeId,
    path: &Path,
) -> Result<(), ReportError> {
    let graph = SankeyGraph::from_flows(flows, bs_id);
    let mut plot = Plot::new();
    plot.set_layout(Layout::new().title(format!(
        "<b>Event Flow: Detector -> Retransmitter -> RSU {bs_id}</b>"
    )));

    let trace = Sankey::new()
        .node(
            Node::new()
                .pad(15)
                .thickness(20)
                .label(graph.labels.iter().map(String::as_str).collect()),
        )
        .link(
            Link::new()
                .source(graph.source)
                .target(graph.target)
                .value(graph.value),
        );
    plot.add_trace(trace);

    write_plot(&plot, path)
}
