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
//! Cluster metrics aggregated per (scenario, algorithm) from the clustering-algorithm log.
//!
//! All metrics degrade to zero if the log is missing or contains no events, such that the
//! comparative charts still contain every series.

use std::{cmp::Ordering, collections::BTreeMap};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::{
    analyzer::{ClusterLogParser, LogParser},
    records::{ClusterEvent, ClusterEventKind, LogRecord},
    scenarios::ScenarioConfig,
};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
/// Metrics computed for every (scenario, algorithm) pair.
pub enum Metric {
    OverheadTotal,
    AvgClusterLifetime,
    TotalChElections,
    TotalChRenounces,
    AvgClusterSize,
    AvgRttMs,
    StdRttMs,
}

impl Metric {
    /// Metrics that are plotted and exported as tables, in order.
    pub const REPORTED: [Metric; 5] = [
        Metric::AvgRttMs,
        Metric::OverheadTotal,
        Metric::TotalChElections,
        Metric::AvgClusterLifetime,
        Metric::AvgClusterSize,
    ];

    /// Label of the y axis.
    pub fn axis_label(&self) -> &'static str {
        match self {
            Self::OverheadTotal => "Number of Packets",
            Self::AvgClusterLifetime => "Time (s)",
            Self::TotalChElections | Self::TotalChRenounces => "Number of Events",
            Self::AvgClusterSize => "Number of Members",
            Self::AvgRttMs | Self::StdRttMs => "RTT (ms)",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Self::OverheadTotal => "Total Overhead (packets)",
            Self::AvgClusterLifetime => "Average Cluster Duration (s)",
            Self::TotalChElections => "Total CH Elections",
            Self::TotalChRenounces => "Total CH Renounces",
            Self::AvgClusterSize => "Average Cluster Size (members)",
            Self::AvgRttMs => "Average RTT (ms)",
            Self::StdRttMs => "RTT Standard Deviation (ms)",
        }
    }

    /// Number of decimal places when printed.
    pub fn precision(&self) -> usize {
        match self {
            Self::OverheadTotal | Self::TotalChElections | Self::TotalChRenounces => 0,
            _ => 2,
        }
    }
}

/// Metrics of one run of one clustering algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterMetrics {
    /// Number of `PACKET_SENT` events.
    pub overhead_total: usize,
    /// Mean cluster-head tenure in seconds.
    pub avg_cluster_lifetime: f64,
    pub total_ch_elections: usize,
    pub total_ch_renounces: usize,
    /// Mean of the positive cluster sizes.
    pub avg_cluster_size: f64,
    pub avg_rtt_ms: f64,
    /// Sample standard deviation of the RTT.
    pub std_rtt_ms: f64,
}

impl ClusterMetrics {
    /// Aggregate all events of one run. `horizon` is the simulation duration in seconds and closes
    /// all tenures that were not renounced.
    pub fn from_events(events: impl IntoIterator<Item = ClusterEvent>, horizon: f64) -> Self {
        let events = events.into_iter().collect_vec();
        let count = |kind: ClusterEventKind| events.iter().filter(|e| e.kind == kind).count();

        let rtts = numbers(&events, ClusterEventKind::RttMeasurement, "rtt")
            .filter(|x| !x.is_nan())
            .collect_vec();
        let sizes = numbers(&events, ClusterEventKind::ClusterSize, "size")
            .filter(|x| *x > 0.0)
            .collect_vec();

        Self {
            overhead_total: count(ClusterEventKind::PacketSent),
            avg_cluster_lifetime: mean_or_zero(&cluster_lifetimes(&events, horizon)),
            total_ch_elections: count(ClusterEventKind::ChElected),
            total_ch_renounces: count(ClusterEventKind::ChRenounced),
            avg_cluster_size: mean_or_zero(&sizes),
            avg_rtt_ms: mean_or_zero(&rtts) * 1000.0,
            std_rtt_ms: std_dev_or_zero(&rtts) * 1000.0,
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::OverheadTotal => self.overhead_total as f64,
            Metric::AvgClusterLifetime => self.avg_cluster_lifetime,
            Metric::TotalChElections => self.total_ch_elections as f64,
            Metric::TotalChRenounces => self.total_ch_renounces as f64,
            Metric::AvgClusterSize => self.avg_cluster_size,
            Metric::AvgRttMs => self.avg_rtt_ms,
            Metric::StdRttMs => self.std_rtt_ms,
        }
    }
}

/// Numeric values of `key` for all events of the given kind.
fn numbers<'a>(
    events: &'a [ClusterEvent],
    kind: ClusterEventKind,
    key: &'a str,
) -> impl Iterator<Item = f64> + 'a {
    events
        .iter()
        .filter(move |e| e.kind == kind)
        .filter_map(move |e| e.number(key))
}

fn mean_or_zero(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().mean()
    }
}

fn std_dev_or_zero(xs: &[f64]) -> f64 {
    // undefined for a single sample
    if xs.len() < 2 {
        0.0
    } else {
        xs.iter().std_dev()
    }
}

/// Tenure of every cluster head in seconds.
///
/// Elections and renounces are matched by `ch_id` in timestamp order. A second election of an
/// active cluster head and a renounce of an inactive one are ignored. Cluster heads still active
/// at the end are credited the time until `horizon`.
pub fn cluster_lifetimes(events: &[ClusterEvent], horizon: f64) -> Vec<f64> {
    let mut active: BTreeMap<i64, f64> = BTreeMap::new();
    let mut lifetimes = Vec::new();

    for e in events
        .iter()
        .filter(|e| matches!(e.kind, ClusterEventKind::ChElected | ClusterEventKind::ChRenounced))
        .sorted_by(|a, b| a.time().total_cmp(&b.time()))
    {
        let Some(ch_id) = e.number("ch_id").filter(|x| x.is_finite()) else {
            log::trace!("Skipping cluster-head event without ch_id at {}s", e.time());
            continue;
        };
        let ch_id = ch_id as i64;
        if e.kind == ClusterEventKind::ChElected {
            active.entry(ch_id).or_insert(e.time());
        } else if let Some(start) = active.remove(&ch_id) {
            let duration = e.time() - start;
            if duration >= 0.0 {
                lifetimes.push(duration);
            }
        }
    }

    lifetimes.extend(active.into_values().map(|start| (horizon - start).max(0.0)));
    lifetimes
}

/// Metrics of all (scenario, algorithm) pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsTable {
    scenarios: Vec<String>,
    algorithms: Vec<String>,
    #[serde(with = "crate::serde_map")]
    metrics: BTreeMap<(String, String), ClusterMetrics>,
}

impl MetricsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        scenario: impl Into<String>,
        algorithm: impl Into<String>,
        metrics: ClusterMetrics,
    ) {
        let scenario = scenario.into();
        let algorithm = algorithm.into();
        if !self.scenarios.contains(&scenario) {
            self.scenarios.push(scenario.clone());
            self.scenarios.sort_by(|a, b| scenario_order(a, b));
        }
        if !self.algorithms.contains(&algorithm) {
            self.algorithms.push(algorithm.clone());
        }
        self.metrics.insert((scenario, algorithm), metrics);
    }

    /// Scenario labels in natural order (`150` before `1000`).
    pub fn scenarios(&self) -> &[String] {
        &self.scenarios
    }

    /// Algorithm labels in the order they were first inserted.
    pub fn algorithms(&self) -> &[String] {
        &self.algorithms
    }

    /// Metrics of a pair. Pairs that were never inserted read as all zero.
    pub fn get(&self, scenario: &str, algorithm: &str) -> ClusterMetrics {
        self.metrics
            .get(&(scenario.to_string(), algorithm.to_string()))
            .copied()
            .unwrap_or_default()
    }

    /// Values of `metric` for `algorithm` over all scenarios.
    pub fn series(&self, algorithm: &str, metric: Metric) -> Vec<f64> {
        self.scenarios
            .iter()
            .map(|s| self.get(s, algorithm).get(metric))
            .collect()
    }

    /// Values of `metric` for all algorithms in `scenario`.
    pub fn row<'a>(&'a self, scenario: &'a str, metric: Metric) -> impl Iterator<Item = f64> + 'a {
        self.algorithms
            .iter()
            .map(move |a| self.get(scenario, a).get(metric))
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Vehicle counts compare numerically, other labels in natural order.
fn scenario_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => human_sort::compare(a, b),
    }
}

/// Parse the clustering log of every (scenario, algorithm) pair in `config` and aggregate it.
pub fn collect_metrics(config: &ScenarioConfig) -> MetricsTable {
    let parser = ClusterLogParser::new();
    let mut table = MetricsTable::new();

    for scenario in &config.scenarios {
        log::info!("Processing scenario: {} vehicles", scenario.label);
        for algorithm in &scenario.algorithms {
            log::info!("  Reading {} from {:?}", algorithm.name, algorithm.path);
            let events = parser.parse_file(&algorithm.path).collect_vec();
            if events.is_empty() {
                log::warn!(
                    "No valid events in {:?} (algorithm: {})",
                    algorithm.path,
                    algorithm.name
                );
            }
            let metrics = ClusterMetrics::from_events(events, config.simulation_duration);
            log::info!(
                "    Average RTT = {:.2} ms, Overhead = {}",
                metrics.avg_rtt_ms,
                metrics.overhead_total
            );
            table.insert(&scenario.label, &algorithm.name, metrics);
        }
    }

    table
}
