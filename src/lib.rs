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
//! Library for the offline analysis of MINUET vehicular network simulation logs.
//!
//! Every analysis follows the same two stages: an extractor in [`analyzer`] turns log lines into
//! typed records, and an aggregator ([`cluster`], [`decision`], [`flow`], [`latency`]) reduces
//! them to the statistics that [`report`] renders.

/// Identifier of a simulated node (vehicle or base station).
pub type NodeId = u32;
/// Identifier of a simulated event observed by the detection layer.
pub type EventId = u32;

pub mod analyzer;
pub mod cluster;
pub mod config;
pub mod decision;
pub mod flow;
pub mod latency;
pub mod records;
pub mod report;
pub mod scenarios;
pub mod serde_map;
pub mod util;

#[cfg(test)]
mod test;

pub mod prelude {
    pub use super::{
        analyzer::{
            BaseStationLogParser, ClusterLogParser, DetectionLogParser, GenericLogParser,
            LogParser,
        },
        cluster::{ClusterMetrics, Metric, MetricsTable},
        config::MethodArgs,
        records::{ClusterEvent, ClusterEventKind, Decision, Delivery, Detection},
        scenarios::ScenarioConfig,
        EventId, NodeId,
    };
}
