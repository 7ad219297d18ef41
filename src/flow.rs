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
//! How detected events travel from their detector over a retransmitter to the base station.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{
    analyzer::{BaseStationLogParser, LogParser},
    config::{MethodArgs, TargetArgs},
    records::{Delivery, DeliveryKind},
    NodeId,
};

/// Deliveries of one event at one base station.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSummary {
    /// Number of datagrams received.
    pub packets: usize,
    /// Deliveries per `(monitor_id, from_id)`.
    #[serde(with = "crate::serde_map")]
    pub flows: BTreeMap<(NodeId, NodeId), usize>,
    /// Deliveries per last hop.
    pub retransmitters: BTreeMap<NodeId, usize>,
    /// Detectors whose monitoring message reached the base station.
    pub monitors: BTreeSet<NodeId>,
}

impl FlowSummary {
    /// Summarize all deliveries matching `target`. Other deliveries are ignored.
    pub fn from_deliveries(
        deliveries: impl IntoIterator<Item = Delivery>,
        target: TargetArgs,
    ) -> Self {
        let mut summary = Self::default();
        for d in deliveries
            .into_iter()
            .filter(|d| d.bs_id == target.bs_id && d.event_id == target.event_id)
        {
            summary.packets += 1;
            if let Some(from) = d.from_id {
                *summary.retransmitters.entry(from).or_default() += 1;
                if let Some(monitor) = d.monitor_id {
                    *summary.flows.entry((monitor, from)).or_default() += 1;
                }
            }
            if d.kind == DeliveryKind::MonitoringMessage {
                if let Some(monitor) = d.monitor_id {
                    summary.monitors.insert(monitor);
                }
            }
        }
        log::trace!("{summary:?}");
        summary
    }

    /// Number of distinct detectors heard by the base station.
    pub fn unique_detections(&self) -> usize {
        self.monitors.len()
    }

    /// Add the counts of `other` to `self`.
    pub fn merge(&mut self, other: &Self) {
        self.packets += other.packets;
        for (flow, count) in &other.flows {
            *self.flows.entry(*flow).or_default() += count;
        }
        for (from, count) in &other.retransmitters {
            *self.retransmitters.entry(*from).or_default() += count;
        }
        self.monitors.extend(other.monitors.iter().copied());
    }
}

/// Flow summary of every method, in the order of `args.methods`. A missing base station log
/// yields an empty summary.
pub fn collect_flows(args: &MethodArgs, target: TargetArgs) -> Vec<(String, FlowSummary)> {
    let parser = BaseStationLogParser::new();
    args.methods
        .iter()
        .map(|method| {
            let log = args.base_station_log(method);
            let summary = FlowSummary::from_deliveries(parser.parse_file(&log), target);
            log::info!(
                "{method}: {} datagrams, {} unique detections",
                summary.packets,
                summary.unique_detections()
            );
            (method.clone(), summary)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    const TARGET: TargetArgs = TargetArgs {
        bs_id: 300,
        event_id: 0,
    };

    fn summary(log: &[u8]) -> FlowSummary {
        FlowSummary::from_deliveries(BaseStationLogParser::new().parse(log), TARGET)
    }

    #[test]
    fn unique_monitors() {
        let s = summary(
            b"\
1ns - BASE STATION - Node #300: Monitoring Message Received: From = 12 MonitorId = 102 Seq = 1 EventId = 0
2ns - BASE STATION - Node #300: Monitoring Message Received: From = 13 MonitorId = 102 Seq = 2 EventId = 0
3ns - BASE STATION - Node #300: Monitoring Message Received: From = 12 MonitorId = 102 Seq = 3 EventId = 0
",
        );
        assert_eq!(s.unique_detections(), 1);
        assert_eq!(s.packets, 3);
        assert_eq!(s.flows, BTreeMap::from([((102, 12), 2), ((102, 13), 1)]));
        assert_eq!(s.retransmitters, BTreeMap::from([(12, 2), (13, 1)]));
    }

    #[test]
    fn filters_target() {
        let s = summary(
            b"\
1ns - BASE STATION - Node #300: Monitoring Message Received: From = 12 MonitorId = 102 Seq = 1 EventId = 0
2ns - BASE STATION - Node #301: Monitoring Message Received: From = 12 MonitorId = 103 Seq = 1 EventId = 0
3ns - BASE STATION - Node #300: Monitoring Message Received: From = 12 MonitorId = 104 Seq = 1 EventId = 5
4ns - BASE STATION - Node #300: Datagram From = 14 EventId = 0
",
        );
        assert_eq!(s.packets, 2);
        assert_eq!(s.monitors, BTreeSet::from([102]));
        assert_eq!(s.flows, BTreeMap::from([((102, 12), 1)]));
        assert_eq!(s.retransmitters, BTreeMap::from([(12, 1), (14, 1)]));
    }

    #[test]
    fn empty_log() {
        assert_eq!(summary(b""), FlowSummary::default());
    }

    #[test]
    fn merge_methods() {
        let mut a = summary(
            b"1ns - BASE STATION - Node #300: Monitoring Message Received: From = 12 MonitorId = 102 Seq = 1 EventId = 0\n",
        );
        let b = summary(
            b"1ns - BASE STATION - Node #300: Monitoring Message Received: From = 12 MonitorId = 102 Seq = 1 EventId = 0\n\
2ns - BASE STATION - Node #300: Monitoring Message Received: From = 15 MonitorId = 103 Seq = 1 EventId = 0\n",
        );
        a.merge(&b);
        assert_eq!(a.packets, 3);
        assert_eq!(a.flows, BTreeMap::from([((102, 12), 2), ((103, 15), 1)]));
        assert_eq!(a.unique_detections(), 2);
    }
}
