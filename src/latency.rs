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
//! End-to-end latency between the detection of an event and its delivery at the base station.

use std::collections::{HashMap, HashSet};

use crate::{
    analyzer::{BaseStationLogParser, DetectionLogParser, LogParser},
    config::{MethodArgs, TargetArgs},
    records::{Delivery, Detection},
    EventId, NodeId,
};

/// Time (in nanoseconds) at which a node first detected an event.
pub type CreationTimes = HashMap<(NodeId, EventId), u64>;

/// First logged detection of `event_id` by every node. Later lines never replace it, even if
/// they carry an earlier timestamp.
pub fn creation_times(
    detections: impl IntoIterator<Item = Detection>,
    event_id: EventId,
) -> CreationTimes {
    let mut creation = CreationTimes::new();
    for d in detections.into_iter().filter(|d| d.event_id == event_id) {
        creation.entry((d.node_id, d.event_id)).or_insert(d.time_ns);
    }
    creation
}

/// Latency (in milliseconds) of every distinct `(monitor, event, seq)` delivery at `bs_id`.
///
/// Deliveries without a known creation time are skipped. A delivery stamped before the
/// detection is discarded without consuming its sequence number, so a later copy of the same
/// datagram still counts.
pub fn latencies(
    deliveries: impl IntoIterator<Item = Delivery>,
    bs_id: NodeId,
    creation: &CreationTimes,
) -> Vec<f64> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for d in deliveries.into_iter().filter(|d| d.bs_id == bs_id) {
        let (Some(time), Some(monitor), Some(seq)) = (d.time_ns, d.monitor_id, d.seq) else {
            continue;
        };
        let key = (monitor, d.event_id, seq);
        if seen.contains(&key) {
            continue;
        }
        let Some(created) = creation.get(&(monitor, d.event_id)) else {
            continue;
        };
        let Some(latency) = time.checked_sub(*created) else {
            log::trace!("Delivery of {key:?} at {time}ns precedes its detection at {created}ns");
            continue;
        };
        seen.insert(key);
        result.push(latency as f64 / 1e6);
    }
    result
}

/// Latency samples of every method, in the order of `args.methods`. Methods missing either the
/// detection or the base station log are skipped.
pub fn collect_latencies(args: &MethodArgs, target: TargetArgs) -> Vec<(String, Vec<f64>)> {
    let detection_parser = DetectionLogParser::new();
    let delivery_parser = BaseStationLogParser::new();
    args.methods
        .iter()
        .filter_map(|method| {
            let detection_log = args.detection_log(method);
            let delivery_log = args.base_station_log(method);
            if !detection_log.exists() || !delivery_log.exists() {
                log::warn!("Skipping {method}: missing {detection_log:?} or {delivery_log:?}");
                return None;
            }
            let creation =
                creation_times(detection_parser.parse_file(&detection_log), target.event_id);
            let samples = latencies(
                delivery_parser.parse_file(&delivery_log),
                target.bs_id,
                &creation,
            );
            log::info!("{method}: {} latency samples", samples.len());
            Some((method.clone(), samples))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::records::DeliveryKind;

    fn detection(time_ns: u64, node_id: NodeId, event_id: EventId) -> Detection {
        Detection {
            time_ns,
            node_id,
            event_id,
        }
    }

    fn delivery(time_ns: u64, monitor: NodeId, seq: u64) -> Delivery {
        Delivery {
            time_ns: Some(time_ns),
            bs_id: 300,
            kind: DeliveryKind::MonitoringMessage,
            from_id: Some(12),
            monitor_id: Some(monitor),
            seq: Some(seq),
            event_id: 0,
        }
    }

    #[test]
    fn first_detection() {
        let creation = creation_times(
            [
                detection(500, 102, 0),
                detection(200, 102, 0),
                detection(100, 103, 1),
            ],
            0,
        );
        assert_eq!(creation, CreationTimes::from([((102, 0), 500)]));
    }

    #[test]
    fn delivery_before_detection() {
        let creation = creation_times([detection(100, 102, 0)], 0);
        assert!(latencies([delivery(50, 102, 1)], 300, &creation).is_empty());
        // the discarded copy does not hide a later valid one
        assert_eq!(
            latencies([delivery(50, 102, 1), delivery(2_000_100, 102, 1)], 300, &creation),
            vec![2.0]
        );
    }

    #[test]
    fn duplicate_sequence() {
        let creation = creation_times([detection(1_000_000, 102, 0)], 0);
        let samples = latencies(
            [
                delivery(3_000_000, 102, 7),
                delivery(4_000_000, 102, 7),
                delivery(5_000_000, 102, 8),
            ],
            300,
            &creation,
        );
        assert_eq!(samples, vec![2.0, 4.0]);
        assert!(samples.iter().all(|l| *l >= 0.0));
    }

    #[test]
    fn unknown_detector_or_station() {
        let creation = creation_times([detection(0, 102, 0)], 0);
        let mut other = delivery(10, 102, 1);
        other.bs_id = 301;
        assert!(latencies([delivery(10, 999, 1), other], 300, &creation).is_empty());
    }
}
