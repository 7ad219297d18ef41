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
//! Module defining the record types extracted from the simulation logs.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{EventId, NodeId};

/// Anything that happened at a known point in simulated time.
pub trait LogRecord {
    /// Simulation time in seconds.
    fn time(&self) -> f64;
}

/// Convert a nanosecond timestamp into seconds.
pub fn ns_to_secs(time_ns: u64) -> f64 {
    time_ns as f64 / 1e9
}

/// Untyped value of a `key=value` field. Numeric-looking values are stored as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Best-effort coercion of a raw (already trimmed) value.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(x) => Self::Number(x),
            Err(_) => Self::Text(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(x) => Some(*x),
            Self::Text(_) => None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
/// Event kinds reported by the clustering algorithm.
pub enum ClusterEventKind {
    PacketSent,
    ChElected,
    ChRenounced,
    RttMeasurement,
    ClusterSize,
    /// Any event this crate does not aggregate.
    #[strum(default)]
    Other(String),
}

/// One event of the clustering-algorithm log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterEvent {
    pub time_ns: u64,
    pub node_id: NodeId,
    pub kind: ClusterEventKind,
    /// All remaining fields with lower-cased keys.
    pub fields: HashMap<String, FieldValue>,
}

impl ClusterEvent {
    /// Numeric value of a field, if present and numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(FieldValue::as_f64)
    }
}

impl LogRecord for ClusterEvent {
    fn time(&self) -> f64 {
        ns_to_secs(self.time_ns)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum DeliveryKind {
    /// `Monitoring Message Received:` lines.
    MonitoringMessage,
    Other,
}

/// A datagram received at a base station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub time_ns: Option<u64>,
    pub bs_id: NodeId,
    pub kind: DeliveryKind,
    /// Last hop that delivered the datagram.
    pub from_id: Option<NodeId>,
    /// Node that originally detected the event.
    pub monitor_id: Option<NodeId>,
    pub seq: Option<u64>,
    pub event_id: EventId,
}

/// An event detected by a node of the detection layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub time_ns: u64,
    pub node_id: NodeId,
    pub event_id: EventId,
}

/// Score of one candidate at one decision point, as stored in the score history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub time_ns: u64,
    pub node_id: NodeId,
    pub score: f64,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn field_value_coercion() {
        assert_eq!(FieldValue::parse("7"), FieldValue::Number(7.0));
        assert_eq!(FieldValue::parse("0.012"), FieldValue::Number(0.012));
        assert_eq!(FieldValue::parse("abc"), FieldValue::Text("abc".to_string()));
        assert_eq!(FieldValue::parse("abc").as_f64(), None);
    }

    #[test]
    fn event_kinds() {
        assert_eq!(
            "PACKET_SENT".parse::<ClusterEventKind>().unwrap(),
            ClusterEventKind::PacketSent
        );
        assert_eq!(
            "RTT_MEASUREMENT".parse::<ClusterEventKind>().unwrap(),
            ClusterEventKind::RttMeasurement
        );
        assert_eq!(ClusterEventKind::ChRenounced.to_string(), "CH_RENOUNCED");
        assert_eq!(
            "BEACON".parse::<ClusterEventKind>().unwrap(),
            ClusterEventKind::Other("BEACON".to_string())
        );
    }
}
