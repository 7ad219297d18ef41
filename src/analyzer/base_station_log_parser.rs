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
use regex::Regex;

use crate::records::{Delivery, DeliveryKind};

use super::log_parser::{parse_num, GenericLog, GenericLogParser, LogParser};

/// Parser for `logFileBaseStation.log`.
pub struct BaseStationLogParser {
    parser: GenericLogParser<DeliveryKind>,
}

lazy_static::lazy_static! {
    static ref FROM_RE: Regex = Regex::new(r"From = (\d+)").unwrap();
    static ref MONITOR_RE: Regex = Regex::new(r"MonitorId = (\d+)").unwrap();
    static ref SEQ_RE: Regex = Regex::new(r"Seq = (\d+)").unwrap();
    static ref EVENT_RE: Regex = Regex::new(r"EventId = (\d+)").unwrap();
}

/// Value of the first `<name> = <number>` field in `body`.
fn field<N: std::str::FromStr>(re: &Regex, body: &str) -> Option<N> {
    re.captures(body)
        .and_then(|m| m.get(1))
        .and_then(|m| parse_num(m.as_str()))
}

impl LogParser<Delivery, DeliveryKind> for BaseStationLogParser {
    fn new() -> Self {
        Self {
            parser: GenericLogParser::new_from::<Self, _>(),
        }
    }

    fn description() -> &'static str {
        "base station"
    }

    fn re() -> Vec<(DeliveryKind, Regex)> {
        vec![
            (
                DeliveryKind::MonitoringMessage,
                Regex::new(r"Node #(\d+): Monitoring Message Received: (.*)$").unwrap(),
            ),
            (
                DeliveryKind::Other,
                Regex::new(r"Node #(\d+): (.*)$").unwrap(),
            ),
        ]
    }

    fn generic(&self) -> &GenericLogParser<DeliveryKind> {
        &self.parser
    }

    fn record(&self, log: GenericLog<DeliveryKind>) -> Option<Delivery> {
        let GenericLog { kind, time, groups } = log;
        let bs_id = groups.get(1).and_then(parse_num)?;
        let body = groups.get(2)?;
        // every datagram we care about is tagged with the event it reports
        let event_id = field(&EVENT_RE, body)?;

        Some(Delivery {
            time_ns: time,
            bs_id,
            kind,
            from_id: field(&FROM_RE, body),
            monitor_id: field(&MONITOR_RE, body),
            seq: field(&SEQ_RE, body),
            event_id,
        })
    }
}
