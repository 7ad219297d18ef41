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
use std::collections::HashMap;

use regex::Regex;

use crate::records::{ClusterEvent, ClusterEventKind, FieldValue};

use super::log_parser::{parse_num, GenericLog, GenericLogParser, LogParser};

/// Parser for `logFileClusteringAlgorithm.log`.
///
/// Lines look like `12.5s - RTT-B - Node #4 : event=CH_ELECTED;ch_id=4`.
pub struct ClusterLogParser {
    parser: GenericLogParser<ClusterLineKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterLineKind {
    Event,
}

impl LogParser<ClusterEvent, ClusterLineKind> for ClusterLogParser {
    fn new() -> Self {
        Self {
            parser: GenericLogParser::new_from::<Self, _>(),
        }
    }

    fn description() -> &'static str {
        "clustering algorithm"
    }

    fn re() -> Vec<(ClusterLineKind, Regex)> {
        vec![(
            ClusterLineKind::Event,
            Regex::new(r"^.*? - Node #(\d+) : (.*)$").unwrap(),
        )]
    }

    fn generic(&self) -> &GenericLogParser<ClusterLineKind> {
        &self.parser
    }

    fn record(&self, log: GenericLog<ClusterLineKind>) -> Option<ClusterEvent> {
        let GenericLog { time, groups, .. } = log;
        // lines without a timestamp are not events
        let time_ns = time?;
        let node_id = groups.get(1).and_then(parse_num)?;
        let mut fields = parse_fields(groups.get(2)?);
        let kind = match fields.remove("event")? {
            FieldValue::Text(s) => s,
            FieldValue::Number(x) => x.to_string(),
        };
        let kind = kind.trim().to_uppercase().parse::<ClusterEventKind>().ok()?;

        Some(ClusterEvent {
            time_ns,
            node_id,
            kind,
            fields,
        })
    }
}

/// Split a `key=value;key=value` string. Keys are lower-cased, parts without `=` are ignored and
/// later duplicates overwrite earlier ones.
pub fn parse_fields(s: &str) -> HashMap<String, FieldValue> {
    s.trim()
        .split(';')
        .filter_map(|part| part.split_once('='))
        .map(|(k, v)| (k.trim().to_lowercase(), FieldValue::parse(v.trim())))
        .collect()
}
