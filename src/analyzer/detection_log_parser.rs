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

use crate::records::Detection;

use super::log_parser::{parse_num, GenericLog, GenericLogParser, LogParser};

/// Parser for `logFileDetectionLayer.log`.
pub struct DetectionLogParser {
    parser: GenericLogParser<DetectionKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionKind {
    Detected,
}

impl LogParser<Detection, DetectionKind> for DetectionLogParser {
    fn new() -> Self {
        Self {
            parser: GenericLogParser::new_from::<Self, _>(),
        }
    }

    fn description() -> &'static str {
        "detection layer"
    }

    fn re() -> Vec<(DetectionKind, Regex)> {
        vec![(
            DetectionKind::Detected,
            Regex::new(r"^DetectionLayer - Node #(\d+).*?: Event \((\d+)\) Detected").unwrap(),
        )]
    }

    fn generic(&self) -> &GenericLogParser<DetectionKind> {
        &self.parser
    }

    fn record(&self, log: GenericLog<DetectionKind>) -> Option<Detection> {
        let GenericLog { time, groups, .. } = log;
        Some(Detection {
            time_ns: time?,
            node_id: groups.get(1).and_then(parse_num)?,
            event_id: groups.get(2).and_then(parse_num)?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn detected() {
        GenericLogParser::new_from::<DetectionLogParser, _>().test_line(
            "1000ns - DetectionLayer - Node #102 (x=10, y=20): Event (0) Detected",
            Some((DetectionKind::Detected, ["102", "0"])),
        )
    }

    #[test]
    fn other_layer() {
        GenericLogParser::new_from::<DetectionLogParser, _>().test_line::<0>(
            "1000ns - BASE STATION - Node #102: Event (0) Detected",
            None,
        )
    }

    #[test]
    fn requires_timestamp() {
        let log: &[u8] = b"\
DetectionLayer - Node #102: Event (0) Detected
1000ns - DetectionLayer - Node #102: Event (0) Detected
";
        let records: Vec<Detection> = DetectionLogParser::new().parse(log).collect();
        assert_eq!(
            records,
            vec![Detection {
                time_ns: 1000,
                node_id: 102,
                event_id: 0
            }]
        );
    }
}
