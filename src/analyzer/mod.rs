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
//! Extraction of typed records from the simulator's log files.

pub mod base_station_log_parser;
pub mod cluster_log_parser;
pub mod detection_log_parser;
pub mod log_parser;
pub mod score_history;

pub use base_station_log_parser::BaseStationLogParser;
pub use cluster_log_parser::ClusterLogParser;
pub use detection_log_parser::DetectionLogParser;
pub use log_parser::{GenericLog, GenericLogParser, LogParser};
pub use score_history::read_score_history;
