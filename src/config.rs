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
//! Command-line arguments shared by the analysis binaries.

use std::{fs, io, path::PathBuf};

use crate::{util::PathBufExt, EventId, NodeId};

/// Decision methods compared by default, in plot order.
pub const DEFAULT_METHODS: [&str; 4] = ["AHP", "PROMETHEE", "TOPSIS", "BORDA"];

pub const BASE_STATION_LOG_FILE: &str = "logFileBaseStation.log";
pub const DETECTION_LOG_FILE: &str = "logFileDetectionLayer.log";
pub const SCORE_HISTORY_FILE: &str = "score_history_{}.csv";

/// Where to find the logs of every decision method and where to put the results.
#[derive(clap::Args, Debug, Clone)]
pub struct MethodArgs {
    /// Directory holding one sub-directory (and one score history) per decision method.
    #[arg(short, long, default_value = ".")]
    pub base_path: PathBuf,
    /// Decision methods to analyze, in plot order.
    #[arg(short, long, value_delimiter = ',', default_values_t = DEFAULT_METHODS.map(String::from))]
    pub methods: Vec<String>,
    /// Directory for the generated charts and tables.
    #[arg(short, long, default_value = ".")]
    pub output_path: PathBuf,
}

impl MethodArgs {
    pub fn base_station_log(&self, method: &str) -> PathBuf {
        self.base_path.clone().then(method).then(BASE_STATION_LOG_FILE)
    }

    pub fn detection_log(&self, method: &str) -> PathBuf {
        self.base_path.clone().then(method).then(DETECTION_LOG_FILE)
    }

    pub fn score_history(&self, method: &str) -> PathBuf {
        self.base_path.clone().then_method(SCORE_HISTORY_FILE, method)
    }

    /// Path of an output file. Creates the output directory if necessary.
    pub fn output(&self, file: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.output_path)?;
        Ok(self.output_path.clone().then(file))
    }
}

/// Base station and event whose deliveries are analyzed.
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct TargetArgs {
    /// Node id of the base station (RSU).
    #[arg(long, default_value_t = 300)]
    pub bs_id: NodeId,
    /// Id of the detected event.
    #[arg(long, default_value_t = 0)]
    pub event_id: EventId,
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::*;

    #[derive(Parser, Debug)]
    struct Args {
        #[command(flatten)]
        methods: MethodArgs,
        #[command(flatten)]
        target: TargetArgs,
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["test"]);
        assert_eq!(args.methods.methods, DEFAULT_METHODS);
        assert_eq!(args.target.bs_id, 300);
        assert_eq!(args.target.event_id, 0);
        assert_eq!(
            args.methods.base_station_log("AHP"),
            PathBuf::from("./AHP/logFileBaseStation.log")
        );
        assert_eq!(
            args.methods.score_history("BORDA"),
            PathBuf::from("./score_history_BORDA.csv")
        );
    }

    #[test]
    fn method_list() {
        let args = Args::parse_from(["test", "-m", "AHP,TOPSIS", "--bs-id", "12", "-b", "runs"]);
        assert_eq!(args.methods.methods, ["AHP", "TOPSIS"]);
        assert_eq!(args.target.bs_id, 12);
        assert_eq!(
            args.methods.detection_log("TOPSIS"),
            PathBuf::from("runs/TOPSIS/logFileDetectionLayer.log")
        );
    }
}
