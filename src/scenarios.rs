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
//! Describes which clustering log belongs to which (scenario, algorithm) pair.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::util::PathBufExt;

/// Duration of every simulation run, in seconds.
pub const DEFAULT_SIMULATION_DURATION: f64 = 600.0;

/// Vehicle counts of the default scenarios.
pub const DEFAULT_SCENARIOS: [usize; 4] = [150, 300, 450, 600];

/// Variants of the RTT clustering algorithm, in the order of their `RTTV<k>` directories.
pub const DEFAULT_ALGORITHMS: [&str; 4] = [
    "RTT-B (Baseline)",
    "RTT-H (Hesitation)",
    "RTT-G (Grace Period)",
    "RTT-HG (Combined)",
];

pub const CLUSTER_LOG_FILE: &str = "logFileClusteringAlgorithm.log";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scenario configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("The scenario configuration contains no scenarios")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Horizon used to close cluster-head tenures that were never renounced.
    #[serde(default = "_default_simulation_duration")]
    pub simulation_duration: f64,
    pub scenarios: Vec<ScenarioLogs>,
}

/// All algorithms run on one scenario (identified by its vehicle count).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioLogs {
    pub label: String,
    pub algorithms: Vec<AlgorithmLog>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmLog {
    pub name: String,
    pub path: PathBuf,
}

const fn _default_simulation_duration() -> f64 {
    DEFAULT_SIMULATION_DURATION
}

impl ScenarioConfig {
    /// The layout written by the simulation scripts:
    /// `<base>/RTT/V<vehicles>/RTTV<k>/logFileClusteringAlgorithm.log`.
    pub fn rtt_layout(base_path: impl AsRef<Path>) -> Self {
        let base_path = base_path.as_ref();
        Self {
            simulation_duration: DEFAULT_SIMULATION_DURATION,
            scenarios: DEFAULT_SCENARIOS
                .iter()
                .map(|vehicles| ScenarioLogs {
                    label: vehicles.to_string(),
                    algorithms: DEFAULT_ALGORITHMS
                        .iter()
                        .enumerate()
                        .map(|(k, name)| AlgorithmLog {
                            name: name.to_string(),
                            path: base_path
                                .then("RTT")
                                .then(format!("V{vehicles}"))
                                .then(format!("RTTV{k}"))
                                .then(CLUSTER_LOG_FILE),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Load a configuration from a JSON file. Relative log paths are resolved against
    /// `base_path`.
    pub fn from_file(
        path: impl AsRef<Path>,
        base_path: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(&fs::read_to_string(path.as_ref())?)?;
        if config.scenarios.is_empty() {
            return Err(ConfigError::Empty);
        }
        for algorithm in config
            .scenarios
            .iter_mut()
            .flat_map(|s| s.algorithms.iter_mut())
        {
            if algorithm.path.is_relative() {
                algorithm.path = base_path.as_ref().then(&algorithm.path);
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_layout() {
        let config = ScenarioConfig::rtt_layout("/data");
        assert_eq!(config.simulation_duration, 600.0);
        assert_eq!(config.scenarios.len(), 4);
        assert_eq!(config.scenarios[1].label, "300");
        let algorithm = &config.scenarios[1].algorithms[2];
        assert_eq!(algorithm.name, "RTT-G (Grace Period)");
        assert_eq!(
            algorithm.path,
            PathBuf::from("/data/RTT/V300/RTTV2/logFileClusteringAlgorithm.log")
        );
    }

    #[test]
    fn from_json() {
        let config: ScenarioConfig = serde_json::from_str(
            r#"{"scenarios": [{"label": "50", "algorithms": [{"name": "A", "path": "a.log"}]}]}"#,
        )
        .unwrap();
        assert_eq!(config.simulation_duration, DEFAULT_SIMULATION_DURATION);
        assert_eq!(config.scenarios[0].algorithms[0].path, PathBuf::from("a.log"));
    }

    #[test]
    fn missing_config_file() {
        assert!(matches!(
            ScenarioConfig::from_file("/nonexistent/scenarios.json", "."),
            Err(ConfigError::Io(_))
        ));
    }
}
