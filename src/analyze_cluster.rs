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
//! Compare the clustering algorithms over all scenarios: one chart and one LaTeX table per
//! metric, plus all metrics as JSON.

use std::{error::Error, fs, path::PathBuf};

use clap::Parser;

use minuet_analysis::{
    cluster::{collect_metrics, Metric},
    report::{latex, plot, write_json},
    scenarios::ScenarioConfig,
    util::{self, PathBufExt},
};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Root of the simulation results (holding the `RTT/` directory).
    #[arg(short, long, default_value = ".")]
    base_path: PathBuf,
    /// Directory for the generated charts and tables.
    #[arg(short, long, default_value = ".")]
    output_path: PathBuf,
    /// JSON file mapping every scenario and algorithm to its clustering log.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Simulation duration in seconds. Takes precedence over the configuration file.
    #[arg(long)]
    simulation_duration: Option<f64>,
}

fn main() {
    util::init_logging();
    if let Err(e) = run(Args::parse()) {
        log::error!("{e}");
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => ScenarioConfig::from_file(path, &args.base_path)?,
        None => ScenarioConfig::rtt_layout(&args.base_path),
    };
    if let Some(duration) = args.simulation_duration {
        config.simulation_duration = duration;
    }

    log::info!("Starting comparative analysis...");
    let table = collect_metrics(&config);
    if table.is_empty() {
        log::warn!("No scenario configured, nothing to report");
        return Ok(());
    }

    fs::create_dir_all(&args.output_path)?;
    for metric in Metric::REPORTED {
        let chart = args.output_path.clone().then(format!("comparative_{metric}.html"));
        plot::metric_chart(&table, metric, &chart)?;
        log::info!("Saved: {}", chart.to_string_lossy());

        let tex = args.output_path.clone().then(format!("table_{metric}.tex"));
        latex::write_metric_table(&table, metric, &tex)?;
        log::info!("LaTeX table saved: {}", tex.to_string_lossy());
    }

    let json = args.output_path.clone().then("metrics.json");
    write_json(&json, &table)?;
    log::info!("Saved: {}", json.to_string_lossy());

    log::info!("Analysis complete");
    Ok(())
}
