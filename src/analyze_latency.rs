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
//! Chart the distribution of the detection-to-delivery latency of every decision method.

use std::error::Error;

use clap::Parser;
use statrs::statistics::Statistics;

use minuet_analysis::{
    config::{MethodArgs, TargetArgs},
    latency::collect_latencies,
    report::plot,
    util,
};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    #[command(flatten)]
    methods: MethodArgs,
    #[command(flatten)]
    target: TargetArgs,
}

fn main() {
    util::init_logging();
    if let Err(e) = run(Args::parse()) {
        log::error!("{e}");
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let samples = collect_latencies(&args.methods, args.target);
    if samples.iter().all(|(_, s)| s.is_empty()) {
        log::warn!("No latency sample found");
        return Ok(());
    }
    for (method, latencies) in samples.iter().filter(|(_, s)| !s.is_empty()) {
        log::info!(
            "{method}: mean latency {:.3} ms over {} samples",
            latencies.iter().mean(),
            latencies.len()
        );
    }

    let path = args.methods.output("latency.html")?;
    plot::latency_chart(&samples, &path)?;
    log::info!("Saved: {}", path.to_string_lossy());
    Ok(())
}
