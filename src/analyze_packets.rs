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
//! Chart how many datagrams of the event reached the base station under every decision method.

use std::error::Error;

use clap::Parser;
use itertools::Itertools;

use minuet_analysis::{
    config::{MethodArgs, TargetArgs},
    flow::collect_flows,
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
    let packets = collect_flows(&args.methods, args.target)
        .into_iter()
        .map(|(method, summary)| (method, summary.packets as f64))
        .collect_vec();

    let path = args.methods.output("packets.html")?;
    plot::method_bars(
        &packets,
        "Datagrams Received by the RSU",
        "Number of Datagrams",
        &path,
    )?;
    log::info!("Saved: {}", path.to_string_lossy());
    Ok(())
}
