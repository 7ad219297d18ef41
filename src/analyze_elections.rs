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
//! Chart how often the most elected vehicles won under every decision method.

use std::error::Error;

use clap::Parser;
use itertools::Itertools;

use minuet_analysis::{
    config::MethodArgs,
    decision::{collect_best_choices, election_counts, top_vehicles},
    report::plot,
    util,
};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    #[command(flatten)]
    methods: MethodArgs,
    /// Number of vehicles to show.
    #[arg(long, default_value_t = 10)]
    top_n: usize,
}

fn main() {
    util::init_logging();
    if let Err(e) = run(Args::parse()) {
        log::error!("{e}");
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let counts = collect_best_choices(&args.methods)
        .into_iter()
        .map(|(method, choices)| (method, election_counts(&choices)))
        .collect_vec();
    if counts.is_empty() {
        log::warn!("No score history found");
        return Ok(());
    }

    let top = top_vehicles(&counts, args.top_n);
    log::info!("Top {} vehicles: {top:?}", top.len());

    let path = args.methods.output("elections.html")?;
    plot::election_chart(&counts, &top, &path)?;
    log::info!("Saved: {}", path.to_string_lossy());
    Ok(())
}
