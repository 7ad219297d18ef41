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
//! Draw the flows of one event from its detectors over the retransmitters to the base station,
//! consolidated over all decision methods.

use std::error::Error;

use clap::Parser;

use minuet_analysis::{
    config::{MethodArgs, TargetArgs},
    flow::{collect_flows, FlowSummary},
    report::{plot, write_json},
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
    let mut total = FlowSummary::default();
    for (_, summary) in collect_flows(&args.methods, args.target) {
        total.merge(&summary);
    }
    if total.flows.is_empty() {
        log::warn!(
            "No flow of event {} reached base station {}",
            args.target.event_id,
            args.target.bs_id
        );
        return Ok(());
    }

    let path = args.methods.output("flow_sankey.html")?;
    plot::flow_sankey(&total.flows, args.target.bs_id, &path)?;
    log::info!("Saved: {}", path.to_string_lossy());

    let path = args.methods.output("flows.json")?;
    write_json(&path, &total)?;
    log::info!("Saved: {}", path.to_string_lossy());
    Ok(())
}
