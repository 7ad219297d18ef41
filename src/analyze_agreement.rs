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
//! Print how often the decision methods elected the same relay.

use std::error::Error;

use clap::Parser;

use minuet_analysis::{
    config::MethodArgs,
    decision::{agreement, collect_best_choices},
    util,
};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    #[command(flatten)]
    methods: MethodArgs,
}

fn main() {
    util::init_logging();
    if let Err(e) = run(Args::parse()) {
        log::error!("{e}");
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let choices = collect_best_choices(&args.methods);
    if choices.is_empty() {
        log::warn!("No score history found");
        return Ok(());
    }
    println!("{}", agreement(&choices));
    Ok(())
}
