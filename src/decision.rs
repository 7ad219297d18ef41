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
//! Relay election analysis: winners per decision point and agreement between decision methods.

use std::{
    collections::{btree_map::Entry, BTreeMap},
    fmt,
};

use itertools::Itertools;
use serde::Serialize;

use crate::{analyzer::read_score_history, config::MethodArgs, records::Decision, NodeId};

/// Winning node per decision time (in nanoseconds).
pub type BestChoices = BTreeMap<u64, NodeId>;

/// Select the candidate with the highest score at every decision point. Among candidates with
/// the same score, the one that appears first wins.
pub fn best_choices(decisions: impl IntoIterator<Item = Decision>) -> BestChoices {
    let mut best: BTreeMap<u64, Decision> = BTreeMap::new();
    for d in decisions {
        match best.entry(d.time_ns) {
            Entry::Vacant(e) => {
                e.insert(d);
            }
            Entry::Occupied(mut e) => {
                if d.score > e.get().score {
                    e.insert(d);
                }
            }
        }
    }
    best.into_iter().map(|(t, d)| (t, d.node_id)).collect()
}

/// Winners of every method with a score history, in the order of `args.methods`. Methods without
/// a score history are skipped.
pub fn collect_best_choices(args: &MethodArgs) -> Vec<(String, BestChoices)> {
    args.methods
        .iter()
        .filter_map(|method| {
            let Some(decisions) = read_score_history(&args.score_history(method)) else {
                log::warn!("Skipping {method}: no score history");
                return None;
            };
            let choices = best_choices(decisions);
            log::info!("{method}: {} decision points", choices.len());
            Some((method.clone(), choices))
        })
        .collect()
}

/// How often a set of methods picked the same winner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Agreement {
    pub matches: usize,
    pub comparisons: usize,
}

impl Agreement {
    /// Share of matching decisions in percent, zero if nothing was compared.
    pub fn percentage(&self) -> f64 {
        if self.comparisons == 0 {
            0.0
        } else {
            self.matches as f64 / self.comparisons as f64 * 100.0
        }
    }

    fn record(&mut self, matched: bool) {
        self.comparisons += 1;
        if matched {
            self.matches += 1;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AgreementReport {
    pub methods: Vec<String>,
    /// Agreement of every pair of methods, in the order of `methods`.
    pub pairwise: Vec<(String, String, Agreement)>,
    /// Agreement of all methods, counted only where every method decided.
    pub full: Agreement,
}

/// Compare the winners of all `methods`.
pub fn agreement(methods: &[(String, BestChoices)]) -> AgreementReport {
    let pairwise = methods
        .iter()
        .tuple_combinations()
        .map(|((m1, c1), (m2, c2))| {
            let mut agreement = Agreement::default();
            for (t, w1) in c1 {
                if let Some(w2) = c2.get(t) {
                    agreement.record(w1 == w2);
                }
            }
            (m1.clone(), m2.clone(), agreement)
        })
        .collect();

    let mut full = Agreement::default();
    if let Some(((_, first), others)) = methods.split_first() {
        for (t, winner) in first {
            let Some(winners) = others
                .iter()
                .map(|(_, choices)| choices.get(t))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            full.record(winners.into_iter().all(|w| w == winner));
        }
    }

    AgreementReport {
        methods: methods.iter().map(|(m, _)| m.clone()).collect(),
        pairwise,
        full,
    }
}

impl fmt::Display for AgreementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Pairwise Agreement ---")?;
        writeln!(f, "{}", "-".repeat(51))?;
        writeln!(f, "| Comparison          | Agreement     | Percentage  |")?;
        writeln!(f, "{}", "-".repeat(51))?;
        for (m1, m2, a) in &self.pairwise {
            writeln!(
                f,
                "| {m1:<9} vs. {m2:<9} | {:<13} | {:>10.2}% |",
                a.matches,
                a.percentage()
            )?;
        }
        writeln!(f, "{}", "-".repeat(51))?;

        if self.full.comparisons == 0 {
            return writeln!(
                f,
                "\nNo decision point where all {} methods decided.",
                self.methods.len()
            );
        }
        writeln!(
            f,
            "\nDecision points where all {} methods decided: {}\n",
            self.methods.len(),
            self.full.comparisons
        )?;
        writeln!(f, "--- Full Agreement ---")?;
        writeln!(f, "{}", "-".repeat(65))?;
        writeln!(
            f,
            "| Comparison                  | Agreement     | Percentage      |"
        )?;
        writeln!(f, "{}", "-".repeat(65))?;
        writeln!(
            f,
            "| {:<27} | {:<13} | {:>10.2}%      |",
            "All Methods",
            self.full.matches,
            self.full.percentage()
        )?;
        writeln!(f, "{}", "-".repeat(65))
    }
}

/// Number of decision points won by every node.
pub fn election_counts(choices: &BestChoices) -> BTreeMap<NodeId, usize> {
    choices.values().copied().counts().into_iter().collect()
}

/// The `n` nodes with the most wins summed over all methods. Ties are broken by node id.
pub fn top_vehicles(counts: &[(String, BTreeMap<NodeId, usize>)], n: usize) -> Vec<NodeId> {
    let mut totals: BTreeMap<NodeId, usize> = BTreeMap::new();
    for (node, count) in counts.iter().flat_map(|(_, c)| c) {
        *totals.entry(*node).or_default() += count;
    }
    totals
        .into_iter()
        .sorted_by(|(n1, t1), (n2, t2)| t2.cmp(t1).then(n1.cmp(n2)))
        .take(n)
        .map(|(node, _)| node)
        .collect()
}
