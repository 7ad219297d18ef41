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
//! LaTeX tables (booktabs) of the cluster metrics.

use std::{fs, path::Path};

use itertools::Itertools;

use super::ReportError;
use crate::cluster::{Metric, MetricsTable};

const FLOAT_BEGIN: &str = "% \\begin{table*}[t]\n\\centering\n\\begingroup\n\\footnotesize\n";
const FLOAT_END: &str = "\n\\endgroup\n% \\end{table*}\n";

/// Render `metric` as a table with one row per scenario and one column per algorithm.
pub fn metric_table(table: &MetricsTable, metric: Metric) -> String {
    let precision = metric.precision();
    let algorithms = table.algorithms();

    let rows = table
        .scenarios()
        .iter()
        .map(|scenario| {
            let values = table
                .row(scenario, metric)
                .map(|v| format!("{v:.precision$}"))
                .join(" & ");
            format!("{scenario} & {values} \\\\\n")
        })
        .collect::<String>();

    format!(
        "{FLOAT_BEGIN}\\begin{{table}}\n\\caption{{{caption}}}\n\\label{{tab:{metric}}}\n\
         \\begin{{tabular}}{{l{columns}}}\n\\toprule\nScenario & {header} \\\\\n\\midrule\n\
         {rows}\\bottomrule\n\\end{{tabular}}\n\\end{{table}}\n{FLOAT_END}",
        caption = metric.caption(),
        columns = "c".repeat(algorithms.len()),
        header = algorithms.join(" & "),
    )
}

pub fn write_metric_table(
    table: &MetricsTable,
    metric: Metric,
    path: &Path,
) -> Result<(), ReportError> {
    log::debug!("Writing {}", path.to_string_lossy());
    fs::write(path, metric_table(table, metric))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cluster::ClusterMetrics;

    #[test]
    fn table_layout() {
        let mut table = MetricsTable::new();
        let metrics = ClusterMetrics {
            avg_rtt_ms: 12.346,
            overhead_total: 42,
            ..Default::default()
        };
        table.insert("300", "RTT-B (Baseline)", metrics);
        table.insert("150", "RTT-B (Baseline)", metrics);
        table.insert("150", "RTT-H (Hesitation)", ClusterMetrics::default());

        let tex = metric_table(&table, Metric::AvgRttMs);
        assert!(
            tex.starts_with("% \\begin{table*}[t]\n\\centering\n\\begingroup\n\\footnotesize\n")
        );
        assert!(tex.ends_with("\\endgroup\n% \\end{table*}\n"));
        assert!(tex.contains("\\caption{Average RTT (ms)}"));
        assert!(tex.contains("\\label{tab:avg_rtt_ms}"));
        assert!(tex.contains("\\begin{tabular}{lcc}"));
        assert!(tex.contains("Scenario & RTT-B (Baseline) & RTT-H (Hesitation) \\\\"));
        assert!(tex.contains("150 & 12.35 & 0.00 \\\\\n300 & 12.35 & 0.00 \\\\"));

        let tex = metric_table(&table, Metric::OverheadTotal);
        assert!(tex.contains("150 & 42 & 0 \\\\"));
    }
}
