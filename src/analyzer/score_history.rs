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
//! Reader for the `score_history_<METHOD>.csv` files written by the decision methods.
//!
//! Every row holds the score of one candidate at one decision point. The decision time and the
//! candidate are taken from the `ns` and `ID` columns (or the first two columns if the header
//! does not name them), the score is always the last column.

use std::{io::Read, path::Path};

use csv::StringRecord;

use crate::records::Decision;

use super::log_parser::{open_log, parse_num};

/// Lazily read all decisions of a score history. Malformed rows are skipped.
pub fn decisions<R: Read>(reader: R) -> impl Iterator<Item = Decision> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let (time_col, id_col) = match csv.headers() {
        Ok(header) => (
            header.iter().position(|c| c == "ns").unwrap_or(0),
            header.iter().position(|c| c == "ID").unwrap_or(1),
        ),
        Err(e) => {
            log::warn!("Cannot read score history header: {e}");
            (0, 1)
        }
    };

    csv.into_records()
        .filter_map(Result::ok)
        .filter_map(move |record| decision(&record, time_col, id_col))
}

fn decision(record: &StringRecord, time_col: usize, id_col: usize) -> Option<Decision> {
    // need at least the time, the candidate and one score
    if record.len() < 3 {
        return None;
    }
    let score: f64 = parse_num(record.get(record.len() - 1)?)?;
    if score.is_nan() {
        return None;
    }
    Some(Decision {
        time_ns: parse_num(record.get(time_col)?)?,
        node_id: parse_num(record.get(id_col)?)?,
        score,
    })
}

/// Read all decisions of the score history at `path`. Returns `None` if the file is missing.
pub fn read_score_history(path: &Path) -> Option<Vec<Decision>> {
    let reader = open_log(path, "score history")?;
    let decisions = decisions(reader).collect::<Vec<_>>();
    log::debug!("Read {} decisions from {path:?}", decisions.len());
    Some(decisions)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn positional_columns() {
        let csv: &[u8] = b"\
time,node,c1,c2,FinalScore
100,4,0.1,0.2,0.75
100,5,0.1,0.2,0.80
bad,5,0.1,0.2,0.80
200,6
200,7,x,NaN
300,8,0.1,0.2,notanumber
";
        let got: Vec<Decision> = decisions(csv).collect();
        assert_eq!(
            got,
            vec![
                Decision {
                    time_ns: 100,
                    node_id: 4,
                    score: 0.75
                },
                Decision {
                    time_ns: 100,
                    node_id: 5,
                    score: 0.8
                },
            ]
        );
    }

    #[test]
    fn named_columns() {
        let csv: &[u8] = b"\
ICR, ID, ns, Score
0.3, 9, 1000, 1.5
";
        let got: Vec<Decision> = decisions(csv).collect();
        assert_eq!(
            got,
            vec![Decision {
                time_ns: 1000,
                node_id: 9,
                score: 1.5
            }]
        );
    }

    #[test]
    fn missing_file() {
        assert!(read_score_history(Path::new("/nonexistent/score_history_AHP.csv")).is_none());
    }
}
