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
use std::collections::BTreeMap;

use super::{ScratchDir, TARGET};
use crate::{
    decision::{agreement, collect_best_choices, election_counts, top_vehicles},
    flow::{collect_flows, FlowSummary},
    latency::collect_latencies,
    report::{plot, write_json},
};

const BASE_STATION_LOG: &str = "\
1000ns - BASE STATION - Node #300: Monitoring Message Received: From = 12 MonitorId = 102 Seq = 1 EventId = 0
3000ns - BASE STATION - Node #300: Monitoring Message Received: From = 13 MonitorId = 102 Seq = 1 EventId = 0
5000ns - BASE STATION - Node #300: Monitoring Message Received: From = 12 MonitorId = 103 Seq = 1 EventId = 0
6000ns - BASE STATION - Node #300: Monitoring Message Received: From = 12 MonitorId = 103 Seq = 2 EventId = 1
";

const DETECTION_LOG: &str = "\
500ns - DetectionLayer - Node #102: Event (0) Detected
800ns - DetectionLayer - Node #102: Event (0) Detected
2000ns - DetectionLayer - Node #103: Event (0) Detected
";

#[test]
fn agreement_from_score_histories() {
    let dir = ScratchDir::new("agreement");
    dir.write(
        "score_history_AHP.csv",
        "ns,ID,score\n100,1,0.5\n100,2,0.9\n200,3,0.4\n200,4,0.1\n",
    );
    dir.write(
        "score_history_TOPSIS.csv",
        "ns,ID,score\n100,2,0.7\n100,1,0.2\n200,4,0.8\n",
    );
    let args = dir.method_args(&["AHP", "PROMETHEE", "TOPSIS"]);

    let choices = collect_best_choices(&args);
    assert_eq!(
        choices.iter().map(|(m, _)| m.as_str()).collect::<Vec<_>>(),
        vec!["AHP", "TOPSIS"]
    );
    let report = agreement(&choices);
    assert_eq!(report.pairwise.len(), 1);
    assert_eq!(report.pairwise[0].2.percentage(), 50.0);
    assert_eq!(report.full.matches, 1);

    let counts = choices
        .iter()
        .map(|(m, c)| (m.clone(), election_counts(c)))
        .collect::<Vec<_>>();
    assert_eq!(top_vehicles(&counts, 10), vec![2, 3, 4]);
    let out = args.output("elections.html").unwrap();
    plot::election_chart(&counts, &[2, 3, 4], &out).unwrap();
    assert!(out.exists());
}

#[test]
fn flows_from_logs() {
    let dir = ScratchDir::new("flows");
    dir.write("AHP/logFileBaseStation.log", BASE_STATION_LOG);
    dir.write("BORDA/logFileBaseStation.log", BASE_STATION_LOG);
    let args = dir.method_args(&["AHP", "BORDA", "TOPSIS"]);

    let flows = collect_flows(&args, TARGET);
    assert_eq!(flows.len(), 3);
    assert_eq!(flows[0].1.packets, 3);
    assert_eq!(flows[0].1.unique_detections(), 2);
    assert_eq!(flows[2].1, FlowSummary::default());

    let mut total = FlowSummary::default();
    for (_, summary) in &flows {
        total.merge(summary);
    }
    assert_eq!(
        total.flows,
        BTreeMap::from([((102, 12), 2), ((102, 13), 2), ((103, 12), 2)])
    );

    let sankey = args.output("flow_sankey.html").unwrap();
    plot::flow_sankey(&total.flows, TARGET.bs_id, &sankey).unwrap();
    assert!(sankey.exists());

    let json = args.output("flows.json").unwrap();
    write_json(&json, &total).unwrap();
    let read: FlowSummary =
        serde_json::from_str(&std::fs::read_to_string(json).unwrap()).unwrap();
    assert_eq!(read, total);
}

#[test]
fn latency_from_logs() {
    let dir = ScratchDir::new("latency");
    dir.write("AHP/logFileBaseStation.log", BASE_STATION_LOG);
    dir.write("AHP/logFileDetectionLayer.log", DETECTION_LOG);
    // no detection log
    dir.write("TOPSIS/logFileBaseStation.log", BASE_STATION_LOG);
    let args = dir.method_args(&["AHP", "TOPSIS"]);

    let samples = collect_latencies(&args, TARGET);
    assert_eq!(samples.len(), 1);
    let (method, latencies) = &samples[0];
    assert_eq!(method, "AHP");
    // (102, 0, 1) once from 500ns to 1000ns, (103, 0, 1) from 2000ns to 5000ns
    assert_eq!(latencies.len(), 2);
    assert!((latencies[0] - 0.0005).abs() < 1e-12);
    assert!((latencies[1] - 0.003).abs() < 1e-12);

    let out = args.output("latency.html").unwrap();
    plot::latency_chart(&samples, &out).unwrap();
    assert!(out.exists());
}
