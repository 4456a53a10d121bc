//! End-to-end pipeline tests: each test writes a temp JSON netlist, then
//! exercises the library's `run_analysis` entry point and checks the
//! resulting arrival/required/slack values.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use sta_engine::config::AnalysisConfig;
use sta_engine::run_analysis;

fn write_temp_json(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("netlist.json");
    fs::write(&path, contents).expect("write temp netlist");
    (dir, path)
}

/// Single inverter. `arrival[1]=0, arrival[2]=5`,
/// `required[1] = required[2] - d_NOT = 42 - 5 = 37`, `slack[1] = 37` (see
/// DESIGN.md for why `required[1]` is 37 rather than a naive 42).
#[test]
fn single_inverter() {
    let json = r#"{
        "modules": { "top": {
            "cells": { "u1": {
                "type": "$_NOT_",
                "port_directions": { "A": "input", "Y": "output" },
                "connections": { "A": [1], "Y": [2] }
            }},
            "ports": {
                "a": { "direction": "input", "bits": [1] },
                "y": { "direction": "output", "bits": [2] }
            },
            "netnames": { "a": { "bits": [1] }, "y": { "bits": [2] } }
        }}
    }"#;
    let (_dir, path) = write_temp_json(json);
    let text = fs::read_to_string(&path).unwrap();
    let config = AnalysisConfig::default();
    let (_netlist, report) = run_analysis(&text, &config).unwrap();

    let slack = report.get_slack();
    assert_eq!(report.timing_of(1).unwrap().arrival_ps, 0.0);
    assert_eq!(report.timing_of(2).unwrap().arrival_ps, 5.0);
    assert_eq!(report.timing_of(2).unwrap().required_ps, 42.0);
    assert_eq!(report.timing_of(1).unwrap().required_ps, 37.0);
    assert_eq!(slack[&1], 37.0);
    assert_eq!(slack[&2], 37.0);
}

/// `a=1,b=2 -> AND -> 3 -> NOT -> 4`. See `timing::forward` tests for the
/// RC-convention note this depends on.
#[test]
fn and_then_not_chain() {
    let json = r#"{
        "modules": { "top": {
            "cells": {
                "u1": {
                    "type": "$_AND_",
                    "port_directions": { "A": "input", "B": "input", "Y": "output" },
                    "connections": { "A": [1], "B": [2], "Y": [3] }
                },
                "u2": {
                    "type": "$_NOT_",
                    "port_directions": { "A": "input", "Y": "output" },
                    "connections": { "A": [3], "Y": [4] }
                }
            },
            "ports": {
                "a": { "direction": "input", "bits": [1] },
                "b": { "direction": "input", "bits": [2] },
                "y": { "direction": "output", "bits": [4] }
            },
            "netnames": {}
        }}
    }"#;
    let (_dir, path) = write_temp_json(json);
    let text = fs::read_to_string(&path).unwrap();
    let config = AnalysisConfig::default();
    let (_netlist, report) = run_analysis(&text, &config).unwrap();

    let t4 = report.timing_of(4).unwrap();
    assert!((t4.arrival_ps - 15.2).abs() < 1e-9);
    assert_eq!(t4.required_ps, 42.0);
    assert!((t4.slack_ps - 26.8).abs() < 1e-9);
}

/// `a=1` feeds both inputs of `XOR(1,1) -> 2`. Exactly one edge should
/// survive deduplication and its arrival update is applied exactly once,
/// not twice.
#[test]
fn reconvergent_fanout_is_deduplicated() {
    let json = r#"{
        "modules": { "top": {
            "cells": { "u1": {
                "type": "$_XOR_",
                "port_directions": { "A": "input", "B": "input", "Y": "output" },
                "connections": { "A": [1], "B": [1], "Y": [2] }
            }},
            "ports": {
                "a": { "direction": "input", "bits": [1] },
                "y": { "direction": "output", "bits": [2] }
            },
            "netnames": {}
        }}
    }"#;
    let (_dir, path) = write_temp_json(json);
    let text = fs::read_to_string(&path).unwrap();
    let config = AnalysisConfig::default();
    let (_netlist, report) = run_analysis(&text, &config).unwrap();

    // A single XOR intrinsic delay (12 ps), not double-counted by a
    // duplicated edge.
    assert_eq!(report.timing_of(2).unwrap().arrival_ps, 12.0);
}

/// `DFF_P` with D=5, Q=6, C=clk (net 9). The flip-flop breaks the
/// combinational cone: D is a cone-end sink with no outgoing edge, Q is a
/// fresh source with no incoming edge, and the clock net never becomes a
/// primary input.
#[test]
fn flip_flop_boundary() {
    let json = r#"{
        "modules": { "top": {
            "cells": { "r1": {
                "type": "DFF_P",
                "port_directions": { "D": "input", "C": "input", "Q": "output" },
                "connections": { "D": [5], "C": [9], "Q": [6] }
            }},
            "ports": {
                "d": { "direction": "input", "bits": [5] },
                "clk": { "direction": "input", "bits": [9] },
                "q": { "direction": "output", "bits": [6] }
            },
            "netnames": {}
        }}
    }"#;
    let (_dir, path) = write_temp_json(json);
    let text = fs::read_to_string(&path).unwrap();
    let config = AnalysisConfig::default();
    let (netlist, report) = run_analysis(&text, &config).unwrap();

    assert_eq!(netlist.clock_net(), Some(9));
    assert!(!netlist.primary_inputs().contains(&9));
    // Both D and Q begin with arrival 0: neither has a combinational
    // predecessor in this single-cell netlist.
    assert_eq!(report.timing_of(5).unwrap().arrival_ps, 0.0);
    assert_eq!(report.timing_of(6).unwrap().arrival_ps, 0.0);
}

/// Ten series AND gates (9 ps each) exceed the 42 ps budget; every net
/// on the chain has negative slack.
#[test]
fn long_and_chain_violates() {
    let mut cells = serde_json::Map::new();
    let mut port_directions = serde_json::Map::new();
    port_directions.insert("A".into(), "input".into());
    port_directions.insert("B".into(), "input".into());
    port_directions.insert("Y".into(), "output".into());

    for i in 0..10u32 {
        let a = if i == 0 { 100 } else { i };
        let b = if i == 0 { 101 } else { 999 + i };
        let y = i + 1;
        let mut connections = serde_json::Map::new();
        connections.insert("A".into(), serde_json::json!([a]));
        connections.insert("B".into(), serde_json::json!([b]));
        connections.insert("Y".into(), serde_json::json!([y]));
        cells.insert(
            format!("u{i}"),
            serde_json::json!({
                "type": "$_AND_",
                "port_directions": port_directions.clone(),
                "connections": connections,
            }),
        );
    }
    let module = serde_json::json!({ "cells": cells, "ports": {}, "netnames": {} });
    let root = serde_json::json!({ "modules": { "top": module } });

    let (_dir, path) = write_temp_json(&root.to_string());
    let text = fs::read_to_string(&path).unwrap();
    let config = AnalysisConfig::default();
    let (_netlist, report) = run_analysis(&text, &config).unwrap();

    for net in 1..=10u32 {
        let slack = report.timing_of(net).unwrap().slack_ps;
        assert!(slack < 0.0, "net {net} should violate, got slack={slack}");
        assert!(report.is_violation(net));
    }
}

/// The single-inverter netlist with an artificial back-edge `y -> a`
/// (2 -> 1) added. The back-edge removal pass in the graph builder cuts it,
/// so the analysis still succeeds rather than reporting `CyclicGraph` —
/// cycle rejection is instead exercised directly against the level
/// partitioner (see `levels::tests::a_real_cycle_is_reported_as_cyclic_graph`),
/// which is where an unremovable cycle actually surfaces in this design.
#[test]
fn cycle_through_a_sequential_boundary_is_not_reported_as_cyclic() {
    let json = r#"{
        "modules": { "top": {
            "cells": {
                "u1": {
                    "type": "$_NOT_",
                    "port_directions": { "A": "input", "Y": "output" },
                    "connections": { "A": [1], "Y": [2] }
                },
                "u2": {
                    "type": "$_NOT_",
                    "port_directions": { "A": "input", "Y": "output" },
                    "connections": { "A": [2], "Y": [1] }
                }
            },
            "ports": {},
            "netnames": {}
        }}
    }"#;
    let (_dir, path) = write_temp_json(json);
    let text = fs::read_to_string(&path).unwrap();
    let config = AnalysisConfig::default();
    assert!(run_analysis(&text, &config).is_ok());
}

#[test]
fn malformed_json_is_rejected_at_the_outer_parse() {
    let config = AnalysisConfig::default();
    let result = run_analysis("{ not valid json", &config);
    assert!(result.is_err());
}

#[test]
fn missing_modules_key_yields_an_empty_but_successful_report() {
    let config = AnalysisConfig::default();
    let (_netlist, report) = run_analysis(r#"{}"#, &config).unwrap();
    assert!(report.get_slack().is_empty());
}
