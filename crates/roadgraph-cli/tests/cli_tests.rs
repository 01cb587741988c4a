use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/simpletest.map")
        .canonicalize()
        .expect("fixture map present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("roadgraph-cli");
    cmd.env("RUST_LOG", "error").env_remove("ROADGRAPH_MAP");
    cmd
}

fn prepare_command() -> Command {
    let mut cmd = cli();
    cmd.arg("--map").arg(fixture_path());
    cmd
}

#[test]
fn stats_reports_fixture_counts() {
    let mut cmd = prepare_command();
    cmd.arg("stats");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Graph with 8 vertices and 19 edges."));
}

#[test]
fn map_can_come_from_environment() {
    let mut cmd = cli();
    cmd.env("ROADGRAPH_MAP", fixture_path()).arg("stats");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("8 vertices"));
}

#[test]
fn missing_map_configuration_is_reported() {
    let mut cmd = cli();
    cmd.arg("stats");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no map file configured"));
}

#[test]
fn default_route_uses_a_star() {
    let mut cmd = prepare_command();
    cmd.arg("route").arg("--from").arg("1,1").arg("--to").arg("8,-1");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("algorithm: a-star"))
        .stdout(predicate::str::contains("+ (1, 1)"))
        .stdout(predicate::str::contains("- (8, -1)"));
}

#[test]
fn bfs_route_takes_one_way_shortcut() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "5,1", "--to", "7,3", "--algorithm", "bfs"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(1 hops; algorithm: bfs)"));
}

#[test]
fn json_route_output_is_parseable() {
    let mut cmd = prepare_command();
    cmd.args([
        "--format",
        "json",
        "route",
        "--from",
        "1,1",
        "--to",
        "7,3",
        "--algorithm",
        "dijkstra",
    ]);

    let output = cmd.output().expect("run cli");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(value["algorithm"], "dijkstra");
    assert_eq!(value["start"]["x"], 1.0);
    assert_eq!(value["goal"]["y"], 3.0);
    assert!(value["distance"].as_f64().unwrap() > 0.0);
}

#[test]
fn unknown_location_error_is_friendly() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "1,1", "--to", "2,2"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown location (2, 2)"));
}

#[test]
fn unreachable_goal_reports_no_route() {
    let dir = tempdir().expect("create temp dir");
    let map = dir.path().join("one_way.map");
    fs::write(&map, "0 0 0 1 \"ONE WAY\" residential\n").expect("write map");

    let mut cmd = cli();
    cmd.arg("--map")
        .arg(&map)
        .args(["route", "--from", "0,1", "--to", "0,0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no route found"));
}

#[test]
fn tour_visits_every_intersection() {
    let mut cmd = prepare_command();
    cmd.args(["tour", "--start", "7,3"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Tour from (7, 3) (8 stops):"))
        .stdout(predicate::str::contains("Total distance:"));
}

#[test]
fn malformed_coordinates_are_rejected() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "north", "--to", "7,3"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("expected coordinates as 'x,y'"));
}
