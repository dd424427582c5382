//! Binary end-to-end tests over temporary CSV fixtures
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const DELIVERIES_A: &str = "\
TIP_DATETIME,ORIGIN,MASS,TRUCK_ID,ROCKY_RATIO
2024-07-24 08:00:00,Zone1,50.0,T-01,1
2024-07-24 09:00:00,Zone2,40.0,T-02,4
";

const DELIVERIES_B: &str = "\
TIP_DATETIME,ORIGIN,MASS,TRUCK_ID,ROCKY_RATIO
2024-07-24 08:30:00,Zone3,45.0,T-03,2
";

const DOWNTIME: &str = "\
AREA,LOCATION,EVENT_START,EVENT_END,LENGTH
Primary Crushing - A,Grizzly,2024-07-24 09:30:00,2024-07-24 09:40:00,600
Primary Crushing - A,Crusher,2024-07-24 10:00:00,2024-07-24 10:05:00,300
Primary Crushing - B,Grizzly,2024-07-24 11:00:00,2024-07-24 11:10:00,600
";

fn write_fixtures() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("A_DATA.csv"), DELIVERIES_A).unwrap();
    fs::write(dir.path().join("B_DATA.csv"), DELIVERIES_B).unwrap();
    fs::write(dir.path().join("RB_DATA.csv"), DOWNTIME).unwrap();
    dir
}

#[test]
fn test_single_area_text_report_shows_locations() {
    let dir = write_fixtures();
    let mut cmd = Command::cargo_bin("rockbreak").unwrap();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .arg("--area")
        .arg("a")
        .assert()
        .success()
        .stdout(predicate::str::contains("Area A"))
        .stdout(predicate::str::contains("Grizzly"))
        .stdout(predicate::str::contains("Crusher"));
}

#[test]
fn test_both_areas_print_two_reports() {
    let dir = write_fixtures();
    let mut cmd = Command::cargo_bin("rockbreak").unwrap();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Area A"))
        .stdout(predicate::str::contains("Area B"));
}

#[test]
fn test_zone_grouping_json_output() {
    let dir = write_fixtures();
    let mut cmd = Command::cargo_bin("rockbreak").unwrap();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .arg("--area")
        .arg("a")
        .arg("--group-by")
        .arg("zone")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"group_by\": \"source_zone\""))
        // Both area-A events fall after the 09:00 Zone2 tip.
        .stdout(predicate::str::contains("Zone2"))
        .stdout(predicate::str::contains("Zone1").not());
}

#[test]
fn test_csv_format_emits_header_row() {
    let dir = write_fixtures();
    let mut cmd = Command::cargo_bin("rockbreak").unwrap();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .arg("--area")
        .arg("b")
        .arg("--format")
        .arg("csv")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "location,events,total_duration_min",
        ))
        .stdout(predicate::str::contains("Grizzly,1,10"));
}

#[test]
fn test_window_flags_filter_events() {
    let dir = write_fixtures();
    let mut cmd = Command::cargo_bin("rockbreak").unwrap();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .arg("--area")
        .arg("a")
        .arg("--from")
        .arg("2024-07-24 09:00:00")
        .arg("--to")
        .arg("2024-07-24 09:45:00")
        .assert()
        .success()
        .stdout(predicate::str::contains("Grizzly"))
        .stdout(predicate::str::contains("Crusher").not());
}

#[test]
fn test_from_without_to_is_rejected() {
    let dir = write_fixtures();
    let mut cmd = Command::cargo_bin("rockbreak").unwrap();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .arg("--from")
        .arg("2024-07-24 09:00:00")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from and --to"));
}

#[test]
fn test_malformed_row_fails_with_row_context() {
    let dir = write_fixtures();
    let bad = DOWNTIME.replace("600", "not-a-number");
    fs::write(dir.path().join("RB_DATA.csv"), bad).unwrap();

    let mut cmd = Command::cargo_bin("rockbreak").unwrap();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .arg("--area")
        .arg("a")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LENGTH"))
        .stderr(predicate::str::contains("row 0"));
}

#[test]
fn test_missing_data_file_is_a_clean_error() {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("rockbreak").unwrap();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("RB_DATA.csv"));
}
