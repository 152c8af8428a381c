//! `tp simulate` specs

use crate::prelude::*;

#[test]
fn text_summary_counts_reports_and_schedules() {
    tp().args(&[
        "simulate",
        "--frames",
        "50",
        "--frame-time",
        "100ms",
        "--jitter",
        "0s",
        "--report-every",
        "1s",
        "--heartbeat",
        "1s",
        "--checkpoint-every",
        "10",
    ])
    .passes()
    .stdout_has("frames: 50")
    .stdout_has("reports: 5")
    .stdout_has("heartbeats: 5")
    .stdout_has("checkpoints: 5")
    .stdout_has("simulated: 5.000s")
    .stdout_has("<StopWatch name=frame")
    .stdout_has("name=update")
    .stdout_has("name=render");
}

#[test]
fn json_mode_publishes_one_line_per_report() {
    let run = tp()
        .args(&[
            "simulate",
            "--frames",
            "30",
            "--frame-time",
            "100ms",
            "--jitter",
            "0s",
            "--report-every",
            "1s",
            "--json",
        ])
        .passes();

    let lines = run.json_lines();
    assert_eq!(lines.len(), 4);
    for datum in &lines[..3] {
        assert_eq!(datum["Namespace"], "timepiece");
        assert_eq!(datum["MetricName"], "frame_interval");
        assert_eq!(datum["Unit"], "Seconds");
        assert_eq!(datum["StatisticValues"]["SampleCount"], 10);
    }
    let summary = &lines[3];
    assert_eq!(summary["frames"], 30);
    assert_eq!(summary["reports"], 3);
}

#[test]
fn metrics_section_names_the_datum() {
    let project = Project::empty();
    let path = project.file(
        "tp.toml",
        r#"
[metrics]
namespace = "edge-app"
metric_name = "frame_time"
interval = "1s"
dimensions = { device = "cam-1" }
"#,
    );

    let run = project
        .tp()
        .args(&[
            "simulate",
            "--frames",
            "10",
            "--frame-time",
            "100ms",
            "--jitter",
            "0s",
            "--json",
            "--config",
            path.to_str().unwrap(),
        ])
        .passes();

    let lines = run.json_lines();
    assert_eq!(lines[0]["Namespace"], "edge-app");
    assert_eq!(lines[0]["MetricName"], "frame_time");
    assert_eq!(lines[0]["Dimensions"][0]["Name"], "device");
    assert_eq!(lines[0]["Dimensions"][0]["Value"], "cam-1");
}

#[test]
fn same_seed_gives_same_output() {
    let args = ["simulate", "--frames", "120", "--seed", "9", "--json"];
    let first = tp().args(&args).passes().json_lines();
    let second = tp().args(&args).passes().json_lines();

    let summaries = (first.last().unwrap(), second.last().unwrap());
    assert_eq!(summaries.0["frame"], summaries.1["frame"]);
    assert_eq!(summaries.0["reports"], summaries.1["reports"]);
}

#[test]
fn zero_checkpoint_interval_fails() {
    tp().args(&["simulate", "--frames", "1", "--checkpoint-every", "0"])
        .fails()
        .stderr_has("positive ordinal");
}

#[test]
fn invalid_duration_fails() {
    tp().args(&["simulate", "--frame-time", "fast"])
        .fails()
        .stderr_has("--frame-time");
}

#[test]
fn verbose_logs_to_stderr() {
    tp().args(&["-v", "simulate", "--frames", "5"])
        .passes()
        .stderr_has("simulation finished");
}
