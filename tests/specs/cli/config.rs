//! `tp config` specs

use crate::prelude::*;

#[test]
fn defaults_are_printed_without_a_file() {
    tp().args(&["config"])
        .passes()
        .stdout_has("[tachometer]")
        .stdout_has("interval = \"1m\"")
        .stdout_lacks("[metrics]");
}

#[test]
fn file_settings_are_printed() {
    let project = Project::empty();
    let path = project.file(
        "tp.toml",
        r#"
[tachometer]
interval = "10s"

[metrics]
namespace = "edge-app"
metric_name = "frame_time"
dimensions = { device = "cam-1" }
"#,
    );

    project
        .tp()
        .args(&["config", "--config", path.to_str().unwrap()])
        .passes()
        .stdout_has("interval = \"10s\"")
        .stdout_has("namespace = \"edge-app\"")
        .stdout_has("cam-1");
}

#[test]
fn unknown_keys_are_rejected() {
    let project = Project::empty();
    let path = project.file("tp.toml", "[tachometer]\nspeed = 3\n");

    project
        .tp()
        .args(&["config", "--config", path.to_str().unwrap()])
        .fails()
        .stderr_has("invalid config file");
}

#[test]
fn zero_interval_is_rejected() {
    let project = Project::empty();
    let path = project.file("tp.toml", "[tachometer]\ninterval = \"0s\"\n");

    project
        .tp()
        .args(&["config", "--config", path.to_str().unwrap()])
        .fails()
        .stderr_has("interval must be positive");
}

#[test]
fn missing_file_fails() {
    let project = Project::empty();
    let path = project.path().join("absent.toml");

    project
        .tp()
        .args(&["config", "--config", path.to_str().unwrap()])
        .fails()
        .stderr_has("absent.toml");
}
