//! Help and usage specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    tp().args(&["--help"])
        .passes()
        .stdout_has("simulate")
        .stdout_has("config");
}

#[test]
fn simulate_help_lists_options() {
    tp().args(&["simulate", "--help"])
        .passes()
        .stdout_has("--frames")
        .stdout_has("--frame-time")
        .stdout_has("--report-every")
        .stdout_has("--json");
}

#[test]
fn unknown_subcommand_fails() {
    tp().args(&["rewind"]).fails().stderr_has("unrecognized subcommand");
}
