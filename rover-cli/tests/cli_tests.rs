//! Integration tests for the Rover CLI.
//!
//! These tests invoke the `rover` binary as a subprocess and check exit
//! codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn rover() -> Command {
    Command::cargo_bin("rover").unwrap()
}

/// Write a program file into the temp dir and return its path.
fn write_program(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

const WALK_TO_BEEPER: &str = "\
again: ON_BEEPER
THEN done
MOVE_FORWARD
JUMP again
done: RETURN
";

// ---- No-args / help ----

#[test]
fn no_args_prints_usage_and_exits_1() {
    rover()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: rover"));
}

#[test]
fn help_flag_exits_0() {
    rover()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("Commands:"));
}

#[test]
fn unknown_command_exits_1() {
    rover()
        .arg("teleport")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown command"));
}

// ---- Run ----

#[test]
fn run_finishes_on_the_default_problem() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "walk.rasm", WALK_TO_BEEPER);

    rover()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("program finished"));
}

#[test]
fn run_reports_runtime_errors_with_location() {
    let dir = TempDir::new().unwrap();
    // Walks off the east edge of the empty default world.
    let path = write_program(
        &dir,
        "crash.rasm",
        "spin: MOVE_FORWARD\nJUMP spin\nRETURN\n",
    );

    rover()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("blocked by a wall"))
        .stderr(predicate::str::contains("crash.rasm:1:7"));
}

#[test]
fn run_rejects_bad_assembly() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "bad.rasm", "FLY\nRETURN\n");

    rover()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown mnemonic"));
}

#[test]
fn run_rejects_missing_files() {
    rover()
        .args(["run", "no/such/file.rasm"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

// ---- Check ----

#[test]
fn check_passes_a_program_against_itself() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "walk.rasm", WALK_TO_BEEPER);

    rover()
        .args([
            "check",
            path.to_str().unwrap(),
            path.to_str().unwrap(),
            "--problem",
            "first_steps",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("checked all 1 possible worlds"));
}

#[test]
fn check_reports_divergence_with_exit_code_2() {
    let dir = TempDir::new().unwrap();
    let goal = write_program(&dir, "goal.rasm", WALK_TO_BEEPER);
    // Stops immediately: never reaches the beeper.
    let candidate = write_program(&dir, "lazy.rasm", "RETURN\n");

    rover()
        .args([
            "check",
            candidate.to_str().unwrap(),
            goal.to_str().unwrap(),
            "--problem",
            "first_steps",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("fails goal"));
}

#[test]
fn check_reports_unknown_problems() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "walk.rasm", WALK_TO_BEEPER);

    rover()
        .args([
            "check",
            path.to_str().unwrap(),
            path.to_str().unwrap(),
            "--problem",
            "nope",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown problem"));
}

// ---- Trace ----

#[test]
fn trace_prints_every_step_and_the_final_world() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "walk.rasm", WALK_TO_BEEPER);

    rover()
        .args(["trace", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("MOVE_FORWARD"))
        .stdout(predicate::str::contains("program finished"));
}

// ---- Disasm ----

#[test]
fn disasm_emits_canonical_text() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "walk.rasm", WALK_TO_BEEPER);

    rover()
        .args(["disasm", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("ON_BEEPER"))
        .stdout(predicate::str::contains("THEN L"));
}

// ---- Problems ----

#[test]
fn problems_lists_the_catalog() {
    rover()
        .arg("problems")
        .assert()
        .success()
        .stdout(predicate::str::contains("first_steps"))
        .stdout(predicate::str::contains("beeper_line"));
}
