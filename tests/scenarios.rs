// End-to-end behavior of the interpreter through the `bf` binary.
use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bf").unwrap();
    cmd.timeout(Duration::from_secs(5))
        .env_remove("BF_FILE")
        .env_remove("GM_BF_FILE")
        .env("XDG_CONFIG_HOME", concat!(env!("CARGO_TARGET_TMPDIR"), "/no-config"))
        .env_remove("BF_MAX_STEPS")
        .env_remove("BF_EOF");
    cmd
}

fn run_code(code: &str) -> Vec<u8> {
    let assert = cargo_bin().args(["run", "--", code]).assert().success();
    assert.get_output().stdout.clone()
}

#[test]
fn increment_then_output() {
    assert_eq!(run_code("++++++++."), [8]);
}

#[test]
fn decrement_below_zero_is_ignored() {
    assert_eq!(run_code("-."), [0]);
}

#[test]
fn pointer_moves_right_onto_fresh_cells() {
    assert_eq!(run_code(">>>+."), [1]);
}

#[test]
fn loop_transfers_cell_value() {
    assert_eq!(run_code("+++[>+<-]>."), [3]);
    // Output happens before the final move, on the drained cell.
    assert_eq!(run_code("+++[>+<-].>"), [0]);
}

#[test]
fn comments_are_ignored() {
    assert_eq!(run_code("a+++b.c"), run_code("+++."));
    assert_eq!(run_code("a+++b.c"), [3]);
}

#[test]
fn unmatched_bracket_is_rejected_before_output() {
    cargo_bin()
        .args(["run", ".[+"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unmatched bracket"));
}

#[test]
fn hello_world() {
    let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
    cargo_bin()
        .args(["run", code])
        .assert()
        .success()
        .stdout("Hello World!\n");
}

#[test]
fn bare_invocation_runs_like_run_subcommand() {
    cargo_bin().arg("+++.").assert().success().stdout("\u{3}");
}

#[test]
fn positional_parts_are_concatenated() {
    cargo_bin()
        .args(["run", "++", "+."])
        .assert()
        .success()
        .stdout("\u{3}");
}
