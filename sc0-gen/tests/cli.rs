use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn sc0_gen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sc0-gen"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

/// Writes `source` to a file unique to the calling test.
fn source_file(test: &str, source: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("sc0-gen-{}-{}.ast0", test, std::process::id()));
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn prints_numbered_listing() {
    let path = source_file("listing", "# AST0 Program\nAssign x 5\nPrint x\n");

    let output = sc0_gen(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "# Stack Code (SC0)\n\n0. CONST 5\n1. STORE 0\n2. LOAD 0\n3. PRINT\n"
    );
    fs::remove_file(path).unwrap();
}

#[test]
fn missing_argument_prints_usage() {
    let output = sc0_gen(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    assert!(output.stdout.is_empty());
}

#[test]
fn generation_failure_has_its_own_exit_code() {
    let path = source_file("undefined", "Print ghost\n");

    let output = sc0_gen(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Id is not defined: ghost"));
    fs::remove_file(path).unwrap();
}

#[test]
fn unreadable_or_malformed_input_exits_with_one() {
    let output = sc0_gen(&["/nonexistent/program.ast0"]);
    assert_eq!(output.status.code(), Some(1));

    let path = source_file("malformed", "Assign 1 x\n");
    let output = sc0_gen(&[path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Syntax error at line 1"));
    fs::remove_file(path).unwrap();
}
