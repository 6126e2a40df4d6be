use std::fs;
use std::process;

use assert_cmd::Command;

fn write_script(name: &str, source: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("rocks_test_{}_{name}.lox", process::id()));
    fs::write(&path, source).expect("should be able to write a temp script");
    path
}

#[test]
fn running_a_script_prints_its_output_and_exits_zero() {
    let path = write_script("hello", "print 1 + 2;\n");

    Command::cargo_bin("rocks")
        .unwrap()
        .arg(&path)
        .assert()
        .success()
        .stdout("3\n");

    fs::remove_file(path).ok();
}

#[test]
fn a_parse_error_exits_65() {
    let path = write_script("bad_parse", "1 = 2;\n");

    Command::cargo_bin("rocks").unwrap().arg(&path).assert().code(65);

    fs::remove_file(path).ok();
}

#[test]
fn a_runtime_error_exits_70() {
    let path = write_script("bad_runtime", "print 1 + true;\n");

    Command::cargo_bin("rocks").unwrap().arg(&path).assert().code(70);

    fs::remove_file(path).ok();
}

#[test]
fn more_than_one_script_argument_prints_usage_and_exits_64() {
    Command::cargo_bin("rocks")
        .unwrap()
        .arg("a.lox")
        .arg("b.lox")
        .assert()
        .code(64)
        .stderr("Usage: rocks [script]\n");
}
