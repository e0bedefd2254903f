use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn passcache(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("passcache").unwrap();
    cmd.current_dir(dir)
        .arg("--config")
        .arg(dir.join("no-config"))
        .env_remove("PASSCACHE_BASE_DIR")
        .env_remove("PASSCACHE_DEFAULT_LENGTH")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{:?}", output);
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_lookup_is_stable_across_runs() {
    let dir = TempDir::new().unwrap();

    let first = stdout_of(passcache(dir.path()).args(["lookup", "db/admin length=12"]));
    let second = stdout_of(passcache(dir.path()).args(["lookup", "db/admin length=12"]));

    assert_eq!(first, second);
    assert_eq!(first.trim_end().len(), 12);
    assert!(dir.path().join("db/admin").is_file());
}

#[test]
fn test_lookup_honors_base_dir() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("store");

    passcache(dir.path())
        .args(["lookup", "--base-dir"])
        .arg(&base)
        .arg("api chars=digits length=6")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9]{6}\n$").unwrap());

    assert!(base.join("api").is_file());
}

#[test]
fn test_lookup_with_encrypt_prints_hash() {
    let dir = TempDir::new().unwrap();

    passcache(dir.path())
        .args(["lookup", "web encrypt=sha256"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$sha256$"));

    let stored = std::fs::read_to_string(dir.path().join("web")).unwrap();
    assert!(stored.contains(" salt="));
}

#[test]
fn test_malformed_term_fails() {
    let dir = TempDir::new().unwrap();

    passcache(dir.path())
        .args(["lookup", "db length=10 extra"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Malformed request"));
}

#[test]
fn test_unknown_parameter_fails() {
    let dir = TempDir::new().unwrap();

    passcache(dir.path())
        .args(["lookup", "db colour=blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized parameter(s)"));
}

#[test]
fn test_fail_fast_prints_nothing() {
    let dir = TempDir::new().unwrap();

    passcache(dir.path())
        .args(["lookup", "good", "bad length=abc"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_keep_going_reports_every_term() {
    let dir = TempDir::new().unwrap();

    passcache(dir.path())
        .args(["lookup", "--keep-going", "good length=8", "bad length=abc", "other length=8"])
        .assert()
        .failure()
        .stdout(predicate::str::is_match(r"^\S{8}\n\S{8}\n$").unwrap())
        .stderr(predicate::str::contains("bad length=abc"))
        .stderr(predicate::str::contains("1 of 3 lookups failed"));

    assert!(dir.path().join("good").is_file());
    assert!(dir.path().join("other").is_file());
}

#[test]
fn test_inspect_reports_record_state() {
    let dir = TempDir::new().unwrap();

    passcache(dir.path())
        .args(["inspect", "db"])
        .assert()
        .success()
        .stdout("absent\n");

    stdout_of(passcache(dir.path()).args(["lookup", "db"]));
    passcache(dir.path())
        .args(["inspect", "db"])
        .assert()
        .success()
        .stdout("unkeyed\n");

    stdout_of(passcache(dir.path()).args(["lookup", "db encrypt=sha512"]));
    passcache(dir.path())
        .args(["inspect", "db"])
        .assert()
        .success()
        .stdout("salted\n");
}

#[test]
fn test_config_prints_defaults() {
    let dir = TempDir::new().unwrap();

    passcache(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default_length: 20"))
        .stdout(predicate::str::contains("ascii_letters"));
}

#[test]
fn test_config_file_and_env_layers() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.yml");
    std::fs::write(&config, "default_length: 32\n").unwrap();

    let mut cmd = Command::cargo_bin("passcache").unwrap();
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .env_remove("PASSCACHE_BASE_DIR")
        .env_remove("PASSCACHE_DEFAULT_LENGTH")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default_length: 32"));

    let mut cmd = Command::cargo_bin("passcache").unwrap();
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .env_remove("PASSCACHE_BASE_DIR")
        .env("PASSCACHE_DEFAULT_LENGTH", "40")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default_length: 40"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();

    passcache(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(format!("passcache {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_lookup_with_sha512_crypt() {
    let dir = TempDir::new().unwrap();

    let hashed = stdout_of(passcache(dir.path()).args(["lookup", "web encrypt=sha512_crypt"]));
    let stored = std::fs::read_to_string(dir.path().join("web")).unwrap();
    let salt = stored.trim_end().rsplit('=').next().unwrap();
    assert!(hashed.starts_with(&format!("$6${}$", salt)));
}

#[test]
fn test_lookup_under_a_file_reports_directory_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("blocker"), "x").unwrap();

    passcache(dir.path())
        .args(["lookup", "blocker/sub/pw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot create the path for the password lookup"));
}
