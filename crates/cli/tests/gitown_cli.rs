use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn git_ok(repo: &Path, args: &[&str]) {
    let out = std::process::Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .expect("git command");
    assert!(
        out.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
}

fn gitown(repo: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gitown").expect("binary");
    cmd.current_dir(repo);
    cmd
}

fn setup_repo(codeowners: &str) -> tempfile::TempDir {
    let temp = tempfile::tempdir().unwrap();
    let repo = temp.path();

    git_ok(repo, &["init"]);
    git_ok(repo, &["config", "user.email", "alice@example.com"]);
    git_ok(repo, &["config", "user.name", "Alice"]);

    fs::write(repo.join("lib.py"), "a\nb\nc\nd\n").unwrap();
    fs::write(
        repo.join(".gitownrc"),
        r#"{"alice@example.com": "@alice"}"#,
    )
    .unwrap();
    fs::write(repo.join("CODEOWNERS"), codeowners).unwrap();
    git_ok(repo, &["add", "."]);
    git_ok(repo, &["commit", "-m", "c1"]);
    temp
}

#[test]
fn rewrites_manifest_and_signals_change() {
    let temp = setup_repo("");

    gitown(temp.path()).arg("lib.py").assert().code(1);

    let written = fs::read_to_string(temp.path().join("CODEOWNERS")).unwrap();
    assert!(
        written.lines().any(|line| line == "lib.py @alice"),
        "unexpected manifest:\n{written}"
    );
    assert!(written.starts_with("# Lines starting with '#' are comments."));
}

#[test]
fn second_run_reports_unchanged() {
    let temp = setup_repo("");

    gitown(temp.path()).arg("lib.py").assert().code(1);
    let first = fs::read_to_string(temp.path().join("CODEOWNERS")).unwrap();

    gitown(temp.path()).arg("lib.py").assert().code(0);
    let second = fs::read_to_string(temp.path().join("CODEOWNERS")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn wildcard_covered_file_is_not_listed() {
    let temp = setup_repo("* @alice\n");

    gitown(temp.path()).arg("lib.py").assert().code(0);

    let untouched = fs::read_to_string(temp.path().join("CODEOWNERS")).unwrap();
    assert_eq!(untouched, "* @alice\n");
}

#[test]
fn empty_file_list_evaluates_tracked_files() {
    let temp = setup_repo("");

    gitown(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No filenames provided"));

    let written = fs::read_to_string(temp.path().join("CODEOWNERS")).unwrap();
    assert!(
        written.lines().any(|line| line == "lib.py @alice"),
        "unexpected manifest:\n{written}"
    );
}

#[test]
fn missing_alias_config_is_fatal() {
    let temp = setup_repo("* @alice\n");
    fs::remove_file(temp.path().join(".gitownrc")).unwrap();

    gitown(temp.path())
        .arg("lib.py")
        .assert()
        .code(2)
        .stderr(predicate::str::contains(".gitownrc"));

    // Aborted before any manifest I/O.
    let untouched = fs::read_to_string(temp.path().join("CODEOWNERS")).unwrap();
    assert_eq!(untouched, "* @alice\n");
}

#[test]
fn below_threshold_owners_leave_the_manifest_alone() {
    let temp = setup_repo("");

    gitown(temp.path())
        .arg("--ownership-threshold")
        .arg("100")
        .arg("lib.py")
        .assert()
        .code(0);

    let untouched = fs::read_to_string(temp.path().join("CODEOWNERS")).unwrap();
    assert_eq!(untouched, "");
}

#[test]
fn debug_flag_forces_failure_after_the_run() {
    let temp = setup_repo("");

    gitown(temp.path())
        .arg("--debug")
        .arg("lib.py")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--debug"));

    // Processing still completed before the forced failure.
    let written = fs::read_to_string(temp.path().join("CODEOWNERS")).unwrap();
    assert!(written.lines().any(|line| line == "lib.py @alice"));
}
