use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_log(lines: &[&str]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(temp_file, "{}", line).unwrap();
    }
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_help_output() {
    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("HTML-safe excerpt"));
}

#[test]
fn test_version_output() {
    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("logdigest 0.2.0"));
}

#[test]
fn test_no_file_error() {
    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_basic_digest() {
    let mut lines = vec!["all quiet"; 20];
    lines[10] = "error: something broke";
    let temp_file = write_log(&lines);

    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.arg(temp_file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("... skipping 6 lines ..."))
        .stdout(predicate::str::contains(
            r#"<span class="hilight"><span class="keyword">error</span>:</span>"#,
        ));
}

#[test]
fn test_clean_log_digests_to_nothing() {
    let temp_file = write_log(&["no problems", "here", "at all"]);

    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.arg(temp_file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("skipping").not())
        .stdout(predicate::eq("\n"));
}

#[test]
fn test_custom_error_words() {
    let temp_file = write_log(&["the build timed-out today"]);

    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.args(["--error-words", "timed-out"]);
    cmd.arg(temp_file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<span class="keyword">timed-out</span>"#,
        ));
}

#[test]
fn test_filter_token_highlighting() {
    let mut lines = vec!["routine output"; 12];
    lines[6] = "restarting my-pod-5x2vq now";
    let temp_file = write_log(&lines);

    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.args(["--filter", "pod=my-pod-5x2vq"]);
    cmd.arg(temp_file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<span class="keyword">my-pod-5x2vq</span>"#,
        ))
        .stdout(predicate::str::contains("... skipping 2 lines ..."));
}

#[test]
fn test_objref_correlation() {
    let mut lines = vec!["steady state"; 12];
    lines[6] = "observed uid abc-123-def in cache";
    let temp_file = write_log(&lines);

    let mut objref_file = NamedTempFile::new().unwrap();
    write!(objref_file, r#"{{"abc-123-def": "my-pod-5x2vq"}}"#).unwrap();
    objref_file.flush().unwrap();

    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.args(["--filter", "pod=my-pod-5x2vq"]);
    cmd.arg("--objref-file");
    cmd.arg(objref_file.path());
    cmd.arg(temp_file.path());

    cmd.assert().success().stdout(predicate::str::contains(
        r#"<span class="keyword">abc-123-def</span>"#,
    ));
}

#[test]
fn test_case_insensitive_matching() {
    let temp_file = write_log(&["ERROR: loud failure"]);

    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.args(["--error-words", "error", "--case-insensitive"]);
    cmd.arg(temp_file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"<span class="keyword">ERROR</span>"#));
}

#[test]
fn test_raw_pattern() {
    let temp_file = write_log(&["process exited with exit code 137"]);

    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.args(["--pattern", r"exit code \d+"]);
    cmd.arg(temp_file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("hilight"));
}

#[test]
fn test_html_escaping() {
    let temp_file = write_log(&["error <oops> & more"]);

    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.arg(temp_file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("&lt;oops&gt; &amp; more"));
}

#[test]
fn test_custom_skip_format() {
    let mut lines = vec!["fine"; 20];
    lines[10] = "error here";
    let temp_file = write_log(&lines);

    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.args(["--skip-format", "[{} lines omitted]"]);
    cmd.arg(temp_file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[6 lines omitted]"));
}

#[test]
fn test_json_summary() {
    let mut lines = vec!["fine"; 20];
    lines[10] = "error here";
    let temp_file = write_log(&lines);

    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.arg("--json");
    cmd.arg(temp_file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"digest\""))
        .stdout(predicate::str::contains("\"input_lines\": 21"));
}

#[test]
fn test_invalid_pattern() {
    let temp_file = write_log(&["whatever"]);

    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.args(["--pattern", "[invalid"]);
    cmd.arg(temp_file.path());

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_missing_input_file() {
    let mut cmd = Command::cargo_bin("logdigest").unwrap();
    cmd.arg("/nonexistent/build-log.txt");

    cmd.assert().failure().code(1);
}
