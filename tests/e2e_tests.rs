//! End-to-end tests for the pcheck CLI
//!
//! These tests verify:
//! - Exit codes for fatal and non-fatal outcomes
//! - The exact report lines on stdout
//! - That no registry request is made for skipped packages
//!
//! npm is replaced by a shell script printing a canned `npm ls --json`
//! document, and the registry by a local mock server.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Command running the compiled binary
fn pcheck() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pcheck"))
}

/// Create a project directory with the given package.json
fn create_project(package_json: &str) -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("package.json"), package_json).unwrap();
    temp_dir
}

/// Write an executable script standing in for npm
#[cfg(unix)]
fn fake_npm(dir: &Path, npm_ls_json: &str, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-npm.sh");
    let script = format!(
        "#!/bin/sh\ncat <<'JSON'\n{}\nJSON\nexit {}\n",
        npm_ls_json, exit_code
    );
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn audit_command(project: &Path, npm: &Path, registry: &str) -> Command {
    let mut cmd = pcheck();
    cmd.arg(project)
        .args(["--registry", registry, "--no-color", "--quiet"])
        .arg("--npm")
        .arg(npm);
    cmd
}

#[test]
fn test_missing_manifest_exits_with_error() {
    let temp_dir = tempfile::tempdir().unwrap();

    pcheck()
        .arg(temp_dir.path())
        .args(["--no-color", "--quiet"])
        .assert()
        .code(1)
        .stdout("ERROR: No package.json file exists in this directory\n");
}

#[test]
fn test_invalid_manifest_exits_with_error() {
    let project = create_project("{ this is not json");

    pcheck()
        .arg(project.path())
        .args(["--no-color", "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("ERROR: failed to parse JSON"));
}

#[test]
fn test_invalid_registry_is_single_fatal_error() {
    let project = create_project(r#"{ "dependencies": { "lodash": "^4.0.0" } }"#);

    pcheck()
        .arg(project.path())
        .args(["--registry", "not-a-url", "--no-color", "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with(
            "ERROR: invalid registry URL 'not-a-url'",
        ))
        .stdout(predicate::str::contains("Failed to check package version").not())
        .stdout(predicate::str::is_match("^[^\n]*\n$").unwrap());
}

#[test]
fn test_invalid_timeout_rejected() {
    pcheck()
        .args(["--timeout", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid duration format 'soon'"));
}

#[test]
fn test_help_lists_options() {
    pcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--registry"))
        .stdout(predicate::str::contains("--concurrency"));
}

#[cfg(unix)]
mod with_fake_npm {
    use super::*;
    use mockito::{Matcher, Server};

    #[test]
    fn test_outdated_package_reported() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/lodash/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "lodash", "version": "4.17.21"}"#)
            .create();

        let project = create_project(r#"{ "dependencies": { "lodash": "^4.0.0" } }"#);
        let npm = fake_npm(
            project.path(),
            r#"{ "dependencies": { "lodash": { "version": "4.17.0" } } }"#,
            0,
        );

        audit_command(project.path(), &npm, &server.url())
            .assert()
            .success()
            .stdout(
                "WARN: Package: lodash, installed version: 4.17.0, latest available version: 4.17.21\n",
            );
        mock.assert();
    }

    #[test]
    fn test_undeclared_package_is_drift_without_lookup() {
        let mut server = Server::new();
        let mock = server.mock("GET", Matcher::Any).expect(0).create();

        let project = create_project(r#"{ "dependencies": {} }"#);
        let npm = fake_npm(
            project.path(),
            r#"{ "dependencies": { "leftpad": { "version": "1.0.0" } } }"#,
            0,
        );

        audit_command(project.path(), &npm, &server.url())
            .assert()
            .success()
            .stdout(
                "WARN: The following packages are installed, but do not exist in package.json: leftpad\n",
            );
        mock.assert();
    }

    #[test]
    fn test_invalid_range_prints_nothing() {
        let mut server = Server::new();
        let mock = server.mock("GET", Matcher::Any).expect(0).create();

        let project = create_project(r#"{ "dependencies": { "foo": "latest" } }"#);
        let npm = fake_npm(
            project.path(),
            r#"{ "dependencies": { "foo": { "version": "1.0.0" } } }"#,
            0,
        );

        audit_command(project.path(), &npm, &server.url())
            .assert()
            .success()
            .stdout("");
        mock.assert();
    }

    #[test]
    fn test_missing_package_exits_before_checks() {
        let mut server = Server::new();
        let mock = server.mock("GET", Matcher::Any).expect(0).create();

        let project = create_project(r#"{ "dependencies": { "foo": "^1.0.0" } }"#);
        let npm = fake_npm(
            project.path(),
            r#"{ "dependencies": { "foo": { "required": "^1.0.0", "missing": true } } }"#,
            1,
        );

        audit_command(project.path(), &npm, &server.url())
            .assert()
            .code(1)
            .stdout(
                "ERROR: The following packages are not installed: foo\n\
                 ERROR: Please run npm install before using pcheck\n",
            );
        mock.assert();
    }

    #[test]
    fn test_lookup_failure_is_not_fatal() {
        let mut server = Server::new();
        let ok = server
            .mock("GET", "/express/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"version": "4.19.2"}"#)
            .create();
        let broken = server
            .mock("GET", "/react/latest")
            .with_status(503)
            .expect(1)
            .create();

        let project = create_project(
            r#"{
                "dependencies": { "express": "^4.18.0" },
                "devDependencies": { "react": "^18.0.0" }
            }"#,
        );
        let npm = fake_npm(
            project.path(),
            r#"{ "dependencies": {
                "express": { "version": "4.18.2" },
                "react": { "version": "18.2.0" }
            } }"#,
            0,
        );

        audit_command(project.path(), &npm, &server.url())
            .assert()
            .success()
            .stdout(
                "ERROR: Failed to check package version for react\n\
                 WARN: Package: express, installed version: 4.18.2, latest available version: 4.19.2\n",
            );
        ok.assert();
        broken.assert();
    }

    #[test]
    fn test_unusable_npm_output_exits_with_error() {
        let project = create_project(r#"{ "dependencies": {} }"#);
        let npm = fake_npm(project.path(), "npm ERR! code ELSPROBLEMS", 1);

        audit_command(project.path(), &npm, "http://127.0.0.1:9")
            .assert()
            .code(1)
            .stdout(predicate::str::starts_with("ERROR: failed to parse output of"));
    }
}
