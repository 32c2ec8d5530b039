use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_pmcfetch_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("pmcfetch")
}

#[test]
fn test_download_command_help() {
    let mut cmd = Command::new(get_pmcfetch_bin());
    cmd.arg("download").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Download the PDF behind every link in a manifest",
        ))
        .stdout(predicate::str::contains("--download-dir"))
        .stdout(predicate::str::contains("--headed"))
        .stdout(predicate::str::contains("--chrome-path"))
        .stdout(predicate::str::contains("--report"));
}

#[test]
fn test_download_empty_manifest_is_informational() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("pmc_links.txt");
    std::fs::write(&manifest, "").unwrap();

    let mut cmd = Command::new(get_pmcfetch_bin());
    cmd.arg("download")
        .arg(&manifest)
        .arg("--download-dir")
        .arg(dir.path());

    // No links means the browser is never launched and the exit is clean
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("nothing to download"));
}

#[test]
fn test_download_fails_when_chrome_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("pmc_links.txt");
    std::fs::write(
        &manifest,
        "https://pmc.ncbi.nlm.nih.gov/articles/PMC123/pdf/\n",
    )
    .unwrap();

    let mut cmd = Command::new(get_pmcfetch_bin());
    cmd.arg("download")
        .arg(&manifest)
        .arg("--download-dir")
        .arg(dir.path())
        .arg("--chrome-path")
        .arg("/nonexistent/chrome");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Chrome not found"));
}

#[test]
fn test_download_fails_on_missing_manifest() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::new(get_pmcfetch_bin());
    cmd.arg("download")
        .arg(dir.path().join("missing.txt"))
        .arg("--download-dir")
        .arg(dir.path());

    cmd.assert().failure();
}
