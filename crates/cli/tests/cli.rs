use std::error::Error;
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

const REPORT: &str = r#"<html>
<head><link rel="stylesheet" href="report.css"></head>
<body>
<ol>
  <li>267885.pdf:<br/>Androgen receptors</li>
  <li>267885.pdf:<BR>Androgen receptors</li>
</ol>
</body>
</html>
"#;

fn cli() -> Result<Command, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("run-print-job")?;
    cmd.env_remove("PRINTJOB_CONFIG")
        .env_remove("PRINTJOB_LOG")
        .env("RUST_LOG", "warn");
    Ok(cmd)
}

/// Job folder with an extracted job 29 and a config pointing at it.
fn job_workspace() -> Result<TempDir, Box<dyn Error>> {
    let workspace = tempdir()?;
    let folder = workspace.path().join("jobs");
    let data_dir = folder.join("PrintJobs").join("PrintJob00029");
    fs::create_dir_all(&data_dir)?;
    fs::write(folder.join("PrintJob00029.tar"), b"")?;
    fs::write(data_dir.join("PrintJobReport00029.html"), REPORT)?;

    write_config(
        &workspace.path().join("printjob.toml"),
        &format!(
            r#"
[defaults]
folder = "{}"
printer = "lab-2"

[tools.extractor]
path = "/nonexistent/tar"

[tools.pdf_printer]
path = "/nonexistent/pdfprint"
args = "-printer"

[tools.doc_printer]
path = "/nonexistent/docprint"
"#,
            folder.display()
        ),
    )?;
    Ok(workspace)
}

fn write_config(path: &Path, text: &str) -> Result<(), Box<dyn Error>> {
    fs::write(path, text)?;
    Ok(())
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn help_lists_default_flags() -> Result<(), Box<dyn Error>> {
    cli()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--def-printer"))
        .stdout(predicate::str::contains("--debug"));
    Ok(())
}

#[test]
fn dry_run_logs_both_print_commands() -> Result<(), Box<dyn Error>> {
    let workspace = job_workspace()?;
    let log = workspace.path().join("run.log");

    cli()?
        .args([
            "29",
            "--debug",
            "--end",
            "2",
            "--config",
            path_arg(&workspace.path().join("printjob.toml")),
            "--log-file",
            path_arg(&log),
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(&log)?;
    assert!(contents.contains("Got 2 documents: Printing docs 1 - 2"));
    assert_eq!(contents.matches("\"/nonexistent/pdfprint\" -printer \"lab-2\"").count(), 2);
    assert!(contents.contains("  1: Androgen receptors:"));
    assert!(contents.contains("  2: Androgen receptors:"));
    assert!(contents.contains("Printing complete"));
    Ok(())
}

#[test]
fn invalid_job_id_exits_with_error() -> Result<(), Box<dyn Error>> {
    let workspace = job_workspace()?;
    let log = workspace.path().join("run.log");

    cli()?
        .args([
            "0",
            "--debug",
            "--config",
            path_arg(&workspace.path().join("printjob.toml")),
            "--log-file",
            path_arg(&log),
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "jobid \"0\" should be a number 1..99999",
        ))
        .stderr(predicate::str::contains("Exiting run-print-job"));

    assert!(fs::read_to_string(&log)?.contains("1..99999 - Exiting"));
    Ok(())
}

#[test]
fn missing_job_id_is_fatal() -> Result<(), Box<dyn Error>> {
    let workspace = job_workspace()?;

    cli()?
        .args([
            "--config",
            path_arg(&workspace.path().join("printjob.toml")),
            "--log-file",
            path_arg(&workspace.path().join("run.log")),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required job id"));
    Ok(())
}

#[test]
fn missing_tools_are_fatal_outside_dry_run() -> Result<(), Box<dyn Error>> {
    let workspace = job_workspace()?;

    cli()?
        .args([
            "29",
            "--config",
            path_arg(&workspace.path().join("printjob.toml")),
            "--log-file",
            path_arg(&workspace.path().join("run.log")),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Program for tools.extractor.path not found",
        ));
    Ok(())
}

#[test]
fn unknown_job_archive_is_fatal() -> Result<(), Box<dyn Error>> {
    let workspace = job_workspace()?;

    cli()?
        .args([
            "30",
            "--debug",
            "--config",
            path_arg(&workspace.path().join("printjob.toml")),
            "--log-file",
            path_arg(&workspace.path().join("run.log")),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PrintJob00030.tar"));
    Ok(())
}

#[test]
fn run_failure_is_reported_once() -> Result<(), Box<dyn Error>> {
    let workspace = job_workspace()?;
    fs::remove_file(
        workspace
            .path()
            .join("jobs/PrintJobs/PrintJob00029/PrintJobReport00029.html"),
    )?;

    let output = cli()?
        .args([
            "29",
            "--debug",
            "--config",
            path_arg(&workspace.path().join("printjob.toml")),
            "--log-file",
            path_arg(&workspace.path().join("run.log")),
        ])
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();

    let stderr = String::from_utf8(output)?;
    assert_eq!(stderr.matches("Fatal error").count(), 1);
    assert!(!stderr.contains("Print job failed"));
    assert!(stderr.contains("expected report"));
    Ok(())
}

#[test]
fn def_printer_updates_config_and_keeps_backup() -> Result<(), Box<dyn Error>> {
    let workspace = job_workspace()?;
    let config = workspace.path().join("printjob.toml");

    cli()?
        .args([
            "--def-printer",
            "lab-9",
            "--config",
            path_arg(&config),
            "--log-file",
            path_arg(&workspace.path().join("run.log")),
        ])
        .assert()
        .success();

    let stored = fs::read_to_string(&config)?;
    assert!(stored.contains("printer = \"lab-9\""));
    assert!(stored.contains("/nonexistent/pdfprint"));
    let backup = fs::read_to_string(workspace.path().join("printjob.toml.bak"))?;
    assert!(backup.contains("printer = \"lab-2\""));
    Ok(())
}

#[test]
fn def_update_does_not_store_environment_overrides() -> Result<(), Box<dyn Error>> {
    let workspace = job_workspace()?;
    let config = workspace.path().join("printjob.toml");

    cli()?
        .env("PRINTJOB_DEFAULTS__PRINTER", "transient")
        .env("PRINTJOB_TIMEOUTS__PRINT_SECS", "5")
        .args([
            "--def-untarargs",
            "--no-same-owner",
            "--config",
            path_arg(&config),
            "--log-file",
            path_arg(&workspace.path().join("run.log")),
        ])
        .assert()
        .success();

    let stored = fs::read_to_string(&config)?;
    assert!(stored.contains("printer = \"lab-2\""));
    assert!(stored.contains("--no-same-owner"));
    assert!(!stored.contains("transient"));
    assert!(stored.contains("print_secs = 180"));
    Ok(())
}

#[test]
fn def_folder_must_exist() -> Result<(), Box<dyn Error>> {
    let workspace = job_workspace()?;

    cli()?
        .args([
            "--def-folder",
            "/nonexistent/jobs",
            "--config",
            path_arg(&workspace.path().join("printjob.toml")),
            "--log-file",
            path_arg(&workspace.path().join("run.log")),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Folder \"/nonexistent/jobs\" not found"));

    assert!(!workspace.path().join("printjob.toml.bak").exists());
    Ok(())
}
