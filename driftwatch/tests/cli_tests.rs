use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn driftwatch() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("driftwatch"))
}

fn yaml_file(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_functions_lists_the_whole_catalogue() {
    driftwatch()
        .arg("functions")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("is_above")
                .and(predicate::str::contains("is_below"))
                .and(predicate::str::contains("is_within_range"))
                .and(predicate::str::contains("is_outside_range"))
                .and(predicate::str::contains("confidence_interval_sigma")),
        );
}

#[test]
fn test_functions_json_output() {
    driftwatch()
        .args(["functions", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"args_num\""));
}

#[test]
fn test_validate_accepts_a_clean_file() -> Result<()> {
    let rules = yaml_file(
        r#"
rules:
  - table_name: stg.test_task
    task_name: TestTask
    conditions:
      - column_name: cnt
        metric: count
        expression: is_above(3000)
"#,
    )?;

    driftwatch()
        .arg("validate")
        .arg("--rules")
        .arg(rules.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 condition(s) valid"));
    Ok(())
}

#[test]
fn test_validate_reports_every_violation() -> Result<()> {
    let rules = yaml_file(
        r#"
rules:
  - table_name: stg.test_task
    task_name: TestTask
    conditions:
      - column_name: cnt
        metric: count
        expression: confidence_interval_sigma('meann',1,20,false)
      - column_name: ind_1
        metric: meann
        expression: is_above(10)
"#,
    )?;

    driftwatch()
        .arg("validate")
        .arg("--rules")
        .arg(rules.path())
        .assert()
        .failure()
        .stderr(
            predicate::str::contains(
                "1 argument of function confidence_interval_sigma can only take these values",
            )
            .and(predicate::str::contains("Metric meann does not exist")),
        );
    Ok(())
}

#[test]
fn test_check_replays_a_snapshot_and_flags_the_drop() -> Result<()> {
    let snapshot = yaml_file(
        r#"
project:
  name: TestProject
rules:
  - table_name: stg.test_task
    task_name: TestTask
    conditions:
      - column_name: cnt
        metric: count
        expression: is_above(3000)
tasks:
  - name: TestTask
    start_date: 2020-07-01T08:00:00Z
    nominal_date: 2020-07-01T08:00:00Z
    stats:
      - column: stg.test_task.cnt
        count: 4000
        total_count: 4000
  - name: TestTask
    start_date: 2020-07-02T08:00:00Z
    nominal_date: 2020-07-02T08:00:00Z
    stats:
      - column: stg.test_task.cnt
        count: 10
        total_count: 10
"#,
    )?;

    driftwatch()
        .arg("check")
        .arg("--snapshot")
        .arg(snapshot.path())
        .arg("--strict")
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("1 warning(s) raised")
                .and(predicate::str::contains("is not above 3000.000000")),
        );
    Ok(())
}

#[test]
fn test_check_clean_snapshot_succeeds() -> Result<()> {
    let snapshot = yaml_file(
        r#"
project:
  name: TestProject
rules:
  - table_name: stg.test_task
    task_name: TestTask
    conditions:
      - column_name: cnt
        metric: count
        expression: is_above(3000)
tasks:
  - name: TestTask
    start_date: 2020-07-01T08:00:00Z
    nominal_date: 2020-07-01T08:00:00Z
    stats:
      - column: stg.test_task.cnt
        count: 4000
        total_count: 4000
"#,
    )?;

    driftwatch()
        .arg("check")
        .arg("--snapshot")
        .arg(snapshot.path())
        .arg("--strict")
        .assert()
        .success()
        .stdout(predicate::str::contains("No warnings raised"));
    Ok(())
}

#[test]
fn test_check_missing_snapshot_fails() {
    driftwatch()
        .arg("check")
        .arg("--snapshot")
        .arg("/nonexistent/snapshot.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CRITICAL CHECK ERROR"));
}
