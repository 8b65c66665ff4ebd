use assert_cmd::prelude::*;
use chrono::Utc;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::{TempDir, tempdir};

const ENV_VARS: [&str; 7] = [
    "AWSORG_PROFILE",
    "AWSORG_CACHE_AGE",
    "AWSORG_REGION",
    "AWSORG_FORMAT",
    "AWSORG_CONFIG",
    "AWSORG_CACHE_DIR",
    "AWSORG_DEBUG",
];

fn seed_snapshot(dir: &Path, profile: &str, timestamp: i64) {
    let yaml = format!(
        r#"profile: {profile}
name: Production
timestamp: {timestamp}
roots:
  - r-abcd:
      name: Root
      arn: arn:aws:organizations::111111111111:root/o-test/r-abcd
      accounts:
        - id: "111111111111"
          name: management
          email: aws@example.com
      units:
        - ou-abcd-11111111:
            name: Workloads
            accounts: []
            units:
              - ou-abcd-22222222:
                  name: Prod
                  accounts:
                    - id: "222222222222"
                      name: app-prod
                      email: app-prod@example.com
                  units: []
"#
    );
    fs::write(dir.join(format!("{profile}.yaml")), yaml).expect("failed to seed cache");
}

/// Command wired to an isolated cache dir and a config file that does not exist
fn awsorg(temp: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("awsorg"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--cache-dir")
        .arg(temp.path())
        .arg("--config")
        .arg(temp.path().join("no-config.yaml"));
    cmd
}

fn seeded() -> TempDir {
    let temp = tempdir().expect("tempdir");
    seed_snapshot(temp.path(), "prod", Utc::now().timestamp());
    temp
}

#[test]
fn roots_reads_fresh_cache() {
    let temp = seeded();

    awsorg(&temp)
        .args(["-p", "prod", "roots"])
        .assert()
        .success()
        .stdout(predicate::str::contains("r-abcd"))
        .stdout(predicate::str::contains("Root"));
}

#[test]
fn summary_lists_nested_units() {
    let temp = seeded();

    awsorg(&temp)
        .args(["-p", "prod", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Organisation: Production"))
        .stdout(predicate::str::contains("ou-abcd-11111111"))
        .stdout(predicate::str::contains("ou-abcd-22222222"));
}

#[test]
fn tree_pretty_shows_accounts_and_units() {
    let temp = seeded();

    awsorg(&temp)
        .args(["-p", "prod", "tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Production (prod)"))
        .stdout(predicate::str::contains("management"))
        .stdout(predicate::str::contains("Workloads"))
        .stdout(predicate::str::contains("app-prod"));
}

#[test]
fn tree_json_contains_snapshot() -> Result<(), Box<dyn std::error::Error>> {
    let temp = seeded();

    let output = awsorg(&temp)
        .args(["-p", "prod", "--format", "json", "tree"])
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["meta"]["profile"], "prod");
    assert_eq!(value["data"]["name"], "Production");
    assert_eq!(
        value["data"]["roots"][0]["r-abcd"]["accounts"][0]["id"],
        "111111111111"
    );

    Ok(())
}

#[test]
fn profile_name_flag_does_not_change_cached_name() {
    let temp = seeded();

    awsorg(&temp)
        .args(["-p", "prod", "-n", "Something Else", "dump"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name: Production"));
}

#[test]
fn dump_json_is_raw_snapshot() -> Result<(), Box<dyn std::error::Error>> {
    let temp = seeded();

    let output = awsorg(&temp).args(["-p", "prod", "dump", "--json"]).output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["profile"], "prod");
    assert!(value["timestamp"].is_i64());

    Ok(())
}

#[test]
fn default_profile_comes_from_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = seeded();
    let config = temp.path().join("config.yaml");
    fs::write(&config, "default_profile: prod\n")?;

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("awsorg"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--cache-dir")
        .arg(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("roots")
        .assert()
        .success()
        .stdout(predicate::str::contains("r-abcd"));

    Ok(())
}

#[test]
fn cache_list_shows_entries() {
    let temp = seeded();
    seed_snapshot(temp.path(), "dev", Utc::now().timestamp() - 3 * 86_400);
    fs::write(temp.path().join("broken.yaml"), "roots: [unterminated").unwrap();

    awsorg(&temp)
        .args(["cache", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prod"))
        .stdout(predicate::str::contains("fresh"))
        .stdout(predicate::str::contains("stale"))
        .stdout(predicate::str::contains("corrupt"));
}

#[test]
fn cache_list_empty_dir() {
    let temp = tempdir().unwrap();

    awsorg(&temp)
        .args(["cache", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cached profiles."));
}

#[test]
fn cache_path_prints_override() {
    let temp = tempdir().unwrap();

    awsorg(&temp)
        .args(["cache", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(temp.path().to_string_lossy().to_string()));
}

#[test]
fn missing_profile_is_an_error() {
    let temp = tempdir().unwrap();

    awsorg(&temp)
        .arg("roots")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No AWS profile given"));
}

#[test]
fn invalid_profile_is_rejected_before_touching_disk() {
    let temp = tempdir().unwrap();

    awsorg(&temp)
        .args(["-p", "../etc", "roots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid profile name"));

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn invalid_cache_age_is_a_usage_error() {
    let temp = tempdir().unwrap();

    awsorg(&temp)
        .args(["-p", "prod", "-c", "3w", "roots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid cache age"));
}

#[test]
fn completion_generates_script() {
    let temp = tempdir().unwrap();

    awsorg(&temp)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("awsorg"));
}
