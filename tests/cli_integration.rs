// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for the fihrist CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A fihrist command wired to an isolated data directory
fn fihrist(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fihrist").expect("binary builds");
    cmd.env("FIHRIST_DATA_DIR", data_dir.path())
        .env("FIHRIST_CONFIG", data_dir.path().join("no-config.toml"))
        .env_remove("GITHUB_TOKEN");
    cmd
}

/// A complete, valid record document
fn valid_record() -> &'static str {
    r#"{
        "Name": "Shami",
        "Subsets": [
            {"Name": "Yemeni", "Dialect": "Yemen", "Volume": "1,000", "Unit": "sentences"}
        ],
        "HF Link": "",
        "Link": "https://github.com/example/shami",
        "License": "CC BY 4.0",
        "Year": 2018,
        "Language": "ar",
        "Dialect": "Levant",
        "Domain": "social media,web pages",
        "Form": "text",
        "Collection Style": "crawling,human annotation",
        "Description": "A corpus of Levantine Arabic dialect sentences.",
        "Volume": "117,805",
        "Unit": "sentences",
        "Ethical Risks": "Low",
        "Provider": "Example University",
        "Derived From": "",
        "Paper Title": "Shami: A Corpus of Levantine Arabic Dialects",
        "Paper Link": "https://example.com/shami.pdf",
        "Script": "Arab",
        "Tokenized": "No",
        "Host": "GitHub",
        "Access": "Free",
        "Cost": "",
        "Test Split": "No",
        "Tasks": "dialect identification,sentiment analysis",
        "Venue Title": "LREC",
        "Citations": "30",
        "Venue Type": "conference",
        "Venue Name": "Language Resources and Evaluation Conference",
        "Authors": "A. Author, B. Author",
        "Affiliations": "Example University",
        "Abstract": "We present a corpus of Levantine dialects.",
        "Added By": "Jane Doe"
    }"#
}

#[test]
fn test_template_prints_default_record() {
    let data_dir = TempDir::new().unwrap();

    fihrist(&data_dir)
        .args(["template"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Name\": \"\""))
        .stdout(predicate::str::contains("\"License\": \"Apache-2.0\""))
        .stdout(predicate::str::contains("\"Subsets\": []"));
}

#[test]
fn test_template_writes_file() {
    let data_dir = TempDir::new().unwrap();
    let out = data_dir.path().join("template.json");

    fihrist(&data_dir)
        .args(["template", "-o", out.to_str().unwrap()])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("\"Added By\""));
}

#[test]
fn test_default_template_is_not_submittable() {
    let data_dir = TempDir::new().unwrap();
    let out = data_dir.path().join("template.json");

    fihrist(&data_dir)
        .args(["template", "-o", out.to_str().unwrap()])
        .assert()
        .success();

    // Empty name, link, and description must all be reported
    fihrist(&data_dir)
        .args(["validate", out.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Name"))
        .stdout(predicate::str::contains("Link"))
        .stderr(predicate::str::contains("validation failure"));
}

#[test]
fn test_validate_accepts_complete_record() {
    let data_dir = TempDir::new().unwrap();
    let record = data_dir.path().join("shami.json");
    std::fs::write(&record, valid_record()).unwrap();

    fihrist(&data_dir)
        .args(["validate", record.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_validate_rejects_bad_volume() {
    let data_dir = TempDir::new().unwrap();
    let record = data_dir.path().join("bad.json");
    std::fs::write(&record, valid_record().replace("117,805", "117805")).unwrap();

    fihrist(&data_dir)
        .args(["validate", record.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Volume"))
        .stdout(predicate::str::contains("comma-grouped"));
}

#[test]
fn test_validate_rejects_bad_link() {
    let data_dir = TempDir::new().unwrap();
    let record = data_dir.path().join("bad.json");
    std::fs::write(
        &record,
        valid_record().replace("https://github.com/example/shami", "not-a-url"),
    )
    .unwrap();

    fihrist(&data_dir)
        .args(["validate", record.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Link"));
}

#[test]
fn test_submit_dry_run_plans_new_pr() {
    let data_dir = TempDir::new().unwrap();
    let record = data_dir.path().join("shami.json");
    std::fs::write(&record, valid_record()).unwrap();

    fihrist(&data_dir)
        .args(["submit", record.to_str().unwrap(), "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add-shami"))
        .stdout(predicate::str::contains("datasets/shami.json"))
        .stdout(predicate::str::contains("open a new pull request"));
}

#[test]
fn test_submit_dry_run_detects_tracked_branch() {
    let data_dir = TempDir::new().unwrap();
    let record = data_dir.path().join("shami.json");
    std::fs::write(&record, valid_record()).unwrap();

    let index = r#"[
        {
            "name": "Shami",
            "url": "https://github.com/example/catalogue/pull/42",
            "branch": "add-shami",
            "state": "open",
            "number": 42
        }
    ]"#;
    std::fs::write(data_dir.path().join("prs.json"), index).unwrap();

    fihrist(&data_dir)
        .args(["submit", record.to_str().unwrap(), "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("update tracked pull request #42"));
}

#[test]
fn test_submit_refuses_invalid_record() {
    let data_dir = TempDir::new().unwrap();
    let record = data_dir.path().join("bad.json");
    std::fs::write(&record, valid_record().replace("\"Shami\"", "\"\"")).unwrap();

    fihrist(&data_dir)
        .args(["submit", record.to_str().unwrap(), "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing submitted"));
}

#[test]
fn test_submit_save_writes_normalised_record() {
    let data_dir = TempDir::new().unwrap();
    let record = data_dir.path().join("shami.json");
    let saved = data_dir.path().join("saved.json");
    std::fs::write(&record, valid_record()).unwrap();

    fihrist(&data_dir)
        .args([
            "submit",
            record.to_str().unwrap(),
            "--save",
            saved.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record saved"));

    let content = std::fs::read_to_string(&saved).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["Name"], "Shami");
    assert_eq!(parsed["Year"], 2018);
}

#[test]
fn test_config_shows_effective_settings() {
    let data_dir = TempDir::new().unwrap();

    fihrist(&data_dir)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("catalogue_repo"))
        .stdout(predicate::str::contains("datasets_dir = \"datasets\""))
        .stdout(predicate::str::contains(
            data_dir.path().file_name().unwrap().to_str().unwrap(),
        ));
}

#[test]
fn test_prs_list_empty() {
    let data_dir = TempDir::new().unwrap();

    fihrist(&data_dir)
        .args(["prs", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tracked pull requests"));
}

#[test]
fn test_prs_list_shows_tracked() {
    let data_dir = TempDir::new().unwrap();
    let index = r#"[
        {
            "name": "Shami",
            "url": "https://github.com/example/catalogue/pull/42",
            "branch": "add-shami",
            "state": "open",
            "number": 42
        }
    ]"#;
    std::fs::write(data_dir.path().join("prs.json"), index).unwrap();

    fihrist(&data_dir)
        .args(["prs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#42 Shami"))
        .stdout(predicate::str::contains("add-shami"));
}

#[test]
fn test_prs_rejects_unknown_action() {
    let data_dir = TempDir::new().unwrap();

    fihrist(&data_dir)
        .args(["prs", "frobnicate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown action"));
}
