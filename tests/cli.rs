use assert_cmd::prelude::*;
use mockito::Matcher;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const ENV_VARS: [&str; 6] = [
    "AUDITOP_CONFIG",
    "AUDITOP_API_URL",
    "AUDITOP_API_KEY",
    "AUDITOP_DOC_ID",
    "AUDITOP_FORMAT",
    "AUDITOP_DEBUG",
];

fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn config_for(dir: &Path, server_url: &str) -> PathBuf {
    write_config(
        dir,
        &format!(
            "api_url: {server_url}/api\napi_key: test-key-123456\ndoc_id: doc1\npreferences:\n  autosave_delay_ms: 50\n"
        ),
    )
}

fn auditop(config_path: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("auditop"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(config_path);
    cmd
}

fn records(body: serde_json::Value) -> String {
    json!({ "records": body }).to_string()
}

#[test]
fn version_prints_package_version() {
    Command::new(assert_cmd::cargo::cargo_bin!("auditop"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "auditop version {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn status_reports_missing_settings() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "api_url: https://grist.example.org/api\n");

    let assert = auditop(&config_path).arg("status").assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("API URL: https://grist.example.org/api"));
    assert!(stdout.contains("API key not configured"));
    assert!(stdout.contains("Document not configured"));
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));

    Ok(())
}

#[test]
fn status_applies_env_overrides() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("absent.yaml");

    let assert = auditop(&config_path)
        .arg("status")
        .env("AUDITOP_DOC_ID", "from-env")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("(not found)"));
    assert!(stdout.contains("Document: from-env"));

    Ok(())
}

#[test]
fn commands_require_configuration() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("absent.yaml");

    auditop(&config_path)
        .args(["product", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("auditop init"));

    Ok(())
}

#[test]
fn answer_without_changes_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("absent.yaml");

    auditop(&config_path)
        .args(["audit", "answer", "h-2024", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));

    Ok(())
}

#[test]
fn answer_rejects_out_of_range_percentage() {
    Command::new(assert_cmd::cargo::cargo_bin!("auditop"))
        .args(["audit", "answer", "h-2024", "100", "no", "--percentage", "120"])
        .assert()
        .failure();
}

#[test]
fn completion_generates_script() {
    Command::new(assert_cmd::cargo::cargo_bin!("auditop"))
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auditop"));
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn audit_answer_writes_one_batched_upsert() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _audit = server
        .mock("GET", "/api/docs/doc1/tables/AuditsAudits/records")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(records(json!([
            {"id": 2, "fields": {"Hash": "h-2024", "Produit": 10, "Cloture": false}}
        ])))
        .create();
    let _product = server
        .mock("GET", "/api/docs/doc1/tables/AuditsProduits/records")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(records(json!([{"id": 10, "fields": {"Nom": "Carnet"}}])))
        .create();
    let _response = server
        .mock("GET", "/api/docs/doc1/tables/AuditsReponses/records")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(records(json!([])))
        .create();
    let put = server
        .mock("PUT", "/api/docs/doc1/tables/AuditsReponses/records")
        .match_body(Matcher::Json(json!({"records": [{
            "require": {"Audit": 2, "Question": 100},
            "fields": {"Reponse": "Non", "Commentaires_Details": "needs work", "Pourcentage": 50}
        }]})))
        .with_status(200)
        .with_body("null")
        .expect(1)
        .create();

    let temp = tempdir()?;
    let config_path = config_for(temp.path(), &server.url());

    auditop(&config_path)
        .args([
            "audit", "answer", "h-2024", "100", "no", "-p", "50", "-c", "needs work",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 1 answer"));

    put.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn closed_audit_is_read_only() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _audit = server
        .mock("GET", "/api/docs/doc1/tables/AuditsAudits/records")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(records(json!([
            {"id": 1, "fields": {"Hash": "h-2023", "Produit": 10, "Cloture": true}}
        ])))
        .create();
    let _product = server
        .mock("GET", "/api/docs/doc1/tables/AuditsProduits/records")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(records(json!([{"id": 10, "fields": {"Nom": "Carnet"}}])))
        .create();
    let put = server
        .mock("PUT", "/api/docs/doc1/tables/AuditsReponses/records")
        .expect(0)
        .create();

    let temp = tempdir()?;
    let config_path = config_for(temp.path(), &server.url());

    auditop(&config_path)
        .args(["audit", "reset", "h-2023", "100", "101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("closed"));

    put.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn rejected_write_is_reported_as_not_saved() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _audit = server
        .mock("GET", "/api/docs/doc1/tables/AuditsAudits/records")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(records(json!([
            {"id": 2, "fields": {"Hash": "h-2024", "Produit": 10}}
        ])))
        .create();
    let _product = server
        .mock("GET", "/api/docs/doc1/tables/AuditsProduits/records")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(records(json!([{"id": 10, "fields": {"Nom": "Carnet"}}])))
        .create();
    let put = server
        .mock("PUT", "/api/docs/doc1/tables/AuditsReponses/records")
        .with_status(500)
        .with_body(r#"{"error": "engine down"}"#)
        .expect(1)
        .create();

    let temp = tempdir()?;
    let config_path = config_for(temp.path(), &server.url());

    auditop(&config_path)
        .args(["audit", "reset", "h-2024", "100", "101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not saved"))
        .stderr(predicate::str::contains("engine down"));

    put.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn hosting_get_fetches_mapping_table_once() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let mappings = server
        .mock("GET", "/api/docs/doc1/tables/Mapping_produit_hebergement/records")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(records(json!([
            {"id": 1, "fields": {"Identifiant_Outil": "scw-org-1"}},
            {"id": 2, "fields": {"Identifiant_Outil": "ovh-42"}}
        ])))
        .expect(1)
        .create();

    let temp = tempdir()?;
    let config_path = config_for(temp.path(), &server.url());

    let assert = auditop(&config_path)
        .args(["hosting", "get", "1", "2", "1", "9", "--format", "table"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("scw-org-1"));
    assert!(stdout.contains("ovh-42"));

    mappings.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn product_list_json_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _products = server
        .mock("GET", "/api/docs/doc1/tables/AuditsProduits/records")
        .match_header("authorization", "Bearer test-key-123456")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(records(json!([
            {"id": 10, "fields": {"Nom": "Carnet", "Outils_mutualises": ["L", "Sentry"]}}
        ])))
        .create();

    let temp = tempdir()?;
    let config_path = config_for(temp.path(), &server.url());

    let assert = auditop(&config_path)
        .args(["product", "list", "--format", "json"])
        .assert()
        .success();

    let output: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(output["data"][0]["name"], "Carnet");
    assert_eq!(output["data"][0]["shared_tools"], "Sentry");
    assert!(output["meta"]["version"].is_string());

    Ok(())
}
