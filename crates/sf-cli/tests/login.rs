//! Integration tests for `sf login`.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn sf(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("sf");
    cmd.env("SF_HOME", home)
        .env("SF_NO_BROWSER", "1")
        .env_remove("SF_LOG");
    cmd
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_login_defaults_to_salesforce() {
    let home = tempdir().unwrap();

    sf(home.path())
        .arg("login")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Opening browser at https://login.salesforce.com...",
        ))
        .stdout(predicate::str::contains(
            "Logged in as myuser-login.salesforce.com@mycompany.com",
        ));

    let accounts = read_json(&home.path().join("accounts.json"));
    assert_eq!(
        accounts["hub"]["user"],
        "myuser-login.salesforce.com@mycompany.com"
    );
    assert_eq!(accounts["hub"]["environments"].as_array().unwrap().len(), 4);

    let environments = read_json(&home.path().join("environments.json"));
    let env = &environments["myuser-login.salesforce.com@mycompany.com"];
    assert_eq!(env["connected"], true);
    assert_eq!(env["status"], "Connected");
    assert_eq!(env["type"], "org");
    assert_eq!(env["context"], "hub");
}

#[test]
fn test_login_rejects_unsupported_provider() {
    let home = tempdir().unwrap();

    sf(home.path())
        .args(["login", "--login-url", "https://login.example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "only supports logging into salesforce.com and heroku.com",
        ));

    assert_eq!(fs::read_dir(home.path()).unwrap().count(), 0);
}

#[test]
fn test_login_url_without_scheme_but_with_url_in_query() {
    let home = tempdir().unwrap();

    sf(home.path())
        .args([
            "login",
            "-r",
            "login.salesforce.com/?startURL=https://x.salesforce.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Opening browser at https://login.salesforce.com/?startURL=https://x.salesforce.com...",
        ))
        .stdout(predicate::str::contains(
            "Logged in as myuser-login.salesforce.com@mycompany.com",
        ));
}

#[test]
fn test_login_sandbox_domain() {
    let home = tempdir().unwrap();

    sf(home.path())
        .args(["login", "-r", "https://mydomain-test.my.salesforce.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Logged in as myuser-mydomain-test.my.salesforce.com@mycompany.com.sandbox",
        ));

    let environments = read_json(&home.path().join("environments.json"));
    assert_eq!(
        environments["myuser-mydomain-test.my.salesforce.com@mycompany.com.sandbox"]["context"],
        "sandbox"
    );
    assert!(!home.path().join("accounts.json").exists());
}

#[test]
fn test_login_twice_registers_sandbox() {
    let home = tempdir().unwrap();

    sf(home.path()).arg("login").assert().success();
    sf(home.path())
        .arg("login")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Logged in as myuser-login.salesforce.com@mycompany.com.sandbox",
        ));
}

#[test]
fn test_login_heroku() {
    let home = tempdir().unwrap();

    sf(home.path())
        .args(["login", "--login-url", "heroku.com", "--expires-in", "3600"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Logged in as myuser-heroku.com@mycompany.com",
        ))
        .stdout(predicate::str::contains("and expires in 3600"));

    let accounts = read_json(&home.path().join("accounts.json"));
    assert_eq!(accounts.as_object().unwrap().len(), 1);
    assert_eq!(accounts["heroku"]["expires"], 3600);
    assert_eq!(accounts["heroku"]["environments"][0], "heroku-app-1");
    assert!(!home.path().join("environments.json").exists());
}

#[test]
fn test_login_with_alias_and_client_id() {
    let home = tempdir().unwrap();

    sf(home.path())
        .args(["login", "--alias", "myorg", "-i", "my-client"])
        .assert()
        .success()
        .stdout(predicate::str::contains("with alias myorg"))
        .stdout(predicate::str::contains("with connected app my-client"));

    let aliases = read_json(&home.path().join("aliases.json"));
    assert_eq!(aliases["myorg"], "myuser-login.salesforce.com@mycompany.com");
}

#[test]
fn test_login_expires_in_ignored_for_salesforce() {
    let home = tempdir().unwrap();

    sf(home.path())
        .args([
            "login",
            "--login-url",
            "login.salesforce.com",
            "--expires-in",
            "3600",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Warning: Can not set token expiration date for login.salesforce.com",
        ))
        .stdout(predicate::str::contains("expires in").not());

    let raw = fs::read_to_string(home.path().join("accounts.json")).unwrap();
    assert!(!raw.contains("expires"));
}

#[test]
fn test_login_json_payload() {
    let home = tempdir().unwrap();

    let output = sf(home.path())
        .args(["login", "--alias", "dev", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let start = stdout.find('{').expect("payload in stdout");
    let payload: Value = serde_json::from_str(&stdout[start..]).unwrap();

    assert_eq!(payload["domain"], "login.salesforce.com");
    assert_eq!(payload["user"], "myuser-login.salesforce.com@mycompany.com");
    assert_eq!(payload["flags"]["alias"], "dev");
    assert_eq!(payload["flags"]["login-url"], "https://login.salesforce.com");
}

#[test]
fn test_login_url_default_from_config() {
    let home = tempdir().unwrap();
    fs::write(
        home.path().join("config.toml"),
        "login_url = \"heroku.com\"\nbrowser = \"firefox\"\n",
    )
    .unwrap();

    sf(home.path())
        .arg("login")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Opening firefox at https://heroku.com...",
        ))
        .stdout(predicate::str::contains(
            "Logged in as myuser-heroku.com@mycompany.com",
        ));
}

#[test]
fn test_login_fails_on_corrupt_store() {
    let home = tempdir().unwrap();
    fs::write(home.path().join("environments.json"), "{oops").unwrap();

    sf(home.path())
        .arg("login")
        .assert()
        .failure()
        .stderr(predicate::str::contains("environments.json"))
        .stderr(predicate::str::contains("corrupt"));

    assert!(!home.path().join("accounts.json").exists());
}
