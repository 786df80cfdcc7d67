use std::sync::OnceLock;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

const CERT_JSON: &str = r#"{"Issuer":"IssuerA", "Link": "111", "Hash": "xxx", "Description": "jjj", "Recipient" : {"ID": "jj", "Name": "jj"}}"#;

/// Run certchain with a fixed operator and no inherited home override.
fn certchain() -> Command {
    let mut cmd = cargo_bin_cmd!("certchain");
    cmd.env_remove("CERTCHAIN_HOME")
        .env_remove("CERTCHAIN_LOG")
        .env("CERTCHAIN_OPERATOR", "tester");
    cmd
}

fn issuer_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap())
}

fn unrelated_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap())
}

/// PKIX public key under the `RSA PUBLIC KEY` label, as existing clients emit it.
fn public_pem(key: &RsaPrivateKey) -> String {
    RsaPublicKey::from(key)
        .to_public_key_pem(LineEnding::LF)
        .unwrap()
        .replace("PUBLIC KEY", "RSA PUBLIC KEY")
}

fn sign(key: &RsaPrivateKey, message: &str) -> Vec<u8> {
    let hashed = Sha256::digest(message.as_bytes());
    key.sign(Pkcs1v15Sign::new::<Sha256>(), &hashed).unwrap()
}

fn init(dir: &assert_fs::TempDir) {
    certchain()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
}

fn add_issuer(dir: &assert_fs::TempDir, name: &str, key: &RsaPrivateKey) {
    let payload = serde_json::json!({ "Issuer": name, "PubKeyPem": public_pem(key) }).to_string();
    certchain()
        .current_dir(dir.path())
        .args(["issuer", "add", &payload])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Issuer stored: {name}")));
}

fn add_recipient(dir: &assert_fs::TempDir) {
    let payload = serde_json::json!({
        "Rp": { "ID": "jj", "Name": "jj" },
        "PubKeyPem": public_pem(unrelated_key()),
    })
    .to_string();
    certchain()
        .current_dir(dir.path())
        .args(["recipient", "add", &payload])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recipient stored: jj"));
}

fn cert_list(dir: &assert_fs::TempDir, query: &str) -> Vec<serde_json::Value> {
    let output = certchain()
        .current_dir(dir.path())
        .args(["certs", query])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn init_creates_home_and_counter() {
    let dir = assert_fs::TempDir::new().unwrap();

    certchain()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created .certchain/"))
        .stdout(predicate::str::contains("Sequence counter at 0"));

    dir.child(".certchain/config.toml")
        .assert(predicate::path::exists());
    dir.child(".certchain/state.json")
        .assert(predicate::str::contains("#Counter#"));
}

#[test]
fn init_twice_keeps_counter() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    add_issuer(&dir, "IssuerA", issuer_key());

    certchain()
        .current_dir(dir.path())
        .args(["issue", CERT_JSON, "--signature"])
        .arg(base64::encode(sign(issuer_key(), CERT_JSON)))
        .assert()
        .success();

    certchain()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Using existing config.toml"))
        .stdout(predicate::str::contains("Sequence counter at 1"));
}

#[test]
fn issue_and_list_end_to_end() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    add_issuer(&dir, "IssuerA", issuer_key());
    add_recipient(&dir);

    let signature = sign(issuer_key(), CERT_JSON);
    certchain()
        .current_dir(dir.path())
        .args(["issue", CERT_JSON, "--signature"])
        .arg(base64::encode(&signature))
        .assert()
        .success()
        .stdout(predicate::str::contains("Certificate issued: 1"));

    let certs = cert_list(&dir, r#"{"ID":"jj", "Name":"jj"}"#);
    assert_eq!(certs.len(), 1);

    let cert = &certs[0]["Cert"];
    assert_eq!(certs[0]["ID"], "1");
    assert_eq!(cert["Issuer"], "IssuerA");
    assert_eq!(cert["Link"], "111");
    assert_eq!(cert["Hash"], "xxx");
    assert_eq!(cert["Description"], "jjj");
    assert_eq!(cert["Recipient"]["ID"], "jj");
    assert_eq!(cert["Recipient"]["Name"], "jj");
    assert_eq!(cert["Signature"], base64::encode(&signature));
}

#[test]
fn unrelated_key_signature_is_rejected() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    add_issuer(&dir, "IssuerA", issuer_key());
    add_recipient(&dir);

    certchain()
        .current_dir(dir.path())
        .args(["issue", CERT_JSON, "--signature"])
        .arg(base64::encode(sign(unrelated_key(), CERT_JSON)))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Signature rejected for issuer 'IssuerA'"));

    assert!(cert_list(&dir, r#"{"ID":"jj","Name":"jj"}"#).is_empty());
    dir.child(".certchain/state.json")
        .assert(predicate::str::contains("\"cert/").not());
    dir.child(".certchain/audit.log")
        .assert(predicate::str::contains("\"action\":\"reject_cert\""));
}

#[test]
fn modified_payload_is_rejected() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    add_issuer(&dir, "IssuerA", issuer_key());

    let signature = sign(issuer_key(), CERT_JSON);
    let tampered = CERT_JSON.replace("\"111\"", "\"999\"");

    certchain()
        .current_dir(dir.path())
        .args(["issue", &tampered, "--signature"])
        .arg(base64::encode(signature))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Signature rejected"));

    assert!(cert_list(&dir, r#"{"ID":"jj","Name":"jj"}"#).is_empty());
}

#[test]
fn unknown_issuer_is_rejected() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    certchain()
        .current_dir(dir.path())
        .args(["issue", CERT_JSON, "--signature"])
        .arg(base64::encode(sign(issuer_key(), CERT_JSON)))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown issuer 'IssuerA'"));
}

#[test]
fn payload_and_signature_from_files() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    add_issuer(&dir, "IssuerA", issuer_key());

    // Signed bytes include the trailing newline of the file.
    let on_disk = format!("{CERT_JSON}\n");
    dir.child("cert.json").write_str(&on_disk).unwrap();
    dir.child("cert.sig")
        .write_binary(&sign(issuer_key(), &on_disk))
        .unwrap();

    certchain()
        .current_dir(dir.path())
        .args(["issue", "@cert.json", "--signature-file", "cert.sig"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Certificate issued: 1"));

    dir.child("query.json")
        .write_str(r#"{"ID":"jj","Name":"jj"}"#)
        .unwrap();
    assert_eq!(cert_list(&dir, "@query.json").len(), 1);
}

#[test]
fn certificates_are_listed_in_issuance_order() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    add_issuer(&dir, "IssuerA", issuer_key());

    for link in ["111", "222", "333"] {
        let payload = CERT_JSON.replace("\"111\"", &format!("\"{link}\""));
        certchain()
            .current_dir(dir.path())
            .args(["issue", &payload, "--signature"])
            .arg(base64::encode(sign(issuer_key(), &payload)))
            .assert()
            .success();
    }

    let links: Vec<String> = cert_list(&dir, r#"{"ID":"jj","Name":"jj"}"#)
        .iter()
        .map(|c| c["Cert"]["Link"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(links, vec!["111", "222", "333"]);
}

#[test]
fn re_registering_issuer_replaces_key() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    add_issuer(&dir, "IssuerA", unrelated_key());
    add_issuer(&dir, "IssuerA", issuer_key());

    certchain()
        .current_dir(dir.path())
        .args(["issue", CERT_JSON, "--signature"])
        .arg(base64::encode(sign(issuer_key(), CERT_JSON)))
        .assert()
        .success();
}

#[test]
fn show_registered_entities() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    add_issuer(&dir, "IssuerA", issuer_key());
    add_recipient(&dir);

    certchain()
        .current_dir(dir.path())
        .args(["issuer", "show", "IssuerA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RSA key, 1024 bits"));

    certchain()
        .current_dir(dir.path())
        .args(["recipient", "show", "jj"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recipient jj (jj)"));
}

#[test]
fn custom_home_directory() {
    let dir = assert_fs::TempDir::new().unwrap();

    certchain()
        .current_dir(dir.path())
        .args(["--home", "ledger", "init"])
        .assert()
        .success();

    dir.child("ledger/state.json")
        .assert(predicate::path::exists());
    dir.child(".certchain").assert(predicate::path::missing());
}

#[test]
fn issuer_key_with_single_line_body_is_accepted() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    let wrapped = public_pem(issuer_key());
    let lines: Vec<&str> = wrapped.lines().collect();
    let single_line = format!(
        "{}\n{}\n{}\n",
        lines[0],
        lines[1..lines.len() - 1].concat(),
        lines[lines.len() - 1]
    );
    let payload = serde_json::json!({ "Issuer": "IssuerA", "PubKeyPem": single_line }).to_string();

    certchain()
        .current_dir(dir.path())
        .args(["issuer", "add", &payload])
        .assert()
        .success();

    certchain()
        .current_dir(dir.path())
        .args(["issue", CERT_JSON, "--signature"])
        .arg(base64::encode(sign(issuer_key(), CERT_JSON)))
        .assert()
        .success()
        .stdout(predicate::str::contains("Certificate issued: 1"));
}

#[test]
fn log_narrows_to_rejections_and_certificates() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    add_issuer(&dir, "IssuerA", issuer_key());
    add_recipient(&dir);

    certchain()
        .current_dir(dir.path())
        .args(["issue", CERT_JSON, "--signature"])
        .arg(base64::encode(sign(issuer_key(), CERT_JSON)))
        .assert()
        .success();
    certchain()
        .current_dir(dir.path())
        .args(["issue", CERT_JSON, "--signature"])
        .arg(base64::encode(sign(unrelated_key(), CERT_JSON)))
        .assert()
        .failure();

    certchain()
        .current_dir(dir.path())
        .args(["log", "--action", "reject_cert"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 entries)"))
        .stdout(predicate::str::contains("rejected"));

    certchain()
        .current_dir(dir.path())
        .args(["log", "--subject", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 entries)"))
        .stdout(predicate::str::contains("IssuerA → jj"));
}
