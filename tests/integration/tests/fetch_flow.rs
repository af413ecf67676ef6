//! Token storage and key retrieval integration tests.
//!
//! These tests store a token with one `FileCredentialStore`, read it back
//! through a fresh instance, and use it against a mock Vault server.

use ansible_hcv_core::config::{KvVersion, VaultSettings};
use ansible_hcv_core::SecretString;
use ansible_hcv_integration_tests::settings;
use ansible_hcv_secrets::{CredentialStore, FileCredentialStore, SecretError};
use ansible_hcv_vault::{fetch_field, VaultError};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_and_reload(settings: &VaultSettings, token: &str) -> SecretString {
    FileCredentialStore::from_settings(settings)
        .save(token)
        .unwrap();
    FileCredentialStore::from_settings(settings)
        .load()
        .unwrap()
        .expect("token should be stored")
}

#[tokio::test]
async fn test_stored_token_fetches_v2_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/data/prod"))
        .and(header("X-Vault-Token", "hvs.integration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "data": {"ansible_vault_key": "v2-key"},
                "metadata": {"version": 4, "deletion_time": "", "destroyed": false}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let settings = settings(dir.path(), &server.uri(), KvVersion::V2);
    let token = store_and_reload(&settings, "hvs.integration");

    let key = fetch_field(&settings, &token, "prod").await.unwrap();
    assert_eq!(key.expose_secret(), "v2-key");
}

#[tokio::test]
async fn test_stored_token_fetches_v1_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/staging"))
        .and(header("X-Vault-Token", "hvs.integration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"ansible_vault_key": "v1-key"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let settings = settings(dir.path(), &server.uri(), KvVersion::V1);
    let token = store_and_reload(&settings, "hvs.integration");

    let key = fetch_field(&settings, &token, "staging").await.unwrap();
    assert_eq!(key.expose_secret(), "v1-key");
}

#[tokio::test]
async fn test_namespace_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/data/prod"))
        .and(header("X-Vault-Namespace", "team-a"))
        .and(header_exists("X-Vault-Token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"data": {"ansible_vault_key": "ns-key"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut settings = settings(dir.path(), &server.uri(), KvVersion::V2);
    settings.namespace = "team-a".to_string();
    let token = store_and_reload(&settings, "hvs.integration");

    let key = fetch_field(&settings, &token, "prod").await.unwrap();
    assert_eq!(key.expose_secret(), "ns-key");
}

#[tokio::test]
async fn test_rotated_token_replaces_previous() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/data/prod"))
        .and(header("X-Vault-Token", "hvs.new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"data": {"ansible_vault_key": "rotated"}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/data/prod"))
        .and(header("X-Vault-Token", "hvs.old"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": ["permission denied"]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let settings = settings(dir.path(), &server.uri(), KvVersion::V2);
    store_and_reload(&settings, "hvs.old");
    let token = store_and_reload(&settings, "hvs.new");
    assert_eq!(token.expose_secret(), "hvs.new");

    let key = fetch_field(&settings, &token, "prod").await.unwrap();
    assert_eq!(key.expose_secret(), "rotated");
}

#[tokio::test]
async fn test_revoked_token_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/data/prod"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": ["permission denied"]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let settings = settings(dir.path(), &server.uri(), KvVersion::V2);
    let token = store_and_reload(&settings, "hvs.revoked");

    let err = fetch_field(&settings, &token, "prod").await.unwrap_err();
    assert!(matches!(err, VaultError::Auth(_)), "got: {:?}", err);
    assert!(!err.to_string().contains("hvs.revoked"));
}

#[test]
fn test_tampered_token_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let settings = settings(dir.path(), "https://127.0.0.1:8200", KvVersion::V2);
    let store = FileCredentialStore::from_settings(&settings);
    store.save("hvs.integration").unwrap();

    let encoded = std::fs::read_to_string(store.path()).unwrap();
    let mut chars: Vec<char> = encoded.trim_end().chars().collect();
    let last = chars.len() - 1;
    chars[last] = if chars[last] == 'A' { 'B' } else { 'A' };
    let tampered: String = chars.into_iter().collect();
    std::fs::write(store.path(), format!("{tampered}\n")).unwrap();

    assert!(matches!(
        FileCredentialStore::from_settings(&settings).load(),
        Err(SecretError::Integrity | SecretError::Format(_))
    ));
}

#[test]
fn test_missing_token_file_is_absent() {
    let dir = TempDir::new().unwrap();
    let settings = settings(dir.path(), "https://127.0.0.1:8200", KvVersion::V2);
    let loaded = FileCredentialStore::from_settings(&settings).load().unwrap();
    assert!(loaded.is_none());
}
