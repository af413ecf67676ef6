//! HTTP session against a Vault server.

use ansible_hcv_core::{SecretString, VaultSettings};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Result, VaultError};
use crate::kv::{KvRead, KvResponse};

const TOKEN_HEADER: &str = "x-vault-token";
const NAMESPACE_HEADER: &str = "x-vault-namespace";
const REQUEST_HEADER: &str = "x-vault-request";

/// Read `field` of the secret `id` using `credential` as the Vault token.
///
/// One client is built for this call and dropped at the end. A single
/// request is made, with no retries.
pub async fn fetch_field(
    settings: &VaultSettings,
    credential: &SecretString,
    id: &str,
) -> Result<SecretString> {
    let request = KvRead::new(settings.kv_version, &settings.kv_mount, id);
    if request.path().is_empty() {
        return Err(VaultError::config("secret identifier must not be empty"));
    }

    let client = VaultClient::new(settings, credential)?;
    let response = client.read(&request).await?;
    if let Some(metadata) = response.metadata() {
        debug!(
            version = metadata.version,
            deleted = !metadata.deletion_time.is_empty(),
            destroyed = metadata.destroyed,
            "read KV v2 secret version"
        );
    }
    request.extract(&response, &settings.key_name)
}

/// A Vault client bound to one server, token, and namespace.
pub struct VaultClient {
    /// HTTP client.
    client: Client,

    /// Server address.
    base_url: Url,

    /// Request timeout in seconds.
    timeout: u64,
}

impl VaultClient {
    /// Create a client from settings and a token.
    ///
    /// TLS verification and the timeout are set on this client only, never
    /// process-wide.
    pub fn new(settings: &VaultSettings, token: &SecretString) -> Result<Self> {
        let base_url = Url::parse(&settings.uri)
            .map_err(|e| VaultError::config(format!("Invalid Vault address: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(VaultError::config(format!(
                "Invalid Vault address: {}",
                settings.uri
            )));
        }

        let headers = default_headers(token, settings.namespace())?;

        if !settings.verify_tls {
            debug!("TLS certificate verification disabled for this client");
        }

        let client = Client::builder()
            .timeout(settings.request_timeout())
            .danger_accept_invalid_certs(!settings.verify_tls)
            .default_headers(headers)
            .build()
            .map_err(|e| VaultError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            timeout: settings.timeout,
        })
    }

    /// Full URL for a read.
    fn endpoint(&self, request: &KvRead) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| VaultError::config("Vault address cannot carry a path"))?
            .pop_if_empty()
            .extend(request.segments());
        Ok(url)
    }

    /// Issue a KV read and decode the response for the request's API version.
    pub async fn read(&self, request: &KvRead) -> Result<KvResponse> {
        let url = self.endpoint(request)?;
        debug!(%url, mount = request.mount(), path = request.path(), "reading secret");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        match status {
            s if s.is_success() => request.decode(&body),
            StatusCode::NOT_FOUND => request.decode_not_found(&body),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!(status = status.as_u16(), "Vault rejected the token");
                Err(VaultError::auth(error_message(&body, "permission denied")))
            }
            _ => Err(VaultError::server_error(
                status.as_u16(),
                error_message(&body, status.canonical_reason().unwrap_or("unknown")),
            )),
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> VaultError {
        if e.is_timeout() {
            VaultError::Timeout(self.timeout)
        } else {
            VaultError::Transport(e)
        }
    }
}

fn default_headers(token: &SecretString, namespace: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut token_value = HeaderValue::from_str(token.expose_secret())
        .map_err(|_| VaultError::auth("token contains characters not allowed in an HTTP header"))?;
    token_value.set_sensitive(true);
    headers.insert(TOKEN_HEADER, token_value);
    headers.insert(REQUEST_HEADER, HeaderValue::from_static("true"));

    if let Some(ns) = namespace {
        let ns_value = HeaderValue::from_str(ns)
            .map_err(|_| VaultError::config(format!("Invalid Vault namespace: {ns}")))?;
        headers.insert(NAMESPACE_HEADER, ns_value);
    }

    Ok(headers)
}

/// Vault error body: `{"errors": ["..."]}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

fn error_message(body: &[u8], fallback: &str) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .filter(|b| !b.errors.is_empty())
        .map(|b| b.errors.join("; "))
        .unwrap_or_else(|| fallback.to_string())
}
