//! KV secrets engine request and response shapes.
//!
//! The two engine generations are modelled as variants of [`KvRead`] and
//! [`KvResponse`]. Supporting another generation means adding a variant to
//! each and handling it in the `match` arms below.

use ansible_hcv_core::{KvVersion, SecretString};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, VaultError};

/// A read of one secret through a specific KV API generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvRead {
    /// `GET /v1/{mount}/{path}`.
    V1 { mount: String, path: String },
    /// `GET /v1/{mount}/data/{path}`, latest version.
    V2 { mount: String, path: String },
}

impl KvRead {
    /// Build a read for `path` under `mount`. Leading and trailing slashes
    /// on either part are ignored.
    pub fn new(version: KvVersion, mount: &str, path: &str) -> Self {
        let mount = mount.trim_matches('/').to_string();
        let path = path.trim_matches('/').to_string();
        match version {
            KvVersion::V1 => Self::V1 { mount, path },
            KvVersion::V2 => Self::V2 { mount, path },
        }
    }

    /// Mount point of the engine.
    pub fn mount(&self) -> &str {
        match self {
            Self::V1 { mount, .. } | Self::V2 { mount, .. } => mount,
        }
    }

    /// Secret path inside the mount.
    pub fn path(&self) -> &str {
        match self {
            Self::V1 { path, .. } | Self::V2 { path, .. } => path,
        }
    }

    /// URL path segments below the server address, `v1` prefix included.
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = vec!["v1"];
        segments.extend(split_path(self.mount()));
        if let Self::V2 { .. } = self {
            segments.push("data");
        }
        segments.extend(split_path(self.path()));
        segments
    }

    /// Decode a successful response body.
    pub fn decode(&self, body: &[u8]) -> Result<KvResponse> {
        let decoded = match self {
            Self::V1 { .. } => serde_json::from_slice(body).map(KvResponse::V1),
            Self::V2 { .. } => serde_json::from_slice(body).map(KvResponse::V2),
        };
        decoded.map_err(|e| VaultError::invalid_response(format!("KV response: {e}")))
    }

    /// Decode a 404 response body.
    ///
    /// Vault answers 404 when the latest KV v2 version has been soft-deleted,
    /// but still returns the version metadata. That case yields a response
    /// with no fields. Everything else is [`VaultError::SecretNotFound`].
    pub fn decode_not_found(&self, body: &[u8]) -> Result<KvResponse> {
        if let Self::V2 { .. } = self {
            if let Ok(response) = serde_json::from_slice::<KvV2Response>(body) {
                if response.data.is_soft_deleted() {
                    return Ok(KvResponse::V2(response));
                }
            }
        }
        Err(VaultError::SecretNotFound {
            mount: self.mount().to_string(),
            path: self.path().to_string(),
        })
    }

    /// Pull `field` out of a decoded response.
    pub fn extract(&self, response: &KvResponse, field: &str) -> Result<SecretString> {
        let missing = || VaultError::FieldNotFound {
            path: self.path().to_string(),
            field: field.to_string(),
        };
        match response.fields().and_then(|fields| fields.get(field)) {
            Some(Value::String(value)) => Ok(SecretString::new(value.as_str())),
            Some(Value::Null) | None => Err(missing()),
            Some(other) => Ok(SecretString::new(other.to_string())),
        }
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// A decoded secret document.
#[derive(Debug, Clone)]
pub enum KvResponse {
    V1(KvV1Response),
    V2(KvV2Response),
}

impl KvResponse {
    /// The secret's key/value pairs, if the response carries any.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::V1(response) => Some(&response.data),
            Self::V2(response) => response.data.data.as_ref(),
        }
    }

    /// Metadata of the returned version (KV v2 only).
    pub fn metadata(&self) -> Option<&KvV2Metadata> {
        match self {
            Self::V1(_) => None,
            Self::V2(response) => response.data.metadata.as_ref(),
        }
    }
}

/// KV v1 read response.
#[derive(Debug, Clone, Deserialize)]
pub struct KvV1Response {
    pub data: Map<String, Value>,
}

/// KV v2 read response.
#[derive(Debug, Clone, Deserialize)]
pub struct KvV2Response {
    pub data: KvV2Data,
}

/// The outer `data` object of a KV v2 response.
#[derive(Debug, Clone, Deserialize)]
pub struct KvV2Data {
    /// Secret fields; `null` for deleted or destroyed versions.
    #[serde(default)]
    pub data: Option<Map<String, Value>>,

    #[serde(default)]
    pub metadata: Option<KvV2Metadata>,
}

impl KvV2Data {
    fn is_soft_deleted(&self) -> bool {
        self.metadata
            .as_ref()
            .is_some_and(|m| !m.deletion_time.is_empty())
    }
}

/// Version metadata attached to a KV v2 response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KvV2Metadata {
    #[serde(default)]
    pub created_time: String,

    #[serde(default)]
    pub deletion_time: String,

    #[serde(default)]
    pub destroyed: bool,

    #[serde(default)]
    pub version: u64,
}
