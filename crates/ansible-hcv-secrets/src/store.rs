//! Credential storage backends.
//!
//! Defines the [`CredentialStore`] trait and provides [`FileCredentialStore`],
//! which keeps a single encrypted Vault token in an owner-only file.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use ansible_hcv_core::{fs as private_fs, SecretString, VaultSettings};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto;
use crate::error::{Result, SecretError};
use crate::types::EncryptedCredential;

/// Storage for the credential used to authenticate against Vault.
pub trait CredentialStore {
    /// Encrypt `plaintext` and persist it, replacing any previous credential.
    fn save(&self, plaintext: &str) -> Result<()>;

    /// Load and decrypt the stored credential.
    ///
    /// Returns `Ok(None)` when no credential is configured: the file does not
    /// exist or its first record is empty.
    fn load(&self) -> Result<Option<SecretString>>;
}

/// A credential stored as one line of encoded blob in a file.
///
/// The file is created with mode `0600` and replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the configured `token_path`.
    pub fn from_settings(settings: &VaultSettings) -> Self {
        Self::new(settings.credential_path())
    }

    /// Path of the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, source: std::io::Error) -> SecretError {
        SecretError::storage(&self.path, source)
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, plaintext: &str) -> Result<()> {
        let blob = crypto::encrypt(plaintext)?;
        let mut record = Zeroizing::new(blob.encode());
        record.push('\n');

        debug!(path = %self.path.display(), "writing credential");
        private_fs::write_private_file(&self.path, record.as_bytes())
            .map_err(|e| self.storage_error(e))
    }

    fn load(&self) -> Result<Option<SecretString>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no credential file");
                return Ok(None);
            }
            Err(e) => return Err(self.storage_error(e)),
        };

        // Only the first record counts.
        let mut line = Zeroizing::new(String::new());
        BufReader::new(file)
            .read_line(&mut line)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidData => SecretError::format("credential file is not text"),
                _ => self.storage_error(e),
            })?;

        let record = line.trim();
        if record.is_empty() {
            debug!(path = %self.path.display(), "credential file is empty");
            return Ok(None);
        }

        let blob = EncryptedCredential::decode(record)?;
        let credential = crypto::decrypt(&blob)?;
        debug!(path = %self.path.display(), "read credential");
        Ok(Some(credential))
    }
}
