//! The self-describing encrypted credential blob.
//!
//! Binary layout (all fields fixed-size except the ciphertext):
//!
//! ```text
//! +---------+-----------+-------------+-----------+----------------+
//! | version | key (32)  | nonce (12)  | tag (16)  | ciphertext ... |
//! +---------+-----------+-------------+-----------+----------------+
//! ```
//!
//! The blob carries its own AES-256 key, so it can be decrypted without any
//! other input. Its confidentiality rests on the permissions of the file it
//! lives in; the cipher provides integrity and a versioned format.
//!
//! On disk the blob is stored as a single line of URL-safe base64.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::fmt;
use zeroize::Zeroizing;

use crate::error::{Result, SecretError};

/// Current blob format version.
pub const BLOB_VERSION: u8 = 1;
/// AES-256 key length.
pub const KEY_SIZE: usize = 32;
/// AES-GCM nonce length.
pub const NONCE_SIZE: usize = 12;
/// AES-GCM authentication tag length.
pub const TAG_SIZE: usize = 16;
/// Bytes preceding the ciphertext.
pub const HEADER_SIZE: usize = 1 + KEY_SIZE + NONCE_SIZE + TAG_SIZE;

/// An encrypted credential together with the key that decrypts it.
pub struct EncryptedCredential {
    pub(crate) version: u8,
    pub(crate) key: Zeroizing<[u8; KEY_SIZE]>,
    pub(crate) nonce: [u8; NONCE_SIZE],
    pub(crate) tag: [u8; TAG_SIZE],
    pub(crate) ciphertext: Vec<u8>,
}

impl EncryptedCredential {
    /// Serialize to the binary layout.
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        let mut out = Zeroizing::new(Vec::with_capacity(HEADER_SIZE + self.ciphertext.len()));
        out.push(self.version);
        out.extend_from_slice(self.key.as_slice());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Parse the binary layout.
    ///
    /// Only the length is checked here. The version byte is authenticated
    /// together with the rest of the blob by [`crate::crypto::decrypt`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (&version, rest) = bytes
            .split_first()
            .ok_or_else(|| SecretError::format("empty blob"))?;
        if bytes.len() < HEADER_SIZE {
            return Err(SecretError::format(format!(
                "blob is {} bytes, expected at least {HEADER_SIZE}",
                bytes.len()
            )));
        }

        let (key_bytes, rest) = rest.split_at(KEY_SIZE);
        let (nonce_bytes, rest) = rest.split_at(NONCE_SIZE);
        let (tag_bytes, ciphertext) = rest.split_at(TAG_SIZE);

        let mut key = Zeroizing::new([0u8; KEY_SIZE]);
        key.copy_from_slice(key_bytes);
        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(nonce_bytes);
        let mut tag = [0u8; TAG_SIZE];
        tag.copy_from_slice(tag_bytes);

        Ok(Self {
            version,
            key,
            nonce,
            tag,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Encode as a single line of URL-safe base64 (no newline).
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.to_bytes().as_slice())
    }

    /// Decode a line produced by [`EncryptedCredential::encode`].
    ///
    /// Surrounding whitespace is ignored.
    pub fn decode(text: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            URL_SAFE_NO_PAD
                .decode(text.trim())
                .map_err(|e| SecretError::format(format!("invalid base64: {e}")))?,
        );
        Self::from_bytes(&bytes)
    }
}

impl fmt::Debug for EncryptedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedCredential")
            .field("version", &self.version)
            .field("key", &"[REDACTED]")
            .field("ciphertext_len", &self.ciphertext.len())
            .finish()
    }
}
