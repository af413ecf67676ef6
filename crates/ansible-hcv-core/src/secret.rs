//! Zeroizing string for the Vault token and fetched vault keys.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Sensitive text: the decrypted Vault token, or a field read from Vault.
///
/// The buffer is wiped on drop and formatting never shows the value.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the plaintext. Only pass it to an HTTP header, a cipher, or stdout.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy without leading or trailing whitespace.
    ///
    /// Tokens pasted at a prompt or passed on the command line often carry a
    /// trailing newline.
    pub fn trimmed(&self) -> Self {
        Self::new(self.0.trim())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.0.as_bytes(), other.0.as_bytes());
        a.len() == b.len() && a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    /// Takes ownership without copying, so the only buffer holding the value
    /// is the one wiped on drop.
    fn from(value: String) -> Self {
        Self(value)
    }
}
