//! AES-256-GCM credential cipher.
//!
//! Every call to [`encrypt`] draws a fresh random key and nonce from the OS,
//! so no key is ever used twice. The blob version byte is bound as associated
//! data.

use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use ansible_hcv_core::SecretString;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{Result, SecretError};
use crate::types::{EncryptedCredential, BLOB_VERSION, KEY_SIZE, NONCE_SIZE, TAG_SIZE};

/// Fill `buf` from the OS random source.
fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| SecretError::Entropy(e.to_string()))
}

/// Encrypt `plaintext` under a newly generated key.
pub fn encrypt(plaintext: &str) -> Result<EncryptedCredential> {
    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    fill_random(key.as_mut_slice())?;
    let mut nonce = [0u8; NONCE_SIZE];
    fill_random(&mut nonce)?;

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));
    let mut buffer = plaintext.as_bytes().to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&nonce), &[BLOB_VERSION], &mut buffer)
        .map_err(|_| SecretError::format("plaintext too large to encrypt"))?;

    let mut tag_bytes = [0u8; TAG_SIZE];
    tag_bytes.copy_from_slice(tag.as_slice());

    Ok(EncryptedCredential {
        version: BLOB_VERSION,
        key,
        nonce,
        tag: tag_bytes,
        ciphertext: buffer,
    })
}

/// Verify and decrypt a blob produced by [`encrypt`].
///
/// The tag is checked against [`BLOB_VERSION`] as associated data, so a
/// change to any byte of the blob, version included, fails with
/// [`SecretError::Integrity`].
pub fn decrypt(blob: &EncryptedCredential) -> Result<SecretString> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(blob.key.as_slice()));
    let mut buffer = Zeroizing::new(blob.ciphertext.clone());
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(&blob.nonce),
            &[BLOB_VERSION],
            buffer.as_mut_slice(),
            GenericArray::from_slice(&blob.tag),
        )
        .map_err(|_| SecretError::Integrity)?;

    let text = std::str::from_utf8(buffer.as_slice())
        .map_err(|_| SecretError::format("decrypted credential is not valid UTF-8"))?;
    Ok(SecretString::new(text))
}
