//! Symmetric encryption of the claims segment
//!
//! Each cipher is compiled in behind its own feature (`aes`, `chacha20`).
//! Asking for a cipher that was compiled out yields
//! [`JwtError::EncryptionUnavailable`].

use crate::error::{JwtError, JwtResult};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key size shared by every supported cipher
pub const KEY_SIZE: usize = 32;
/// IV (nonce) size shared by every supported cipher
pub const IV_SIZE: usize = 12;

/// AEAD cipher used to encrypt claims
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimCipher {
    /// AES-256-GCM
    ///
    /// - 256-bit key
    /// - 96-bit nonce
    /// - 128-bit authentication tag
    #[serde(rename = "aes256gcm")]
    Aes256Gcm,

    /// ChaCha20-Poly1305
    ///
    /// - 256-bit key
    /// - 96-bit nonce
    /// - 128-bit authentication tag
    #[serde(rename = "chacha20poly1305")]
    ChaCha20Poly1305,
}

impl ClaimCipher {
    /// Human-readable name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aes256Gcm => "AES-256-GCM",
            Self::ChaCha20Poly1305 => "ChaCha20-Poly1305",
        }
    }

    /// Whether this cipher was compiled in
    #[must_use]
    pub const fn is_available(self) -> bool {
        match self {
            Self::Aes256Gcm => cfg!(feature = "aes"),
            Self::ChaCha20Poly1305 => cfg!(feature = "chacha20"),
        }
    }

    /// Fresh random IV from the thread-local CSPRNG
    #[must_use]
    pub fn generate_iv() -> [u8; IV_SIZE] {
        let mut iv = [0u8; IV_SIZE];
        rand::rng().fill_bytes(&mut iv);
        iv
    }

    /// Encrypt `plaintext`; the result carries the authentication tag
    ///
    /// # Errors
    /// - [`JwtError::EncryptionUnavailable`] if the cipher was compiled out
    /// - [`JwtError::InvalidKey`] for a key that is not 32 bytes
    /// - [`JwtError::Encryption`] for a bad IV or primitive failure
    pub fn encrypt(self, plaintext: &[u8], key: &[u8], iv: &[u8]) -> JwtResult<Vec<u8>> {
        self.check_parameters(key, iv)?;
        match self {
            #[cfg(feature = "aes")]
            Self::Aes256Gcm => {
                use aes_gcm::{
                    Aes256Gcm, Nonce,
                    aead::{Aead, KeyInit},
                };
                Aes256Gcm::new_from_slice(key)
                    .map_err(|e| JwtError::InvalidKey(format!("Invalid AES key: {e}")))?
                    .encrypt(Nonce::from_slice(iv), plaintext)
                    .map_err(|e| JwtError::Encryption(format!("AES encryption failed: {e}")))
            }
            #[cfg(feature = "chacha20")]
            Self::ChaCha20Poly1305 => {
                use chacha20poly1305::{
                    ChaCha20Poly1305, Nonce,
                    aead::{Aead, KeyInit},
                };
                ChaCha20Poly1305::new_from_slice(key)
                    .map_err(|e| JwtError::InvalidKey(format!("Invalid ChaCha20 key: {e}")))?
                    .encrypt(Nonce::from_slice(iv), plaintext)
                    .map_err(|e| JwtError::Encryption(format!("ChaCha20 encryption failed: {e}")))
            }
            #[allow(unreachable_patterns)]
            _ => Err(self.unavailable()),
        }
    }

    /// Decrypt and authenticate `ciphertext`
    ///
    /// # Errors
    /// - [`JwtError::EncryptionUnavailable`] if the cipher was compiled out
    /// - [`JwtError::InvalidKey`] / [`JwtError::Encryption`] for bad parameters
    /// - [`JwtError::Decode`] if authentication fails (wrong key, IV or data)
    pub fn decrypt(self, ciphertext: &[u8], key: &[u8], iv: &[u8]) -> JwtResult<Vec<u8>> {
        self.check_parameters(key, iv)?;
        match self {
            #[cfg(feature = "aes")]
            Self::Aes256Gcm => {
                use aes_gcm::{
                    Aes256Gcm, Nonce,
                    aead::{Aead, KeyInit},
                };
                Aes256Gcm::new_from_slice(key)
                    .map_err(|e| JwtError::InvalidKey(format!("Invalid AES key: {e}")))?
                    .decrypt(Nonce::from_slice(iv), ciphertext)
                    .map_err(|_| JwtError::decode("Unable to decrypt claims"))
            }
            #[cfg(feature = "chacha20")]
            Self::ChaCha20Poly1305 => {
                use chacha20poly1305::{
                    ChaCha20Poly1305, Nonce,
                    aead::{Aead, KeyInit},
                };
                ChaCha20Poly1305::new_from_slice(key)
                    .map_err(|e| JwtError::InvalidKey(format!("Invalid ChaCha20 key: {e}")))?
                    .decrypt(Nonce::from_slice(iv), ciphertext)
                    .map_err(|_| JwtError::decode("Unable to decrypt claims"))
            }
            #[allow(unreachable_patterns)]
            _ => Err(self.unavailable()),
        }
    }

    fn check_parameters(self, key: &[u8], iv: &[u8]) -> JwtResult<()> {
        if !self.is_available() {
            return Err(self.unavailable());
        }
        if key.len() != KEY_SIZE {
            return Err(JwtError::InvalidKey(format!(
                "{} key must be {KEY_SIZE} bytes, got {}",
                self.name(),
                key.len()
            )));
        }
        if iv.len() != IV_SIZE {
            return Err(JwtError::Encryption(format!(
                "{} IV must be {IV_SIZE} bytes, got {}",
                self.name(),
                iv.len()
            )));
        }
        Ok(())
    }

    fn unavailable(self) -> JwtError {
        JwtError::EncryptionUnavailable(format!("{} support is not compiled in", self.name()))
    }
}

impl fmt::Display for ClaimCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClaimCipher {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aes" | "aes256" | "aes256gcm" | "aes-256-gcm" => Ok(Self::Aes256Gcm),
            "chacha" | "chacha20" | "chacha20poly1305" | "chacha20-poly1305" => {
                Ok(Self::ChaCha20Poly1305)
            }
            _ => Err(JwtError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}
