//! Key material handles
//!
//! A [`Key`] is either raw secret bytes (HMAC) or a parsed RSA key. Parsing
//! happens once, up front, so the signing path only has to check the family.

use crate::algorithms::KeyFamily;
use crate::error::{JwtError, JwtResult};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;
use zeroize::Zeroizing;

/// Signing or verification key
#[derive(Clone)]
pub enum Key {
    /// Shared HMAC secret
    Secret(Zeroizing<Vec<u8>>),
    /// RSA private key; signs and verifies
    RsaPrivate(RsaPrivateKey),
    /// RSA public key; verifies only
    RsaPublic(RsaPublicKey),
}

impl Key {
    /// Wrap raw secret bytes
    #[must_use]
    pub fn secret(bytes: impl AsRef<[u8]>) -> Self {
        Key::Secret(Zeroizing::new(bytes.as_ref().to_vec()))
    }

    /// Parse a PEM RSA private key (PKCS#8, falling back to PKCS#1)
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] if the PEM is not an RSA private key.
    pub fn rsa_private_pem(pem: &str) -> JwtResult<Self> {
        RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map(Key::RsaPrivate)
            .map_err(|e| JwtError::InvalidKey(format!("Invalid RSA private key: {e}")))
    }

    /// Parse a PEM RSA public key (SPKI, falling back to PKCS#1)
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] if the PEM is not an RSA public key.
    pub fn rsa_public_pem(pem: &str) -> JwtResult<Self> {
        RsaPublicKey::from_public_key_pem(pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
            .map(Key::RsaPublic)
            .map_err(|e| JwtError::InvalidKey(format!("Invalid RSA public key: {e}")))
    }

    /// Parse a DER RSA private key (PKCS#8, falling back to PKCS#1)
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] if the DER is not an RSA private key.
    pub fn rsa_private_der(der: &[u8]) -> JwtResult<Self> {
        RsaPrivateKey::from_pkcs8_der(der)
            .or_else(|_| RsaPrivateKey::from_pkcs1_der(der))
            .map(Key::RsaPrivate)
            .map_err(|e| JwtError::InvalidKey(format!("Invalid RSA private key: {e}")))
    }

    /// Parse a DER RSA public key (SPKI, falling back to PKCS#1)
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] if the DER is not an RSA public key.
    pub fn rsa_public_der(der: &[u8]) -> JwtResult<Self> {
        RsaPublicKey::from_public_key_der(der)
            .or_else(|_| RsaPublicKey::from_pkcs1_der(der))
            .map(Key::RsaPublic)
            .map_err(|e| JwtError::InvalidKey(format!("Invalid RSA public key: {e}")))
    }

    /// Family this key belongs to
    #[must_use]
    pub fn family(&self) -> KeyFamily {
        match self {
            Key::Secret(_) => KeyFamily::Symmetric,
            Key::RsaPrivate(_) | Key::RsaPublic(_) => KeyFamily::Rsa,
        }
    }

    /// Whether this is a parsed key handle rather than raw bytes
    #[must_use]
    pub fn is_structured(&self) -> bool {
        !matches!(self, Key::Secret(_))
    }

    /// Public half of an RSA key, if this is one
    #[must_use]
    pub fn to_public(&self) -> Option<Key> {
        match self {
            Key::RsaPrivate(private) => Some(Key::RsaPublic(private.to_public_key())),
            Key::RsaPublic(public) => Some(Key::RsaPublic(public.clone())),
            Key::Secret(_) => None,
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Secret(bytes) => write!(f, "Key::Secret({} bytes)", bytes.len()),
            Key::RsaPrivate(_) => f.write_str("Key::RsaPrivate(..)"),
            Key::RsaPublic(_) => f.write_str("Key::RsaPublic(..)"),
        }
    }
}

impl From<&str> for Key {
    fn from(secret: &str) -> Self {
        Key::secret(secret)
    }
}

impl From<&[u8]> for Key {
    fn from(secret: &[u8]) -> Self {
        Key::secret(secret)
    }
}

impl From<Vec<u8>> for Key {
    fn from(secret: Vec<u8>) -> Self {
        Key::Secret(Zeroizing::new(secret))
    }
}

impl From<RsaPrivateKey> for Key {
    fn from(key: RsaPrivateKey) -> Self {
        Key::RsaPrivate(key)
    }
}

impl From<RsaPublicKey> for Key {
    fn from(key: RsaPublicKey) -> Self {
        Key::RsaPublic(key)
    }
}
