//! Signature engine: algorithm dispatch over the exact signing input

use crate::algorithms::{self, KeyFamily};
use crate::crypto;
use crate::error::{JwtError, JwtResult};
use crate::keys::Key;
use subtle::ConstantTimeEq;

/// Sign `message` with `key` under the algorithm named `algorithm`.
///
/// # Errors
/// - [`JwtError::UnsupportedAlgorithm`] if `algorithm` is not registered
/// - [`JwtError::InvalidKey`] if the key family does not match, or an RSA
///   public key is offered for signing
/// - [`JwtError::Signature`] if the primitive itself fails
pub fn sign(message: &[u8], key: &Key, algorithm: &str) -> JwtResult<Vec<u8>> {
    let descriptor = algorithms::resolve(algorithm)?;
    algorithms::ensure_compatible(descriptor, key)?;

    match (descriptor.family, key) {
        (KeyFamily::Symmetric, Key::Secret(secret)) => {
            crypto::hmac::sign(descriptor.hash, message, secret)
        }
        (KeyFamily::Rsa, Key::RsaPrivate(private_key)) => {
            crypto::rsa::sign(descriptor.hash, message, private_key)
        }
        (KeyFamily::Rsa, Key::RsaPublic(_)) => Err(JwtError::invalid_key(
            "an RSA public key cannot produce signatures",
        )),
        _ => Err(JwtError::invalid_key("key does not match algorithm family")),
    }
}

/// Check `candidate` against the signature of `message`.
///
/// Secrets and private keys recompute the signature and compare it in constant
/// time. RSA public keys defer to the primitive's verification.
///
/// # Errors
/// Same as [`sign`]; a mismatch is `Ok(false)`, never an error.
pub fn verify(message: &[u8], key: &Key, algorithm: &str, candidate: &[u8]) -> JwtResult<bool> {
    let descriptor = algorithms::resolve(algorithm)?;
    algorithms::ensure_compatible(descriptor, key)?;

    if let Key::RsaPublic(public_key) = key {
        return Ok(crypto::rsa::verify(
            descriptor.hash,
            message,
            candidate,
            public_key,
        ));
    }

    let expected = sign(message, key, algorithm)?;
    Ok(constant_time_eq(&expected, candidate))
}

/// Byte equality whose running time does not depend on where inputs differ.
///
/// Inputs of different length compare unequal; equal-length inputs are always
/// scanned in full.
#[inline]
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
